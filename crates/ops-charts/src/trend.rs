//! Line chart with a least-squares trend line and trailing moving average.

use crate::{
    ChartDimensions, ChartMargin, colors,
    hover::{ActiveTarget, HIT_RADIUS, TooltipLayout},
    path::line_path,
    responsive::use_container_width,
    scale::Projection,
    stats::{DEFAULT_MOVING_AVERAGE_WINDOW, Regression, TrendDirection, linear_regression, moving_average},
    widgets::{CategoryAxis, ChartLegend, ChartTooltip, EmptyState, LegendItem, ValueAxis},
};
use leptos::html::Div;
use leptos::prelude::*;
use ops_core::{CompactNumberFormatter, TrendLineData, ValueFormatter, value_bounds};

/// Fraction of the value span added above and below the plotted range
const DOMAIN_PADDING: f64 = 0.1;

/// Trend chart configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLineConfig {
    pub height: f64,
    pub color: &'static str,
    pub trend_color: &'static str,
    pub average_color: &'static str,
    pub show_trend: bool,
    pub show_moving_average: bool,
    pub moving_average_window: usize,
    pub show_points: bool,
    /// Slopes closer to zero than this read as stable
    pub stable_tolerance: f64,
    pub margin: ChartMargin,
}

impl Default for TrendLineConfig {
    fn default() -> Self {
        Self {
            height: 300.0,
            color: colors::PRIMARY,
            trend_color: colors::DANGER,
            average_color: colors::SUCCESS,
            show_trend: true,
            show_moving_average: true,
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            show_points: true,
            stable_tolerance: 0.01,
            margin: ChartMargin::axes(),
        }
    }
}

impl TrendLineConfig {
    pub fn with_window(mut self, window: usize) -> Self {
        self.moving_average_window = window;
        self
    }

    pub fn without_overlays(mut self) -> Self {
        self.show_trend = false;
        self.show_moving_average = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendGeometry {
    pub points: Vec<(f64, f64)>,
    pub values: Vec<f64>,
    pub labels: Vec<String>,
    pub line_path: String,
    pub regression: Regression,
    pub direction: TrendDirection,
    /// Fitted line from the first index to the last
    pub trend_segment: ((f64, f64), (f64, f64)),
    /// `None` when fewer than two averages are defined
    pub moving_average_path: Option<String>,
    pub value_ticks: Vec<(f64, String)>,
    pub category_labels: Vec<(f64, String)>,
    pub projection: Projection,
}

pub fn trend_geometry(data: &[TrendLineData], width: f64, config: &TrendLineConfig) -> Option<TrendGeometry> {
    if width <= 0.0 || data.is_empty() {
        return None;
    }

    let values: Vec<f64> = data.iter().map(|d| d.value).collect();
    let labels: Vec<String> = data.iter().map(|d| d.label.clone()).collect();
    let regression = linear_regression(&values)?;
    let last = (values.len() - 1) as f64;

    // keep the fitted endpoints on screen
    let fitted = [regression.predict(0.0), regression.predict(last)];
    let (lo, hi) = value_bounds(values.iter().chain(fitted.iter()).cloned())?;
    let pad = (hi - lo) * DOMAIN_PADDING;

    let dims = ChartDimensions::new(width, config.height).with_margin(config.margin);
    let projection = Projection::new(&dims, lo - pad, hi + pad, values.len());

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| projection.point(i, v))
        .collect();

    let trend_segment = (
        projection.point(0, fitted[0]),
        projection.point(values.len() - 1, fitted[1]),
    );

    let averaged: Vec<(f64, f64)> = moving_average(&values, config.moving_average_window)
        .into_iter()
        .enumerate()
        .filter_map(|(i, avg)| avg.map(|v| projection.point(i, v)))
        .collect();
    let moving_average_path = (averaged.len() >= 2).then(|| line_path(&averaged));

    let direction = TrendDirection::from_slope(regression.slope, config.stable_tolerance);
    tracing::debug!(points = values.len(), slope = regression.slope, "trend geometry computed");

    Some(TrendGeometry {
        line_path: line_path(&points),
        value_ticks: projection.value_ticks(5),
        category_labels: projection.category_labels(&labels, 60.0),
        points,
        values,
        labels,
        regression,
        direction,
        trend_segment,
        moving_average_path,
        projection,
    })
}

/// Trend line chart component
#[component]
pub fn TrendLineChart(
    #[prop(into)] data: Signal<Vec<TrendLineData>>,
    #[prop(into)] title: String,
    #[prop(optional)] config: Option<TrendLineConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let container = NodeRef::<Div>::new();
    let width = use_container_width(container);
    let hovered = RwSignal::new(ActiveTarget::<usize>::default());

    let geometry = Memo::new(move |_| trend_geometry(&data.get(), width.get(), &config));

    let legend = move || {
        let mut items = vec![LegendItem::new("Value", config.color)];
        if config.show_trend {
            items.push(LegendItem::new("Trend", config.trend_color));
        }
        if config.show_moving_average {
            items.push(LegendItem::new(
                format!("{}-pt average", config.moving_average_window.max(1)),
                config.average_color,
            ));
        }
        view! { <ChartLegend items=items /> }
    };

    let summary = move || {
        geometry.get().map(|geo| {
            view! {
                <div class="trend-summary">
                    {format!(
                        "{} {} ({:+.2} per step)",
                        geo.direction.arrow(),
                        geo.direction.label(),
                        geo.regression.slope,
                    )}
                </div>
            }
        })
    };

    view! {
        <div class="chart-card trend-chart">
            <h3 class="chart-title">{title}</h3>
            {summary}
            <div class="chart-body" node_ref=container style="width: 100%;">
                {move || {
                    let w = width.get();
                    (w > 0.0).then(|| match geometry.get() {
                        Some(geo) => render_trend(geo, w, config, hovered).into_any(),
                        None => view! {
                            <EmptyState message="No data available" height=config.height />
                        }
                        .into_any(),
                    })
                }}
            </div>
            {legend}
        </div>
    }
}

fn render_trend(
    geo: TrendGeometry,
    width: f64,
    config: TrendLineConfig,
    hovered: RwSignal<ActiveTarget<usize>>,
) -> impl IntoView {
    let projection = geo.projection;
    let formatter = CompactNumberFormatter;
    let regression = geo.regression;
    let tooltip_points = geo.points.clone();
    let tooltip_values = geo.values.clone();
    let tooltip_labels = geo.labels.clone();

    let tooltip = move || {
        let index = *hovered.get().get()?;
        let &(x, y) = tooltip_points.get(index)?;
        let mut lines = vec![
            tooltip_labels.get(index).cloned().unwrap_or_default(),
            format!("Value: {}", formatter.format(*tooltip_values.get(index)?)),
        ];
        if config.show_trend {
            lines.push(format!("Trend: {}", formatter.format(regression.predict(index as f64))));
        }
        Some(view! { <ChartTooltip layout=TooltipLayout::anchored(x, y, lines, width) /> })
    };

    let ((x1, y1), (x2, y2)) = geo.trend_segment;
    let trend = config.show_trend.then(|| {
        view! {
            <line
                class="trend-fit"
                x1=x1
                y1=y1
                x2=x2
                y2=y2
                stroke=config.trend_color
                stroke-width="2"
                stroke-dasharray="6 4"
            />
        }
    });

    let average = geo
        .moving_average_path
        .filter(|_| config.show_moving_average)
        .map(|d| {
            view! {
                <path
                    class="trend-average"
                    d=d
                    fill="none"
                    stroke=config.average_color
                    stroke-width="2"
                    stroke-linejoin="round"
                />
            }
        });

    let markers = geo
        .points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            let r = move || if hovered.get().is(&i) { 5.0 } else { 3.5 };
            view! {
                <g class="trend-point">
                    {config.show_points.then(|| view! {
                        <circle cx=x cy=y r=r fill=config.color stroke="#fff" stroke-width="1.5" />
                    })}
                    <circle
                        cx=x
                        cy=y
                        r=HIT_RADIUS
                        fill="transparent"
                        style="cursor: pointer;"
                        on:mouseenter=move |_| hovered.update(|h| h.enter(i))
                        on:mouseleave=move |_| hovered.update(|h| h.leave())
                    />
                </g>
            }
        })
        .collect_view();

    view! {
        <svg
            class="trend-chart-svg"
            width=width
            height=config.height
            viewBox=ChartDimensions::new(width, config.height).viewbox()
        >
            <ValueAxis ticks=geo.value_ticks left=projection.left() right=projection.right() />
            <CategoryAxis labels=geo.category_labels y=projection.bottom() />
            <path
                d=geo.line_path
                fill="none"
                stroke=config.color
                stroke-width="2"
                stroke-linejoin="round"
                stroke-linecap="round"
            />
            {average}
            {trend}
            {markers}
            {tooltip}
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(values: &[f64]) -> Vec<TrendLineData> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| TrendLineData::new(format!("W{}", i + 1), v))
            .collect()
    }

    #[test]
    fn test_exact_fit_on_linear_data() {
        let geo = trend_geometry(&data(&[2.0, 4.0, 6.0]), 400.0, &TrendLineConfig::default()).unwrap();
        assert_eq!(geo.regression.slope, 2.0);
        assert_eq!(geo.regression.intercept, 2.0);
        assert_eq!(geo.direction, TrendDirection::Increasing);

        // fitted segment runs through the first and last points
        let p = geo.projection;
        assert_eq!(geo.trend_segment, (p.point(0, 2.0), p.point(2, 6.0)));
        assert_eq!(geo.trend_segment.0, geo.points[0]);
        assert_eq!(geo.trend_segment.1, geo.points[2]);
    }

    #[test]
    fn test_moving_average_starts_at_window() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let config = TrendLineConfig::default().with_window(3);
        let geo = trend_geometry(&data(&values), 400.0, &config).unwrap();
        let p = geo.projection;

        let expected = line_path(&[p.point(2, 2.0), p.point(3, 3.0), p.point(4, 4.0)]);
        assert_eq!(geo.moving_average_path, Some(expected));
    }

    #[test]
    fn test_moving_average_needs_two_defined_slots() {
        let config = TrendLineConfig::default().with_window(3);
        let geo = trend_geometry(&data(&[1.0, 2.0, 3.0]), 400.0, &config).unwrap();
        assert_eq!(geo.moving_average_path, None);
    }

    #[test]
    fn test_domain_padding_keeps_points_inside_plot() {
        let geo = trend_geometry(&data(&[5.0, 1.0, 9.0, 3.0]), 400.0, &TrendLineConfig::default())
            .unwrap();
        let p = geo.projection;
        assert!(geo.points.iter().all(|&(_, y)| y > p.top() && y < p.bottom()));
    }

    #[test]
    fn test_flat_series_is_stable() {
        let geo = trend_geometry(&data(&[4.0, 4.0, 4.0]), 400.0, &TrendLineConfig::default()).unwrap();
        assert_eq!(geo.regression.slope, 0.0);
        assert_eq!(geo.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_single_point() {
        let geo = trend_geometry(&data(&[7.0]), 400.0, &TrendLineConfig::default()).unwrap();
        assert_eq!(geo.points.len(), 1);
        assert_eq!(geo.regression.intercept, 7.0);
    }

    #[test]
    fn test_empty_or_unmeasured() {
        let config = TrendLineConfig::default();
        assert!(trend_geometry(&[], 400.0, &config).is_none());
        assert!(trend_geometry(&data(&[1.0, 2.0]), 0.0, &config).is_none());
    }
}
