//! Area / line chart with optional stacking.
//!
//! Stacked layers are closed against the top edge of the layer beneath them and
//! drawn in reverse declaration order, so the topmost (last) series is painted
//! first and lower layers keep their outlines visible.

use crate::{
    ChartDimensions, ChartMargin,
    hover::{ActiveTarget, HIT_RADIUS, TooltipLayout},
    path::{area_path, baseline_points, line_path},
    responsive::use_container_width,
    scale::Projection,
    widgets::{CategoryAxis, ChartLegend, ChartTooltip, EmptyState, LegendItem, ValueAxis},
};
use leptos::html::Div;
use leptos::prelude::*;
use ops_core::{CompactNumberFormatter, Series, ValueFormatter, common_len, stack_series, value_bounds};

/// Area chart configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaChartConfig {
    pub height: f64,
    pub stacked: bool,
    pub show_points: bool,
    pub show_legend: bool,
    pub show_grid: bool,
    pub fill_opacity: f64,
    pub margin: ChartMargin,
}

impl Default for AreaChartConfig {
    fn default() -> Self {
        Self {
            height: 300.0,
            stacked: false,
            show_points: true,
            show_legend: true,
            show_grid: true,
            fill_opacity: 0.3,
            margin: ChartMargin::axes(),
        }
    }
}

impl AreaChartConfig {
    pub fn stacked() -> Self {
        Self {
            stacked: true,
            fill_opacity: 0.6,
            ..Self::default()
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }
}

/// One series projected into pixel space
#[derive(Debug, Clone, PartialEq)]
pub struct AreaLayer {
    /// Position in the caller's series list
    pub series_index: usize,
    pub name: String,
    pub color: String,
    /// Raw (unstacked) values, for tooltips
    pub values: Vec<f64>,
    /// Upper boundary, left to right
    pub top: Vec<(f64, f64)>,
    /// Lower boundary, left to right
    pub base: Vec<(f64, f64)>,
    pub line_path: String,
    pub area_path: String,
}

/// Everything the area chart draws for one width
#[derive(Debug, Clone, PartialEq)]
pub struct AreaGeometry {
    /// Layers in paint order
    pub layers: Vec<AreaLayer>,
    pub value_ticks: Vec<(f64, String)>,
    pub category_labels: Vec<(f64, String)>,
    pub labels: Vec<String>,
    pub projection: Projection,
}

/// Project `series` over shared `labels`.
///
/// Returns `None` for an unmeasured container or when there is nothing to plot.
/// Series longer or shorter than `labels` are cut to the common length.
pub fn area_geometry(
    series: &[Series],
    labels: &[String],
    width: f64,
    config: &AreaChartConfig,
) -> Option<AreaGeometry> {
    if width <= 0.0 {
        return None;
    }

    let count = common_len(series, labels);
    if series.is_empty() || count == 0 {
        return None;
    }
    if let Err(err) = ops_core::validate_series(series, labels) {
        tracing::warn!(%err, count, "area chart series truncated to common length");
    }

    let raw: Vec<Vec<f64>> = series.iter().map(|s| s.data[..count].to_vec()).collect();
    let plotted = if config.stacked {
        let truncated: Vec<Series> = series
            .iter()
            .zip(&raw)
            .map(|(s, data)| Series::new(s.name.clone(), data.clone(), s.color.clone()))
            .collect();
        stack_series(&truncated)
    } else {
        raw.clone()
    };

    let (lo, hi) = value_bounds(plotted.iter().flatten().cloned())?;
    let min_value = lo.min(0.0);
    let max_value = hi;

    let dims = ChartDimensions::new(width, config.height).with_margin(config.margin);
    let projection = Projection::new(&dims, min_value, max_value, count);
    let baseline = projection.baseline();

    let mut layers: Vec<AreaLayer> = Vec::with_capacity(series.len());
    for (k, (s, values)) in series.iter().zip(&plotted).enumerate() {
        let top: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| projection.point(i, v))
            .collect();

        let base = match layers.last() {
            Some(below) if config.stacked => below.top.clone(),
            _ => baseline_points(&top, baseline),
        };

        layers.push(AreaLayer {
            series_index: k,
            name: s.name.clone(),
            color: s.display_color(k),
            values: raw[k].clone(),
            line_path: line_path(&top),
            area_path: area_path(&top, &base),
            top,
            base,
        });
    }

    if config.stacked {
        layers.reverse();
    }

    tracing::debug!(layers = layers.len(), count, width, "area geometry computed");

    Some(AreaGeometry {
        value_ticks: projection.value_ticks(5),
        category_labels: projection.category_labels(labels, 60.0),
        labels: labels[..count].to_vec(),
        layers,
        projection,
    })
}

/// Area chart component
#[component]
pub fn AreaChart(
    #[prop(into)] series: Signal<Vec<Series>>,
    #[prop(into)] labels: Signal<Vec<String>>,
    #[prop(into)] title: String,
    #[prop(optional)] config: Option<AreaChartConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let container = NodeRef::<Div>::new();
    let width = use_container_width(container);
    let hovered = RwSignal::new(ActiveTarget::<(usize, usize)>::default());

    let geometry = Memo::new(move |_| {
        area_geometry(&series.get(), &labels.get(), width.get(), &config)
    });

    let legend = move || {
        config.show_legend.then(|| {
            let items: Vec<LegendItem> = series
                .get()
                .iter()
                .enumerate()
                .map(|(k, s)| LegendItem::new(s.name.clone(), s.display_color(k)))
                .collect();
            view! { <ChartLegend items=items /> }
        })
    };

    view! {
        <div class="chart-card area-chart">
            <h3 class="chart-title">{title}</h3>
            <div class="chart-body" node_ref=container style="width: 100%;">
                {move || {
                    let w = width.get();
                    (w > 0.0).then(|| match geometry.get() {
                        Some(geo) => render_area(geo, w, config, hovered).into_any(),
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

fn render_area(
    geo: AreaGeometry,
    width: f64,
    config: AreaChartConfig,
    hovered: RwSignal<ActiveTarget<(usize, usize)>>,
) -> impl IntoView {
    let projection = geo.projection;
    let height = config.height;

    // Tooltip content per (layer, point), looked up while hovering
    let layers_for_tooltip: Vec<(String, Vec<(f64, f64)>, Vec<f64>)> = geo
        .layers
        .iter()
        .map(|l| (l.name.clone(), l.top.clone(), l.values.clone()))
        .collect();
    let labels = geo.labels.clone();
    let formatter = CompactNumberFormatter;

    let tooltip = move || {
        let (layer, index) = *hovered.get().get()?;
        let (name, top, values) = layers_for_tooltip.get(layer)?;
        let &(x, y) = top.get(index)?;
        let lines = vec![
            labels.get(index).cloned().unwrap_or_default(),
            format!("{}: {}", name, formatter.format(*values.get(index)?)),
        ];
        Some(view! { <ChartTooltip layout=TooltipLayout::anchored(x, y, lines, width) /> })
    };

    let areas = geo
        .layers
        .iter()
        .map(|layer| {
            view! {
                <g class="area-layer">
                    <path
                        d=layer.area_path.clone()
                        fill=layer.color.clone()
                        fill-opacity=config.fill_opacity
                        stroke="none"
                    />
                    <path
                        d=layer.line_path.clone()
                        fill="none"
                        stroke=layer.color.clone()
                        stroke-width="2"
                        stroke-linejoin="round"
                        stroke-linecap="round"
                    />
                </g>
            }
        })
        .collect_view();

    let markers = geo
        .layers
        .iter()
        .enumerate()
        .flat_map(|(layer_idx, layer)| {
            let color = layer.color.clone();
            layer.top.iter().enumerate().map(move |(i, &(x, y))| {
                let target = (layer_idx, i);
                let visible_r = move || if hovered.get().is(&target) { 5.0 } else { 3.5 };
                view! {
                    <g class="area-point">
                        {config.show_points.then(|| view! {
                            <circle cx=x cy=y r=visible_r fill=color.clone() stroke="#fff" stroke-width="1.5" />
                        })}
                        <circle
                            cx=x
                            cy=y
                            r=HIT_RADIUS
                            fill="transparent"
                            style="cursor: pointer;"
                            on:mouseenter=move |_| hovered.update(|h| h.enter(target))
                            on:mouseleave=move |_| hovered.update(|h| h.leave())
                        />
                    </g>
                }
            })
        })
        .collect_view();

    view! {
        <svg
            class="area-chart-svg"
            width=width
            height=height
            viewBox=ChartDimensions::new(width, height).viewbox()
        >
            <ValueAxis
                ticks=geo.value_ticks
                left=projection.left()
                right=projection.right()
                show_grid=config.show_grid
            />
            <CategoryAxis labels=geo.category_labels y=projection.bottom() />
            {areas}
            {markers}
            {tooltip}
        </svg>
    }
}
