//! Radar (spider) chart.

use crate::{
    ChartDimensions,
    colors,
    hover::{ActiveTarget, HIT_RADIUS, TooltipLayout},
    path::{polar_point, polygon_path},
    responsive::use_container_width,
    widgets::{ChartTooltip, EmptyState},
};
use leptos::html::Div;
use leptos::prelude::*;
use ops_core::{CompactNumberFormatter, RadarChartData, ValueFormatter, radar_global_max};

/// Fewer axes than this cannot form a polygon
pub const MIN_RADAR_AXES: usize = 3;

/// Radar chart configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarConfig {
    pub height: f64,
    pub levels: usize,
    pub color: &'static str,
    pub fill_opacity: f64,
    /// Space kept around the outer ring for axis labels
    pub label_padding: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            height: 320.0,
            levels: 5,
            color: colors::PRIMARY,
            fill_opacity: 0.25,
            label_padding: 40.0,
        }
    }
}

impl RadarConfig {
    pub fn with_color(mut self, color: &'static str) -> Self {
        self.color = color;
        self
    }
}

/// Spoke from the centre to the outer ring
#[derive(Debug, Clone, PartialEq)]
pub struct RadarAxis {
    pub label: String,
    pub end: (f64, f64),
    pub label_pos: (f64, f64),
    pub anchor: &'static str,
}

/// Plotted data vertex
#[derive(Debug, Clone, PartialEq)]
pub struct RadarPoint {
    pub label: String,
    pub value: f64,
    pub max: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarGeometry {
    pub center: (f64, f64),
    pub radius: f64,
    pub axes: Vec<RadarAxis>,
    /// Concentric grid polygons, innermost first
    pub grid: Vec<String>,
    pub polygon: String,
    pub points: Vec<RadarPoint>,
}

/// Angle of axis `index` of `count`, starting at the top and running clockwise
pub fn radar_angle(index: usize, count: usize) -> f64 {
    -90.0 + index as f64 * 360.0 / count.max(1) as f64
}

fn text_anchor(angle_deg: f64) -> &'static str {
    let cos = angle_deg.to_radians().cos();
    if cos > 0.1 {
        "start"
    } else if cos < -0.1 {
        "end"
    } else {
        "middle"
    }
}

pub fn radar_geometry(data: &[RadarChartData], width: f64, config: &RadarConfig) -> Option<RadarGeometry> {
    if width <= 0.0 || data.len() < MIN_RADAR_AXES {
        return None;
    }

    let n = data.len();
    let center = (width / 2.0, config.height / 2.0);
    let radius = (width.min(config.height) / 2.0 - config.label_padding).max(1.0);
    let global_max = radar_global_max(data);
    let levels = config.levels.max(1);

    let ring = |fraction: f64| -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| polar_point(center.0, center.1, radius * fraction, radar_angle(i, n)))
            .collect()
    };

    let grid = (1..=levels)
        .map(|level| polygon_path(&ring(level as f64 / levels as f64)))
        .collect();

    let axes = data
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let angle = radar_angle(i, n);
            RadarAxis {
                label: d.label.clone(),
                end: polar_point(center.0, center.1, radius, angle),
                label_pos: polar_point(center.0, center.1, radius + 14.0, angle),
                anchor: text_anchor(angle),
            }
        })
        .collect();

    let points: Vec<RadarPoint> = data
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let max = d.effective_max(global_max);
            let (x, y) = polar_point(center.0, center.1, d.value / max * radius, radar_angle(i, n));
            RadarPoint {
                label: d.label.clone(),
                value: d.value,
                max,
                x,
                y,
            }
        })
        .collect();

    let vertices: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();

    Some(RadarGeometry {
        center,
        radius,
        axes,
        grid,
        polygon: polygon_path(&vertices),
        points,
    })
}

/// Radar chart component
#[component]
pub fn RadarChart(
    #[prop(into)] data: Signal<Vec<RadarChartData>>,
    #[prop(into)] title: String,
    #[prop(optional)] config: Option<RadarConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let container = NodeRef::<Div>::new();
    let width = use_container_width(container);
    let hovered = RwSignal::new(ActiveTarget::<usize>::default());

    let geometry = Memo::new(move |_| radar_geometry(&data.get(), width.get(), &config));

    view! {
        <div class="chart-card radar-chart">
            <h3 class="chart-title">{title}</h3>
            <div class="chart-body" node_ref=container style="width: 100%;">
                {move || {
                    let w = width.get();
                    (w > 0.0).then(|| match geometry.get() {
                        Some(geo) => render_radar(geo, w, config, hovered).into_any(),
                        None => view! {
                            <EmptyState message="At least 3 data points are required" height=config.height />
                        }
                        .into_any(),
                    })
                }}
            </div>
        </div>
    }
}

fn render_radar(
    geo: RadarGeometry,
    width: f64,
    config: RadarConfig,
    hovered: RwSignal<ActiveTarget<usize>>,
) -> impl IntoView {
    let (cx, cy) = geo.center;
    let formatter = CompactNumberFormatter;
    let tooltip_points = geo.points.clone();

    let tooltip = move || {
        let index = *hovered.get().get()?;
        let p = tooltip_points.get(index)?;
        let lines = vec![
            p.label.clone(),
            format!("{} / {}", formatter.format(p.value), formatter.format(p.max)),
        ];
        Some(view! { <ChartTooltip layout=TooltipLayout::anchored(p.x, p.y, lines, width) /> })
    };

    let grid = geo
        .grid
        .into_iter()
        .map(|d| view! { <path d=d fill="none" stroke=colors::BORDER stroke-width="1" /> })
        .collect_view();

    let axes = geo
        .axes
        .into_iter()
        .map(|axis| {
            view! {
                <g class="radar-axis">
                    <line x1=cx y1=cy x2=axis.end.0 y2=axis.end.1 stroke=colors::BORDER stroke-width="1" />
                    <text
                        x=axis.label_pos.0
                        y=axis.label_pos.1
                        dy="0.35em"
                        text-anchor=axis.anchor
                        font-size="11"
                        fill=colors::TEXT_MUTED
                    >
                        {axis.label}
                    </text>
                </g>
            }
        })
        .collect_view();

    let markers = geo
        .points
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let r = move || if hovered.get().is(&i) { 5.5 } else { 4.0 };
            view! {
                <g class="radar-point">
                    <circle cx=p.x cy=p.y r=r fill=config.color stroke="#fff" stroke-width="1.5" />
                    <circle
                        cx=p.x
                        cy=p.y
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
            class="radar-svg"
            width=width
            height=config.height
            viewBox=ChartDimensions::new(width, config.height).viewbox()
        >
            {grid}
            {axes}
            <path
                d=geo.polygon
                fill=config.color
                fill-opacity=config.fill_opacity
                stroke=config.color
                stroke-width="2"
            />
            {markers}
            {tooltip}
        </svg>
    }
}
