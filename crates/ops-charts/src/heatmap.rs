//! Heatmap grid with three-stop color scale.

use crate::{
    ChartDimensions, ChartMargin,
    color::{ColorScale, label_color},
    colors,
    hover::{ActiveTarget, TooltipLayout},
    responsive::use_container_width,
    widgets::{ChartTooltip, EmptyState},
};
use leptos::html::Div;
use leptos::prelude::*;
use ops_core::{CompactNumberFormatter, HeatmapCell, HeatmapData, ValueFormatter};

/// Inline value text needs a cell wider than this
pub const MIN_LABEL_CELL_WIDTH: f64 = 30.0;
/// Inline value text needs a cell taller than this
pub const MIN_LABEL_CELL_HEIGHT: f64 = 20.0;

/// Heatmap configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapConfig {
    pub height: f64,
    pub colors: ColorScale,
    pub show_values: bool,
    pub show_legend: bool,
    pub cell_gap: f64,
    pub margin: ChartMargin,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            height: 320.0,
            colors: ColorScale::default(),
            show_values: true,
            show_legend: true,
            cell_gap: 2.0,
            margin: ChartMargin::grid(),
        }
    }
}

impl HeatmapConfig {
    pub fn with_colors(mut self, colors: ColorScale) -> Self {
        self.colors = colors;
        self
    }
}

/// One grid rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCellGeometry {
    pub row: usize,
    pub col: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
    pub fill: String,
    pub text_color: &'static str,
    pub show_label: bool,
}

impl HeatmapCellGeometry {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Full heatmap drawing for one width
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGeometry {
    /// Row-major, `rows * cols` entries
    pub cells: Vec<HeatmapCellGeometry>,
    pub row_labels: Vec<(f64, String)>,
    pub col_labels: Vec<(f64, String)>,
    pub min: f64,
    pub max: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub plot_bottom: f64,
}

/// Whether a cell is large enough to carry its value inline
pub fn cell_fits_label(width: f64, height: f64) -> bool {
    width > MIN_LABEL_CELL_WIDTH && height > MIN_LABEL_CELL_HEIGHT
}

/// Lay out a `row_labels x col_labels` grid; cells missing from `cells` are 0
pub fn heatmap_geometry(
    cells: &[HeatmapCell],
    row_labels: &[String],
    col_labels: &[String],
    width: f64,
    config: &HeatmapConfig,
) -> Option<HeatmapGeometry> {
    let (rows, cols) = (row_labels.len(), col_labels.len());
    if width <= 0.0 || rows == 0 || cols == 0 {
        return None;
    }

    let outside = cells.iter().filter(|c| c.row >= rows || c.col >= cols).count();
    if outside > 0 {
        tracing::warn!(outside, rows, cols, "heatmap cells outside the grid ignored");
    }
    let in_grid: Vec<HeatmapCell> = cells
        .iter()
        .filter(|c| c.row < rows && c.col < cols)
        .copied()
        .collect();
    let data = HeatmapData::new(&in_grid);
    let (min, max) = data.bounds();

    let dims = ChartDimensions::new(width, config.height).with_margin(config.margin);
    let cell_width = dims.inner_width() / cols as f64;
    let cell_height = dims.inner_height() / rows as f64;
    let show_label = config.show_values && cell_fits_label(cell_width, cell_height);
    let gap = config.cell_gap.min(cell_width / 2.0).min(cell_height / 2.0);

    let mut geometry_cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let value = data.value(row, col);
            geometry_cells.push(HeatmapCellGeometry {
                row,
                col,
                x: dims.margin.left + col as f64 * cell_width + gap / 2.0,
                y: dims.margin.top + row as f64 * cell_height + gap / 2.0,
                width: (cell_width - gap).max(0.0),
                height: (cell_height - gap).max(0.0),
                value,
                fill: config.colors.color_for(value, min, max).to_hex(),
                text_color: label_color(value, min, max),
                show_label,
            });
        }
    }

    let row_labels = row_labels
        .iter()
        .enumerate()
        .map(|(r, label)| (dims.margin.top + (r as f64 + 0.5) * cell_height, label.clone()))
        .collect();
    let col_labels = col_labels
        .iter()
        .enumerate()
        .map(|(c, label)| (dims.margin.left + (c as f64 + 0.5) * cell_width, label.clone()))
        .collect();

    Some(HeatmapGeometry {
        cells: geometry_cells,
        row_labels,
        col_labels,
        min,
        max,
        cell_width,
        cell_height,
        plot_bottom: dims.margin.top + dims.inner_height(),
    })
}

/// Heatmap component
#[component]
pub fn HeatmapChart(
    #[prop(into)] cells: Signal<Vec<HeatmapCell>>,
    #[prop(into)] row_labels: Signal<Vec<String>>,
    #[prop(into)] col_labels: Signal<Vec<String>>,
    #[prop(into)] title: String,
    #[prop(optional)] config: Option<HeatmapConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let container = NodeRef::<Div>::new();
    let width = use_container_width(container);
    let hovered = RwSignal::new(ActiveTarget::<(usize, usize)>::default());

    let geometry = Memo::new(move |_| {
        heatmap_geometry(&cells.get(), &row_labels.get(), &col_labels.get(), width.get(), &config)
    });

    view! {
        <div class="chart-card heatmap-chart">
            <h3 class="chart-title">{title}</h3>
            <div class="chart-body" node_ref=container style="width: 100%;">
                {move || {
                    let w = width.get();
                    (w > 0.0).then(|| match geometry.get() {
                        Some(geo) => view! {
                            {render_heatmap(geo.clone(), w, config, hovered, row_labels.get(), col_labels.get())}
                            {config.show_legend.then(|| view! {
                                <HeatmapLegend colors=config.colors min=geo.min max=geo.max />
                            })}
                        }
                        .into_any(),
                        None => view! {
                            <EmptyState message="No data available" height=config.height />
                        }
                        .into_any(),
                    })
                }}
            </div>
        </div>
    }
}

fn render_heatmap(
    geo: HeatmapGeometry,
    width: f64,
    config: HeatmapConfig,
    hovered: RwSignal<ActiveTarget<(usize, usize)>>,
    row_names: Vec<String>,
    col_names: Vec<String>,
) -> impl IntoView {
    let formatter = CompactNumberFormatter;
    let lookup: Vec<((f64, f64), f64)> = geo.cells.iter().map(|c| (c.center(), c.value)).collect();
    let cols = geo.col_labels.len();

    // Cells with inline labels don't need a tooltip
    let tooltip = move || {
        let (row, col) = *hovered.get().get()?;
        let &((x, y), value) = lookup.get(row * cols + col)?;
        let lines = vec![
            format!(
                "{} · {}",
                row_names.get(row).cloned().unwrap_or_default(),
                col_names.get(col).cloned().unwrap_or_default()
            ),
            format!("Value: {}", formatter.format(value)),
        ];
        Some(view! { <ChartTooltip layout=TooltipLayout::anchored(x, y, lines, width) /> })
    };

    let rects = geo
        .cells
        .into_iter()
        .map(|cell| {
            let target = (cell.row, cell.col);
            let (cx, cy) = cell.center();
            let show_label = cell.show_label;
            let stroke = move || if hovered.get().is(&target) { colors::TEXT_PRIMARY } else { "none" };
            view! {
                <g class="heatmap-cell">
                    <rect
                        x=cell.x
                        y=cell.y
                        width=cell.width
                        height=cell.height
                        rx="2"
                        fill=cell.fill
                        stroke=stroke
                        stroke-width="1.5"
                        style="cursor: pointer;"
                        on:mouseenter=move |_| {
                            if !show_label {
                                hovered.update(|h| h.enter(target));
                            }
                        }
                        on:mouseleave=move |_| hovered.update(|h| h.leave())
                    />
                    {show_label.then(|| view! {
                        <text
                            x=cx
                            y=cy
                            dy="0.35em"
                            text-anchor="middle"
                            font-size="11"
                            fill=cell.text_color
                            pointer-events="none"
                        >
                            {formatter.format(cell.value)}
                        </text>
                    })}
                </g>
            }
        })
        .collect_view();

    let label_x = config.margin.left - 8.0;
    let row_axis = geo
        .row_labels
        .into_iter()
        .map(|(y, label)| {
            view! {
                <text x=label_x y=y dy="0.35em" text-anchor="end" font-size="11" fill=colors::TEXT_MUTED>
                    {label}
                </text>
            }
        })
        .collect_view();

    let col_y = geo.plot_bottom + 18.0;
    let col_axis = geo
        .col_labels
        .into_iter()
        .map(|(x, label)| {
            view! {
                <text x=x y=col_y text-anchor="middle" font-size="11" fill=colors::TEXT_MUTED>
                    {label}
                </text>
            }
        })
        .collect_view();

    view! {
        <svg
            class="heatmap-svg"
            width=width
            height=config.height
            viewBox=ChartDimensions::new(width, config.height).viewbox()
        >
            {rects}
            {row_axis}
            {col_axis}
            {tooltip}
        </svg>
    }
}

/// Gradient bar with the data range underneath
#[component]
fn HeatmapLegend(colors: ColorScale, min: f64, max: f64) -> impl IntoView {
    let formatter = CompactNumberFormatter;
    let gradient = colors
        .gradient_stops(5)
        .into_iter()
        .map(|(offset, hex)| format!("{} {:.0}%", hex, offset))
        .collect::<Vec<_>>()
        .join(", ");

    view! {
        <div class="heatmap-legend" style="display: flex; align-items: center; gap: 8px; justify-content: center; margin-top: 8px; font-size: 11px;">
            <span>{formatter.format(min)}</span>
            <span style=format!(
                "width: 160px; height: 10px; border-radius: 5px; background: linear-gradient(to right, {});",
                gradient,
            ) />
            <span>{formatter.format(max)}</span>
        </div>
    }
}
