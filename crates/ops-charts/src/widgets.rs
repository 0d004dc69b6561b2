//! Shared chart pieces: empty state, legend, tooltip and axes.

use crate::{colors, hover::TooltipLayout};
use leptos::prelude::*;

/// Placeholder shown when a chart has nothing (or too little) to draw
#[component]
pub fn EmptyState(
    #[prop(into)] message: String,
    #[prop(default = 200.0)] height: f64,
) -> impl IntoView {
    view! {
        <div
            class="chart-empty"
            style=format!(
                "height: {}px; display: flex; align-items: center; justify-content: center; color: {};",
                height,
                colors::TEXT_MUTED,
            )
        >
            <span>{message}</span>
        </div>
    }
}

/// Legend entry
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub color: String,
}

impl LegendItem {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Horizontal legend row rendered below a chart
#[component]
pub fn ChartLegend(items: Vec<LegendItem>) -> impl IntoView {
    view! {
        <div class="chart-legend" style="display: flex; flex-wrap: wrap; gap: 12px; justify-content: center; margin-top: 8px;">
            {items.into_iter().map(|item| {
                view! {
                    <div class="legend-item" style="display: flex; align-items: center; gap: 6px;">
                        <span
                            class="legend-swatch"
                            style=format!(
                                "width: 12px; height: 12px; border-radius: 2px; background-color: {};",
                                item.color,
                            )
                        />
                        <span class="legend-label" style=format!("font-size: 12px; color: {};", colors::TEXT_MUTED)>
                            {item.label}
                        </span>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

/// Dark rounded tooltip box drawn inside an SVG
#[component]
pub fn ChartTooltip(layout: TooltipLayout) -> impl IntoView {
    let text_x = layout.text_x();
    let lines: Vec<(f64, String)> = layout
        .line_positions()
        .map(|(y, line)| (y, line.to_string()))
        .collect();

    view! {
        <g class="chart-tooltip" pointer-events="none">
            <rect
                x=layout.x
                y=layout.y
                width=layout.width
                height=layout.height
                rx="6"
                fill=colors::TOOLTIP_BG
            />
            {lines.into_iter().enumerate().map(|(i, (y, line))| {
                let weight = if i == 0 { "600" } else { "400" };
                view! {
                    <text
                        x=text_x
                        y=y
                        fill=colors::TEXT_INVERSE
                        font-size="12"
                        font-weight=weight
                    >
                        {line}
                    </text>
                }
            }).collect_view()}
        </g>
    }
}

/// Left value axis with horizontal grid lines
#[component]
pub fn ValueAxis(
    ticks: Vec<(f64, String)>,
    left: f64,
    right: f64,
    #[prop(default = true)] show_grid: bool,
) -> impl IntoView {
    view! {
        <g class="value-axis">
            {ticks.into_iter().map(|(y, label)| {
                view! {
                    <g>
                        {show_grid.then(|| view! {
                            <line
                                x1=left y1=y
                                x2=right y2=y
                                stroke=colors::GRID
                                stroke-width="1"
                            />
                        })}
                        <text
                            x=left - 8.0
                            y=y
                            dy="0.32em"
                            text-anchor="end"
                            fill=colors::TEXT_MUTED
                            font-size="11"
                        >
                            {label}
                        </text>
                    </g>
                }
            }).collect_view()}
        </g>
    }
}

/// Bottom category axis
#[component]
pub fn CategoryAxis(labels: Vec<(f64, String)>, y: f64) -> impl IntoView {
    view! {
        <g class="category-axis">
            {labels.into_iter().map(|(x, label)| {
                view! {
                    <text
                        x=x
                        y=y + 20.0
                        text-anchor="middle"
                        fill=colors::TEXT_MUTED
                        font-size="11"
                    >
                        {label}
                    </text>
                }
            }).collect_view()}
        </g>
    }
}
