//! Half-circle gauge with threshold color bands.

use crate::{
    ChartDimensions,
    colors,
    path::{arc_path, polar_point},
    responsive::use_container_width,
};
use leptos::html::Div;
use leptos::prelude::*;
use ops_core::{GaugeBand, GaugeThresholds, PercentFormatter, ValueFormatter, gauge_percentage};

/// Arc start: the left end of the half circle
pub const GAUGE_START_DEG: f64 = 180.0;
/// Degrees swept per percentage point
pub const GAUGE_DEG_PER_PERCENT: f64 = 1.8;

/// Gauge configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeConfig {
    pub height: f64,
    pub thresholds: GaugeThresholds,
    pub stroke_width: f64,
    pub unit: &'static str,
    pub show_range_labels: bool,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            height: 200.0,
            thresholds: GaugeThresholds::default(),
            stroke_width: 20.0,
            unit: "",
            show_range_labels: true,
        }
    }
}

impl GaugeConfig {
    pub fn with_thresholds(mut self, warning: f64, danger: f64) -> Self {
        self.thresholds = GaugeThresholds::new(warning, danger);
        self
    }

    pub fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }
}

/// Gauge drawing for one width
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeGeometry {
    pub percentage: f64,
    pub band: GaugeBand,
    pub center: (f64, f64),
    pub radius: f64,
    pub background_arc: String,
    /// `None` at 0%
    pub value_arc: Option<String>,
    pub end_angle: f64,
    pub min_label: (f64, f64),
    pub max_label: (f64, f64),
}

/// Foreground arc angles for a percentage: `(180, 180 + p * 1.8)`
pub fn gauge_angles(percentage: f64) -> (f64, f64) {
    let p = percentage.clamp(0.0, 100.0);
    (GAUGE_START_DEG, GAUGE_START_DEG + p * GAUGE_DEG_PER_PERCENT)
}

pub fn gauge_geometry(value: f64, max: f64, width: f64, config: &GaugeConfig) -> Option<GaugeGeometry> {
    if width <= 0.0 {
        return None;
    }
    if value < 0.0 {
        tracing::debug!(value, "negative gauge value rendered as 0%");
    }

    let percentage = gauge_percentage(value, max);
    let band = config.thresholds.band(percentage);

    // leave room below the centre for the value readout
    let half_stroke = config.stroke_width / 2.0;
    let radius = ((width / 2.0).min(config.height - 50.0) - half_stroke - 4.0).max(1.0);
    let center = (width / 2.0, radius + half_stroke + 4.0);

    let background_arc = arc_path(center.0, center.1, radius, GAUGE_START_DEG, 360.0);
    let (start, end_angle) = gauge_angles(percentage);
    let value_arc = (percentage > 0.0).then(|| arc_path(center.0, center.1, radius, start, end_angle));

    let min_label = polar_point(center.0, center.1 + 16.0, radius, 180.0);
    let max_label = polar_point(center.0, center.1 + 16.0, radius, 0.0);

    Some(GaugeGeometry {
        percentage,
        band,
        center,
        radius,
        background_arc,
        value_arc,
        end_angle,
        min_label,
        max_label,
    })
}

/// Gauge component
#[component]
pub fn GaugeChart(
    #[prop(into)] value: Signal<f64>,
    #[prop(into)] max: Signal<f64>,
    #[prop(into)] title: String,
    #[prop(optional)] config: Option<GaugeConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let container = NodeRef::<Div>::new();
    let width = use_container_width(container);

    let geometry = Memo::new(move |_| gauge_geometry(value.get(), max.get(), width.get(), &config));

    view! {
        <div class="chart-card gauge-chart">
            <h3 class="chart-title">{title}</h3>
            <div class="chart-body" node_ref=container style="width: 100%;">
                {move || {
                    geometry.get().map(|geo| {
                        let w = width.get();
                        let (cx, cy) = geo.center;
                        let readout = format!("{}{}", trim_number(value.get()), config.unit);
                        view! {
                            <svg
                                class="gauge-svg"
                                width=w
                                height=config.height
                                viewBox=ChartDimensions::new(w, config.height).viewbox()
                            >
                                <path
                                    d=geo.background_arc
                                    fill="none"
                                    stroke=colors::BG_TRACK
                                    stroke-width=config.stroke_width
                                    stroke-linecap="round"
                                />
                                {geo.value_arc.map(|d| view! {
                                    <path
                                        d=d
                                        fill="none"
                                        stroke=geo.band.color()
                                        stroke-width=config.stroke_width
                                        stroke-linecap="round"
                                    />
                                })}
                                <text
                                    x=cx
                                    y=cy - 8.0
                                    text-anchor="middle"
                                    font-size="28"
                                    font-weight="700"
                                    fill=colors::TEXT_PRIMARY
                                >
                                    {PercentFormatter.format(geo.percentage)}
                                </text>
                                <text
                                    x=cx
                                    y=cy + 18.0
                                    text-anchor="middle"
                                    font-size="13"
                                    fill=geo.band.color()
                                >
                                    {format!("{} · {}", readout, geo.band.label())}
                                </text>
                                {config.show_range_labels.then(|| view! {
                                    <text
                                        x=geo.min_label.0
                                        y=geo.min_label.1
                                        text-anchor="middle"
                                        font-size="11"
                                        fill=colors::TEXT_MUTED
                                    >
                                        "0"
                                    </text>
                                    <text
                                        x=geo.max_label.0
                                        y=geo.max_label.1
                                        text-anchor="middle"
                                        font-size="11"
                                        fill=colors::TEXT_MUTED
                                    >
                                        {trim_number(max.get())}
                                    </text>
                                })}
                            </svg>
                        }
                    })
                }}
            </div>
        </div>
    }
}

/// Integers without decimals, everything else with one
fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GaugeConfig {
        GaugeConfig::default()
    }

    #[test]
    fn test_quarter_gauge_spans_180_to_225() {
        let geo = gauge_geometry(50.0, 200.0, 300.0, &config()).unwrap();
        assert_eq!(geo.percentage, 25.0);
        assert_eq!(gauge_angles(geo.percentage), (180.0, 225.0));
        assert_eq!(geo.end_angle, 225.0);

        let (cx, cy) = geo.center;
        let expected = arc_path(cx, cy, geo.radius, 180.0, 225.0);
        assert_eq!(geo.value_arc.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn test_zero_percent_has_no_foreground_arc() {
        let geo = gauge_geometry(0.0, 100.0, 300.0, &config()).unwrap();
        assert_eq!(geo.value_arc, None);
        assert!(!geo.background_arc.is_empty());
    }

    #[test]
    fn test_full_gauge_sweeps_half_circle() {
        let geo = gauge_geometry(100.0, 100.0, 300.0, &config()).unwrap();
        assert_eq!(geo.end_angle, 360.0);
        assert_eq!(geo.value_arc.as_deref(), Some(geo.background_arc.as_str()));
    }

    #[test]
    fn test_over_max_clamps_to_full() {
        let geo = gauge_geometry(500.0, 100.0, 300.0, &config()).unwrap();
        assert_eq!(geo.percentage, 100.0);
        assert_eq!(geo.end_angle, 360.0);
        assert_eq!(geo.band, GaugeBand::Danger);
    }

    #[test]
    fn test_negative_value_reads_as_zero() {
        let geo = gauge_geometry(-20.0, 100.0, 300.0, &config()).unwrap();
        assert_eq!(geo.percentage, 0.0);
        assert_eq!(geo.value_arc, None);
        assert_eq!(geo.band, GaugeBand::Normal);
    }

    #[test]
    fn test_threshold_bands() {
        let cfg = config().with_thresholds(50.0, 80.0);
        assert_eq!(gauge_geometry(40.0, 100.0, 300.0, &cfg).unwrap().band, GaugeBand::Normal);
        assert_eq!(gauge_geometry(60.0, 100.0, 300.0, &cfg).unwrap().band, GaugeBand::Warning);
        assert_eq!(gauge_geometry(85.0, 100.0, 300.0, &cfg).unwrap().band, GaugeBand::Danger);
    }

    #[test]
    fn test_unmeasured_width() {
        assert!(gauge_geometry(10.0, 100.0, 0.0, &config()).is_none());
    }

    #[test]
    fn test_trim_number() {
        assert_eq!(trim_number(42.0), "42");
        assert_eq!(trim_number(42.3), "42.3");
    }
}
