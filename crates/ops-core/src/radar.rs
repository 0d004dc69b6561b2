//! Radar (spider) chart axes

use serde::{Deserialize, Serialize};

/// One radar axis with its observed value and optional axis maximum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarChartData {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

impl RadarChartData {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            max_value: None,
        }
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    /// Axis maximum, falling back to the shared maximum
    pub fn effective_max(&self, global_max: f64) -> f64 {
        match self.max_value {
            Some(max) if max > 0.0 => max,
            _ => global_max,
        }
    }
}

/// Shared maximum: `max(max_value-or-value over all axes, 1)`
pub fn radar_global_max(data: &[RadarChartData]) -> f64 {
    data.iter()
        .map(|d| d.max_value.unwrap_or(d.value))
        .fold(1.0, f64::max)
}
