//! Gauge percentage and threshold bands

use crate::colors;
use serde::{Deserialize, Serialize};

/// Percentage cutoffs for the gauge color bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeThresholds {
    pub warning: f64,
    pub danger: f64,
}

impl Default for GaugeThresholds {
    fn default() -> Self {
        Self {
            warning: 70.0,
            danger: 90.0,
        }
    }
}

impl GaugeThresholds {
    pub fn new(warning: f64, danger: f64) -> Self {
        Self { warning, danger }
    }

    /// Band for a percentage in 0..=100
    pub fn band(&self, percentage: f64) -> GaugeBand {
        if percentage >= self.danger {
            GaugeBand::Danger
        } else if percentage >= self.warning {
            GaugeBand::Warning
        } else {
            GaugeBand::Normal
        }
    }
}

/// Discrete gauge color band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeBand {
    Normal,
    Warning,
    Danger,
}

impl GaugeBand {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Normal => colors::SUCCESS,
            Self::Warning => colors::WARNING,
            Self::Danger => colors::DANGER,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Warning => "Warning",
            Self::Danger => "Critical",
        }
    }
}

/// `value / max` as a percentage clamped to 0..=100.
/// A non-positive `max` is treated as 1; negative values read as 0%.
pub fn gauge_percentage(value: f64, max: f64) -> f64 {
    let max = if max > 0.0 { max } else { 1.0 };
    let pct = value / max * 100.0;
    if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 100.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(gauge_percentage(50.0, 200.0), 25.0);
        assert_eq!(gauge_percentage(300.0, 200.0), 100.0);
        assert_eq!(gauge_percentage(-5.0, 200.0), 0.0);
        assert_eq!(gauge_percentage(0.5, 0.0), 50.0);
        assert_eq!(gauge_percentage(f64::NAN, 10.0), 0.0);
    }

    #[test]
    fn test_bands() {
        let t = GaugeThresholds::default();
        assert_eq!(t.band(10.0), GaugeBand::Normal);
        assert_eq!(t.band(70.0), GaugeBand::Warning);
        assert_eq!(t.band(95.0), GaugeBand::Danger);
        assert_eq!(GaugeBand::Danger.color(), colors::DANGER);
    }
}
