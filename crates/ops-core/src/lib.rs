//! # ops-core
//!
//! Core data model for the Facility Ops Dashboard charts.
//! Every type here is ephemeral: charts rebuild their geometry from these values
//! on each render pass.

pub mod color;
pub mod gauge;
pub mod matrix;
pub mod radar;
pub mod series;

pub use color::*;
pub use gauge::*;
pub use matrix::*;
pub use radar::*;
pub use series::*;

use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Data shape problems detected before rendering
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("series `{name}` has {actual} values but there are {expected} labels")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("no labels supplied")]
    NoLabels,
}

// ============================================================================
// STRATEGY PATTERN: Value Formatters
// ============================================================================

/// Strategy trait for axis and tooltip value formatting
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Compact formatter for large numbers (K, M, B suffixes)
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactNumberFormatter;

impl ValueFormatter for CompactNumberFormatter {
    fn format(&self, num: f64) -> String {
        let abs = num.abs();
        let sign = if num < 0.0 { "-" } else { "" };

        if abs >= 1_000_000_000.0 {
            format!("{}{:.1}B", sign, abs / 1_000_000_000.0)
        } else if abs >= 1_000_000.0 {
            format!("{}{:.1}M", sign, abs / 1_000_000.0)
        } else if abs >= 1_000.0 {
            format!("{}{:.1}K", sign, abs / 1_000.0)
        } else if abs.fract() == 0.0 {
            format!("{}{:.0}", sign, abs)
        } else {
            format!("{}{:.1}", sign, abs)
        }
    }
}

/// Percentage formatter (value already in 0..=100)
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentFormatter;

impl ValueFormatter for PercentFormatter {
    fn format(&self, value: f64) -> String {
        format!("{:.0}%", value)
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const PRIMARY: &str = "#3b82f6";
    pub const SUCCESS: &str = "#22c55e";
    pub const WARNING: &str = "#f59e0b";
    pub const DANGER: &str = "#ef4444";
    pub const MUTED: &str = "#9ca3af";
    pub const BG_TRACK: &str = "#e5e7eb";
    pub const BORDER: &str = "#d1d5db";
    pub const GRID: &str = "#f0f0f0";
    pub const TEXT_PRIMARY: &str = "#1f2937";
    pub const TEXT_MUTED: &str = "#6b7280";
    pub const TEXT_INVERSE: &str = "#ffffff";
    pub const TOOLTIP_BG: &str = "rgba(17, 24, 39, 0.9)";

    /// Heatmap defaults: light -> amber -> red
    pub const HEAT_MIN: &str = "#f0f9ff";
    pub const HEAT_MID: &str = "#fbbf24";
    pub const HEAT_MAX: &str = "#dc2626";

    /// Default palette cycled over series without an explicit color
    pub const PALETTE: [&str; 6] = [
        "#3b82f6", "#22c55e", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6",
    ];

    pub fn palette(index: usize) -> &'static str {
        PALETTE[index % PALETTE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_formatter() {
        let formatter = CompactNumberFormatter;
        assert_eq!(formatter.format(1_500_000.0), "1.5M");
        assert_eq!(formatter.format(2_500.0), "2.5K");
        assert_eq!(formatter.format(500.0), "500");
        assert_eq!(formatter.format(-12.5), "-12.5");
    }

    #[test]
    fn test_percent_formatter_rounds() {
        assert_eq!(PercentFormatter.format(25.0), "25%");
        assert_eq!(PercentFormatter.format(66.6), "67%");
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(colors::palette(0), colors::palette(colors::PALETTE.len()));
    }
}
