//! # ops-charts
//!
//! Hand-rolled SVG charts built with Leptos for the Facility Ops Dashboard.
//! Geometry is computed by pure functions and rendered by thin components, so
//! every chart recomputes its layout from props and container width on each pass.
//!
//! ## Modules
//!
//! - `scale` - Index/value projection and tick generation
//! - `path` - SVG path builders (line, closed area, arc, polygon)
//! - `stats` - Linear regression and trailing moving average
//! - `color` - Three-stop heatmap color scale
//! - `hover` - Active hover target and tooltip placement
//! - `responsive` - Container width observation
//! - `area`, `gauge`, `heatmap`, `radar`, `trend` - Chart components

pub mod area;
pub mod color;
pub mod gauge;
pub mod heatmap;
pub mod hover;
pub mod path;
pub mod radar;
pub mod responsive;
pub mod scale;
pub mod stats;
pub mod trend;
pub mod widgets;

pub use area::*;
pub use color::*;
pub use gauge::*;
pub use heatmap::*;
pub use hover::*;
pub use path::*;
pub use radar::*;
pub use responsive::*;
pub use scale::*;
pub use stats::*;
pub use trend::*;
pub use widgets::*;

// Re-export colors from ops-core for convenience
pub use ops_core::colors;

/// Chart padding around the plotting area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Room for a left value axis and bottom category labels
    pub const fn axes() -> Self {
        Self::new(20.0, 20.0, 40.0, 50.0)
    }

    /// Room for row labels on the left and column labels below
    pub const fn grid() -> Self {
        Self::new(10.0, 10.0, 30.0, 80.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::axes()
    }
}

/// Measured drawing surface with its margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}
