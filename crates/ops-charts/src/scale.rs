//! Scales: map data domains onto pixel ranges.

use crate::ChartDimensions;
use ops_core::{CompactNumberFormatter, ValueFormatter};

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Continuous linear scale. A zero-width domain maps everything to the middle
/// of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    /// "Nice" tick values inside the domain (steps of 1, 2 or 5 times a power of ten)
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        let span = max - min;

        if span <= 0.0 || !span.is_finite() || count == 0 {
            return vec![min];
        }

        let rough_step = span / count as f64;
        let magnitude = 10.0_f64.powf(rough_step.log10().floor());
        let nice_step = match rough_step / magnitude {
            r if r <= 1.0 => magnitude,
            r if r <= 2.0 => 2.0 * magnitude,
            r if r <= 5.0 => 5.0 * magnitude,
            _ => 10.0 * magnitude,
        };

        let first = (min / nice_step).ceil() as i64;
        let last = (max / nice_step).floor() as i64;

        (first..=last).map(|k| k as f64 * nice_step).collect()
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        r_min + (value - d_min) / (d_max - d_min) * (r_max - r_min)
    }
}

// ============================================================================
// CATEGORY PROJECTION
// ============================================================================

/// Index-on-x, value-on-y projection for category charts.
///
/// `x(i)` spreads `count` categories evenly across the inner width (a single
/// category sits on the left edge). `y(v)` is linear with the minimum at the
/// bottom over a value range floored to 1; when every value is equal the whole
/// series sits at mid-height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    left: f64,
    top: f64,
    inner_width: f64,
    inner_height: f64,
    count: usize,
    value_scale: LinearScale,
}

impl Projection {
    pub fn new(dims: &ChartDimensions, min_value: f64, max_value: f64, count: usize) -> Self {
        let top = dims.margin.top;
        let inner_height = dims.inner_height();
        let span = max_value - min_value;
        let domain_max = if span.abs() < f64::EPSILON {
            max_value
        } else {
            min_value + span.max(1.0)
        };
        Self {
            left: dims.margin.left,
            top,
            inner_width: dims.inner_width(),
            inner_height,
            count,
            value_scale: LinearScale::new()
                .domain(min_value, domain_max)
                .range(top + inner_height, top),
        }
    }

    pub fn x(&self, index: usize) -> f64 {
        let steps = self.count.saturating_sub(1).max(1) as f64;
        self.left + (index as f64 / steps) * self.inner_width
    }

    pub fn y(&self, value: f64) -> f64 {
        self.value_scale.scale(value)
    }

    pub fn point(&self, index: usize, value: f64) -> (f64, f64) {
        (self.x(index), self.y(value))
    }

    /// `y(min_value)`
    pub fn baseline(&self) -> f64 {
        self.y(self.value_scale.domain_bounds().0)
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.left + self.inner_width
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.inner_height
    }

    pub fn inner_width(&self) -> f64 {
        self.inner_width
    }

    /// Value-axis ticks as `(y, label)` pairs
    pub fn value_ticks(&self, count: usize) -> Vec<(f64, String)> {
        let formatter = CompactNumberFormatter;
        self.value_scale
            .nice_ticks(count)
            .into_iter()
            .map(|v| (self.y(v), formatter.format(v)))
            .collect()
    }

    /// Category labels as `(x, label)` pairs, thinned so neighbours keep
    /// at least `min_spacing` pixels between them
    pub fn category_labels(&self, labels: &[String], min_spacing: f64) -> Vec<(f64, String)> {
        let stride = label_stride(self.count.min(labels.len()), self.inner_width, min_spacing);
        labels
            .iter()
            .take(self.count)
            .enumerate()
            .filter(|(i, _)| i % stride == 0)
            .map(|(i, label)| (self.x(i), label.clone()))
            .collect()
    }
}

/// Show every `stride`-th label so at most `width / min_spacing` are drawn
pub fn label_stride(count: usize, width: f64, min_spacing: f64) -> usize {
    if count == 0 || min_spacing <= 0.0 {
        return 1;
    }
    let fits = (width / min_spacing).floor().max(1.0) as usize;
    count.div_ceil(fits).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartMargin;

    fn dims() -> ChartDimensions {
        ChartDimensions::new(420.0, 300.0).with_margin(ChartMargin::new(20.0, 20.0, 30.0, 50.0))
    }

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);
        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_nice_ticks() {
        let scale = LinearScale::new().domain(0.0, 10.0);
        assert_eq!(scale.nice_ticks(5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let flat = LinearScale::new().domain(3.0, 3.0);
        assert_eq!(flat.nice_ticks(5), vec![3.0]);
    }

    #[test]
    fn test_projection_x_spreads_indices() {
        let p = Projection::new(&dims(), 0.0, 10.0, 3);
        assert_eq!(p.x(0), 50.0);
        assert_eq!(p.x(1), 225.0);
        assert_eq!(p.x(2), 400.0);
    }

    #[test]
    fn test_projection_single_category_sits_left() {
        let p = Projection::new(&dims(), 0.0, 10.0, 1);
        assert_eq!(p.x(0), 50.0);
    }

    #[test]
    fn test_projection_y_is_inverted() {
        let p = Projection::new(&dims(), 0.0, 10.0, 3);
        assert_eq!(p.y(0.0), 270.0);
        assert_eq!(p.y(10.0), 20.0);
        assert_eq!(p.y(5.0), 145.0);
        assert_eq!(p.baseline(), 270.0);
    }

    #[test]
    fn test_projection_flat_domain_is_mid_height() {
        let p = Projection::new(&dims(), 4.0, 4.0, 3);
        assert_eq!(p.y(4.0), 145.0);
        assert_eq!(p.y(100.0), 145.0);
    }

    #[test]
    fn test_projection_sub_unit_range_is_floored_to_one() {
        let p = Projection::new(&dims(), 0.0, 0.5, 3);
        assert_eq!(p.y(0.0), 270.0);
        assert_eq!(p.y(0.5), 145.0);
        assert_eq!(p.baseline(), 270.0);
    }

    #[test]
    fn test_label_stride() {
        assert_eq!(label_stride(10, 600.0, 60.0), 1);
        assert_eq!(label_stride(30, 600.0, 60.0), 3);
        assert_eq!(label_stride(5, 10.0, 60.0), 5);
        assert_eq!(label_stride(0, 600.0, 60.0), 1);
    }

    #[test]
    fn test_category_labels_are_thinned() {
        let p = Projection::new(&dims(), 0.0, 1.0, 12);
        let labels: Vec<String> = (0..12).map(|i| format!("D{i}")).collect();
        let shown = p.category_labels(&labels, 100.0);
        // 350px inner width fits 3 labels at 100px spacing
        assert_eq!(shown.len(), 3);
        assert_eq!(shown[0].1, "D0");
        assert_eq!(shown[1].1, "D4");
    }
}
