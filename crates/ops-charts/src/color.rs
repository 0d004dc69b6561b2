//! Three-stop color scale for heatmap cells.

use ops_core::{ColorParseError, Rgb, colors};

/// Linear RGB gradient through `min` -> `mid` -> `max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale {
    pub min: Rgb,
    pub mid: Rgb,
    pub max: Rgb,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            min: Rgb::new(0xf0, 0xf9, 0xff),
            mid: Rgb::new(0xfb, 0xbf, 0x24),
            max: Rgb::new(0xdc, 0x26, 0x26),
        }
    }
}

impl ColorScale {
    pub fn new(min: Rgb, mid: Rgb, max: Rgb) -> Self {
        Self { min, mid, max }
    }

    pub fn from_hex(min: &str, mid: &str, max: &str) -> Result<Self, ColorParseError> {
        Ok(Self::new(
            Rgb::from_hex(min)?,
            Rgb::from_hex(mid)?,
            Rgb::from_hex(max)?,
        ))
    }

    /// Color at `ratio` in 0..=1: the lower half blends min->mid, the upper
    /// half blends mid->max
    pub fn at(&self, ratio: f64) -> Rgb {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        if ratio < 0.5 {
            self.min.lerp(self.mid, ratio * 2.0)
        } else {
            self.mid.lerp(self.max, (ratio - 0.5) * 2.0)
        }
    }

    /// Color for `value` within the data range `[min, max]`
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> Rgb {
        self.at(normalize(value, min, max))
    }

    /// Evenly spaced stops for a legend gradient, as `(offset %, hex)`
    pub fn gradient_stops(&self, count: usize) -> Vec<(f64, String)> {
        let count = count.max(2);
        (0..count)
            .map(|i| {
                let ratio = i as f64 / (count - 1) as f64;
                (ratio * 100.0, self.at(ratio).to_hex())
            })
            .collect()
    }
}

/// `(value - min) / (max - min)` clamped to 0..=1; a flat range maps to 0
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    let span = if span.abs() < f64::EPSILON { 1.0 } else { span };
    ((value - min) / span).clamp(0.0, 1.0)
}

/// Inline label color: white over values above the midpoint of the data
/// range, dark text otherwise
pub fn label_color(value: f64, min: f64, max: f64) -> &'static str {
    if value > (min + max) / 2.0 {
        colors::TEXT_INVERSE
    } else {
        colors::TEXT_PRIMARY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> ColorScale {
        ColorScale::from_hex("#f0f9ff", "#fbbf24", "#dc2626").unwrap()
    }

    #[test]
    fn test_default_matches_palette() {
        let expected =
            ColorScale::from_hex(colors::HEAT_MIN, colors::HEAT_MID, colors::HEAT_MAX).unwrap();
        assert_eq!(ColorScale::default(), expected);
    }

    #[test]
    fn test_stops_are_exact() {
        let s = scale();
        assert_eq!(s.at(0.0), Rgb::from_hex("#f0f9ff").unwrap());
        assert_eq!(s.at(0.5), Rgb::from_hex("#fbbf24").unwrap());
        assert_eq!(s.at(1.0), Rgb::from_hex("#dc2626").unwrap());
    }

    #[test]
    fn test_quarter_point_blends_min_and_mid() {
        let s = ColorScale::new(Rgb::new(0, 0, 0), Rgb::new(200, 100, 50), Rgb::WHITE);
        assert_eq!(s.at(0.25), Rgb::new(100, 50, 25));
        assert_eq!(s.at(0.75), Rgb::new(228, 178, 153));
    }

    #[test]
    fn test_out_of_range_ratios_clamp() {
        let s = scale();
        assert_eq!(s.at(-1.0), s.min);
        assert_eq!(s.at(3.0), s.max);
        assert_eq!(s.at(f64::NAN), s.min);
    }

    #[test]
    fn test_color_for_value_range() {
        let s = scale();
        assert_eq!(s.color_for(10.0, 10.0, 30.0), s.min);
        assert_eq!(s.color_for(20.0, 10.0, 30.0), s.mid);
        assert_eq!(s.color_for(30.0, 10.0, 30.0), s.max);
        // flat data never divides by zero
        assert_eq!(s.color_for(5.0, 5.0, 5.0), s.min);
    }

    #[test]
    fn test_label_color_switches_at_midpoint() {
        assert_eq!(label_color(8.0, 0.0, 10.0), colors::TEXT_INVERSE);
        assert_eq!(label_color(5.0, 0.0, 10.0), colors::TEXT_PRIMARY);
        assert_eq!(label_color(1.0, 0.0, 10.0), colors::TEXT_PRIMARY);
    }

    #[test]
    fn test_gradient_stops() {
        let stops = scale().gradient_stops(3);
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0], (0.0, "#f0f9ff".to_string()));
        assert_eq!(stops[2], (100.0, "#dc2626".to_string()));
    }
}
