//! Statistics over ordered series: least-squares trend and moving average.

/// Default trailing window for the moving average
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 3;

/// Fitted line `value = slope * index + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    pub fn predict(&self, index: f64) -> f64 {
        self.slope * index + self.intercept
    }
}

/// Ordinary least squares of value against index (0, 1, 2, ...).
///
/// Returns `None` for an empty series. With a single point (zero x variance)
/// the fit is flat through the mean.
pub fn linear_regression(values: &[f64]) -> Option<Regression> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_xx) = values.iter().enumerate().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sxx), (i, &y)| {
            let x = i as f64;
            (sx + x, sy + y, sxy + x * y, sxx + x * x)
        },
    );

    let denominator = n * sum_xx - sum_x * sum_x;
    let slope = if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        (n * sum_xy - sum_x * sum_y) / denominator
    };
    let intercept = (sum_y - slope * sum_x) / n;

    Some(Regression { slope, intercept })
}

/// Trailing simple moving average.
///
/// The output has one slot per input. The first `window - 1` slots are `None`;
/// slot `i` after that is the mean of `values[i + 1 - window..=i]`.
/// A zero window is treated as 1.
pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        out.push((i + 1 >= window).then(|| sum / window as f64));
    }

    out
}

/// Direction of a fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    /// Slopes within `tolerance` of zero read as stable
    pub fn from_slope(slope: f64, tolerance: f64) -> Self {
        if slope > tolerance {
            Self::Increasing
        } else if slope < -tolerance {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Increasing => "Increasing",
            Self::Decreasing => "Decreasing",
            Self::Stable => "Stable",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Increasing => "↑",
            Self::Decreasing => "↓",
            Self::Stable => "→",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_regression_exact_on_small_line() {
        let fit = linear_regression(&[2.0, 4.0, 6.0]).unwrap();
        assert_eq!(fit.slope, 2.0);
        assert_eq!(fit.intercept, 2.0);
    }

    #[test]
    fn test_regression_recovers_line() {
        let (a, b) = (-0.75, 12.5);
        let values: Vec<f64> = (0..25).map(|x| a * x as f64 + b).collect();
        let fit = linear_regression(&values).unwrap();
        assert!(close(fit.slope, a));
        assert!(close(fit.intercept, b));
        assert!(close(fit.predict(24.0), values[24]));
    }

    #[test]
    fn test_regression_degenerate_inputs() {
        assert_eq!(linear_regression(&[]), None);
        let single = linear_regression(&[7.0]).unwrap();
        assert_eq!(single, Regression { slope: 0.0, intercept: 7.0 });
    }

    #[test]
    fn test_moving_average_slots() {
        let values = [1.0, 2.0, 3.0, 4.0, 10.0, -2.0];
        let window = 3;
        let ma = moving_average(&values, window);

        assert_eq!(ma.len(), values.len());
        assert!(ma[..window - 1].iter().all(Option::is_none));
        for i in window - 1..values.len() {
            let expected: f64 = values[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            assert!(close(ma[i].unwrap(), expected), "slot {i}");
        }
    }

    #[test]
    fn test_moving_average_window_longer_than_series() {
        let ma = moving_average(&[1.0, 2.0], 5);
        assert_eq!(ma, vec![None, None]);
    }

    #[test]
    fn test_moving_average_window_one_is_identity() {
        assert_eq!(
            moving_average(&[3.0, 5.0], 0),
            vec![Some(3.0), Some(5.0)]
        );
    }

    #[test]
    fn test_trend_direction() {
        assert_eq!(TrendDirection::from_slope(0.5, 0.01), TrendDirection::Increasing);
        assert_eq!(TrendDirection::from_slope(-0.5, 0.01), TrendDirection::Decreasing);
        assert_eq!(TrendDirection::from_slope(0.001, 0.01), TrendDirection::Stable);
    }
}
