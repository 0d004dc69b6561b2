//! Category series for line, area and trend charts

use crate::{DataError, colors};
use serde::{Deserialize, Serialize};

// ============================================================================
// SERIES
// ============================================================================

/// Named ordered values sharing the chart's category labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    pub data: Vec<f64>,
    /// Empty falls back to the default palette
    #[serde(default)]
    pub color: String,
}

impl Series {
    pub fn new(name: impl Into<String>, data: Vec<f64>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data,
            color: color.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Color to draw the series at position `index` with
    pub fn display_color(&self, index: usize) -> String {
        if self.color.trim().is_empty() {
            colors::palette(index).to_string()
        } else {
            self.color.clone()
        }
    }

    pub fn max(&self) -> Option<f64> {
        self.data.iter().cloned().reduce(f64::max)
    }

    pub fn min(&self) -> Option<f64> {
        self.data.iter().cloned().reduce(f64::min)
    }
}

/// Check that every series has exactly one value per label
pub fn validate_series(series: &[Series], labels: &[String]) -> Result<(), DataError> {
    if labels.is_empty() {
        return Err(DataError::NoLabels);
    }

    for s in series {
        if s.data.len() != labels.len() {
            return Err(DataError::LengthMismatch {
                name: s.name.clone(),
                expected: labels.len(),
                actual: s.data.len(),
            });
        }
    }

    Ok(())
}

/// Number of points every series and the label list can supply
pub fn common_len(series: &[Series], labels: &[String]) -> usize {
    series
        .iter()
        .map(|s| s.data.len())
        .fold(labels.len(), usize::min)
}

// ============================================================================
// STACKING
// ============================================================================

/// Running sums in declaration order: layer `k` at index `i` is the sum of
/// `series[0..=k].data[i]`. Layers are truncated to the shortest series.
pub fn stack_series(series: &[Series]) -> Vec<Vec<f64>> {
    let len = series.iter().map(|s| s.data.len()).min().unwrap_or(0);
    let mut running = vec![0.0; len];

    series
        .iter()
        .map(|s| {
            for (acc, value) in running.iter_mut().zip(&s.data) {
                *acc += value;
            }
            running.clone()
        })
        .collect()
}

// ============================================================================
// TREND DATA
// ============================================================================

/// Single labelled observation of a trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLineData {
    pub label: String,
    pub value: f64,
}

impl TrendLineData {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Min/max over a set of values, `None` when empty
pub fn value_bounds<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("L{i}")).collect()
    }

    #[test]
    fn test_stack_series_running_sums() {
        let series = vec![
            Series::new("A", vec![1.0, 2.0, 3.0], "#111"),
            Series::new("B", vec![4.0, 5.0, 6.0], "#222"),
            Series::new("C", vec![1.0, 1.0, 1.0], "#333"),
        ];
        let stacked = stack_series(&series);

        assert_eq!(stacked[0], vec![1.0, 2.0, 3.0]);
        assert_eq!(stacked[1], vec![5.0, 7.0, 9.0]);
        assert_eq!(stacked[2], vec![6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_stack_series_truncates_to_shortest() {
        let series = vec![
            Series::new("A", vec![1.0, 2.0, 3.0], "#111"),
            Series::new("B", vec![1.0], "#222"),
        ];
        let stacked = stack_series(&series);
        assert_eq!(stacked[0], vec![1.0]);
        assert_eq!(stacked[1], vec![2.0]);
    }

    #[test]
    fn test_validate_series() {
        let ok = vec![Series::new("A", vec![1.0, 2.0], "#111")];
        assert!(validate_series(&ok, &labels(2)).is_ok());

        let bad = vec![Series::new("A", vec![1.0], "#111")];
        assert_eq!(
            validate_series(&bad, &labels(2)),
            Err(DataError::LengthMismatch {
                name: "A".into(),
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(validate_series(&ok, &[]), Err(DataError::NoLabels));
    }

    #[test]
    fn test_common_len_and_bounds() {
        let series = vec![
            Series::new("A", vec![1.0, 2.0, 3.0], "#111"),
            Series::new("B", vec![1.0, 9.0], "#222"),
        ];
        assert_eq!(common_len(&series, &labels(3)), 2);
        assert_eq!(value_bounds([3.0, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(value_bounds(std::iter::empty()), None);
    }

    #[test]
    fn test_series_deserializes_from_camel_case_json() {
        let json = r##"{"name":"Logs","data":[1,2],"color":"#3b82f6"}"##;
        let series: Series = serde_json::from_str(json).unwrap();
        assert_eq!(series.data, vec![1.0, 2.0]);
        assert_eq!(series.max(), Some(2.0));
    }

    #[test]
    fn test_missing_color_falls_back_to_palette() {
        let json = r##"{"name":"Logs","data":[1,2]}"##;
        let series: Series = serde_json::from_str(json).unwrap();
        assert_eq!(series.color, "");
        assert_eq!(series.display_color(1), colors::palette(1));
        assert_eq!(series.display_color(7), colors::palette(1));

        let explicit = Series::new("A", vec![1.0], "#111");
        assert_eq!(explicit.display_color(3), "#111");
    }
}
