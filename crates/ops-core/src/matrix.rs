//! Sparse heatmap cells with O(1) lookup

use crate::value_bounds;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One populated heatmap cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

impl HeatmapCell {
    pub fn new(row: usize, col: usize, value: f64) -> Self {
        Self { row, col, value }
    }
}

/// Indexed heatmap grid. Cells that were never supplied read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapData {
    values: HashMap<(usize, usize), f64>,
    bounds: Option<(f64, f64)>,
}

impl HeatmapData {
    /// Index cells by `(row, col)`; a repeated key keeps the last value
    pub fn new(cells: &[HeatmapCell]) -> Self {
        let values: HashMap<(usize, usize), f64> = cells
            .iter()
            .map(|c| ((c.row, c.col), c.value))
            .collect();
        let bounds = value_bounds(values.values().cloned());
        Self { values, bounds }
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values.get(&(row, col)).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.values.contains_key(&(row, col))
    }

    /// Min/max over supplied cells, `(0, 0)` when there are none
    pub fn bounds(&self) -> (f64, f64) {
        self.bounds.unwrap_or((0.0, 0.0))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cells_default_to_zero() {
        let data = HeatmapData::new(&[HeatmapCell::new(0, 1, 4.0)]);
        assert_eq!(data.value(0, 1), 4.0);
        assert_eq!(data.value(3, 3), 0.0);
        assert!(!data.contains(3, 3));
    }

    #[test]
    fn test_duplicate_key_keeps_last() {
        let data = HeatmapData::new(&[HeatmapCell::new(1, 1, 2.0), HeatmapCell::new(1, 1, 9.0)]);
        assert_eq!(data.len(), 1);
        assert_eq!(data.value(1, 1), 9.0);
        assert_eq!(data.bounds(), (9.0, 9.0));
    }

    #[test]
    fn test_bounds() {
        let data = HeatmapData::new(&[
            HeatmapCell::new(0, 0, 3.0),
            HeatmapCell::new(0, 1, -2.0),
            HeatmapCell::new(1, 0, 8.0),
        ]);
        assert_eq!(data.bounds(), (-2.0, 8.0));
        assert_eq!(HeatmapData::new(&[]).bounds(), (0.0, 0.0));
    }
}
