//! Bundled sample facility data

use ops_core::{HeatmapCell, RadarChartData, Series, TrendLineData};
use serde::Deserialize;

const SAMPLE_JSON: &str = include_str!("sample.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitySnapshot {
    pub site: String,
    pub days: Vec<String>,
    pub energy: Vec<Series>,
    pub occupancy: OccupancyGrid,
    pub compliance: Vec<RadarChartData>,
    pub tickets: Vec<TrendLineData>,
    pub headcount: Headcount,
    pub work_orders: Vec<WorkOrder>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OccupancyGrid {
    pub rows: Vec<String>,
    pub cols: Vec<String>,
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Headcount {
    pub value: f64,
    pub capacity: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkOrder {
    pub id: String,
    pub task: String,
    pub area: String,
    pub status: String,
    pub priority: String,
}

impl FacilitySnapshot {
    pub fn load() -> Result<Self, serde_json::Error> {
        serde_json::from_str(SAMPLE_JSON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses() {
        let snapshot = FacilitySnapshot::load().unwrap();
        assert_eq!(snapshot.site, "North Campus");
        assert_eq!(snapshot.work_orders.len(), 4);
        assert_eq!(snapshot.compliance[5].max_value, Some(20.0));
    }

    #[test]
    fn test_sample_series_match_labels() {
        let snapshot = FacilitySnapshot::load().unwrap();
        assert!(ops_core::validate_series(&snapshot.energy, &snapshot.days).is_ok());
    }

    #[test]
    fn test_sample_cells_inside_grid() {
        let grid = FacilitySnapshot::load().unwrap().occupancy;
        assert!(grid
            .cells
            .iter()
            .all(|c| c.row < grid.rows.len() && c.col < grid.cols.len()));
    }
}
