use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of `POST /api/compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareSectorRow {
    pub sector_id: String,
    pub sector_name: String,
    pub baseline_risk: f64,
    pub scenario_risk: f64,
    pub risk_change: f64,
    pub affected_export_value: f64,
    pub top_partner: String,
    pub dependency_percent: f64,
}

/// Response of `POST /api/compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    #[serde(default)]
    pub baseline_scenario: Map<String, Value>,
    #[serde(default)]
    pub shock_scenario: Map<String, Value>,
    #[serde(default)]
    pub comparison: Vec<CompareSectorRow>,
    #[serde(default)]
    pub biggest_gainers: Vec<CompareSectorRow>,
    #[serde(default)]
    pub total_sectors: usize,
}
