use serde::Serialize;
use serde_json::{Map, Value};

/// Body of `POST /api/scenario`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRequest {
    pub tariff_percent: f64,
    pub target_partners: Vec<String>,
    /// Omitted entirely when `None`; the service then scores all sectors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_filter: Option<Vec<String>>,
}

/// Body of `POST /api/compare`. Both scenarios are service-defined objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareRequest {
    pub baseline: Map<String, Value>,
    pub scenario: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_filter: Option<Vec<String>>,
}

/// Query of `GET /api/actual-tariffs`. Both parameters are comma-separated lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActualTariffsQuery {
    #[serde(skip_serializing_if = "is_blank")]
    pub partners: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub sectors: Option<String>,
}

impl ActualTariffsQuery {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.partners) && is_blank(&self.sectors)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}
