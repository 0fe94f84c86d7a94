use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A completed computation from the risk service, either for a live scenario or
/// for the zero-tariff baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEngineResult {
    /// Echo of the submitted parameters. Service-defined; never reinterpreted here.
    #[serde(default)]
    pub scenario: Map<String, Value>,
    /// One row per scored sector, in the service's rank order.
    #[serde(default)]
    pub sectors: Vec<SectorRiskOutput>,
    /// A service-ranked subset of `sectors`. May be empty; its size is not fixed.
    #[serde(default)]
    pub biggest_movers: Vec<SectorRiskOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl RiskEngineResult {
    /// Finds the row for a sector by identifier.
    pub fn sector(&self, sector_id: &str) -> Option<&SectorRiskOutput> {
        self.sectors.iter().find(|s| s.sector_id == sector_id)
    }
}

/// The per-sector scoring row.
///
/// All scores are unit-less and on a scale the service defines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRiskOutput {
    pub sector_id: String,
    pub sector_name: String,
    pub risk_score: f64,
    /// Signed percentage change versus the baseline.
    pub risk_delta: f64,
    pub exposure: f64,
    pub concentration: f64,
    pub shock: f64,
    pub top_partner: String,
    pub dependency_percent: f64,
    /// Monetary value; the currency is implied by the service. `None` when omitted.
    #[serde(default)]
    pub affected_export_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_export_value_note: Option<String>,
    /// Present only when the service can attribute the score to its factors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explainability: Option<Explainability>,
}

/// Attribution of a sector's risk score to its contributing factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explainability {
    pub exposure_value: f64,
    pub concentration_value: f64,
    pub shock_value: f64,
    pub exposure_component: f64,
    pub concentration_component: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_stay_absent() {
        let json = r#"{
            "scenario": {"tariff_percent": 25},
            "sectors": [{
                "sector_id": "72",
                "sector_name": "Iron and steel",
                "risk_score": 0.61,
                "risk_delta": 12.5,
                "exposure": 0.4,
                "concentration": 0.7,
                "shock": 0.25,
                "top_partner": "US",
                "dependency_percent": 71.0
            }],
            "biggest_movers": []
        }"#;

        let result: RiskEngineResult = serde_json::from_str(json).unwrap();
        let row = result.sector("72").unwrap();

        assert_eq!(row.affected_export_value, None);
        assert_eq!(row.explainability, None);
        assert!(result.metadata.is_none());
        assert!(result.sector("73").is_none());
    }

    #[test]
    fn explainability_block_is_decoded() {
        let json = r#"{
            "sector_id": "87",
            "sector_name": "Vehicles",
            "risk_score": 0.8,
            "risk_delta": 4.0,
            "exposure": 0.5,
            "concentration": 0.6,
            "shock": 0.15,
            "top_partner": "China",
            "dependency_percent": 40.0,
            "affected_export_value": 2500.0,
            "explainability": {
                "exposure_value": 0.5,
                "concentration_value": 0.6,
                "shock_value": 0.15,
                "exposure_component": 0.3,
                "concentration_component": 0.24
            }
        }"#;

        let row: SectorRiskOutput = serde_json::from_str(json).unwrap();
        assert_eq!(row.affected_export_value, Some(2500.0));
        assert_eq!(row.explainability.unwrap().concentration_component, 0.24);
    }
}
