use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub engine_loaded: Option<bool>,
}

/// `GET /api/config`: the service's weights and formula descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub w_exposure: Option<f64>,
    #[serde(default)]
    pub w_concentration: Option<f64>,
    #[serde(default)]
    pub max_tariff_percent: Option<f64>,
    #[serde(default)]
    pub risk_formula: Option<String>,
    #[serde(default)]
    pub shock_formula: Option<String>,
    #[serde(default)]
    pub ml_model_available: Option<bool>,
    #[serde(default)]
    pub ml_model_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
}

/// `GET /api/partners`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnersResponse {
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub note: Option<String>,
}

/// One entry of `GET /api/sectors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSummary {
    pub sector_id: String,
    pub sector_name: String,
    #[serde(default)]
    pub total_exports: Option<f64>,
    #[serde(default)]
    pub top_partner: Option<String>,
    #[serde(default)]
    pub top_partner_share: Option<f64>,
}

/// `GET /api/sectors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorsResponse {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub sectors: Vec<SectorSummary>,
}

/// A sector as offered in selection controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorOption {
    pub sector_id: String,
    pub sector_name: String,
    pub total_exports: Option<f64>,
    pub top_partner: Option<String>,
    pub top_partner_share: Option<f64>,
}

impl From<SectorSummary> for SectorOption {
    fn from(s: SectorSummary) -> Self {
        Self {
            sector_id: s.sector_id,
            sector_name: s.sector_name,
            total_exports: s.total_exports,
            top_partner: s.top_partner,
            top_partner_share: s.top_partner_share,
        }
    }
}

/// `GET /api/sector/{id}`: a static profile of one sector, independent of any scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorDetail {
    pub sector_id: String,
    pub sector_name: String,
    pub total_exports: f64,
    /// Partner name to fractional share (0..1), in the order the service sent them.
    /// The service does not sort this mapping.
    #[serde(with = "crate::serde_utils::ordered_shares")]
    pub partner_shares: Vec<(String, f64)>,
    pub top_partner: String,
    pub top_partner_share: f64,
}

/// `GET /api/tariff-rates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TariffRatesResponse {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sectors: Vec<TariffRateRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffRateRow {
    pub hs2: String,
    pub sector_name: String,
    pub tariff_rates: HashMap<String, f64>,
    pub max_tariff: f64,
}
