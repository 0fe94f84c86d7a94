//! # TariffShock Core Types
//!
//! The shared data model for the whole workspace: the user's pending scenario, the
//! risk-service responses it is scored against, and the reference data used to
//! populate selection controls.
//!
//! This is a Layer 0 crate. It knows nothing about HTTP or state management; it only
//! defines what the data looks like on the wire and in memory.

pub mod compare;
pub mod error;
pub mod reference;
pub mod requests;
pub mod risk;
pub mod scenario;
pub mod serde_utils;

// Re-export the core types to provide a clean public API.
pub use compare::{CompareResponse, CompareSectorRow};
pub use error::CoreError;
pub use reference::{
    HealthResponse, Partner, PartnersResponse, SectorDetail, SectorOption, SectorSummary,
    SectorsResponse, ServiceConfig, TariffRateRow, TariffRatesResponse,
};
pub use requests::{ActualTariffsQuery, CompareRequest, ScenarioRequest};
pub use risk::{Explainability, RiskEngineResult, SectorRiskOutput};
pub use scenario::{Scenario, ScenarioPreset, find_preset, partner_display_name, presets};
