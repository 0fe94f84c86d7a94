use crate::error::EventsError;
use core_types::Scenario;
use serde::{Deserialize, Serialize};

/// Everything the orchestration core announces to its subscribers.
///
/// The `#[serde(tag = "type", content = "payload")]` attribute serializes the enum
/// into a flat JSON object, e.g. `{"type": "RunFailed", "payload": {"message": "..."}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SessionEvent {
    /// Startup reference data has settled (each source possibly defaulted).
    ReferenceDataLoaded {
        partners: usize,
        sectors: usize,
        config_available: bool,
    },
    /// The pending scenario was replaced.
    ScenarioChanged(Scenario),
    /// Both result slots were cleared because the scenario inputs changed.
    ResultsCleared,
    /// A run or baseline load was issued.
    RunStarted,
    ScenarioResultReady,
    /// A baseline arrived; it is also the current scenario result.
    BaselineReady,
    /// A run or baseline load failed. The message replaces any previous one.
    RunFailed { message: String },
    SectorSelected { sector_id: String },
    SectorDetailReady { sector_id: String },
    /// The detail lookup failed; the view degrades to "no detail".
    SectorDetailUnavailable { sector_id: String },
    /// The owning view went away; nothing further will be published.
    ShutDown,
}

impl SessionEvent {
    pub fn to_json(&self) -> Result<String, EventsError> {
        Ok(serde_json::to_string(self)?)
    }
}
