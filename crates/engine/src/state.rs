use crate::invalidation::InvalidationState;
use analytics::{
    AnalyticsEngine, ComparisonPoint, ExplanationInputs, ExplanationReport, KpiReport, metrics,
};
use core_types::{
    HealthResponse, Partner, RiskEngineResult, Scenario, SectorDetail, SectorOption,
    SectorRiskOutput, ServiceConfig,
};

/// Startup reference data. Each source is optional on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub health: Option<HealthResponse>,
    pub config: Option<ServiceConfig>,
    pub partners: Vec<Partner>,
    pub partners_note: Option<String>,
    /// Sorted by descending `total_exports` for selection controls.
    pub sectors: Vec<SectorOption>,
}

/// Everything the orchestration core owns. Presentation gets clones of this
/// through [`crate::Dashboard::snapshot`] and never mutates it directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub scenario: Scenario,
    pub scenario_result: Option<RiskEngineResult>,
    pub baseline_result: Option<RiskEngineResult>,
    /// Shared by Run and Load-baseline.
    pub is_running: bool,
    /// The banner message. A new one replaces the old; they never accumulate.
    pub error: Option<String>,

    pub reference: ReferenceData,
    pub initial_loading: bool,

    pub selected_sector_id: Option<String>,
    pub sector_detail: Option<SectorDetail>,
    pub sector_detail_loading: bool,

    pub invalidation: InvalidationState,
}

impl DashboardState {
    /// Replaces the scenario wholesale and applies the invalidation rule.
    /// Returns `true` if the results were cleared.
    pub(crate) fn replace_scenario(&mut self, next: Scenario) -> bool {
        let inputs_changed = self.scenario.inputs_differ(&next);
        let clear = self.invalidation.on_scenario_replaced(inputs_changed);
        self.scenario = next;
        if clear {
            self.scenario_result = None;
            self.baseline_result = None;
        }
        clear
    }

    // --- Derived views. Recomputed on every call, never stored. ---

    pub fn leaderboard(&self) -> &[SectorRiskOutput] {
        self.scenario_result
            .as_ref()
            .map(metrics::leaderboard)
            .unwrap_or_default()
    }

    pub fn biggest_mover(&self) -> Option<&SectorRiskOutput> {
        self.scenario_result.as_ref().and_then(metrics::biggest_mover)
    }

    pub fn kpis(&self) -> KpiReport {
        AnalyticsEngine::new().kpi_report(&self.scenario, self.scenario_result.as_ref())
    }

    /// Scenario risk next to baseline risk per sector. Empty without a scenario result.
    pub fn risk_comparison(&self) -> Vec<ComparisonPoint> {
        self.scenario_result
            .as_ref()
            .map(|r| metrics::risk_comparison(r, self.baseline_result.as_ref()))
            .unwrap_or_default()
    }

    pub fn explanation(&self) -> ExplanationReport {
        AnalyticsEngine::new().explanation_report(ExplanationInputs {
            scenario: &self.scenario,
            result: self.scenario_result.as_ref(),
            sector_detail: self.sector_detail.as_ref(),
            detail_loading: self.sector_detail_loading,
            selected_sector_id: self.selected_sector_id.as_deref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn some_result() -> RiskEngineResult {
        RiskEngineResult {
            scenario: Map::new(),
            sectors: Vec::new(),
            biggest_movers: Vec::new(),
            metadata: None,
        }
    }

    fn loaded() -> DashboardState {
        DashboardState {
            scenario_result: Some(some_result()),
            baseline_result: Some(some_result()),
            ..DashboardState::default()
        }
    }

    #[test]
    fn changing_any_input_clears_both_results() {
        let edits: Vec<Box<dyn Fn(&Scenario) -> Scenario>> = vec![
            Box::new(|s| s.with_tariff(10.0)),
            Box::new(|s| Scenario {
                target_partners: vec!["EU".to_string()],
                ..s.clone()
            }),
            Box::new(|s| Scenario {
                sector_filter: Some(vec!["72".to_string()]),
                ..s.clone()
            }),
        ];

        for edit in edits {
            let mut state = loaded();
            let next = edit(&state.scenario);
            assert!(state.replace_scenario(next));
            assert!(state.scenario_result.is_none());
            assert!(state.baseline_result.is_none());
        }
    }

    #[test]
    fn identical_inputs_keep_results() {
        let mut state = loaded();
        let same = state.scenario.clone();
        assert!(!state.replace_scenario(same));
        assert!(state.scenario_result.is_some());
    }

    #[test]
    fn armed_suppression_keeps_results_once() {
        let mut state = loaded();
        state.invalidation.baseline_loaded();

        let reset = state.scenario.with_tariff(25.0);
        assert!(!state.replace_scenario(reset));
        assert!(state.baseline_result.is_some());

        let edit = state.scenario.with_tariff(30.0);
        assert!(state.replace_scenario(edit));
        assert!(state.baseline_result.is_none());
    }

    #[test]
    fn derived_views_are_empty_without_result() {
        let state = DashboardState::default();
        assert!(state.leaderboard().is_empty());
        assert!(state.biggest_mover().is_none());
        assert!(state.risk_comparison().is_empty());
        assert!(!state.kpis().live);
        assert_eq!(state.explanation().status, "Sample");
    }
}
