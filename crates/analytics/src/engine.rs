use crate::format::{EM_DASH, format_share};
use crate::metrics;
use crate::report::{ExplanationReport, KpiReport};
use core_types::{RiskEngineResult, Scenario, SectorDetail};

/// What the explanation panel is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct ExplanationInputs<'a> {
    pub scenario: &'a Scenario,
    pub result: Option<&'a RiskEngineResult>,
    pub sector_detail: Option<&'a SectorDetail>,
    pub detail_loading: bool,
    pub selected_sector_id: Option<&'a str>,
}

const IDLE_NARRATIVE: &str = "Run a simulation to see AI risk analysis. Risk increases with exposure to target partners and tariff level.";

/// A stateless calculator for the dashboard's derived views.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the KPI strip for the current scenario and result.
    pub fn kpi_report(&self, scenario: &Scenario, result: Option<&RiskEngineResult>) -> KpiReport {
        let sectors = result.map(|r| r.sectors.as_slice()).unwrap_or_default();

        KpiReport {
            most_exposed_sector: result
                .and_then(metrics::biggest_mover)
                .map(|s| s.sector_name.clone()),
            largest_risk_delta: metrics::largest_risk_delta(sectors),
            total_affected_export_value: metrics::total_affected_export_value(sectors),
            active_scenario: active_scenario_label(scenario),
            live: result.is_some(),
        }
    }

    /// Builds the explanation panel.
    pub fn explanation_report(&self, inputs: ExplanationInputs<'_>) -> ExplanationReport {
        let selected_row = inputs
            .result
            .zip(inputs.selected_sector_id)
            .and_then(|(result, id)| result.sector(id));

        let sector_name = inputs
            .sector_detail
            .map(|d| d.sector_name.clone())
            .or_else(|| selected_row.map(|row| row.sector_name.clone()))
            .or_else(|| {
                inputs
                    .result
                    .and_then(|r| r.biggest_movers.first())
                    .map(|m| m.sector_name.clone())
            })
            .unwrap_or_else(|| EM_DASH.to_string());

        let partner_shares = inputs
            .sector_detail
            .map(metrics::partner_share_ranking)
            .unwrap_or_default();

        let top_partner = inputs
            .sector_detail
            .filter(|_| !partner_shares.is_empty())
            .map(|d| format!("Top partner: {} ({})", d.top_partner, format_share(d.top_partner_share)));

        ExplanationReport {
            status: if inputs.result.is_some() { "Live" } else { "Sample" },
            sector_name,
            detail_loading: inputs.detail_loading,
            narrative: narrative(inputs.scenario, inputs.result),
            partner_shares,
            top_partner,
            key_drivers: metrics::select_key_drivers(inputs.result, inputs.selected_sector_id),
        }
    }
}

/// `"US, EU / 25%"`
pub fn active_scenario_label(scenario: &Scenario) -> String {
    format!(
        "{} / {}%",
        scenario.target_partners.join(", "),
        scenario.tariff_percent
    )
}

fn narrative(scenario: &Scenario, result: Option<&RiskEngineResult>) -> String {
    let Some(result) = result else {
        return IDLE_NARRATIVE.to_string();
    };
    let top_risk = result
        .biggest_movers
        .first()
        .map(|m| format!("{:.1}", m.risk_score))
        .unwrap_or_else(|| EM_DASH.to_string());
    format!(
        "Risk from {}% tariff on {}. Top sector risk: {}.",
        scenario.tariff_percent,
        scenario.target_partners.join(", "),
        top_risk
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::fixtures::{explained, result, row};
    use crate::report::KeyDrivers;

    fn steel_scenario() -> Scenario {
        Scenario {
            tariff_percent: 25.0,
            target_partners: vec!["US".to_string(), "EU".to_string()],
            sector_filter: None,
            partner_display_names: None,
        }
    }

    #[test]
    fn kpis_without_result_are_empty() {
        let report = AnalyticsEngine::new().kpi_report(&Scenario::default(), None);

        assert_eq!(report.most_exposed_sector, None);
        assert_eq!(report.largest_risk_delta, None);
        assert_eq!(report.affected_export_value_display(), "—");
        assert_eq!(report.active_scenario, "US / 0%");
        assert_eq!(report.tiles()[3].note, Some("Set & run"));
    }

    #[test]
    fn kpis_from_live_result() {
        let mut mover = row("72", 7.5, Some(1_000_000_000.0));
        mover.sector_name = "Iron and steel".to_string();
        let r = result(
            vec![mover.clone(), row("73", -3.0, Some(500_000_000.0))],
            vec![mover],
        );

        let report = AnalyticsEngine::new().kpi_report(&steel_scenario(), Some(&r));

        assert_eq!(report.most_exposed_sector.as_deref(), Some("Iron and steel"));
        assert_eq!(report.largest_risk_delta_display(), "+7.5%");
        assert_eq!(report.affected_export_value_display(), "$1.5B");
        assert_eq!(report.active_scenario, "US, EU / 25%");
        assert!(report.live);
    }

    #[test]
    fn explanation_without_result_is_a_sample() {
        let scenario = Scenario::default();
        let report = AnalyticsEngine::new().explanation_report(ExplanationInputs {
            scenario: &scenario,
            result: None,
            sector_detail: None,
            detail_loading: false,
            selected_sector_id: None,
        });

        assert_eq!(report.status, "Sample");
        assert_eq!(report.sector_name, "—");
        assert_eq!(report.narrative, IDLE_NARRATIVE);
        assert_eq!(report.key_drivers, KeyDrivers::Illustrative);
        assert!(report.partner_shares.is_empty());
        assert!(report.top_partner.is_none());
    }

    #[test]
    fn explanation_uses_selected_row_and_detail() {
        let scenario = steel_scenario();
        let mut mover = row("87", 2.0, None);
        mover.risk_score = 0.83;
        let r = result(vec![explained("72"), mover.clone()], vec![mover]);
        let detail = SectorDetail {
            sector_id: "72".to_string(),
            sector_name: "Iron and steel".to_string(),
            total_exports: 10.0,
            partner_shares: vec![("A".to_string(), 0.1), ("B".to_string(), 0.6)],
            top_partner: "B".to_string(),
            top_partner_share: 0.6,
        };

        let report = AnalyticsEngine::new().explanation_report(ExplanationInputs {
            scenario: &scenario,
            result: Some(&r),
            sector_detail: Some(&detail),
            detail_loading: false,
            selected_sector_id: Some("72"),
        });

        assert_eq!(report.status, "Live");
        assert_eq!(report.sector_name, "Iron and steel");
        assert_eq!(
            report.narrative,
            "Risk from 25% tariff on US, EU. Top sector risk: 0.8."
        );
        assert_eq!(report.partner_shares[0].partner, "B");
        assert_eq!(report.top_partner.as_deref(), Some("Top partner: B (60.0%)"));
        assert!(report.key_drivers.is_computed());
    }

    #[test]
    fn sector_name_falls_back_to_selected_row_then_mover() {
        let scenario = steel_scenario();
        let r = result(vec![row("72", 1.0, None)], vec![row("87", 2.0, None)]);
        let engine = AnalyticsEngine::new();

        let selected = engine.explanation_report(ExplanationInputs {
            scenario: &scenario,
            result: Some(&r),
            sector_detail: None,
            detail_loading: true,
            selected_sector_id: Some("72"),
        });
        assert_eq!(selected.sector_name, "Sector 72");
        assert!(selected.detail_loading);

        let unselected = engine.explanation_report(ExplanationInputs {
            scenario: &scenario,
            result: Some(&r),
            sector_detail: None,
            detail_loading: false,
            selected_sector_id: None,
        });
        assert_eq!(unselected.sector_name, "Sector 87");
    }
}
