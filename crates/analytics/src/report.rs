use crate::format::{EM_DASH, format_compact, format_share, format_signed_delta};
use core_types::Explainability;
use serde::Serialize;

/// The KPI strip shown above the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    /// Name of the headline sector (the biggest mover).
    pub most_exposed_sector: Option<String>,
    /// Maximum `risk_delta` across the result; `None` without sectors.
    pub largest_risk_delta: Option<f64>,
    /// Sum of `affected_export_value`, missing values counted as zero.
    pub total_affected_export_value: f64,
    /// `"US, EU / 25%"`
    pub active_scenario: String,
    /// Whether a result is currently loaded.
    pub live: bool,
}

/// One rendered KPI card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiTile {
    pub label: &'static str,
    pub value: String,
    pub note: Option<&'static str>,
}

impl KpiReport {
    pub fn largest_risk_delta_display(&self) -> String {
        self.largest_risk_delta
            .map(format_signed_delta)
            .unwrap_or_else(|| EM_DASH.to_string())
    }

    pub fn affected_export_value_display(&self) -> String {
        if self.total_affected_export_value > 0.0 {
            format!("${}", format_compact(self.total_affected_export_value))
        } else {
            EM_DASH.to_string()
        }
    }

    /// The four cards, in display order.
    pub fn tiles(&self) -> Vec<KpiTile> {
        vec![
            KpiTile {
                label: "Most Exposed Sector",
                value: self
                    .most_exposed_sector
                    .clone()
                    .unwrap_or_else(|| EM_DASH.to_string()),
                note: None,
            },
            KpiTile {
                label: "Largest Risk Δ",
                value: self.largest_risk_delta_display(),
                note: Some("vs Baseline"),
            },
            KpiTile {
                label: "Affected Export Value",
                value: self.affected_export_value_display(),
                note: None,
            },
            KpiTile {
                label: "Active Scenario",
                value: self.active_scenario.clone(),
                note: Some(if self.live { "Live" } else { "Set & run" }),
            },
        ]
    }
}

/// A partner's share of a sector's exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerShare {
    pub partner: String,
    pub share: f64,
}

impl PartnerShare {
    pub fn share_display(&self) -> String {
        format_share(self.share)
    }
}

/// The "key drivers" block of the explanation panel.
///
/// `Illustrative` is a fixed placeholder shown when the service gave no breakdown
/// for the selected sector. It carries no data and must never be read as a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "breakdown")]
pub enum KeyDrivers {
    Computed(Explainability),
    Illustrative,
}

/// One labelled bar of the key drivers block. `fill` is clamped to `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverRow {
    pub label: &'static str,
    pub value: String,
    pub fill: f64,
}

impl KeyDrivers {
    pub fn is_computed(&self) -> bool {
        matches!(self, KeyDrivers::Computed(_))
    }

    pub fn rows(&self) -> Vec<DriverRow> {
        match self {
            KeyDrivers::Computed(e) => vec![
                DriverRow {
                    label: "Export Exposure",
                    value: format!("{:.2}", e.exposure_value),
                    fill: e.exposure_value.clamp(0.0, 1.0),
                },
                DriverRow {
                    label: "Concentration",
                    value: format!("{:.2}", e.concentration_value),
                    fill: e.concentration_value.clamp(0.0, 1.0),
                },
            ],
            KeyDrivers::Illustrative => vec![
                DriverRow {
                    label: "Export Exposure",
                    value: "High".to_string(),
                    fill: 0.85,
                },
                DriverRow {
                    label: "Supply Chain Concentration",
                    value: "Med".to_string(),
                    fill: 0.60,
                },
            ],
        }
    }

    /// Component breakdown under the bars; only real data has one.
    pub fn footnote(&self) -> Option<String> {
        match self {
            KeyDrivers::Computed(e) => Some(format!(
                "Shock: {:.2} · Exposure component: {:.2} · Concentration: {:.2}",
                e.shock_value, e.exposure_component, e.concentration_component
            )),
            KeyDrivers::Illustrative => None,
        }
    }
}

/// The explanation panel for the current (or selected) sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationReport {
    /// `"Live"` when a result is loaded, `"Sample"` otherwise.
    pub status: &'static str,
    pub sector_name: String,
    pub detail_loading: bool,
    pub narrative: String,
    /// Top five partners of the selected sector, largest first.
    pub partner_shares: Vec<PartnerShare>,
    /// `"Top partner: B (60.0%)"`, only alongside partner shares.
    pub top_partner: Option<String>,
    pub key_drivers: KeyDrivers,
}

/// Scenario versus baseline risk for one sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonPoint {
    pub sector_id: String,
    pub sector_name: String,
    pub scenario_risk: f64,
    /// `None` when the baseline did not score this sector (or is not loaded).
    pub baseline_risk: Option<f64>,
}
