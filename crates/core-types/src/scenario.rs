use crate::error::CoreError;
use crate::requests::ScenarioRequest;
use serde::{Deserialize, Serialize};

/// The user's pending tariff-shock configuration.
///
/// A `Scenario` is plain data. The state store never edits one in place; a change
/// is always expressed as a whole replacement value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Tariff applied uniformly to every target partner.
    pub tariff_percent: f64,
    /// Partner identifiers. Order is display order only.
    pub target_partners: Vec<String>,
    /// `None` means "all sectors".
    pub sector_filter: Option<Vec<String>>,
    /// Human labels parallel to `target_partners`, derived when a preset is picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_display_names: Option<Vec<String>>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            tariff_percent: 0.0,
            target_partners: vec!["US".to_string()],
            sector_filter: None,
            partner_display_names: None,
        }
    }
}

impl Scenario {
    /// Builds the scenario a preset describes, deriving partner display names.
    pub fn from_preset(preset: &ScenarioPreset) -> Self {
        let target_partners: Vec<String> =
            preset.target_partners.iter().map(|p| p.to_string()).collect();
        let partner_display_names = target_partners
            .iter()
            .map(|p| partner_display_name(p))
            .collect();

        Self {
            tariff_percent: preset.tariff_percent,
            target_partners,
            sector_filter: preset
                .sector_filter
                .map(|ids| ids.iter().map(|id| id.to_string()).collect()),
            partner_display_names: Some(partner_display_names),
        }
    }

    /// Returns a copy of this scenario with a different tariff.
    pub fn with_tariff(&self, tariff_percent: f64) -> Self {
        Self {
            tariff_percent,
            ..self.clone()
        }
    }

    /// Returns a copy targeting `partners`, with display names rebuilt to match.
    pub fn with_partners(&self, partners: Vec<String>) -> Self {
        let partner_display_names = partners.iter().map(|p| partner_display_name(p)).collect();
        Self {
            target_partners: partners,
            partner_display_names: Some(partner_display_names),
            ..self.clone()
        }
    }

    /// The sector filter as it should be sent to the service.
    ///
    /// An empty filter is the same as no filter: the service reads an absent
    /// filter as "all sectors", whereas an empty list would mean "no sectors".
    pub fn sector_filter_for_request(&self) -> Option<&[String]> {
        match &self.sector_filter {
            Some(ids) if !ids.is_empty() => Some(ids.as_slice()),
            _ => None,
        }
    }

    /// True when `next` differs from `self` in any field that feeds the risk
    /// computation. Display names alone never make a result stale.
    pub fn inputs_differ(&self, next: &Scenario) -> bool {
        self.tariff_percent != next.tariff_percent
            || self.target_partners != next.target_partners
            || self.sector_filter != next.sector_filter
    }

    /// Builds the `POST /api/scenario` body for this scenario.
    pub fn to_request(&self) -> ScenarioRequest {
        ScenarioRequest {
            tariff_percent: self.tariff_percent,
            target_partners: self.target_partners.clone(),
            sector_filter: self.sector_filter_for_request().map(|ids| ids.to_vec()),
        }
    }
}

/// Maps a partner identifier to the label shown next to it.
pub fn partner_display_name(partner_id: &str) -> String {
    match partner_id {
        "US" => "USA".to_string(),
        other => other.to_string(),
    }
}

/// A named, ready-made scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub tariff_percent: f64,
    pub target_partners: &'static [&'static str],
    pub sector_filter: Option<&'static [&'static str]>,
}

const PRESETS: [ScenarioPreset; 3] = [
    ScenarioPreset {
        id: "us-steel",
        name: "US Steel Shock 2025",
        tariff_percent: 25.0,
        target_partners: &["US"],
        sector_filter: Some(&["72", "73"]),
    },
    ScenarioPreset {
        id: "eu-border",
        name: "EU Border Adjustment",
        tariff_percent: 10.0,
        target_partners: &["EU"],
        sector_filter: None,
    },
    ScenarioPreset {
        id: "china-auto",
        name: "China Autos",
        tariff_percent: 15.0,
        target_partners: &["China"],
        sector_filter: Some(&["87"]),
    },
];

/// All built-in presets, in display order.
pub fn presets() -> &'static [ScenarioPreset] {
    &PRESETS
}

/// Looks up a built-in preset by its identifier.
pub fn find_preset(id: &str) -> Result<&'static ScenarioPreset, CoreError> {
    PRESETS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CoreError::UnknownPreset(id.to_string()))
}
