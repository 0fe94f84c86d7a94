use crate::report::{ComparisonPoint, KeyDrivers, PartnerShare};
use core_types::{RiskEngineResult, SectorDetail, SectorRiskOutput};

/// How many partners the share ranking keeps.
pub const TOP_PARTNER_SHARES: usize = 5;

/// The leaderboard, in the order the service ranked it. Never re-sorted here.
pub fn leaderboard(result: &RiskEngineResult) -> &[SectorRiskOutput] {
    &result.sectors
}

/// The headline sector: the service's first biggest mover, else its first sector.
pub fn biggest_mover(result: &RiskEngineResult) -> Option<&SectorRiskOutput> {
    result
        .biggest_movers
        .first()
        .or_else(|| result.sectors.first())
}

/// Largest `risk_delta` across `sectors`, or `None` when there are none.
pub fn largest_risk_delta(sectors: &[SectorRiskOutput]) -> Option<f64> {
    sectors.iter().map(|s| s.risk_delta).reduce(f64::max)
}

/// Sum of `affected_export_value`; a missing value counts as zero.
pub fn total_affected_export_value(sectors: &[SectorRiskOutput]) -> f64 {
    sectors
        .iter()
        .map(|s| s.affected_export_value.unwrap_or(0.0))
        .sum()
}

/// The sector's partners by descending share, keeping the service's order on
/// ties, cut to the top [`TOP_PARTNER_SHARES`].
pub fn partner_share_ranking(detail: &SectorDetail) -> Vec<PartnerShare> {
    let mut ranked: Vec<PartnerShare> = detail
        .partner_shares
        .iter()
        .map(|(partner, share)| PartnerShare {
            partner: partner.clone(),
            share: *share,
        })
        .collect();
    // `sort_by` is stable, which is what keeps ties in mapping order.
    ranked.sort_by(|a, b| b.share.total_cmp(&a.share));
    ranked.truncate(TOP_PARTNER_SHARES);
    ranked
}

/// The breakdown for the selected sector: the matching row's explainability when
/// the current result carries one, otherwise the illustrative placeholder.
pub fn select_key_drivers(
    result: Option<&RiskEngineResult>,
    selected_sector_id: Option<&str>,
) -> KeyDrivers {
    result
        .zip(selected_sector_id)
        .and_then(|(result, id)| result.sector(id))
        .and_then(|row| row.explainability)
        .map_or(KeyDrivers::Illustrative, KeyDrivers::Computed)
}

/// Pairs every scenario sector with its baseline risk, matched by id, in
/// scenario order.
pub fn risk_comparison(
    scenario: &RiskEngineResult,
    baseline: Option<&RiskEngineResult>,
) -> Vec<ComparisonPoint> {
    scenario
        .sectors
        .iter()
        .map(|row| ComparisonPoint {
            sector_id: row.sector_id.clone(),
            sector_name: row.sector_name.clone(),
            scenario_risk: row.risk_score,
            baseline_risk: baseline
                .and_then(|b| b.sector(&row.sector_id))
                .map(|b| b.risk_score),
        })
        .collect()
}
