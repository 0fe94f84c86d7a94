use crate::Dashboard;
use crate::state::ReferenceData;
use core_types::{SectorOption, SectorSummary};
use events::SessionEvent;
use tokio::task::JoinError;

/// Orders sectors for selection controls: descending `total_exports`, a missing
/// value counting as zero, ties kept in service order.
pub fn sort_sector_options(sectors: Vec<SectorSummary>) -> Vec<SectorOption> {
    let mut sorted = sectors;
    sorted.sort_by(|a, b| {
        let a = a.total_exports.unwrap_or(0.0);
        let b = b.total_exports.unwrap_or(0.0);
        b.total_cmp(&a)
    });
    sorted.into_iter().map(SectorOption::from).collect()
}

impl Dashboard {
    /// Loads health, service config, partners and sectors concurrently.
    ///
    /// Each source falls back on its own (absent config, empty lists) without
    /// surfacing an error. Only a failure of the combined load itself sets the
    /// banner message.
    #[tracing::instrument(skip(self))]
    pub async fn initialize(&self) {
        {
            let Some(mut inner) = self.lock_alive().await else {
                return;
            };
            inner.state.initial_loading = true;
            inner.state.error = None;
        }

        let outcome = self.fetch_reference_data().await;

        let Some(mut inner) = self.lock_alive().await else {
            return;
        };
        match outcome {
            Ok(reference) => {
                tracing::info!(
                    partners = reference.partners.len(),
                    sectors = reference.sectors.len(),
                    config = reference.config.is_some(),
                    "Reference data loaded."
                );
                self.publish(SessionEvent::ReferenceDataLoaded {
                    partners: reference.partners.len(),
                    sectors: reference.sectors.len(),
                    config_available: reference.config.is_some(),
                });
                inner.state.reference = reference;
            }
            Err(e) => {
                tracing::error!(error = %e, "Reference data load failed.");
                inner.state.error = Some(format!("Failed to load data: {e}"));
            }
        }
        inner.state.initial_loading = false;
    }

    async fn fetch_reference_data(&self) -> Result<ReferenceData, JoinError> {
        let client = self.shared.client.clone();
        let health = tokio::spawn(async move {
            client
                .health()
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "Health check unavailable."))
                .ok()
        });
        let client = self.shared.client.clone();
        let config = tokio::spawn(async move {
            client
                .config()
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "Service config unavailable."))
                .ok()
        });
        let client = self.shared.client.clone();
        let partners = tokio::spawn(async move {
            client
                .partners()
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "Partner list unavailable."))
                .unwrap_or_default()
        });
        let client = self.shared.client.clone();
        let sectors = tokio::spawn(async move {
            client
                .sectors()
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "Sector list unavailable."))
                .unwrap_or_default()
        });

        let (health, config, partners, sectors) = tokio::try_join!(health, config, partners, sectors)?;

        Ok(ReferenceData {
            health,
            config,
            partners: partners.partners,
            partners_note: partners.note,
            sectors: sort_sector_options(sectors.sectors),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, total_exports: Option<f64>) -> SectorSummary {
        SectorSummary {
            sector_id: id.to_string(),
            sector_name: format!("Sector {id}"),
            total_exports,
            top_partner: None,
            top_partner_share: None,
        }
    }

    #[test]
    fn sectors_sort_descending_with_missing_as_zero() {
        let sorted = sort_sector_options(vec![
            summary("a", Some(10.0)),
            summary("b", None),
            summary("c", Some(30.0)),
            summary("d", Some(0.0)),
            summary("e", Some(10.0)),
        ]);
        let ids: Vec<&str> = sorted.iter().map(|s| s.sector_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "e", "b", "d"]);
    }
}
