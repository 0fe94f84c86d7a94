use crate::Dashboard;
use events::SessionEvent;

impl Dashboard {
    /// Selects a sector and loads its detail profile.
    ///
    /// The previous detail is dropped immediately so a different sector's
    /// profile is never on screen. Only the most recent selection's response is
    /// stored, whatever order responses arrive in. A failed lookup degrades to
    /// "no detail" and never touches the banner message.
    #[tracing::instrument(skip(self))]
    pub async fn select_sector(&self, sector_id: String) {
        let generation = {
            let Some(mut inner) = self.lock_alive().await else {
                return;
            };
            inner.detail_generation += 1;
            inner.state.selected_sector_id = Some(sector_id.clone());
            inner.state.sector_detail = None;
            inner.state.sector_detail_loading = true;
            inner.detail_generation
        };
        self.publish(SessionEvent::SectorSelected {
            sector_id: sector_id.clone(),
        });

        let outcome = self.client().sector(&sector_id).await;

        let Some(mut inner) = self.lock_alive().await else {
            return;
        };
        if inner.detail_generation != generation {
            tracing::debug!("Discarding detail for a superseded selection.");
            return;
        }
        match outcome {
            Ok(detail) => {
                inner.state.sector_detail = Some(detail);
                self.publish(SessionEvent::SectorDetailReady { sector_id });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sector detail unavailable.");
                inner.state.sector_detail = None;
                self.publish(SessionEvent::SectorDetailUnavailable { sector_id });
            }
        }
        inner.state.sector_detail_loading = false;
    }
}
