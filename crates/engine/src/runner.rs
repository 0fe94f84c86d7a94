use crate::Dashboard;
use events::SessionEvent;

const RUN_FALLBACK_MESSAGE: &str = "Network error";
const BASELINE_FALLBACK_MESSAGE: &str = "Failed to load baseline";

impl Dashboard {
    /// Submits the current scenario and stores the response as the scenario result.
    ///
    /// On failure the banner shows the service's message (or a generic one) and
    /// both result slots are left as they were. There is no request fencing: if
    /// two runs overlap, whichever response arrives last is kept.
    #[tracing::instrument(skip(self))]
    pub async fn run_scenario(&self) {
        let request = {
            let Some(mut inner) = self.lock_alive().await else {
                return;
            };
            inner.state.error = None;
            inner.state.is_running = true;
            inner.state.scenario.to_request()
        };
        self.publish(SessionEvent::RunStarted);
        tracing::info!(
            tariff_percent = request.tariff_percent,
            partners = ?request.target_partners,
            sector_filter = ?request.sector_filter,
            "Running scenario."
        );

        let outcome = self.client().run_scenario(&request).await;

        let Some(mut inner) = self.lock_alive().await else {
            return;
        };
        match outcome {
            Ok(result) => {
                tracing::info!(sectors = result.sectors.len(), "Scenario result received.");
                inner.state.scenario_result = Some(result);
                self.publish(SessionEvent::ScenarioResultReady);
            }
            Err(e) => {
                let message = e.user_message(RUN_FALLBACK_MESSAGE);
                tracing::warn!(error = %e, "Scenario run failed.");
                inner.state.error = Some(message.clone());
                self.publish(SessionEvent::RunFailed { message });
            }
        }
        inner.state.is_running = false;
    }

    /// Loads the zero-tariff baseline, scoped to the current sector filter.
    ///
    /// On success the baseline becomes both the baseline and the current result,
    /// and the scenario's tariff is reset to zero without clearing what was just
    /// stored.
    #[tracing::instrument(skip(self))]
    pub async fn load_baseline(&self) {
        let sectors = {
            let Some(mut inner) = self.lock_alive().await else {
                return;
            };
            inner.state.error = None;
            inner.state.is_running = true;
            inner.state.invalidation.begin_baseline_load();
            inner
                .state
                .scenario
                .sector_filter_for_request()
                .map(<[String]>::to_vec)
        };
        self.publish(SessionEvent::RunStarted);
        tracing::info!(sectors = ?sectors, "Loading baseline.");

        let outcome = self.client().baseline(sectors.as_deref()).await;

        let Some(mut inner) = self.lock_alive().await else {
            return;
        };
        match outcome {
            Ok(result) => {
                tracing::info!(sectors = result.sectors.len(), "Baseline received.");
                inner.state.invalidation.baseline_loaded();
                inner.state.baseline_result = Some(result.clone());
                inner.state.scenario_result = Some(result);
                let reset = inner.state.scenario.with_tariff(0.0);
                self.replace_scenario(&mut inner, reset);
                self.publish(SessionEvent::BaselineReady);
            }
            Err(e) => {
                let message = e.user_message(BASELINE_FALLBACK_MESSAGE);
                tracing::warn!(error = %e, "Baseline load failed.");
                inner.state.invalidation.baseline_failed();
                inner.state.error = Some(message.clone());
                self.publish(SessionEvent::RunFailed { message });
            }
        }
        inner.state.is_running = false;
    }
}
