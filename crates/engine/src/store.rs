use crate::error::EngineError;
use crate::{Dashboard, Inner};
use core_types::{Scenario, ScenarioPreset, find_preset};
use events::SessionEvent;

impl Dashboard {
    /// Replaces the scenario. There is no partial-field merge here; callers that
    /// want one use [`Dashboard::update_scenario`].
    ///
    /// Changing the tariff, the partners or the sector filter clears both results.
    pub async fn set_scenario(&self, next: Scenario) {
        self.update_scenario(move |_| next).await;
    }

    /// Builds the next scenario from the current one and replaces it.
    pub async fn update_scenario<F>(&self, edit: F)
    where
        F: FnOnce(&Scenario) -> Scenario,
    {
        let Some(mut inner) = self.lock_alive().await else {
            return;
        };
        let next = edit(&inner.state.scenario);
        self.replace_scenario(&mut inner, next);
    }

    /// Replaces tariff, partners (with display names) and sector filter from a
    /// preset, then clears the banner message.
    pub async fn apply_preset(&self, preset: &ScenarioPreset) {
        tracing::info!(preset = preset.id, "Applying scenario preset.");
        let Some(mut inner) = self.lock_alive().await else {
            return;
        };
        self.replace_scenario(&mut inner, Scenario::from_preset(preset));
        inner.state.error = None;
    }

    /// [`Dashboard::apply_preset`] by preset identifier.
    pub async fn apply_preset_by_id(&self, id: &str) -> Result<(), EngineError> {
        let preset = find_preset(id)?;
        if !self.is_alive() {
            return Err(EngineError::ShutDown);
        }
        self.apply_preset(preset).await;
        Ok(())
    }

    /// The single place a scenario is swapped in, so the invalidation rule and
    /// its announcements cannot be bypassed.
    pub(crate) fn replace_scenario(&self, inner: &mut Inner, next: Scenario) {
        let cleared = inner.state.replace_scenario(next.clone());
        self.publish(SessionEvent::ScenarioChanged(next));
        if cleared {
            tracing::debug!("Scenario inputs changed; cleared scenario and baseline results.");
            self.publish(SessionEvent::ResultsCleared);
        }
    }
}
