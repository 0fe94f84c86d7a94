/// Decides whether replacing the scenario makes the loaded results stale.
///
/// Normally any change to the tariff, the partners or the sector filter clears
/// both result slots. The one exception is the baseline action: it stores its
/// result and then resets the tariff to zero, and that reset must not wipe the
/// result it just stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidationState {
    #[default]
    Idle,
    /// A baseline request is outstanding. Edits made meanwhile still invalidate.
    BaselineLoadInFlight,
    /// The next scenario replacement is the baseline's own tariff reset.
    SuppressNextInvalidation,
}

impl InvalidationState {
    pub fn begin_baseline_load(&mut self) {
        *self = InvalidationState::BaselineLoadInFlight;
    }

    /// Arms the one-shot suppression. Must be followed, in the same critical
    /// section, by the scenario replacement it is meant for.
    pub fn baseline_loaded(&mut self) {
        *self = InvalidationState::SuppressNextInvalidation;
    }

    pub fn baseline_failed(&mut self) {
        if *self == InvalidationState::BaselineLoadInFlight {
            *self = InvalidationState::Idle;
        }
    }

    /// Returns `true` when the results must be cleared.
    ///
    /// An armed suppression is consumed here whether or not the inputs changed,
    /// so it can never swallow a later, unrelated edit.
    pub fn on_scenario_replaced(&mut self, inputs_changed: bool) -> bool {
        match self {
            InvalidationState::SuppressNextInvalidation => {
                *self = InvalidationState::Idle;
                false
            }
            InvalidationState::Idle | InvalidationState::BaselineLoadInFlight => inputs_changed,
        }
    }
}
