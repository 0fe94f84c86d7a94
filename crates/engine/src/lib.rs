//! # TariffShock Engine
//!
//! The orchestration core of the dashboard. It owns the scenario and both result
//! slots, decides when results become stale, and coordinates the three independent
//! asynchronous sources: startup reference data, scenario/baseline runs, and
//! on-demand sector detail.
//!
//! ## Concurrency model
//!
//! A [`Dashboard`] is a cheap handle; clones share one state behind a
//! `tokio::sync::Mutex`. The lock is never held across a service call, so actions
//! can overlap freely. For runs and baselines the last response to arrive wins.
//! Sector detail is fenced by a generation token so only the latest selection
//! can land. After [`Dashboard::shutdown`] late responses are dropped untouched.

use api_client::ApiClient;
use events::SessionEvent;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, MutexGuard, broadcast};

pub mod error;
pub mod invalidation;
pub mod state;

mod detail;
mod reference;
mod runner;
mod store;

pub use error::EngineError;
pub use invalidation::InvalidationState;
pub use reference::sort_sector_options;
pub use state::{DashboardState, ReferenceData};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// State guarded by the dashboard's lock.
#[derive(Debug, Default)]
struct Inner {
    state: DashboardState,
    /// Bumped on every sector selection; a detail response only lands if its
    /// generation is still the latest.
    detail_generation: u64,
}

struct Shared {
    client: Arc<dyn ApiClient>,
    inner: Mutex<Inner>,
    alive: AtomicBool,
    events: broadcast::Sender<SessionEvent>,
}

/// Handle to one orchestration instance (one active view).
#[derive(Clone)]
pub struct Dashboard {
    shared: Arc<Shared>,
}

impl Dashboard {
    /// Creates a dashboard with the default scenario and nothing loaded.
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                client,
                inner: Mutex::new(Inner::default()),
                alive: AtomicBool::new(true),
                events,
            }),
        }
    }

    /// A read-only copy of the current state.
    pub async fn snapshot(&self) -> DashboardState {
        self.shared.inner.lock().await.state.clone()
    }

    /// Subscribes to state-change announcements.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }

    pub fn is_alive(&self) -> bool {
        self.shared.alive.load(Ordering::SeqCst)
    }

    /// Ends this instance's lifetime. Responses still in flight are discarded on
    /// arrival and further actions do nothing. The underlying requests are not
    /// cancelled.
    pub fn shutdown(&self) {
        if self.shared.alive.swap(false, Ordering::SeqCst) {
            tracing::info!("Dashboard shut down; late responses will be discarded.");
            self.publish(SessionEvent::ShutDown);
        }
    }

    fn client(&self) -> &dyn ApiClient {
        self.shared.client.as_ref()
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.shared.events.send(event);
    }

    /// Locks the state if this instance is still alive.
    async fn lock_alive(&self) -> Option<MutexGuard<'_, Inner>> {
        let guard = self.shared.inner.lock().await;
        if self.is_alive() {
            Some(guard)
        } else {
            tracing::debug!("Dropping state update after shutdown.");
            None
        }
    }
}
