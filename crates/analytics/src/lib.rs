//! # TariffShock Analytics
//!
//! Secondary analytics derived from a risk-service response: leaderboard, biggest
//! mover, KPI aggregates, partner-share ranking and the explanation panel.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of HTTP or of
//!   the orchestration state. It depends only on `core-types` (Layer 0).
//! - **Recomputed, never stored:** Every function reads the current snapshot and
//!   returns a fresh value. Nothing here caches; the inputs are tens of sectors.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: assembles the KPI strip and the explanation panel.
//! - `metrics`: the individual derivations.
//! - `format`: display formatting shared by every renderer.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod format;
pub mod metrics;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, ExplanationInputs};
pub use report::{ComparisonPoint, DriverRow, ExplanationReport, KeyDrivers, KpiReport, KpiTile, PartnerShare};
