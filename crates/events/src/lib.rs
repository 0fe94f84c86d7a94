//! # TariffShock Events
//!
//! This crate defines the events the orchestration core publishes as its state
//! changes, so a presentation layer can re-render without polling.
//!
//! As a Layer 0 crate, it depends only on `core-types`.

// Declare the modules that make up this crate.
pub mod error;
pub mod messages;

// Re-export the core types to provide a clean public API.
pub use error::EventsError;
pub use messages::SessionEvent;
