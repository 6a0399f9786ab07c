//! VerboCare Triage — rule-based triage classification and case
//! lifecycle management for voice-first community healthcare.
//!
//! The crate is organized in layers:
//! - [`models`] — domain entities and closed string-backed enums
//! - [`db`] — SQLite schema, migrations and the repository layer
//! - [`triage`] — the keyword classifier behind the [`triage::Classifier`] seam
//! - [`lifecycle`] — case orchestration: create, retriage, assign, message
//!
//! Transport (HTTP, CLI) and authentication live outside this crate; the
//! lifecycle manager receives an already-resolved [`models::Actor`].

pub mod config;
pub mod db;
pub mod lifecycle;
pub mod models;
pub mod triage;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Honors `RUST_LOG` when set,
/// otherwise falls back to the crate default. Safe to call more than
/// once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
