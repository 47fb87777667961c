//! Developer Tooling: session inspector and machine-readable summaries.
//!
//! # Invariants
//! - Tools only read session state.

mod inspector;

pub use inspector::{GridSummary, SessionInspector, SessionSummary};

pub fn crate_info() -> &'static str {
    "shipment-tools v0.1.0"
}
