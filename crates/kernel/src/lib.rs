//! Kernel: character controller stepping and the session context that owns
//! the world grid and the character.
//!
//! # Invariants
//! - Horizontal moves are resolved one axis at a time, X before Z.
//! - The character never ends a step below eye height.
//! - A step with a degenerate time delta changes nothing.
//! - Given the same grid, config and inputs, replay produces identical state.

pub mod character;
pub mod config;
pub mod session;

pub use character::{CharacterController, CharacterState, CharacterView, StepReport};
pub use config::{ConfigError, ControllerConfig, SessionConfig};
pub use session::{Session, SessionEvent};

pub fn crate_info() -> &'static str {
    "shipment-kernel v0.1.0"
}
