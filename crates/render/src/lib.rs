//! Rendering Adapter: renderer-agnostic presentation of the grid and character.
//!
//! # Invariants
//! - Renderers read a grid and a character snapshot; they cannot mutate either.
//!
//! # Workaround
//! Only a top-down text renderer exists. It stands in for a 3D scene so the
//! headless CLI and tests can see what the controller is doing.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "shipment-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
