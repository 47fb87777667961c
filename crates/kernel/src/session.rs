use glam::Vec2;
use serde::{Deserialize, Serialize};
use shipment_common::Axis;
use shipment_grid::WorldGrid;
use shipment_input::FrameInput;

use crate::character::{CharacterController, CharacterState, CharacterView, StepReport};
use crate::config::{ConfigError, ControllerConfig, SessionConfig};

/// A record of something that happened during a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The simulation advanced to `tick`.
    Stepped { tick: u64 },
    /// Horizontal movement on `axis` was reverted by a solid column.
    Blocked { tick: u64, axis: Axis },
    /// The character touched the ground after being airborne.
    Landed { tick: u64 },
    Jumped { tick: u64 },
    /// A frame with an unusable time delta was ignored.
    Rejected { dt: f32 },
}

/// The running game context: owns the world grid, the controller and the
/// character it moves.
///
/// The grid is never mutated after the session is created. All character
/// changes flow through [`Session::advance`].
#[derive(Debug, Clone)]
pub struct Session {
    grid: WorldGrid,
    controller: CharacterController,
    character: CharacterState,
    tick: u64,
    /// Append-only log of step events.
    events: Vec<SessionEvent>,
}

impl Session {
    /// Start a session with the character standing at `spawn` (`x`, `z`).
    pub fn new(grid: WorldGrid, config: ControllerConfig, spawn: Vec2) -> Result<Self, ConfigError> {
        let controller = CharacterController::new(config)?;
        let character = CharacterState::standing(spawn, config.eye_height);
        if grid.is_solid(spawn.x, spawn.y) {
            tracing::warn!(x = spawn.x, z = spawn.y, "spawning inside a solid column");
        }
        tracing::info!(
            solid = grid.solid_count(),
            cell_size = grid.cell_size(),
            x = spawn.x,
            z = spawn.y,
            "session started"
        );
        Ok(Self {
            grid,
            controller,
            character,
            tick: 0,
            events: Vec::new(),
        })
    }

    pub fn from_config(grid: WorldGrid, config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(grid, config.controller, config.spawn())
    }

    /// Number of accepted steps so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    pub fn config(&self) -> &ControllerConfig {
        self.controller.config()
    }

    pub fn character(&self) -> &CharacterState {
        &self.character
    }

    /// Read-only snapshot for the presentation layer.
    pub fn view(&self) -> CharacterView {
        self.character.view()
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the character by one frame of input.
    pub fn advance(&mut self, input: &FrameInput) -> StepReport {
        let _span = tracing::trace_span!("session_advance", tick = self.tick).entered();
        let report = self
            .controller
            .step(&mut self.character, input, &self.grid);

        if report.rejected {
            self.events.push(SessionEvent::Rejected { dt: input.dt });
            return report;
        }

        self.tick += 1;
        let tick = self.tick;
        self.events.push(SessionEvent::Stepped { tick });
        for axis in report.blocked_axes() {
            self.events.push(SessionEvent::Blocked { tick, axis });
        }
        if report.landed {
            tracing::debug!(tick, "landed");
            self.events.push(SessionEvent::Landed { tick });
        }
        if report.jumped {
            tracing::debug!(tick, "jumped");
            self.events.push(SessionEvent::Jumped { tick });
        }
        report
    }

    /// Feed a sequence of frames, returning the final view.
    pub fn run<'a>(&mut self, inputs: impl IntoIterator<Item = &'a FrameInput>) -> CharacterView {
        for input in inputs {
            self.advance(input);
        }
        self.view()
    }

    /// Re-simulate a recorded input sequence from a fresh spawn.
    pub fn replay(
        grid: WorldGrid,
        config: ControllerConfig,
        spawn: Vec2,
        inputs: &[FrameInput],
    ) -> Result<Self, ConfigError> {
        let mut session = Self::new(grid, config, spawn)?;
        session.run(inputs);
        Ok(session)
    }

    /// Deterministic hash of the tick and character state, for comparing runs.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let c = &self.character;
        mix(&mut h, &self.tick.to_le_bytes());
        mix(&mut h, &c.position.x.to_bits().to_le_bytes());
        mix(&mut h, &c.position.y.to_bits().to_le_bytes());
        mix(&mut h, &c.position.z.to_bits().to_le_bytes());
        mix(&mut h, &c.vertical_velocity.to_bits().to_le_bytes());
        mix(&mut h, &[c.grounded as u8]);
        h
    }
}
