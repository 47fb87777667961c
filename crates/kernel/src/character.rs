use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use shipment_common::{Axis, SolidQuery};
use shipment_input::FrameInput;

use crate::config::{ConfigError, ControllerConfig};

/// Mutable per-character simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    /// Eye position; `y` is vertical.
    pub position: Vec3,
    pub vertical_velocity: f32,
    /// At or below eye height after the last vertical integration.
    pub grounded: bool,
    /// Jump input from the previous step, used by the jump latch.
    jump_held: bool,
}

impl CharacterState {
    /// A character at `position` with no vertical velocity.
    pub fn at(position: Vec3, eye_height: f32) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            grounded: position.y <= eye_height,
            jump_held: false,
        }
    }

    /// A character standing on the ground plane at `(x, z)`.
    pub fn standing(spawn: Vec2, eye_height: f32) -> Self {
        Self::at(Vec3::new(spawn.x, eye_height, spawn.y), eye_height)
    }

    /// Read-only snapshot for presentation.
    pub fn view(&self) -> CharacterView {
        CharacterView {
            position: self.position,
            grounded: self.grounded,
        }
    }
}

/// What a renderer or camera may read about the character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterView {
    pub position: Vec3,
    pub grounded: bool,
}

/// Outcome of a single controller step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StepReport {
    /// Time actually integrated; zero when the step was rejected.
    pub dt: f32,
    /// The time delta was zero, negative or not finite; nothing changed.
    pub rejected: bool,
    pub blocked_x: bool,
    pub blocked_z: bool,
    /// Touched the ground this step after being airborne.
    pub landed: bool,
    pub jumped: bool,
    /// Net position change over the step.
    pub displacement: Vec3,
}

impl StepReport {
    fn rejected() -> Self {
        Self {
            rejected: true,
            ..Self::default()
        }
    }

    /// Axes whose movement was reverted, in resolution order.
    pub fn blocked_axes(&self) -> impl Iterator<Item = Axis> + use<> {
        let x = self.blocked_x.then_some(Axis::X);
        let z = self.blocked_z.then_some(Axis::Z);
        x.into_iter().chain(z)
    }
}

/// Advances a [`CharacterState`] through one frame of gravity, input and
/// grid collision.
///
/// Horizontal movement is resolved per axis, X first: a move that would end
/// in a solid column is reverted on that axis only, which lets the character
/// slide along walls. Vertical motion only ever collides with the ground plane.
///
/// # Example
///
/// ```ignore
/// let controller = CharacterController::new(ControllerConfig::default())?;
/// let mut state = CharacterState::standing(Vec2::ZERO, 10.0);
///
/// // Each frame:
/// controller.step(&mut state, &input, &grid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CharacterController {
    config: ControllerConfig,
}

impl CharacterController {
    /// Build a controller, rejecting tunings that would feed non-finite
    /// values into the integration.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Time delta to integrate, or `None` if the frame must be ignored.
    pub fn effective_dt(&self, dt: f32) -> Option<f32> {
        if dt.is_finite() && dt > 0.0 {
            Some(dt.min(self.config.max_dt))
        } else {
            None
        }
    }

    pub fn step(
        &self,
        state: &mut CharacterState,
        input: &FrameInput,
        world: &impl SolidQuery,
    ) -> StepReport {
        let Some(dt) = self.effective_dt(input.dt) else {
            tracing::debug!(dt = input.dt, "ignoring degenerate time step");
            return StepReport::rejected();
        };
        let cfg = &self.config;
        let start = state.position;
        let was_grounded = state.grounded;
        let mut report = StepReport {
            dt,
            ..StepReport::default()
        };

        state.vertical_velocity -= cfg.gravity * dt;

        let dir = input.direction();
        let move_x = dir.x * cfg.speed * dt;
        let move_z = dir.y * cfg.speed * dt;

        // X alone, then Z from wherever X left us.
        if move_x != 0.0 {
            let prev = state.position.x;
            state.position.x += move_x;
            if world.is_solid(state.position.x, state.position.z) {
                state.position.x = prev;
                report.blocked_x = true;
            }
        }
        if move_z != 0.0 {
            let prev = state.position.z;
            state.position.z += move_z;
            if world.is_solid(state.position.x, state.position.z) {
                state.position.z = prev;
                report.blocked_z = true;
            }
        }

        state.position.y += state.vertical_velocity * dt;
        if state.position.y < cfg.eye_height {
            state.vertical_velocity = 0.0;
            state.position.y = cfg.eye_height;
        }
        state.grounded = state.position.y <= cfg.eye_height;

        let jump_pressed = input.jump && !(cfg.jump_latch && state.jump_held);
        if state.grounded && jump_pressed {
            state.vertical_velocity = cfg.jump_force;
            report.jumped = true;
        }
        state.jump_held = input.jump;

        report.landed = state.grounded && !was_grounded;
        report.displacement = state.position - start;

        if report.blocked_x || report.blocked_z {
            tracing::debug!(
                x = state.position.x,
                z = state.position.z,
                blocked_x = report.blocked_x,
                blocked_z = report.blocked_z,
                "horizontal move blocked"
            );
        }
        tracing::trace!(
            dt,
            x = state.position.x,
            y = state.position.y,
            z = state.position.z,
            vy = state.vertical_velocity,
            grounded = state.grounded,
            "character step"
        );
        report
    }
}
