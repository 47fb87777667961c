use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Directional keys held this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub const NONE: Self = Self {
        forward: false,
        back: false,
        left: false,
        right: false,
    };

    pub fn forward() -> Self {
        Self {
            forward: true,
            ..Self::NONE
        }
    }

    pub fn back() -> Self {
        Self {
            back: true,
            ..Self::NONE
        }
    }

    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::NONE
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Self::NONE
        }
    }

    /// Combine two intents, holding every key held in either.
    pub fn and(self, other: Self) -> Self {
        Self {
            forward: self.forward || other.forward,
            back: self.back || other.back,
            left: self.left || other.left,
            right: self.right || other.right,
        }
    }

    /// Net `(strafe, advance)` in `{-1, 0, 1}`: right and forward are positive.
    pub fn axes(&self) -> (i8, i8) {
        let strafe = self.right as i8 - self.left as i8;
        let advance = self.forward as i8 - self.back as i8;
        (strafe, advance)
    }

    pub fn is_idle(&self) -> bool {
        self.axes() == (0, 0)
    }

    /// Unit ground-plane direction `(x, z)` for a view yaw in radians,
    /// or zero when there is no net intent.
    ///
    /// At yaw 0 forward is -Z and right is +X; positive yaw turns left
    /// (counter-clockwise seen from above).
    pub fn direction(&self, yaw: f32) -> Vec2 {
        let (strafe, advance) = self.axes();
        if (strafe, advance) == (0, 0) {
            return Vec2::ZERO;
        }
        let yaw = if yaw.is_finite() { yaw } else { 0.0 };
        let (sin, cos) = yaw.sin_cos();
        let forward = Vec2::new(-sin, -cos);
        let right = Vec2::new(cos, -sin);
        (right * strafe as f32 + forward * advance as f32).normalize_or_zero()
    }
}

/// Everything the controller needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// Elapsed time in seconds.
    pub dt: f32,
    pub intent: MoveIntent,
    pub jump: bool,
    /// View yaw in radians.
    #[serde(default)]
    pub yaw: f32,
}

impl FrameInput {
    pub fn new(dt: f32, intent: MoveIntent) -> Self {
        Self {
            dt,
            intent,
            jump: false,
            yaw: 0.0,
        }
    }

    /// A frame with no input at all.
    pub fn idle(dt: f32) -> Self {
        Self::new(dt, MoveIntent::NONE)
    }

    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    /// Unit movement direction for this frame.
    pub fn direction(&self) -> Vec2 {
        self.intent.direction(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn no_keys_no_direction() {
        assert_eq!(MoveIntent::NONE.direction(0.0), Vec2::ZERO);
        assert!(MoveIntent::NONE.is_idle());
    }

    #[test]
    fn opposite_keys_cancel() {
        let intent = MoveIntent::forward().and(MoveIntent::back());
        assert!(intent.is_idle());
        assert_eq!(intent.direction(0.3), Vec2::ZERO);

        let strafe = MoveIntent::left().and(MoveIntent::right());
        assert_eq!(strafe.direction(0.0), Vec2::ZERO);
    }

    #[test]
    fn cardinal_directions_at_zero_yaw() {
        assert!(approx(MoveIntent::forward().direction(0.0), Vec2::new(0.0, -1.0)));
        assert!(approx(MoveIntent::back().direction(0.0), Vec2::new(0.0, 1.0)));
        assert!(approx(MoveIntent::right().direction(0.0), Vec2::new(1.0, 0.0)));
        assert!(approx(MoveIntent::left().direction(0.0), Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn diagonal_is_normalized() {
        let d = MoveIntent::forward()
            .and(MoveIntent::right())
            .direction(0.0);
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!(d.x > 0.0 && d.y < 0.0);
        assert!((d.x - d.y.abs()).abs() < 1e-6);
    }

    #[test]
    fn yaw_rotates_forward() {
        // Turning a quarter left makes forward point along -X.
        let d = MoveIntent::forward().direction(FRAC_PI_2);
        assert!(approx(d, Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn non_finite_yaw_falls_back_to_zero() {
        let d = MoveIntent::right().direction(f32::NAN);
        assert!(approx(d, Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn frame_input_builders() {
        let input = FrameInput::new(0.05, MoveIntent::right())
            .with_jump(true)
            .with_yaw(0.0);
        assert!(input.jump);
        assert!(approx(input.direction(), Vec2::X));
        assert_eq!(FrameInput::idle(0.1).direction(), Vec2::ZERO);
    }
}
