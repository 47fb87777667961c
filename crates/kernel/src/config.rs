use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be {rule}, got {value}")]
    Invalid {
        field: &'static str,
        rule: &'static str,
        value: f32,
    },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Tuning constants for the character controller.
///
/// Units are world units and seconds. The defaults are the canonical set:
/// gravity 100, jump impulse 30, eye height 10, speed 60, no jump latch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Horizontal speed (units/second).
    pub speed: f32,
    /// Downward acceleration (units/second²).
    pub gravity: f32,
    /// Upward velocity set by a jump (units/second).
    pub jump_force: f32,
    /// Resting camera height above the ground plane.
    pub eye_height: f32,
    /// Longest time step integrated at once; larger deltas are clamped.
    pub max_dt: f32,
    /// When set, holding jump fires once; it must be released before the next jump.
    pub jump_latch: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed: 60.0,
            gravity: 100.0,
            jump_force: 30.0,
            eye_height: 10.0,
            max_dt: 0.25,
            jump_latch: false,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("speed", self.speed)?;
        non_negative("gravity", self.gravity)?;
        positive("jump_force", self.jump_force)?;
        positive("eye_height", self.eye_height)?;
        positive("max_dt", self.max_dt)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            rule: "positive and finite",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            rule: "non-negative and finite",
            value,
        })
    }
}

/// Everything needed to start a session besides the map itself.
///
/// ```yaml
/// cell_size: 5.0
/// spawn: [0.0, 0.0]
/// controller:
///   gravity: 100.0
///   jump_latch: true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Used for procedurally generated maps; map files carry their own.
    pub cell_size: f32,
    /// Spawn position on the ground plane, `[x, z]`.
    pub spawn: [f32; 2],
    pub controller: ControllerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cell_size: 5.0,
            spawn: [0.0, 0.0],
            controller: ControllerConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_yaml_str(&std::fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), "loaded session config");
        Ok(config)
    }

    pub fn spawn(&self) -> Vec2 {
        Vec2::new(self.spawn[0], self.spawn[1])
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("cell_size", self.cell_size)?;
        for value in self.spawn {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field: "spawn",
                    rule: "finite",
                    value,
                });
            }
        }
        self.controller.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_canonical() {
        let c = ControllerConfig::default();
        assert_eq!(c.gravity, 100.0);
        assert_eq!(c.eye_height, 10.0);
        assert_eq!(c.speed, 60.0);
        assert!(!c.jump_latch);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_eye_height() {
        let c = ControllerConfig {
            eye_height: 0.0,
            ..ControllerConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid {
                field: "eye_height",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_finite_gravity() {
        let c = ControllerConfig {
            gravity: f32::NAN,
            ..ControllerConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn zero_speed_and_gravity_are_allowed() {
        let c = ControllerConfig {
            speed: 0.0,
            gravity: 0.0,
            ..ControllerConfig::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let config =
            SessionConfig::from_yaml_str("spawn: [2.0, -3.0]\ncontroller:\n  jump_latch: true\n")
                .unwrap();
        assert_eq!(config.spawn(), Vec2::new(2.0, -3.0));
        assert_eq!(config.cell_size, 5.0);
        assert!(config.controller.jump_latch);
        assert_eq!(config.controller.gravity, 100.0);
    }

    #[test]
    fn yaml_with_invalid_values_is_rejected() {
        assert!(matches!(
            SessionConfig::from_yaml_str("cell_size: -1.0\n"),
            Err(ConfigError::Invalid {
                field: "cell_size",
                ..
            })
        ));
        assert!(matches!(
            SessionConfig::from_yaml_str("cell_size: [oops]\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.yaml");
        std::fs::write(&path, "controller:\n  speed: 12.5\n").unwrap();
        let config = SessionConfig::load(&path).unwrap();
        assert_eq!(config.controller.speed, 12.5);

        assert!(matches!(
            SessionConfig::load(dir.path().join("missing.yaml")),
            Err(ConfigError::Io(_))
        ));
    }
}
