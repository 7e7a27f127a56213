use std::fmt;
use std::path::PathBuf;

use pacer_engine::device::GpuInit;
use pacer_engine::window::RuntimeConfig;

/// Motion constants, expressed per second.
///
/// Acceleration and deceleration were originally tuned per 60 FPS frame and
/// are scaled by 60 here.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tuning {
    /// Sprite and teapot depth speed, world units per second.
    pub walk_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// Multiplied by the frame delta to get the per-frame velocity cap.
    pub top_speed: f32,
    /// Teapot rotation, degrees per second.
    pub spin_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            walk_speed: 0.5,
            acceleration: 0.02 * 60.0,
            deceleration: 0.015 * 60.0,
            top_speed: 180.0,
            spin_rate: 45.0,
        }
    }
}

/// Rejected tuning value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite { field: &'static str, value: f32 },
    Negative { field: &'static str, value: f32 },
    /// The ball would never come to rest from a released key.
    DecelerationExceedsAcceleration { deceleration: f32, acceleration: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field, value } => write!(f, "{field} is not finite ({value})"),
            ConfigError::Negative { field, value } => write!(f, "{field} is negative ({value})"),
            ConfigError::DecelerationExceedsAcceleration { deceleration, acceleration } => write!(
                f,
                "deceleration {deceleration} exceeds acceleration {acceleration}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("walk_speed", self.walk_speed),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("top_speed", self.top_speed),
            ("spin_rate", self.spin_rate),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            // Spin may run backwards; speeds may not.
            if value < 0.0 && field != "spin_rate" {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.deceleration > self.acceleration {
            return Err(ConfigError::DecelerationExceedsAcceleration {
                deceleration: self.deceleration,
                acceleration: self.acceleration,
            });
        }
        Ok(())
    }
}

/// Everything the demo needs before the window opens.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub runtime: RuntimeConfig,
    pub gpu: GpuInit,
    pub sprite_path: PathBuf,
    /// The sprite is always loaded; this only controls whether it is drawn.
    pub draw_sprite: bool,
    pub tuning: Tuning,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            gpu: GpuInit::default(),
            sprite_path: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/win98.png")),
            draw_sprite: true,
            tuning: Tuning::default(),
        }
    }
}

impl DemoConfig {
    /// Defaults, with the sprite path replaced by the first argument if present.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().next() {
            config.sprite_path = PathBuf::from(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_is_valid() {
        let t = Tuning::default();
        assert!(t.validate().is_ok());
        assert!((t.acceleration - 1.2).abs() < 1e-6);
        assert!((t.deceleration - 0.9).abs() < 1e-6);
    }

    #[test]
    fn deceleration_above_acceleration_is_rejected() {
        let t = Tuning { deceleration: 2.0, ..Tuning::default() };
        assert!(matches!(
            t.validate(),
            Err(ConfigError::DecelerationExceedsAcceleration { .. })
        ));
    }

    #[test]
    fn non_finite_and_negative_are_rejected() {
        let t = Tuning { top_speed: f32::INFINITY, ..Tuning::default() };
        assert_eq!(
            t.validate(),
            Err(ConfigError::NonFinite { field: "top_speed", value: f32::INFINITY })
        );

        let t = Tuning { walk_speed: -1.0, ..Tuning::default() };
        assert_eq!(t.validate(), Err(ConfigError::Negative { field: "walk_speed", value: -1.0 }));
    }

    #[test]
    fn reverse_spin_is_allowed() {
        let t = Tuning { spin_rate: -45.0, ..Tuning::default() };
        assert!(t.validate().is_ok());
    }

    #[test]
    fn first_argument_overrides_sprite_path() {
        let config = DemoConfig::from_args(vec!["other.png".to_string(), "ignored".to_string()]);
        assert_eq!(config.sprite_path, PathBuf::from("other.png"));

        let config = DemoConfig::from_args(Vec::new());
        assert!(config.sprite_path.ends_with("assets/win98.png"));
    }
}
