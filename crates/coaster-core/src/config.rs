//! Layered ride configuration
//!
//! Config is resolved with three layers of precedence (highest wins):
//! 1. Environment variables: `COASTER_TILT_MODE`, `COASTER_TICK_MS`
//! 2. Project file: the `--config` path, or `coaster.toml` in the working directory
//! 3. Built-in defaults
//!
//! Every field has a default, so partial files are valid. The path itself is
//! not configurable here; control points come from a `ControlPointSource`.

use crate::speed::{DEFAULT_WORK_MARGIN, GRAVITY};
use crate::tilt::TiltMode;
use crate::{CoasterError, Color, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when no path is given
pub const PROJECT_CONFIG_FILE: &str = "coaster.toml";

pub const ENV_TILT_MODE: &str = "COASTER_TILT_MODE";
pub const ENV_TICK_MS: &str = "COASTER_TICK_MS";

/// Smallest accepted parameter step for the animation and the track sweep
pub const MIN_STEP: f32 = 1e-4;

/// Tick timing and banking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Milliseconds between animation ticks
    pub tick_interval_ms: u64,
    /// Path parameter advance per tick
    pub parameter_step: f32,
    /// Orbit camera angle advance per tick, radians
    pub orbit_step: f32,
    pub tilt_mode: TiltMode,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 33,
            parameter_step: 0.05,
            orbit_step: 0.01,
            tilt_mode: TiltMode::Full,
        }
    }
}

/// Rail and support geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Path parameter step between rail cross-sections
    pub sample_step: f32,
    /// Sideways shift of the secondary rails, in main-rail half-widths
    pub rail_shift_right: f32,
    /// Upward shift of the secondary rails, in main-rail half-heights
    pub rail_shift_up: f32,
    /// Height the support columns reach down to
    pub support_floor: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            sample_step: 0.01,
            rail_shift_right: 2.0,
            rail_shift_up: 2.0,
            support_floor: -5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    /// Energy added above the crest so the car never stalls
    pub work_margin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            work_margin: DEFAULT_WORK_MARGIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye height above the rail in ride view
    pub ride_lift: f32,
    pub orbit_radius: f32,
    pub orbit_height: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            ride_lift: 3.0,
            orbit_radius: 100.0,
            orbit_height: 20.0,
            fov: 60.0,
            near: 0.5,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Coaster".to_string(),
            width: 500,
            height: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub main_rail: Color,
    pub side_rail: Color,
    pub support: Color,
    pub ground: Color,
    pub sky: Color,
    pub ceiling: Color,
    pub background: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            main_rail: Color::rgb(0.0, 0.6, 1.0),
            side_rail: Color::rgb(1.0, 0.0, 0.8),
            support: Color::BLACK,
            ground: Color::rgb(0.2, 0.7, 0.33),
            sky: Color::rgb(0.3, 0.4, 0.55),
            ceiling: Color::rgb(0.3, 0.4, 0.7),
            background: Color::BLACK,
        }
    }
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideConfig {
    pub animation: AnimationConfig,
    pub track: TrackConfig,
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub window: WindowConfig,
    pub colors: ColorConfig,
}

impl RideConfig {
    /// Load config with layered precedence: defaults < project file < env vars.
    ///
    /// An explicit path must exist; the implicit `coaster.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CoasterError::ConfigNotFound(path.display().to_string()));
                }
                Self::load_file(path)?
            }
            None => {
                let local = PathBuf::from(PROJECT_CONFIG_FILE);
                if local.exists() {
                    Self::load_file(&local)?
                } else {
                    tracing::debug!("no {PROJECT_CONFIG_FILE} found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load a single file without env overrides or validation
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "loaded ride config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply environment-style overrides through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(mode) = lookup(ENV_TILT_MODE) {
            self.animation.tilt_mode = mode.parse()?;
            tracing::debug!(mode = %self.animation.tilt_mode, "tilt mode overridden from env");
        }
        if let Some(ms) = lookup(ENV_TICK_MS) {
            self.animation.tick_interval_ms = ms.trim().parse().map_err(|_| {
                CoasterError::InvalidConfig(format!("{ENV_TICK_MS} must be an integer, got '{ms}'"))
            })?;
        }
        Ok(())
    }

    /// Reject values the ride loop cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("animation.parameter_step", self.animation.parameter_step),
            ("track.sample_step", self.track.sample_step),
            ("physics.gravity", self.physics.gravity),
            ("camera.fov", self.camera.fov),
            ("camera.near", self.camera.near),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(CoasterError::InvalidConfig(format!(
                    "{field} must be positive, got {value}"
                )));
            }
        }
        let steps = [
            ("animation.parameter_step", self.animation.parameter_step),
            ("track.sample_step", self.track.sample_step),
        ];
        for (field, value) in steps {
            if value < MIN_STEP {
                return Err(CoasterError::InvalidConfig(format!(
                    "{field} must be at least {MIN_STEP}, got {value}"
                )));
            }
        }
        if self.animation.tick_interval_ms == 0 {
            return Err(CoasterError::InvalidConfig(
                "animation.tick_interval_ms must be at least 1".to_string(),
            ));
        }
        if !(self.physics.work_margin >= 0.0 && self.physics.work_margin.is_finite()) {
            return Err(CoasterError::InvalidConfig(format!(
                "physics.work_margin must be finite and non-negative, got {}",
                self.physics.work_margin
            )));
        }
        if !(self.camera.far > self.camera.near && self.camera.far.is_finite()) {
            return Err(CoasterError::InvalidConfig(format!(
                "camera.far ({}) must exceed camera.near ({})",
                self.camera.far, self.camera.near
            )));
        }
        if self.camera.fov >= 180.0 {
            return Err(CoasterError::InvalidConfig(format!(
                "camera.fov must be below 180 degrees, got {}",
                self.camera.fov
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.animation.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "coaster_config_test_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_match_classic_ride() {
        let config = RideConfig::default();
        assert_eq!(config.animation.tick_interval_ms, 33);
        assert_eq!(config.animation.parameter_step, 0.05);
        assert_eq!(config.track.sample_step, 0.01);
        assert_eq!(config.track.rail_shift_right, 2.0);
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.colors.main_rail, Color::rgb(0.0, 0.6, 1.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = RideConfig::from_toml_str(
            r#"
            [animation]
            parameter_step = 0.1
            tilt_mode = "legacy"

            [colors]
            main_rail = { r = 1.0, g = 1.0, b = 0.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.animation.parameter_step, 0.1);
        assert_eq!(config.animation.tilt_mode, TiltMode::Legacy);
        assert_eq!(config.animation.tick_interval_ms, 33);
        assert_eq!(config.colors.main_rail, Color::rgb(1.0, 1.0, 0.0));
        assert_eq!(config.colors.side_rail, Color::rgb(1.0, 0.0, 0.8));
        assert_eq!(config.track, TrackConfig::default());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = RideConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(RideConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn overrides_win_over_file() {
        let mut config = RideConfig::default();
        let env: HashMap<&str, &str> = [(ENV_TILT_MODE, "legacy"), (ENV_TICK_MS, "16")].into();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.animation.tilt_mode, TiltMode::Legacy);
        assert_eq!(config.tick_interval(), Duration::from_millis(16));
    }

    #[test]
    fn bad_override_is_rejected() {
        let mut config = RideConfig::default();
        let err = config
            .apply_overrides(|k| (k == ENV_TICK_MS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, CoasterError::InvalidConfig(_)));
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut config = RideConfig::default();
        config.animation.parameter_step = 0.0;
        assert!(config.validate().is_err());

        let mut config = RideConfig::default();
        config.camera.far = 0.1;
        assert!(config.validate().is_err());

        let mut config = RideConfig::default();
        config.physics.work_margin = -1.0;
        assert!(config.validate().is_err());

        let mut config = RideConfig::default();
        config.animation.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn tiny_steps_are_rejected() {
        let mut config = RideConfig::default();
        config.track.sample_step = 1e-30;
        assert!(matches!(
            config.validate(),
            Err(CoasterError::InvalidConfig(msg)) if msg.contains("track.sample_step")
        ));

        let mut config = RideConfig::default();
        config.animation.parameter_step = 1e-7;
        assert!(config.validate().is_err());

        let mut config = RideConfig::default();
        config.track.sample_step = MIN_STEP;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nan_margin_and_far_plane_are_rejected() {
        let mut config = RideConfig::default();
        config.physics.work_margin = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = RideConfig::default();
        config.physics.work_margin = f32::INFINITY;
        assert!(config.validate().is_err());

        let mut config = RideConfig::default();
        config.camera.far = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = RideConfig::default();
        config.camera.far = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = temp_dir();
        let path = dir.join("ride.toml");
        std::fs::write(&path, "[camera]\nride_lift = 5.0\n").unwrap();

        let config = RideConfig::load_file(&path).unwrap();
        assert_eq!(config.camera.ride_lift, 5.0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = temp_dir();
        let err = RideConfig::load(Some(&dir.join("absent.toml"))).unwrap_err();
        assert!(matches!(err, CoasterError::ConfigNotFound(_)));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = RideConfig::from_toml_str("[animation]\nparameter_step = \"fast\"").unwrap_err();
        assert!(matches!(err, CoasterError::TomlParseError(_)));
    }
}
