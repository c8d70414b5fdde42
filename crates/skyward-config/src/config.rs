//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level Skyward configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sky dome and cloud layer geometry.
    pub sky: SkyConfig,
    /// Texture locations.
    pub assets: AssetsConfig,
    /// Headless demo driver settings.
    pub demo: DemoConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Sky dome and cloud layer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyConfig {
    /// Radius of the sky dome in world units. Sun and moon orbit at half this.
    pub sky_box_radius: f32,
    /// Radius of the cloud layer in world units.
    pub cloud_radius: f32,
    /// Overrides the `skyLight.speed` component value when set.
    pub speed_override: Option<f64>,
}

/// Asset settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory the sky, moon, cloud, and flare textures are loaded from.
    pub base_path: PathBuf,
}

/// Settings for the headless frame driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of frames to simulate.
    pub frames: u32,
    /// Simulated wall-clock milliseconds between frames.
    pub frame_ms: f64,
    /// Wall-clock timestamp of the first frame, in milliseconds since the
    /// Unix epoch. `None` starts from the current time.
    pub start_ms: Option<f64>,
    /// Upload the sky uniforms to a headless GPU device every frame.
    pub gpu_upload: bool,
    /// Player displacement along +X per frame, in world units.
    pub walk_speed: f32,
    /// Optional JSON file holding the `{ key, value }` component list.
    pub components_path: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            sky_box_radius: 10_000.0,
            cloud_radius: 8_000.0,
            speed_override: None,
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("textures"),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_ms: 16.0,
            start_ms: None,
            gpu_upload: true,
            walk_speed: 0.1,
            components_path: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform config directory for Skyward (`~/.config/skyward` on Linux).
///
/// Falls back to the working directory when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("skyward"))
        .unwrap_or_else(|| PathBuf::from("."))
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Reject radii and frame steps the sky cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be a positive finite number, got {value}"),
                })
            }
        };
        positive("sky.sky_box_radius", self.sky.sky_box_radius)?;
        positive("sky.cloud_radius", self.sky.cloud_radius)?;

        if let Some(speed) = self.sky.speed_override.filter(|s| !s.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "sky.speed_override",
                reason: format!("must be finite, got {speed}"),
            });
        }
        if let Some(start) = self.demo.start_ms.filter(|s| !s.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "demo.start_ms",
                reason: format!("must be finite, got {start}"),
            });
        }
        if !(self.demo.frame_ms.is_finite() && self.demo.frame_ms >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "demo.frame_ms",
                reason: format!("must be zero or positive, got {}", self.demo.frame_ms),
            });
        }
        Ok(())
    }

    /// Orbit radius of the sun and moon meshes: half the sky dome radius.
    pub fn sun_moon_rotation_radius(&self) -> f32 {
        self.sky.sky_box_radius / 2.0
    }
}
