//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Shape of the occluding body.
    pub ellipsoid: EllipsoidConfig,
    /// Culling switches.
    pub culling: CullingConfig,
    /// Probe tool settings.
    pub probe: ProbeConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Ellipsoid radii in meters. Validated when turned into a culling ellipsoid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EllipsoidConfig {
    /// Equatorial radius in meters.
    pub radius_equator_m: f64,
    /// Polar radius in meters.
    pub radius_polar_m: f64,
}

/// Culling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CullingConfig {
    /// Enable horizon culling during cull passes.
    pub horizon_culling: bool,
    /// Report the horizon clip plane alongside visibility results.
    pub emit_clip_plane: bool,
}

/// Settings for the synthetic scene run by the probe tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    /// Altitude of the generated view points above the equator, in meters.
    pub eye_altitude_m: f64,
    /// Number of latitude bands (longitude steps are twice this).
    pub grid_resolution: u32,
    /// Bounding radius of a single surface patch, in meters.
    pub patch_radius_m: f64,
    /// Number of views culled in parallel, spread around the polar axis.
    pub views: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for EllipsoidConfig {
    fn default() -> Self {
        // WGS84
        Self {
            radius_equator_m: 6_378_137.0,
            radius_polar_m: 6_356_752.314_245,
        }
    }
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            horizon_culling: true,
            emit_clip_plane: true,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            eye_altitude_m: 400_000.0,
            grid_resolution: 32,
            patch_radius_m: 50_000.0,
            views: 4,
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

/// Platform config directory for the horizon tools, if one exists.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("horizon-cull"))
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
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

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
