//! Command-line overrides for the configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ConfigError, default_config_dir};

/// Common command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "horizon", about = "Horizon culling tools")]
pub struct CliArgs {
    /// Equatorial radius of the body in meters.
    #[arg(long)]
    pub equatorial_radius: Option<f64>,

    /// Polar radius of the body in meters.
    #[arg(long)]
    pub polar_radius: Option<f64>,

    /// Enable or disable horizon culling.
    #[arg(long)]
    pub horizon_culling: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// The config directory: `--config` if given, else the platform default.
    pub fn config_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(dir) => Ok(dir.clone()),
            None => default_config_dir().ok_or(ConfigError::NoConfigDir),
        }
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(r) = args.equatorial_radius {
            self.ellipsoid.radius_equator_m = r;
        }
        if let Some(r) = args.polar_radius {
            self.ellipsoid.radius_polar_m = r;
        }
        if let Some(enabled) = args.horizon_culling {
            self.culling.horizon_culling = enabled;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
