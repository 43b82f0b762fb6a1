//! Configuration for horizon culling tools.
//!
//! Settings persist to disk as RON files and can be overridden from the
//! command line via clap. Unknown or missing fields fall back to defaults
//! so older and newer config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, CullingConfig, DebugConfig, EllipsoidConfig, ProbeConfig,
    default_config_dir,
};
pub use error::ConfigError;
