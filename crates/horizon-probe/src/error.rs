//! Probe error types.

use horizon_config::ConfigError;
use horizon_cull::HorizonError;

/// Anything that aborts a probe run.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Config could not be located, loaded, or written.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured ellipsoid is invalid.
    #[error(transparent)]
    Horizon(#[from] HorizonError),

    /// A cull worker thread could not be started.
    #[error("failed to spawn cull thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// A cull worker thread panicked.
    #[error("cull thread for view {0} panicked")]
    WorkerPanicked(usize),
}
