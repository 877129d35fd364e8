//! Engine-level errors

use crate::config::ConfigError;

/// Errors raised while setting up or driving the engine
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded or was invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tick rate must be a positive frequency
    #[error("Invalid tick rate: {0} Hz")]
    InvalidTickRate(f64),

    /// A scheduler was started with no systems registered
    #[error("Scheduler has no systems registered")]
    EmptyPipeline,
}
