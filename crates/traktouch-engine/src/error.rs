//! Engine errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("already initialized")]
    AlreadyInitialized,

    #[error("platform error: {0}")]
    Platform(#[from] traktouch_platform::PlatformError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
