//! Platform access errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to query cursor position: {0}")]
    CursorQuery(String),

    #[error("failed to move cursor: {0}")]
    CursorMove(String),

    #[error("failed to query window {0}: {1}")]
    WindowQuery(traktouch_types::WindowId, String),

    #[error("failed to post message: {0}")]
    Post(String),

    #[error("failed to subclass window: {0}")]
    Subclass(String),

    #[error("failed to configure gestures: {0}")]
    GestureConfig(String),

    #[error("failed to install hook: {0}")]
    Hook(String),

    #[error("backend not available on this platform")]
    Unavailable,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
