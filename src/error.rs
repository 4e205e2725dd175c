//! Error types

use thiserror::Error;

/// Errors surfaced by initialization and the host-facing ports
#[derive(Debug, Error)]
pub enum GameError {
    /// No drawing surface; the game cannot run
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// No compatible GPU adapter
    #[error("gpu adapter request failed: {0}")]
    Adapter(String),

    /// Device creation failed
    #[error("gpu device request failed: {0}")]
    Device(String),

    /// Frame could not be presented
    #[error("render failed: {0}")]
    Render(String),

    /// LocalStorage missing or refused the write
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Host channel refused the report
    #[error("host channel error: {0}")]
    HostChannel(String),
}

impl From<wgpu::SurfaceError> for GameError {
    fn from(err: wgpu::SurfaceError) -> Self {
        GameError::Render(err.to_string())
    }
}
