/// Convenience result type used across the crate.
pub type ShowreelResult<T> = Result<T, ShowreelError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Runtime frame-load failures are deliberately *not* represented here: an
/// individual frame that fails to load is data the player tracks and skips,
/// not an error that propagates. This enum covers construction and
/// configuration failures only.
#[derive(thiserror::Error, Debug)]
pub enum ShowreelError {
    /// Invalid user-provided or manifest data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while locating or preparing raster assets.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while driving playback or transition state.
    #[error("playback error: {0}")]
    Playback(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShowreelError {
    /// Build a [`ShowreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShowreelError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ShowreelError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`ShowreelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
