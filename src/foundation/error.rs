/// Convenience result type used across orphta-fx.
pub type FxResult<T> = Result<T, FxError>;

/// Top-level error taxonomy used by widget, geo and render APIs.
#[derive(thiserror::Error, Debug)]
pub enum FxError {
    /// Invalid caller-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while turning a frame plan into pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Network failures while acquiring remote data.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Malformed documents (GeoJSON, config JSON).
    #[error("parse error: {0}")]
    Parse(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxError {
    /// Build a [`FxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FxError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FxError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`FxError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
