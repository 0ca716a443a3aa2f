/// Convenience result type used across the banner engine.
pub type BannerResult<T> = Result<T, BannerError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum BannerError {
    /// Invalid configuration, surface dimensions, or script data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while turning text into a mask (font, SVG, pixmap allocation, capture).
    #[error("raster error: {0}")]
    Raster(String),

    /// Failures while writing frames to a sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BannerError {
    /// Build a [`BannerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BannerError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`BannerError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BannerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for BannerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
