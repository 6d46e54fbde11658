/// Crate-wide result type.
pub type IntroResult<T> = Result<T, IntroError>;

/// Errors surfaced by the intro engine and its outer surfaces.
///
/// The "System failure" banner is part of the scripted animation and is never reported here.
#[derive(thiserror::Error, Debug)]
pub enum IntroError {
    /// Configuration or argument rejected before anything ran.
    #[error("validation error: {0}")]
    Validation(String),

    /// The drawing surface could not be created or used.
    #[error("surface error: {0}")]
    Surface(String),

    /// A frame sink failed to accept or finalize frames.
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntroError {
    /// Build a [`IntroError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`IntroError::Surface`].
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`IntroError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`IntroError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for IntroError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
