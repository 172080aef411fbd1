/// Convenience result type used across the converter.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Top-level error taxonomy used by the conversion APIs.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    /// The source could not be decoded, or it is not an animation.
    #[error("input format error: {0}")]
    InputFormat(String),

    /// The output container rejected the composed frame sequence.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Invalid options or buffers handed to an engine API.
    #[error("validation error: {0}")]
    Validation(String),

    /// An options file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConvertError {
    /// Build a [`ConvertError::InputFormat`] value.
    pub fn input_format(msg: impl Into<String>) -> Self {
        Self::InputFormat(msg.into())
    }

    /// Build a [`ConvertError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`ConvertError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ConvertError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(anyhow::Error::new(err))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
