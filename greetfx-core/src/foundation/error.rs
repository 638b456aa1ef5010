/// Convenience result type used across greetfx.
pub type GreetResult<T> = Result<T, GreetError>;

/// Top-level error taxonomy used by compiler APIs.
#[derive(thiserror::Error, Debug)]
pub enum GreetError {
    /// Invalid caller-provided overlay or animation data, detected before compilation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Errors while numerically evaluating a compiled expression.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing composition documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GreetError {
    /// Build a [`GreetError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`GreetError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`GreetError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Prefix a configuration message with the location it was found at.
    pub(crate) fn at(self, location: impl std::fmt::Display) -> Self {
        match self {
            Self::Configuration(msg) => Self::Configuration(format!("{location}: {msg}")),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
