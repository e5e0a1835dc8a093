use thiserror::Error;

/// Errors raised outside the render path: configuration, text parsing,
/// preference storage and browser glue.
#[derive(Debug, Error)]
pub enum FxError {
    #[error("invalid scene config: `{field}` {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse scene config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("counter text `{0}` is not a whole number")]
    CounterText(String),

    #[error("preference store unavailable: {0}")]
    Storage(String),

    #[error("browser: {0}")]
    Dom(String),
}

pub type FxResult<T> = Result<T, FxError>;

impl FxError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
