use crate::num::NumError;

/// Reason a value could not be turned into a field element or identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("empty name")]
    EmptyName,

    #[error("empty field sequence")]
    EmptyFields,

    #[error("empty text field")]
    EmptyText,

    #[error("text {0:?} is {1} bytes, at most 31 fit into a field element")]
    TextTooLong(String, usize),

    #[error("malformed numeral: {0:?}")]
    MalformedNumeral(String),

    #[error("numeral {0} is not below the field modulus")]
    OutOfRange(String),

    #[error("unknown namespace literal {0:?}")]
    UnknownNamespace(String),

    #[error("unsupported field value: {0}")]
    Unsupported(String),
}

/// Error returned by key derivation.
///
/// Every failure is a local validation failure: derivation is pure, so
/// there is nothing to retry and the caller has to fix the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

/// Error returned while turning configuration into data-store writes.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("key derivation error: {0}")]
    Key(#[from] KeyError),

    #[error("invalid value for {0}: {1}")]
    Value(&'static str, NumError),

    #[error("contract {0} not found in deployment")]
    ContractNotFound(String),

    #[error("market {0} not found in configuration")]
    MarketNotFound(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InvalidInput> for ConfigError {
    fn from(value: InvalidInput) -> Self {
        Self::Key(KeyError::from(value))
    }
}
