//! Error types for the key tool.

use dex_keys::error::{ConfigError, InvalidInput, KeyError};

/// Main error type for the key tool.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment configuration error: {0}")]
    EnvConfig(#[from] envy::Error),

    #[error("Key derivation error: {0}")]
    Key(#[from] KeyError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalogue check failed: {0} mismatched entries")]
    CatalogueMismatch(usize),

    #[error("Nothing to grant: pass --account or --handlers")]
    NoGrantee,
}

pub type Result<T> = std::result::Result<T, Error>;
