//! Error types for the whimsy system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for whimsy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the whimsy system
#[derive(Error, Debug)]
pub enum Error {
    /// A category tag outside `plant`, `animal`, `color`
    #[error("Unknown category '{0}': must be one of 'plant', 'animal', 'color'")]
    UnknownCategory(String),

    /// Compound generation requested with no categories
    #[error("Category list cannot be empty: must contain at least one of 'plant', 'animal', 'color'")]
    EmptyCategoryList,

    /// A catalog category resolved to zero words
    #[error("No words available for {0}")]
    EmptyWordSet(String),

    /// The entropy source failed to produce a value
    #[error("Random source error: {0}")]
    RandomSource(String),

    /// State store-related errors
    #[error("State store error: {0}")]
    StateStore(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an unknown category error
    pub fn unknown_category(tag: impl Into<String>) -> Self {
        Self::UnknownCategory(tag.into())
    }

    /// Create an empty word set error
    pub fn empty_word_set(category: impl Into<String>) -> Self {
        Self::EmptyWordSet(category.into())
    }

    /// Create a random source error
    pub fn random_source(msg: impl Into<String>) -> Self {
        Self::RandomSource(msg.into())
    }

    /// Create a state store error
    pub fn state_store(msg: impl Into<String>) -> Self {
        Self::StateStore(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the error was caused by caller input rather than by generation
    ///
    /// Validation errors are surfaced to the user as configuration mistakes.
    /// Everything else (empty word sets, entropy failures, storage) is an
    /// internal failure of the call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategory(_) | Self::EmptyCategoryList | Self::InvalidInput(_)
        )
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Self::RandomSource(err.to_string())
    }
}
