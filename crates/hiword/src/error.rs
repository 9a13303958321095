//! Error types for hiword.
//!
//! All fallible operations return [`HiwordError`]. The taxonomy is small:
//! extraction itself is a pure computation over in-memory data, so the
//! only real failure points are loading lexical resources and validating
//! configuration.
//!
//! - `Io` - File system errors, always bubbled up unchanged
//! - `ResourceLoad` - A dictionary, IDF, stopword or script-map file is missing or malformed
//! - `Validation` - Invalid configuration or oversized input
//! - `Serialization` - A TOML, YAML or JSON configuration file does not parse
//!
//! Empty documents are not errors. They yield an empty keyword list.
//!
//! # Example
//!
//! ```rust
//! use hiword::{HiwordError, Result};
//!
//! fn check_support(min_support: u32) -> Result<()> {
//!     if min_support == 0 {
//!         return Err(HiwordError::validation("min_support must be at least 1"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_support(0).is_err());
//! ```
use thiserror::Error;

/// Result type alias using `HiwordError`.
pub type Result<T> = std::result::Result<T, HiwordError>;

/// Main error type for all hiword operations.
#[derive(Debug, Error)]
pub enum HiwordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load {resource}: {message}")]
    ResourceLoad {
        resource: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

}

impl HiwordError {
    /// Create a ResourceLoad error for the named resource.
    pub fn resource_load<R: Into<String>, S: Into<String>>(resource: R, message: S) -> Self {
        Self::ResourceLoad {
            resource: resource.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a ResourceLoad error with source.
    pub fn resource_load_with_source<R, S, E>(resource: R, message: S, source: E) -> Self
    where
        R: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ResourceLoad {
            resource: resource.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Serialization error with source
    pub fn serialization_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error means the lexical resources are unavailable.
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Self::ResourceLoad { .. })
    }
}
