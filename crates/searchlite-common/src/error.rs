//! Searchlite Error - Unified Error Types
//!
//! Error handling for all Searchlite operations. Categorizes errors by
//! domain (parsing, index lifecycle, storage) and provides utilities for
//! classifying user errors vs system errors.
//!
//! Key Features:
//! - Domain-specific error variants for precise error handling
//! - User vs system error classification for HTTP status mapping
//! - Seamless integration with std::io::Error and serde_json::Error
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Unified error type for all Searchlite operations.
#[derive(Error, Debug)]
pub enum SearchliteError {
    // Query compilation errors
    #[error("parse error: {0}")]
    Parse(String),

    // Index lifecycle errors
    #[error("index not found: {0}")]
    IndexNotFound(String),

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    // Storage errors
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

// =============================================================================
// Type Aliases
// =============================================================================

/// Result type alias for Searchlite operations.
pub type Result<T> = std::result::Result<T, SearchliteError>;

// =============================================================================
// Error Classification
// =============================================================================

impl SearchliteError {
    /// Returns true if this is a user error (vs system error).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SearchliteError::Parse(_)
                | SearchliteError::IndexNotFound(_)
                | SearchliteError::ObjectNotFound(_)
        )
    }

    /// Returns true if this error maps to a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SearchliteError::IndexNotFound(_) | SearchliteError::ObjectNotFound(_)
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
