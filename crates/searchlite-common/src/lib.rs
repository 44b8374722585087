//! Searchlite Common - Shared Types and Utilities
//!
//! Foundational error handling shared across all Searchlite components.
//! Provides the unified error type and result alias used by the store,
//! query compiler, and HTTP server crates.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

pub mod error;

pub use error::{Result, SearchliteError};
