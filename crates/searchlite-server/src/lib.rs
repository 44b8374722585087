//! Searchlite Server - HTTP API
//!
//! API-compatible HTTP surface for the Searchlite local search service.
//! Routes requests to the index registry, compiles filter expressions, and
//! shapes document-store results into the emulated service's response
//! envelopes.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

pub mod config;
pub mod handlers;
pub mod params;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use router::create_router;
pub use state::AppState;
