//! Searchlite Store - Document Storage
//!
//! Persistent per-index document storage for the Searchlite service.
//! Each index is an independently persisted document collection rooted at
//! its own directory; the registry hands out at most one live store handle
//! per resolved index name and applies replica aliasing.
//!
//! Key Features:
//! - Documents with an internal identifier held apart from attributes
//! - Bulk put/delete with per-identifier delete outcomes
//! - Combined free-text and boolean filter queries
//! - Facet value aggregation over a result set
//! - Lazily created, cached, singleton index handles
//!
//! @version 0.1.0
//! @author Searchlite Development Team

pub mod document;
pub mod query;
pub mod registry;
pub mod store;

pub use document::{Attributes, Document};
pub use query::{Filter, SearchRequest};
pub use registry::{load_replicas, IndexRegistry};
pub use store::{DeleteOutcome, IndexStore};
