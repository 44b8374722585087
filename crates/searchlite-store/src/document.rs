//! Searchlite Document Types
//!
//! Core data types for document storage.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Attribute payload of a document: arbitrary JSON-compatible fields.
pub type Attributes = serde_json::Map<String, JsonValue>;

// =============================================================================
// Document
// =============================================================================

/// One stored record: a unique identifier plus an attribute payload.
///
/// The identifier is held apart from the attributes and must never appear
/// inside them; callers see it only as the `objectID` field of a hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub attributes: Attributes,
}

impl Document {
    /// Create a document with an explicit identifier.
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    /// Create a document with a freshly generated random identifier.
    pub fn with_generated_id(attributes: Attributes) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            attributes,
        }
    }

    /// Render the document as a response hit: the attribute payload with
    /// the identifier surfaced as `objectID`.
    pub fn to_hit(&self) -> JsonValue {
        let mut map = self.attributes.clone();
        map.insert("objectID".to_string(), JsonValue::String(self.id.clone()));
        JsonValue::Object(map)
    }
}

// =============================================================================
// Tests
// =============================================================================
