//! Searchlite Index Store
//!
//! The persistent store behind one index: an in-memory document map with
//! write-through JSON persistence under the index's own directory.
//!
//! Key Features:
//! - Bulk put and bulk delete, persisted before returning
//! - Per-identifier delete outcomes (deleted vs not-found)
//! - Combined free-text and filter queries
//! - Facet value aggregation over a result set
//! - Flush that empties the index while keeping it alive on disk
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use crate::document::Document;
use crate::query::SearchRequest;
use parking_lot::RwLock;
use searchlite_common::Result;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// File holding the persisted documents of one index.
const DOCUMENTS_FILE: &str = "documents.json";

// =============================================================================
// Delete Outcome
// =============================================================================

/// Per-identifier result of a delete: distinguishes a real deletion from a
/// tolerated miss so callers can map not-found to success explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

// =============================================================================
// Index Store
// =============================================================================

/// Persistent document store for a single resolved index name.
///
/// Mutations are written through to `documents.json` inside the index
/// directory before the call returns; the directory itself is the
/// authoritative existence signal for the index.
pub struct IndexStore {
    name: String,
    dir: PathBuf,
    documents: RwLock<BTreeMap<String, Document>>,
}

impl IndexStore {
    /// Open the store rooted at `dir`, creating the directory if absent and
    /// loading any previously persisted documents.
    pub fn open(name: impl Into<String>, dir: impl Into<PathBuf>) -> Result<Self> {
        let name = name.into();
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        let file = dir.join(DOCUMENTS_FILE);
        let documents = if file.exists() {
            let raw = std::fs::read_to_string(&file)?;
            let records: Vec<Document> = serde_json::from_str(&raw)?;
            records.into_iter().map(|d| (d.id.clone(), d)).collect()
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened index '{}' at {:?}", name, dir);

        Ok(Self {
            name,
            dir,
            documents: RwLock::new(documents),
        })
    }

    /// Resolved name this store was opened under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bulk upsert by identifier.
    pub async fn put(&self, docs: Vec<Document>) -> Result<()> {
        let mut documents = self.documents.write();
        for doc in docs {
            documents.insert(doc.id.clone(), doc);
        }
        self.persist(&documents)
    }

    /// Bulk delete by identifier, reporting a per-identifier outcome.
    pub async fn delete(&self, ids: &[String]) -> Result<Vec<DeleteOutcome>> {
        let mut documents = self.documents.write();
        let outcomes = ids
            .iter()
            .map(|id| {
                if documents.remove(id).is_some() {
                    DeleteOutcome::Deleted
                } else {
                    DeleteOutcome::NotFound
                }
            })
            .collect();
        self.persist(&documents)?;
        Ok(outcomes)
    }

    /// Look up one document by identifier.
    pub async fn get(&self, id: &str) -> Option<Document> {
        self.documents.read().get(id).cloned()
    }

    /// Check whether a document with this identifier exists.
    pub async fn contains(&self, id: &str) -> bool {
        self.documents.read().contains_key(id)
    }

    /// Run a combined free-text and filter query. An empty request returns
    /// every document in the index.
    pub async fn query(&self, request: &SearchRequest) -> Vec<Document> {
        let documents = self.documents.read();
        documents
            .values()
            .filter(|doc| request.matches(&doc.attributes))
            .cloned()
            .collect()
    }

    /// Number of documents currently stored.
    pub async fn count(&self) -> usize {
        self.documents.read().len()
    }

    /// Remove every document, keeping the index itself (and its on-disk
    /// directory) intact and writable.
    pub async fn flush(&self) -> Result<()> {
        let mut documents = self.documents.write();
        let removed = documents.len();
        documents.clear();
        self.persist(&documents)?;
        tracing::debug!("Flushed {} document(s) from index '{}'", removed, self.name);
        Ok(())
    }

    /// Facet aggregation primitive: distinct value -> document count for one
    /// field over a result set. Array attributes contribute each element.
    pub fn facet_counts(docs: &[Document], field: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for doc in docs {
            if let Some(value) = doc.attributes.get(field) {
                count_facet_value(value, &mut counts);
            }
        }
        counts
    }

    /// Write the document map through to disk. Called with the write lock
    /// held so persisted state always reflects a single consistent mutation.
    fn persist(&self, documents: &BTreeMap<String, Document>) -> Result<()> {
        let records: Vec<&Document> = documents.values().collect();
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(self.dir.join(DOCUMENTS_FILE), json)?;
        Ok(())
    }
}

fn count_facet_value(value: &JsonValue, counts: &mut BTreeMap<String, usize>) {
    match value {
        JsonValue::String(s) => *counts.entry(s.clone()).or_insert(0) += 1,
        JsonValue::Bool(b) => *counts.entry(b.to_string()).or_insert(0) += 1,
        JsonValue::Number(n) => *counts.entry(n.to_string()).or_insert(0) += 1,
        JsonValue::Array(items) => {
            for item in items {
                count_facet_value(item, counts);
            }
        }
        JsonValue::Null | JsonValue::Object(_) => {}
    }
}

// =============================================================================
// Tests
// =============================================================================
