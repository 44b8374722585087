//! Searchlite Index Registry
//!
//! Resolves logical index names (applying replica aliases) to singleton
//! store handles. Handles are created lazily on first access and cached for
//! the life of the registry, so at most one live store exists per resolved
//! name.
//!
//! Key Features:
//! - Single-level replica alias resolution, loaded once at startup
//! - Single-flight handle construction under concurrent first access
//! - Existence checks against the on-disk directory without opening a handle
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use crate::store::IndexStore;
use searchlite_common::{Result, SearchliteError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

// =============================================================================
// Replica Configuration
// =============================================================================

/// Load the replica alias mapping (logical name -> target name) from a JSON
/// object file. A missing file yields an empty mapping.
pub fn load_replicas(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        SearchliteError::Configuration(format!("invalid replica mapping {:?}: {}", path, e))
    })
}

// =============================================================================
// Index Registry
// =============================================================================

/// Registry of open index stores, keyed by resolved index name.
///
/// Constructed once at process start and injected into request handlers;
/// torn down at process shutdown.
pub struct IndexRegistry {
    root: PathBuf,
    replicas: HashMap<String, String>,
    // Held across store construction so concurrent first-access requests
    // for the same name cannot race to build two handles.
    open_indexes: Mutex<HashMap<String, Arc<IndexStore>>>,
}

impl IndexRegistry {
    /// Create a registry rooted at `root` with an immutable replica mapping.
    pub fn new(root: impl Into<PathBuf>, replicas: HashMap<String, String>) -> Self {
        Self {
            root: root.into(),
            replicas,
            open_indexes: Mutex::new(HashMap::new()),
        }
    }

    /// Apply the replica alias mapping. Single-level: the target of an alias
    /// is used as-is, never re-resolved.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.replicas.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Return the cached store handle for the resolved name, constructing
    /// and caching it on first access.
    ///
    /// A failed construction is surfaced to the caller and leaves nothing
    /// cached, so a later request can retry cleanly.
    pub async fn open(&self, name: &str) -> Result<Arc<IndexStore>> {
        let resolved = self.resolve(name).to_string();
        let mut open_indexes = self.open_indexes.lock().await;

        if let Some(store) = open_indexes.get(&resolved) {
            return Ok(store.clone());
        }

        std::fs::create_dir_all(&self.root)?;
        let store = Arc::new(IndexStore::open(resolved.as_str(), self.root.join(&resolved))?);
        open_indexes.insert(resolved.clone(), store.clone());
        tracing::info!("Opened index '{}'", resolved);
        Ok(store)
    }

    /// Report whether the resolved index exists on disk, without opening or
    /// caching a handle.
    pub fn exists(&self, name: &str) -> bool {
        self.root.join(self.resolve(name)).is_dir()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Attributes, Document};

    fn replica_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_applies_single_level_alias() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = IndexRegistry::new(
            tmp.path(),
            replica_map(&[("products_price_asc", "products"), ("a", "b"), ("b", "c")]),
        );

        assert_eq!(registry.resolve("products_price_asc"), "products");
        assert_eq!(registry.resolve("products"), "products");
        // No chained aliasing: "a" resolves to "b", not "c".
        assert_eq!(registry.resolve("a"), "b");
    }

    #[tokio::test]
    async fn test_open_caches_one_handle_per_resolved_name() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = IndexRegistry::new(
            tmp.path(),
            replica_map(&[("products_price_asc", "products")]),
        );

        let direct = registry.open("products").await.unwrap();
        let aliased = registry.open("products_price_asc").await.unwrap();
        assert!(Arc::ptr_eq(&direct, &aliased));
    }

    #[tokio::test]
    async fn test_concurrent_opens_construct_one_store() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = Arc::new(IndexRegistry::new(tmp.path(), HashMap::new()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry.open("products").await.unwrap()
            }));
        }

        let mut stores = Vec::new();
        for handle in handles {
            stores.push(handle.await.unwrap());
        }
        for store in &stores[1..] {
            assert!(Arc::ptr_eq(&stores[0], store));
        }
    }

    #[tokio::test]
    async fn test_exists_tracks_directory_without_opening() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = IndexRegistry::new(
            tmp.path(),
            replica_map(&[("products_price_asc", "products")]),
        );

        assert!(!registry.exists("products"));

        registry.open("products").await.unwrap();
        assert!(registry.exists("products"));
        // The alias reports existence through its target.
        assert!(registry.exists("products_price_asc"));
        assert!(!registry.exists("users"));
    }

    #[tokio::test]
    async fn test_alias_shares_storage_with_target() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = IndexRegistry::new(
            tmp.path(),
            replica_map(&[("products_price_asc", "products")]),
        );

        let aliased = registry.open("products_price_asc").await.unwrap();
        aliased
            .put(vec![Document::new("p1", Attributes::new())])
            .await
            .unwrap();

        let direct = registry.open("products").await.unwrap();
        assert!(direct.get("p1").await.is_some());
        assert!(tmp.path().join("products").is_dir());
        assert!(!tmp.path().join("products_price_asc").exists());
    }

    #[test]
    fn test_load_replicas_missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let replicas = load_replicas(&tmp.path().join("replicas.json")).unwrap();
        assert!(replicas.is_empty());
    }

    #[test]
    fn test_load_replicas_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("replicas.json");
        std::fs::write(&path, r#"{"products_price_asc": "products"}"#).unwrap();

        let replicas = load_replicas(&path).unwrap();
        assert_eq!(
            replicas.get("products_price_asc"),
            Some(&"products".to_string())
        );
    }

    #[test]
    fn test_load_replicas_rejects_malformed_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("replicas.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_replicas(&path).unwrap_err();
        assert!(matches!(err, SearchliteError::Configuration(_)));
    }
}
