//! Searchlite Server Configuration
//!
//! Server configuration management for binding and storage locations.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

// =============================================================================
// Server Configuration
// =============================================================================

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Root storage directory; one subdirectory per resolved index name.
    pub data_dir: PathBuf,
    /// Optional JSON file mapping replica names to their target indexes.
    pub replicas_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9200,
            data_dir: PathBuf::from(".searchlite"),
            replicas_file: None,
        }
    }
}

impl ServerConfig {
    /// Create a new server config with the specified host and port.
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address for binding.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], self.port)))
    }

    /// Set the root storage directory.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Set the replica mapping file.
    pub fn with_replicas_file(mut self, replicas_file: Option<PathBuf>) -> Self {
        self.replicas_file = replicas_file;
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9200);
        assert!(config.replicas_file.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::new("0.0.0.0", 8080);
        let addr = config.socket_addr();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_builder_methods() {
        let config = ServerConfig::default()
            .with_data_dir("/tmp/searchlite")
            .with_replicas_file(Some(PathBuf::from("replicas.json")));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/searchlite"));
        assert_eq!(config.replicas_file, Some(PathBuf::from("replicas.json")));
    }
}
