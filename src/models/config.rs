//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Key material for the flash message cookie, at least 64 bytes.
    pub secret: String,
    /// Root of the DummyJSON-compatible product API.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub cache_capacity: u64,
    pub cache_ttl_secs: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
