//! Client configuration

use crate::{ClientError, ClientResult, HttpClient};

/// Endpoint paths, relative to `base_url`
///
/// `{id}` is replaced with the floor or table id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorEndpoints {
    pub floors: String,
    pub floor_layout: String,
    pub tables: String,
    pub table_layout: String,
}

impl Default for FloorEndpoints {
    fn default() -> Self {
        Self {
            floors: "/api/floors".to_string(),
            floor_layout: "/api/floors/{id}/layout".to_string(),
            tables: "/api/tables".to_string(),
            table_layout: "/api/tables/{id}/layout".to_string(),
        }
    }
}

impl FloorEndpoints {
    pub fn floor_layout(&self, floor_id: &str) -> String {
        self.floor_layout.replace("{id}", floor_id)
    }

    pub fn table_layout(&self, table_id: &str) -> String {
        self.table_layout.replace("{id}", table_id)
    }
}

/// Client configuration for the floor plan collaborator
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | FLOOR_API_URL | http://localhost:8080 | Backend base URL |
/// | FLOOR_API_TOKEN | (none) | Bearer token |
/// | FLOOR_API_TIMEOUT_SECS | 30 | Request timeout (seconds) |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Endpoint paths
    pub endpoints: FloorEndpoints,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            endpoints: FloorEndpoints::default(),
        }
    }

    /// Load from environment variables (and a `.env` file if present)
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::new(
            std::env::var("FLOOR_API_URL").unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        config.token = std::env::var("FLOOR_API_TOKEN").ok().filter(|t| !t.is_empty());
        config.timeout = std::env::var("FLOOR_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        config
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Override endpoint paths
    pub fn with_endpoints(mut self, endpoints: FloorEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Reject configurations that cannot produce a working client
    pub fn validate(&self) -> ClientResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::InvalidConfig(format!(
                "base_url must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::InvalidConfig("timeout must be > 0".into()));
        }
        Ok(())
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<HttpClient> {
        HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
