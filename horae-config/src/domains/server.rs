//! HTTP server configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to install the CORS layer
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_cors: bool,

    /// Origins allowed by the CORS layer (`*` allows any)
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Whether to tag requests with an `X-Request-ID`
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_request_id: bool,

    /// Whether to trace HTTP requests
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_tracing: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            enable_cors: true,
            cors_allowed_origins: default_cors_allowed_origins(),
            enable_request_id: true,
            enable_tracing: true,
        }
    }
}

impl ServerConfig {
    /// Socket address the server listens on
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|e| self.validation_error(format!("Invalid bind address '{}': {}", self.bind_address, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;
        validate_positive(self.port, "port", self.domain_name())?;
        self.socket_addr()?;
        if self.enable_cors && self.cors_allowed_origins.is_empty() {
            return Err(self.validation_error("cors_allowed_origins cannot be empty when CORS is enabled"));
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string(), "http://127.0.0.1:3000".to_string()]
}
