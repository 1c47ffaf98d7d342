//! Core types for the FINS relay

use serde::{Deserialize, Serialize};

/// Origins the development front-ends are served from
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 6] = [
    "http://localhost:5173",
    "http://localhost:5137",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:5137",
    "http://62.217.127.153:5173",
];

/// Which browser origins may call the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPolicy {
    pub allowed: Vec<String>,
    /// Accept any `http://localhost:<port>` origin
    pub allow_localhost: bool,
}

impl OriginPolicy {
    const LOCALHOST_PREFIX: &'static str = "http://localhost:";

    /// Requests without an Origin header (curl, server-side callers) always pass
    pub fn allows(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => {
                self.allowed.iter().any(|o| o == origin)
                    || (self.allow_localhost && origin.starts_with(Self::LOCALHOST_PREFIX))
            }
        }
    }
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            allow_localhost: true,
        }
    }
}

/// Configuration for the relay
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    pub upstream_base_url: String,
    pub resource_prefix: String,
    pub origins: OriginPolicy,
    /// Answer with the upstream status instead of a flat 200
    pub preserve_upstream_status: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            upstream_base_url: "https://demos.isl.ics.forth.gr/semantyfish-api".to_string(),
            resource_prefix: "resources".to_string(),
            origins: OriginPolicy::default(),
            preserve_upstream_status: false,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

/// Parse a boolean environment flag
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Body returned when forwarding fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyErrorBody {
    pub error: String,
    pub message: String,
    pub url: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub upstream: String,
}
