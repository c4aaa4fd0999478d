// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub mail: MailConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Static site serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Directory served as the site root
    pub root: String,
    /// Root document, served for "/", "/home" and "/index.html"
    pub index_file: String,
    /// URL prefix mapped onto `pages_dir` under the root
    pub pages_prefix: String,
    /// On-disk directory the pages prefix maps to
    pub pages_dir: String,
    /// Behavior when a requested file does not exist
    pub fallback: FallbackPolicy,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
}

/// Behavior when a requested static resource does not exist.
///
/// Exactly one policy is active per run; the two are never mixed.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Serve the root document with 200 (client-side routing)
    Spa,
    /// Redirect to "/" with 302
    Redirect,
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

/// Contact relay mail configuration
///
/// Credentials are read from `EMAIL_USER` / `EMAIL_PASS` in the process
/// environment; everything else comes from the config file.
#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    /// HTTP mail API endpoint; empty means submissions are logged, not sent
    pub endpoint: String,
    /// Recipient of contact submissions
    pub to: String,
    /// Sender address presented to the mail API
    pub from: String,
    /// Mail API username
    #[serde(default)]
    pub user: String,
    /// Mail API password
    #[serde(default)]
    pub pass: String,
    /// Route accepting contact-form POSTs
    pub submit_path: String,
    /// Mail API request timeout in seconds
    pub timeout: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}
