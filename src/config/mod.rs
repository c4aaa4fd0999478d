// Configuration module entry point
// Loads layered configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, FallbackPolicy, HealthConfig, HttpConfig, LoggingConfig, MailConfig,
    PerformanceConfig, ServerConfig, SiteConfig,
};

impl Config {
    /// Load configuration from "config.toml" in the working directory
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension)
    ///
    /// The file is optional; coded defaults cover every setting. `SERVER_*`
    /// environment variables override file values, and `PORT`, `EMAIL_USER`
    /// and `EMAIL_PASS` are honored the way the original deployment expects.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("site.root", "site")?
            .set_default("site.index_file", "index.html")?
            .set_default("site.pages_prefix", "/pages/")?
            .set_default("site.pages_dir", "pages")?
            .set_default("site.fallback", "spa")?
            .set_default("mail.endpoint", "")?
            .set_default("mail.to", "")?
            .set_default("mail.from", "")?
            .set_default("mail.submit_path", "/send-email")?
            .set_default("mail.timeout", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "folio/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                cfg.server.port = port;
            }
        }
        if let Ok(user) = std::env::var("EMAIL_USER") {
            cfg.mail.user = user;
        }
        if let Ok(pass) = std::env::var("EMAIL_PASS") {
            cfg.mail.pass = pass;
        }

        Ok(cfg)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("__folio_missing_config__").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.site.root, "site");
        assert_eq!(cfg.site.pages_prefix, "/pages/");
        assert_eq!(cfg.site.fallback, FallbackPolicy::Spa);
        assert_eq!(cfg.mail.submit_path, "/send-email");
        assert!(cfg.mail.endpoint.is_empty());
        assert!(cfg.site.health.enabled);
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("__folio_missing_config__").unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert!(addr.is_ipv4());
    }
}
