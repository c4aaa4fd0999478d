//! Logger module
//!
//! Logging utilities for the server:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Portfolio server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Serving site root: {}", config.site.root));
    write_info(&format!(
        "Contact endpoint: POST {}",
        config.mail.submit_path
    ));
    if config.mail.endpoint.is_empty() {
        write_info("Mail delivery: disabled (submissions are logged)");
    } else {
        write_info(&format!("Mail delivery: {}", config.mail.endpoint));
    }
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_headers_count(count: usize) {
    write_info(&format!("[Headers] Count: {count}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    if writer::is_initialized() {
        writer::get().write_access(&entry.format(format));
    } else {
        println!("{}", entry.format(format));
    }
}

/// Log a contact submission when no mail endpoint is configured
pub fn log_mail_simulated(to: &str, subject: &str, text: &str) {
    write_info(&format!("[MAIL] Delivery disabled, logging submission for {to}"));
    write_info(&format!("[MAIL] Subject: {subject}"));
    write_info(&format!("[MAIL] {text}"));
}

pub fn log_shutdown() {
    write_info("\n[Shutdown] Signal received, stopping accept loop");
}
