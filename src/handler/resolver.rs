//! Static resource resolution module
//!
//! Maps a request path onto the served site root: root-document aliases,
//! the pages prefix, direct lookup, and the configured not-found fallback.

use crate::config::{FallbackPolicy, SiteConfig};
use crate::http::{mime, path};
use crate::logger;
use std::io;
use std::path::Path;
use tokio::fs;

/// Outcome of resolving a request path against the site root
#[derive(Debug)]
pub enum Resolved {
    /// The requested file, with its content type
    File {
        content: Vec<u8>,
        content_type: &'static str,
    },
    /// Not found, SPA policy: the root document stands in
    Fallback { content: Vec<u8> },
    /// Not found, redirect policy
    Redirect { location: String },
    /// File-system failure other than not-found; opaque code for the client
    Error { code: &'static str },
}

/// Resolve a request path to site content
///
/// The path is percent-decoded first, and the resolved file must stay inside
/// the canonicalized site root; escapes are logged and treated as not-found.
pub async fn resolve(site: &SiteConfig, request_path: &str) -> Resolved {
    let decoded = path::decode_path(request_path);
    let relative = normalized_relative(site, &decoded);

    let root = match Path::new(&site.root).canonicalize() {
        Ok(root) => root,
        Err(e) => {
            logger::log_error(&format!(
                "Site root '{}' not accessible: {e}",
                site.root
            ));
            return Resolved::Error {
                code: error_code(&e),
            };
        }
    };

    match root.join(&relative).canonicalize() {
        Ok(file_path) => {
            if !file_path.starts_with(&root) {
                logger::log_warning(&format!(
                    "Path traversal attempt blocked: {} -> {}",
                    request_path,
                    file_path.display()
                ));
                return apply_fallback(site, &root).await;
            }
            if file_path.is_dir() {
                return Resolved::Error { code: "EISDIR" };
            }
            read_file(&file_path).await
        }
        // Missing file is the common case; apply the configured policy
        Err(e) if e.kind() == io::ErrorKind::NotFound => apply_fallback(site, &root).await,
        Err(e) => {
            logger::log_error(&format!("Failed to resolve '{relative}': {e}"));
            Resolved::Error {
                code: error_code(&e),
            }
        }
    }
}

/// Map a decoded request path to a path relative to the site root
fn normalized_relative(site: &SiteConfig, decoded: &str) -> String {
    if decoded == "/" || decoded == "/home" || decoded == "/index.html" {
        return site.index_file.clone();
    }

    if let Some(rest) = decoded.strip_prefix(site.pages_prefix.as_str()) {
        let pages_dir = site.pages_dir.trim_matches('/');
        if pages_dir.is_empty() {
            return rest.to_string();
        }
        return format!("{pages_dir}/{rest}");
    }

    decoded.trim_start_matches('/').to_string()
}

async fn read_file(file_path: &Path) -> Resolved {
    match fs::read(file_path).await {
        Ok(content) => {
            let content_type =
                mime::content_type_for(file_path.extension().and_then(|e| e.to_str()));
            Resolved::File {
                content,
                content_type,
            }
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            Resolved::Error {
                code: error_code(&e),
            }
        }
    }
}

/// Apply the configured not-found policy
async fn apply_fallback(site: &SiteConfig, root: &Path) -> Resolved {
    match site.fallback {
        FallbackPolicy::Redirect => Resolved::Redirect {
            location: "/".to_string(),
        },
        FallbackPolicy::Spa => match fs::read(root.join(&site.index_file)).await {
            Ok(content) => Resolved::Fallback { content },
            Err(e) => {
                // The root document itself is gone; nothing left to serve
                logger::log_error(&format!(
                    "Root document '{}' not readable: {e}",
                    site.index_file
                ));
                Resolved::Error {
                    code: error_code(&e),
                }
            }
        },
    }
}

/// Classify an I/O error into the opaque code surfaced to clients
fn error_code(e: &io::Error) -> &'static str {
    match e.kind() {
        io::ErrorKind::NotFound => "ENOENT",
        io::ErrorKind::PermissionDenied => "EACCES",
        _ => "EIO",
    }
}
