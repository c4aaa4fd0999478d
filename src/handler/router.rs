//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, dispatch to
//! the static resolver or the contact relay, and access logging.

use crate::config::AppState;
use crate::contact;
use crate::handler::resolver::{self, Resolved};
use crate::http::{self, cache};
use crate::logger::{self, AccessLogEntry};
use crate::mail::Mailer;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context for static resolution
struct StaticContext {
    is_head: bool,
    if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<M: Mailer>(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState<M>>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let http_version = version_label(req.version());
    let referer = header_value(&req, "referer");
    let user_agent = header_value(&req, "user-agent");

    if state.config.logging.show_headers {
        logger::log_headers_count(req.headers().len());
    }

    let mut response = dispatch(req, &state, &path).await;

    // Every response advertises the configured server name
    if let Ok(server_name) = hyper::header::HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert("Server", server_name);
    }

    if state.config.logging.access_log {
        let mut entry =
            AccessLogEntry::new(remote_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = http_version;
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.referer = referer;
        entry.user_agent = user_agent;
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch by method: GET/HEAD to the resolver, POST to the contact relay
async fn dispatch<M: Mailer>(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState<M>>,
    path: &str,
) -> Response<Full<Bytes>> {
    match *req.method() {
        Method::GET | Method::HEAD => serve_static(&req, state, path).await,
        Method::POST => {
            if path == state.config.mail.submit_path {
                if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
                    return resp;
                }
                contact::handle_submit(req, &state.relay).await
            } else {
                logger::log_warning(&format!("POST to unrouted path: {path}"));
                http::build_405_response()
            }
        }
        Method::OPTIONS => http::build_options_response(state.config.http.enable_cors),
        _ => {
            logger::log_warning(&format!("Method not allowed: {}", req.method()));
            http::build_405_response()
        }
    }
}

/// Serve a GET/HEAD request: health endpoints first, then the resolver
async fn serve_static<M: Mailer>(
    req: &Request<hyper::body::Incoming>,
    state: &Arc<AppState<M>>,
    path: &str,
) -> Response<Full<Bytes>> {
    let site = &state.config.site;
    let ctx = StaticContext {
        is_head: *req.method() == Method::HEAD,
        if_none_match: header_value(req, "if-none-match"),
    };

    if site.health.enabled
        && (path == site.health.liveness_path || path == site.health.readiness_path)
    {
        return http::build_health_response("ok", ctx.is_head);
    }

    match resolver::resolve(site, path).await {
        Resolved::File {
            content,
            content_type,
        } => build_file_response(&content, content_type, &ctx),
        Resolved::Fallback { content } => build_file_response(&content, "text/html", &ctx),
        Resolved::Redirect { location } => http::build_redirect_response(&location, ctx.is_head),
        Resolved::Error { code } => http::build_server_error_response(code, ctx.is_head),
    }
}

/// Build the 200/304 response pair for resolved content
fn build_file_response(
    content: &[u8],
    content_type: &str,
    ctx: &StaticContext,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(content);
    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }
    http::build_cached_response(content, content_type, &etag, ctx.is_head)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> String {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
    .to_string()
}
