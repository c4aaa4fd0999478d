//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the static resolver and the contact
//! relay: content-type lookup, conditional requests, path decoding and
//! response builders.

pub mod cache;
pub mod mime;
pub mod path;
pub mod response;

// Re-export commonly used helpers
pub use path::decode_path;
pub use response::{
    build_304_response, build_405_response, build_413_response, build_cached_response,
    build_health_response, build_json_response, build_options_response, build_redirect_response,
    build_server_error_response,
};
