//! folio - static portfolio site server
//!
//! Serves a personal site from a directory with SPA-style routing and relays
//! the site's contact form to a mail-sending capability.

pub mod config;
pub mod contact;
pub mod handler;
pub mod http;
pub mod logger;
pub mod mail;
pub mod server;
