//! Mail-sending capability module
//!
//! The relay hands composed messages to a `Mailer`; everything about
//! delivery stays behind that seam.

mod client;

pub use client::HttpMailer;

use crate::config::MailConfig;
use crate::logger;
use hyper::StatusCode;
use std::fmt;

/// A composed message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Delivery failure; logged server-side, opaque to HTTP clients
#[derive(Debug)]
pub enum MailError {
    /// The mail API could not be reached
    Transport(reqwest::Error),
    /// The mail API answered with a non-success status
    Api(StatusCode),
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "mail API unreachable: {e}"),
            Self::Api(status) => write!(f, "mail API rejected message: {status}"),
        }
    }
}

impl std::error::Error for MailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Api(_) => None,
        }
    }
}

/// A mail-sending capability
pub trait Mailer {
    /// Deliver one message; one attempt, the caller never retries
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Production mail transport, selected from configuration
pub enum MailTransport {
    /// Deliver through an HTTP mail API
    Http(HttpMailer),
    /// No endpoint configured: log the submission and report success
    Log,
}

impl MailTransport {
    pub fn from_config(mail: &MailConfig) -> Result<Self, reqwest::Error> {
        if mail.endpoint.is_empty() {
            Ok(Self::Log)
        } else {
            Ok(Self::Http(HttpMailer::new(mail)?))
        }
    }
}

impl Mailer for MailTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        match self {
            Self::Http(client) => client.send(email).await,
            Self::Log => {
                logger::log_mail_simulated(&email.to, &email.subject, &email.text);
                Ok(())
            }
        }
    }
}
