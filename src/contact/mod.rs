//! Contact submission relay module
//!
//! Validates contact-form POSTs and forwards them to the mail capability.
//! One attempt per request; failures are logged and answered with a generic
//! message.

use crate::config::MailConfig;
use crate::http::build_json_response;
use crate::logger;
use crate::mail::{Mailer, OutgoingEmail};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};

/// A contact-form submission; all four fields are required
#[derive(Debug, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// A submission is valid iff every field is non-empty
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
            && !self.email.is_empty()
            && !self.subject.is_empty()
            && !self.message.is_empty()
    }
}

/// Acknowledgment returned to the form
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
}

impl SubmitResponse {
    const fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }

    const fn rejected(message: &'static str) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

/// Contact submission relay
///
/// Constructed once at startup around the mail capability; holds the fixed
/// recipient and template configuration.
pub struct ContactRelay<M: Mailer> {
    mail: MailConfig,
    mailer: M,
}

impl<M: Mailer> ContactRelay<M> {
    pub const fn new(mail: MailConfig, mailer: M) -> Self {
        Self { mail, mailer }
    }

    /// Validate a raw JSON body and relay it to the mail capability
    ///
    /// Returns the HTTP status and acknowledgment body. Delivery is attempted
    /// exactly once; the underlying error never reaches the caller.
    pub async fn submit(&self, body: &[u8]) -> (StatusCode, SubmitResponse) {
        let submission: ContactSubmission = match serde_json::from_slice(body) {
            Ok(s) => s,
            Err(e) => {
                logger::log_warning(&format!("Rejected malformed contact body: {e}"));
                return (
                    StatusCode::BAD_REQUEST,
                    SubmitResponse::rejected("Invalid form data."),
                );
            }
        };

        if !submission.is_complete() {
            return (
                StatusCode::BAD_REQUEST,
                SubmitResponse::rejected("All fields are required."),
            );
        }

        let email = compose(&self.mail, &submission);
        match self.mailer.send(&email).await {
            Ok(()) => (
                StatusCode::OK,
                SubmitResponse::ok("Email sent successfully!"),
            ),
            Err(e) => {
                logger::log_error(&format!("Failed to send contact email: {e}"));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SubmitResponse::rejected("Failed to send email. Please try again later."),
                )
            }
        }
    }
}

/// Compose the outgoing message for a valid submission
fn compose(mail: &MailConfig, submission: &ContactSubmission) -> OutgoingEmail {
    OutgoingEmail {
        to: mail.to.clone(),
        subject: format!("New Contact Form Submission: {}", submission.subject),
        text: format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            submission.name, submission.email, submission.message
        ),
    }
}

/// HTTP surface of the relay: read the body, submit, answer JSON
pub async fn handle_submit<M: Mailer>(
    req: Request<hyper::body::Incoming>,
    relay: &ContactRelay<M>,
) -> Response<Full<Bytes>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read contact body: {e}"));
            return build_json_response(
                StatusCode::BAD_REQUEST,
                &SubmitResponse::rejected("Invalid form data."),
            );
        }
    };

    let (status, ack) = relay.submit(&body).await;
    build_json_response(status, &ack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::mail::MailError;
    use std::cell::{Cell, RefCell};

    struct RecordingMailer {
        sent: RefCell<Vec<OutgoingEmail>>,
    }

    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
            self.sent.borrow_mut().push(email.clone());
            Ok(())
        }
    }

    struct FailingMailer {
        attempts: Cell<usize>,
    }

    impl Mailer for FailingMailer {
        async fn send(&self, _email: &OutgoingEmail) -> Result<(), MailError> {
            self.attempts.set(self.attempts.get() + 1);
            Err(MailError::Api(StatusCode::BAD_GATEWAY))
        }
    }

    fn mail_config() -> MailConfig {
        let mut mail = Config::load_from("__folio_missing_config__").unwrap().mail;
        mail.to = "owner@example.com".to_string();
        mail
    }

    #[test]
    fn test_is_complete() {
        let full = ContactSubmission {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            subject: "Hi".to_string(),
            message: "Hello".to_string(),
        };
        assert!(full.is_complete());

        let missing = ContactSubmission {
            name: String::new(),
            email: "a@b.com".to_string(),
            subject: "s".to_string(),
            message: "m".to_string(),
        };
        assert!(!missing.is_complete());
    }

    #[tokio::test]
    async fn test_empty_field_rejected() {
        let relay = ContactRelay::new(
            mail_config(),
            RecordingMailer {
                sent: RefCell::new(Vec::new()),
            },
        );
        let body = br#"{"name":"","email":"a@b.com","subject":"s","message":"m"}"#;
        let (status, ack) = relay.submit(body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(ack, SubmitResponse::rejected("All fields are required."));
        assert!(relay.mailer.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_missing_field_rejected() {
        let relay = ContactRelay::new(
            mail_config(),
            RecordingMailer {
                sent: RefCell::new(Vec::new()),
            },
        );
        let (status, ack) = relay.submit(br#"{"name":"A"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(ack, SubmitResponse::rejected("All fields are required."));
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let relay = ContactRelay::new(
            mail_config(),
            RecordingMailer {
                sent: RefCell::new(Vec::new()),
            },
        );
        let (status, ack) = relay.submit(b"not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(ack, SubmitResponse::rejected("Invalid form data."));
    }

    #[tokio::test]
    async fn test_valid_submission_relayed() {
        let relay = ContactRelay::new(
            mail_config(),
            RecordingMailer {
                sent: RefCell::new(Vec::new()),
            },
        );
        let body = br#"{"name":"A","email":"a@b.com","subject":"Hi","message":"Hello"}"#;
        let (status, ack) = relay.submit(body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack, SubmitResponse::ok("Email sent successfully!"));

        let sent = relay.mailer.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[0].subject, "New Contact Form Submission: Hi");
        assert_eq!(sent[0].text, "Name: A\nEmail: a@b.com\n\nMessage:\nHello");
    }

    #[tokio::test]
    async fn test_send_failure_is_single_attempt() {
        let relay = ContactRelay::new(
            mail_config(),
            FailingMailer {
                attempts: Cell::new(0),
            },
        );
        let body = br#"{"name":"A","email":"a@b.com","subject":"Hi","message":"Hello"}"#;
        let (status, ack) = relay.submit(body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ack,
            SubmitResponse::rejected("Failed to send email. Please try again later.")
        );
        assert_eq!(relay.mailer.attempts.get(), 1);
    }

    #[test]
    fn test_ack_serialization_shape() {
        let json = serde_json::to_string(&SubmitResponse::ok("Email sent successfully!")).unwrap();
        assert_eq!(
            json,
            r#"{"success":true,"message":"Email sent successfully!"}"#
        );
    }
}
