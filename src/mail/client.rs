//! HTTP mail API client module

use super::{MailError, OutgoingEmail};
use crate::config::MailConfig;
use serde::Serialize;
use std::time::Duration;

/// Client for an HTTP mail-sending API
///
/// Posts the message as JSON with basic auth; credentials come from the
/// mail configuration (`EMAIL_USER` / `EMAIL_PASS`).
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    from: String,
    user: String,
    pass: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(mail: &MailConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(mail.timeout))
            .build()?;

        Ok(Self {
            client,
            endpoint: mail.endpoint.clone(),
            from: mail.from.clone(),
            user: mail.user.clone(),
            pass: mail.pass.clone(),
        })
    }

    /// Deliver one message; a non-2xx reply counts as failure
    pub async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let body = SendRequest {
            from: &self.from,
            to: &email.to,
            subject: &email.subject,
            text: &email.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.user, Some(&self.pass))
            .json(&body)
            .send()
            .await
            .map_err(MailError::Transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(MailError::Api(response.status()))
        }
    }
}
