// Application state module
// Immutable runtime state shared across connections

use super::types::Config;
use crate::contact::ContactRelay;
use crate::mail::{MailTransport, Mailer};

/// Application state
///
/// Built once at startup and shared by every connection. The relay owns the
/// mail capability; nothing here mutates after construction.
pub struct AppState<M: Mailer> {
    pub config: Config,
    pub relay: ContactRelay<M>,
}

impl AppState<MailTransport> {
    /// Create state with the production mail transport selected from config
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let transport = MailTransport::from_config(&config.mail)?;
        Ok(Self::with_mailer(config, transport))
    }
}

impl<M: Mailer> AppState<M> {
    /// Create state around a specific mail capability
    pub fn with_mailer(config: Config, mailer: M) -> Self {
        let relay = ContactRelay::new(config.mail.clone(), mailer);
        Self { config, relay }
    }
}
