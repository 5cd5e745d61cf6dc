use std::sync::Arc;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::db::{CredentialStore, ResetTokenLedger};
use crate::mail::MailSender;
use crate::utils::config::Configuration;
use crate::utils::hasher::Hasher;
use crate::utils::jwt::TokenIssuer;
use crate::utils::time_provider::TimeProvider;

///
/// The context is available to every HTTP handler and gives it access to the stores, the
/// hasher, the token issuer and the mailer.
///
/// The collaborators are injected at start-up rather than reached as ambient globals, so
/// the tests can substitute in-memory fakes for the durable stores and the mail transport.
///
pub struct ServiceContext {
    config: Configuration,
    credentials: Arc<dyn CredentialStore>,
    reset_tokens: Arc<dyn ResetTokenLedger>,
    mailer: Arc<dyn MailSender>,
    hasher: Hasher,
    tokens: TokenIssuer,
    time_provider: RwLock<TimeProvider>,
}

impl ServiceContext {
    pub fn new(
        config: Configuration,
        credentials: Arc<dyn CredentialStore>,
        reset_tokens: Arc<dyn ResetTokenLedger>,
        mailer: Arc<dyn MailSender>) -> Self {

        ServiceContext {
            credentials,
            reset_tokens,
            mailer,
            hasher: Hasher::new(config.bcrypt_cost),
            tokens: TokenIssuer::new(&config.jwt_access_key, config.token_validity_hours),
            time_provider: RwLock::new(TimeProvider::default()),
            config,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.time_provider.read().now()
    }

    ///
    /// Set or clear the fixed time - used by tests to travel past expiry windows.
    ///
    pub fn set_now(&self, now: Option<DateTime<Utc>>) {
        self.time_provider.write().fix(now);
    }

    pub fn credentials(&self) -> &dyn CredentialStore {
        &*self.credentials
    }

    pub fn reset_tokens(&self) -> &dyn ResetTokenLedger {
        &*self.reset_tokens
    }

    pub fn mailer(&self) -> &dyn MailSender {
        &*self.mailer
    }

    pub fn hasher(&self) -> &Hasher {
        &self.hasher
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }
}
