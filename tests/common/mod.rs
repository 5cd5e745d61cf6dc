#![allow(dead_code)] // Not every helper is used by every test binary.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use excavator::db::{CredentialStore, ResetTokenLedger};
use excavator::mail::{MailMessage, MailSender};
use excavator::model::employee::{Authorization, Employee, Personal};
use excavator::model::reset_token::{ResetToken, TokenOutcome};
use excavator::utils::config::Configuration;
use excavator::utils::context::ServiceContext;
use excavator::utils::errors::{ErrorCode, ExcavatorError};
use excavator::utils::hasher::Hasher;

// Keep bcrypt cheap in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

///
/// Everything a test needs: the context under test plus handles onto the fakes so the
/// test can seed records and inspect what the flows did to them.
///
pub struct TestHarness {
    pub ctx: Arc<ServiceContext>,
    pub credentials: Arc<FakeCredentials>,
    pub ledger: Arc<FakeLedger>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn harness() -> TestHarness {
    let credentials = Arc::new(FakeCredentials::default());
    let ledger = Arc::new(FakeLedger::default());
    let mailer = Arc::new(RecordingMailer::default());

    let ctx = Arc::new(ServiceContext::new(
        test_config(),
        credentials.clone(),
        ledger.clone(),
        mailer.clone()));

    TestHarness { ctx, credentials, ledger, mailer }
}

pub fn test_config() -> Configuration {
    Configuration {
        address: "127.0.0.1:0".to_string(),
        base_url: "http://localhost:3000".to_string(),
        db_name: "excavator_test".to_string(),
        mongo_uri: "mongodb://localhost:27017".to_string(),
        mongo_credentials: None,
        jwt_access_key: "WizBee".to_string(),
        token_validity_hours: 24,
        bcrypt_cost: TEST_BCRYPT_COST,
        reset_window_minutes: 30,
        smtp_host: "localhost".to_string(),
        smtp_port: 587,
        smtp_username: None,
        smtp_password: None,
        mail_from: "contact@hmtrading.biz".to_string(),
        distributed_tracing: false,
        jaeger_endpoint: None,
    }
}

///
/// Build an employee record whose secret is the bcrypt hash of the given password.
///
pub async fn employee(name: &str, email: &str, username: &str, password: &str, is_active: bool) -> Employee {
    let phc = Hasher::new(TEST_BCRYPT_COST).hash(password).await.unwrap();

    Employee {
        id: ObjectId::new(),
        personal: Personal {
            name: name.to_string(),
            email: Some(email.to_string()),
            phone: None,
            gender: None,
        },
        professional: None,
        authorization: Authorization {
            username: username.to_string(),
            password: phc,
        },
        is_active,
        created_date: Some(bson::DateTime::now()),
        updated_date: Some(bson::DateTime::now()),
    }
}

///
/// An in-memory credential store.
///
#[derive(Default)]
pub struct FakeCredentials {
    records: Mutex<Vec<Employee>>,
}

impl FakeCredentials {
    pub fn seed(&self, employee: Employee) {
        self.records.lock().push(employee);
    }

    pub fn remove(&self, email: &str) {
        self.records.lock().retain(|record| record.personal.email.as_deref() != Some(email));
    }

    ///
    /// The stored hash for the given email - lets tests assert a secret did (not) change.
    ///
    pub fn phc_of(&self, email: &str) -> Option<String> {
        self.records.lock().iter()
            .find(|record| record.personal.email.as_deref() == Some(email))
            .map(|record| record.authorization.password.clone())
    }
}

#[async_trait]
impl CredentialStore for FakeCredentials {
    async fn find_active_by_username(&self, username: &str) -> Result<Option<Employee>, ExcavatorError> {
        Ok(self.records.lock().iter()
            .find(|record| record.is_active && record.authorization.username == username)
            .cloned())
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<Employee>, ExcavatorError> {
        Ok(self.records.lock().iter()
            .find(|record| record.is_active && record.personal.email.as_deref() == Some(email))
            .cloned())
    }

    async fn update_password(&self, email: &str, phc: &str) -> Result<bool, ExcavatorError> {
        let mut records = self.records.lock();

        match records.iter_mut().find(|record| record.is_active && record.personal.email.as_deref() == Some(email)) {
            Some(record) => {
                record.authorization.password = phc.to_string();
                Ok(true)
            },
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), ExcavatorError> {
        Ok(())
    }
}

///
/// An in-memory reset-token ledger with the same atomic-consume semantics as the real one.
///
#[derive(Default)]
pub struct FakeLedger {
    tokens: Mutex<HashMap<String, ResetToken>>,
}

impl FakeLedger {
    pub fn len(&self) -> usize {
        self.tokens.lock().len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tokens.lock().contains_key(key)
    }

    ///
    /// Plant a token directly, bypassing the issue path - used to fabricate expired keys.
    ///
    pub fn plant(&self, email: &str, expiry_time: DateTime<Utc>) -> String {
        let token = ResetToken::new(email, expiry_time);
        let key = token.key.clone();

        self.tokens.lock().insert(key.clone(), token);
        key
    }
}

#[async_trait]
impl ResetTokenLedger for FakeLedger {
    async fn issue(&self, email: &str, expiry_time: DateTime<Utc>) -> Result<String, ExcavatorError> {
        let token = ResetToken::new(email, expiry_time);
        let key = token.key.clone();

        self.tokens.lock().insert(key.clone(), token);
        Ok(key)
    }

    async fn consume(&self, key: &str, now: DateTime<Utc>) -> Result<TokenOutcome, ExcavatorError> {
        // remove() mirrors the store's find-and-delete - the record is gone whatever the outcome.
        match self.tokens.lock().remove(key) {
            None => Ok(TokenOutcome::Invalid),
            Some(token) if token.expired(now) => Ok(TokenOutcome::Expired),
            Some(token) => Ok(TokenOutcome::Valid { email: token.email }),
        }
    }
}

///
/// Records outbound mail instead of sending it, and can be told to fail like a dead relay.
///
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
    failing: Mutex<bool>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().clone()
    }

    pub fn fail_next_sends(&self, failing: bool) {
        *self.failing.lock() = failing;
    }
}

#[async_trait]
impl MailSender for RecordingMailer {
    async fn send(&self, mail: &MailMessage) -> Result<(), ExcavatorError> {
        if *self.failing.lock() {
            return Err(ErrorCode::MailSendError.with_msg("Unable to send mail: relay unreachable"))
        }

        self.sent.lock().push(mail.clone());
        Ok(())
    }
}

///
/// Pull the reset key out of the link in a captured mail.
///
pub fn key_from_mail(mail: &MailMessage) -> String {
    let marker = "/auth/reset-password/";
    let start = mail.text.find(marker).expect("No reset link in the mail") + marker.len();

    mail.text[start..].chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect()
}
