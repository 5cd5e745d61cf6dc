pub mod credential;
pub mod mongo;
pub mod reset_token;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::employee::Employee;
use crate::model::reset_token::TokenOutcome;
use crate::utils::errors::ExcavatorError;

pub mod prelude {
    // Collection names.
    pub const EMPLOYEES: &str = "Employees";
    pub const AUTH:      &str = "Auth";
}

///
/// The durable store of employee credentials.
///
/// A None/false return is the terminal 'no such user' outcome - an Err is a retryable
/// infrastructure failure. The two must never be conflated.
///
#[async_trait]
pub trait CredentialStore: Send + Sync {
    ///
    /// Find an employee by login username - only returns records with the active flag set.
    ///
    async fn find_active_by_username(&self, username: &str) -> Result<Option<Employee>, ExcavatorError>;

    ///
    /// Find an employee by email address - only returns records with the active flag set.
    ///
    async fn find_active_by_email(&self, email: &str) -> Result<Option<Employee>, ExcavatorError>;

    ///
    /// Replace the hashed secret on the employee with the given email. Returns false if
    /// no matching record exists.
    ///
    async fn update_password(&self, email: &str, phc: &str) -> Result<bool, ExcavatorError>;

    ///
    /// A connectivity probe for the health endpoint.
    ///
    async fn ping(&self) -> Result<(), ExcavatorError>;
}

///
/// The ledger of outstanding reset-password tokens. Sole owner of the token records.
///
#[async_trait]
pub trait ResetTokenLedger: Send + Sync {
    ///
    /// Create and store a token for the email, returning the opaque key. Previously
    /// issued tokens for the same email remain valid.
    ///
    async fn issue(&self, email: &str, expiry_time: DateTime<Utc>) -> Result<String, ExcavatorError>;

    ///
    /// Atomically look up and remove the token. An unknown key is Invalid, a known key
    /// past its expiry is Expired (and now gone), and a live key yields the owning email.
    /// A second consume of the same key is therefore always Invalid.
    ///
    async fn consume(&self, key: &str, now: DateTime<Utc>) -> Result<TokenOutcome, ExcavatorError>;
}
