use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// Keys are truncated so the reset URL stays short enough to paste from a plain-text mail.
const KEY_LEN: usize = 12;

///
/// A short-lived, single-use reset token from the Auth collection.
///
/// The record is owned solely by the reset-token ledger: it is created when a reset link
/// is requested and removed (atomically) the first time it is looked up after use or
/// expiry. Several outstanding tokens may exist for the same email.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResetToken {
    pub key: String,
    pub email: String,
    pub expiry_time: bson::DateTime,
}

impl ResetToken {
    pub fn new(email: &str, expiry_time: DateTime<Utc>) -> Self {
        ResetToken {
            key: generate_key(),
            email: email.to_string(),
            expiry_time: bson::DateTime::from_chrono(expiry_time),
        }
    }

    pub fn expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry_time.to_chrono()
    }
}

///
/// The outcome of consuming a reset token.
///
#[derive(Clone, Debug, PartialEq)]
pub enum TokenOutcome {
    Valid { email: String },
    Invalid,
    Expired,
}

///
/// Generate an opaque reset key.
///
/// The key is a hash over a high-entropy, time-varying seed - never anything derived from
/// the user's own secrets - truncated to a fixed short length for URL transport.
///
fn generate_key() -> String {
    let seed = format!("{}:{}:{}",
        uuid::Uuid::new_v4().to_hyphenated(),
        Utc::now().timestamp_millis(),
        rand::random::<u64>());

    let digest = Sha256::digest(seed.as_bytes());
    hex::encode(digest)[..KEY_LEN].to_string()
}
