use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

use crate::model::claims::Claims;
use crate::utils::errors::{ErrorCode, ExcavatorError};

///
/// Issues and verifies the signed, time-boxed bearer tokens handed out at login.
///
/// This is pure, stateless crypto - nothing is persisted and there is no revocation list.
/// Verification fails closed: a bad signature, malformed structure or elapsed expiry all
/// yield the same InvalidBearerToken error.
///
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, validity_hours: i64) -> Self {
        TokenIssuer {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity: Duration::hours(validity_hours),
        }
    }

    ///
    /// Sign a token for the employee. The issue instant comes from the caller so the
    /// service clock (and the tests' fixed clock) is the single source of time.
    ///
    pub fn issue(&self, id: &str, username: &str, now: DateTime<Utc>) -> Result<String, ExcavatorError> {
        let claims = Claims {
            sub: id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
        };

        Ok(jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ExcavatorError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|err| ErrorCode::InvalidBearerToken
                .with_msg(&format!("Bearer token rejected: {}", err)))
    }
}
