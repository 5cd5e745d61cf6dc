use serde::{Deserialize, Serialize};

///
/// The claims carried inside a signed bearer token.
///
/// Nothing here is secret - validity comes from the signature and the expiry alone.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Claims {
    pub sub: String,      // The employee's id.
    pub username: String,
    pub iat: i64,         // Issued at (seconds since epoch).
    pub exp: i64,         // Expires at (seconds since epoch).
}
