use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bcrypt::BcryptError;
use bson::document::ValueAccessError;
use serde_json::json;
use tokio::task::JoinError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorCode {
    ServerStartError                = 0400,
    HashThreadingIssue              = 0401,
    IOError                         = 0402,
    UnableToReadCredentials         = 0500,
    MongoDBError                    = 0503,
    InvalidBSON                     = 0504,
    InvalidJSON                     = 0505,
    BSONFieldNotFound               = 0507,
    HashingError                    = 0509,
    TokenSigningError               = 0510,
    MailComposeError                = 0600,
    MailSendError                   = 0601,
    ValidationError                 = 1000,
    AuthenticationFailed            = 2100,
    InvalidBearerToken              = 2101,
    ResetTokenInvalid               = 2200,
    ResetTokenExpired               = 2201,
}

impl ErrorCode {
    pub fn with_msg(&self, message: &str) -> ExcavatorError {
        ExcavatorError::new(*self, message)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExcavatorError {
    error_code: ErrorCode,
    message: String,
}

impl ExcavatorError {
    pub fn new(error_code: ErrorCode, message: &str) -> Self {
        ExcavatorError { error_code, message: message.to_string() }
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for ExcavatorError {
    fn from(error: std::io::Error) -> Self {
        ErrorCode::IOError.with_msg(&format!("IO failure: {}", error))
    }
}

impl From<serde_json::Error> for ExcavatorError {
    fn from(error: serde_json::Error) -> Self {
        ErrorCode::InvalidJSON.with_msg(&format!("Unable to convert to json: {}", error))
    }
}

impl From<mongodb::error::Error> for ExcavatorError {
    fn from(error: mongodb::error::Error) -> Self {
        ErrorCode::MongoDBError.with_msg(&format!("MongoDB error: {}", error))
    }
}

impl From<ValueAccessError> for ExcavatorError {
    fn from(error: ValueAccessError) -> Self {
        ErrorCode::BSONFieldNotFound.with_msg(&format!("Unable to read BSON: {}", error))
    }
}

impl From<bson::ser::Error> for ExcavatorError {
    fn from(error: bson::ser::Error) -> Self {
        ErrorCode::InvalidBSON.with_msg(&format!("Unable to serialise BSON: {}", error))
    }
}

impl From<bson::de::Error> for ExcavatorError {
    fn from(error: bson::de::Error) -> Self {
        ErrorCode::InvalidBSON.with_msg(&format!("Unable to deserialise BSON: {}", error))
    }
}

impl From<JoinError> for ExcavatorError {
    fn from(error: JoinError) -> Self {
        ErrorCode::HashThreadingIssue.with_msg(&format!("Unable to hash: {}", error))
    }
}

impl From<BcryptError> for ExcavatorError {
    fn from(error: BcryptError) -> Self {
        ErrorCode::HashingError.with_msg(&format!("Unable to hash password: {}", error))
    }
}

impl From<jsonwebtoken::errors::Error> for ExcavatorError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        ErrorCode::TokenSigningError.with_msg(&format!("Unable to sign token: {}", error))
    }
}

impl From<lettre::error::Error> for ExcavatorError {
    fn from(error: lettre::error::Error) -> Self {
        ErrorCode::MailComposeError.with_msg(&format!("Unable to compose mail: {}", error))
    }
}

impl From<lettre::address::AddressError> for ExcavatorError {
    fn from(error: lettre::address::AddressError) -> Self {
        ErrorCode::MailComposeError.with_msg(&format!("Invalid mail address: {}", error))
    }
}

impl From<lettre::transport::smtp::Error> for ExcavatorError {
    fn from(error: lettre::transport::smtp::Error) -> Self {
        ErrorCode::MailSendError.with_msg(&format!("Unable to send mail: {}", error))
    }
}

///
/// Convert our internal error into an HTTP response.
///
/// 401s carry only a message so the caller cannot tell which factor was wrong. Infrastructure
/// failures carry the error code so clients know a retry is worthwhile.
///
impl IntoResponse for ExcavatorError {
    fn into_response(self) -> Response {
        use ErrorCode::*;

        match self.error_code {
            AuthenticationFailed |
            InvalidBearerToken => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "message": self.message }))).into_response()
            },

            ValidationError   |
            ResetTokenInvalid |
            ResetTokenExpired => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": self.message, "result": false })))
                    .into_response()
            },

            ServerStartError        |
            HashThreadingIssue      |
            IOError                 |
            UnableToReadCredentials |
            MongoDBError            |
            InvalidBSON             |
            InvalidJSON             |
            BSONFieldNotFound       |
            HashingError            |
            TokenSigningError       |
            MailComposeError        |
            MailSendError => {
                tracing::error!("Request failed: {} ({})", self.message, self.error_code as u32);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({
                    "message": self.message,
                    "result": false,
                    "error": self.error_code as u32 })))
                    .into_response()
            },
        }
    }
}
