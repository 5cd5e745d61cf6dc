use serde::{Deserialize, Serialize};

use crate::model::employee::Employee;

///
/// The JSON request and response shapes for the auth endpoints.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginResponse {
    pub user: UserSummary,
    pub token: String,
}

///
/// The slice of an employee returned on a successful login - never the hashed secret.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub username: String,
}

impl From<&Employee> for UserSummary {
    fn from(employee: &Employee) -> Self {
        UserSummary {
            id: employee.id.to_hex(),
            name: employee.personal.name.clone(),
            email: employee.personal.email.clone(),
            username: employee.authorization.username.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResetLinkQuery {
    pub email: String,
}

///
/// Deliberately success-shaped even when the account is unknown - result tells the
/// client what actually happened.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResetLinkResponse {
    pub message: String,
    pub result: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResetPasswordRequest {
    pub key: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResetPasswordResponse {
    pub message: String,
    pub result: bool,
}
