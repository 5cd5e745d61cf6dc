use tracing::instrument;

use crate::model::api::{LoginRequest, LoginResponse, UserSummary};
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, ExcavatorError};

// An unknown username and a wrong password produce this exact same response, so a caller
// cannot probe which factor was wrong.
const FAILED_MSG: &str = "Authentication failed. Your email or password is incorrect!";

///
/// Authenticate an employee and issue a bearer token.
///
#[instrument(skip(ctx, request))]
pub async fn login(ctx: &ServiceContext, request: LoginRequest) -> Result<LoginResponse, ExcavatorError> {

    // Load the employee's credential record - inactive records are never returned.
    let employee = match ctx.credentials().find_active_by_username(&request.username).await? {
        Some(employee) => employee,
        None => return Err(ErrorCode::AuthenticationFailed.with_msg(FAILED_MSG)),
    };

    // Compare the password against the hash saved in the db.
    let valid = ctx.hasher().verify(&request.password, &employee.authorization.password).await?;

    if !valid {
        return Err(ErrorCode::AuthenticationFailed.with_msg(FAILED_MSG))
    }

    // Generate a signed token with the expiry time.
    let token = ctx.tokens().issue(
        &employee.id.to_hex(),
        &employee.authorization.username,
        ctx.now())?;

    Ok(LoginResponse { user: UserSummary::from(&employee), token })
}
