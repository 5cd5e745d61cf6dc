use tracing::{instrument, warn};

use crate::mail::templates;
use crate::model::api::{ResetPasswordRequest, ResetPasswordResponse};
use crate::model::reset_token::TokenOutcome;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, ExcavatorError};

///
/// Complete a password reset using a previously mailed token.
///
/// A rejected token is reported with result=false rather than a hard error - the token is
/// terminal either way and the client must request a fresh link.
///
#[instrument(skip(ctx, request))]
pub async fn reset_password(ctx: &ServiceContext, request: ResetPasswordRequest) -> Result<ResetPasswordResponse, ExcavatorError> {

    // Validate the new password BEFORE consuming the token, so a bad request doesn't
    // burn a perfectly good reset link.
    if request.password.is_empty() {
        return Err(ErrorCode::ValidationError.with_msg("A new password must be provided"))
    }

    // Consume the token - this is atomic, so the same key can never be spent twice.
    let email = match ctx.reset_tokens().consume(&request.key, ctx.now()).await? {
        TokenOutcome::Valid { email } => email,
        TokenOutcome::Invalid => {
            return Ok(ResetPasswordResponse {
                message: "The reset password link is invalid or has already been used. Please request a new link.".to_string(),
                result: false,
            })
        },
        TokenOutcome::Expired => {
            return Ok(ResetPasswordResponse {
                message: "The reset password link has expired. Please request a new link.".to_string(),
                result: false,
            })
        },
    };

    // Hash the new password in a blocking thread.
    let phc = ctx.hasher().hash(&request.password).await?;

    // Update the credential. If the account vanished between issue and completion the
    // token is already consumed - that asymmetry is deliberate, a failed completion never
    // resurrects a token.
    if !ctx.credentials().update_password(&email, &phc).await? {
        warn!("Reset token consumed but the account no longer exists");
        return Ok(ResetPasswordResponse {
            message: "The account for this reset link no longer exists.".to_string(),
            result: false,
        })
    }

    // Let the owner know their password changed, in case it wasn't them.
    let mail = match ctx.credentials().find_active_by_email(&email).await? {
        Some(employee) => templates::password_changed(&employee.personal.name, &email),
        None => templates::password_changed("there", &email),
    };

    ctx.mailer().send(&mail).await?;

    Ok(ResetPasswordResponse {
        message: "Your password has been changed successfully.".to_string(),
        result: true,
    })
}
