use chrono::Duration;
use tracing::{instrument, warn};

use crate::mail::templates;
use crate::model::api::{ResetLinkQuery, ResetLinkResponse};
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, ExcavatorError};

///
/// Issue a reset token and mail its link to the employee.
///
/// An unknown email is NOT a hard error - the response is success-shaped with
/// result=false so the UX is never blocked on it. Note this does disclose whether an
/// address is registered, which the login flow deliberately avoids.
///
#[instrument(skip(ctx))]
pub async fn send_reset_link(ctx: &ServiceContext, query: ResetLinkQuery) -> Result<ResetLinkResponse, ExcavatorError> {

    if query.email.trim().is_empty() {
        return Err(ErrorCode::ValidationError.with_msg("An email address must be provided"))
    }

    // Only active accounts may start a reset.
    let employee = match ctx.credentials().find_active_by_email(&query.email).await? {
        Some(employee) => employee,
        None => {
            warn!("Reset link requested for an unregistered address");
            return Ok(ResetLinkResponse {
                message: format!("The email address {} is not registered with us.", query.email),
                result: false,
            })
        },
    };

    // Outstanding tokens for this email stay valid - a reset may be in flight from
    // another device.
    let expiry_time = ctx.now() + Duration::minutes(ctx.config().reset_window_minutes);
    let key = ctx.reset_tokens().issue(&query.email, expiry_time).await?;

    let name = &employee.personal.name;
    let mail = templates::reset_link(
        name,
        employee.mail_address().unwrap_or(&query.email),
        &ctx.config().base_url,
        &key,
        ctx.config().reset_window_minutes);

    // The send outcome is part of this response - if the relay rejects the mail the
    // client is told, rather than left waiting for a link that never arrives.
    ctx.mailer().send(&mail).await?;

    Ok(ResetLinkResponse {
        message: format!("A reset password link has been sent to {}.", query.email),
        result: true,
    })
}
