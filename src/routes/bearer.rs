use std::sync::Arc;
use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::utils::context::ServiceContext;

///
/// Middleware guarding the CRM record routes.
///
/// Verification fails closed - a missing, malformed, tampered or expired token is always
/// the same 401 with a structured error object. On success the verified claims are placed
/// in the request extensions for the downstream handler.
///
/// Mount with axum::middleware::from_fn_with_state(ctx, bearer::require_bearer).
///
pub async fn require_bearer(
    State(ctx): State<Arc<ServiceContext>>,
    mut request: Request,
    next: Next) -> Response {

    let header = match request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()) {
        Some(header) => header,
        None => return rejected("Bearer token missing from request."),
    };

    // The header is 'Bearer <token>'.
    let token = match header.strip_prefix("Bearer ") {
        Some(token) => token,
        None => return rejected("Authorization header is not a bearer token."),
    };

    let claims = match ctx.tokens().verify(token) {
        Ok(claims) => claims,
        Err(err) => return rejected(err.message()),
    };

    request.extensions_mut().insert(claims);
    next.run(request).await
}

fn rejected(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({
        "name": "JsonWebTokenError",
        "message": message })))
        .into_response()
}
