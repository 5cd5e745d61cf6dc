pub mod auth;
pub mod bearer;

use std::sync::Arc;
use axum::{Json, Router};
use axum::extract::State;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::utils::context::ServiceContext;
use crate::utils::errors::ExcavatorError;

///
/// Build the HTTP surface for the auth core.
///
/// The CRM record routers (employees, surveys) are external to this crate - they mount
/// alongside these routes and layer on bearer::require_bearer for protection.
///
pub fn router(ctx: Arc<ServiceContext>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/auth/login", post(auth::login))
        .route("/auth/send-reset-password-link", get(auth::send_reset_link))
        .route("/auth/reset-password", post(auth::reset_password))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn index() -> &'static str {
    "Tejas Enterprises APIs working!"
}

///
/// Liveness probe - pings the credential store so a broken MongoDB connection surfaces here.
///
async fn health(State(ctx): State<Arc<ServiceContext>>) -> Result<Json<Value>, ExcavatorError> {
    ctx.credentials().ping().await?;
    Ok(Json(json!({ "status": "UP" })))
}
