use std::sync::Arc;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::model::api::{LoginRequest, ResetLinkQuery, ResetPasswordRequest};
use crate::services;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, ExcavatorError};

///
/// The HTTP handlers for the auth endpoints.
///
/// These only translate between the wire and the service flows - every outcome decision
/// is made in services::* and merely mapped to a status code here.
///
/// A missing or malformed JSON body is a 400, not the unhandled 500 it would otherwise
/// surface as.
///

pub async fn login(
    State(ctx): State<Arc<ServiceContext>>,
    payload: Option<Json<LoginRequest>>) -> Result<impl IntoResponse, ExcavatorError> {

    let request = match payload {
        Some(Json(request)) => request,
        None => return Err(ErrorCode::ValidationError.with_msg("A username and password must be provided")),
    };

    let response = services::login::login(&ctx, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn send_reset_link(
    State(ctx): State<Arc<ServiceContext>>,
    Query(query): Query<ResetLinkQuery>) -> Result<impl IntoResponse, ExcavatorError> {

    let response = services::send_reset_link::send_reset_link(&ctx, query).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn reset_password(
    State(ctx): State<Arc<ServiceContext>>,
    payload: Option<Json<ResetPasswordRequest>>) -> Result<impl IntoResponse, ExcavatorError> {

    let request = match payload {
        Some(Json(request)) => request,
        None => return Err(ErrorCode::ValidationError.with_msg("A reset key and new password must be provided")),
    };

    let response = services::reset_password::reset_password(&ctx, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
