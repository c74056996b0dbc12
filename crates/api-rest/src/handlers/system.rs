//! Liveness, health and login.

use api_shared::auth::{LoginReq, LoginRes};
use api_shared::health::{HealthRes, PingRes};
use api_shared::{validate_login, ErrorRes, HealthService};
use axum::extract::rejection::JsonRejection;
use axum::response::Json;

use crate::error::ApiError;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/v1/prestadores/ping",
    responses(
        (status = 200, description = "Pong", body = PingRes)
    )
)]
#[axum::debug_handler]
pub async fn ping() -> Json<PingRes> {
    Json(PingRes::pong())
}

#[utoipa::path(
    post,
    path = "/v1/prestadores/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Login accepted", body = LoginRes),
        (status = 400, description = "Missing username", body = ErrorRes)
    )
)]
/// Login stub: any non-blank username is accepted.
#[axum::debug_handler]
pub async fn login(
    payload: Result<Json<LoginReq>, JsonRejection>,
) -> Result<Json<LoginRes>, ApiError> {
    tracing::info!(endpoint = "/login", method = "POST", "handling request");
    let Json(req) = payload?;
    Ok(Json(validate_login(&req)?))
}
