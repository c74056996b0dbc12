//! Therapeutic situations endpoints, nested under an affiliate.

use api_shared::{
    CambioEstadoSituacionReq, CambioEstadoSituacionRes, CreateSituacionReq, CreateSituacionRes,
    ErrorRes, MessageRes, PatchSituacionReq, SituacionesParams, SituacionesRes,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::error::{path_id, ApiError};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/v1/prestadores/afiliados/{id}/situaciones",
    params(("id" = u64, Path, description = "Titular affiliate ID"), SituacionesParams),
    responses(
        (status = 200, description = "Titular view, or group view with scope=grupo", body = SituacionesRes),
        (status = 400, description = "Invalid ID", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_situaciones(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<SituacionesParams>, QueryRejection>,
) -> Result<Json<SituacionesRes>, ApiError> {
    tracing::info!(endpoint = "/afiliados/:id/situaciones", method = "GET", id = %id, "handling request");
    let affiliate_id = path_id("afiliadoId", &id)?;
    let Query(params) = query?;
    Ok(Json(state.services.situations.list(affiliate_id, &params)?))
}

#[utoipa::path(
    post,
    path = "/v1/prestadores/afiliados/{id}/situaciones",
    params(("id" = u64, Path, description = "Titular affiliate ID")),
    request_body = CreateSituacionReq,
    responses(
        (status = 201, description = "Situation created", body = CreateSituacionRes),
        (status = 400, description = "Invalid request", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn create_situacion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateSituacionReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSituacionRes>), ApiError> {
    tracing::info!(endpoint = "/afiliados/:id/situaciones", method = "POST", id = %id, "handling request");
    let affiliate_id = path_id("afiliadoId", &id)?;
    let Json(req) = payload?;
    let res = state.services.situations.create(affiliate_id, req)?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    patch,
    path = "/v1/prestadores/afiliados/{id}/situaciones/{situacion_id}",
    params(
        ("id" = u64, Path, description = "Titular affiliate ID"),
        ("situacion_id" = u64, Path, description = "Situation ID")
    ),
    request_body = PatchSituacionReq,
    responses(
        (status = 200, description = "Situation updated", body = MessageRes),
        (status = 400, description = "Invalid request", body = ErrorRes),
        (status = 404, description = "Situation not found for this affiliate", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn patch_situacion(
    State(state): State<AppState>,
    Path((id, situacion_id)): Path<(String, String)>,
    payload: Result<Json<PatchSituacionReq>, JsonRejection>,
) -> Result<Json<MessageRes>, ApiError> {
    tracing::info!(
        endpoint = "/afiliados/:id/situaciones/:situacion_id",
        method = "PATCH",
        id = %id,
        situacion_id = %situacion_id,
        "handling request"
    );
    let affiliate_id = path_id("afiliadoId", &id)?;
    let situation_id = path_id("situacionId", &situacion_id)?;
    let Json(req) = payload?;
    Ok(Json(state.services.situations.patch(affiliate_id, situation_id, req)?))
}

#[utoipa::path(
    patch,
    path = "/v1/prestadores/afiliados/{id}/situaciones/{situacion_id}/estado",
    params(
        ("id" = u64, Path, description = "Titular affiliate ID"),
        ("situacion_id" = u64, Path, description = "Situation ID")
    ),
    request_body = CambioEstadoSituacionReq,
    responses(
        (status = 200, description = "Status changed", body = CambioEstadoSituacionRes),
        (status = 400, description = "Invalid request or missing reason", body = ErrorRes),
        (status = 404, description = "Situation not found for this affiliate", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn cambiar_estado_situacion(
    State(state): State<AppState>,
    Path((id, situacion_id)): Path<(String, String)>,
    payload: Result<Json<CambioEstadoSituacionReq>, JsonRejection>,
) -> Result<Json<CambioEstadoSituacionRes>, ApiError> {
    tracing::info!(
        endpoint = "/afiliados/:id/situaciones/:situacion_id/estado",
        method = "PATCH",
        id = %id,
        situacion_id = %situacion_id,
        "handling request"
    );
    let affiliate_id = path_id("afiliadoId", &id)?;
    let situation_id = path_id("situacionId", &situacion_id)?;
    let Json(req) = payload?;
    Ok(Json(
        state
            .services
            .situations
            .change_status(affiliate_id, situation_id, req)?,
    ))
}

#[utoipa::path(
    delete,
    path = "/v1/prestadores/afiliados/{id}/situaciones/{situacion_id}",
    params(
        ("id" = u64, Path, description = "Titular affiliate ID"),
        ("situacion_id" = u64, Path, description = "Situation ID")
    ),
    responses(
        (status = 204, description = "Situation deleted"),
        (status = 400, description = "Invalid ID", body = ErrorRes),
        (status = 404, description = "Situation not found for this affiliate", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_situacion(
    State(state): State<AppState>,
    Path((id, situacion_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    tracing::info!(
        endpoint = "/afiliados/:id/situaciones/:situacion_id",
        method = "DELETE",
        id = %id,
        situacion_id = %situacion_id,
        "handling request"
    );
    let affiliate_id = path_id("afiliadoId", &id)?;
    let situation_id = path_id("situacionId", &situacion_id)?;
    state.services.situations.delete(affiliate_id, situation_id)?;
    Ok(StatusCode::NO_CONTENT)
}
