//! Request workflow endpoints: authorizations, prescriptions and reimbursements.
//!
//! The three families expose the same five operations. The handlers are thin: path parsing,
//! body rejection mapping and status codes. Everything else happens in the family's service.

use api_shared::{
    AutorizacionDetalle, CambioEstadoReq, CambioEstadoRes, CreateAutorizacionReq,
    CreateRecetaReq, CreateReintegroReq, CreateSolicitudRes, ErrorRes, ListParams, MessageRes,
    PaginatedAutorizaciones, PaginatedRecetas, PaginatedReintegros, RecetaDetalle,
    ReintegroDetalle, UpdateAutorizacionReq, UpdateRecetaReq, UpdateReintegroReq,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::error::{path_id, ApiError};
use crate::AppState;

// ============================================================================
// Autorizaciones
// ============================================================================

#[utoipa::path(
    get,
    path = "/v1/prestadores/solicitudes/autorizaciones",
    params(ListParams),
    responses(
        (status = 200, description = "Page of authorizations", body = PaginatedAutorizaciones),
        (status = 400, description = "Invalid query string", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_autorizaciones(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PaginatedAutorizaciones>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/autorizaciones", method = "GET", "handling request");
    let Query(params) = query?;
    Ok(Json(state.services.authorizations.list(&params)?))
}

#[utoipa::path(
    get,
    path = "/v1/prestadores/solicitudes/autorizaciones/{id}",
    params(("id" = u64, Path, description = "Authorization ID")),
    responses(
        (status = 200, description = "Authorization with history", body = AutorizacionDetalle),
        (status = 400, description = "Invalid ID", body = ErrorRes),
        (status = 404, description = "Authorization not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_autorizacion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AutorizacionDetalle>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/autorizaciones/:id", method = "GET", id = %id, "handling request");
    let id = path_id("id", &id)?;
    Ok(Json(state.services.authorizations.get(id)?))
}

#[utoipa::path(
    post,
    path = "/v1/prestadores/solicitudes/autorizaciones",
    request_body = CreateAutorizacionReq,
    responses(
        (status = 201, description = "Authorization created", body = CreateSolicitudRes),
        (status = 400, description = "Invalid request", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn create_autorizacion(
    State(state): State<AppState>,
    payload: Result<Json<CreateAutorizacionReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSolicitudRes>), ApiError> {
    tracing::info!(endpoint = "/solicitudes/autorizaciones", method = "POST", "handling request");
    let Json(req) = payload?;
    let res = state.services.authorizations.create(req)?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    patch,
    path = "/v1/prestadores/solicitudes/autorizaciones/{id}",
    params(("id" = u64, Path, description = "Authorization ID")),
    request_body = UpdateAutorizacionReq,
    responses(
        (status = 200, description = "Authorization updated", body = MessageRes),
        (status = 400, description = "Invalid request", body = ErrorRes),
        (status = 404, description = "Authorization not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_autorizacion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAutorizacionReq>, JsonRejection>,
) -> Result<Json<MessageRes>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/autorizaciones/:id", method = "PATCH", id = %id, "handling request");
    let id = path_id("id", &id)?;
    let Json(req) = payload?;
    Ok(Json(state.services.authorizations.update(id, req)?))
}

#[utoipa::path(
    patch,
    path = "/v1/prestadores/solicitudes/autorizaciones/{id}/estado",
    params(("id" = u64, Path, description = "Authorization ID")),
    request_body = CambioEstadoReq,
    responses(
        (status = 200, description = "Status changed", body = CambioEstadoRes),
        (status = 400, description = "Invalid request or missing reason", body = ErrorRes),
        (status = 404, description = "Authorization not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn cambiar_estado_autorizacion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CambioEstadoReq>, JsonRejection>,
) -> Result<Json<CambioEstadoRes>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/autorizaciones/:id/estado", method = "PATCH", id = %id, "handling request");
    let id = path_id("id", &id)?;
    let Json(req) = payload?;
    Ok(Json(state.services.authorizations.change_status(id, req)?))
}

// ============================================================================
// Recetas
// ============================================================================

#[utoipa::path(
    get,
    path = "/v1/prestadores/solicitudes/recetas",
    params(ListParams),
    responses(
        (status = 200, description = "Page of prescriptions", body = PaginatedRecetas),
        (status = 400, description = "Invalid query string", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_recetas(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PaginatedRecetas>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/recetas", method = "GET", "handling request");
    let Query(params) = query?;
    Ok(Json(state.services.prescriptions.list(&params)?))
}

#[utoipa::path(
    get,
    path = "/v1/prestadores/solicitudes/recetas/{id}",
    params(("id" = u64, Path, description = "Prescription ID")),
    responses(
        (status = 200, description = "Prescription with history", body = RecetaDetalle),
        (status = 400, description = "Invalid ID", body = ErrorRes),
        (status = 404, description = "Prescription not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_receta(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecetaDetalle>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/recetas/:id", method = "GET", id = %id, "handling request");
    let id = path_id("id", &id)?;
    Ok(Json(state.services.prescriptions.get(id)?))
}

#[utoipa::path(
    post,
    path = "/v1/prestadores/solicitudes/recetas",
    request_body = CreateRecetaReq,
    responses(
        (status = 201, description = "Prescription created", body = CreateSolicitudRes),
        (status = 400, description = "Invalid request", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn create_receta(
    State(state): State<AppState>,
    payload: Result<Json<CreateRecetaReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSolicitudRes>), ApiError> {
    tracing::info!(endpoint = "/solicitudes/recetas", method = "POST", "handling request");
    let Json(req) = payload?;
    let res = state.services.prescriptions.create(req)?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    patch,
    path = "/v1/prestadores/solicitudes/recetas/{id}",
    params(("id" = u64, Path, description = "Prescription ID")),
    request_body = UpdateRecetaReq,
    responses(
        (status = 200, description = "Prescription updated", body = MessageRes),
        (status = 400, description = "Invalid request", body = ErrorRes),
        (status = 404, description = "Prescription not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_receta(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRecetaReq>, JsonRejection>,
) -> Result<Json<MessageRes>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/recetas/:id", method = "PATCH", id = %id, "handling request");
    let id = path_id("id", &id)?;
    let Json(req) = payload?;
    Ok(Json(state.services.prescriptions.update(id, req)?))
}

#[utoipa::path(
    patch,
    path = "/v1/prestadores/solicitudes/recetas/{id}/estado",
    params(("id" = u64, Path, description = "Prescription ID")),
    request_body = CambioEstadoReq,
    responses(
        (status = 200, description = "Status changed", body = CambioEstadoRes),
        (status = 400, description = "Invalid request or missing reason", body = ErrorRes),
        (status = 404, description = "Prescription not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn cambiar_estado_receta(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CambioEstadoReq>, JsonRejection>,
) -> Result<Json<CambioEstadoRes>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/recetas/:id/estado", method = "PATCH", id = %id, "handling request");
    let id = path_id("id", &id)?;
    let Json(req) = payload?;
    Ok(Json(state.services.prescriptions.change_status(id, req)?))
}

// ============================================================================
// Reintegros
// ============================================================================

#[utoipa::path(
    get,
    path = "/v1/prestadores/solicitudes/reintegros",
    params(ListParams),
    responses(
        (status = 200, description = "Page of reimbursements", body = PaginatedReintegros),
        (status = 400, description = "Invalid query string", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_reintegros(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PaginatedReintegros>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/reintegros", method = "GET", "handling request");
    let Query(params) = query?;
    Ok(Json(state.services.reimbursements.list(&params)?))
}

#[utoipa::path(
    get,
    path = "/v1/prestadores/solicitudes/reintegros/{id}",
    params(("id" = u64, Path, description = "Reimbursement ID")),
    responses(
        (status = 200, description = "Reimbursement with history", body = ReintegroDetalle),
        (status = 400, description = "Invalid ID", body = ErrorRes),
        (status = 404, description = "Reimbursement not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_reintegro(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReintegroDetalle>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/reintegros/:id", method = "GET", id = %id, "handling request");
    let id = path_id("id", &id)?;
    Ok(Json(state.services.reimbursements.get(id)?))
}

#[utoipa::path(
    post,
    path = "/v1/prestadores/solicitudes/reintegros",
    request_body = CreateReintegroReq,
    responses(
        (status = 201, description = "Reimbursement created", body = CreateSolicitudRes),
        (status = 400, description = "Invalid request", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn create_reintegro(
    State(state): State<AppState>,
    payload: Result<Json<CreateReintegroReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSolicitudRes>), ApiError> {
    tracing::info!(endpoint = "/solicitudes/reintegros", method = "POST", "handling request");
    let Json(req) = payload?;
    let res = state.services.reimbursements.create(req)?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    patch,
    path = "/v1/prestadores/solicitudes/reintegros/{id}",
    params(("id" = u64, Path, description = "Reimbursement ID")),
    request_body = UpdateReintegroReq,
    responses(
        (status = 200, description = "Reimbursement updated", body = MessageRes),
        (status = 400, description = "Invalid request", body = ErrorRes),
        (status = 404, description = "Reimbursement not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_reintegro(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateReintegroReq>, JsonRejection>,
) -> Result<Json<MessageRes>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/reintegros/:id", method = "PATCH", id = %id, "handling request");
    let id = path_id("id", &id)?;
    let Json(req) = payload?;
    Ok(Json(state.services.reimbursements.update(id, req)?))
}

#[utoipa::path(
    patch,
    path = "/v1/prestadores/solicitudes/reintegros/{id}/estado",
    params(("id" = u64, Path, description = "Reimbursement ID")),
    request_body = CambioEstadoReq,
    responses(
        (status = 200, description = "Status changed", body = CambioEstadoRes),
        (status = 400, description = "Invalid request or missing reason", body = ErrorRes),
        (status = 404, description = "Reimbursement not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn cambiar_estado_reintegro(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CambioEstadoReq>, JsonRejection>,
) -> Result<Json<CambioEstadoRes>, ApiError> {
    tracing::info!(endpoint = "/solicitudes/reintegros/:id/estado", method = "PATCH", id = %id, "handling request");
    let id = path_id("id", &id)?;
    let Json(req) = payload?;
    Ok(Json(state.services.reimbursements.change_status(id, req)?))
}
