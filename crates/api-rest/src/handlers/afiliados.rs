//! Affiliate directory and clinical history endpoints.

use api_shared::{AfiliadoDetalle, AfiliadoListItem, ErrorRes, HistoriaClinica, HistoriaClinicaParams};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::Json;

use crate::error::{path_id, ApiError};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/v1/prestadores/afiliados",
    responses(
        (status = 200, description = "Affiliate list", body = [AfiliadoListItem])
    )
)]
#[axum::debug_handler]
pub async fn list_afiliados(State(state): State<AppState>) -> Json<Vec<AfiliadoListItem>> {
    tracing::info!(endpoint = "/afiliados", method = "GET", "handling request");
    Json(state.services.affiliates.list())
}

#[utoipa::path(
    get,
    path = "/v1/prestadores/afiliados/{id}",
    params(("id" = u64, Path, description = "Affiliate ID")),
    responses(
        (status = 200, description = "Affiliate detail", body = AfiliadoDetalle),
        (status = 400, description = "Invalid ID", body = ErrorRes),
        (status = 404, description = "Affiliate not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_afiliado(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AfiliadoDetalle>, ApiError> {
    tracing::info!(endpoint = "/afiliados/:id", method = "GET", id = %id, "handling request");
    let id = path_id("id", &id)?;
    Ok(Json(state.services.affiliates.get(id)?))
}

#[utoipa::path(
    get,
    path = "/v1/prestadores/afiliados/{id}/historia-clinica",
    params(("id" = u64, Path, description = "Affiliate ID"), HistoriaClinicaParams),
    responses(
        (status = 200, description = "Appointments and notes", body = HistoriaClinica),
        (status = 400, description = "Invalid ID", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_historia_clinica(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<HistoriaClinicaParams>, QueryRejection>,
) -> Result<Json<HistoriaClinica>, ApiError> {
    tracing::info!(
        endpoint = "/afiliados/:id/historia-clinica",
        method = "GET",
        id = %id,
        "handling request"
    );
    let id = path_id("id", &id)?;
    let Query(params) = query?;
    Ok(Json(state.services.affiliates.clinical_history(id, &params)))
}
