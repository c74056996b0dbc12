use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{AutorizacionListItem, RecetaListItem, ReintegroListItem};

/// Denormalised affiliate snapshot copied onto every request record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AfiliadoBasico {
    pub id: u64,
    pub dni: String,
    pub nombre: String,
    pub apellido: String,
}

/// One entry of a request's status history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistorialEstado {
    pub estado: String,
    pub usuario: String,
    pub fecha_cambio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
}

/// Body of `PATCH /solicitudes/{family}/{id}/estado`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CambioEstadoReq {
    pub nuevo_estado: String,
    pub usuario: String,
    #[serde(default)]
    pub motivo: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CambioEstadoRes {
    pub id: u64,
    pub tipo: String,
    pub estado: String,
    pub fecha_actualizacion: String,
}

/// Lean response returned after creating any request family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSolicitudRes {
    pub id: u64,
    pub tipo: String,
    pub estado: String,
    pub fecha_creacion: String,
}

/// Page envelope used by every list endpoint.
///
/// `size` echoes the requested (or defaulted) page size, not `items.len()`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[aliases(
    PaginatedAutorizaciones = Paginated<AutorizacionListItem>,
    PaginatedRecetas = Paginated<RecetaListItem>,
    PaginatedReintegros = Paginated<ReintegroListItem>
)]
pub struct Paginated<T> {
    pub page: usize,
    pub size: usize,
    pub total: usize,
    pub items: Vec<T>,
}

/// Raw list query parameters.
///
/// Kept as strings so that unparseable `page`/`size` values can be coerced to their defaults
/// instead of failing the request.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Exact status filter, e.g. `EN_ANALISIS`.
    pub estado: Option<String>,
    /// Case-insensitive free-text search over ID, affiliate and domain fields.
    pub q: Option<String>,
    /// Zero-based page index.
    pub page: Option<String>,
    pub size: Option<String>,
    /// `id`, `fechaCreacion` or `fechaActualizacion`, optionally suffixed with `,asc`/`,desc`.
    pub sort: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}
