use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AfiliadoBasico, HistorialEstado};

// ============================================================================
// Autorizaciones
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutorizacionListItem {
    pub id: u64,
    pub tipo: String,
    pub afiliado: AfiliadoBasico,
    pub estado: String,
    pub fecha_creacion: String,
    pub fecha_actualizacion: String,
    pub procedimiento: String,
    pub especialidad: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutorizacionDetalle {
    pub id: u64,
    pub tipo: String,
    pub estado: String,
    pub fecha_creacion: String,
    pub fecha_actualizacion: String,
    pub afiliado: AfiliadoBasico,
    pub procedimiento: String,
    pub especialidad: String,
    pub historial: Vec<HistorialEstado>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAutorizacionReq {
    pub afiliado_id: i64,
    pub procedimiento: String,
    pub especialidad: String,
    #[serde(default)]
    pub estado_inicial: Option<String>,
}

/// Partial update: empty fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateAutorizacionReq {
    pub procedimiento: String,
    pub especialidad: String,
}

// ============================================================================
// Recetas
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecetaListItem {
    pub id: u64,
    pub tipo: String,
    pub afiliado: AfiliadoBasico,
    pub estado: String,
    pub fecha_creacion: String,
    pub fecha_actualizacion: String,
    pub medicamento: String,
    pub dosis: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecetaDetalle {
    pub id: u64,
    pub tipo: String,
    pub estado: String,
    pub fecha_creacion: String,
    pub fecha_actualizacion: String,
    pub afiliado: AfiliadoBasico,
    pub medicamento: String,
    pub dosis: String,
    pub historial: Vec<HistorialEstado>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecetaReq {
    pub afiliado_id: i64,
    pub medicamento: String,
    pub dosis: String,
    #[serde(default)]
    pub estado_inicial: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateRecetaReq {
    pub medicamento: String,
    pub dosis: String,
}

// ============================================================================
// Reintegros
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReintegroListItem {
    pub id: u64,
    pub tipo: String,
    pub afiliado: AfiliadoBasico,
    pub estado: String,
    pub fecha_creacion: String,
    pub fecha_actualizacion: String,
    pub prestacion: String,
    /// `Efectivo`, `Debito` or `Credito`.
    pub metodo: String,
    pub monto: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReintegroDetalle {
    pub id: u64,
    pub tipo: String,
    pub estado: String,
    pub fecha_creacion: String,
    pub fecha_actualizacion: String,
    pub afiliado: AfiliadoBasico,
    pub prestacion: String,
    pub metodo: String,
    pub monto: f64,
    pub historial: Vec<HistorialEstado>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReintegroReq {
    pub afiliado_id: i64,
    pub prestacion: String,
    pub metodo: String,
    pub monto: f64,
    #[serde(default)]
    pub estado_inicial: Option<String>,
}

/// Partial update: empty strings and a zero `monto` are left unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateReintegroReq {
    pub prestacion: String,
    pub metodo: String,
    pub monto: f64,
}
