use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A therapeutic situation of an affiliate or of one of their family-group members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Situacion {
    pub id: u64,
    /// Group titular the situation is filed under.
    pub afiliado_id: u64,
    /// Absent when the situation belongs to the titular.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miembro_id: Option<u64>,
    pub descripcion: String,
    pub fecha_inicio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<String>,
    pub estado: String,
    pub fecha_creacion: String,
    pub fecha_actualizacion: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegranteSituaciones {
    pub miembro_id: u64,
    pub nombre: String,
    /// `Titular`, `Hijo/a`, `Cónyuge`, ...
    pub parentesco: String,
    pub situaciones: Vec<Situacion>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SituacionesAfiliadoRes {
    pub afiliado_id: u64,
    pub items: Vec<Situacion>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SituacionesGrupoRes {
    pub afiliado_id: u64,
    pub integrantes: Vec<IntegranteSituaciones>,
}

/// Response of `GET /afiliados/{afiliadoId}/situaciones`, shaped by the `scope` parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SituacionesRes {
    Titular(SituacionesAfiliadoRes),
    Grupo(SituacionesGrupoRes),
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SituacionesParams {
    /// `grupo` returns the family group split by member; anything else the titular view.
    pub scope: Option<String>,
}

/// Body of `POST /afiliados/{afiliadoId}/situaciones`. The affiliate comes from the path.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSituacionReq {
    #[serde(default)]
    pub miembro_id: Option<i64>,
    pub descripcion: String,
    pub fecha_inicio: String,
    #[serde(default)]
    pub fecha_fin: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSituacionRes {
    pub id: u64,
    pub afiliado_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miembro_id: Option<u64>,
    pub estado: String,
    pub fecha_creacion: String,
}

/// Partial update. `fechaFin: ""` clears the end date.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PatchSituacionReq {
    pub descripcion: Option<String>,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CambioEstadoSituacionReq {
    /// `ACTIVA`, `ALTA` or `BAJA`.
    pub estado: String,
    pub usuario: String,
    #[serde(default)]
    pub motivo: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CambioEstadoSituacionRes {
    pub id: u64,
    pub estado: String,
    pub fecha_actualizacion: String,
}
