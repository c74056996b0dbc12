use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AfiliadoListItem {
    pub id: u64,
    pub dni: String,
    pub nombre: String,
    pub apellido: String,
    pub plan_medico: String,
    pub titular: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AfiliadoDetalle {
    pub id: u64,
    pub nro_afiliado: String,
    pub dni: String,
    pub nombre: String,
    pub apellido: String,
    pub plan_medico: String,
    pub titular: bool,
    pub email: String,
    pub telefono: String,
    pub ciudad: String,
    pub provincia: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotaTurno {
    pub id: u64,
    pub fecha: String,
    pub prestador_id: u64,
    pub texto: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Turno {
    pub id: u64,
    pub fecha: String,
    pub especialidad: String,
    pub estado: String,
    pub notas: Vec<NotaTurno>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoriaClinica {
    pub afiliado_id: u64,
    pub page: usize,
    pub size: usize,
    pub total: usize,
    pub turnos: Vec<Turno>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HistoriaClinicaParams {
    /// Keep only the notes written by this provider.
    pub prestador_id: Option<String>,
}
