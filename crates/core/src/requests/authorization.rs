use api_shared::{
    AutorizacionDetalle, AutorizacionListItem, CreateAutorizacionReq, UpdateAutorizacionReq,
};
use prestadores_types::NonEmptyText;

use super::{ParsedCreate, RequestWire};
use crate::constants::AUTHORIZATION_FIRST_ID;
use crate::shared::{affiliate_to_wire, format_timestamp, history_to_wire};
use crate::validation::{optional_status, required_id, required_text};
use crate::workflow::{RequestFields, RequestKind, RequestRecord, RequestSummary};
use crate::ProviderResult;

/// Prior authorization of a medical procedure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Authorization {
    pub procedure: NonEmptyText,
    pub specialty: NonEmptyText,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationPatch {
    pub procedure: Option<NonEmptyText>,
    pub specialty: Option<NonEmptyText>,
}

impl RequestFields for Authorization {
    type Patch = AuthorizationPatch;

    const KIND: RequestKind = RequestKind::Authorization;
    const FIRST_ID: u64 = AUTHORIZATION_FIRST_ID;

    fn apply_patch(&mut self, patch: AuthorizationPatch) {
        if let Some(procedure) = patch.procedure {
            self.procedure = procedure;
        }
        if let Some(specialty) = patch.specialty {
            self.specialty = specialty;
        }
    }

    fn search_haystack(&self) -> Vec<&str> {
        vec![self.procedure.as_str(), self.specialty.as_str()]
    }
}

impl RequestWire for Authorization {
    type CreateReq = CreateAutorizacionReq;
    type UpdateReq = UpdateAutorizacionReq;
    type ListItem = AutorizacionListItem;
    type Detail = AutorizacionDetalle;

    const UPDATED_MESSAGE: &'static str = "Autorización actualizada exitosamente";

    fn parse_create(req: CreateAutorizacionReq) -> ProviderResult<ParsedCreate<Self>> {
        Ok(ParsedCreate {
            affiliate_id: required_id("afiliadoId", req.afiliado_id)?,
            fields: Authorization {
                procedure: required_text("procedimiento", &req.procedimiento)?,
                specialty: required_text("especialidad", &req.especialidad)?,
            },
            initial_status: optional_status(req.estado_inicial.as_deref())?,
        })
    }

    fn parse_update(req: UpdateAutorizacionReq) -> ProviderResult<AuthorizationPatch> {
        Ok(AuthorizationPatch {
            procedure: NonEmptyText::optional(&req.procedimiento),
            specialty: NonEmptyText::optional(&req.especialidad),
        })
    }

    fn list_item(summary: RequestSummary<Self>) -> AutorizacionListItem {
        AutorizacionListItem {
            id: summary.id,
            tipo: Self::KIND.as_str().to_owned(),
            afiliado: affiliate_to_wire(&summary.affiliate),
            estado: summary.status.as_str().to_owned(),
            fecha_creacion: format_timestamp(summary.created_at),
            fecha_actualizacion: format_timestamp(summary.updated_at),
            procedimiento: summary.fields.procedure.into_string(),
            especialidad: summary.fields.specialty.into_string(),
        }
    }

    fn detail(record: &RequestRecord<Self>) -> AutorizacionDetalle {
        AutorizacionDetalle {
            id: record.id(),
            tipo: record.kind().as_str().to_owned(),
            estado: record.status().as_str().to_owned(),
            fecha_creacion: format_timestamp(record.created_at()),
            fecha_actualizacion: format_timestamp(record.updated_at()),
            afiliado: affiliate_to_wire(record.affiliate()),
            procedimiento: record.fields().procedure.to_string(),
            especialidad: record.fields().specialty.to_string(),
            historial: history_to_wire(record.history()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::RequestStatus;
    use crate::ProviderError;

    fn create_req(procedimiento: &str) -> CreateAutorizacionReq {
        CreateAutorizacionReq {
            afiliado_id: 32,
            procedimiento: procedimiento.into(),
            especialidad: "Radiology".into(),
            estado_inicial: None,
        }
    }

    #[test]
    fn parse_create_trims_and_validates() {
        let parsed = Authorization::parse_create(create_req("  X-Ray ")).unwrap();
        assert_eq!(parsed.affiliate_id.get(), 32);
        assert_eq!(parsed.fields.procedure.as_str(), "X-Ray");
        assert_eq!(parsed.initial_status, None);
    }

    #[test]
    fn parse_create_rejects_blank_procedure() {
        let err = Authorization::parse_create(create_req("")).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidInput(msg) if msg.contains("procedimiento")));
    }

    #[test]
    fn parse_create_accepts_known_initial_status() {
        let mut req = create_req("X-Ray");
        req.estado_inicial = Some("EN_ANALISIS".into());
        let parsed = Authorization::parse_create(req).unwrap();
        assert_eq!(parsed.initial_status, Some(RequestStatus::InAnalysis));

        let mut req = create_req("X-Ray");
        req.estado_inicial = Some("ARCHIVADO".into());
        assert!(Authorization::parse_create(req).is_err());
    }

    #[test]
    fn empty_update_members_are_unchanged() {
        let patch = Authorization::parse_update(UpdateAutorizacionReq {
            procedimiento: "CT scan".into(),
            especialidad: " ".into(),
        })
        .unwrap();

        let mut fields = Authorization {
            procedure: NonEmptyText::new("X-Ray").unwrap(),
            specialty: NonEmptyText::new("Radiology").unwrap(),
        };
        fields.apply_patch(patch);
        assert_eq!(fields.procedure.as_str(), "CT scan");
        assert_eq!(fields.specialty.as_str(), "Radiology");
    }
}
