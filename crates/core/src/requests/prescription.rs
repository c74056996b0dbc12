use api_shared::{CreateRecetaReq, RecetaDetalle, RecetaListItem, UpdateRecetaReq};
use prestadores_types::NonEmptyText;

use super::{ParsedCreate, RequestWire};
use crate::constants::PRESCRIPTION_FIRST_ID;
use crate::shared::{affiliate_to_wire, format_timestamp, history_to_wire};
use crate::validation::{optional_status, required_id, required_text};
use crate::workflow::{RequestFields, RequestKind, RequestRecord, RequestSummary};
use crate::ProviderResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prescription {
    pub medication: NonEmptyText,
    pub dosage: NonEmptyText,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrescriptionPatch {
    pub medication: Option<NonEmptyText>,
    pub dosage: Option<NonEmptyText>,
}

impl RequestFields for Prescription {
    type Patch = PrescriptionPatch;

    const KIND: RequestKind = RequestKind::Prescription;
    const FIRST_ID: u64 = PRESCRIPTION_FIRST_ID;

    fn apply_patch(&mut self, patch: PrescriptionPatch) {
        if let Some(medication) = patch.medication {
            self.medication = medication;
        }
        if let Some(dosage) = patch.dosage {
            self.dosage = dosage;
        }
    }

    fn search_haystack(&self) -> Vec<&str> {
        vec![self.medication.as_str(), self.dosage.as_str()]
    }
}

impl RequestWire for Prescription {
    type CreateReq = CreateRecetaReq;
    type UpdateReq = UpdateRecetaReq;
    type ListItem = RecetaListItem;
    type Detail = RecetaDetalle;

    const UPDATED_MESSAGE: &'static str = "Receta actualizada exitosamente";

    fn parse_create(req: CreateRecetaReq) -> ProviderResult<ParsedCreate<Self>> {
        Ok(ParsedCreate {
            affiliate_id: required_id("afiliadoId", req.afiliado_id)?,
            fields: Prescription {
                medication: required_text("medicamento", &req.medicamento)?,
                dosage: required_text("dosis", &req.dosis)?,
            },
            initial_status: optional_status(req.estado_inicial.as_deref())?,
        })
    }

    fn parse_update(req: UpdateRecetaReq) -> ProviderResult<PrescriptionPatch> {
        Ok(PrescriptionPatch {
            medication: NonEmptyText::optional(&req.medicamento),
            dosage: NonEmptyText::optional(&req.dosis),
        })
    }

    fn list_item(summary: RequestSummary<Self>) -> RecetaListItem {
        RecetaListItem {
            id: summary.id,
            tipo: Self::KIND.as_str().to_owned(),
            afiliado: affiliate_to_wire(&summary.affiliate),
            estado: summary.status.as_str().to_owned(),
            fecha_creacion: format_timestamp(summary.created_at),
            fecha_actualizacion: format_timestamp(summary.updated_at),
            medicamento: summary.fields.medication.into_string(),
            dosis: summary.fields.dosage.into_string(),
        }
    }

    fn detail(record: &RequestRecord<Self>) -> RecetaDetalle {
        RecetaDetalle {
            id: record.id(),
            tipo: record.kind().as_str().to_owned(),
            estado: record.status().as_str().to_owned(),
            fecha_creacion: format_timestamp(record.created_at()),
            fecha_actualizacion: format_timestamp(record.updated_at()),
            afiliado: affiliate_to_wire(record.affiliate()),
            medicamento: record.fields().medication.to_string(),
            dosis: record.fields().dosage.to_string(),
            historial: history_to_wire(record.history()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_create_requires_dosage() {
        let req = CreateRecetaReq {
            afiliado_id: 22,
            medicamento: "Amoxicilina 500mg".into(),
            dosis: "   ".into(),
            estado_inicial: None,
        };
        let err = Prescription::parse_create(req).unwrap_err();
        assert!(err.to_string().contains("dosis"));
    }

    #[test]
    fn parse_create_rejects_non_positive_affiliate() {
        let req = CreateRecetaReq {
            afiliado_id: 0,
            medicamento: "Ibuprofeno".into(),
            dosis: "1 comp.".into(),
            estado_inicial: None,
        };
        let err = Prescription::parse_create(req).unwrap_err();
        assert!(err.to_string().contains("afiliadoId"));
    }

    #[test]
    fn search_covers_medication_and_dosage() {
        let fields = Prescription {
            medication: NonEmptyText::new("Omeprazol 20mg").unwrap(),
            dosage: NonEmptyText::new("1 cap. c/12h").unwrap(),
        };
        assert_eq!(fields.search_haystack(), vec!["Omeprazol 20mg", "1 cap. c/12h"]);
    }
}
