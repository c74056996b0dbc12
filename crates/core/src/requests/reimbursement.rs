use api_shared::{CreateReintegroReq, ReintegroDetalle, ReintegroListItem, UpdateReintegroReq};
use prestadores_types::NonEmptyText;

use super::{ParsedCreate, RequestWire};
use crate::constants::REIMBURSEMENT_FIRST_ID;
use crate::shared::{affiliate_to_wire, format_timestamp, history_to_wire};
use crate::validation::{
    optional_amount, optional_status, required_amount, required_id, required_text,
};
use crate::workflow::{RequestFields, RequestKind, RequestRecord, RequestSummary};
use crate::ProviderResult;

/// Refund of an out-of-pocket expense.
///
/// `payment_method` is free text (`Efectivo`, `Debito`, `Credito` in practice).
#[derive(Clone, Debug, PartialEq)]
pub struct Reimbursement {
    pub service: NonEmptyText,
    pub payment_method: NonEmptyText,
    pub amount: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReimbursementPatch {
    pub service: Option<NonEmptyText>,
    pub payment_method: Option<NonEmptyText>,
    pub amount: Option<f64>,
}

impl RequestFields for Reimbursement {
    type Patch = ReimbursementPatch;

    const KIND: RequestKind = RequestKind::Reimbursement;
    const FIRST_ID: u64 = REIMBURSEMENT_FIRST_ID;

    fn apply_patch(&mut self, patch: ReimbursementPatch) {
        if let Some(service) = patch.service {
            self.service = service;
        }
        if let Some(payment_method) = patch.payment_method {
            self.payment_method = payment_method;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
    }

    fn search_haystack(&self) -> Vec<&str> {
        vec![self.service.as_str(), self.payment_method.as_str()]
    }
}

impl RequestWire for Reimbursement {
    type CreateReq = CreateReintegroReq;
    type UpdateReq = UpdateReintegroReq;
    type ListItem = ReintegroListItem;
    type Detail = ReintegroDetalle;

    const UPDATED_MESSAGE: &'static str = "Reintegro actualizado exitosamente";

    fn parse_create(req: CreateReintegroReq) -> ProviderResult<ParsedCreate<Self>> {
        Ok(ParsedCreate {
            affiliate_id: required_id("afiliadoId", req.afiliado_id)?,
            fields: Reimbursement {
                service: required_text("prestacion", &req.prestacion)?,
                payment_method: required_text("metodo", &req.metodo)?,
                amount: required_amount("monto", req.monto)?,
            },
            initial_status: optional_status(req.estado_inicial.as_deref())?,
        })
    }

    /// A zero `monto` means "unchanged"; a negative one is rejected.
    fn parse_update(req: UpdateReintegroReq) -> ProviderResult<ReimbursementPatch> {
        Ok(ReimbursementPatch {
            service: NonEmptyText::optional(&req.prestacion),
            payment_method: NonEmptyText::optional(&req.metodo),
            amount: optional_amount("monto", req.monto)?,
        })
    }

    fn list_item(summary: RequestSummary<Self>) -> ReintegroListItem {
        ReintegroListItem {
            id: summary.id,
            tipo: Self::KIND.as_str().to_owned(),
            afiliado: affiliate_to_wire(&summary.affiliate),
            estado: summary.status.as_str().to_owned(),
            fecha_creacion: format_timestamp(summary.created_at),
            fecha_actualizacion: format_timestamp(summary.updated_at),
            prestacion: summary.fields.service.into_string(),
            metodo: summary.fields.payment_method.into_string(),
            monto: summary.fields.amount,
        }
    }

    fn detail(record: &RequestRecord<Self>) -> ReintegroDetalle {
        let fields = record.fields();
        ReintegroDetalle {
            id: record.id(),
            tipo: record.kind().as_str().to_owned(),
            estado: record.status().as_str().to_owned(),
            fecha_creacion: format_timestamp(record.created_at()),
            fecha_actualizacion: format_timestamp(record.updated_at()),
            afiliado: affiliate_to_wire(record.affiliate()),
            prestacion: fields.service.to_string(),
            metodo: fields.payment_method.to_string(),
            monto: fields.amount,
            historial: history_to_wire(record.history()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_req(monto: f64) -> CreateReintegroReq {
        CreateReintegroReq {
            afiliado_id: 45,
            prestacion: "Kinesiología".into(),
            metodo: "Credito".into(),
            monto,
            estado_inicial: None,
        }
    }

    #[test]
    fn amount_must_be_positive_on_create() {
        assert!(Reimbursement::parse_create(create_req(0.0)).is_err());
        assert!(Reimbursement::parse_create(create_req(-10.0)).is_err());
        let parsed = Reimbursement::parse_create(create_req(40000.0)).unwrap();
        assert_eq!(parsed.fields.amount, 40000.0);
    }

    #[test]
    fn zero_amount_on_update_is_unchanged() {
        let patch = Reimbursement::parse_update(UpdateReintegroReq {
            prestacion: String::new(),
            metodo: "Debito".into(),
            monto: 0.0,
        })
        .unwrap();
        assert_eq!(patch.amount, None);
        assert_eq!(patch.payment_method.as_ref().map(|m| m.as_str()), Some("Debito"));

        let mut fields = Reimbursement::parse_create(create_req(100.0)).unwrap().fields;
        fields.apply_patch(patch);
        assert_eq!(fields.amount, 100.0);
        assert_eq!(fields.payment_method.as_str(), "Debito");
        assert_eq!(fields.service.as_str(), "Kinesiología");
    }

    #[test]
    fn negative_amount_on_update_is_rejected() {
        let err = Reimbursement::parse_update(UpdateReintegroReq {
            monto: -1.0,
            ..UpdateReintegroReq::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("monto"));
    }
}
