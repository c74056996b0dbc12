//! The three request families handled by the workflow: authorizations, prescriptions and
//! reimbursements.
//!
//! Each family contributes its domain fields (a [`RequestFields`] impl) and its wire mapping (a
//! [`RequestWire`] impl). Everything else, storage, history, the reason policy and paging, is
//! shared.

mod authorization;
mod prescription;
mod reimbursement;

pub use authorization::{Authorization, AuthorizationPatch};
pub use prescription::{Prescription, PrescriptionPatch};
pub use reimbursement::{Reimbursement, ReimbursementPatch};

use prestadores_types::RecordId;

use crate::workflow::{RequestFields, RequestRecord, RequestStatus, RequestSummary};
use crate::ProviderResult;

/// A validated create request, before the affiliate has been resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedCreate<F> {
    pub affiliate_id: RecordId,
    pub fields: F,
    pub initial_status: Option<RequestStatus>,
}

/// Mapping between a request family and its JSON wire types.
pub trait RequestWire: RequestFields {
    type CreateReq: Send;
    type UpdateReq: Send;
    type ListItem: Send;
    type Detail: Send;

    /// Confirmation returned after a successful field update.
    const UPDATED_MESSAGE: &'static str;

    /// Validates a create body.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidInput` if a required field is missing or malformed, or if
    /// the initial status is not a known literal.
    fn parse_create(req: Self::CreateReq) -> ProviderResult<ParsedCreate<Self>>;

    /// Validates an update body. Empty members become "unchanged".
    fn parse_update(req: Self::UpdateReq) -> ProviderResult<Self::Patch>;

    fn list_item(summary: RequestSummary<Self>) -> Self::ListItem;

    fn detail(record: &RequestRecord<Self>) -> Self::Detail;
}
