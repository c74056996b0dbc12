//! # Prestadores Core
//!
//! Core business logic for the healthcare-provider back end.
//!
//! This crate owns the state-change workflow with audit history shared by authorizations,
//! prescriptions and reimbursements, the therapeutic situations store, and the mock affiliate
//! directory:
//! - [`workflow`]: statuses, the mandatory-reason policy, records, the generic store and paging
//! - [`requests`]: the three request families and their wire mappings
//! - [`repositories`]: the situations store and the demo seed data
//! - [`services`]: validation and orchestration, returning wire DTOs
//!
//! **No transport concerns**: HTTP routing and status codes belong in `api-rest`.

pub mod affiliates;
pub mod config;
pub mod constants;
pub mod error;
pub mod repositories;
pub mod requests;
pub mod services;
pub mod shared;
pub mod validation;
pub mod workflow;

use std::sync::Arc;

use tracing::Span;

pub use config::CoreConfig;
pub use error::{ProviderError, ProviderResult};
pub use prestadores_types::{NonEmptyText, RecordId};

use affiliates::AffiliateDirectory;
use repositories::{seed, SituationStore};
use requests::{Authorization, Prescription, Reimbursement};
use services::{AffiliateService, RequestService, SituationService};
use workflow::RequestStore;

pub type AuthorizationService = RequestService<Authorization>;
pub type PrescriptionService = RequestService<Prescription>;
pub type ReimbursementService = RequestService<Reimbursement>;

/// Every service the transports need, wired to their stores.
///
/// Each family gets its own store and therefore its own lock.
#[derive(Clone)]
pub struct Services {
    pub authorizations: AuthorizationService,
    pub prescriptions: PrescriptionService,
    pub reimbursements: ReimbursementService,
    pub situations: SituationService,
    pub affiliates: AffiliateService,
}

impl Services {
    /// Builds the stores (seeded when `cfg` asks for it) and the services over them.
    ///
    /// Each service logs under a child of `span`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidInput` if the seed data is inconsistent.
    pub fn new(cfg: Arc<CoreConfig>, span: &Span) -> ProviderResult<Self> {
        let directory = Arc::new(AffiliateDirectory::mock());

        let (authorizations, prescriptions, reimbursements, situations) = if cfg.seed_mock_data()
        {
            (
                RequestStore::with_records(seed::authorizations()?)?,
                RequestStore::with_records(seed::prescriptions()?)?,
                RequestStore::with_records(seed::reimbursements()?)?,
                SituationStore::with_situations(seed::situations()?)?,
            )
        } else {
            (
                RequestStore::new(),
                RequestStore::new(),
                RequestStore::new(),
                SituationStore::new(),
            )
        };

        Ok(Self {
            authorizations: RequestService::new(
                Arc::clone(&cfg),
                Arc::new(authorizations),
                Arc::clone(&directory),
                tracing::info_span!(parent: span, "authorizations"),
            ),
            prescriptions: RequestService::new(
                Arc::clone(&cfg),
                Arc::new(prescriptions),
                Arc::clone(&directory),
                tracing::info_span!(parent: span, "prescriptions"),
            ),
            reimbursements: RequestService::new(
                Arc::clone(&cfg),
                Arc::new(reimbursements),
                Arc::clone(&directory),
                tracing::info_span!(parent: span, "reimbursements"),
            ),
            situations: SituationService::new(
                Arc::new(situations),
                Arc::clone(&directory),
                tracing::info_span!(parent: span, "situations"),
            ),
            affiliates: AffiliateService::new(
                directory,
                tracing::info_span!(parent: span, "affiliates"),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::ListParams;

    #[test]
    fn seeded_services_start_with_demo_data() {
        let services = Services::new(Arc::new(CoreConfig::default()), &Span::none()).unwrap();
        let page = services.authorizations.list(&ListParams::default()).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(services.prescriptions.list(&ListParams::default()).unwrap().items[0].id, 9350);
    }

    #[test]
    fn unseeded_services_start_empty_at_family_offsets() {
        let cfg = Arc::new(CoreConfig::new(5, false).unwrap());
        let services = Services::new(cfg, &Span::none()).unwrap();

        let page = services.reimbursements.list(&ListParams::default()).unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.size, 5);

        let created = services
            .prescriptions
            .create(api_shared::CreateRecetaReq {
                afiliado_id: 2,
                medicamento: "Paracetamol 1g".into(),
                dosis: "1 comp. c/8h".into(),
                estado_inicial: None,
            })
            .unwrap();
        assert_eq!(created.id, 9350);
        assert_eq!(created.tipo, "RECETA");
    }
}
