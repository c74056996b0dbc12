//! Affiliate lookups and clinical history.

use std::sync::Arc;

use api_shared::{AfiliadoDetalle, AfiliadoListItem, HistoriaClinica, HistoriaClinicaParams};
use prestadores_types::RecordId;
use tracing::Span;

use crate::affiliates::AffiliateDirectory;
use crate::{ProviderError, ProviderResult};

#[derive(Clone)]
pub struct AffiliateService {
    directory: Arc<AffiliateDirectory>,
    span: Span,
}

impl AffiliateService {
    pub fn new(directory: Arc<AffiliateDirectory>, span: Span) -> Self {
        Self { directory, span }
    }

    pub fn list(&self) -> Vec<AfiliadoListItem> {
        tracing::info!(parent: &self.span, "listing affiliates");
        self.directory.list().map(|a| a.to_list_item()).collect()
    }

    /// Detail view of one affiliate.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` if the directory has no affiliate with this ID.
    pub fn get(&self, id: RecordId) -> ProviderResult<AfiliadoDetalle> {
        tracing::info!(parent: &self.span, %id, "fetching affiliate");
        self.directory
            .get(id.get())
            .map(|a| a.to_detail())
            .ok_or_else(|| {
                tracing::warn!(parent: &self.span, %id, "affiliate not found");
                ProviderError::NotFound {
                    entity: "affiliate",
                    id: id.get(),
                }
            })
    }

    /// Appointments and notes. A `prestadorId` that is not a positive integer is ignored.
    pub fn clinical_history(&self, id: RecordId, params: &HistoriaClinicaParams) -> HistoriaClinica {
        let provider = params
            .prestador_id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|p| *p > 0);
        tracing::info!(parent: &self.span, %id, ?provider, "fetching clinical history");
        self.directory.clinical_history(id.get(), provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AffiliateService {
        AffiliateService::new(Arc::new(AffiliateDirectory::mock()), Span::none())
    }

    #[test]
    fn list_and_detail() {
        let svc = service();
        assert_eq!(svc.list().len(), 5);
        assert_eq!(svc.get(RecordId::new(1).unwrap()).unwrap().nro_afiliado, "15121231523");
        assert!(matches!(
            svc.get(RecordId::new(42).unwrap()),
            Err(ProviderError::NotFound { entity: "affiliate", id: 42 })
        ));
    }

    #[test]
    fn invalid_provider_filter_is_ignored() {
        let svc = service();
        let id = RecordId::new(3).unwrap();
        let params = |raw: &str| HistoriaClinicaParams {
            prestador_id: Some(raw.to_owned()),
        };

        let unfiltered = svc.clinical_history(id, &params("abc"));
        assert_eq!(unfiltered.turnos[1].notas.len(), 3);
        assert_eq!(unfiltered.afiliado_id, 3);

        let zero = svc.clinical_history(id, &params("0"));
        assert_eq!(zero.turnos[1].notas.len(), 3);

        let filtered = svc.clinical_history(id, &params("45"));
        assert_eq!(filtered.turnos[0].notas.len(), 1);
        assert_eq!(filtered.turnos[1].notas.len(), 1);
    }
}
