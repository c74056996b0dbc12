//! Generic service façade for the request families.
//!
//! The service validates wire input, resolves the affiliate snapshot, applies the reason policy
//! and delegates to the family's [`RequestStore`]. It returns wire DTOs.

use std::sync::Arc;

use api_shared::{
    CambioEstadoReq, CambioEstadoRes, CreateSolicitudRes, ListParams, MessageRes, Paginated,
};
use prestadores_types::RecordId;
use tracing::Span;

use crate::affiliates::AffiliateDirectory;
use crate::config::CoreConfig;
use crate::requests::RequestWire;
use crate::shared::format_timestamp;
use crate::validation::required_text;
use crate::workflow::{
    check_reason, normalise_reason, ListQuery, NewRequest, RequestStatus, RequestStore,
    StatusChange,
};
use crate::{ProviderError, ProviderResult};

/// Service for one request family.
///
/// Cheap to clone: the store and directory are shared.
#[derive(Clone)]
pub struct RequestService<F: RequestWire> {
    cfg: Arc<CoreConfig>,
    store: Arc<RequestStore<F>>,
    directory: Arc<AffiliateDirectory>,
    span: Span,
}

impl<F: RequestWire> RequestService<F> {
    /// Creates a service over `store`.
    ///
    /// All events are emitted as children of `span`.
    pub fn new(
        cfg: Arc<CoreConfig>,
        store: Arc<RequestStore<F>>,
        directory: Arc<AffiliateDirectory>,
        span: Span,
    ) -> Self {
        Self {
            cfg,
            store,
            directory,
            span,
        }
    }

    fn entity(&self) -> &'static str {
        F::KIND.entity_name()
    }

    /// Logs the outcome of a failed operation at the level its error class calls for.
    fn log_failure(&self, op: &str, err: &ProviderError) {
        if err.is_client_error() {
            tracing::warn!(parent: &self.span, entity = self.entity(), op, error = %err, "request rejected");
        } else {
            tracing::error!(parent: &self.span, entity = self.entity(), op, error = %err, "request failed");
        }
    }

    fn logged<T>(&self, op: &str, result: ProviderResult<T>) -> ProviderResult<T> {
        if let Err(err) = &result {
            self.log_failure(op, err);
        }
        result
    }

    /// Lists one page of requests.
    ///
    /// # Arguments
    ///
    /// * `params` - Raw query parameters; bad paging values are coerced, never rejected
    ///
    /// # Returns
    ///
    /// Returns `Paginated` list items matching the `estado` and `q` filters, ordered by `sort`.
    /// `size` echoes the effective page size.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::LockPoisoned` if the store lock is poisoned.
    pub fn list(&self, params: &ListParams) -> ProviderResult<Paginated<F::ListItem>> {
        let query = ListQuery::from_params(params, self.cfg.default_page_size());
        tracing::info!(
            parent: &self.span,
            entity = self.entity(),
            page = query.page(),
            size = query.size(),
            status = query.status(),
            "listing requests"
        );

        let page = self.logged("list", self.store.list(&query))?;
        Ok(page.map(F::list_item).into_paginated())
    }

    /// Fetches one request with its full history.
    ///
    /// # Arguments
    ///
    /// * `id` - Request identifier
    ///
    /// # Returns
    ///
    /// Returns the family's detail DTO.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` if no request has this ID.
    pub fn get(&self, id: RecordId) -> ProviderResult<F::Detail> {
        tracing::info!(parent: &self.span, entity = self.entity(), %id, "fetching request");
        let record = self.logged("get", self.store.get(id))?;
        Ok(F::detail(&record))
    }

    /// Validates and stores a new request, returning the lean creation response.
    ///
    /// The affiliate snapshot is copied from the directory; unknown affiliates get a
    /// placeholder.
    ///
    /// # Arguments
    ///
    /// * `req` - Create body of this family
    ///
    /// # Returns
    ///
    /// Returns `CreateSolicitudRes` with the assigned ID, type tag and initial status.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidInput` if a required field is missing or malformed, or
    /// if `estadoInicial` is not a known status.
    pub fn create(&self, req: F::CreateReq) -> ProviderResult<CreateSolicitudRes> {
        tracing::info!(parent: &self.span, entity = self.entity(), "creating request");

        let parsed = self.logged("create", F::parse_create(req))?;
        let affiliate = self.directory.snapshot(parsed.affiliate_id.get());

        let record = self.logged(
            "create",
            self.store.create(NewRequest {
                affiliate,
                fields: parsed.fields,
                initial_status: parsed.initial_status,
            }),
        )?;

        tracing::info!(
            parent: &self.span,
            entity = self.entity(),
            id = record.id(),
            status = %record.status(),
            "request created"
        );

        Ok(CreateSolicitudRes {
            id: record.id(),
            tipo: record.kind().as_str().to_owned(),
            estado: record.status().as_str().to_owned(),
            fecha_creacion: format_timestamp(record.created_at()),
        })
    }

    /// Applies a partial field update. Status and history are left alone.
    ///
    /// # Arguments
    ///
    /// * `id` - Request identifier
    /// * `req` - Update body; empty members are left unchanged
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` if no request has this ID.
    pub fn update(&self, id: RecordId, req: F::UpdateReq) -> ProviderResult<MessageRes> {
        tracing::info!(parent: &self.span, entity = self.entity(), %id, "updating request");

        let patch = self.logged("update", F::parse_update(req))?;
        self.logged("update", self.store.update_fields(id, patch))?;
        Ok(MessageRes {
            message: F::UPDATED_MESSAGE.to_owned(),
        })
    }

    /// Moves a request to a new status.
    ///
    /// The reason rule is checked here, before the store is touched.
    ///
    /// # Arguments
    ///
    /// * `id` - Request identifier
    /// * `req` - Target status, acting user and optional reason
    ///
    /// # Returns
    ///
    /// Returns `CambioEstadoRes` with the new status and updated-at timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidInput` for an unknown status or blank user,
    /// `ProviderError::ReasonRequired` for `OBSERVADO`/`RECHAZADO` without a reason, and
    /// `ProviderError::NotFound` for an unknown ID. None of these modify the store.
    pub fn change_status(
        &self,
        id: RecordId,
        req: CambioEstadoReq,
    ) -> ProviderResult<CambioEstadoRes> {
        tracing::info!(
            parent: &self.span,
            entity = self.entity(),
            %id,
            target = %req.nuevo_estado,
            "changing request status"
        );

        let change = self.logged("change_status", parse_status_change(req))?;
        let record = self.logged("change_status", self.store.change_status(id, change))?;

        Ok(CambioEstadoRes {
            id: record.id(),
            tipo: record.kind().as_str().to_owned(),
            estado: record.status().as_str().to_owned(),
            fecha_actualizacion: format_timestamp(record.updated_at()),
        })
    }
}

fn parse_status_change(req: CambioEstadoReq) -> ProviderResult<StatusChange> {
    let status: RequestStatus = req.nuevo_estado.trim().parse()?;
    let actor = required_text("usuario", &req.usuario)?;
    let reason = normalise_reason(req.motivo);
    check_reason(status, reason.as_deref())?;

    Ok(StatusChange {
        status,
        actor,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::seed;
    use crate::requests::{Authorization, Reimbursement};
    use api_shared::{CreateAutorizacionReq, UpdateReintegroReq};

    fn service<F: RequestWire>(store: RequestStore<F>) -> RequestService<F> {
        RequestService::new(
            Arc::new(CoreConfig::default()),
            Arc::new(store),
            Arc::new(AffiliateDirectory::mock()),
            Span::none(),
        )
    }

    fn rid(raw: i64) -> RecordId {
        RecordId::new(raw).unwrap()
    }

    fn status_req(status: &str, user: &str, reason: Option<&str>) -> CambioEstadoReq {
        CambioEstadoReq {
            nuevo_estado: status.into(),
            usuario: user.into(),
            motivo: reason.map(str::to_owned),
        }
    }

    #[test]
    fn create_and_read_back_an_authorization() {
        let svc = service(RequestStore::<Authorization>::new());
        let created = svc
            .create(CreateAutorizacionReq {
                afiliado_id: 31,
                procedimiento: "X-Ray".into(),
                especialidad: "Radiology".into(),
                estado_inicial: None,
            })
            .unwrap();

        assert_eq!(created.id, 12001);
        assert_eq!(created.tipo, "AUTORIZACION");
        assert_eq!(created.estado, "RECIBIDO");

        let detail = svc.get(rid(12001)).unwrap();
        assert_eq!(detail.historial.len(), 1);
        assert_eq!(detail.historial[0].usuario, "sistema");
        assert_eq!(detail.afiliado.dni, "dummy-dni");
        assert_eq!(detail.fecha_creacion, created.fecha_creacion);
    }

    #[test]
    fn initial_status_is_exempt_from_reason_rule() {
        let svc = service(RequestStore::<Authorization>::new());
        let created = svc
            .create(CreateAutorizacionReq {
                afiliado_id: 31,
                procedimiento: "X-Ray".into(),
                especialidad: "Radiology".into(),
                estado_inicial: Some("RECHAZADO".into()),
            })
            .unwrap();
        assert_eq!(created.estado, "RECHAZADO");

        let detail = svc.get(rid(created.id as i64)).unwrap();
        assert_eq!(detail.estado, "RECHAZADO");
        assert_eq!(detail.historial.len(), 1);
        assert_eq!(detail.historial[0].estado, "RECHAZADO");
        assert_eq!(detail.historial[0].usuario, "sistema");
        assert_eq!(detail.historial[0].motivo, None);

        // Later transitions into a reason-requiring status still need one.
        let err = svc
            .change_status(rid(created.id as i64), status_req("OBSERVADO", "u1", None))
            .unwrap_err();
        assert!(matches!(err, ProviderError::ReasonRequired { status: "OBSERVADO" }));
    }

    #[test]
    fn known_affiliate_snapshot_is_copied() {
        let svc = service(RequestStore::<Authorization>::new());
        svc.create(CreateAutorizacionReq {
            afiliado_id: 1,
            procedimiento: "Ecografía".into(),
            especialidad: "Diagnóstico por Imágenes".into(),
            estado_inicial: None,
        })
        .unwrap();
        let detail = svc.get(rid(12001)).unwrap();
        assert_eq!(detail.afiliado.nombre, "María");
        assert_eq!(detail.afiliado.dni, "43521489");
    }

    #[test]
    fn status_change_validates_before_touching_store() {
        let svc = service(RequestStore::with_records(seed::authorizations().unwrap()).unwrap());
        let before = svc.get(rid(12003)).unwrap();

        for req in [
            status_req("RECHAZADO", "u1", Some("")),
            status_req("OBSERVADO", "u1", None),
            status_req("ARCHIVADO", "u1", Some("x")),
            status_req("APROBADO", "  ", None),
        ] {
            assert!(svc.change_status(rid(12003), req).unwrap_err().is_client_error());
        }
        assert_eq!(svc.get(rid(12003)).unwrap(), before);

        let res = svc
            .change_status(rid(12003), status_req("RECHAZADO", "u1", Some("missing docs")))
            .unwrap();
        assert_eq!(res.estado, "RECHAZADO");
        assert_eq!(res.tipo, "AUTORIZACION");

        let after = svc.get(rid(12003)).unwrap();
        assert_eq!(after.historial.len(), before.historial.len() + 1);
        let last = after.historial.last().unwrap();
        assert_eq!(last.motivo.as_deref(), Some("missing docs"));
        assert_eq!(last.usuario, "u1");
        assert_eq!(after.fecha_actualizacion, res.fecha_actualizacion);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let svc = service(RequestStore::<Authorization>::new());
        let err = svc
            .change_status(rid(5), status_req("APROBADO", "u1", None))
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotFound { id: 5, .. }));
    }

    #[test]
    fn list_uses_configured_default_size_and_filters() {
        let svc = service(RequestStore::with_records(seed::reimbursements().unwrap()).unwrap());

        let page = svc.list(&ListParams::default()).unwrap();
        assert_eq!(page.size, 20);
        assert_eq!(page.total, 3);
        assert_eq!(page.items[0].id, 8801);
        assert_eq!(page.items[0].tipo, "REINTEGRO");

        let observed = svc
            .list(&ListParams {
                estado: Some("OBSERVADO".into()),
                ..ListParams::default()
            })
            .unwrap();
        assert_eq!(observed.total, 1);
        assert_eq!(observed.items[0].monto, 40000.0);

        let search = svc
            .list(&ListParams {
                q: Some("efectivo".into()),
                ..ListParams::default()
            })
            .unwrap();
        assert_eq!(search.total, 1);
        assert_eq!(search.items[0].id, 8803);
    }

    #[test]
    fn update_keeps_history() {
        let svc = service(RequestStore::with_records(seed::reimbursements().unwrap()).unwrap());
        let before = svc.get(rid(8802)).unwrap();

        let res = svc
            .update(
                rid(8802),
                UpdateReintegroReq {
                    monto: 60000.0,
                    ..UpdateReintegroReq::default()
                },
            )
            .unwrap();
        assert_eq!(res.message, "Reintegro actualizado exitosamente");

        let updated = svc.get(rid(8802)).unwrap();
        assert_eq!(updated.monto, 60000.0);
        assert_eq!(updated.prestacion, before.prestacion);
        assert_eq!(updated.historial, before.historial);
        assert_eq!(updated.estado, before.estado);
    }

    #[test]
    fn reimbursement_service_is_typed_per_family() {
        let svc: RequestService<Reimbursement> = service(RequestStore::new());
        assert!(svc.get(rid(8801)).is_err());
    }
}
