//! Therapeutic situations service.

use std::sync::Arc;

use api_shared::{
    CambioEstadoSituacionReq, CambioEstadoSituacionRes, CreateSituacionReq, CreateSituacionRes,
    IntegranteSituaciones, MessageRes, PatchSituacionReq, Situacion, SituacionesAfiliadoRes,
    SituacionesGrupoRes, SituacionesParams, SituacionesRes,
};
use prestadores_types::{NonEmptyText, RecordId};
use tracing::Span;

use crate::affiliates::AffiliateDirectory;
use crate::constants::{GROUP_SCOPE, TITULAR_RELATIONSHIP};
use crate::repositories::{NewSituation, Situation, SituationPatch, SituationStore};
use crate::shared::{format_date, format_timestamp, parse_date};
use crate::validation::{required_id, required_text};
use crate::workflow::{check_reason, normalise_reason, SituationStatus};
use crate::{ProviderError, ProviderResult};

/// Which shape `GET /situaciones` returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SituationScope {
    /// Every situation filed under the affiliate, in one flat list.
    #[default]
    Titular,
    /// The titular followed by each family-group member, each with their own situations.
    Group,
}

impl SituationScope {
    /// `grupo` selects the group view; anything else, including nothing, the titular view.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(scope) if scope.eq_ignore_ascii_case(GROUP_SCOPE) => SituationScope::Group,
            _ => SituationScope::Titular,
        }
    }
}

#[derive(Clone)]
pub struct SituationService {
    store: Arc<SituationStore>,
    directory: Arc<AffiliateDirectory>,
    span: Span,
}

impl SituationService {
    pub fn new(store: Arc<SituationStore>, directory: Arc<AffiliateDirectory>, span: Span) -> Self {
        Self {
            store,
            directory,
            span,
        }
    }

    fn logged<T>(&self, op: &str, result: ProviderResult<T>) -> ProviderResult<T> {
        match &result {
            Err(err) if err.is_client_error() => {
                tracing::warn!(parent: &self.span, op, error = %err, "situation request rejected");
            }
            Err(err) => {
                tracing::error!(parent: &self.span, op, error = %err, "situation request failed");
            }
            Ok(_) => {}
        }
        result
    }

    /// Lists the situations of a titular, flat or split by family-group member.
    ///
    /// # Arguments
    ///
    /// * `affiliate_id` - Titular affiliate
    /// * `params` - `scope=grupo` selects the group view
    ///
    /// # Returns
    ///
    /// Returns `SituacionesRes::Titular` or `SituacionesRes::Grupo`. In the group view the
    /// titular always comes first, then each member of the family group in directory order.
    pub fn list(
        &self,
        affiliate_id: RecordId,
        params: &SituacionesParams,
    ) -> ProviderResult<SituacionesRes> {
        let scope = SituationScope::from_param(params.scope.as_deref());
        tracing::info!(parent: &self.span, %affiliate_id, ?scope, "listing situations");

        let situations = self.logged("list", self.store.list_for_affiliate(affiliate_id))?;

        Ok(match scope {
            SituationScope::Titular => SituacionesRes::Titular(SituacionesAfiliadoRes {
                afiliado_id: affiliate_id.get(),
                items: situations.iter().map(to_wire).collect(),
            }),
            SituationScope::Group => SituacionesRes::Grupo(self.group_view(affiliate_id, &situations)),
        })
    }

    fn group_view(&self, affiliate_id: RecordId, situations: &[Situation]) -> SituacionesGrupoRes {
        let titular_id = affiliate_id.get();
        let of_member = |member: Option<u64>| -> Vec<Situacion> {
            situations
                .iter()
                .filter(|s| s.member_id == member)
                .map(to_wire)
                .collect()
        };

        let titular = IntegranteSituaciones {
            miembro_id: titular_id,
            nombre: self.directory.titular_name(titular_id),
            parentesco: TITULAR_RELATIONSHIP.to_owned(),
            situaciones: of_member(None),
        };

        let members = self
            .directory
            .family_group(titular_id)
            .iter()
            .map(|member| IntegranteSituaciones {
                miembro_id: member.id,
                nombre: member.name.clone(),
                parentesco: member.relationship.clone(),
                situaciones: of_member(Some(member.id)),
            });

        SituacionesGrupoRes {
            afiliado_id: titular_id,
            integrantes: std::iter::once(titular).chain(members).collect(),
        }
    }

    /// Creates an `ACTIVA` situation under `affiliate_id`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidInput` if `descripcion` is blank, a date is malformed,
    /// `miembroId` is not positive, or `fechaFin` is before `fechaInicio`.
    pub fn create(
        &self,
        affiliate_id: RecordId,
        req: CreateSituacionReq,
    ) -> ProviderResult<CreateSituacionRes> {
        tracing::info!(parent: &self.span, %affiliate_id, "creating situation");

        let new = self.logged("create", parse_create(affiliate_id, req))?;
        let situation = self.logged("create", self.store.create(new))?;

        tracing::info!(parent: &self.span, id = situation.id, %affiliate_id, "situation created");

        Ok(CreateSituacionRes {
            id: situation.id,
            afiliado_id: situation.affiliate_id,
            miembro_id: situation.member_id,
            estado: situation.status.as_str().to_owned(),
            fecha_creacion: format_timestamp(situation.created_at),
        })
    }

    pub fn patch(
        &self,
        affiliate_id: RecordId,
        situation_id: RecordId,
        req: PatchSituacionReq,
    ) -> ProviderResult<MessageRes> {
        tracing::info!(parent: &self.span, %affiliate_id, %situation_id, "patching situation");

        let patch = self.logged("patch", parse_patch(req))?;
        self.logged("patch", self.store.patch(affiliate_id, situation_id, patch))?;

        Ok(MessageRes {
            message: "Situación actualizada exitosamente".to_owned(),
        })
    }

    /// Changes the status of a situation. `BAJA` needs a reason and closes the situation.
    pub fn change_status(
        &self,
        affiliate_id: RecordId,
        situation_id: RecordId,
        req: CambioEstadoSituacionReq,
    ) -> ProviderResult<CambioEstadoSituacionRes> {
        tracing::info!(
            parent: &self.span,
            %affiliate_id,
            %situation_id,
            target = %req.estado,
            "changing situation status"
        );

        let (status, actor, reason) = self.logged("change_status", parse_status_change(req))?;
        let situation = self.logged(
            "change_status",
            self.store
                .change_status(affiliate_id, situation_id, status, reason.as_deref()),
        )?;

        tracing::info!(
            parent: &self.span,
            id = situation.id,
            status = %situation.status,
            actor = %actor,
            "situation status changed"
        );

        Ok(CambioEstadoSituacionRes {
            id: situation.id,
            estado: situation.status.as_str().to_owned(),
            fecha_actualizacion: format_timestamp(situation.updated_at),
        })
    }

    pub fn delete(&self, affiliate_id: RecordId, situation_id: RecordId) -> ProviderResult<()> {
        tracing::info!(parent: &self.span, %affiliate_id, %situation_id, "deleting situation");
        self.logged("delete", self.store.delete(affiliate_id, situation_id))
    }
}

fn to_wire(situation: &Situation) -> Situacion {
    Situacion {
        id: situation.id,
        afiliado_id: situation.affiliate_id,
        miembro_id: situation.member_id,
        descripcion: situation.description.to_string(),
        fecha_inicio: format_date(situation.start_date),
        fecha_fin: situation.end_date.map(format_date),
        estado: situation.status.as_str().to_owned(),
        fecha_creacion: format_timestamp(situation.created_at),
        fecha_actualizacion: format_timestamp(situation.updated_at),
    }
}

fn parse_create(affiliate_id: RecordId, req: CreateSituacionReq) -> ProviderResult<NewSituation> {
    let member_id = req
        .miembro_id
        .map(|id| required_id("miembroId", id))
        .transpose()?;
    let end_date = req
        .fecha_fin
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_date("fechaFin", raw))
        .transpose()?;

    Ok(NewSituation {
        affiliate_id,
        member_id,
        description: required_text("descripcion", &req.descripcion)?,
        start_date: parse_date("fechaInicio", &req.fecha_inicio)?,
        end_date,
    })
}

fn parse_patch(req: PatchSituacionReq) -> ProviderResult<SituationPatch> {
    let description = req
        .descripcion
        .as_deref()
        .map(|raw| required_text("descripcion", raw))
        .transpose()?;
    let start_date = req
        .fecha_inicio
        .as_deref()
        .map(|raw| parse_date("fechaInicio", raw))
        .transpose()?;
    let end_date = match req.fecha_fin.as_deref().map(str::trim) {
        None => None,
        Some("") => Some(None),
        Some(raw) => Some(Some(parse_date("fechaFin", raw)?)),
    };

    Ok(SituationPatch {
        description,
        start_date,
        end_date,
    })
}

fn parse_status_change(
    req: CambioEstadoSituacionReq,
) -> ProviderResult<(SituationStatus, NonEmptyText, Option<String>)> {
    let status: SituationStatus = req.estado.trim().parse()?;
    let actor = required_text("usuario", &req.usuario)?;
    let reason = normalise_reason(req.motivo);
    check_reason(status, reason.as_deref())?;
    Ok((status, actor, reason))
}
