//! Status enumerations for the request families and for therapeutic situations.
//!
//! Wire literals are the ones the provider portal exchanges (`RECIBIDO`, `BAJA`, ...).

use std::fmt;
use std::str::FromStr;

use crate::{ProviderError, ProviderResult};

/// Status of an authorization, prescription or reimbursement request.
///
/// Any status may follow any other; there is no forbidden-transition matrix. `Approved` and
/// `Rejected` are terminal by convention only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    #[default]
    Received,
    InAnalysis,
    Approved,
    Rejected,
    Observed,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::Received,
        RequestStatus::InAnalysis,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Observed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Received => "RECIBIDO",
            RequestStatus::InAnalysis => "EN_ANALISIS",
            RequestStatus::Approved => "APROBADO",
            RequestStatus::Rejected => "RECHAZADO",
            RequestStatus::Observed => "OBSERVADO",
        }
    }
}

impl FromStr for RequestStatus {
    type Err = ProviderError;

    fn from_str(s: &str) -> ProviderResult<Self> {
        let wanted = s.trim();
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ProviderError::InvalidInput(format!("unknown request status {s:?}")))
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type tag denormalised onto every request record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Authorization,
    Prescription,
    Reimbursement,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Authorization => "AUTORIZACION",
            RequestKind::Prescription => "RECETA",
            RequestKind::Reimbursement => "REINTEGRO",
        }
    }

    /// Human-readable entity name used in log events and not-found errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            RequestKind::Authorization => "authorization",
            RequestKind::Prescription => "prescription",
            RequestKind::Reimbursement => "reimbursement",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a therapeutic situation.
///
/// `Alta` is kept as a distinct, reachable value meaning "reactivated"; only `Baja` carries
/// behaviour (mandatory reason, end date).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SituationStatus {
    Active,
    Alta,
    Baja,
}

impl SituationStatus {
    pub const ALL: [SituationStatus; 3] = [
        SituationStatus::Active,
        SituationStatus::Alta,
        SituationStatus::Baja,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SituationStatus::Active => "ACTIVA",
            SituationStatus::Alta => "ALTA",
            SituationStatus::Baja => "BAJA",
        }
    }
}

impl FromStr for SituationStatus {
    type Err = ProviderError;

    fn from_str(s: &str) -> ProviderResult<Self> {
        let wanted = s.trim();
        SituationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| {
                ProviderError::InvalidInput(format!("unknown situation status {s:?}"))
            })
    }
}

impl fmt::Display for SituationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
