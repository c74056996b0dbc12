//! Transition policy: which target statuses need a written justification.
//!
//! The policy is a pure decision over the target status. Services consult it before touching a
//! store; stores consult it again while holding the write lock, so a transition that slips past
//! the service still cannot be committed without a reason.

use super::status::{RequestStatus, SituationStatus};
use crate::{ProviderError, ProviderResult};

/// A status type whose entry may require a reason.
pub trait ReasonPolicy: Copy {
    /// Whether moving *into* this status requires a non-empty reason.
    fn requires_reason(self) -> bool;

    /// Wire literal used in the policy violation message.
    fn label(self) -> &'static str;
}

impl ReasonPolicy for RequestStatus {
    fn requires_reason(self) -> bool {
        matches!(self, RequestStatus::Observed | RequestStatus::Rejected)
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl ReasonPolicy for SituationStatus {
    fn requires_reason(self) -> bool {
        matches!(self, SituationStatus::Baja)
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

/// Normalises an optional reason: blank strings become `None`.
pub fn normalise_reason(reason: Option<String>) -> Option<String> {
    reason
        .map(|r| r.trim().to_owned())
        .filter(|r| !r.is_empty())
}

/// Checks the mandatory-reason rule for a transition into `target`.
///
/// # Errors
///
/// Returns [`ProviderError::ReasonRequired`] if `target` requires a reason and `reason` is
/// absent or blank.
pub fn check_reason<S: ReasonPolicy>(target: S, reason: Option<&str>) -> ProviderResult<()> {
    let has_reason = reason.is_some_and(|r| !r.trim().is_empty());
    if target.requires_reason() && !has_reason {
        return Err(ProviderError::ReasonRequired {
            status: target.label(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_and_rejected_require_reason() {
        let needs: Vec<_> = RequestStatus::ALL
            .into_iter()
            .filter(|s| s.requires_reason())
            .collect();
        assert_eq!(needs, vec![RequestStatus::Rejected, RequestStatus::Observed]);
    }

    #[test]
    fn only_baja_requires_reason_for_situations() {
        assert!(SituationStatus::Baja.requires_reason());
        assert!(!SituationStatus::Active.requires_reason());
        assert!(!SituationStatus::Alta.requires_reason());
    }

    #[test]
    fn check_reason_rejects_blank_reason() {
        let err = check_reason(RequestStatus::Rejected, Some("   ")).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::ReasonRequired { status: "RECHAZADO" }
        ));
        assert!(check_reason(RequestStatus::Rejected, Some("missing docs")).is_ok());
        assert!(check_reason(RequestStatus::Approved, None).is_ok());
    }

    #[test]
    fn normalise_reason_drops_blank() {
        assert_eq!(normalise_reason(Some("  ".into())), None);
        assert_eq!(normalise_reason(Some(" x ".into())), Some("x".into()));
        assert_eq!(normalise_reason(None), None);
    }
}
