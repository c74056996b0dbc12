//! Input validation utilities.
//!
//! These run in the service layer, before any store is touched, and turn raw wire values into
//! validated domain values.

use prestadores_types::{NonEmptyText, RecordId};

use crate::{ProviderError, ProviderResult};

/// Requires a non-blank string.
///
/// # Errors
///
/// Returns a `ProviderError::InvalidInput` naming `field` if `value` is empty or whitespace.
pub fn required_text(field: &str, value: &str) -> ProviderResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| ProviderError::InvalidInput(format!("{field} is required")))
}

/// Requires a strictly positive identifier received as a signed wire integer.
pub fn required_id(field: &str, value: i64) -> ProviderResult<RecordId> {
    RecordId::new(value)
        .map_err(|_| ProviderError::InvalidInput(format!("{field} must be a positive integer")))
}

/// Requires a finite, strictly positive amount.
pub fn required_amount(field: &str, value: f64) -> ProviderResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ProviderError::InvalidInput(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(value)
}

/// Optional amount for partial updates: zero means "unchanged", negative is rejected.
pub fn optional_amount(field: &str, value: f64) -> ProviderResult<Option<f64>> {
    if value == 0.0 {
        return Ok(None);
    }
    required_amount(field, value).map(Some)
}

/// Parses an optional status literal; blank means "not supplied".
pub fn optional_status<S>(raw: Option<&str>) -> ProviderResult<Option<S>>
where
    S: std::str::FromStr<Err = ProviderError>,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(literal) => literal.parse::<S>().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::RequestStatus;

    #[test]
    fn required_text_names_the_field() {
        let err = required_text("procedimiento", "  ").unwrap_err();
        assert_eq!(err.to_string(), "invalid input: procedimiento is required");
    }

    #[test]
    fn required_id_rejects_non_positive() {
        assert!(required_id("afiliadoId", 0).is_err());
        assert!(required_id("afiliadoId", -1).is_err());
        assert_eq!(required_id("afiliadoId", 31).unwrap().get(), 31);
    }

    #[test]
    fn amounts() {
        assert!(required_amount("monto", 0.0).is_err());
        assert!(required_amount("monto", f64::NAN).is_err());
        assert_eq!(optional_amount("monto", 0.0).unwrap(), None);
        assert_eq!(optional_amount("monto", 10.5).unwrap(), Some(10.5));
        assert!(optional_amount("monto", -3.0).is_err());
    }

    #[test]
    fn optional_status_parsing() {
        assert_eq!(optional_status::<RequestStatus>(None).unwrap(), None);
        assert_eq!(optional_status::<RequestStatus>(Some(" ")).unwrap(), None);
        assert_eq!(
            optional_status::<RequestStatus>(Some("EN_ANALISIS")).unwrap(),
            Some(RequestStatus::InAnalysis)
        );
        assert!(optional_status::<RequestStatus>(Some("PENDIENTE")).is_err());
    }
}
