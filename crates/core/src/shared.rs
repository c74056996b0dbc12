//! Helpers shared by the services: timestamp/date formatting and wire projections of the
//! pieces every request family has in common.

use api_shared::{AfiliadoBasico, HistorialEstado};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::constants::DATE_FORMAT;
use crate::workflow::{AffiliateSnapshot, HistoryEntry};
use crate::{ProviderError, ProviderResult};

/// RFC 3339 with a `Z` suffix, e.g. `2025-09-02T10:00:00Z`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` date, naming `field` in the error.
pub fn parse_date(field: &str, raw: &str) -> ProviderResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        ProviderError::InvalidInput(format!("{field} must be a YYYY-MM-DD date, got {raw:?}"))
    })
}

pub fn affiliate_to_wire(affiliate: &AffiliateSnapshot) -> AfiliadoBasico {
    AfiliadoBasico {
        id: affiliate.id,
        dni: affiliate.national_id.clone(),
        nombre: affiliate.first_name.clone(),
        apellido: affiliate.last_name.clone(),
    }
}

pub fn history_to_wire(history: &[HistoryEntry]) -> Vec<HistorialEstado> {
    history
        .iter()
        .map(|entry| HistorialEstado {
            estado: entry.status.as_str().to_owned(),
            usuario: entry.actor.clone(),
            fecha_cambio: format_timestamp(entry.changed_at),
            motivo: entry.reason.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_use_z_suffix() {
        let ts = Utc.with_ymd_and_hms(2025, 9, 2, 10, 0, 0).unwrap();
        assert_eq!(format_timestamp(ts), "2025-09-02T10:00:00Z");
    }

    #[test]
    fn dates_round_trip() {
        let date = parse_date("fechaInicio", "2025-09-01").unwrap();
        assert_eq!(format_date(date), "2025-09-01");
        assert!(parse_date("fechaInicio", "01/09/2025").is_err());
        assert!(parse_date("fechaInicio", "2025-02-30").is_err());
    }
}
