//! Demo records loaded into the stores at startup when seeding is enabled.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use prestadores_types::NonEmptyText;

use super::situations::Situation;
use crate::requests::{Authorization, Prescription, Reimbursement};
use crate::workflow::{
    AffiliateSnapshot, HistoryEntry, RequestFields, RequestRecord, RequestStatus,
    SituationStatus,
};
use crate::{ProviderError, ProviderResult};

use RequestStatus::{Approved, InAnalysis, Observed, Received, Rejected};

fn at(month: u32, day: u32, hour: u32, minute: u32) -> ProviderResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2025, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| ProviderError::InvalidInput("invalid seed timestamp".into()))
}

fn text(value: &str) -> ProviderResult<NonEmptyText> {
    Ok(NonEmptyText::new(value)?)
}

fn affiliate(id: u64, dni: &str, first: &str, last: &str) -> AffiliateSnapshot {
    AffiliateSnapshot {
        id,
        national_id: dni.into(),
        first_name: first.into(),
        last_name: last.into(),
    }
}

/// `(status, minute offset from the first entry, reason)`
type Step<'a> = (RequestStatus, i64, Option<&'a str>);

/// Builds a record whose history starts at `start` and is written entirely by `actor`.
fn record<F: RequestFields>(
    id: u64,
    affiliate: AffiliateSnapshot,
    fields: F,
    start: DateTime<Utc>,
    actor: &str,
    steps: &[Step<'_>],
) -> ProviderResult<RequestRecord<F>> {
    let history = steps
        .iter()
        .map(|(status, offset, reason)| HistoryEntry {
            status: *status,
            actor: actor.to_owned(),
            changed_at: start + Duration::minutes(*offset),
            reason: reason.map(str::to_owned),
        })
        .collect();
    RequestRecord::from_history(id, affiliate, fields, start, history)
}

pub fn authorizations() -> ProviderResult<Vec<RequestRecord<Authorization>>> {
    let fields = |procedure: &str, specialty: &str| -> ProviderResult<Authorization> {
        Ok(Authorization {
            procedure: text(procedure)?,
            specialty: text(specialty)?,
        })
    };

    Ok(vec![
        record(
            12001,
            affiliate(31, "45678089", "David", "Queen"),
            fields("Consulta de control", "Clínica Médica")?,
            at(9, 2, 10, 0)?,
            "prestador.201",
            &[
                (Received, 0, None),
                (InAnalysis, 15, None),
                (Rejected, 30, Some("Falta documentación")),
            ],
        )?,
        record(
            12002,
            affiliate(32, "38567123", "Laura", "García"),
            fields("Radiografía de tórax", "Diagnóstico por Imágenes")?,
            at(9, 3, 9, 0)?,
            "prestador.202",
            &[(Received, 0, None), (Approved, 120, None)],
        )?,
        record(
            12003,
            affiliate(33, "42123456", "Carlos", "Martínez"),
            fields("Consulta cardiológica", "Cardiología")?,
            at(9, 4, 14, 30)?,
            "prestador.203",
            &[(Received, 0, None), (InAnalysis, 30, None)],
        )?,
    ])
}

pub fn prescriptions() -> ProviderResult<Vec<RequestRecord<Prescription>>> {
    let fields = |medication: &str, dosage: &str| -> ProviderResult<Prescription> {
        Ok(Prescription {
            medication: text(medication)?,
            dosage: text(dosage)?,
        })
    };

    Ok(vec![
        record(
            9350,
            affiliate(22, "32654708", "Miguel", "Osorio"),
            fields("Amoxicilina 500mg", "1 cap. c/8h x 7d")?,
            at(9, 11, 11, 10)?,
            "prestador.101",
            &[(Received, 0, None), (InAnalysis, 20, None), (Approved, 50, None)],
        )?,
        record(
            9351,
            affiliate(23, "28456123", "Ana", "Fernández"),
            fields("Ibuprofeno 600mg", "1 comp. c/8h")?,
            at(9, 12, 9, 0)?,
            "prestador.102",
            &[
                (Received, 0, None),
                (Rejected, 90, Some("Medicamento no cubierto por el plan")),
            ],
        )?,
        record(
            9352,
            affiliate(24, "35789456", "Roberto", "Díaz"),
            fields("Omeprazol 20mg", "1 cap. c/12h x 30d")?,
            at(9, 13, 14, 0)?,
            "prestador.103",
            &[(Received, 0, None), (InAnalysis, 30, None)],
        )?,
    ])
}

pub fn reimbursements() -> ProviderResult<Vec<RequestRecord<Reimbursement>>> {
    let fields = |service: &str, method: &str, amount: f64| -> ProviderResult<Reimbursement> {
        Ok(Reimbursement {
            service: text(service)?,
            payment_method: text(method)?,
            amount,
        })
    };

    Ok(vec![
        record(
            8801,
            affiliate(45, "21345633", "Daniela", "Reynoso"),
            fields("Kinesiología", "Credito", 40000.0)?,
            at(8, 28, 9, 0)?,
            "prestador.202",
            &[(Received, 0, None), (Observed, 15, Some("Ticket ilegible"))],
        )?,
        record(
            8802,
            affiliate(46, "30123456", "Marcos", "Ledesma"),
            fields("Estudio diagnóstico", "Debito", 55000.0)?,
            at(9, 3, 10, 0)?,
            "prestador.205",
            &[(Received, 0, None), (InAnalysis, 30, None), (Approved, 120, None)],
        )?,
        record(
            8803,
            affiliate(47, "34567890", "Lucía", "Fernández"),
            fields("Consulta clínica", "Efectivo", 12000.0)?,
            at(9, 5, 16, 15)?,
            "prestador.206",
            &[(Received, 0, None)],
        )?,
    ])
}

pub fn situations() -> ProviderResult<Vec<Situation>> {
    let now = at(9, 20, 10, 0)?;
    let date = |raw: &str| {
        NaiveDate::parse_from_str(raw, crate::constants::DATE_FORMAT)
            .map_err(|_| ProviderError::InvalidInput(format!("invalid seed date {raw}")))
    };

    let situation = |id: u64,
                     affiliate_id: u64,
                     member_id: Option<u64>,
                     description: &str,
                     start: &str,
                     end: Option<&str>,
                     status: SituationStatus,
                     created_hours_ago: i64,
                     updated_hours_ago: i64|
     -> ProviderResult<Situation> {
        Ok(Situation {
            id,
            affiliate_id,
            member_id,
            description: text(description)?,
            start_date: date(start)?,
            end_date: end.map(date).transpose()?,
            status,
            created_at: now - Duration::hours(created_hours_ago),
            updated_at: now - Duration::hours(updated_hours_ago),
        })
    };

    Ok(vec![
        situation(7001, 22, None, "Lumbalgia", "2025-09-01", None, SituationStatus::Active, 24, 23)?,
        situation(
            7002,
            22,
            Some(2201),
            "Contractura cervical",
            "2025-08-15",
            Some("2025-09-10"),
            SituationStatus::Baja,
            36,
            30,
        )?,
        situation(7003, 22, Some(2202), "Tendinitis", "2025-09-05", None, SituationStatus::Active, 72, 12)?,
        situation(7004, 31, None, "Asma leve", "2025-08-20", None, SituationStatus::Active, 100, 48)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_histories_end_in_current_status() {
        let records = authorizations().unwrap();
        assert_eq!(records.len(), 3);
        let rejected = &records[0];
        assert_eq!(rejected.status(), Rejected);
        assert_eq!(rejected.history().len(), 3);
        assert_eq!(
            rejected.history().last().unwrap().reason.as_deref(),
            Some("Falta documentación")
        );
        assert_eq!(rejected.updated_at(), at(9, 2, 10, 30).unwrap());

        for r in prescriptions().unwrap() {
            assert_eq!(r.history().last().unwrap().status, r.status());
        }
        let observed = &reimbursements().unwrap()[0];
        assert_eq!(observed.status(), Observed);
        assert_eq!(observed.fields().amount, 40000.0);
    }

    #[test]
    fn seeded_situations() {
        let situations = situations().unwrap();
        let ids: Vec<u64> = situations.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![7001, 7002, 7003, 7004]);
        assert_eq!(situations[1].status, SituationStatus::Baja);
        assert!(situations[1].end_date.is_some());
    }
}
