//! Affiliate directory and clinical history.
//!
//! The directory is a read-only collaborator: it resolves affiliate snapshots for new requests,
//! titular names and family groups for the situation views, and serves the affiliate endpoints.
//! It never changes after construction, so it needs no lock.

use std::collections::BTreeMap;

use api_shared::{AfiliadoDetalle, AfiliadoListItem, HistoriaClinica, NotaTurno, Turno};
use chrono::{DateTime, TimeZone, Utc};

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::shared::format_timestamp;
use crate::workflow::AffiliateSnapshot;

/// One insured person.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affiliate {
    pub id: u64,
    pub member_number: String,
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub health_plan: String,
    pub is_titular: bool,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub province: String,
}

impl Affiliate {
    pub fn snapshot(&self) -> AffiliateSnapshot {
        AffiliateSnapshot {
            id: self.id,
            national_id: self.national_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    pub fn to_list_item(&self) -> AfiliadoListItem {
        AfiliadoListItem {
            id: self.id,
            dni: self.national_id.clone(),
            nombre: self.first_name.clone(),
            apellido: self.last_name.clone(),
            plan_medico: self.health_plan.clone(),
            titular: self.is_titular,
        }
    }

    pub fn to_detail(&self) -> AfiliadoDetalle {
        AfiliadoDetalle {
            id: self.id,
            nro_afiliado: self.member_number.clone(),
            dni: self.national_id.clone(),
            nombre: self.first_name.clone(),
            apellido: self.last_name.clone(),
            plan_medico: self.health_plan.clone(),
            titular: self.is_titular,
            email: self.email.clone(),
            telefono: self.phone.clone(),
            ciudad: self.city.clone(),
            provincia: self.province.clone(),
        }
    }
}

/// A non-titular member of a family group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FamilyMember {
    pub id: u64,
    pub name: String,
    pub relationship: String,
}

/// Appointment note written by a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppointmentNote {
    pub id: u64,
    pub written_at: DateTime<Utc>,
    pub provider_id: u64,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Appointment {
    pub id: u64,
    pub scheduled_at: DateTime<Utc>,
    pub specialty: String,
    pub status: String,
    pub notes: Vec<AppointmentNote>,
}

/// Read-only lookup of affiliates, titulars and family groups.
#[derive(Clone, Debug, Default)]
pub struct AffiliateDirectory {
    affiliates: BTreeMap<u64, Affiliate>,
    titular_names: BTreeMap<u64, String>,
    family_groups: BTreeMap<u64, Vec<FamilyMember>>,
    appointments: Vec<Appointment>,
}

impl AffiliateDirectory {
    /// An empty directory: every lookup misses and every titular gets a generated name.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Directory preloaded with the demo affiliates, family groups and appointments.
    pub fn mock() -> Self {
        let affiliates = [
            affiliate(1, "15121231523", "43521489", "María", "Candia", "Sancor Salud", true)
                .contact("juan.perez@email.com", "011-4567-8901", "Buenos Aires", "Buenos Aires"),
            affiliate(2, "15121231524", "53521489", "Stella", "Rodriguez", "Galeno 210", true)
                .contact("maria.rodriguez@email.com", "0341-234-5678", "Rosario", "Santa Fe"),
            affiliate(3, "15121231525", "40456015", "Nicolas", "Martin", "Sancor Salud", false)
                .contact("nicolas.martin@email.com", "0351-456-7812", "Córdoba", "Córdoba"),
            affiliate(4, "15121231526", "12334555", "Sofia", "Lopez", "Swiss Medical", false)
                .contact("sofia.lopez@email.com", "0261-423-9087", "Mendoza", "Mendoza"),
            affiliate(5, "15121231527", "11000189", "Facundo", "Gomez", "Sancor Salud", true)
                .contact("facundo.gomez@email.com", "0223-495-1120", "Mar del Plata", "Buenos Aires"),
        ];

        let titular_names = BTreeMap::from([
            (22, "Miguel Osorio".to_owned()),
            (31, "David Queen".to_owned()),
        ]);

        let family_groups = BTreeMap::from([
            (
                22,
                vec![
                    member(2201, "Ana Osorio", "Hija"),
                    member(2202, "Luis Osorio", "Cónyuge"),
                ],
            ),
            (31, vec![member(3101, "Pedro Queen", "Hijo")]),
        ]);

        Self {
            affiliates: affiliates.into_iter().map(|a| (a.id, a)).collect(),
            titular_names,
            family_groups,
            appointments: mock_appointments(),
        }
    }

    /// All affiliates, ID ascending.
    pub fn list(&self) -> impl Iterator<Item = &Affiliate> {
        self.affiliates.values()
    }

    pub fn get(&self, id: u64) -> Option<&Affiliate> {
        self.affiliates.get(&id)
    }

    /// Snapshot to copy onto a new request. Unknown affiliates get a placeholder.
    pub fn snapshot(&self, id: u64) -> AffiliateSnapshot {
        self.get(id)
            .map(Affiliate::snapshot)
            .unwrap_or_else(|| AffiliateSnapshot::placeholder(id))
    }

    /// Display name of a group titular.
    pub fn titular_name(&self, id: u64) -> String {
        if let Some(name) = self.titular_names.get(&id) {
            return name.clone();
        }
        match self.get(id) {
            Some(a) => format!("{} {}", a.first_name, a.last_name),
            None => format!("Titular {id}"),
        }
    }

    /// Members of the titular's family group, excluding the titular.
    pub fn family_group(&self, titular_id: u64) -> &[FamilyMember] {
        self.family_groups
            .get(&titular_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Appointments with their notes; `provider_id` keeps only that provider's notes.
    ///
    /// The history is not keyed by affiliate yet: every affiliate sees the same appointments and
    /// the response echoes the requested ID.
    pub fn clinical_history(&self, affiliate_id: u64, provider_id: Option<u64>) -> HistoriaClinica {
        let turnos: Vec<Turno> = self
            .appointments
            .iter()
            .map(|appointment| Turno {
                id: appointment.id,
                fecha: format_timestamp(appointment.scheduled_at),
                especialidad: appointment.specialty.clone(),
                estado: appointment.status.clone(),
                notas: appointment
                    .notes
                    .iter()
                    .filter(|note| provider_id.map_or(true, |p| note.provider_id == p))
                    .map(|note| NotaTurno {
                        id: note.id,
                        fecha: format_timestamp(note.written_at),
                        prestador_id: note.provider_id,
                        texto: note.text.clone(),
                    })
                    .collect(),
            })
            .collect();

        HistoriaClinica {
            afiliado_id: affiliate_id,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            total: turnos.len(),
            turnos,
        }
    }
}

fn affiliate(
    id: u64,
    member_number: &str,
    national_id: &str,
    first_name: &str,
    last_name: &str,
    health_plan: &str,
    is_titular: bool,
) -> Affiliate {
    Affiliate {
        id,
        member_number: member_number.into(),
        national_id: national_id.into(),
        first_name: first_name.into(),
        last_name: last_name.into(),
        health_plan: health_plan.into(),
        is_titular,
        email: String::new(),
        phone: String::new(),
        city: String::new(),
        province: String::new(),
    }
}

impl Affiliate {
    fn contact(mut self, email: &str, phone: &str, city: &str, province: &str) -> Self {
        self.email = email.into();
        self.phone = phone.into();
        self.city = city.into();
        self.province = province.into();
        self
    }
}

fn member(id: u64, name: &str, relationship: &str) -> FamilyMember {
    FamilyMember {
        id,
        name: name.into(),
        relationship: relationship.into(),
    }
}

fn at(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn note(id: u64, written_at: DateTime<Utc>, provider_id: u64, text: &str) -> AppointmentNote {
    AppointmentNote {
        id,
        written_at,
        provider_id,
        text: text.into(),
    }
}

fn mock_appointments() -> Vec<Appointment> {
    let general_checkup = note(10, at(9, 20, 10, 30), 45, "Control general");
    vec![
        Appointment {
            id: 500,
            scheduled_at: at(9, 20, 10, 0),
            specialty: "Clínica".into(),
            status: "RESERVADO".into(),
            notes: vec![general_checkup.clone()],
        },
        Appointment {
            id: 501,
            scheduled_at: at(9, 25, 15, 0),
            specialty: "Kinesiología".into(),
            status: "ATENDIDO".into(),
            notes: vec![
                general_checkup,
                note(12, at(9, 25, 15, 45), 55, "Ejercicios domiciliarios"),
                note(
                    14,
                    at(9, 25, 15, 50),
                    55,
                    "Se pudo notar un leve problema en la rodilla izquierda",
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_directory_lists_five_affiliates_in_id_order() {
        let dir = AffiliateDirectory::mock();
        let ids: Vec<u64> = dir.list().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(dir.get(2).unwrap().to_detail().provincia, "Santa Fe");
        assert!(dir.get(6).is_none());
    }

    #[test]
    fn unknown_affiliates_get_placeholder_snapshot() {
        let dir = AffiliateDirectory::mock();
        assert_eq!(dir.snapshot(1).first_name, "María");
        let placeholder = dir.snapshot(31);
        assert_eq!(placeholder.national_id, "dummy-dni");
        assert_eq!(placeholder.id, 31);
    }

    #[test]
    fn titular_names_and_groups() {
        let dir = AffiliateDirectory::mock();
        assert_eq!(dir.titular_name(22), "Miguel Osorio");
        assert_eq!(dir.titular_name(5), "Facundo Gomez");
        assert_eq!(dir.titular_name(99), "Titular 99");
        assert_eq!(dir.family_group(22).len(), 2);
        assert_eq!(dir.family_group(31)[0].relationship, "Hijo");
        assert!(dir.family_group(99).is_empty());
    }

    #[test]
    fn clinical_history_filters_notes_by_provider() {
        let dir = AffiliateDirectory::mock();

        let all = dir.clinical_history(7, None);
        assert_eq!(all.afiliado_id, 7);
        assert_eq!(all.total, 2);
        assert_eq!(all.turnos[1].notas.len(), 3);
        assert_eq!(all.turnos[0].fecha, "2025-09-20T10:00:00Z");

        let only_55 = dir.clinical_history(7, Some(55));
        assert!(only_55.turnos[0].notas.is_empty());
        assert_eq!(only_55.turnos[1].notas.len(), 2);
        assert_eq!(only_55.total, 2);
    }
}
