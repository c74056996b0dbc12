//! Therapeutic situations store.
//!
//! Situations follow the same locking discipline as the request stores but carry no history:
//! a status change overwrites the status in place. Every operation that targets one situation
//! is addressed by `(affiliate, situation)` and treats a situation filed under another affiliate
//! as missing.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate, Utc};
use prestadores_types::{NonEmptyText, RecordId};

use crate::constants::SITUATION_FIRST_ID;
use crate::workflow::{check_reason, SituationStatus};
use crate::{ProviderError, ProviderResult};

const ENTITY: &str = "situation";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Situation {
    pub id: u64,
    /// Titular of the family group the situation is filed under.
    pub affiliate_id: u64,
    /// `None` when the situation belongs to the titular.
    pub member_id: Option<u64>,
    pub description: NonEmptyText,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: SituationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewSituation {
    pub affiliate_id: RecordId,
    pub member_id: Option<RecordId>,
    pub description: NonEmptyText,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Partial update of a situation.
///
/// `end_date` is doubly optional: `None` leaves it untouched, `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SituationPatch {
    pub description: Option<NonEmptyText>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
}

/// Rejects an end date earlier than the start date.
pub fn check_date_order(start: NaiveDate, end: Option<NaiveDate>) -> ProviderResult<()> {
    match end {
        Some(end) if end < start => Err(ProviderError::InvalidInput(format!(
            "fechaFin ({end}) must not be before fechaInicio ({start})"
        ))),
        _ => Ok(()),
    }
}

struct StoreInner {
    situations: BTreeMap<u64, Situation>,
    next_id: u64,
}

pub struct SituationStore {
    inner: RwLock<StoreInner>,
}

impl Default for SituationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SituationStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                situations: BTreeMap::new(),
                next_id: SITUATION_FIRST_ID,
            }),
        }
    }

    /// A store preloaded with `situations`; the next ID continues after the highest one.
    pub fn with_situations(situations: Vec<Situation>) -> ProviderResult<Self> {
        let mut map = BTreeMap::new();
        let mut next_id = SITUATION_FIRST_ID;

        for situation in situations {
            let id = situation.id;
            check_date_order(situation.start_date, situation.end_date)?;
            if map.insert(id, situation).is_some() {
                return Err(ProviderError::InvalidInput(format!(
                    "duplicate situation id {id}"
                )));
            }
            next_id = next_id.max(id + 1);
        }

        Ok(Self {
            inner: RwLock::new(StoreInner {
                situations: map,
                next_id,
            }),
        })
    }

    fn read(&self) -> ProviderResult<RwLockReadGuard<'_, StoreInner>> {
        self.inner
            .read()
            .map_err(|_| ProviderError::LockPoisoned(ENTITY))
    }

    fn write(&self) -> ProviderResult<RwLockWriteGuard<'_, StoreInner>> {
        self.inner
            .write()
            .map_err(|_| ProviderError::LockPoisoned(ENTITY))
    }

    /// Every situation filed under `affiliate_id`, ID ascending.
    ///
    /// # Arguments
    ///
    /// * `affiliate_id` - Titular the situations are filed under
    ///
    /// # Returns
    ///
    /// Returns the situations of the titular and of every family-group member filed under it,
    /// or an empty vector if there are none.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::LockPoisoned` if the store lock is poisoned.
    pub fn list_for_affiliate(&self, affiliate_id: RecordId) -> ProviderResult<Vec<Situation>> {
        let inner = self.read()?;
        Ok(inner
            .situations
            .values()
            .filter(|s| s.affiliate_id == affiliate_id.get())
            .cloned()
            .collect())
    }

    /// Stores a new situation with status `ACTIVA` under the next ID.
    ///
    /// # Arguments
    ///
    /// * `new` - Validated situation fields
    ///
    /// # Returns
    ///
    /// Returns the stored `Situation`, with created-at and updated-at set to the same instant.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidInput` if the end date is before the start date, or
    /// `ProviderError::LockPoisoned` if the store lock is poisoned.
    pub fn create(&self, new: NewSituation) -> ProviderResult<Situation> {
        check_date_order(new.start_date, new.end_date)?;

        let mut inner = self.write()?;
        let now = Utc::now();
        let situation = Situation {
            id: inner.next_id,
            affiliate_id: new.affiliate_id.get(),
            member_id: new.member_id.map(RecordId::get),
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            status: SituationStatus::Active,
            created_at: now,
            updated_at: now,
        };

        inner.situations.insert(situation.id, situation.clone());
        inner.next_id += 1;

        Ok(situation)
    }

    /// Applies `patch`. The resulting date range is validated before anything is written.
    ///
    /// # Arguments
    ///
    /// * `affiliate_id` - Titular the situation must be filed under
    /// * `situation_id` - Situation to update
    /// * `patch` - Members to change; `None` leaves a member as it is
    ///
    /// # Returns
    ///
    /// Returns the updated `Situation`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` if the situation does not exist or belongs to another
    /// affiliate, and `ProviderError::InvalidInput` if the merged dates are out of order.
    pub fn patch(
        &self,
        affiliate_id: RecordId,
        situation_id: RecordId,
        patch: SituationPatch,
    ) -> ProviderResult<Situation> {
        let mut inner = self.write()?;
        let situation = owned_mut(&mut inner.situations, affiliate_id, situation_id)?;

        let start_date = patch.start_date.unwrap_or(situation.start_date);
        let end_date = patch.end_date.unwrap_or(situation.end_date);
        check_date_order(start_date, end_date)?;

        if let Some(description) = patch.description {
            situation.description = description;
        }
        situation.start_date = start_date;
        situation.end_date = end_date;
        situation.updated_at = Utc::now();

        Ok(situation.clone())
    }

    /// Overwrites the status. Moving to `BAJA` without an end date closes the situation today.
    ///
    /// # Arguments
    ///
    /// * `affiliate_id` - Titular the situation must be filed under
    /// * `situation_id` - Situation to update
    /// * `status` - Target status
    /// * `reason` - Justification, mandatory for `BAJA`
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` for an unknown or foreign situation and
    /// `ProviderError::ReasonRequired` if `BAJA` comes without a reason. Nothing is modified in
    /// either case.
    pub fn change_status(
        &self,
        affiliate_id: RecordId,
        situation_id: RecordId,
        status: SituationStatus,
        reason: Option<&str>,
    ) -> ProviderResult<Situation> {
        let mut inner = self.write()?;
        let situation = owned_mut(&mut inner.situations, affiliate_id, situation_id)?;

        check_reason(status, reason)?;

        let now = Utc::now();
        if status == SituationStatus::Baja && situation.end_date.is_none() {
            situation.end_date = Some(now.date_naive());
        }
        situation.status = status;
        situation.updated_at = now;

        Ok(situation.clone())
    }

    /// Hard delete. The ID is not handed out again.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` if the situation does not exist or belongs to another
    /// affiliate.
    pub fn delete(&self, affiliate_id: RecordId, situation_id: RecordId) -> ProviderResult<()> {
        let mut inner = self.write()?;
        owned_mut(&mut inner.situations, affiliate_id, situation_id)?;
        inner.situations.remove(&situation_id.get());
        Ok(())
    }
}

fn owned_mut(
    situations: &mut BTreeMap<u64, Situation>,
    affiliate_id: RecordId,
    situation_id: RecordId,
) -> ProviderResult<&mut Situation> {
    situations
        .get_mut(&situation_id.get())
        .filter(|s| s.affiliate_id == affiliate_id.get())
        .ok_or(ProviderError::NotFound {
            entity: ENTITY,
            id: situation_id.get(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rid(raw: i64) -> RecordId {
        RecordId::new(raw).unwrap()
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn new_situation(affiliate: i64, member: Option<i64>, start: &str) -> NewSituation {
        NewSituation {
            affiliate_id: rid(affiliate),
            member_id: member.map(rid),
            description: NonEmptyText::new("Lumbalgia").unwrap(),
            start_date: date(start),
            end_date: None,
        }
    }

    #[test]
    fn create_is_active_and_ids_survive_delete() {
        let store = SituationStore::new();
        let first = store.create(new_situation(22, None, "2025-09-01")).unwrap();
        assert_eq!(first.id, 7001);
        assert_eq!(first.status, SituationStatus::Active);

        store.delete(rid(22), rid(7001)).unwrap();
        let second = store.create(new_situation(22, None, "2025-09-01")).unwrap();
        assert_eq!(second.id, 7002);
        assert!(store.list_for_affiliate(rid(22)).unwrap().iter().all(|s| s.id != 7001));
    }

    #[test]
    fn create_rejects_end_before_start() {
        let store = SituationStore::new();
        let mut new = new_situation(22, None, "2025-09-10");
        new.end_date = Some(date("2025-09-01"));
        assert!(matches!(
            store.create(new),
            Err(ProviderError::InvalidInput(_))
        ));
        assert!(store.list_for_affiliate(rid(22)).unwrap().is_empty());
    }

    #[test]
    fn other_affiliates_situation_is_not_found() {
        let store = SituationStore::new();
        let created = store.create(new_situation(22, None, "2025-09-01")).unwrap();
        let id = rid(created.id as i64);

        let err = store.delete(rid(31), id).unwrap_err();
        assert!(matches!(err, ProviderError::NotFound { entity: "situation", .. }));
        assert!(store
            .change_status(rid(31), id, SituationStatus::Alta, None)
            .is_err());
        assert!(store.patch(rid(31), id, SituationPatch::default()).is_err());
        assert_eq!(store.list_for_affiliate(rid(22)).unwrap().len(), 1);
    }

    #[test]
    fn baja_requires_reason_and_sets_end_date() {
        let store = SituationStore::new();
        let created = store.create(new_situation(22, None, "2025-01-01")).unwrap();
        let id = rid(created.id as i64);

        let err = store
            .change_status(rid(22), id, SituationStatus::Baja, Some(" "))
            .unwrap_err();
        assert!(matches!(err, ProviderError::ReasonRequired { status: "BAJA" }));
        assert_eq!(store.list_for_affiliate(rid(22)).unwrap()[0], created);

        let closed = store
            .change_status(rid(22), id, SituationStatus::Baja, Some("alta médica"))
            .unwrap();
        assert_eq!(closed.status, SituationStatus::Baja);
        assert_eq!(closed.end_date, Some(closed.updated_at.date_naive()));

        let reopened = store
            .change_status(rid(22), id, SituationStatus::Active, None)
            .unwrap();
        assert_eq!(reopened.status, SituationStatus::Active);
        assert_eq!(reopened.end_date, closed.end_date);
    }

    #[test]
    fn baja_keeps_existing_end_date() {
        let store = SituationStore::new();
        let mut new = new_situation(22, Some(2201), "2025-08-15");
        new.end_date = Some(date("2025-09-10"));
        let created = store.create(new).unwrap();

        let closed = store
            .change_status(rid(22), rid(created.id as i64), SituationStatus::Baja, Some("fin"))
            .unwrap();
        assert_eq!(closed.end_date, Some(date("2025-09-10")));
    }

    #[test]
    fn patch_clears_end_date_and_validates_range() {
        let store = SituationStore::new();
        let mut new = new_situation(22, None, "2025-09-01");
        new.end_date = Some(date("2025-09-10"));
        let created = store.create(new).unwrap();
        let id = rid(created.id as i64);

        let bad = SituationPatch {
            start_date: Some(date("2025-09-15")),
            ..SituationPatch::default()
        };
        assert!(store.patch(rid(22), id, bad).is_err());
        assert_eq!(store.list_for_affiliate(rid(22)).unwrap()[0], created);

        let clear = SituationPatch {
            description: NonEmptyText::optional("Lumbalgia crónica"),
            start_date: Some(date("2025-09-15")),
            end_date: Some(None),
        };
        let patched = store.patch(rid(22), id, clear).unwrap();
        assert_eq!(patched.end_date, None);
        assert_eq!(patched.start_date, date("2025-09-15"));
        assert_eq!(patched.description.as_str(), "Lumbalgia crónica");
        assert_eq!(patched.status, created.status);
    }
}
