//! In-memory entity store for one request family.
//!
//! Records live in a `BTreeMap` keyed by ID behind a single `RwLock`: list and get take the read
//! lock, every mutation takes the write lock for its whole read-modify-append-write sequence.
//! Nothing under the lock performs I/O.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use prestadores_types::RecordId;

use super::policy::check_reason;
use super::query::{ListQuery, Page, Sortable};
use super::record::{NewRequest, RequestFields, RequestRecord, RequestSummary, StatusChange};
use crate::constants::SYSTEM_ACTOR;
use crate::{ProviderError, ProviderResult};

struct StoreInner<F> {
    records: BTreeMap<u64, RequestRecord<F>>,
    next_id: u64,
}

/// Authoritative holder of one request family's records.
pub struct RequestStore<F: RequestFields> {
    inner: RwLock<StoreInner<F>>,
}

impl<F: RequestFields> Default for RequestStore<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: RequestFields> RequestStore<F> {
    /// An empty store whose first ID is the family's offset.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                records: BTreeMap::new(),
                next_id: F::FIRST_ID,
            }),
        }
    }

    /// A store preloaded with `records`. The next ID continues after the highest one loaded.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidInput` if two records share an ID.
    pub fn with_records(records: Vec<RequestRecord<F>>) -> ProviderResult<Self> {
        let mut map = BTreeMap::new();
        let mut next_id = F::FIRST_ID;

        for record in records {
            let id = record.id();
            if map.insert(id, record).is_some() {
                return Err(ProviderError::InvalidInput(format!(
                    "duplicate {} id {id}",
                    F::KIND.entity_name()
                )));
            }
            next_id = next_id.max(id + 1);
        }

        Ok(Self {
            inner: RwLock::new(StoreInner {
                records: map,
                next_id,
            }),
        })
    }

    fn read(&self) -> ProviderResult<RwLockReadGuard<'_, StoreInner<F>>> {
        self.inner
            .read()
            .map_err(|_| ProviderError::LockPoisoned(F::KIND.entity_name()))
    }

    fn write(&self) -> ProviderResult<RwLockWriteGuard<'_, StoreInner<F>>> {
        self.inner
            .write()
            .map_err(|_| ProviderError::LockPoisoned(F::KIND.entity_name()))
    }

    fn not_found(id: u64) -> ProviderError {
        ProviderError::NotFound {
            entity: F::KIND.entity_name(),
            id,
        }
    }

    /// Filters by exact status and free text, orders, then slices one page.
    pub fn list(&self, query: &ListQuery) -> ProviderResult<Page<RequestSummary<F>>> {
        let inner = self.read()?;

        let mut rows: Vec<RequestSummary<F>> = inner
            .records
            .values()
            .filter(|r| query.status().map_or(true, |s| r.status().as_str() == s))
            .filter(|r| query.search().map_or(true, |needle| r.matches_search(needle)))
            .map(RequestRecord::summary)
            .collect();
        drop(inner);

        let order = query.sort();
        rows.sort_by(|a, b| order.compare(a, b));

        Ok(Page::slice(rows, query))
    }

    /// Returns a copy of the record, history included.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` if no record has this ID, or
    /// `ProviderError::LockPoisoned` if the store lock is poisoned.
    pub fn get(&self, id: RecordId) -> ProviderResult<RequestRecord<F>> {
        let inner = self.read()?;
        inner
            .records
            .get(&id.get())
            .cloned()
            .ok_or_else(|| Self::not_found(id.get()))
    }

    /// Assigns the next ID and stores a new record with a one-entry history.
    pub fn create(&self, new: NewRequest<F>) -> ProviderResult<RequestRecord<F>> {
        let mut inner = self.write()?;

        let id = inner.next_id;
        let record = RequestRecord::new(
            id,
            new.affiliate,
            new.fields,
            new.initial_status.unwrap_or_default(),
            SYSTEM_ACTOR,
            Utc::now(),
        );

        inner.records.insert(id, record.clone());
        inner.next_id += 1;

        Ok(record)
    }

    /// Applies the non-empty members of `patch`. Status and history are untouched.
    pub fn update_fields(&self, id: RecordId, patch: F::Patch) -> ProviderResult<RequestRecord<F>> {
        let mut inner = self.write()?;
        let record = inner
            .records
            .get_mut(&id.get())
            .ok_or_else(|| Self::not_found(id.get()))?;

        record.apply_patch(patch, Utc::now());
        Ok(record.clone())
    }

    /// Moves the record to a new status and appends one history entry.
    ///
    /// The mandatory-reason rule is checked again here, before anything is modified.
    pub fn change_status(
        &self,
        id: RecordId,
        change: StatusChange,
    ) -> ProviderResult<RequestRecord<F>> {
        let mut inner = self.write()?;
        let record = inner
            .records
            .get_mut(&id.get())
            .ok_or_else(|| Self::not_found(id.get()))?;

        check_reason(change.status, change.reason.as_deref())?;

        record.transition(change, Utc::now());
        Ok(record.clone())
    }

    pub fn len(&self) -> ProviderResult<usize> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> ProviderResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<F: RequestFields> Sortable for RequestSummary<F> {
    fn sort_id(&self) -> u64 {
        self.id
    }

    fn sort_created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sort_updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use prestadores_types::NonEmptyText;

    use super::*;
    use crate::requests::Authorization;
    use crate::workflow::{AffiliateSnapshot, RequestStatus, SortOrder};

    fn fields(procedure: &str, specialty: &str) -> Authorization {
        Authorization {
            procedure: NonEmptyText::new(procedure).unwrap(),
            specialty: NonEmptyText::new(specialty).unwrap(),
        }
    }

    fn new_request(affiliate_id: u64, procedure: &str) -> NewRequest<Authorization> {
        NewRequest {
            affiliate: AffiliateSnapshot::placeholder(affiliate_id),
            fields: fields(procedure, "Radiology"),
            initial_status: None,
        }
    }

    fn change(status: RequestStatus, actor: &str, reason: Option<&str>) -> StatusChange {
        StatusChange {
            status,
            actor: NonEmptyText::new(actor).unwrap(),
            reason: reason.map(str::to_owned),
        }
    }

    fn id(raw: u64) -> RecordId {
        RecordId::new(raw as i64).unwrap()
    }

    #[test]
    fn create_starts_received_with_one_history_entry() {
        let store = RequestStore::<Authorization>::new();
        let record = store.create(new_request(32, "X-Ray")).unwrap();

        assert_eq!(record.id(), 12001);
        assert_eq!(record.status(), RequestStatus::Received);
        assert_eq!(record.history().len(), 1);
        assert_eq!(record.history()[0].actor, SYSTEM_ACTOR);
        assert_eq!(record.created_at(), record.updated_at());
        assert_eq!(record.fields().procedure.as_str(), "X-Ray");
    }

    #[test]
    fn create_honours_initial_status() {
        let store = RequestStore::<Authorization>::new();
        let mut req = new_request(1, "X-Ray");
        req.initial_status = Some(RequestStatus::InAnalysis);
        let record = store.create(req).unwrap();
        assert_eq!(record.status(), RequestStatus::InAnalysis);
        assert_eq!(record.history()[0].status, RequestStatus::InAnalysis);
    }

    #[test]
    fn ids_are_monotonic_and_continue_after_seed() {
        let store = RequestStore::<Authorization>::new();
        let a = store.create(new_request(1, "A")).unwrap();
        let b = store.create(new_request(1, "B")).unwrap();
        assert!(b.id() > a.id());

        let seeded = RequestStore::with_records(vec![a, b]).unwrap();
        let c = seeded.create(new_request(1, "C")).unwrap();
        assert_eq!(c.id(), 12003);
    }

    #[test]
    fn duplicate_seed_ids_are_rejected() {
        let store = RequestStore::<Authorization>::new();
        let a = store.create(new_request(1, "A")).unwrap();
        assert!(RequestStore::with_records(vec![a.clone(), a]).is_err());
    }

    #[test]
    fn get_is_idempotent_and_reports_not_found() {
        let store = RequestStore::<Authorization>::new();
        let created = store.create(new_request(1, "A")).unwrap();

        let first = store.get(id(created.id())).unwrap();
        let second = store.get(id(created.id())).unwrap();
        assert_eq!(first, second);

        let err = store.get(id(99)).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::NotFound {
                entity: "authorization",
                id: 99
            }
        ));
    }

    #[test]
    fn rejecting_without_reason_leaves_record_untouched() {
        let store = RequestStore::<Authorization>::new();
        let created = store.create(new_request(1, "A")).unwrap();

        let err = store
            .change_status(id(created.id()), change(RequestStatus::Rejected, "u1", Some("")))
            .unwrap_err();
        assert!(matches!(err, ProviderError::ReasonRequired { .. }));

        let after = store.get(id(created.id())).unwrap();
        assert_eq!(after, created);
    }

    #[test]
    fn rejecting_with_reason_appends_history() {
        let store = RequestStore::<Authorization>::new();
        let created = store.create(new_request(1, "A")).unwrap();

        let updated = store
            .change_status(
                id(created.id()),
                change(RequestStatus::Rejected, "u1", Some("missing docs")),
            )
            .unwrap();

        assert_eq!(updated.status(), RequestStatus::Rejected);
        assert_eq!(updated.history().len(), 2);
        let last = updated.history().last().unwrap();
        assert_eq!(last.status, RequestStatus::Rejected);
        assert_eq!(last.actor, "u1");
        assert_eq!(last.reason.as_deref(), Some("missing docs"));
        assert!(updated.updated_at() >= created.updated_at());
    }

    #[test]
    fn any_status_can_follow_any_other() {
        let store = RequestStore::<Authorization>::new();
        let created = store.create(new_request(1, "A")).unwrap();

        let path = [
            RequestStatus::Approved,
            RequestStatus::Received,
            RequestStatus::Approved,
            RequestStatus::Observed,
            RequestStatus::InAnalysis,
        ];
        for status in path {
            store
                .change_status(id(created.id()), change(status, "u1", Some("ok")))
                .unwrap();
        }

        let record = store.get(id(created.id())).unwrap();
        assert_eq!(record.status(), RequestStatus::InAnalysis);
        assert_eq!(record.history().len(), path.len() + 1);
        assert_eq!(record.history().last().unwrap().status, record.status());
    }

    #[test]
    fn update_fields_keeps_status_and_history() {
        let store = RequestStore::<Authorization>::new();
        let created = store.create(new_request(1, "A")).unwrap();

        let patch = crate::requests::AuthorizationPatch {
            procedure: NonEmptyText::optional("CT scan"),
            specialty: None,
        };
        let updated = store.update_fields(id(created.id()), patch).unwrap();

        assert_eq!(updated.fields().procedure.as_str(), "CT scan");
        assert_eq!(updated.fields().specialty.as_str(), "Radiology");
        assert_eq!(updated.status(), created.status());
        assert_eq!(updated.history(), created.history());
    }

    #[test]
    fn list_pages_filters_and_searches() {
        let store = RequestStore::<Authorization>::new();
        for name in ["X-Ray", "MRI", "CT scan"] {
            store.create(new_request(1, name)).unwrap();
        }
        store
            .change_status(id(12002), change(RequestStatus::Approved, "u1", None))
            .unwrap();

        let page = store.list(&ListQuery::new(1, 2)).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.size, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 12003);

        let approved = store
            .list(&ListQuery::new(0, 20).with_status("APROBADO"))
            .unwrap();
        assert_eq!(approved.total, 1);
        assert_eq!(approved.items[0].fields.procedure.as_str(), "MRI");

        let unknown = store
            .list(&ListQuery::new(0, 20).with_status("PENDIENTE"))
            .unwrap();
        assert_eq!(unknown.total, 0);

        let search = store
            .list(&ListQuery::new(0, 20).with_search("ct SCAN"))
            .unwrap();
        assert_eq!(search.total, 1);
        assert_eq!(search.items[0].id, 12003);

        let by_affiliate = store
            .list(&ListQuery::new(0, 20).with_search("dummy"))
            .unwrap();
        assert_eq!(by_affiliate.total, 3);
    }

    #[test]
    fn list_sorts_by_update_time_descending() {
        let store = RequestStore::<Authorization>::new();
        for name in ["A", "B", "C"] {
            store.create(new_request(1, name)).unwrap();
        }
        thread::sleep(std::time::Duration::from_millis(5));
        store
            .change_status(id(12001), change(RequestStatus::InAnalysis, "u1", None))
            .unwrap();

        let query = ListQuery::new(0, 20).with_sort(SortOrder::parse("fechaActualizacion,desc"));
        let page = store.list(&query).unwrap();
        assert_eq!(page.items[0].id, 12001);

        let ids: Vec<u64> = store
            .list(&ListQuery::new(0, 20))
            .unwrap()
            .items
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![12001, 12002, 12003]);
    }

    #[test]
    fn concurrent_creates_and_transitions_keep_invariants() {
        let store = Arc::new(RequestStore::<Authorization>::new());
        let target = store.create(new_request(1, "shared")).unwrap().id();

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..25 {
                        store.create(new_request(n + 1, "X")).unwrap();
                        let status = RequestStatus::ALL[(i + n as usize) % RequestStatus::ALL.len()];
                        store
                            .change_status(id(target), change(status, "worker", Some("load")))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len().unwrap(), 1 + 8 * 25);

        let page = store.list(&ListQuery::new(0, 1000)).unwrap();
        let mut ids: Vec<u64> = page.items.iter().map(|s| s.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 201);
        assert_eq!(*ids.last().unwrap(), 12001 + 200);

        let record = store.get(id(target)).unwrap();
        assert_eq!(record.history().len(), 1 + 8 * 25);
        assert_eq!(record.history().last().unwrap().status, record.status());
    }
}
