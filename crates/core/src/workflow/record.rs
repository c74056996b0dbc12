//! Request records and their audit history.

use std::fmt;

use chrono::{DateTime, Utc};
use prestadores_types::NonEmptyText;

use super::status::{RequestKind, RequestStatus};
use crate::{ProviderError, ProviderResult};

/// Affiliate data copied onto a record at creation time.
///
/// This is a snapshot, not a reference: later changes to the affiliate are not reflected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffiliateSnapshot {
    pub id: u64,
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl AffiliateSnapshot {
    /// Placeholder stored when the affiliate is not in the directory.
    pub fn placeholder(id: u64) -> Self {
        Self {
            id,
            national_id: "dummy-dni".into(),
            first_name: "Dummy".into(),
            last_name: "Afiliado".into(),
        }
    }
}

/// One status transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub status: RequestStatus,
    pub actor: String,
    pub changed_at: DateTime<Utc>,
    pub reason: Option<String>,
}

/// Family-specific part of a request record.
///
/// Implemented once per request family; the store, query facade and service are generic over
/// it.
pub trait RequestFields: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Partial update. `None` members leave the current value untouched.
    type Patch: fmt::Debug + Send;

    const KIND: RequestKind;
    const FIRST_ID: u64;

    fn apply_patch(&mut self, patch: Self::Patch);

    /// Text searched by the free-text list filter.
    fn search_haystack(&self) -> Vec<&str>;
}

/// Input for [`RequestStore::create`](super::store::RequestStore::create).
#[derive(Clone, Debug)]
pub struct NewRequest<F> {
    pub affiliate: AffiliateSnapshot,
    pub fields: F,
    pub initial_status: Option<RequestStatus>,
}

/// A requested transition. The actor is mandatory; the reason is mandatory only for
/// reason-requiring target statuses.
#[derive(Clone, Debug)]
pub struct StatusChange {
    pub status: RequestStatus,
    pub actor: NonEmptyText,
    pub reason: Option<String>,
}

/// Full request record, including its history.
///
/// Invariants, upheld by every constructor and mutator:
/// - `history` is never empty
/// - the last history entry's status equals `status`
/// - `history` is append-only
#[derive(Clone, Debug, PartialEq)]
pub struct RequestRecord<F> {
    id: u64,
    status: RequestStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    affiliate: AffiliateSnapshot,
    fields: F,
    history: Vec<HistoryEntry>,
}

impl<F: RequestFields> RequestRecord<F> {
    /// Creates a record whose history is seeded with one entry for `status`.
    pub(crate) fn new(
        id: u64,
        affiliate: AffiliateSnapshot,
        fields: F,
        status: RequestStatus,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            status,
            created_at: now,
            updated_at: now,
            affiliate,
            fields,
            history: vec![HistoryEntry {
                status,
                actor: actor.to_owned(),
                changed_at: now,
                reason: None,
            }],
        }
    }

    /// Rebuilds a record from an existing history, e.g. for demo data.
    ///
    /// The current status and the updated-at timestamp are taken from the last history entry.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidInput` if `history` is empty or out of chronological order.
    pub fn from_history(
        id: u64,
        affiliate: AffiliateSnapshot,
        fields: F,
        created_at: DateTime<Utc>,
        history: Vec<HistoryEntry>,
    ) -> ProviderResult<Self> {
        let last = history.last().ok_or_else(|| {
            ProviderError::InvalidInput(format!("{} {id} has an empty history", F::KIND))
        })?;

        if history
            .windows(2)
            .any(|pair| pair[1].changed_at < pair[0].changed_at)
        {
            return Err(ProviderError::InvalidInput(format!(
                "{} {id} history is not in chronological order",
                F::KIND
            )));
        }

        Ok(Self {
            id,
            status: last.status,
            created_at,
            updated_at: last.changed_at,
            affiliate,
            fields,
            history,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> RequestKind {
        F::KIND
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn affiliate(&self) -> &AffiliateSnapshot {
        &self.affiliate
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub(crate) fn apply_patch(&mut self, patch: F::Patch, now: DateTime<Utc>) {
        self.fields.apply_patch(patch);
        self.updated_at = now;
    }

    pub(crate) fn transition(&mut self, change: StatusChange, now: DateTime<Utc>) {
        self.status = change.status;
        self.updated_at = now;
        self.history.push(HistoryEntry {
            status: change.status,
            actor: change.actor.into_string(),
            changed_at: now,
            reason: change.reason,
        });
    }

    /// Case-insensitive substring match; `needle` must already be lowercase.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        if self.id.to_string().contains(needle) {
            return true;
        }

        let affiliate = [
            self.affiliate.national_id.as_str(),
            self.affiliate.first_name.as_str(),
            self.affiliate.last_name.as_str(),
        ];

        affiliate
            .into_iter()
            .chain(self.fields.search_haystack())
            .any(|text| text.to_lowercase().contains(needle))
    }

    pub fn summary(&self) -> RequestSummary<F> {
        RequestSummary {
            id: self.id,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            affiliate: self.affiliate.clone(),
            fields: self.fields.clone(),
        }
    }
}

/// List projection of a [`RequestRecord`]: everything but the history.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSummary<F> {
    pub id: u64,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub affiliate: AffiliateSnapshot,
    pub fields: F,
}

impl<F: RequestFields> RequestSummary<F> {
    pub fn kind(&self) -> RequestKind {
        F::KIND
    }
}
