//! The state-change workflow shared by every request family.
//!
//! - [`status`]: closed status enumerations and their wire literals
//! - [`policy`]: which target statuses require a reason
//! - [`record`]: records, history entries and the per-family [`RequestFields`] trait
//! - [`store`]: the lock-guarded in-memory store
//! - [`query`]: filtering, ordering and pagination

pub mod policy;
pub mod query;
pub mod record;
pub mod status;
pub mod store;

pub use policy::{check_reason, normalise_reason, ReasonPolicy};
pub use query::{ListQuery, Page, SortKey, SortOrder};
pub use record::{
    AffiliateSnapshot, HistoryEntry, NewRequest, RequestFields, RequestRecord, RequestSummary,
    StatusChange,
};
pub use status::{RequestKind, RequestStatus, SituationStatus};
pub use store::RequestStore;
