//! Stores that are not request workflows, plus the demo data used to seed every store.
//!
//! The request stores themselves live in [`crate::workflow::store`].

pub mod seed;
pub mod situations;

pub use situations::{check_date_order, NewSituation, Situation, SituationPatch, SituationStore};
