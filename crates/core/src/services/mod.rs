//! Service façades: validation, orchestration and response shaping.
//!
//! Every service receives its dependencies, logging span included, through its constructor.

pub mod affiliates;
pub mod requests;
pub mod situations;

pub use affiliates::AffiliateService;
pub use requests::RequestService;
pub use situations::{SituationScope, SituationService};
