//! Constants used throughout the prestadores core crate.

/// Page size applied when a list request omits `size` or sends a non-positive value.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// First identifier handed out by each store. IDs are never reused.
pub const AUTHORIZATION_FIRST_ID: u64 = 12001;
pub const PRESCRIPTION_FIRST_ID: u64 = 9350;
pub const REIMBURSEMENT_FIRST_ID: u64 = 8801;
pub const SITUATION_FIRST_ID: u64 = 7001;

/// Actor recorded on the history entry written when a request is created.
pub const SYSTEM_ACTOR: &str = "sistema";

/// Relationship label used for the titular in the family-group view.
pub const TITULAR_RELATIONSHIP: &str = "Titular";

/// Scope value selecting the family-group view of situations.
pub const GROUP_SCOPE: &str = "grupo";

/// Calendar date format used for situation start/end dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
