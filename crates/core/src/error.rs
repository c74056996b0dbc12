use prestadores_types::{IdError, TextError};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("a reason is required to move to status {status}")]
    ReasonRequired { status: &'static str },

    #[error("{0} store lock poisoned")]
    LockPoisoned(&'static str),
}

impl ProviderError {
    /// True for errors caused by the caller (validation, policy, unknown IDs).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ProviderError::LockPoisoned(_))
    }
}

impl From<IdError> for ProviderError {
    fn from(err: IdError) -> Self {
        ProviderError::InvalidInput(err.to_string())
    }
}

impl From<TextError> for ProviderError {
    fn from(err: TextError) -> Self {
        ProviderError::InvalidInput(err.to_string())
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
