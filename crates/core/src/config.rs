//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services as an
//! `Arc<CoreConfig>`. Services never read environment variables during request handling.

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::{ProviderError, ProviderResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    default_page_size: usize,
    seed_mock_data: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidInput` if `default_page_size` is zero.
    pub fn new(default_page_size: usize, seed_mock_data: bool) -> ProviderResult<Self> {
        if default_page_size == 0 {
            return Err(ProviderError::InvalidInput(
                "default page size must be greater than zero".into(),
            ));
        }

        Ok(Self {
            default_page_size,
            seed_mock_data,
        })
    }

    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    /// Whether the stores start with the demo records loaded.
    pub fn seed_mock_data(&self) -> bool {
        self.seed_mock_data
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            seed_mock_data: true,
        }
    }
}

/// Parse the default page size from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_PAGE_SIZE`].
pub fn page_size_from_env_value(value: Option<String>) -> ProviderResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_PAGE_SIZE),
        Some(v) => match v.parse::<usize>() {
            Ok(size) if size > 0 => Ok(size),
            _ => Err(ProviderError::InvalidInput(format!(
                "PRESTADORES_PAGE_SIZE must be a positive integer, got {v:?}"
            ))),
        },
    }
}

/// Parse the seed-data flag from an optional string value. Defaults to `true`.
pub fn seed_flag_from_env_value(value: Option<String>) -> ProviderResult<bool> {
    let value = value.map(|v| v.trim().to_ascii_lowercase());

    match value.as_deref() {
        None | Some("") => Ok(true),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ProviderError::InvalidInput(format!(
            "PRESTADORES_SEED_DATA must be a boolean, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_defaults_when_unset_or_blank() {
        assert_eq!(page_size_from_env_value(None).unwrap(), DEFAULT_PAGE_SIZE);
        assert_eq!(
            page_size_from_env_value(Some("  ".into())).unwrap(),
            DEFAULT_PAGE_SIZE
        );
        assert_eq!(page_size_from_env_value(Some("50".into())).unwrap(), 50);
    }

    #[test]
    fn page_size_rejects_zero_and_garbage() {
        assert!(page_size_from_env_value(Some("0".into())).is_err());
        assert!(page_size_from_env_value(Some("many".into())).is_err());
    }

    #[test]
    fn seed_flag_parsing() {
        assert!(seed_flag_from_env_value(None).unwrap());
        assert!(!seed_flag_from_env_value(Some("false".into())).unwrap());
        assert!(seed_flag_from_env_value(Some("ON".into())).unwrap());
        assert!(seed_flag_from_env_value(Some("maybe".into())).is_err());
    }

    #[test]
    fn core_config_rejects_zero_page_size() {
        assert!(CoreConfig::new(0, true).is_err());
        assert_eq!(CoreConfig::new(5, false).unwrap().default_page_size(), 5);
    }
}
