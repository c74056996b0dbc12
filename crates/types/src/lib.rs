//! Validated primitive types shared across the prestadores crates.
//!
//! These types push input validation to construction time so that the service layer never
//! sees an empty required string or a non-positive record identifier.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when parsing record identifiers.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("identifier is not a number: {0:?}")]
    NotANumber(String),
    #[error("identifier must be positive, got {0}")]
    NotPositive(i64),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Like [`NonEmptyText::new`], but maps empty input to `None` instead of an error.
    ///
    /// Used for partial updates, where an empty string means "leave unchanged".
    pub fn optional(input: impl AsRef<str>) -> Option<Self> {
        Self::new(input).ok()
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A strictly positive numeric record identifier.
///
/// Every entity family, affiliate and family-group member is addressed by one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u64);

impl RecordId {
    /// Builds a `RecordId` from a signed integer as received on the wire.
    pub fn new(value: i64) -> Result<Self, IdError> {
        if value <= 0 {
            return Err(IdError::NotPositive(value));
        }
        Ok(Self(value as u64))
    }

    /// Parses a path segment such as `"12001"`.
    pub fn parse(input: &str) -> Result<Self, IdError> {
        let value = input
            .trim()
            .parse::<i64>()
            .map_err(|_| IdError::NotANumber(input.to_owned()))?;
        Self::new(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<RecordId> for u64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl FromStr for RecordId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_and_rejects_blank() {
        assert_eq!(NonEmptyText::new("  X-Ray ").unwrap().as_str(), "X-Ray");
        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
        assert!(NonEmptyText::optional("").is_none());
    }

    #[test]
    fn non_empty_text_deserialize_rejects_empty() {
        let err = serde_json::from_str::<NonEmptyText>("\"\"");
        assert!(err.is_err());
        let ok: NonEmptyText = serde_json::from_str("\"Cardiología\"").unwrap();
        assert_eq!(ok.as_str(), "Cardiología");
    }

    #[test]
    fn record_id_parse() {
        assert_eq!(RecordId::parse("12001").unwrap().get(), 12001);
        assert_eq!(RecordId::parse("0"), Err(IdError::NotPositive(0)));
        assert_eq!(RecordId::parse("-4"), Err(IdError::NotPositive(-4)));
        assert!(matches!(
            RecordId::parse("abc"),
            Err(IdError::NotANumber(_))
        ));
    }
}
