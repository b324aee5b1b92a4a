//! Validated text primitives shared across the clinic workspace.
//!
//! These wrappers guarantee their invariants once constructed, so downstream
//! crates can accept them without re-validating.

/// Maximum accepted length of a patient identifier.
pub const MAX_UHID_LEN: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    #[error("value is blank")]
    Empty,

    #[error("invalid UHID '{0}': only ASCII letters, digits and '-' are allowed (max 32)")]
    InvalidUhid(String),
}

/// Text with at least one visible character, stored trimmed.
///
/// Patient names use it, so every name has initials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// # Errors
    ///
    /// [`TextError::Empty`] when nothing is left after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            text => Ok(Self(text.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased first letter of every whitespace-separated word.
    ///
    /// `"Priya Sharma"` becomes `"PS"`.
    pub fn initials(&self) -> String {
        self.0
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NonEmptyText::new(value)
    }
}

impl From<NonEmptyText> for String {
    fn from(text: NonEmptyText) -> Self {
        text.0
    }
}

/// Unique Health Identifier: the patient's primary external key.
///
/// Identifiers look like `WMN-2025-001`. Construction trims surrounding
/// whitespace and keeps the original case; comparison is exact.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Uhid(String);

impl Uhid {
    /// Validates and wraps a patient identifier.
    ///
    /// # Errors
    ///
    /// - [`TextError::Empty`] if the trimmed input is empty.
    /// - [`TextError::InvalidUhid`] if it is too long or contains characters
    ///   other than ASCII letters, digits and `-`.
    pub fn parse(input: &str) -> Result<Self, TextError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }

        let ok = trimmed.len() <= MAX_UHID_LEN
            && trimmed
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-');
        if !ok {
            return Err(TextError::InvalidUhid(trimmed.to_owned()));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Uhid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Uhid {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uhid::parse(s)
    }
}

impl AsRef<str> for Uhid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Uhid {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uhid::parse(&value)
    }
}

impl From<Uhid> for String {
    fn from(uhid: Uhid) -> Self {
        uhid.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Chaitra ").expect("should accept padded text");
        assert_eq!(text.as_str(), "Chaitra");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new("   "), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
    }

    #[test]
    fn blank_names_are_rejected_when_deserialising() {
        let name: NonEmptyText = serde_json::from_str("\" Meera Krishnan \"").expect("valid");
        assert_eq!(name.as_str(), "Meera Krishnan");
        assert!(serde_json::from_str::<NonEmptyText>("\"  \"").is_err());
        assert_eq!(serde_json::to_string(&name).expect("serialise"), "\"Meera Krishnan\"");
    }

    #[test]
    fn initials_take_first_letter_of_each_word() {
        let text = NonEmptyText::new("priya  sharma").expect("valid");
        assert_eq!(text.initials(), "PS");

        let single = NonEmptyText::new("Chaitra").expect("valid");
        assert_eq!(single.initials(), "C");
    }

    #[test]
    fn uhid_accepts_clinic_identifiers() {
        let uhid = Uhid::parse(" WMN-2025-001 ").expect("valid uhid");
        assert_eq!(uhid.as_str(), "WMN-2025-001");
        assert_eq!(uhid.to_string(), "WMN-2025-001");
    }

    #[test]
    fn uhid_rejects_bad_characters_and_length() {
        let err = Uhid::parse("WMN 2025/001").expect_err("should reject");
        assert!(matches!(err, TextError::InvalidUhid(s) if s == "WMN 2025/001"));

        let long = "A".repeat(MAX_UHID_LEN + 1);
        assert!(Uhid::parse(&long).is_err());
        assert_eq!(Uhid::parse(""), Err(TextError::Empty));
    }

    #[test]
    fn uhid_deserialises_with_validation() {
        let ok: Uhid = serde_json::from_str("\"WMN-2024-098\"").expect("valid");
        assert_eq!(ok.as_str(), "WMN-2024-098");

        let bad = serde_json::from_str::<Uhid>("\"not valid!\"");
        assert!(bad.is_err());
    }
}
