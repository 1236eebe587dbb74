//! Vocabulary catalogue entries.
//!
//! Items are immutable once loaded. The identifier is opaque and stable across
//! corpus re-imports, which is what lets progress rows survive a reload.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised while constructing vocabulary values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VocabValidationError {
    /// Identifier was empty.
    #[error("vocabulary id must not be empty")]
    EmptyId,
    /// Identifier carried leading or trailing whitespace.
    #[error("vocabulary id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Stable identifier of a [`VocabItem`].
///
/// # Examples
/// ```
/// use backend::domain::VocabId;
///
/// let id = VocabId::new("w-0042").expect("valid id");
/// assert_eq!(id.as_ref(), "w-0042");
/// assert!(VocabId::new(" w-0042").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VocabId(String);

impl VocabId {
    /// Validate and wrap an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, VocabValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(VocabValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(VocabValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for VocabId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for VocabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<VocabId> for String {
    fn from(value: VocabId) -> Self {
        value.0
    }
}

impl TryFrom<String> for VocabId {
    type Error = VocabValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One learnable pairing of an English term and its target-language forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VocabItem {
    /// Stable catalogue identifier.
    #[schema(value_type = String, example = "w-0042")]
    pub id: VocabId,
    /// Source-language (English) form.
    #[schema(example = "water")]
    pub english: String,
    /// Target-language form in Latin script.
    #[schema(example = "pani")]
    pub target_romanized: String,
    /// Target-language form in its native script.
    #[schema(example = "पानी")]
    pub target_native_script: String,
}

impl VocabItem {
    /// Build an item from already validated parts.
    pub fn new(
        id: VocabId,
        english: impl Into<String>,
        target_romanized: impl Into<String>,
        target_native_script: impl Into<String>,
    ) -> Self {
        Self {
            id,
            english: english.into(),
            target_romanized: target_romanized.into(),
            target_native_script: target_native_script.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", VocabValidationError::EmptyId)]
    #[case("  ", VocabValidationError::EmptyId)]
    #[case("w-1 ", VocabValidationError::SurroundingWhitespace)]
    fn rejects_invalid_ids(#[case] raw: &str, #[case] expected: VocabValidationError) {
        assert_eq!(VocabId::new(raw), Err(expected));
    }

    #[rstest]
    fn item_serialises_camel_case() {
        let item = VocabItem::new(
            VocabId::new("w-1").expect("valid id"),
            "water",
            "pani",
            "पानी",
        );
        let value = serde_json::to_value(&item).expect("serialise item");
        assert_eq!(value["id"], "w-1");
        assert_eq!(value["targetRomanized"], "pani");
        assert_eq!(value["targetNativeScript"], "पानी");
    }
}
