//! Shared primitive types and the search intent model.

use serde::{Deserialize, Serialize};

/// Stable drink identifier as issued by the upstream catalog.
pub type DrinkId = String;

/// Search mode selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    /// Search by drink name.
    Name,
    /// Search by ingredient name.
    Ingredient,
    /// Direct lookup by drink id.
    Id,
}

/// A user-issued search request: one mode plus the raw entered value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchIntent {
    /// Search mode.
    pub kind: SearchKind,
    /// Raw value as entered, not yet trimmed.
    pub value: String,
}

impl SearchIntent {
    /// Builds a by-name intent.
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            kind: SearchKind::Name,
            value: value.into(),
        }
    }

    /// Builds a by-ingredient intent.
    pub fn ingredient(value: impl Into<String>) -> Self {
        Self {
            kind: SearchKind::Ingredient,
            value: value.into(),
        }
    }

    /// Builds a by-id intent.
    pub fn id(value: impl Into<String>) -> Self {
        Self {
            kind: SearchKind::Id,
            value: value.into(),
        }
    }

    /// Returns true when the trimmed value is empty.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}
