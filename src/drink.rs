//! Drink record and ingredient derivation.

use serde::{Deserialize, Serialize};

use crate::types::DrinkId;

/// Maximum number of ingredient slots a drink record can carry.
pub const MAX_INGREDIENT_SLOTS: usize = 15;

/// One raw `(ingredient, measure)` slot as delivered by the catalog.
///
/// Slots are opaque to the session core; only [`Drink::ingredient_details`]
/// interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngredientSlot {
    /// Ingredient name, possibly padded with whitespace.
    pub ingredient: Option<String>,
    /// Measure text for the ingredient.
    pub measure: Option<String>,
}

/// Cleaned ingredient entry for detail rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientDetail {
    /// Trimmed ingredient name, never empty.
    pub ingredient: String,
    /// Trimmed measure, empty when the catalog carries none.
    pub measure: String,
}

/// A drink as held in session state and persisted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    /// Unique catalog identifier.
    pub id: DrinkId,
    /// Display name.
    pub name: String,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Alcoholic classification label.
    #[serde(default)]
    pub alcoholic: Option<String>,
    /// Recommended glass type.
    #[serde(default)]
    pub glass: Option<String>,
    /// Preparation instructions.
    #[serde(default)]
    pub instructions: Option<String>,
    /// Raw ingredient slots, at most [`MAX_INGREDIENT_SLOTS`].
    #[serde(default)]
    pub ingredients: Vec<IngredientSlot>,
}

impl Drink {
    /// Builds a drink with only id and name set; all display fields empty.
    pub fn new(id: impl Into<DrinkId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail: None,
            category: None,
            alcoholic: None,
            glass: None,
            instructions: None,
            ingredients: Vec::new(),
        }
    }

    /// Derives the cleaned ingredient list for the detail view.
    ///
    /// Slots with a blank or missing ingredient are skipped; measures are
    /// trimmed and default to an empty string.
    pub fn ingredient_details(&self) -> Vec<IngredientDetail> {
        self.ingredients
            .iter()
            .filter_map(|slot| {
                let ingredient = slot.ingredient.as_deref()?.trim();
                if ingredient.is_empty() {
                    return None;
                }
                let measure = slot
                    .measure
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string();
                Some(IngredientDetail {
                    ingredient: ingredient.to_string(),
                    measure,
                })
            })
            .collect()
    }
}
