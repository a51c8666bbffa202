//! Detail-view loader: single-drink lookup with user-facing error states.

use tracing::error;

use crate::{
    drink::Drink,
    provider::SearchProvider,
};

/// Shown when the detail view is opened without an id.
pub const MISSING_ID_MESSAGE: &str = "No cocktail id was provided.";
/// Shown when the lookup settles with an empty envelope.
pub const NOT_FOUND_MESSAGE: &str = "No cocktail was found for the given id.";
/// Shown when the provider fails.
pub const DETAIL_ERROR_MESSAGE: &str = "Failed to load the cocktail details.";

/// Settled state of one detail lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailState {
    /// The loaded drink, when found.
    pub drink: Option<Drink>,
    /// User-facing error, when the lookup did not produce a drink.
    pub error: Option<String>,
}

/// Loads one drink by id.
///
/// A missing id is a dedicated user-visible error and never reaches the
/// provider. Provider failures are converted to state, never propagated.
pub async fn load_detail(provider: &dyn SearchProvider, id: Option<&str>) -> DetailState {
    let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
        return DetailState {
            drink: None,
            error: Some(MISSING_ID_MESSAGE.to_string()),
        };
    };

    match provider.by_id(id).await {
        Ok(envelope) => {
            let drink = envelope.into_results().into_iter().next();
            let error = drink.is_none().then(|| NOT_FOUND_MESSAGE.to_string());
            DetailState { drink, error }
        }
        Err(err) => {
            error!(%err, id, "detail lookup failed");
            DetailState {
                drink: None,
                error: Some(DETAIL_ERROR_MESSAGE.to_string()),
            }
        }
    }
}
