//! Search provider seam: trait, response envelope, and errors.

/// HTTP implementation against TheCocktailDB.
pub mod http;

use async_trait::async_trait;

use crate::drink::Drink;

/// Provider failure surfaced to the dispatcher.
#[derive(Debug)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, non-success status).
    Transport(String),
    /// Response body could not be decoded.
    Decode(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

/// Convenience alias for provider results.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Response envelope: the upstream API returns `null` instead of an empty
/// list when nothing matches. `None` is a not-found sentinel, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrinkEnvelope {
    /// Matched drinks, or `None` for "no data found".
    pub drinks: Option<Vec<Drink>>,
}

impl DrinkEnvelope {
    /// Unwraps the nullable list into an owned vector.
    pub fn into_results(self) -> Vec<Drink> {
        self.drinks.unwrap_or_default()
    }
}

/// External search collaborator consumed by the dispatcher.
///
/// Timeout behavior is the implementation's concern; the dispatcher only
/// distinguishes settle-with-envelope from settle-with-error.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Searches drinks by name.
    async fn by_name(&self, term: &str) -> ProviderResult<DrinkEnvelope>;
    /// Searches drinks containing an ingredient.
    async fn by_ingredient(&self, term: &str) -> ProviderResult<DrinkEnvelope>;
    /// Looks up a single drink by id.
    async fn by_id(&self, id: &str) -> ProviderResult<DrinkEnvelope>;
}
