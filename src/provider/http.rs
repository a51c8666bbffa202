//! reqwest-backed [`SearchProvider`] for TheCocktailDB JSON API.

use async_trait::async_trait;
use serde_json::Value;

use crate::drink::{Drink, IngredientSlot, MAX_INGREDIENT_SLOTS};

use super::{DrinkEnvelope, ProviderError, ProviderResult, SearchProvider};

const DEFAULT_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";

/// HTTP search provider.
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProvider {
    /// Builds a provider against the public TheCocktailDB endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Builds a provider against a custom base URL (test servers, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, endpoint: &str, param: &str, value: &str) -> ProviderResult<DrinkEnvelope> {
        let url = format!("{}/{endpoint}", self.base_url);
        let body: Value = self
            .client
            .get(url)
            .query(&[(param, value)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        envelope_from_value(&body)
    }
}

impl Default for HttpProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for HttpProvider {
    async fn by_name(&self, term: &str) -> ProviderResult<DrinkEnvelope> {
        self.fetch("search.php", "s", term).await
    }

    async fn by_ingredient(&self, term: &str) -> ProviderResult<DrinkEnvelope> {
        self.fetch("filter.php", "i", term).await
    }

    async fn by_id(&self, id: &str) -> ProviderResult<DrinkEnvelope> {
        self.fetch("lookup.php", "i", id).await
    }
}

/// Decodes the API envelope, mapping `drinks: null` to the not-found sentinel.
pub fn envelope_from_value(body: &Value) -> ProviderResult<DrinkEnvelope> {
    let drinks = body
        .get("drinks")
        .ok_or_else(|| ProviderError::Decode("missing drinks field".to_string()))?;

    match drinks {
        Value::Null => Ok(DrinkEnvelope { drinks: None }),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(drink_from_value(item)?);
            }
            Ok(DrinkEnvelope { drinks: Some(out) })
        }
        // Some endpoints answer with a bare string on bad input.
        Value::String(_) => Ok(DrinkEnvelope { drinks: None }),
        other => Err(ProviderError::Decode(format!(
            "unexpected drinks payload: {other}"
        ))),
    }
}

/// Decodes one drink object, collecting the numbered ingredient columns
/// into slots.
pub fn drink_from_value(item: &Value) -> ProviderResult<Drink> {
    let id = str_field(item, "idDrink")
        .ok_or_else(|| ProviderError::Decode("drink without idDrink".to_string()))?;
    let name = str_field(item, "strDrink").unwrap_or_default();

    let mut drink = Drink::new(id, name);
    drink.thumbnail = str_field(item, "strDrinkThumb");
    drink.category = str_field(item, "strCategory");
    drink.alcoholic = str_field(item, "strAlcoholic");
    drink.glass = str_field(item, "strGlass");
    drink.instructions = str_field(item, "strInstructions");

    for i in 1..=MAX_INGREDIENT_SLOTS {
        let ingredient = str_field(item, &format!("strIngredient{i}"));
        let measure = str_field(item, &format!("strMeasure{i}"));
        if ingredient.is_some() || measure.is_some() {
            drink.ingredients.push(IngredientSlot { ingredient, measure });
        }
    }

    Ok(drink)
}

fn str_field(item: &Value, key: &str) -> Option<String> {
    item.get(key)?.as_str().map(str::to_string)
}
