use serde_json::json;

use barkeep::provider::{ProviderError, http::envelope_from_value};

#[test]
fn null_drinks_decodes_as_not_found() {
    let env = envelope_from_value(&json!({ "drinks": null })).expect("decode");
    assert_eq!(env.drinks, None);
    assert!(env.into_results().is_empty());
}

#[test]
fn drink_decoding_collects_ingredient_slots() {
    let body = json!({
        "drinks": [{
            "idDrink": "11007",
            "strDrink": "Margarita",
            "strCategory": "Ordinary Drink",
            "strGlass": "Cocktail glass",
            "strIngredient1": "Tequila",
            "strMeasure1": "1 1/2 oz",
            "strIngredient2": "Salt",
            "strIngredient3": null,
            "strMeasure3": null
        }]
    });

    let env = envelope_from_value(&body).expect("decode");
    let drinks = env.into_results();
    assert_eq!(drinks.len(), 1);
    assert_eq!(drinks[0].id, "11007");
    assert_eq!(drinks[0].category.as_deref(), Some("Ordinary Drink"));
    assert_eq!(drinks[0].ingredients.len(), 2);
    assert_eq!(drinks[0].ingredients[1].ingredient.as_deref(), Some("Salt"));
    assert_eq!(drinks[0].ingredients[1].measure, None);
}

#[test]
fn bare_string_payload_decodes_as_not_found() {
    let env = envelope_from_value(&json!({ "drinks": "no data" })).expect("decode");
    assert_eq!(env.drinks, None);
}

#[test]
fn missing_drinks_field_is_a_decode_error() {
    let err = match envelope_from_value(&json!({})) {
        Err(err) => err,
        Ok(_) => panic!("payload without a drinks field must not decode"),
    };
    assert!(matches!(err, ProviderError::Decode(_)));
}
