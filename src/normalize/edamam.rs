use log::debug;
use serde_json::Value;

use super::{count_field, plain_strings, round_to_i64, str_field};
use crate::model::{Candidate, Recipe, RecipeId};
use crate::query::IngredientList;

/// Ingredients a kitchen is assumed to have, left out of missing counts
pub const PANTRY_STAPLES: &[&str] = &["water", "salt", "pepper", "sugar", "oil", "ice"];

const RECIPE_URI_MARKER: &str = "#recipe_";

/// Normalize a recipes v2 search response (`{"hits": [{"recipe": {...}}]}`)
pub fn normalize_search(payload: &Value) -> Vec<Recipe> {
    let Some(hits) = payload.get("hits").and_then(Value::as_array) else {
        debug!("Edamam search payload has no hits array");
        return Vec::new();
    };

    hits.iter()
        .filter_map(|hit| hit.get("recipe"))
        .filter_map(normalize_recipe)
        .collect()
}

/// Normalize a single-recipe lookup (`{"recipe": {...}}`)
pub fn normalize_detail(payload: &Value) -> Option<Recipe> {
    normalize_recipe(payload.get("recipe").unwrap_or(payload))
}

pub fn normalize_recipe(raw: &Value) -> Option<Recipe> {
    let id = recipe_id(raw)?;
    let title = str_field(raw, "label")?;

    let mut recipe = Recipe::new(id, title);
    recipe.image = str_field(raw, "image");
    recipe.ready_in_minutes = count_field(raw, "totalTime");
    recipe.servings = count_field(raw, "yield");
    recipe.calories = calories_per_serving(raw, recipe.servings);
    recipe.ingredients = plain_strings(raw, "ingredientLines");
    recipe.source_url = str_field(raw, "url");
    recipe.diets = plain_strings(raw, "dietLabels");
    recipe.dish_types = plain_strings(raw, "dishType");
    Some(recipe)
}

/// Recipe id from the ontology URI, e.g. `...edamam.owl#recipe_b79327d0`
fn recipe_id(raw: &Value) -> Option<RecipeId> {
    let uri = str_field(raw, "uri")?;
    let id = match uri.rfind(RECIPE_URI_MARKER) {
        Some(pos) => &uri[pos + RECIPE_URI_MARKER.len()..],
        None => uri.as_str(),
    };
    (!id.is_empty()).then(|| RecipeId::Text(id.to_string()))
}

/// Edamam reports energy for the whole recipe; split it across servings
fn calories_per_serving(raw: &Value, servings: Option<u32>) -> Option<i64> {
    let total = raw
        .get("totalNutrients")
        .and_then(|n| n.get("ENERC_KCAL"))
        .and_then(|n| n.get("quantity"))
        .and_then(Value::as_f64)
        .or_else(|| raw.get("calories").and_then(Value::as_f64))?;
    let servings = f64::from(servings.unwrap_or(1).max(1));
    round_to_i64(total / servings)
}

/// Classify a recipe's ingredient lines against the requested ingredients.
///
/// A line mentioning any requested ingredient is used; everything else is
/// missed, except pantry staples when `ignore_pantry` is set.
pub fn match_ingredients(
    recipe: &Recipe,
    requested: &IngredientList,
    ignore_pantry: bool,
) -> Candidate {
    let mut used_ingredients = Vec::new();
    let mut missed_ingredients = Vec::new();

    for line in &recipe.ingredients {
        let lowered = line.to_lowercase();
        if requested.iter().any(|ingredient| lowered.contains(ingredient)) {
            used_ingredients.push(line.clone());
        } else if ignore_pantry && is_pantry_staple(&lowered) {
            continue;
        } else {
            missed_ingredients.push(line.clone());
        }
    }

    Candidate {
        id: recipe.id.clone(),
        title: Some(recipe.title.clone()),
        image: recipe.image.clone(),
        used_ingredient_count: used_ingredients.len() as u32,
        missed_ingredient_count: missed_ingredients.len() as u32,
        used_ingredients,
        missed_ingredients,
    }
}

fn is_pantry_staple(line: &str) -> bool {
    line.split(|c: char| !c.is_alphanumeric())
        .any(|word| PANTRY_STAPLES.contains(&word))
}
