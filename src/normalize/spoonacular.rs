use log::debug;
use serde_json::Value;

use super::{count_field, plain_strings, round_to_i64, str_field, string_list, text_field};
use crate::model::{Candidate, Instructions, Recipe, RecipeId};

/// Normalize a `complexSearch` response (`{"results": [...]}`)
pub fn normalize_search(payload: &Value) -> Vec<Recipe> {
    match payload.get("results").and_then(Value::as_array) {
        Some(results) => normalize_list(results),
        None => {
            debug!("Spoonacular search payload has no results array");
            Vec::new()
        }
    }
}

/// Normalize an `informationBulk` response (a top-level array)
pub fn normalize_bulk(payload: &Value) -> Vec<Recipe> {
    match payload.as_array() {
        Some(items) => normalize_list(items),
        None => {
            debug!("Spoonacular bulk payload is not an array");
            Vec::new()
        }
    }
}

/// Normalize a `findByIngredients` response into match candidates
pub fn normalize_candidates(payload: &Value) -> Vec<Candidate> {
    let Some(items) = payload.as_array() else {
        debug!("Spoonacular ingredient payload is not an array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|raw| {
            let id = recipe_id(raw)?;
            let used_ingredients = string_list(raw, "usedIngredients", "original");
            let missed_ingredients = string_list(raw, "missedIngredients", "original");
            Some(Candidate {
                id,
                title: str_field(raw, "title"),
                image: str_field(raw, "image"),
                used_ingredient_count: int_field(raw, "usedIngredientCount")
                    .unwrap_or(used_ingredients.len() as u32),
                missed_ingredient_count: int_field(raw, "missedIngredientCount")
                    .unwrap_or(missed_ingredients.len() as u32),
                used_ingredients,
                missed_ingredients,
            })
        })
        .collect()
}

fn normalize_list(items: &[Value]) -> Vec<Recipe> {
    items.iter().filter_map(normalize_recipe).collect()
}

/// Normalize one recipe object, as returned by search, bulk or single lookup.
///
/// Returns `None` when the entry has no usable id or title.
pub fn normalize_recipe(raw: &Value) -> Option<Recipe> {
    let id = recipe_id(raw)?;
    let title = str_field(raw, "title")?;

    let mut recipe = Recipe::new(id, title);
    recipe.image = str_field(raw, "image");
    recipe.ready_in_minutes = count_field(raw, "readyInMinutes");
    recipe.servings = count_field(raw, "servings");
    recipe.calories = calories(raw);
    recipe.ingredients = string_list(raw, "extendedIngredients", "original");
    recipe.instructions = instructions(raw);
    recipe.summary = text_field(raw, "summary");
    recipe.source_url = str_field(raw, "sourceUrl");
    recipe.diets = plain_strings(raw, "diets");
    recipe.dish_types = plain_strings(raw, "dishTypes");
    Some(recipe)
}

fn recipe_id(raw: &Value) -> Option<RecipeId> {
    let id = raw.get("id")?;
    if let Some(n) = id.as_u64() {
        return Some(RecipeId::Number(n));
    }
    id.as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

fn int_field(raw: &Value, key: &str) -> Option<u32> {
    raw.get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// Calories from the nutrient breakdown, rounded to the nearest integer
pub fn calories(raw: &Value) -> Option<i64> {
    raw.get("nutrition")?
        .get("nutrients")?
        .as_array()?
        .iter()
        .find(|n| {
            n.get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| name.eq_ignore_ascii_case("Calories"))
        })
        .and_then(|n| n.get("amount"))
        .and_then(Value::as_f64)
        .and_then(round_to_i64)
}

/// Structured steps win over the free-text field
fn instructions(raw: &Value) -> Option<Instructions> {
    let steps: Vec<String> = raw
        .get("analyzedInstructions")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .flat_map(|section| string_list(section, "steps", "step"))
        .collect();

    if !steps.is_empty() {
        return Some(Instructions::Steps(steps));
    }
    text_field(raw, "instructions").map(Instructions::Text)
}
