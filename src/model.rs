use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider-scoped recipe identifier.
///
/// Spoonacular numbers its recipes, Edamam uses opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::Number(n) => write!(f, "{}", n),
            RecipeId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for RecipeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<u64>() {
            Ok(n) => RecipeId::Number(n),
            Err(_) => RecipeId::Text(s.to_string()),
        })
    }
}

impl From<u64> for RecipeId {
    fn from(n: u64) -> Self {
        RecipeId::Number(n)
    }
}

impl From<&str> for RecipeId {
    fn from(s: &str) -> Self {
        RecipeId::Text(s.to_string())
    }
}

/// Cooking instructions, either as cleaned-up text or as numbered steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instructions {
    Steps(Vec<String>),
    Text(String),
}

/// A provider-agnostic recipe record.
///
/// Optional fields serialize as `null` and lists as `[]`, so consumers never
/// have to check whether a key exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub calories: Option<i64>,
    pub ingredients: Vec<String>,
    pub instructions: Option<Instructions>,
    pub summary: Option<String>,
    pub source_url: Option<String>,
    pub diets: Vec<String>,
    pub dish_types: Vec<String>,
    pub used_ingredient_count: Option<u32>,
    pub missed_ingredient_count: Option<u32>,
    pub used_ingredients: Option<Vec<String>>,
    pub missed_ingredients: Option<Vec<String>>,
    pub match_score: Option<i64>,
}

impl Recipe {
    /// A record with only the required fields filled in
    pub fn new(id: RecipeId, title: impl Into<String>) -> Self {
        Recipe {
            id,
            title: title.into(),
            image: None,
            ready_in_minutes: None,
            servings: None,
            calories: None,
            ingredients: Vec::new(),
            instructions: None,
            summary: None,
            source_url: None,
            diets: Vec::new(),
            dish_types: Vec::new(),
            used_ingredient_count: None,
            missed_ingredient_count: None,
            used_ingredients: None,
            missed_ingredients: None,
            match_score: None,
        }
    }

    /// Whether this record came out of an ingredient search
    pub fn has_match_info(&self) -> bool {
        self.used_ingredient_count.is_some()
    }
}

/// Lightweight result of an ingredient match, before detail enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: RecipeId,
    pub title: Option<String>,
    pub image: Option<String>,
    pub used_ingredient_count: u32,
    pub missed_ingredient_count: u32,
    pub used_ingredients: Vec<String>,
    pub missed_ingredients: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_id_parses_numbers_and_text() {
        assert_eq!("716429".parse::<RecipeId>().unwrap(), RecipeId::Number(716429));
        assert_eq!(
            "b79327d05b8e5b838ad6cfd9576b30b6".parse::<RecipeId>().unwrap(),
            RecipeId::Text("b79327d05b8e5b838ad6cfd9576b30b6".to_string())
        );
        assert_eq!(RecipeId::Number(42).to_string(), "42");
    }

    #[test]
    fn test_optional_fields_serialize_as_null() {
        let recipe = Recipe::new(RecipeId::Number(1), "Pancakes");
        let value = serde_json::to_value(&recipe).unwrap();

        assert_eq!(value["id"], json!(1));
        assert_eq!(value["title"], json!("Pancakes"));
        assert!(value.get("calories").unwrap().is_null());
        assert!(value.get("readyInMinutes").unwrap().is_null());
        assert!(value.get("matchScore").unwrap().is_null());
        assert_eq!(value["ingredients"], json!([]));
        assert_eq!(value["dishTypes"], json!([]));
    }

    #[test]
    fn test_instructions_serialize_untagged() {
        let steps = Instructions::Steps(vec!["Whisk".to_string(), "Fry".to_string()]);
        assert_eq!(serde_json::to_value(&steps).unwrap(), json!(["Whisk", "Fry"]));

        let text = Instructions::Text("Whisk and fry.".to_string());
        assert_eq!(serde_json::to_value(&text).unwrap(), json!("Whisk and fry."));
    }
}
