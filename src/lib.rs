//! Recipe search across Spoonacular and Edamam.
//!
//! A query (recipe name or ingredient list) goes to the configured provider,
//! and the raw response comes back as provider-agnostic [`Recipe`] records.
//! Ingredient searches are additionally filtered and ranked by how well each
//! recipe uses what the caller has.
//!
//! # Example
//! ```no_run
//! # use recipe_finder::{RecipeFinder, SearchQuery};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut finder = RecipeFinder::builder().api_key("spoonacular-key").build()?;
//! let outcome = finder.search(SearchQuery::name("carbonara")?).await?;
//! for recipe in outcome.recipes() {
//!     println!("{}: {}", recipe.id, recipe.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod finder;
pub mod model;
pub mod normalize;
pub mod providers;
pub mod query;
pub mod ranking;

pub use builder::RecipeFinderBuilder;
pub use config::{FinderConfig, MatchingConfig, ProviderKind};
pub use error::SearchError;
pub use finder::{RecipeFinder, SearchOutcome};
pub use model::{Candidate, Instructions, Recipe, RecipeId};
pub use providers::{ProviderFactory, RecipeProvider};
pub use query::{IngredientList, ProviderRequest, SearchMode, SearchQuery};

/// Search by recipe name with configuration from file and environment
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = recipe_finder::search_by_name("pancakes").await?;
/// # Ok(())
/// # }
/// ```
pub async fn search_by_name(query: &str) -> Result<Vec<Recipe>, SearchError> {
    let query = SearchQuery::name(query)?;
    let mut finder = RecipeFinder::builder().build()?;
    Ok(finder.search(query).await?.into_recipes())
}

/// Search by ingredients with configuration from file and environment
///
/// Ingredients are trimmed, lower-cased and deduplicated before the search.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = recipe_finder::search_by_ingredients(["egg", "flour"]).await?;
/// # Ok(())
/// # }
/// ```
pub async fn search_by_ingredients<I, S>(ingredients: I) -> Result<Vec<Recipe>, SearchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let query = SearchQuery::ingredients(ingredients.into_iter().collect())?;
    let mut finder = RecipeFinder::builder().build()?;
    Ok(finder.search(query).await?.into_recipes())
}

/// Fetch one recipe's full record with configuration from file and environment
pub async fn fetch_recipe_details(id: &RecipeId) -> Result<Recipe, SearchError> {
    let finder = RecipeFinder::builder().build()?;
    finder.details(id).await
}
