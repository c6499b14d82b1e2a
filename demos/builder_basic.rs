//! Basic usage of the RecipeFinder builder API
//!
//! This example demonstrates the three main use cases:
//! 1. Search by recipe name
//! 2. Search by the ingredients you have, best match first
//! 3. Fetch the full record of one result
//!
//! Set SPOONACULAR_API_KEY before running.

use recipe_finder::{IngredientList, Instructions, RecipeFinder, SearchOutcome, SearchQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut finder = RecipeFinder::builder().max_results(5).build()?;

    // Use Case 1: name search
    println!("=== Use Case 1: Search by name ===");
    match finder.search(SearchQuery::name("shakshuka")?).await? {
        SearchOutcome::Results(recipes) => {
            for recipe in &recipes {
                println!("{:>8}  {}", recipe.id.to_string(), recipe.title);
            }
        }
        SearchOutcome::NoResults => println!("No recipes found."),
    }

    // Use Case 2: ingredient search
    println!("\n=== Use Case 2: Search by ingredients ===");
    let mut ingredients = IngredientList::new();
    for item in ["eggs", "tomatoes", "onion"] {
        ingredients.add(item);
    }
    let outcome = finder.search(SearchQuery::ingredients(ingredients)?).await?;
    for recipe in outcome.recipes() {
        println!(
            "{:>4}  {} (uses {}, missing {})",
            recipe.match_score.unwrap_or_default(),
            recipe.title,
            recipe.used_ingredient_count.unwrap_or_default(),
            recipe.missed_ingredient_count.unwrap_or_default()
        );
    }

    // Use Case 3: details for the best match
    println!("\n=== Use Case 3: Recipe details ===");
    let Some(best) = finder.results().first().map(|r| r.id.clone()) else {
        println!("Nothing to show.");
        return Ok(());
    };
    let recipe = finder.details(&best).await?;
    println!("{}", recipe.title);
    for ingredient in &recipe.ingredients {
        println!("  - {}", ingredient);
    }
    match recipe.instructions {
        Some(Instructions::Steps(steps)) => {
            for (i, step) in steps.iter().enumerate() {
                println!("{}. {}", i + 1, step);
            }
        }
        Some(Instructions::Text(text)) => println!("{}", text),
        None => println!("No instructions available."),
    }

    Ok(())
}
