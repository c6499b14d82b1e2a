//! Simple API usage with convenience functions
//!
//! This example shows how to use the high-level convenience functions
//! for the most common use cases. Configuration comes from config.toml
//! and RECIPE_FINDER__* environment variables.

use recipe_finder::{fetch_recipe_details, search_by_ingredients, search_by_name};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Name search
    println!("=== Search by name ===");
    let recipes = search_by_name("banana bread").await?;
    for recipe in &recipes {
        println!("{}: {}", recipe.id, recipe.title);
    }

    // Ingredient search: Recipe list ranked by match score
    println!("\n=== Search by ingredients ===");
    let ranked = search_by_ingredients(["chicken", "rice", "lemon"]).await?;
    for recipe in &ranked {
        println!(
            "[{}] {}",
            recipe.match_score.unwrap_or_default(),
            recipe.title
        );
    }

    // Details
    if let Some(first) = ranked.first() {
        println!("\n=== Details ===");
        let recipe = fetch_recipe_details(&first.id).await?;
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    }

    Ok(())
}
