use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use std::process::ExitCode;

use recipe_finder::{
    IngredientList, Instructions, ProviderKind, Recipe, RecipeFinder, RecipeId, SearchError,
    SearchOutcome, SearchQuery,
};

#[derive(Parser)]
#[command(name = "recipe-finder")]
#[command(about = "Find recipes by name or by the ingredients you have")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Recipe API to query (defaults to the configured provider)
    #[arg(long, global = true, value_enum, env = "RECIPE_FINDER_PROVIDER")]
    provider: Option<ProviderArg>,

    /// Maximum number of recipes to return
    #[arg(long, global = true)]
    max_results: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Search recipes by name
    Name {
        /// Words of the recipe name
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Search recipes that use the given ingredients
    Ingredients {
        /// Ingredients, one per argument or comma separated
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Show the full record of one recipe
    Details {
        /// Recipe id as shown in search results
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Spoonacular,
    Edamam,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Spoonacular => ProviderKind::Spoonacular,
            ProviderArg::Edamam => ProviderKind::Edamam,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), SearchError> {
    let mut builder = RecipeFinder::builder();
    if let Some(provider) = cli.provider {
        builder = builder.provider(provider.into());
    }
    if let Some(max_results) = cli.max_results {
        builder = builder.max_results(max_results);
    }
    let mut finder = builder.build()?;
    debug!("Using provider {}", finder.provider_name());

    match cli.command {
        Command::Name { query } => {
            let outcome = finder.search(SearchQuery::name(&query.join(" "))?).await?;
            print_outcome(&outcome, cli.json)
        }
        Command::Ingredients { ingredients } => {
            let list: IngredientList = ingredients
                .iter()
                .flat_map(|arg| arg.split(','))
                .collect();
            let outcome = finder.search(SearchQuery::ingredients(list)?).await?;
            print_outcome(&outcome, cli.json)
        }
        Command::Details { id } => {
            let id: RecipeId = id.parse().unwrap_or_else(|never| match never {});
            let recipe = finder.details(&id).await?;
            if cli.json {
                print_json(&recipe)
            } else {
                print_details(&recipe);
                Ok(())
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), SearchError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| SearchError::provider_with_source("Failed to render results", e))?;
    println!("{}", json);
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome, json: bool) -> Result<(), SearchError> {
    if json {
        return print_json(&outcome.recipes());
    }
    if outcome.is_empty() {
        println!("No recipes found.");
        return Ok(());
    }
    for recipe in outcome.recipes() {
        println!("{:>10}  {}", recipe.id.to_string(), recipe.title);
        let meta = summary_line(recipe);
        if !meta.is_empty() {
            println!("{:>10}  {}", "", meta);
        }
    }
    Ok(())
}

fn summary_line(recipe: &Recipe) -> String {
    let mut parts = Vec::new();
    if let Some(minutes) = recipe.ready_in_minutes {
        parts.push(format!("{} min", minutes));
    }
    if let Some(servings) = recipe.servings {
        parts.push(format!("{} servings", servings));
    }
    if let Some(calories) = recipe.calories {
        parts.push(format!("{} cal", calories));
    }
    if let (Some(used), Some(missed)) = (recipe.used_ingredient_count, recipe.missed_ingredient_count)
    {
        parts.push(format!("uses {}, missing {}", used, missed));
    }
    parts.join(" · ")
}

fn print_details(recipe: &Recipe) {
    println!("{}", recipe.title);
    let meta = summary_line(recipe);
    if !meta.is_empty() {
        println!("{}", meta);
    }
    if !recipe.diets.is_empty() {
        println!("Diets: {}", recipe.diets.join(", "));
    }
    if let Some(summary) = &recipe.summary {
        println!("\n{}", summary);
    }

    println!("\nIngredients:");
    for ingredient in &recipe.ingredients {
        println!("  - {}", ingredient);
    }

    println!("\nInstructions:");
    match &recipe.instructions {
        Some(Instructions::Steps(steps)) => {
            for (i, step) in steps.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
        }
        Some(Instructions::Text(text)) => println!("  {}", text),
        None => println!("  No instructions available. Check the source website."),
    }

    if let Some(url) = &recipe.source_url {
        println!("\nSource: {}", url);
    }
}
