//! Ingredient-search filtering, enrichment merge and match scoring.

use log::{debug, warn};

use crate::config::MatchingConfig;
use crate::model::{Candidate, Recipe};

/// Whether a candidate is close enough to what the user has.
///
/// Kept if it uses at least `min_used_ratio` of the requested ingredients,
/// or, when more than one ingredient was requested, if it misses no more
/// than `max_missed`. A single-ingredient search only has the ratio rule.
pub fn passes_filter(candidate: &Candidate, requested: usize, matching: &MatchingConfig) -> bool {
    let used_ratio = if requested == 0 {
        0.0
    } else {
        f64::from(candidate.used_ingredient_count) / requested as f64
    };

    used_ratio >= matching.min_used_ratio
        || (requested > 1 && candidate.missed_ingredient_count <= matching.max_missed)
}

/// Apply [`passes_filter`] and truncate to `cap`, keeping provider order
pub fn filter_candidates(
    candidates: Vec<Candidate>,
    requested: usize,
    matching: &MatchingConfig,
    cap: usize,
) -> Vec<Candidate> {
    let total = candidates.len();
    let kept: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| passes_filter(c, requested, matching))
        .take(cap)
        .collect();
    debug!(
        "{} of {} candidates kept for {} requested ingredient(s)",
        kept.len(),
        total,
        requested
    );
    kept
}

pub fn match_score(used: u32, missed: u32, matching: &MatchingConfig) -> i64 {
    i64::from(used) * matching.used_weight - i64::from(missed) * matching.missed_weight
}

/// Copy the match information of `candidate` onto a detailed record
fn with_match_info(mut recipe: Recipe, candidate: Option<&Candidate>) -> Recipe {
    match candidate {
        Some(c) => {
            recipe.used_ingredient_count = Some(c.used_ingredient_count);
            recipe.missed_ingredient_count = Some(c.missed_ingredient_count);
            recipe.used_ingredients = Some(c.used_ingredients.clone());
            recipe.missed_ingredients = Some(c.missed_ingredients.clone());
        }
        None => {
            recipe.used_ingredient_count = Some(0);
            recipe.missed_ingredient_count = Some(0);
            recipe.used_ingredients = Some(Vec::new());
            recipe.missed_ingredients = Some(Vec::new());
        }
    }
    recipe
}

/// A lightweight record for a candidate the detail lookup did not return
fn candidate_to_recipe(candidate: &Candidate) -> Option<Recipe> {
    let title = candidate.title.clone()?;
    let mut recipe = Recipe::new(candidate.id.clone(), title);
    recipe.image = candidate.image.clone();
    recipe.ingredients = candidate
        .used_ingredients
        .iter()
        .chain(&candidate.missed_ingredients)
        .cloned()
        .collect();
    Some(with_match_info(recipe, Some(candidate)))
}

/// Join detailed records with their candidates by id.
///
/// Output follows the order of `details`; a detail without a candidate
/// gets zero counts and empty lists. Candidates the lookup skipped are
/// appended afterwards, built from the candidate alone.
pub fn merge_details(candidates: &[Candidate], details: Vec<Recipe>) -> Vec<Recipe> {
    let mut merged: Vec<Recipe> = details
        .into_iter()
        .map(|detail| {
            let candidate = candidates.iter().find(|c| c.id == detail.id);
            if candidate.is_none() {
                warn!("Detail record {} has no matching candidate", detail.id);
            }
            with_match_info(detail, candidate)
        })
        .collect();

    for candidate in candidates {
        if merged.iter().any(|r| r.id == candidate.id) {
            continue;
        }
        match candidate_to_recipe(candidate) {
            Some(recipe) => {
                warn!("No details returned for {}, keeping match data only", candidate.id);
                merged.push(recipe);
            }
            None => warn!("Dropping candidate {} with neither details nor title", candidate.id),
        }
    }
    merged
}

/// Score every record and order best match first.
///
/// The sort is stable, so equal scores keep their enrichment order.
pub fn rank(recipes: Vec<Recipe>, matching: &MatchingConfig) -> Vec<Recipe> {
    let mut scored: Vec<Recipe> = recipes
        .into_iter()
        .map(|mut recipe| {
            let used = recipe.used_ingredient_count.unwrap_or(0);
            let missed = recipe.missed_ingredient_count.unwrap_or(0);
            recipe.match_score = Some(match_score(used, missed, matching));
            recipe
        })
        .collect();
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored
}
