use mockito::{Matcher, Server};
use recipe_finder::{FinderConfig, IngredientList, RecipeFinder, RecipeId, SearchOutcome, SearchQuery};
use serde_json::json;

fn finder_for(server: &Server) -> RecipeFinder {
    RecipeFinder::builder()
        .config(FinderConfig::default())
        .api_key("test-key")
        .base_url(server.url())
        .build()
        .unwrap()
}

fn candidate(id: u64, used: u32, missed: u32) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Recipe {}", id),
        "image": format!("https://img.spoonacular.com/recipes/{}-312x231.jpg", id),
        "usedIngredientCount": used,
        "missedIngredientCount": missed,
        "usedIngredients": (0..used).map(|i| json!({"original": format!("used {}", i)})).collect::<Vec<_>>(),
        "missedIngredients": (0..missed).map(|i| json!({"original": format!("missed {}", i)})).collect::<Vec<_>>(),
        "likes": 3
    })
}

fn detail(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Detailed recipe {}", id),
        "readyInMinutes": 20,
        "servings": 4,
        "extendedIngredients": [{"original": "2 eggs"}, {"original": "1 cup flour"}],
        "nutrition": {"nutrients": [{"name": "Calories", "amount": 310.2}]}
    })
}

fn egg_and_flour() -> SearchQuery {
    let ingredients: IngredientList = ["Egg", " flour ", "EGG"].into_iter().collect();
    SearchQuery::ingredients(ingredients).unwrap()
}

#[tokio::test]
async fn test_ingredient_search_filters_enriches_and_ranks() {
    let mut server = Server::new_async().await;

    // 2 requested: 1 passes on ratio, 3 on ratio, 5 on the missed-count rule
    let candidates = json!([
        candidate(1, 1, 5),
        candidate(2, 0, 4),
        candidate(3, 2, 2),
        candidate(4, 0, 7),
        candidate(5, 0, 2)
    ]);
    let find = server
        .mock("GET", "/findByIngredients")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ingredients".into(), "egg,+flour".into()),
            Matcher::UrlEncoded("number".into(), "24".into()),
            Matcher::UrlEncoded("ranking".into(), "1".into()),
            Matcher::UrlEncoded("ignorePantry".into(), "true".into()),
            Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidates.to_string())
        .create_async()
        .await;

    let bulk = server
        .mock("GET", "/informationBulk")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ids".into(), "1,3,5".into()),
            Matcher::UrlEncoded("includeNutrition".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([detail(1), detail(3), detail(5)]).to_string())
        .create_async()
        .await;

    let mut finder = finder_for(&server);
    let outcome = finder.search(egg_and_flour()).await.unwrap();
    find.assert_async().await;
    bulk.assert_async().await;

    let recipes = outcome.recipes();
    assert_eq!(recipes.len(), 3);

    let ids: Vec<RecipeId> = recipes.iter().map(|r| r.id.clone()).collect();
    assert_eq!(
        ids,
        vec![RecipeId::Number(3), RecipeId::Number(5), RecipeId::Number(1)]
    );
    let scores: Vec<i64> = recipes.iter().map(|r| r.match_score.unwrap()).collect();
    assert_eq!(scores, vec![2, -2, -3]);

    let best = &recipes[0];
    assert_eq!(best.title, "Detailed recipe 3");
    assert_eq!(best.calories, Some(310));
    assert_eq!(best.used_ingredient_count, Some(2));
    assert_eq!(best.missed_ingredient_count, Some(2));
    assert_eq!(
        best.used_ingredients.as_deref(),
        Some(&["used 0".to_string(), "used 1".to_string()][..])
    );
}

#[tokio::test]
async fn test_no_surviving_candidates_skips_detail_lookup() {
    let mut server = Server::new_async().await;
    let _find = server
        .mock("GET", "/findByIngredients")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([candidate(1, 0, 6), candidate(2, 0, 9)]).to_string())
        .create_async()
        .await;
    let bulk = server
        .mock("GET", "/informationBulk")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut finder = finder_for(&server);
    let outcome = finder.search(egg_and_flour()).await.unwrap();

    assert_eq!(outcome, SearchOutcome::NoResults);
    bulk.assert_async().await;
}

#[tokio::test]
async fn test_single_ingredient_relies_on_ratio() {
    let mut server = Server::new_async().await;
    let _find = server
        .mock("GET", "/findByIngredients")
        .match_query(Matcher::UrlEncoded("ingredients".into(), "tomato".into()))
        .with_status(200)
        .with_body(json!([candidate(10, 1, 4), candidate(11, 0, 1)]).to_string())
        .create_async()
        .await;
    let _bulk = server
        .mock("GET", "/informationBulk")
        .match_query(Matcher::UrlEncoded("ids".into(), "10".into()))
        .with_status(200)
        .with_body(json!([detail(10)]).to_string())
        .create_async()
        .await;

    let mut finder = finder_for(&server);
    let query = SearchQuery::ingredients(["tomato"].into_iter().collect()).unwrap();
    let outcome = finder.search(query).await.unwrap();

    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome.recipes()[0].id, RecipeId::Number(10));
    assert_eq!(outcome.recipes()[0].match_score, Some(-2));
}

#[tokio::test]
async fn test_missing_details_keep_candidate_data() {
    let mut server = Server::new_async().await;
    let _find = server
        .mock("GET", "/findByIngredients")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([candidate(1, 2, 0), candidate(2, 1, 1)]).to_string())
        .create_async()
        .await;
    let _bulk = server
        .mock("GET", "/informationBulk")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([detail(2)]).to_string())
        .create_async()
        .await;

    let mut finder = finder_for(&server);
    let outcome = finder.search(egg_and_flour()).await.unwrap();
    let recipes = outcome.recipes();

    assert_eq!(recipes.len(), 2);
    // candidate 1 scores 4 and came back without details
    assert_eq!(recipes[0].id, RecipeId::Number(1));
    assert_eq!(recipes[0].title, "Recipe 1");
    assert_eq!(recipes[0].calories, None);
    assert_eq!(recipes[1].title, "Detailed recipe 2");
}

#[tokio::test]
async fn test_bulk_failure_is_a_provider_error() {
    let mut server = Server::new_async().await;
    let _find = server
        .mock("GET", "/findByIngredients")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([candidate(1, 2, 0)]).to_string())
        .create_async()
        .await;
    let _bulk = server
        .mock("GET", "/informationBulk")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let mut finder = finder_for(&server);
    let err = finder.search(egg_and_flour()).await.unwrap_err();

    assert!(err.is_provider());
    assert_eq!(
        err.to_string(),
        "Recipe service returned 500: Internal Server Error"
    );
    assert!(finder.results().is_empty());
}
