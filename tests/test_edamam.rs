use mockito::{Matcher, Server};
use recipe_finder::{
    FinderConfig, IngredientList, ProviderKind, RecipeFinder, RecipeId, SearchOutcome, SearchQuery,
};
use serde_json::json;

const API_PATH: &str = "/api/recipes/v2";

fn finder_for(server: &Server) -> RecipeFinder {
    RecipeFinder::builder()
        .config(FinderConfig::default())
        .provider(ProviderKind::Edamam)
        .edamam_credentials("test-app", "test-key")
        .base_url(format!("{}{}", server.url(), API_PATH))
        .build()
        .unwrap()
}

fn hit(id: &str, label: &str, lines: &[&str]) -> serde_json::Value {
    json!({
        "recipe": {
            "uri": format!("http://www.edamam.com/ontologies/edamam.owl#recipe_{}", id),
            "label": label,
            "image": format!("https://edamam-product-images.s3.amazonaws.com/{}.jpg", id),
            "url": format!("https://example.com/recipes/{}", id),
            "yield": 4.0,
            "totalTime": 0.0,
            "calories": 1000.0,
            "dietLabels": [],
            "dishType": ["main course"],
            "ingredientLines": lines
        },
        "_links": {"self": {"href": format!("https://api.edamam.com/api/recipes/v2/{}", id)}}
    })
}

#[tokio::test]
async fn test_edamam_name_search() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("type".into(), "public".into()),
            Matcher::UrlEncoded("q".into(), "chicken vesuvio".into()),
            Matcher::UrlEncoded("app_id".into(), "test-app".into()),
            Matcher::UrlEncoded("app_key".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "from": 1,
                "to": 1,
                "count": 1,
                "hits": [hit("b79327d0", "Chicken Vesuvio", &["1 chicken", "5 cloves garlic"])]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut finder = finder_for(&server);
    let outcome = finder
        .search(SearchQuery::name("chicken vesuvio").unwrap())
        .await
        .unwrap();
    mock.assert_async().await;

    let recipes = outcome.recipes();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].id, RecipeId::Text("b79327d0".to_string()));
    assert_eq!(recipes[0].title, "Chicken Vesuvio");
    assert_eq!(recipes[0].servings, Some(4));
    assert_eq!(recipes[0].calories, Some(250));
    assert_eq!(recipes[0].ready_in_minutes, None);
    assert_eq!(recipes[0].ingredients, vec!["1 chicken", "5 cloves garlic"]);
}

#[tokio::test]
async fn test_edamam_ingredient_search_matches_locally() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::UrlEncoded("q".into(), "chicken garlic".into()))
        .with_status(200)
        .with_body(
            json!({"hits": [
                hit("garlicbread", "Garlic Bread", &[
                    "1 loaf bread", "3 cloves garlic", "4 tbsp butter", "parsley", "parmesan"
                ]),
                hit("vesuvio", "Chicken Vesuvio", &[
                    "1/2 cup olive oil", "5 cloves garlic, peeled", "1 chicken", "Salt and pepper"
                ]),
                hit("fruit", "Fruit Salad", &["1 apple", "1 banana", "grapes", "1 kiwi"]),
                hit("soup", "Chicken Soup", &["1 whole chicken", "2 carrots", "8 cups water"])
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let mut finder = finder_for(&server);
    let ingredients: IngredientList = ["Chicken", "garlic"].into_iter().collect();
    let outcome = finder
        .search(SearchQuery::ingredients(ingredients).unwrap())
        .await
        .unwrap();
    mock.assert_async().await;

    let recipes = outcome.recipes();
    let titles: Vec<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Chicken Vesuvio", "Chicken Soup", "Garlic Bread"]);

    let scores: Vec<i64> = recipes.iter().map(|r| r.match_score.unwrap()).collect();
    assert_eq!(scores, vec![4, 1, -2]);

    // pantry staples are neither used nor missed
    let vesuvio = &recipes[0];
    assert_eq!(vesuvio.used_ingredient_count, Some(2));
    assert_eq!(vesuvio.missed_ingredient_count, Some(0));
    assert_eq!(vesuvio.ingredients.len(), 4);
}

#[tokio::test]
async fn test_edamam_details() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/recipes/v2/b79327d0")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("type".into(), "public".into()),
            Matcher::UrlEncoded("app_id".into(), "test-app".into()),
        ]))
        .with_status(200)
        .with_body(hit("b79327d0", "Chicken Vesuvio", &["1 chicken"]).to_string())
        .create_async()
        .await;

    let finder = finder_for(&server);
    let recipe = finder
        .details(&RecipeId::Text("b79327d0".to_string()))
        .await
        .unwrap();
    mock.assert_async().await;

    assert_eq!(recipe.title, "Chicken Vesuvio");
    assert_eq!(
        recipe.source_url.as_deref(),
        Some("https://example.com/recipes/b79327d0")
    );
}

#[tokio::test]
async fn test_edamam_empty_hits_is_no_results() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"from": 0, "to": 0, "count": 0, "hits": []}"#)
        .create_async()
        .await;

    let mut finder = finder_for(&server);
    let outcome = finder
        .search(SearchQuery::name("unobtainium").unwrap())
        .await
        .unwrap();
    assert_eq!(outcome, SearchOutcome::NoResults);
}
