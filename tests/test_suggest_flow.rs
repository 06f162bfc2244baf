use flavor_graph::app::SuggestOutcome;
use flavor_graph::render::{EMPTY_SET_NOTICE, LOADING_PLACEHOLDER};
use flavor_graph::{suggest_recipes, App, HttpRecipeApi, SuggestionsView};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

const CATALOG: &str = r#"{"recipes": [
    {"id": 1, "title": "B", "tags": ["dinner"], "ingredients": ["rice", "beans"], "instructions": ["Cook"]},
    {"id": 2, "title": "A", "tags": [], "ingredients": ["egg"], "instructions": ["Boil"]},
    {"id": 3, "title": "C", "tags": [], "ingredients": ["egg", "milk"], "instructions": ["Whisk"]},
    {"id": 4, "title": "D", "tags": [], "ingredients": ["bread"], "instructions": ["Toast"]}
]}"#;

const GAPS: &str = r#"{"gaps": {
    "1": {"missing": ["rice", "beans"], "covered": [], "substitution_candidates": {"beans": "lentils"}},
    "2": {"missing": [], "covered": ["egg"], "substitution_candidates": {}},
    "3": {"missing": ["milk"], "covered": ["egg"], "substitution_candidates": {"milk": "water"}}
}}"#;

async fn mock_catalog(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/api/recipes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CATALOG)
        .create_async()
        .await
}

async fn mock_gaps(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/api/analyze_gaps")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GAPS)
        .create_async()
        .await
}

fn titles(view: &SuggestionsView) -> Vec<String> {
    match view {
        SuggestionsView::Cards { cards, .. } => cards.iter().map(|c| c.title.clone()).collect(),
        other => panic!("Expected cards, got {:?}", other),
    }
}

#[tokio::test]
async fn test_suggest_ranks_by_missing_then_title() {
    let mut server = Server::new_async().await;
    let catalog = mock_catalog(&mut server).await;
    let gaps = server
        .mock("POST", "/api/analyze_gaps")
        .match_body(Matcher::Json(json!({
            "recipe_ids": [1, 2, 3, 4],
            "available_ingredients": ["egg", "bread"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GAPS)
        .expect(1)
        .create_async()
        .await;

    let api = HttpRecipeApi::with_base_url(server.url()).unwrap();
    let mut app = App::default();
    app.add_ingredients("Egg, BREAD");

    let outcome = app.suggest(&api).await;
    assert!(matches!(outcome, SuggestOutcome::Painted(_)));
    assert_eq!(titles(&app.view()), vec!["A", "D", "C", "B"]);

    // D had no gap entry and defaults to nothing missing
    let ranked = app.renderer().items();
    assert_eq!(ranked[1].title(), "D");
    assert!(ranked[1].missing.is_empty());
    assert!(ranked[1].covered.is_empty());
    assert!(ranked[1].substitutions.is_empty());
    assert_eq!(ranked[3].substitutions["beans"], "lentils");

    catalog.assert_async().await;
    gaps.assert_async().await;
}

#[tokio::test]
async fn test_empty_set_issues_no_requests() {
    let mut server = Server::new_async().await;
    let catalog = server
        .mock("GET", "/api/recipes")
        .expect(0)
        .create_async()
        .await;
    let gaps = server
        .mock("POST", "/api/analyze_gaps")
        .expect(0)
        .create_async()
        .await;

    let api = HttpRecipeApi::with_base_url(server.url()).unwrap();
    let mut app = App::default();
    app.add_ingredients("  ,  ");

    assert_eq!(app.suggest(&api).await, SuggestOutcome::NeedsIngredients);
    assert_eq!(app.view(), SuggestionsView::Notice(EMPTY_SET_NOTICE));

    catalog.assert_async().await;
    gaps.assert_async().await;
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let mut server = Server::new_async().await;
    let catalog = server
        .mock("GET", "/api/recipes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CATALOG)
        .expect(1)
        .create_async()
        .await;
    let gaps = server
        .mock("POST", "/api/analyze_gaps")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GAPS)
        .expect(1)
        .create_async()
        .await;

    let api = HttpRecipeApi::with_base_url(server.url()).unwrap();
    let mut app = App::default();
    app.add_ingredients("egg");
    app.suggest(&api).await;
    assert!(matches!(app.view(), SuggestionsView::Cards { .. }));

    app.reset();
    assert!(app.ingredients().is_empty());
    assert!(app.renderer().items().is_empty());
    assert!(matches!(app.view(), SuggestionsView::Placeholder(_)));

    // Only the first suggest may reach the server
    assert_eq!(app.suggest(&api).await, SuggestOutcome::NeedsIngredients);
    catalog.assert_async().await;
    gaps.assert_async().await;
}

#[tokio::test]
async fn test_catalog_failure_is_generic_and_keeps_ingredients() {
    let mut server = Server::new_async().await;
    let _catalog = server
        .mock("GET", "/api/recipes")
        .with_status(500)
        .with_body("database exploded")
        .create_async()
        .await;
    let gaps = server
        .mock("POST", "/api/analyze_gaps")
        .expect(0)
        .create_async()
        .await;

    let api = HttpRecipeApi::with_base_url(server.url()).unwrap();
    let mut app = App::default();
    app.add_ingredients("egg, milk");

    let outcome = app.suggest(&api).await;
    assert_eq!(outcome, SuggestOutcome::Failed("Failed to fetch recipes".to_string()));
    assert_eq!(
        app.view().message().unwrap(),
        "Error: Failed to fetch recipes"
    );
    assert_eq!(app.ingredients().as_slice(), ["egg", "milk"]);
    gaps.assert_async().await;
}

#[tokio::test]
async fn test_analysis_failure_surfaces_server_text() {
    let mut server = Server::new_async().await;
    let _catalog = mock_catalog(&mut server).await;
    let _gaps = server
        .mock("POST", "/api/analyze_gaps")
        .with_status(422)
        .with_body("available_ingredients must not be empty")
        .create_async()
        .await;

    let api = HttpRecipeApi::with_base_url(server.url()).unwrap();
    let mut app = App::default();
    app.add_ingredients("egg");

    match app.suggest(&api).await {
        SuggestOutcome::Failed(message) => {
            assert_eq!(message, "Analyze failed: available_ingredients must not be empty")
        }
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(app.ingredients().len(), 1);
}

#[tokio::test]
async fn test_last_started_request_wins() {
    let mut server = Server::new_async().await;
    let _catalog = mock_catalog(&mut server).await;
    let _gaps = mock_gaps(&mut server).await;

    let api = HttpRecipeApi::with_base_url(server.url()).unwrap();
    let mut app = App::default();
    app.add_ingredients("egg");

    let first = app.prepare_suggest().unwrap();
    assert_eq!(app.view().message().unwrap(), LOADING_PLACEHOLDER);
    app.add_ingredients("milk");
    let second = app.prepare_suggest().unwrap();
    assert!(second.generation() > first.generation());
    assert_eq!(first.ingredients(), ["egg"]);
    assert_eq!(second.ingredients(), ["egg", "milk"]);
    let (first_generation, second_generation) = (first.generation(), second.generation());

    // The later request completes first, the earlier one straggles in after
    let second_done = second.run(&api).await;
    let first_done = first.run(&api).await;
    assert_eq!(second_done.generation(), second_generation);
    assert_eq!(first_done.generation(), first_generation);

    assert!(matches!(app.apply_suggest(second_done), SuggestOutcome::Painted(_)));
    assert_eq!(app.apply_suggest(first_done), SuggestOutcome::Superseded);
    assert_eq!(titles(&app.view()), vec!["A", "D", "C", "B"]);
}

#[tokio::test]
async fn test_reset_supersedes_in_flight_request() {
    let mut server = Server::new_async().await;
    let _catalog = mock_catalog(&mut server).await;
    let _gaps = mock_gaps(&mut server).await;

    let api = HttpRecipeApi::with_base_url(server.url()).unwrap();
    let mut app = App::default();
    app.add_ingredients("egg");

    let request = app.prepare_suggest().unwrap();
    app.reset();
    let response = request.run(&api).await;

    assert_eq!(app.apply_suggest(response), SuggestOutcome::Superseded);
    assert!(matches!(app.view(), SuggestionsView::Placeholder(_)));
}

#[tokio::test]
async fn test_pending_text_is_added_before_suggesting() {
    let mut server = Server::new_async().await;
    let _catalog = mock_catalog(&mut server).await;
    let gaps = server
        .mock("POST", "/api/analyze_gaps")
        .match_body(Matcher::PartialJson(json!({"available_ingredients": ["bread"]})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GAPS)
        .create_async()
        .await;

    let api = HttpRecipeApi::with_base_url(server.url()).unwrap();
    let mut app = App::default();

    let outcome = app.suggest_with_pending(&api, " Bread ").await;
    assert!(matches!(outcome, SuggestOutcome::Painted(_)));
    assert_eq!(app.ingredients().as_slice(), ["bread"]);
    gaps.assert_async().await;
}

#[tokio::test]
async fn test_empty_catalog_shows_no_suggestions() {
    let mut server = Server::new_async().await;
    let _catalog = server
        .mock("GET", "/api/recipes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"recipes": []}"#)
        .create_async()
        .await;
    let _gaps = server
        .mock("POST", "/api/analyze_gaps")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"gaps": {}}"#)
        .create_async()
        .await;

    let api = HttpRecipeApi::with_base_url(server.url()).unwrap();
    let mut app = App::default();
    app.add_ingredients("egg");
    app.suggest(&api).await;

    assert_eq!(app.view(), SuggestionsView::Empty);
    assert!(app.renderer().sentinel().is_none());
}

#[tokio::test]
async fn test_suggest_recipes_convenience() {
    let mut server = Server::new_async().await;
    let _catalog = mock_catalog(&mut server).await;
    let _gaps = mock_gaps(&mut server).await;

    let ranked = suggest_recipes(&server.url(), "egg").await.unwrap();
    let order: Vec<&str> = ranked.iter().map(|c| c.title()).collect();
    assert_eq!(order, vec!["A", "D", "C", "B"]);

    let nothing = suggest_recipes(&server.url(), " , ").await.unwrap();
    assert!(nothing.is_empty());
}

#[tokio::test]
async fn test_null_fields_from_api_count_as_empty() {
    let mut server = Server::new_async().await;
    let _catalog = server
        .mock("GET", "/api/recipes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"recipes": [{"id": 1, "title": "Toast", "tags": null, "ingredients": ["bread"], "instructions": null}]}"#)
        .create_async()
        .await;
    let _gaps = server
        .mock("POST", "/api/analyze_gaps")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"gaps": {"1": {"missing": ["butter"], "covered": null, "substitution_candidates": null}}}"#)
        .create_async()
        .await;

    let api = HttpRecipeApi::with_base_url(server.url()).unwrap();
    let mut app = App::default();
    app.add_ingredients("bread");

    assert!(matches!(app.suggest(&api).await, SuggestOutcome::Painted(_)));
    let ranked = app.renderer().items();
    assert_eq!(ranked[0].missing, vec!["butter"]);
    assert!(ranked[0].covered.is_empty());
    assert!(ranked[0].substitutions.is_empty());
    assert!(ranked[0].recipe.tags.is_empty());
}
