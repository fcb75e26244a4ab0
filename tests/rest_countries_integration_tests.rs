use std::sync::Arc;

use atlas::api::client::LIST_FIELDS;
use atlas::api::{
    ApiError, CountrySource, RestCountriesClient, fetch_all, fetch_by_region, fetch_one,
    resolve_favorites,
};
use atlas::cli::{self, Command, Context, Outcome};
use atlas::core::favorites::{FavoritesStore, FileStore};
use atlas::core::filter::FilterCriteria;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn france() -> Value {
    json!({
        "name": {"common": "France", "official": "French Republic"},
        "cca3": "FRA",
        "cca2": "FR",
        "region": "Europe",
        "subregion": "Western Europe",
        "population": 67391582,
        "languages": {"fra": "French"},
        "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
        "capital": ["Paris"],
        "borders": ["AND", "BEL", "DEU"],
        "flags": {"png": "https://flagcdn.com/w320/fr.png", "svg": "https://flagcdn.com/fr.svg"}
    })
}

fn japan() -> Value {
    json!({
        "name": {"common": "Japan", "official": "Japan"},
        "cca3": "JPN",
        "region": "Asia",
        "population": 125836021,
        "languages": {"jpn": "Japanese"},
        "capital": ["Tokyo"],
        "flags": {"png": "", "svg": ""}
    })
}

async fn client_for(server: &MockServer) -> RestCountriesClient {
    RestCountriesClient::new(Some(format!("{}/v3.1", server.uri())))
}

// ============================================================================
// Client Tests
// ============================================================================

#[tokio::test]
async fn test_all_requests_field_selection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .and(query_param("fields", LIST_FIELDS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([france(), japan()])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let countries = client.all().await.unwrap();
    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].cca3, "FRA");
    assert_eq!(countries[1].first_capital(), Some("Tokyo"));
}

#[tokio::test]
async fn test_by_code_takes_first_array_element() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/alpha/FRA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([france()])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let country = client.by_code("FRA").await.unwrap();
    assert_eq!(country.name.official, "French Republic");
    assert_eq!(country.borders, vec!["AND", "BEL", "DEU"]);
}

#[tokio::test]
async fn test_by_code_not_found_and_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/alpha/XYZ"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"status": 404, "message": "Not Found"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3.1/alpha/EMP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(matches!(client.by_code("XYZ").await, Err(ApiError::NotFound(_))));
    assert!(matches!(client.by_code("EMP").await, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_server_error_and_bad_json_are_distinct_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3.1/region/Europe"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(matches!(
        client.all().await,
        Err(ApiError::Status { status: 500, .. })
    ));
    assert!(matches!(
        client.by_region("Europe").await,
        Err(ApiError::Decode(_))
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Reserve a free port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = RestCountriesClient::new(Some(format!("http://127.0.0.1:{port}/v3.1")));
    assert!(matches!(client.all().await, Err(ApiError::Network(_))));
    assert!(matches!(client.by_code("FRA").await, Err(ApiError::Network(_))));
    assert!(fetch_all(&client).await.is_empty());
}

// ============================================================================
// Data Access Tests
// ============================================================================

#[tokio::test]
async fn test_access_functions_swallow_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3.1/alpha/XYZ"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3.1/region/Atlantis"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(fetch_all(&client).await.is_empty());
    assert!(fetch_one(&client, "XYZ").await.is_none());
    assert!(fetch_by_region(&client, "Atlantis").await.is_empty());
}

#[tokio::test]
async fn test_fetch_by_region_returns_members() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/region/Asia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([japan()])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let asia = fetch_by_region(&client, "Asia").await;
    assert_eq!(asia.len(), 1);
    assert_eq!(asia[0].name.common, "Japan");
}

#[tokio::test]
async fn test_resolve_favorites_drops_unknown_and_keeps_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/alpha/JPN"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([japan()]))
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3.1/alpha/FRA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([france()])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3.1/alpha/XYZ"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let codes = vec!["JPN".to_string(), "XYZ".to_string(), "FRA".to_string()];
    let resolved = resolve_favorites(&client, &codes).await;
    let names: Vec<&str> = resolved.iter().map(|c| c.cca3.as_str()).collect();
    assert_eq!(names, vec!["JPN", "FRA"]);
}

// ============================================================================
// End to End
// ============================================================================

#[tokio::test]
async fn test_favorites_survive_a_new_store_and_resolve_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/alpha/FRA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([france()])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("favorites.json");
    let first = FavoritesStore::new(Arc::new(FileStore::new(&file)));
    assert!(first.toggle_favorite("fra").unwrap());

    let reopened = FavoritesStore::new(Arc::new(FileStore::new(&file)));
    assert_eq!(reopened.list_favorites(), vec!["FRA"]);

    let client = client_for(&server).await;
    let ctx = Context {
        source: &client,
        favorites: &reopened,
        criteria: FilterCriteria::default(),
        ranking_size: 10,
    };
    let mut out = Vec::new();
    let outcome = cli::execute(Command::Favorites, ctx, &mut out).await.unwrap();
    assert_eq!(outcome, Outcome::Done);
    assert!(String::from_utf8(out).unwrap().contains("★ FRA France"));
}

#[tokio::test]
async fn test_cli_list_against_mock_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([france(), japan()])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let favorites = FavoritesStore::in_memory();
    let ctx = Context {
        source: &client,
        favorites: &favorites,
        criteria: FilterCriteria::from_query("region=Asia"),
        ranking_size: 10,
    };
    let mut out = Vec::new();
    cli::execute(Command::List { sort: None }, ctx, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Japan"));
    assert!(!text.contains("France"));
    assert!(text.contains("1 of 2 countries"));
    assert!(text.contains("query: ?region=Asia"));
}
