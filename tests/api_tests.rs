use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use screen_search::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_app(omdb: &MockServer) -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.omdb.api_url = omdb.uri();
    config.omdb.api_key = "test-key".to_string();
    config.omdb.request_timeout_seconds = 2;

    let state = screen_search::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    screen_search::api::router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn batman_results() -> Value {
    json!({
        "Search": [
            {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "https://example.com/bb.jpg"},
            {"Title": "Batman", "Year": "1989", "imdbID": "tt0096895", "Type": "movie", "Poster": "N/A"},
            {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "https://example.com/dup.jpg"}
        ],
        "totalResults": "3",
        "Response": "True"
    })
}

#[tokio::test]
async fn test_search_returns_movies_and_uses_cache() {
    let omdb = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("s", "Batman"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batman_results()))
        .expect(1)
        .mount(&omdb)
        .await;

    let app = spawn_app(&omdb).await;

    let (status, body) = send(&app, get("/movies/search?q=Batman")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["query"], "Batman");
    assert_eq!(body["message"], "Found 2 movies for \"Batman\"");
    assert_eq!(body["data"][0]["imdbID"], "tt0372784");
    assert_eq!(body["data"][0]["Poster"], "https://example.com/bb.jpg");
    assert!(body["data"][1]["Poster"].is_null());

    // Same key after trimming and lowercasing, served from the cache.
    let (status, body) = send(&app, get("/movies/search?q=%20batman%20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_search_not_found_is_empty_success() {
    let omdb = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Response": "False", "Error": "Movie not found!"})),
        )
        .expect(1)
        .mount(&omdb)
        .await;

    let app = spawn_app(&omdb).await;

    for _ in 0..2 {
        let (status, body) = send(&app, get("/movies/search?q=zzzznomatch")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["count"], 0);
        assert_eq!(body["message"], "No movies found for \"zzzznomatch\"");
    }
}

#[tokio::test]
async fn test_search_validation_errors() {
    let omdb = MockServer::start().await;
    let app = spawn_app(&omdb).await;

    for uri in [
        "/movies/search",
        "/movies/search?q=",
        "/movies/search?q=a",
        "/movies/search?q=%3Cscript%3E",
    ] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    let long = "a".repeat(101);
    let (status, _) = send(&app, get(&format!("/movies/search?q={long}"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(omdb.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_upstream_errors_map_to_statuses() {
    let cases = [
        (
            ResponseTemplate::new(401).set_body_json(json!({"Response": "False", "Error": "Invalid API key!"})),
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
        ),
        (
            ResponseTemplate::new(429).set_body_string("slow down"),
            StatusCode::TOO_MANY_REQUESTS,
            "TOO_MANY_REQUESTS",
        ),
        (
            ResponseTemplate::new(503).set_body_string("down"),
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
        ),
        (
            ResponseTemplate::new(200)
                .set_body_json(json!({"Response": "False", "Error": "Too many results."})),
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
        ),
    ];

    for (template, expected_status, expected_code) in cases {
        let omdb = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(template)
            .mount(&omdb)
            .await;
        let app = spawn_app(&omdb).await;

        let (status, body) = send(&app, get("/movies/search?q=batman")).await;
        assert_eq!(status, expected_status);
        assert_eq!(body["code"], expected_code);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("[MoviesAPI] ")
        );
    }
}

#[tokio::test]
async fn test_favorites_lifecycle() {
    let omdb = MockServer::start().await;
    let app = spawn_app(&omdb).await;

    let (status, body) = send(&app, get("/favorites")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], json!([]));

    let (status, body) = send(
        &app,
        post_json(
            "/favorites",
            r#"{"imdbID":"tt0372784","title":"Batman Begins","year":"2005","poster":"https://example.com/bb.jpg"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Movie added to favorites");
    assert_eq!(body["data"]["imdbID"], "tt0372784");
    assert_eq!(body["data"]["userId"], "user-123");
    assert_eq!(body["data"]["movieData"]["title"], "Batman Begins");

    let (status, body) = send(
        &app,
        post_json(
            "/favorites",
            r#"{"imdbID":"tt0372784","title":"Batman Begins","year":"2005"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Movie already in favorites");
    assert_eq!(body["code"], "CONFLICT");

    send(
        &app,
        post_json(
            "/favorites",
            r#"{"imdbID":"tt0096895","title":"Batman","year":"1989"}"#,
        ),
    )
    .await;

    let (status, body) = send(&app, get("/favorites")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["message"], "Found 2 favorites");
    assert_eq!(body["data"][0]["imdbID"], "tt0096895");
    assert_eq!(body["data"][1]["imdbID"], "tt0372784");

    let (status, body) = send(&app, get("/favorites/tt0372784")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Batman Begins");

    let (_, body) = send(&app, get("/favorites/tt0372784/status")).await;
    assert_eq!(body["data"], json!({"imdbID": "tt0372784", "isFavorite": true}));

    let (status, body) = send(&app, delete("/favorites/tt0372784")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Favorite removed successfully");

    let (status, body) = send(&app, delete("/favorites/tt0372784")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Favorite not found");

    let (status, body) = send(&app, get("/favorites/tt0372784")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Favorite with ID tt0372784 not found");

    let (_, body) = send(&app, get("/favorites/tt0372784/status")).await;
    assert_eq!(body["data"]["isFavorite"], false);
}

#[tokio::test]
async fn test_add_favorite_rejects_bad_payloads() {
    let omdb = MockServer::start().await;
    let app = spawn_app(&omdb).await;

    let bad = [
        "not json",
        r#"{"title":"Batman","year":"1989"}"#,
        r#"{"imdbID":"t","title":"Batman","year":"1989"}"#,
        r#"{"imdbID":"tt0096895","title":"   ","year":"1989"}"#,
        r#"{"imdbID":"tt0096895","title":"Batman","year":""}"#,
    ];

    for payload in bad {
        let (status, body) = send(&app, post_json("/favorites", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    let (_, body) = send(&app, get("/favorites")).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_health_and_metrics_without_recorder() {
    let omdb = MockServer::start().await;
    let app = spawn_app(&omdb).await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let response = app.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let omdb = MockServer::start().await;
    let app = spawn_app(&omdb).await;

    let response = app.clone().oneshot(get("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
