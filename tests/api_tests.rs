use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;
use tempfile::NamedTempFile;
use uuid::Uuid;

use movie_recommender::{
    api::{create_router, AppState, QuerySettings},
    models::MovieRecord,
    services::{
        dataset::{CsvFileSource, InMemorySource, MovieSource},
        Snapshot, TitleMatch,
    },
};

fn avatar_corpus() -> Vec<MovieRecord> {
    vec![
        MovieRecord::new(19995, "Avatar")
            .with_keywords("action future")
            .with_cast("SamWorthington")
            .with_genres("Action")
            .with_director("James Cameron"),
        MovieRecord::new(76600, "Avatar 2")
            .with_keywords("action future")
            .with_cast("SamWorthington")
            .with_genres("Action")
            .with_director("James Cameron"),
        MovieRecord::new(597, "Titanic")
            .with_keywords("romance ship")
            .with_cast("LeonardoDiCaprio")
            .with_genres("Romance")
            .with_director("James Cameron"),
        MovieRecord::new(1, "Blank"),
    ]
}

async fn server_for(source: Arc<dyn MovieSource>, settings: QuerySettings) -> TestServer {
    let snapshot = Snapshot::load(source.as_ref(), settings.title_match)
        .await
        .unwrap();
    let state = AppState::new(snapshot, source, settings);
    TestServer::new(create_router(state)).unwrap()
}

async fn create_test_server() -> TestServer {
    server_for(
        Arc::new(InMemorySource::new(avatar_corpus())),
        QuerySettings::default(),
    )
    .await
}

fn write_csv(file: &NamedTempFile, rows: &[&str]) {
    let mut contents = String::from("id,title,keywords,cast,genres,director\n");
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    std::fs::write(file.path(), contents).unwrap();
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommend_ranks_sequel_first() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Avatar")
        .add_query_param("top_n", 2)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["query"], "Avatar");
    assert_eq!(body["matched_title"], "Avatar");

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0]["rank"], 1);
    assert_eq!(recommendations[0]["title"], "Avatar 2");
    assert_eq!(recommendations[0]["similarity_percent"], "100.0%");
    assert_eq!(recommendations[1]["title"], "Titanic");
    assert!(
        recommendations[0]["score"].as_f64().unwrap()
            > recommendations[1]["score"].as_f64().unwrap()
    );
}

#[tokio::test]
async fn test_recommend_uses_default_top_n() {
    let settings = QuerySettings {
        default_top_n: 1,
        ..QuerySettings::default()
    };
    let server = server_for(Arc::new(InMemorySource::new(avatar_corpus())), settings).await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Titanic")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_recommend_large_top_n_returns_all_others() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "titanic")
        .add_query_param("top_n", 50)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let titles: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();

    assert_eq!(titles.len(), 3);
    assert!(!titles.contains(&"Titanic"));
    // Blank metadata scores 0.0 and sorts last
    assert_eq!(titles.last(), Some(&"Blank"));
}

#[tokio::test]
async fn test_recommend_unknown_title_is_404() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "The Godfather")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Movie 'The Godfather' not found in the database."
    );
}

#[tokio::test]
async fn test_recommend_partial_match() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "tita")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["query"], "tita");
    assert_eq!(body["matched_title"], "Titanic");
}

#[tokio::test]
async fn test_recommend_exact_only_rejects_partial() {
    let settings = QuerySettings {
        title_match: TitleMatch::Exact,
        ..QuerySettings::default()
    };
    let server = server_for(Arc::new(InMemorySource::new(avatar_corpus())), settings).await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "tita")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommend_blank_title_is_400() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "   ")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/api/v1/recommendations").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));
}

#[tokio::test]
async fn test_recommend_non_positive_top_n_is_400() {
    let server = create_test_server().await;

    for top_n in [0, -4] {
        let response = server
            .get("/api/v1/recommendations")
            .add_query_param("title", "Avatar")
            .add_query_param("top_n", top_n)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_recommend_non_numeric_top_n_is_json_400() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Avatar")
        .add_query_param("top_n", "abc")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server().await;
    let request_id = Uuid::new_v4().to_string();

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_str(&request_id).unwrap(),
        )
        .await;

    assert_eq!(response.header("x-request-id"), request_id.as_str());
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let server = create_test_server().await;
    let response = server.get("/health").await;

    let header = response.header("x-request-id");
    assert!(Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_stats() {
    let server = create_test_server().await;
    let response = server.get("/api/v1/stats").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["movie_count"], 4);
    // action cameron future james leonardodicaprio romance samworthington ship
    assert_eq!(body["vocabulary_size"], 8);
    assert_eq!(body["source"], "in-memory (4 movies)");
    assert!(body["built_at"].is_string());
}

#[tokio::test]
async fn test_reload_swaps_snapshot() {
    let file = NamedTempFile::new().unwrap();
    write_csv(
        &file,
        &[
            "1,Heat,heist,Al Pacino,Crime,Michael Mann",
            "2,Collateral,hitman,Tom Cruise,Crime,Michael Mann",
        ],
    );
    let server = server_for(
        Arc::new(CsvFileSource::new(file.path())),
        QuerySettings::default(),
    )
    .await;

    let body: Value = server.get("/api/v1/stats").await.json();
    assert_eq!(body["movie_count"], 2);

    write_csv(
        &file,
        &[
            "1,Heat,heist,Al Pacino,Crime,Michael Mann",
            "2,Collateral,hitman,Tom Cruise,Crime,Michael Mann",
            "3,Thief,heist,James Caan,Crime,Michael Mann",
        ],
    );

    let response = server.post("/api/v1/dataset/reload").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["movie_count"], 3);

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Heat")
        .add_query_param("top_n", 1)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["recommendations"][0]["title"], "Thief");
}

#[tokio::test]
async fn test_failed_reload_keeps_current_snapshot() {
    let file = NamedTempFile::new().unwrap();
    write_csv(&file, &["1,Heat,heist,Al Pacino,Crime,Michael Mann"]);
    let server = server_for(
        Arc::new(CsvFileSource::new(file.path())),
        QuerySettings::default(),
    )
    .await;

    // Header only: the reload would produce an empty corpus
    write_csv(&file, &[]);
    let response = server.post("/api/v1/dataset/reload").await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    // No title column at all
    std::fs::write(file.path(), "name,genres\nHeat,Crime\n").unwrap();
    let response = server.post("/api/v1/dataset/reload").await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = server.get("/api/v1/stats").await.json();
    assert_eq!(body["movie_count"], 1);
}
