//! End-to-end tests of the HTTP surface over the in-memory store.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use database::{Failure, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use web_server::{build_router, AppState};

fn app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState::new(store.clone(), store.clone()));
    (store, build_router(state, &[]))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn campus_payload() -> Value {
    json!({
        "name": "Test Kampüs",
        "city": "İstanbul",
        "address": "Test Adresi",
        "established_year": 2020,
        "total_area": 1000.5,
        "student_capacity": 5000
    })
}

async fn create_campus(app: &Router) -> i64 {
    let (status, body) = send(app, Method::POST, "/api/campuses", Some(campus_payload())).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_building(app: &Router, campus_id: i64, name: &str) -> i64 {
    let payload = json!({
        "campus_id": campus_id,
        "name": name,
        "type": "Derslik",
        "floor_count": 5,
        "construction_year": 2021,
        "gross_area": 500.0
    });
    let (status, body) = send(app, Method::POST, "/api/buildings", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn create_campus_echoes_fields_and_assigns_an_id() {
    let (_, app) = app();
    let (status, body) = send(&app, Method::POST, "/api/campuses", Some(campus_payload())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Test Kampüs");
    assert_eq!(body["city"], "İstanbul");
    assert_eq!(body["total_area"], 1000.5);
    assert_eq!(body["created_at"], body["updated_at"]);
}

#[tokio::test]
async fn create_campus_without_city_is_unprocessable() {
    let (_, app) = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/campuses",
        Some(json!({ "name": "Test Kampüs" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn out_of_range_fields_are_reported_individually() {
    let (_, app) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/campuses",
        Some(json!({ "name": "", "city": "Ankara", "established_year": 3000 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<_> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|detail| detail["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "established_year"]);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (_, app) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/campuses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_campuses_filters_by_city() {
    let (_, app) = app();
    create_campus(&app).await;
    send(
        &app,
        Method::POST,
        "/api/campuses",
        Some(json!({ "name": "Kampüs 2", "city": "Ankara" })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/campuses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(&app, Method::GET, "/api/campuses?city=ank", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["city"], "Ankara");
}

#[tokio::test]
async fn get_missing_campus_is_not_found() {
    let (_, app) = app();
    let (status, body) = send(&app, Method::GET, "/api/campuses/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn non_integer_id_is_unprocessable() {
    let (_, app) = app();
    let (status, _) = send(&app, Method::GET, "/api/campuses/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn campus_update_rules() {
    let (_, app) = app();
    let id = create_campus(&app).await;
    let uri = format!("/api/campuses/{id}");

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/api/campuses/999", Some(json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "city": "Ankara", "address": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Ankara");
    assert_eq!(body["address"], Value::Null);
    assert_eq!(body["name"], "Test Kampüs");
}

#[tokio::test]
async fn building_against_missing_campus_is_not_found() {
    let (_, app) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/buildings",
        Some(json!({ "campus_id": 999, "name": "Test Bina" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));

    let (_, body) = send(&app, Method::GET, "/api/buildings", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn building_round_trip_uses_type_on_the_wire() {
    let (_, app) = app();
    let campus_id = create_campus(&app).await;
    let id = create_building(&app, campus_id, "Test Bina").await;

    let (status, body) = send(&app, Method::GET, &format!("/api/buildings/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["campus_id"], campus_id);
    assert_eq!(body["type"], "Derslik");
    assert_eq!(body["floor_count"], 5);
}

#[tokio::test]
async fn building_campus_cannot_be_changed() {
    let (_, app) = app();
    let campus_id = create_campus(&app).await;
    create_campus(&app).await;
    let id = create_building(&app, campus_id, "Test Bina").await;
    let uri = format!("/api/buildings/{id}");

    for payload in [json!({ "campus_id": 2 }), json!({ "campus_id": campus_id, "name": "Yeni" })] {
        let (status, body) = send(&app, Method::PUT, &uri, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("campus_id"));
    }

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "floor_count": 8 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["floor_count"], 8);
    assert_eq!(body["campus_id"], campus_id);
}

#[tokio::test]
async fn listing_buildings_of_unknown_campus_is_not_found() {
    let (_, app) = app();
    let (status, _) = send(&app, Method::GET, "/api/buildings?campus_id=42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/buildings?campus_id=abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn deleting_a_campus_cascades_to_its_buildings() {
    let (_, app) = app();
    let campus_id = create_campus(&app).await;
    let other = create_campus(&app).await;
    for name in ["A", "B", "C"] {
        create_building(&app, campus_id, name).await;
    }
    create_building(&app, other, "D").await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/campuses/{campus_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], campus_id);

    let (_, body) = send(&app, Method::GET, "/api/buildings", None).await;
    let remaining = body.as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["campus_id"], other);

    // The campus itself is gone, so filtering by it is now a 404.
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/buildings?campus_id={campus_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_building_returns_the_snapshot_once() {
    let (_, app) = app();
    let campus_id = create_campus(&app).await;
    let id = create_building(&app, campus_id, "Test Bina").await;
    let uri = format!("/api/buildings/{id}");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Test Bina");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn storage_failure_hides_internal_detail() {
    let (store, app) = app();
    store.set_failing(Some(Failure::Query));
    let (status, body) = send(&app, Method::POST, "/api/campuses", Some(campus_payload())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An internal database error occurred");
}

#[tokio::test]
async fn exhausted_pool_is_service_unavailable() {
    let (store, app) = app();
    create_campus(&app).await;
    store.set_failing(Some(Failure::PoolTimedOut));

    let (status, body) = send(&app, Method::GET, "/api/campuses", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());

    store.set_failing(None);
    let (status, _) = send(&app, Method::GET, "/api/campuses", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn wrong_content_type_is_unsupported_media_type() {
    let (_, app) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/campuses")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(campus_payload().to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (_, body) = send(&app, Method::GET, "/api/campuses", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn istanbul_filter_matches_dotted_capital() {
    let (_, app) = app();
    create_campus(&app).await;
    let (status, body) = send(&app, Method::GET, "/api/campuses?city=istanbul", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn cors_preflight_allows_credentials_for_listed_origins() {
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState::new(store.clone(), store));
    let app = build_router(state, &["http://localhost:5173".to_string()]);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/campuses")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5173");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .contains("content-type")
    );

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/campuses")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn root_and_health_respond() {
    let (_, app) = app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["version"].is_string());

    let (status, _) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
