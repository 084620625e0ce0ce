//! Integration tests for district endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_test_app, create_test_pool, get_request, json_request, parse_response_body,
    run_migrations, test_config, unique_district_name,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_district_success() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let name = unique_district_name();

    let request = json_request(Method::POST, "/api/v1/districts", json!({ "name": name }));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["name"].as_str().unwrap(), name);
    assert!(body["id"].as_str().is_some());
}

#[tokio::test]
async fn test_create_district_duplicate_name_conflicts() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let name = unique_district_name();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/districts",
            json!({ "name": name }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/districts",
            json!({ "name": name }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_district_rejects_short_name() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/districts",
            json!({ "name": "D" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"].as_str().unwrap(), "validation_error");
}

#[tokio::test]
async fn test_list_districts_includes_created() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let name = unique_district_name();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/districts",
            json!({ "name": name }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get_request("/api/v1/districts")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(body["count"].as_u64().unwrap() as usize, data.len());
    assert!(data.iter().any(|d| d["name"].as_str() == Some(name.as_str())));
}

#[tokio::test]
async fn test_list_districts_is_sorted_by_name() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    for name in [unique_district_name(), unique_district_name()] {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/v1/districts",
                json!({ "name": name }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get_request("/api/v1/districts")).await.unwrap();
    let body = parse_response_body(response).await;

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}
