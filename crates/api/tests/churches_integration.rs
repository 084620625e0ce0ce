//! Integration tests for church endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_test_app, create_test_pool, get_request, json_request, parse_response_body,
    run_migrations, seed_event_structure, test_config, unique_church_name,
};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_create_church_success() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let structure = seed_event_structure(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let name = unique_church_name();

    let request = json_request(
        Method::POST,
        "/api/v1/churches",
        json!({ "name": name, "district_id": structure.district_id }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["name"].as_str().unwrap(), name);
    assert_eq!(
        body["district_id"].as_str().unwrap(),
        structure.district_id.to_string()
    );
}

#[tokio::test]
async fn test_create_church_unknown_district_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());

    let request = json_request(
        Method::POST,
        "/api/v1/churches",
        json!({ "name": unique_church_name(), "district_id": Uuid::new_v4() }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_church_duplicate_in_district_conflicts() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let structure = seed_event_structure(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let request = json_request(
        Method::POST,
        "/api/v1/churches",
        json!({ "name": structure.church_name, "district_id": structure.district_id }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_same_church_name_allowed_in_other_district() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let first = seed_event_structure(&pool).await;
    let second = seed_event_structure(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    // Reuse the first structure's church name under the second district
    let request = json_request(
        Method::POST,
        "/api/v1/churches",
        json!({ "name": first.church_name, "district_id": second.district_id }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_churches_filtered_by_district() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let mine = seed_event_structure(&pool).await;
    let other = seed_event_structure(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .oneshot(get_request(&format!(
            "/api/v1/churches?district_id={}",
            mine.district_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(body["count"].as_u64().unwrap(), 1);
    assert_eq!(data[0]["name"].as_str().unwrap(), mine.church_name);
    assert_eq!(data[0]["district_name"].as_str().unwrap(), mine.district_name);
    assert!(data
        .iter()
        .all(|c| c["district_id"].as_str() != Some(other.district_id.to_string().as_str())));
}

#[tokio::test]
async fn test_list_churches_unfiltered_includes_all_districts() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let first = seed_event_structure(&pool).await;
    let second = seed_event_structure(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app.oneshot(get_request("/api/v1/churches")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&first.church_name.as_str()));
    assert!(names.contains(&second.church_name.as_str()));
}
