//! Integration tests for report export endpoints.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{
    adult_birth_date, child_birth_date, create_test_app, create_test_pool, get_request,
    register_participant, response_body_string, run_migrations, seed_event_structure,
    test_config, unique_participant_name,
};
use tower::ServiceExt;

fn confirm_request(token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1/checkin/{}/confirm", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_registrations_report_csv() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let structure = seed_event_structure(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let name = unique_participant_name();

    register_participant(&app, &name, adult_birth_date(), &structure).await;

    let response = app
        .oneshot(get_request(&format!(
            "/api/v1/reports/registrations?format=csv&district_id={}",
            structure.district_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"registrations_"));
    assert!(disposition.ends_with(".csv\""));

    let body = response_body_string(response).await;
    let mut lines = body.lines();
    assert!(lines.next().unwrap().starts_with("full_name,age,birth_date"));
    let row = lines.next().expect("expected one data row");
    assert!(row.starts_with(&name));
    assert!(row.contains(&structure.district_name));
    assert!(row.contains(&structure.church_name));
    assert!(row.contains(",pending,"));
}

#[tokio::test]
async fn test_registrations_report_json_has_summary_and_rows() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let structure = seed_event_structure(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let adult = unique_participant_name();
    let child = unique_participant_name();

    register_participant(&app, &adult, adult_birth_date(), &structure).await;
    register_participant(&app, &child, child_birth_date(), &structure).await;

    let response = app
        .oneshot(get_request(&format!(
            "/api/v1/reports/registrations?district_id={}",
            structure.district_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("application/json"));

    let body = response_body_string(response).await;
    let report: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(report["summary"]["total"].as_i64().unwrap(), 2);
    assert_eq!(report["summary"]["pending"].as_i64().unwrap(), 2);
    assert_eq!(report["summary"]["free"].as_i64().unwrap(), 1);
    // District-filtered reports carry no per-district breakdown
    assert!(report.get("districts").is_none());

    let rows = report["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .any(|r| r["full_name"].as_str() == Some(adult.as_str())));
    assert!(rows
        .iter()
        .all(|r| r["district"].as_str() == Some(structure.district_name.as_str())));
}

#[tokio::test]
async fn test_general_report_has_district_breakdown() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let structure = seed_event_structure(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    register_participant(&app, &unique_participant_name(), adult_birth_date(), &structure).await;

    let response = app
        .oneshot(get_request("/api/v1/reports/registrations"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_body_string(response).await;
    let report: serde_json::Value = serde_json::from_str(&body).unwrap();

    let districts = report["districts"].as_array().unwrap();
    let mine = districts
        .iter()
        .find(|d| d["district"].as_str() == Some(structure.district_name.as_str()))
        .expect("seeded district missing from breakdown");
    assert!(mine["total"].as_i64().unwrap() >= 1);
}

#[tokio::test]
async fn test_report_rows_are_sorted_by_name() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let structure = seed_event_structure(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    for _ in 0..3 {
        register_participant(&app, &unique_participant_name(), adult_birth_date(), &structure)
            .await;
    }

    let response = app
        .oneshot(get_request(&format!(
            "/api/v1/reports/registrations?district_id={}",
            structure.district_id
        )))
        .await
        .unwrap();
    let body = response_body_string(response).await;
    let report: serde_json::Value = serde_json::from_str(&body).unwrap();

    let names: Vec<String> = report["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["full_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), 3);
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn test_checkin_report_counts_present_and_absent() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let structure = seed_event_structure(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let arrived = unique_participant_name();
    let absent = unique_participant_name();

    let created = register_participant(&app, &arrived, adult_birth_date(), &structure).await;
    register_participant(&app, &absent, adult_birth_date(), &structure).await;

    let token = created["checkin_token"].as_str().unwrap();
    let response = app.clone().oneshot(confirm_request(token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request(&format!(
            "/api/v1/reports/checkin?district_id={}",
            structure.district_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_body_string(response).await;
    let report: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(report["summary"]["total"].as_i64().unwrap(), 2);
    assert_eq!(report["summary"]["present"].as_i64().unwrap(), 1);
    assert_eq!(report["summary"]["absent"].as_i64().unwrap(), 1);

    let rows = report["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let arrived_row = rows
        .iter()
        .find(|r| r["full_name"].as_str() == Some(arrived.as_str()))
        .unwrap();
    assert_eq!(arrived_row["checked_in"].as_bool().unwrap(), true);
    assert!(arrived_row["checkin_datetime"].as_str().is_some());
    let absent_row = rows
        .iter()
        .find(|r| r["full_name"].as_str() == Some(absent.as_str()))
        .unwrap();
    assert_eq!(absent_row["checked_in"].as_bool().unwrap(), false);
}

#[tokio::test]
async fn test_empty_report_csv_is_just_header() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let structure = seed_event_structure(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .oneshot(get_request(&format!(
            "/api/v1/reports/registrations?format=csv&district_id={}",
            structure.district_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_body_string(response).await;
    assert_eq!(body.lines().count(), 1);
}
