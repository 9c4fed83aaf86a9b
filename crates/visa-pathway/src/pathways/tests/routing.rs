use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::pathways::router::{catalog_handler, diagnosis_handler};
use crate::pathways::pathway_router;

fn diagnosis_request(body: Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post("/api/v1/pathways/diagnosis")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serialize body"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn diagnosis_route_returns_ranked_pathways() {
    let router = pathway_router(Arc::new(standard_engine()));

    let response = router
        .oneshot(diagnosis_request(json!({
            "nationality": "VN",
            "age": 23,
            "educationLevel": "BACHELOR",
            "availableAnnualFund": 15000000,
            "finalGoal": "WORK",
            "priorityPreference": "FAST"
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["pathways"][0]["pathwayId"],
        "D-10/d10-employer-sponsorship"
    );
    assert_eq!(payload["pathways"][0]["feasibilityLabel"], "EXCELLENT");
    assert!(payload["pathways"][0]["scoreBreakdown"]["priorityWeight"].is_number());
    assert!(payload["pathways"][0]["nextSteps"].is_array());
    assert_eq!(payload["meta"]["totalPathwaysEvaluated"], 13);
    assert!(payload["meta"]["evaluatedOn"].is_string());
}

#[tokio::test]
async fn diagnosis_route_lists_every_invalid_field() {
    let router = pathway_router(Arc::new(standard_engine()));

    let response = router
        .oneshot(diagnosis_request(json!({
            "age": 10,
            "educationLevel": "BACHELOR",
            "availableAnnualFund": "BETWEEN_10M_30M",
            "finalGoal": "RETIRE",
            "priorityPreference": "FAST"
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let fields: Vec<&str> = payload["violations"]
        .as_array()
        .expect("violations array")
        .iter()
        .filter_map(|violation| violation["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["nationality", "age", "finalGoal"]);
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.starts_with("invalid applicant profile")));
}

#[tokio::test]
async fn diagnosis_handler_returns_empty_list_for_unserved_goal() {
    let engine = Arc::new(engine_with(
        diamond_catalog(),
        crate::pathways::EngineSettings::default(),
    ));
    let mut input = work_input("FAST");
    input.final_goal = Some(json!("SETTLE"));

    let response = diagnosis_handler(State(engine), axum::Json(input)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["pathways"], json!([]));
    assert_eq!(payload["meta"]["totalPathwaysEvaluated"], 0);
}

#[tokio::test]
async fn catalog_route_reports_summary() {
    let router = pathway_router(Arc::new(standard_engine()));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/pathways/catalog")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["version"], "kr-2025.2");
    assert_eq!(payload["stateCount"], 10);
    assert_eq!(payload["startStates"][0]["goal"], "STUDY");
}

#[tokio::test]
async fn catalog_handler_reads_shared_engine() {
    let engine = Arc::new(engine_with(
        diamond_catalog(),
        crate::pathways::EngineSettings::default(),
    ));

    let response = catalog_handler(State(engine)).await;

    let payload = read_json_body(response).await;
    assert_eq!(payload["version"], "fixture-1");
    assert_eq!(payload["terminalStates"], json!(["T"]));
}
