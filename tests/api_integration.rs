//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::util::ServiceExt;

use tb_sim::api::{AppState, CompletedRun, SimulateRequest, router};

fn build_api_state() -> Arc<AppState> {
    let inputs = common::default_inputs(365);
    let output = common::run(&inputs, common::SEED);
    Arc::new(AppState {
        run: Some(CompletedRun::new(inputs, common::SEED, output)),
    })
}

async fn send(state: Arc<AppState>, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn post_simulate(body: &SimulateRequest) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/simulate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn chart_has_five_series_over_sampled_days() {
    let req = Request::builder().uri("/chart").body(Body::empty()).unwrap();
    let (status, json) = send(build_api_state(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["series"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["x"].as_array().map(Vec::len), Some(12));
    assert_eq!(json["series"][0]["label"], "Susceptible");
    assert_eq!(json["series"][4]["label"], "Death");
}

#[tokio::test]
async fn parameters_expose_all_keys() {
    let req = Request::builder()
        .uri("/parameters")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(build_api_state(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_object().map(|o| o.len()), Some(13));
    assert_eq!(json["Basic Reproduction number (R0)"], 1.5);
}

#[tokio::test]
async fn simulate_runs_fresh_and_is_reproducible() {
    let body = SimulateRequest {
        inputs: common::default_inputs(62),
        seed: Some(5),
    };
    let (status_a, a) = send(Arc::new(AppState::default()), post_simulate(&body)).await;
    let (status_b, b) = send(Arc::new(AppState::default()), post_simulate(&body)).await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(a, b);
    assert_eq!(a["seed"], 5);
    assert_eq!(a["trajectory"].as_array().map(Vec::len), Some(2));
    assert!(a.get("chart").is_some());
    assert!(a.get("params").is_some());
    assert!(a.get("summary").is_some());
}

#[tokio::test]
async fn simulate_echoes_generated_seed() {
    let body = SimulateRequest {
        inputs: common::default_inputs(31),
        seed: None,
    };
    let (status, json) = send(Arc::new(AppState::default()), post_simulate(&body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["seed"].is_u64());
}

#[tokio::test]
async fn simulate_rejects_invalid_inputs() {
    let mut inputs = common::default_inputs(31);
    inputs.population = 0.0;
    let body = SimulateRequest {
        inputs,
        seed: Some(1),
    };
    let (status, json) = send(Arc::new(AppState::default()), post_simulate(&body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json["error"],
        "config error: population.population: must be > 0"
    );
}

#[tokio::test]
async fn simulate_enforces_sim_days_bounds() {
    for days in [0, 366] {
        let body = SimulateRequest {
            inputs: common::default_inputs(days),
            seed: Some(1),
        };
        let (status, json) = send(Arc::new(AppState::default()), post_simulate(&body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "sim_days={days}");
        assert_eq!(
            json["error"],
            format!("config error: simulation.sim_days: must be in [1, 365], got {days}")
        );
    }

    let body = SimulateRequest {
        inputs: common::default_inputs(365),
        seed: Some(1),
    };
    let (status, json) = send(Arc::new(AppState::default()), post_simulate(&body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["trajectory"][11]["Day"], 365);
}
