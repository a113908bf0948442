//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rand::{SeedableRng, rngs::StdRng};
use tracing::warn;

use super::types::{
    ErrorResponse, SimulateRequest, SimulateResponse, StateResponse, TrajectoryQuery,
};
use super::{AppState, CompletedRun};
use crate::config::ScenarioConfig;
use crate::sim::engine::simulate;
use crate::sim::summary::EpidemicSummary;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn completed(state: &AppState) -> Result<&CompletedRun, ApiError> {
    state.run.as_ref().ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("no simulation result available")),
        )
    })
}

/// `GET /state` → 200 + `StateResponse`, or 404 before any run.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Response {
    match completed(&state) {
        Ok(run) => Json(StateResponse {
            inputs: &run.inputs,
            seed: run.seed,
            params: &run.output.params,
            summary: &run.summary,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Returns trajectory rows, optionally filtered by day range.
///
/// `GET /trajectory` → every row
/// `GET /trajectory?from=N&to=M` → rows with `N <= day <= M`
/// `GET /trajectory?from=62&to=31` → 400 + `ErrorResponse`
pub async fn get_trajectory(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrajectoryQuery>,
) -> Response {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(u32::MAX);

    if from > to {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!(
                "`from` ({from}) must be <= `to` ({to})"
            ))),
        )
            .into_response();
    }

    match completed(&state) {
        Ok(run) => {
            let rows: Vec<_> = run.output.trajectory.range(from, to).collect();
            Json(rows).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// `GET /chart` → 200 + `ChartSpec`.
pub async fn get_chart(State(state): State<Arc<AppState>>) -> Response {
    match completed(&state) {
        Ok(run) => Json(&run.output.chart).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /parameters` → 200 + parameter record object.
pub async fn get_parameters(State(state): State<Arc<AppState>>) -> Response {
    match completed(&state) {
        Ok(run) => Json(&run.output.params).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Runs a fresh simulation from the request body.
///
/// Requests go through the same checks as scenario files, including the
/// `sim_days` bound.
///
/// `POST /simulate` → 200 + `SimulateResponse`, or 422 + `ErrorResponse`
/// when the inputs are rejected.
pub async fn post_simulate(
    Json(req): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let seed = req.seed.unwrap_or_else(rand::random);

    let errors = ScenarioConfig::from_inputs(&req.inputs, seed).validate();
    if !errors.is_empty() {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        warn!(error = %message, "rejected simulation request");
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(message)),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    let output = simulate(&req.inputs, &mut rng).map_err(|e| {
        warn!(error = %e, "rejected simulation request");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(e.to_string())),
        )
    })?;

    let summary = EpidemicSummary::from_trajectory(&output.trajectory, req.inputs.init_death);
    Ok(Json(SimulateResponse {
        seed,
        summary,
        output,
    }))
}
