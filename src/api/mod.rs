//! REST API for simulation results.
//!
//! Read endpoints serve the run the server was started with:
//! - `/state`: inputs, seed, parameters, and epidemic summary
//! - `/trajectory`: sampled rows with optional day-range filtering
//! - `/chart`: stacked-area chart spec
//! - `/parameters`: realized parameter record
//!
//! `POST /simulate` runs a fresh, independent simulation per request.

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::sim::engine::SimulationOutput;
use crate::sim::summary::EpidemicSummary;
use crate::sim::types::SimulationInputs;

pub use types::{SimulateRequest, SimulateResponse};

/// A completed run and what produced it.
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub inputs: SimulationInputs,
    pub seed: u64,
    pub output: SimulationOutput,
    pub summary: EpidemicSummary,
}

impl CompletedRun {
    pub fn new(inputs: SimulationInputs, seed: u64, output: SimulationOutput) -> Self {
        let summary = EpidemicSummary::from_trajectory(&output.trajectory, inputs.init_death);
        Self {
            inputs,
            seed,
            output,
            summary,
        }
    }
}

/// Immutable application state shared across all request handlers.
///
/// Constructed once and wrapped in `Arc`; no locks needed since all data
/// is read-only. `run` is `None` when the server starts without a result.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub run: Option<CompletedRun>,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/trajectory", get(handlers::get_trajectory))
        .route("/chart", get(handlers::get_chart))
        .route("/parameters", get(handlers::get_parameters))
        .route("/simulate", post(handlers::post_simulate))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
