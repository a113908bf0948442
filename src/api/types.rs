//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::sim::engine::SimulationOutput;
use crate::sim::params::ParameterRecord;
use crate::sim::summary::EpidemicSummary;
use crate::sim::types::SimulationInputs;

/// Inputs, seed, parameters, and summary of the served run.
#[derive(Debug, Serialize)]
pub struct StateResponse<'a> {
    pub inputs: &'a SimulationInputs,
    pub seed: u64,
    pub params: &'a ParameterRecord,
    pub summary: &'a EpidemicSummary,
}

/// Optional inclusive day range for the trajectory endpoint.
#[derive(Debug, Deserialize)]
pub struct TrajectoryQuery {
    pub from: Option<u32>,
    pub to: Option<u32>,
}

/// Body of `POST /simulate`: engine inputs plus an optional seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest {
    #[serde(flatten)]
    pub inputs: SimulationInputs,
    /// Seed for the rate draws; a random one is chosen and echoed back if absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Result of `POST /simulate`.
#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub seed: u64,
    pub summary: EpidemicSummary,
    #[serde(flatten)]
    pub output: SimulationOutput,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
