//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::{SeedableRng, rngs::StdRng};
use tb_sim::sim::engine::{SimulationOutput, simulate};
use tb_sim::sim::types::SimulationInputs;

/// Seed shared by the deterministic integration tests.
pub const SEED: u64 = 42;

/// Seeded RNG for reproducible draws.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Default inputs: 1 000 people, 10 infected, 5 clinical, R0 1.5.
pub fn default_inputs(sim_days: u32) -> SimulationInputs {
    SimulationInputs {
        population: 1000.0,
        init_infected: 10.0,
        init_clinical: 5.0,
        init_recovered: 0.0,
        init_death: 0.0,
        basic_reproduction_number: 1.5,
        sim_days,
    }
}

/// Runs `inputs` with the given seed, panicking on invalid input.
pub fn run(inputs: &SimulationInputs, seed: u64) -> SimulationOutput {
    simulate(inputs, &mut rng(seed)).expect("inputs should be valid")
}
