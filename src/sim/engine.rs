//! Daily compartmental recurrence with monthly sampling.

use rand::Rng;
use serde::Serialize;
use tracing::{info, trace};

use super::chart::ChartSpec;
use super::error::SimError;
use super::params::ParameterRecord;
use super::rates::{RateParameters, Rates};
use super::types::{Compartments, SimulationInputs, Trajectory, TrajectoryRow};

/// Flows between compartments during one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyFlows {
    pub new_infections: f64,
    pub new_clinical: f64,
    pub new_recovered_from_infection: f64,
    pub new_recovered_from_clinical: f64,
    pub new_deaths: f64,
    pub new_susceptible: f64,
}

impl DailyFlows {
    /// Flows out of `state` under daily `rates`.
    ///
    /// Only clinical cases are contagious. An empty population has no
    /// infection pressure.
    pub fn compute(state: &Compartments, rates: &Rates) -> Self {
        let n = state.total();
        let effective_infection_ratio = if n > 0.0 { state.clinical / n } else { 0.0 };

        Self {
            new_infections: state.susceptible * rates.i * effective_infection_ratio,
            new_clinical: state.infected * rates.c,
            new_recovered_from_infection: state.infected * rates.r1,
            new_recovered_from_clinical: state.clinical * rates.r2,
            new_deaths: state.clinical * rates.d,
            new_susceptible: state.recovered * rates.s,
        }
    }

    /// Applies the flows to `state` and floors the result at zero.
    pub fn apply(&self, state: &Compartments) -> Compartments {
        Compartments {
            susceptible: state.susceptible - self.new_infections + self.new_susceptible,
            infected: state.infected + self.new_infections
                - self.new_clinical
                - self.new_recovered_from_infection,
            clinical: state.clinical + self.new_clinical
                - self.new_recovered_from_clinical
                - self.new_deaths,
            recovered: state.recovered
                + self.new_recovered_from_infection
                + self.new_recovered_from_clinical
                - self.new_susceptible,
            death: state.death + self.new_deaths,
        }
        .clamp_non_negative()
    }
}

/// The three products of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutput {
    pub trajectory: Trajectory,
    pub chart: ChartSpec,
    pub params: ParameterRecord,
}

/// A single validated run with its rates fixed.
///
/// Construction validates inputs and draws the rates; nothing is drawn
/// afterwards, so stepping is deterministic.
#[derive(Debug, Clone)]
pub struct Engine {
    sim_days: u32,
    rates: RateParameters,
    state: Compartments,
}

impl Engine {
    /// Validates `inputs` and draws the per-run rates from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidInput` if the population is not positive,
    /// an initial count or R0 is negative, or the initial cases exceed the
    /// population.
    pub fn new<R: Rng + ?Sized>(inputs: &SimulationInputs, rng: &mut R) -> Result<Self, SimError> {
        validate(inputs)?;
        let rates = RateParameters::draw(inputs.basic_reproduction_number, rng);
        Ok(Self::with_rates(inputs, rates))
    }

    /// Builds an engine with fixed rates, skipping the draws. Inputs are not validated.
    pub fn with_rates(inputs: &SimulationInputs, rates: RateParameters) -> Self {
        Self {
            sim_days: inputs.sim_days,
            rates,
            state: Compartments::initial(inputs),
        }
    }

    /// Advances the state by one day and returns the new state.
    pub fn step(&mut self) -> Compartments {
        let flows = DailyFlows::compute(&self.state, &self.rates.daily);
        self.state = flows.apply(&self.state);
        self.state
    }

    /// Runs days `1..=sim_days`, recording each sample day.
    pub fn run(mut self) -> SimulationOutput {
        info!(
            sim_days = self.sim_days,
            r0 = self.rates.basic_reproduction_number,
            "running simulation"
        );

        let mut trajectory = Trajectory::with_capacity(Trajectory::expected_len(self.sim_days));
        for day in 1..=self.sim_days {
            let state = self.step();
            if Trajectory::is_sample_day(day, self.sim_days) {
                let row = TrajectoryRow::sample(day, &state);
                trace!(%row, "recorded");
                trajectory.push(row);
            }
        }

        info!(rows = trajectory.len(), "simulation complete");

        SimulationOutput {
            chart: ChartSpec::stacked_area(&trajectory),
            params: ParameterRecord::from_rates(&self.rates),
            trajectory,
        }
    }

    pub fn rates(&self) -> &RateParameters {
        &self.rates
    }
}

fn validate(inputs: &SimulationInputs) -> Result<(), SimError> {
    if !(inputs.population.is_finite() && inputs.population > 0.0) {
        return Err(SimError::InvalidInput("population must be positive"));
    }
    let counts = [
        inputs.init_infected,
        inputs.init_clinical,
        inputs.init_recovered,
        inputs.init_death,
    ];
    if counts.iter().any(|c| !c.is_finite() || *c < 0.0) {
        return Err(SimError::InvalidInput("initial counts must be non-negative"));
    }
    if !inputs.basic_reproduction_number.is_finite() || inputs.basic_reproduction_number < 0.0 {
        return Err(SimError::InvalidInput(
            "basic reproduction number must be non-negative",
        ));
    }
    if inputs.initial_cases() > inputs.population {
        return Err(SimError::InvalidInput("initial cases exceed total population"));
    }
    Ok(())
}

/// Runs one simulation: validate, draw rates, iterate, sample.
///
/// # Errors
///
/// Returns `SimError::InvalidInput` before any draw if `inputs` are invalid.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use tb_sim::sim::engine::simulate;
/// use tb_sim::sim::types::SimulationInputs;
///
/// let inputs = SimulationInputs { sim_days: 62, ..SimulationInputs::default() };
/// let out = simulate(&inputs, &mut StdRng::seed_from_u64(42)).unwrap();
/// assert_eq!(out.trajectory.days(), vec![31, 62]);
/// assert_eq!(out.params.len(), 13);
/// ```
pub fn simulate<R: Rng + ?Sized>(
    inputs: &SimulationInputs,
    rng: &mut R,
) -> Result<SimulationOutput, SimError> {
    Ok(Engine::new(inputs, rng)?.run())
}
