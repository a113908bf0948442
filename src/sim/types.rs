//! Core simulation types: run inputs, compartment state, and the sampled trajectory.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column names of the trajectory, in display order.
pub const TRAJECTORY_COLUMNS: [&str; 6] = [
    "Day",
    "Susceptible",
    "Infected",
    "Clinical",
    "Recovered",
    "Death",
];

/// Caller-supplied inputs for one simulation run.
///
/// Initial counts are real-valued so fractional cohorts can be modelled;
/// the engine rounds only when recording the trajectory.
///
/// # Examples
///
/// ```
/// use tb_sim::sim::types::SimulationInputs;
///
/// let inputs = SimulationInputs::default();
/// assert_eq!(inputs.population, 1000.0);
/// assert_eq!(inputs.initial_cases(), 15.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInputs {
    /// Total population at day 0 (must be > 0).
    pub population: f64,
    /// Initially infected, not yet contagious.
    pub init_infected: f64,
    /// Initially clinical (contagious).
    pub init_clinical: f64,
    /// Initially recovered.
    pub init_recovered: f64,
    /// Deaths already counted at day 0.
    pub init_death: f64,
    /// Target basic reproduction number (R0).
    pub basic_reproduction_number: f64,
    /// Number of days to simulate.
    pub sim_days: u32,
}

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            population: 1000.0,
            init_infected: 10.0,
            init_clinical: 5.0,
            init_recovered: 0.0,
            init_death: 0.0,
            basic_reproduction_number: 1.5,
            sim_days: 365,
        }
    }
}

impl SimulationInputs {
    /// Sum of the four non-susceptible initial compartments.
    pub fn initial_cases(&self) -> f64 {
        self.init_infected + self.init_clinical + self.init_recovered + self.init_death
    }
}

/// Full-precision state of the five compartments on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Compartments {
    /// Susceptible.
    pub susceptible: f64,
    /// Infected, non-contagious.
    pub infected: f64,
    /// Clinical, contagious.
    pub clinical: f64,
    /// Recovered.
    pub recovered: f64,
    /// Cumulative deaths.
    pub death: f64,
}

impl Compartments {
    /// Builds the day-0 state; susceptible takes whatever the initial cases leave over.
    pub fn initial(inputs: &SimulationInputs) -> Self {
        Self {
            susceptible: inputs.population - inputs.initial_cases(),
            infected: inputs.init_infected,
            clinical: inputs.init_clinical,
            recovered: inputs.init_recovered,
            death: inputs.init_death,
        }
    }

    /// `S + I + C + R + D`.
    pub fn total(&self) -> f64 {
        self.susceptible + self.infected + self.clinical + self.recovered + self.death
    }

    /// Floors every compartment at zero. Excess outflow is dropped, not redistributed.
    pub fn clamp_non_negative(self) -> Self {
        Self {
            susceptible: self.susceptible.max(0.0),
            infected: self.infected.max(0.0),
            clinical: self.clinical.max(0.0),
            recovered: self.recovered.max(0.0),
            death: self.death.max(0.0),
        }
    }
}

/// One recorded row of the trajectory, rounded to whole persons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrajectoryRow {
    /// Simulation day (1-based).
    pub day: u32,
    pub susceptible: f64,
    pub infected: f64,
    pub clinical: f64,
    pub recovered: f64,
    pub death: f64,
}

impl TrajectoryRow {
    /// Rounds a full-precision state for recording. The state itself is untouched.
    pub fn sample(day: u32, state: &Compartments) -> Self {
        Self {
            day,
            susceptible: state.susceptible.round(),
            infected: state.infected.round(),
            clinical: state.clinical.round(),
            recovered: state.recovered.round(),
            death: state.death.round(),
        }
    }

    /// Compartment values in stacking order (S, I, C, R, D).
    pub fn values(&self) -> [f64; 5] {
        [
            self.susceptible,
            self.infected,
            self.clinical,
            self.recovered,
            self.death,
        ]
    }
}

impl fmt::Display for TrajectoryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day={:>3} | S={:>10.0}  I={:>8.0}  C={:>8.0}  R={:>8.0}  D={:>8.0}",
            self.day, self.susceptible, self.infected, self.clinical, self.recovered, self.death,
        )
    }
}

/// Monthly-sampled time series, ordered by increasing day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trajectory {
    rows: Vec<TrajectoryRow>,
}

impl Trajectory {
    /// Creates an empty trajectory with room for `capacity` rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Whether `day` is a recording day for a run of `sim_days` days.
    pub fn is_sample_day(day: u32, sim_days: u32) -> bool {
        day % 31 == 0 || day == sim_days
    }

    /// Number of rows a run of `sim_days` days records.
    pub fn expected_len(sim_days: u32) -> usize {
        let months = (sim_days / 31) as usize;
        if sim_days % 31 == 0 { months } else { months + 1 }
    }

    pub(crate) fn push(&mut self, row: TrajectoryRow) {
        debug_assert!(self.rows.last().is_none_or(|last| last.day < row.day));
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[TrajectoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&TrajectoryRow> {
        self.rows.last()
    }

    /// Recorded days, in order.
    pub fn days(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.day).collect()
    }

    pub fn susceptible(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.susceptible).collect()
    }

    pub fn infected(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.infected).collect()
    }

    pub fn clinical(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.clinical).collect()
    }

    pub fn recovered(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.recovered).collect()
    }

    pub fn death(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.death).collect()
    }

    /// Rows whose day falls in `from..=to`.
    pub fn range(&self, from: u32, to: u32) -> impl Iterator<Item = &TrajectoryRow> {
        self.rows
            .iter()
            .filter(move |r| r.day >= from && r.day <= to)
    }
}
