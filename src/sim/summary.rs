//! Post-hoc epidemic indicators computed from a sampled trajectory.

use std::fmt;

use serde::Serialize;

use super::types::Trajectory;

/// Aggregate indicators derived from a completed run.
///
/// Computed from the recorded rows only, so the values match what a
/// front end displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpidemicSummary {
    /// Highest recorded clinical count.
    pub peak_clinical: f64,
    /// Day of `peak_clinical` (first occurrence).
    pub peak_clinical_day: u32,
    /// Highest recorded infected count.
    pub peak_infected: f64,
    /// Day of `peak_infected` (first occurrence).
    pub peak_infected_day: u32,
    pub final_susceptible: f64,
    pub final_infected: f64,
    pub final_clinical: f64,
    pub final_recovered: f64,
    pub final_death: f64,
    /// Deaths accrued during the run (final minus initial).
    pub deaths_during_run: f64,
}

impl EpidemicSummary {
    /// Computes the summary from a trajectory and the initial death count.
    ///
    /// # Arguments
    ///
    /// * `trajectory` - Sampled rows of a completed run
    /// * `init_death` - Deaths already counted at day 0
    pub fn from_trajectory(trajectory: &Trajectory, init_death: f64) -> Self {
        let Some(last) = trajectory.last() else {
            return Self {
                peak_clinical: 0.0,
                peak_clinical_day: 0,
                peak_infected: 0.0,
                peak_infected_day: 0,
                final_susceptible: 0.0,
                final_infected: 0.0,
                final_clinical: 0.0,
                final_recovered: 0.0,
                final_death: 0.0,
                deaths_during_run: 0.0,
            };
        };

        let mut peak_clinical = f64::NEG_INFINITY;
        let mut peak_clinical_day = 0;
        let mut peak_infected = f64::NEG_INFINITY;
        let mut peak_infected_day = 0;

        for r in trajectory.rows() {
            if r.clinical > peak_clinical {
                peak_clinical = r.clinical;
                peak_clinical_day = r.day;
            }
            if r.infected > peak_infected {
                peak_infected = r.infected;
                peak_infected_day = r.day;
            }
        }

        Self {
            peak_clinical,
            peak_clinical_day,
            peak_infected,
            peak_infected_day,
            final_susceptible: last.susceptible,
            final_infected: last.infected,
            final_clinical: last.clinical,
            final_recovered: last.recovered,
            final_death: last.death,
            deaths_during_run: (last.death - init_death).max(0.0),
        }
    }
}

impl fmt::Display for EpidemicSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Epidemic Summary ---")?;
        writeln!(
            f,
            "Peak clinical:         {:.0} (day {})",
            self.peak_clinical, self.peak_clinical_day
        )?;
        writeln!(
            f,
            "Peak infected:         {:.0} (day {})",
            self.peak_infected, self.peak_infected_day
        )?;
        writeln!(
            f,
            "Final S/I/C/R/D:       {:.0} / {:.0} / {:.0} / {:.0} / {:.0}",
            self.final_susceptible,
            self.final_infected,
            self.final_clinical,
            self.final_recovered,
            self.final_death
        )?;
        write!(f, "Deaths during run:     {:.0}", self.deaths_during_run)
    }
}
