//! Plain-text run report and the value formatting shared by report consumers.

use std::fmt;

use crate::sim::engine::SimulationOutput;
use crate::sim::summary::EpidemicSummary;
use crate::sim::types::{SimulationInputs, TRAJECTORY_COLUMNS};

pub const REPORT_TITLE: &str = "TB Transmission Simulation Report";

/// A value destined for a parameter table.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float(f64),
    Integer(i64),
    Text(String),
}

/// Formats floats to 4 decimals, integers with thousands separators, text verbatim.
///
/// # Examples
///
/// ```
/// use tb_sim::report::{ParamValue, format_value};
///
/// assert_eq!(format_value(&ParamValue::Float(0.123456)), "0.1235");
/// assert_eq!(format_value(&ParamValue::Integer(1234567)), "1,234,567");
/// ```
pub fn format_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Float(v) => format!("{v:.4}"),
        ParamValue::Integer(v) => group_thousands(*v),
        ParamValue::Text(s) => s.clone(),
    }
}

fn group_thousands(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-number inputs print as integers, anything else as a float.
fn count_value(v: f64) -> ParamValue {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        ParamValue::Integer(v as i64)
    } else {
        ParamValue::Float(v)
    }
}

/// Text document describing one completed run.
///
/// Holds borrowed outputs; render it with `to_string()` or `{}`.
pub struct SimulationReport<'a> {
    inputs: &'a SimulationInputs,
    output: &'a SimulationOutput,
    summary: EpidemicSummary,
    generated_at: Option<String>,
}

impl<'a> SimulationReport<'a> {
    pub fn new(inputs: &'a SimulationInputs, output: &'a SimulationOutput) -> Self {
        Self {
            inputs,
            output,
            summary: EpidemicSummary::from_trajectory(&output.trajectory, inputs.init_death),
            generated_at: None,
        }
    }

    /// Adds a timestamp line under the title.
    pub fn generated_at(mut self, timestamp: impl Into<String>) -> Self {
        self.generated_at = Some(timestamp.into());
        self
    }

    pub fn summary(&self) -> &EpidemicSummary {
        &self.summary
    }

    fn input_rows(&self) -> [(&'static str, ParamValue); 7] {
        let i = self.inputs;
        [
            ("Total Population", count_value(i.population)),
            ("Initial Infected", count_value(i.init_infected)),
            ("Initial Clinical", count_value(i.init_clinical)),
            ("Initial Recovered", count_value(i.init_recovered)),
            ("Initial Death", count_value(i.init_death)),
            (
                "Basic Reproduction number (R0)",
                ParamValue::Float(i.basic_reproduction_number),
            ),
            ("Simulation Days", ParamValue::Integer(i64::from(i.sim_days))),
        ]
    }
}

impl fmt::Display for SimulationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {REPORT_TITLE} ===")?;
        if let Some(ts) = &self.generated_at {
            writeln!(f, "DATE: {ts}")?;
        }

        writeln!(f, "\n--- Inputs ---")?;
        for (label, value) in self.input_rows() {
            writeln!(f, "{label:<40} {:>14}", format_value(&value))?;
        }

        writeln!(f, "\n--- Parameters ---")?;
        for e in self.output.params.entries() {
            writeln!(
                f,
                "{:<40} {:>14}",
                e.label,
                format_value(&ParamValue::Float(e.value))
            )?;
        }

        writeln!(f, "\n{}", self.summary)?;

        writeln!(f, "\n--- Simulation Data (aggregated every 31 days) ---")?;
        writeln!(
            f,
            "{:>5} {:>14} {:>14} {:>14} {:>14} {:>14}",
            TRAJECTORY_COLUMNS[0],
            TRAJECTORY_COLUMNS[1],
            TRAJECTORY_COLUMNS[2],
            TRAJECTORY_COLUMNS[3],
            TRAJECTORY_COLUMNS[4],
            TRAJECTORY_COLUMNS[5],
        )?;
        for r in self.output.trajectory.rows() {
            writeln!(
                f,
                "{:>5} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
                r.day, r.susceptible, r.infected, r.clinical, r.recovered, r.death
            )?;
        }
        Ok(())
    }
}
