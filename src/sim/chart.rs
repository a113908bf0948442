//! Renderer-agnostic description of the stacked-area chart of a run.

use serde::Serialize;

use super::types::Trajectory;

pub const CHART_TITLE: &str = "TB Transmission Simulation";
pub const X_LABEL: &str = "Days";
pub const Y_LABEL: &str = "Population";

/// Series labels in stacking order, bottom to top.
pub const STACK_ORDER: [&str; 5] = ["Susceptible", "Infected", "Clinical", "Recovered", "Death"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    StackedArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    UpperLeft,
}

/// One stacked layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

/// Everything a front end needs to draw the compartments over time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: LegendPosition,
    /// Sampled days, shared by every series.
    pub x: Vec<u32>,
    /// Layers in [`STACK_ORDER`].
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Builds the stacked-area spec from a sampled trajectory.
    pub fn stacked_area(trajectory: &Trajectory) -> Self {
        let columns = [
            trajectory.susceptible(),
            trajectory.infected(),
            trajectory.clinical(),
            trajectory.recovered(),
            trajectory.death(),
        ];
        let series = STACK_ORDER
            .iter()
            .zip(columns)
            .map(|(label, values)| Series {
                label: (*label).to_string(),
                values,
            })
            .collect();

        Self {
            kind: ChartKind::StackedArea,
            title: CHART_TITLE.to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            legend: LegendPosition::UpperLeft,
            x: trajectory.days(),
            series,
        }
    }
}
