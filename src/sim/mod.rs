/// Stacked-area chart description.
pub mod chart;
pub mod engine;
pub mod error;
/// Labelled parameter record.
pub mod params;
pub mod rates;
pub mod summary;
pub mod types;

pub use engine::{Engine, SimulationOutput, simulate};
pub use error::SimError;
pub use types::{SimulationInputs, Trajectory, TrajectoryRow};
