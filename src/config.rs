//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::sim::types::SimulationInputs;

/// Largest `sim_days` a scenario may request.
pub const MAX_SIM_DAYS: u32 = 365;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Run length and random seed.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Initial compartment sizes.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Epidemiological controls.
    #[serde(default)]
    pub epidemic: EpidemicConfig,
}

/// Run length and random seed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Seed for the per-run rate draws.
    pub seed: u64,
    /// Number of days to simulate (1..=365).
    pub sim_days: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sim_days: 365,
        }
    }
}

/// Initial compartment sizes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopulationConfig {
    /// Total population (must be > 0).
    pub population: f64,
    pub init_infected: f64,
    pub init_clinical: f64,
    pub init_recovered: f64,
    pub init_death: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            population: 1000.0,
            init_infected: 10.0,
            init_clinical: 5.0,
            init_recovered: 0.0,
            init_death: 0.0,
        }
    }
}

/// Epidemiological controls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EpidemicConfig {
    /// Target basic reproduction number.
    pub basic_reproduction_number: f64,
}

impl Default for EpidemicConfig {
    fn default() -> Self {
        Self {
            basic_reproduction_number: 1.5,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.sim_days"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: 1 000 people, 15 initial cases, R0 1.5, one year.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            population: PopulationConfig::default(),
            epidemic: EpidemicConfig::default(),
        }
    }

    /// Returns the outbreak preset: high transmission seeded by contagious cases.
    pub fn outbreak() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            population: PopulationConfig {
                population: 10_000.0,
                init_infected: 20.0,
                init_clinical: 50.0,
                ..PopulationConfig::default()
            },
            epidemic: EpidemicConfig {
                basic_reproduction_number: 3.0,
            },
        }
    }

    /// Returns the endemic preset: a large population with prior recoveries at R0 1.
    pub fn endemic() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            population: PopulationConfig {
                population: 100_000.0,
                init_infected: 2_000.0,
                init_clinical: 300.0,
                init_recovered: 5_000.0,
                init_death: 100.0,
            },
            epidemic: EpidemicConfig {
                basic_reproduction_number: 1.0,
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "outbreak", "endemic"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "outbreak" => Ok(Self::outbreak()),
            "endemic" => Ok(Self::endemic()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Covers the
    /// engine's own preconditions plus the `sim_days` bound, which the
    /// engine leaves to its callers.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if !(1..=MAX_SIM_DAYS).contains(&s.sim_days) {
            errors.push(ConfigError::new(
                "simulation.sim_days",
                format!("must be in [1, {MAX_SIM_DAYS}], got {}", s.sim_days),
            ));
        }

        let p = &self.population;
        if !(p.population.is_finite() && p.population > 0.0) {
            errors.push(ConfigError::new("population.population", "must be > 0"));
        }
        for (field, value) in [
            ("population.init_infected", p.init_infected),
            ("population.init_clinical", p.init_clinical),
            ("population.init_recovered", p.init_recovered),
            ("population.init_death", p.init_death),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(ConfigError::new(field, "must be >= 0"));
            }
        }
        let cases = p.init_infected + p.init_clinical + p.init_recovered + p.init_death;
        if cases > p.population {
            errors.push(ConfigError::new(
                "population",
                format!(
                    "initial cases ({cases}) exceed population ({})",
                    p.population
                ),
            ));
        }

        let r0 = self.epidemic.basic_reproduction_number;
        if !(r0.is_finite() && r0 >= 0.0) {
            errors.push(ConfigError::new(
                "epidemic.basic_reproduction_number",
                "must be >= 0",
            ));
        }

        errors
    }

    /// Engine inputs described by this scenario.
    pub fn inputs(&self) -> SimulationInputs {
        SimulationInputs {
            population: self.population.population,
            init_infected: self.population.init_infected,
            init_clinical: self.population.init_clinical,
            init_recovered: self.population.init_recovered,
            init_death: self.population.init_death,
            basic_reproduction_number: self.epidemic.basic_reproduction_number,
            sim_days: self.simulation.sim_days,
        }
    }

    /// Scenario describing `inputs` run with `seed`; the inverse of [`Self::inputs`].
    pub fn from_inputs(inputs: &SimulationInputs, seed: u64) -> Self {
        Self {
            simulation: SimulationConfig {
                seed,
                sim_days: inputs.sim_days,
            },
            population: PopulationConfig {
                population: inputs.population,
                init_infected: inputs.init_infected,
                init_clinical: inputs.init_clinical,
                init_recovered: inputs.init_recovered,
                init_death: inputs.init_death,
            },
            epidemic: EpidemicConfig {
                basic_reproduction_number: inputs.basic_reproduction_number,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn baseline_matches_default_inputs() {
        assert_eq!(ScenarioConfig::baseline().inputs(), SimulationInputs::default());
    }

    #[test]
    fn inputs_round_trip_through_scenario() {
        let cfg = ScenarioConfig::outbreak();
        let back = ScenarioConfig::from_inputs(&cfg.inputs(), cfg.simulation.seed);
        assert_eq!(back, cfg);
    }

    #[test]
    fn sim_days_outside_bounds_rejected() {
        for days in [0, MAX_SIM_DAYS + 1, u32::MAX] {
            let inputs = SimulationInputs {
                sim_days: days,
                ..SimulationInputs::default()
            };
            let errors = ScenarioConfig::from_inputs(&inputs, 1).validate();
            assert_eq!(errors.len(), 1, "sim_days={days}: {errors:?}");
            assert_eq!(errors[0].field, "simulation.sim_days");
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
        assert_eq!(e.field, "preset");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn outbreak_transmits_harder() {
        let base = ScenarioConfig::baseline();
        let outbreak = ScenarioConfig::outbreak();
        assert!(
            outbreak.epidemic.basic_reproduction_number > base.epidemic.basic_reproduction_number
        );
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
seed = 7
sim_days = 62

[population]
population = 500
init_infected = 4
init_clinical = 2
init_recovered = 1
init_death = 0

[epidemic]
basic_reproduction_number = 2.5
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let inputs = cfg.ok().map(|c| c.inputs());
        assert_eq!(inputs.as_ref().map(|i| i.population), Some(500.0));
        assert_eq!(inputs.as_ref().map(|i| i.sim_days), Some(62));
        assert_eq!(
            inputs.as_ref().map(|i| i.basic_reproduction_number),
            Some(2.5)
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[simulation]
seed = 99
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.seed), Some(99));
        assert_eq!(cfg.as_ref().map(|c| c.simulation.sim_days), Some(365));
        assert_eq!(cfg.as_ref().map(|c| c.population.population), Some(1000.0));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[population]
population = 100
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_sim_days_bounds() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.sim_days = 0;
        assert!(cfg.validate().iter().any(|e| e.field == "simulation.sim_days"));
        cfg.simulation.sim_days = 366;
        assert!(cfg.validate().iter().any(|e| e.field == "simulation.sim_days"));
    }

    #[test]
    fn validation_catches_excess_cases() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.population.population = 100.0;
        cfg.population.init_infected = 60.0;
        cfg.population.init_clinical = 60.0;
        assert!(cfg.validate().iter().any(|e| e.field == "population"));
    }

    #[test]
    fn validation_allows_cases_equal_to_population() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.population.population = 20.0;
        cfg.population.init_infected = 10.0;
        cfg.population.init_clinical = 10.0;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validation_catches_non_positive_population() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.population.population = 0.0;
        assert!(
            cfg.validate()
                .iter()
                .any(|e| e.field == "population.population")
        );
    }

    #[test]
    fn validation_catches_negative_r0() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.epidemic.basic_reproduction_number = -1.0;
        assert!(
            cfg.validate()
                .iter()
                .any(|e| e.field == "epidemic.basic_reproduction_number")
        );
    }

    #[test]
    fn error_display_names_field() {
        let e = ConfigError::new("simulation.sim_days", "must be in [1, 365], got 0");
        assert_eq!(
            e.to_string(),
            "config error: simulation.sim_days: must be in [1, 365], got 0"
        );
    }
}
