//! TB simulator entry point: CLI wiring and config-driven runs.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tb_sim::config::ScenarioConfig;
use tb_sim::io::export::{export_json, export_params_csv, export_trajectory_csv};
use tb_sim::report::SimulationReport;
use tb_sim::sim::engine::simulate;

/// Compartmental tuberculosis transmission simulator.
///
/// Runs a daily-stepped model of five compartments (Susceptible, Infected,
/// Clinical, Recovered, Death) with per-run random transition rates, and
/// prints a report of the monthly-sampled trajectory.
#[derive(Parser, Debug)]
#[command(name = "tb-sim", version, about, long_about = None)]
struct Cli {
    /// Load scenario from TOML config file
    #[arg(long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, outbreak, endemic)
    #[arg(long)]
    preset: Option<String>,

    /// Override random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override total population
    #[arg(long)]
    population: Option<f64>,

    /// Override initial infected count
    #[arg(long)]
    init_infected: Option<f64>,

    /// Override initial clinical count
    #[arg(long)]
    init_clinical: Option<f64>,

    /// Override initial recovered count
    #[arg(long)]
    init_recovered: Option<f64>,

    /// Override initial death count
    #[arg(long)]
    init_death: Option<f64>,

    /// Override basic reproduction number
    #[arg(long = "r0")]
    basic_reproduction_number: Option<f64>,

    /// Override number of simulated days
    #[arg(long)]
    sim_days: Option<u32>,

    /// Export the trajectory to CSV
    #[arg(long)]
    trajectory_out: Option<PathBuf>,

    /// Export the parameter record to CSV
    #[arg(long)]
    params_out: Option<PathBuf>,

    /// Export the stacked-area chart to JSON
    #[arg(long)]
    chart_out: Option<PathBuf>,

    /// Start REST API server after simulation
    #[cfg(feature = "api")]
    #[arg(long)]
    serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

impl Cli {
    fn apply_overrides(&self, scenario: &mut ScenarioConfig) {
        if let Some(seed) = self.seed {
            scenario.simulation.seed = seed;
        }
        if let Some(days) = self.sim_days {
            scenario.simulation.sim_days = days;
        }
        let p = &mut scenario.population;
        for (target, value) in [
            (&mut p.population, self.population),
            (&mut p.init_infected, self.init_infected),
            (&mut p.init_clinical, self.init_clinical),
            (&mut p.init_recovered, self.init_recovered),
            (&mut p.init_death, self.init_death),
        ] {
            if let Some(v) = value {
                *target = v;
            }
        }
        if let Some(r0) = self.basic_reproduction_number {
            scenario.epidemic.basic_reproduction_number = r0;
        }
    }
}

fn load_scenario(cli: &Cli) -> Result<ScenarioConfig, String> {
    // --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name).map_err(|e| e.to_string())?
    } else {
        ScenarioConfig::baseline()
    };

    cli.apply_overrides(&mut scenario);

    let errors = scenario.validate();
    if !errors.is_empty() {
        return Err(errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"));
    }
    Ok(scenario)
}

fn export(label: &str, path: &Path, result: std::io::Result<()>) {
    match result {
        Ok(()) => info!(path = %path.display(), "{label} written"),
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to write {label}");
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let scenario = match load_scenario(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let inputs = scenario.inputs();
    let seed = scenario.simulation.seed;
    let mut rng = StdRng::seed_from_u64(seed);

    let output = match simulate(&inputs, &mut rng) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    println!("{}", SimulationReport::new(&inputs, &output));

    if let Some(ref path) = cli.trajectory_out {
        export("trajectory", path, export_trajectory_csv(&output.trajectory, path));
    }
    if let Some(ref path) = cli.params_out {
        export("parameters", path, export_params_csv(&output.params, path));
    }
    if let Some(ref path) = cli.chart_out {
        export("chart", path, export_json(&output.chart, path));
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        use tb_sim::api::{AppState, CompletedRun};

        let state = Arc::new(AppState {
            run: Some(CompletedRun::new(inputs, seed, output)),
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(tb_sim::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_replace_scenario_fields() {
        let cli = Cli::parse_from([
            "tb-sim",
            "--preset",
            "outbreak",
            "--seed",
            "9",
            "--population",
            "200",
            "--r0",
            "2.2",
            "--sim-days",
            "62",
        ]);
        let scenario = load_scenario(&cli).unwrap();
        assert_eq!(scenario.simulation.seed, 9);
        assert_eq!(scenario.simulation.sim_days, 62);
        assert_eq!(scenario.population.population, 200.0);
        assert_eq!(scenario.epidemic.basic_reproduction_number, 2.2);
        // untouched fields come from the preset
        assert_eq!(scenario.population.init_clinical, 50.0);
    }

    #[test]
    fn scenario_and_preset_conflict() {
        let parsed = Cli::try_parse_from(["tb-sim", "--scenario", "a.toml", "--preset", "baseline"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn invalid_overrides_fail_validation() {
        let cli = Cli::parse_from(["tb-sim", "--population", "100", "--init-infected", "200"]);
        assert!(load_scenario(&cli).is_err());
    }
}
