//! Scenario files, presets, and the CLI end to end.

mod common;

use std::path::Path;
use std::process::Command;

use tb_sim::config::ScenarioConfig;
use tb_sim::sim::summary::EpidemicSummary;

fn load(name: &str) -> ScenarioConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(format!("{name}.toml"));
    ScenarioConfig::from_toml_file(&path).expect("scenario file should parse")
}

#[test]
fn scenario_files_match_presets() {
    for name in ScenarioConfig::PRESETS {
        let from_file = load(name);
        let preset = ScenarioConfig::from_preset(name).expect("preset should exist");
        assert_eq!(from_file, preset, "scenarios/{name}.toml drifted from preset");
        assert!(from_file.validate().is_empty());
    }
}

#[test]
fn presets_run_to_completion() {
    for name in ScenarioConfig::PRESETS {
        let cfg = load(name);
        let inputs = cfg.inputs();
        let out = common::run(&inputs, cfg.simulation.seed);
        assert_eq!(out.trajectory.len(), 12, "{name}");
        assert_eq!(out.trajectory.last().map(|r| r.day), Some(365));
    }
}

#[test]
fn outbreak_accrues_deaths() {
    let cfg = load("outbreak");
    let inputs = cfg.inputs();
    let out = common::run(&inputs, cfg.simulation.seed);
    let summary = EpidemicSummary::from_trajectory(&out.trajectory, inputs.init_death);
    assert!(summary.deaths_during_run >= 1.0, "{summary}");
    assert!(summary.peak_clinical > 0.0);
}

#[test]
fn cli_prints_report_and_exports_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let trajectory = dir.path().join("trajectory.csv");
    let params = dir.path().join("params.csv");
    let chart = dir.path().join("chart.json");

    let output = Command::new(env!("CARGO_BIN_EXE_tb-sim"))
        .args(["--preset", "baseline", "--sim-days", "62", "--seed", "3"])
        .arg("--trajectory-out")
        .arg(&trajectory)
        .arg("--params-out")
        .arg(&params)
        .arg("--chart-out")
        .arg(&chart)
        .output()
        .expect("binary should run");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TB Transmission Simulation Report"));
    assert!(stdout.contains("--- Epidemic Summary ---"));

    let csv = std::fs::read_to_string(&trajectory).expect("trajectory csv");
    assert_eq!(csv.lines().count(), 3);
    let params_csv = std::fs::read_to_string(&params).expect("params csv");
    assert_eq!(params_csv.lines().count(), 14);
    let chart_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&chart).expect("chart json"))
            .expect("valid json");
    assert_eq!(chart_json["kind"], "stacked_area");
}

#[test]
fn cli_rejects_invalid_inputs() {
    let output = Command::new(env!("CARGO_BIN_EXE_tb-sim"))
        .args(["--population", "100", "--init-infected", "60", "--init-clinical", "60"])
        .output()
        .expect("binary should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceed population"), "{stderr}");
}
