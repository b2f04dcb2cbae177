//! CLI command integration tests.
//! SSZ_CONFIG is cleared for every run so the host environment cannot leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ssz_cmd() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("ssz").unwrap();
    cmd.env_remove("SSZ_CONFIG");
    cmd
}

fn json_output(args: &[&str]) -> serde_json::Value {
    let output = ssz_cmd().arg("--json").args(args).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("ssz.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn constants_show_earth_defaults() {
    ssz_cmd()
        .arg("constants")
        .assert()
        .success()
        .stdout(predicate::str::contains("r_s:"))
        .stdout(predicate::str::contains("8.870e-3"));
}

#[test]
fn qubit_json_reports_surface_density() {
    let v = json_output(&["qubit", "--height", "0"]);
    let xi = v["xi"].as_f64().unwrap();
    assert!((xi - 6.961e-10).abs() / 6.961e-10 < 1e-3, "xi = {xi}");
    assert_eq!(v["regime"], "weak");
    assert!(v["effective_t2"].as_f64().unwrap() < 100e-6);
}

#[test]
fn qubit_accepts_negative_height() {
    ssz_cmd()
        .args(["qubit", "--height", "-100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("regime:           weak"));
}

#[test]
fn pair_text_output() {
    ssz_cmd()
        .args(["pair", "--height-a", "0", "--height-b", "0.001", "--gates", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rad/gate"))
        .stdout(predicate::str::contains("Bell fidelity"))
        .stdout(predicate::str::contains("on B"))
        .stdout(predicate::str::contains("coherent zone:    yes"));
}

#[test]
fn pair_json_phase_drift() {
    let v = json_output(&["pair", "--height-a", "0", "--height-b", "0.001"]);
    let drift = v["mismatch"]["phase_drift_per_gate"].as_f64().unwrap();
    assert!((drift - 1.72e-16).abs() / 1.72e-16 < 1e-2, "drift = {drift}");
    assert!(v["entanglement"]["characteristic_time"].as_f64().is_some());
}

#[test]
fn same_height_pair_has_no_correction() {
    let v = json_output(&["pair", "--height-a", "2", "--height-b", "2"]);
    assert_eq!(v["mismatch"]["phase_drift_per_gate"].as_f64().unwrap(), 0.0);
    assert!(v["correction"].is_null());
    assert!(v["entanglement"]["characteristic_time"].is_null());
}

#[test]
fn zone_width_at_surface() {
    let v = json_output(&["zone", "--center", "0", "--epsilon", "1e-18"]);
    let width = v["zone_width"].as_f64().unwrap();
    assert!((width - 18.3e-3).abs() / 18.3e-3 < 1e-2, "width = {width}");
    assert_eq!(v["zone"]["h_min"].as_f64().unwrap(), 0.0);
    assert_eq!(v["formula_matches"], true);
}

#[test]
fn zone_rejects_zero_epsilon() {
    ssz_cmd()
        .args(["zone", "--epsilon", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("epsilon must be positive"));
}

#[test]
fn negative_heights_reach_validation() {
    ssz_cmd()
        .args(["pair", "--height-a", "-1", "--height-b", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("center height must be non-negative"));

    ssz_cmd()
        .args(["zone", "--center", "-0.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("center height must be non-negative"));
}

#[test]
fn array_layout_and_uniformity() {
    ssz_cmd()
        .args(["array", "--count", "9", "--height", "0", "--spacing", "0.001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Q000"))
        .stdout(predicate::str::contains("Q008"))
        .stdout(predicate::str::contains("uniformity:       1.0"));

    let v = json_output(&["array", "--count", "4"]);
    assert_eq!(v["qubits"].as_array().unwrap().len(), 4);
    assert_eq!(v["uniformity"]["xi_std"].as_f64().unwrap(), 0.0);
}

#[test]
fn stability_checks_pass() {
    ssz_cmd()
        .arg("stability")
        .assert()
        .success()
        .stdout(predicate::str::contains("demonstrated:   true"))
        .stdout(predicate::str::contains("linear:         true"));
}

#[test]
fn config_file_changes_frequency() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "qubit_frequency_hz = 10e9\n");

    let base = json_output(&["pair", "--height-a", "0", "--height-b", "1"]);
    let output = ssz_cmd()
        .arg("--config")
        .arg(&path)
        .args(["--json", "pair", "--height-a", "0", "--height-b", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let tuned: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let ratio = tuned["mismatch"]["phase_drift_per_gate"].as_f64().unwrap()
        / base["mismatch"]["phase_drift_per_gate"].as_f64().unwrap();
    assert!((ratio - 2.0).abs() < 1e-9, "ratio = {ratio}");
}

#[test]
fn config_from_environment() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[constants]\nreference_mass = 0.0\n");
    ssz_cmd()
        .env("SSZ_CONFIG", &path)
        .args(["--json", "constants"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schwarzschild_radius\": 0.0"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "regime_cutover = -1.0\n");
    ssz_cmd()
        .arg("--config")
        .arg(&path)
        .arg("constants")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"))
        .stderr(predicate::str::contains("regime_cutover"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    ssz_cmd()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("constants")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn verbose_logs_to_stderr() {
    ssz_cmd()
        .args(["--verbose", "constants"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Earth defaults"));
}
