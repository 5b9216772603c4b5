use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn euchre() -> Command {
    Command::cargo_bin("euchre").expect("binary built")
}

#[test]
fn seeded_game_runs_to_completion() {
    euchre()
        .args(["--seed", "7", "--all-pass", "redeal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Table 'local' seed 7 playing to 10"))
        .stdout(predicate::str::contains("Round 1: dealer "))
        .stdout(predicate::str::contains("Game over after"));
}

#[test]
fn validate_only_skips_the_game() {
    euchre()
        .arg("--validate-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation-only mode"))
        .stdout(predicate::str::contains("Round").not());
}

#[test]
fn rejects_unknown_all_pass_rule() {
    euchre()
        .args(["--all-pass", "shrug"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown all-pass rule"));
}

#[test]
fn rejects_zero_target_score() {
    euchre()
        .args(["--target-score", "0", "--validate-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("game.target_score"));
}

#[test]
fn writes_report_from_yaml_config() {
    let dir = tempdir().expect("temp dir");
    let config_path = dir.path().join("table.yaml");
    let report_path = dir.path().join("reports").join("short.json");
    let yaml = format!(
        r#"
run_id: "short_game"
game:
  seed: 11
  target_score: 3
  all_pass: redeal
players:
  - name: "ann"
    kind: "naive"
  - name: "bob"
    kind: "naive"
    params:
      min_suit_count: 1
  - name: "cat"
    kind: "naive"
  - name: "dan"
    kind: "naive"
outputs:
  report: "{report}"
"#,
        report = report_path.display()
    );
    fs::write(&config_path, yaml).expect("write config");

    euchre()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Loaded table 'short_game' with players ann, bob, cat, dan",
        ))
        .stdout(predicate::str::contains("Report:"));

    let json = fs::read_to_string(&report_path).expect("report written");
    let report: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(report["seed"], 11);
    assert_eq!(report["players"][1], "bob");
    let rounds = report["rounds"].as_array().expect("rounds array");
    assert!(!rounds.is_empty());
    let scores = report["status"]["scores"].as_array().expect("scores");
    assert!(scores.iter().any(|score| score.as_u64().unwrap_or(0) >= 3));
}

#[test]
fn missing_config_file_fails() {
    euchre()
        .args(["--config", "no/such/table.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}
