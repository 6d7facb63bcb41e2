//! Integration tests for the fitplan binary.
//!
//! These tests verify end-to-end behavior including:
//! - Plan sectioning and item extraction output
//! - Prompt construction from profile files
//! - Saving and listing plans in the archive

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PLAN: &str = "# Personalized Fitness Plan for Asha

## Introduction
A balanced week built around home workouts.

### Day 1: Lower Body
#### Workout
* Squats: 3 sets of 12 reps
* Glute bridges: 3x15
#### Meals
* Breakfast: Oats with banana
* Lunch: Rajma chawal

### Day 2: Upper Body
#### Workout
* Push-ups: 3x10
* Band rows: 3 sets of 12
#### Meals
* Breakfast: Poha
* Dinner: Paneer tikka, salad

## Key Considerations & Tips for Your Journey
* Sleep at least 7 hours
* Drink water through the day

## Motivational Quote
*\"Small steps every day\"*
";

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fitplan"))
}

fn write_plan(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("plan.md");
    fs::write(&path, PLAN).expect("Failed to write plan");
    path
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Section and mine AI-generated fitness plans",
        ));
}

#[test]
fn test_parse_file_to_json() {
    let temp_dir = setup_test_dir();
    let plan_path = write_plan(&temp_dir);

    let assert = cli().arg("parse").arg(&plan_path).assert().success();
    let json = stdout_json(assert.get_output());

    assert_eq!(json["days"].as_array().unwrap().len(), 2);
    assert_eq!(json["days"][0]["title"], "Day 1: Lower Body");
    assert!(json["intro"]
        .as_str()
        .unwrap()
        .ends_with("A balanced week built around home workouts."));
    assert!(json["tipsAndSuccess"]
        .as_str()
        .unwrap()
        .starts_with("## Key Considerations & Tips for Your Journey"));
}

#[test]
fn test_parse_stdin_without_headings() {
    let assert = cli()
        .arg("parse")
        .write_stdin("just some text\nmore text")
        .assert()
        .success();
    let json = stdout_json(assert.get_output());

    assert_eq!(json["intro"], "just some text\nmore text");
    assert_eq!(json["days"].as_array().unwrap().len(), 0);
    assert_eq!(json["tipsAndSuccess"], "");
}

#[test]
fn test_parse_summary() {
    cli()
        .arg("parse")
        .arg("-")
        .arg("--summary")
        .write_stdin(PLAN)
        .assert()
        .success()
        .stdout(predicate::str::contains("Days: 2"))
        .stdout(predicate::str::contains("2. Day 2: Upper Body"));
}

#[test]
fn test_items_per_day() {
    let assert = cli().arg("items").write_stdin(PLAN).assert().success();
    let json = stdout_json(assert.get_output());

    assert_eq!(json[0]["title"], "Day 1: Lower Body");
    assert_eq!(json[0]["workouts"], serde_json::json!(["Squats", "Glute bridges"]));
    assert_eq!(json[0]["meals"], serde_json::json!(["Oats with banana", "Rajma chawal"]));
    assert_eq!(json[1]["workouts"], serde_json::json!(["Push-ups", "Band rows"]));
    assert_eq!(json[1]["meals"], serde_json::json!(["Poha", "Paneer tikka"]));
}

#[test]
fn test_items_single_day_out_of_range() {
    cli()
        .arg("items")
        .arg("--day")
        .arg("9")
        .write_stdin(PLAN)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Day 9 not found"));
}

#[test]
fn test_images_one_request_per_item() {
    let assert = cli()
        .arg("images")
        .arg("--day")
        .arg("1")
        .write_stdin(PLAN)
        .assert()
        .success();
    let json = stdout_json(assert.get_output());

    let requests = json[0]["requests"].as_array().unwrap();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0]["kind"], "workout");
    assert_eq!(requests[3]["kind"], "meal");
    assert!(requests[0]["request"]["inputs"]
        .as_str()
        .unwrap()
        .starts_with("Cinematic shot of Squats, context is Day 1: Lower Body"));
}

#[test]
fn test_images_use_config_file() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[images]\nnum_inference_steps = 40\n").unwrap();

    let assert = cli()
        .arg("images")
        .arg("--config")
        .arg(&config_path)
        .write_stdin(PLAN)
        .assert()
        .success();
    let json = stdout_json(assert.get_output());

    assert_eq!(json[1]["requests"][0]["request"]["parameters"]["num_inference_steps"], 40);
}

#[test]
fn test_speak_day() {
    cli()
        .arg("speak")
        .arg("--day")
        .arg("2")
        .write_stdin(PLAN)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Day 2: Upper Body. Workout. Push-ups: 3x10.",
        ));
}

#[test]
fn test_prompt_from_profile() {
    let temp_dir = setup_test_dir();
    let profile_path = temp_dir.path().join("profile.toml");
    fs::write(
        &profile_path,
        r#"
name = "Asha"
age = 29
height = 165
weight = 62
gender = "Female"
goal = "Muscle Gain"
level = "Intermediate"
location = "Home"
diet = "Veg"
"#,
    )
    .unwrap();

    cli()
        .arg("prompt")
        .arg("--profile")
        .arg(&profile_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("- Name: Asha"))
        .stdout(predicate::str::contains("- Stress Level: Normal"))
        .stdout(predicate::str::contains(
            "## Key Considerations & Tips for Your Journey",
        ));

    let assert = cli()
        .arg("prompt")
        .arg("--profile")
        .arg(&profile_path)
        .arg("--request")
        .assert()
        .success();
    let json = stdout_json(assert.get_output());
    assert_eq!(json["model"], "llama-3.3-70b-versatile");
    assert_eq!(json["messages"][0]["role"], "user");
}

#[test]
fn test_prompt_rejects_invalid_profile() {
    let temp_dir = setup_test_dir();
    let profile_path = temp_dir.path().join("profile.json");
    fs::write(
        &profile_path,
        r#"{"name":"Jo","age":12,"height":170,"weight":70,"gender":"Male",
            "goal":"Maintenance","level":"Beginner","location":"Gym","diet":"Keto"}"#,
    )
    .unwrap();

    cli()
        .arg("prompt")
        .arg("--profile")
        .arg(&profile_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Age must be between 16 and 99."));
}

#[test]
fn test_save_and_list() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    let plan_path = write_plan(&temp_dir);

    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved plans."));

    cli()
        .arg("save")
        .arg(&plan_path)
        .arg("--title")
        .arg("Week one")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved plan"))
        .stdout(predicate::str::contains("Days: 2"));

    cli()
        .arg("save")
        .arg("--data-dir")
        .arg(&data_dir)
        .write_stdin(PLAN)
        .assert()
        .success();

    let archive = fs::read_to_string(data_dir.join("plans.jsonl")).unwrap();
    assert_eq!(archive.lines().count(), 2);
    assert!(archive.contains("\"plan_json\""));

    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Week one (2 days)"))
        .stdout(predicate::str::contains("My 7-day Fitness Plan (2 days)"));
}
