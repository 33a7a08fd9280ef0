use crate::helpers::cli_runner::CliRunner;

use serde_json::Value;
use std::fs;

#[test]
fn i1_cfg_shows_defaults() {
    let cli = CliRunner::new();
    let res = cli.run(&["cfg"]);
    assert_eq!(res.exit_code, 0);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();

    assert_eq!(json["small_blind"]["value"].as_u64(), Some(250));
    assert_eq!(json["small_blind"]["source"].as_str(), Some("default"));
    assert_eq!(json["bot"]["value"].as_str(), Some("simple"));
    assert_eq!(json["input_policy"]["value"].as_str(), Some("reprompt"));
    assert!(json["seed"]["value"].is_null());
}

#[test]
fn i2_env_beats_file() {
    let cli = CliRunner::new();
    let path = cli.dir().join("showdown.toml");
    fs::write(&path, "seed = 7\nbots = 4\nbot = \"random\"\n").unwrap();
    let path = path.to_string_lossy().into_owned();

    let res = cli.run_with_env(
        &["cfg"],
        &[("SHOWDOWN_CONFIG", path.as_str()), ("SHOWDOWN_SEED", "99")],
    );
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["seed"]["value"].as_u64(), Some(99));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["bots"]["value"].as_u64(), Some(4));
    assert_eq!(json["bots"]["source"].as_str(), Some("file"));
    assert_eq!(json["bot"]["value"].as_str(), Some("random"));
}

#[test]
fn i3_flags_beat_env() {
    let cli = CliRunner::new();
    let env = [("SHOWDOWN_SEED", "1")];
    let from_env = cli.run_with_env(&["sim", "--bots", "2", "--quiet"], &env);
    let from_flag = cli.run_with_env(&["sim", "--bots", "2", "--quiet", "--seed", "2"], &env);
    assert!(from_env.stdout.starts_with("Seed: 1\n"));
    assert!(from_flag.stdout.starts_with("Seed: 2\n"));
}

#[test]
fn i4_invalid_config_fails() {
    let cli = CliRunner::new();
    let res = cli.run_with_env(&["cfg"], &[("SHOWDOWN_BOTS", "12")]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Configuration error"));

    let res = cli.run_with_env(&["cfg"], &[("SHOWDOWN_INPUT_POLICY", "ask")]);
    assert_eq!(res.exit_code, 2);
}

#[test]
fn i5_huge_small_blind_is_refused_before_play() {
    let cli = CliRunner::new();
    let res = cli.run_with_env(
        &["sim", "--seed", "1", "--quiet"],
        &[("SHOWDOWN_SMALL_BLIND", "60000000")],
    );
    assert_eq!(res.exit_code, 2, "stderr={}", res.stderr);
    assert!(res.stderr.contains("small_blind must be at most"));
    assert!(!res.stderr.contains("panicked"));
    assert!(res.stdout.is_empty());

    let res = cli.run_with_input(&["play", "--small-blind", "60000000"], "q\n");
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Configuration error"));
}
