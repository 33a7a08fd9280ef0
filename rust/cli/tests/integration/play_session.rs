use crate::helpers::cli_runner::CliRunner;

use std::fs;

#[test]
fn p1_quit_ends_with_interrupted_code() {
    let cli = CliRunner::new();
    let res = cli.run_with_input(&["play", "--seed", "8", "--bots", "1", "--name", "ann"], "q\n");
    assert_eq!(res.exit_code, 130, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Seed: 8"));
    assert!(res.stdout.contains("Your pocket cards:"));
    assert!(res.stdout.contains("Leaving the table"));
}

#[test]
fn p2_end_of_input_folds_out() {
    let cli = CliRunner::new();
    let res = cli.run_with_input(&["play", "--seed", "3", "--bots", "2"], "");
    assert_eq!(res.exit_code, 130);
    assert!(res.stdout.contains("Input closed"));
}

#[test]
fn p3_bad_answers_are_reprompted() {
    let cli = CliRunner::new();
    let res = cli.run_with_input(
        &["play", "--seed", "5", "--bots", "1"],
        "maybe\nhelp\nq\n",
    );
    assert!(res.stdout.contains("Unrecognized action: maybe"));
    assert!(res.stdout.contains("Actions:"));
}

#[test]
fn p4_history_is_written() {
    let cli = CliRunner::new();
    let res = cli.run_with_input(
        &["play", "--seed", "9", "--bots", "1", "--history", "hands.jsonl"],
        "allin\nallin\nallin\nallin\nallin\nallin\nallin\nallin\nq\n",
    );
    assert!(res.exit_code == 0 || res.exit_code == 130, "stderr={}", res.stderr);
    let content = fs::read_to_string(cli.dir().join("hands.jsonl")).unwrap();
    assert!(content.lines().count() >= 1);
    for line in content.lines() {
        let v: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(v["seed"].as_u64(), Some(9));
    }
}
