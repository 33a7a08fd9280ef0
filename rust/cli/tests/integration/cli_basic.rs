use crate::helpers::cli_runner::CliRunner;

#[test]
fn c1_help_lists_every_command() {
    let cli = CliRunner::new();
    let res = cli.run(&["--help"]);
    assert_eq!(res.exit_code, 0);
    for cmd in ["play", "sim", "eval", "deal", "cfg"] {
        assert!(res.stdout.contains(cmd), "missing {} in help", cmd);
    }
}

#[test]
fn c2_unknown_command_is_a_usage_error() {
    let cli = CliRunner::new();
    let res = cli.run(&["replay"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Usage: showdown <command>"));
    assert!(res.stdout.is_empty());
}

#[test]
fn c3_deal_is_deterministic_per_seed() {
    let cli = CliRunner::new();
    let a = cli.run(&["deal", "--seed", "42", "--players", "3"]);
    let b = cli.run(&["deal", "--seed", "42", "--players", "3"]);
    assert_eq!(a.exit_code, 0);
    assert_eq!(a.stdout, b.stdout);
    assert!(a.stdout.contains("Seat  3:"));
}

#[test]
fn c4_eval_reports_rank_and_outs() {
    let cli = CliRunner::new();
    let res = cli.run(&["eval", "--cards", "Ah Kh Qh Jh 2c"]);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Category: High card"));
    assert!(res.stdout.contains("Straight flush"));
}

#[test]
fn c5_eval_rejects_bad_cards() {
    let cli = CliRunner::new();
    let res = cli.run(&["eval", "--cards", "Ah Kh 1x"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.starts_with("Error: Invalid input"));
}

#[test]
fn c6_logs_stay_off_stdout() {
    let cli = CliRunner::new();
    let res = cli.run_with_env(
        &["sim", "--seed", "4", "--bots", "2", "--quiet"],
        &[("RUST_LOG", "showdown_engine=debug")],
    );
    assert_eq!(res.exit_code, 0);
    assert!(res.stderr.contains("match started"));
    assert!(!res.stdout.contains("match started"));
}
