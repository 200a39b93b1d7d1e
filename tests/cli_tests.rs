//! CLI integration tests.

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;
use tradefill::testkit::config::PAPER_TOML;

fn tradefill() -> Command {
    let mut cmd = cargo_bin_cmd!("tradefill");
    cmd.env("TRADEFILL_SIGNER", "PRIVATE_KEY").env_remove("RUST_LOG");
    cmd
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

fn run_args(config: &NamedTempFile, amount: &str) -> Vec<String> {
    let path = config.path().to_string_lossy().into_owned();
    [
        "run",
        "--config",
        path.as_str(),
        "--direction",
        "buy",
        "--market",
        "MARKET_ADDRESS",
        "--outcome",
        "2",
        "--amount",
        amount,
        "--price",
        "0.5",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

#[test]
fn help_lists_commands() {
    tradefill()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tradefill"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_prints_name() {
    tradefill()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tradefill"));
}

#[test]
fn config_validate_accepts_good_file() {
    let config = config_file(PAPER_TOML);

    tradefill()
        .args(["config", "validate", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn config_validate_reports_bad_field() {
    let config = config_file("[market]\nnum_ticks = 0\n");

    tradefill()
        .args(["config", "validate", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("num_ticks"));
}

#[test]
fn config_show_emits_json() {
    let config = config_file(PAPER_TOML);

    tradefill()
        .args(["--json", "config", "show", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_orders_per_trade\":1"))
        .stdout(predicate::str::contains("TRADEFILL_SIGNER").not());
}

#[test]
fn run_fills_across_transactions() {
    let config = config_file(PAPER_TOML);

    tradefill()
        .arg("--json")
        .args(run_args(&config, "10"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"sent\"").count(3))
        .stdout(predicate::str::contains("\"type\":\"report\""))
        .stdout(predicate::str::contains("0x7e00"));
}

#[test]
fn run_prints_human_report() {
    let config = config_file(PAPER_TOML);

    tradefill()
        .args(run_args(&config, "10"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Fill Report"))
        .stdout(predicate::str::contains("Filled in"));
}

#[test]
fn take_only_run_fails_when_book_is_exhausted() {
    let config = config_file(PAPER_TOML);

    tradefill()
        .args(run_args(&config, "15"))
        .arg("--take-only")
        .assert()
        .failure()
        .stderr(predicate::str::contains("filled nothing"));
}

#[test]
fn run_requires_signer() {
    let config = config_file(PAPER_TOML);

    tradefill()
        .env_remove("TRADEFILL_SIGNER")
        .args(run_args(&config, "10"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("TRADEFILL_SIGNER"));
}

#[test]
fn run_rejects_non_positive_amount() {
    let config = config_file(PAPER_TOML);

    tradefill()
        .args(run_args(&config, "0"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount must be positive"));
}

#[test]
fn zero_overrides_are_rejected() {
    let config = config_file(PAPER_TOML);

    for flag in ["--max-iterations", "--num-ticks"] {
        tradefill()
            .args(run_args(&config, "10"))
            .args([flag, "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(flag))
            .stdout(predicate::str::contains("\"type\":\"sent\"").not());
    }
}

#[test]
fn iteration_override_caps_run() {
    let config = config_file(PAPER_TOML);

    tradefill()
        .args(run_args(&config, "10"))
        .args(["--max-iterations", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gave up after 2 transactions"));
}
