use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tariffs(base: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tariffs").unwrap();
    cmd.env("TARIFF_ADVISOR_DATA_DIR", base.path())
        .env_remove("TARIFF_ADVISOR_ADMIN_ID")
        .env("RUST_LOG", "warn");
    cmd
}

fn calc(base: &TempDir, name: &str, years: &str) -> Command {
    let mut cmd = tariffs(base);
    cmd.args([
        "--admin-chat-id",
        "77",
        "calc",
        "--current",
        "1000",
        "--new",
        "600",
        "--cost",
        "3000",
        "--years",
        years,
        "--name",
        name,
        "--user-id",
        "5",
    ]);
    cmd
}

#[test]
fn config_prints_paths() {
    let base = TempDir::new().unwrap();

    tariffs(&base)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("History log:"))
        .stdout(predicate::str::contains("Max months:       1200"))
        .stdout(predicate::str::contains("Created default settings"));

    let saved = std::fs::read_to_string(base.path().join("config.json")).unwrap();
    assert!(saved.contains("\"max_months\": 1200"));

    tariffs(&base)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default settings").not());
}

#[test]
fn invalid_timestamp_format_is_reported() {
    let base = TempDir::new().unwrap();
    std::fs::write(
        base.path().join("config.json"),
        r#"{"timestamp_format": "%Q"}"#,
    )
    .unwrap();

    tariffs(&base)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp format"));
}

#[test]
fn calc_delivers_reports_and_logs_history() {
    let base = TempDir::new().unwrap();

    calc(&base, "Ivan Petrov", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Payback: 8 months."))
        .stdout(predicate::str::contains(
            "Total savings over 12 months: 1800 RUB",
        ))
        .stdout(predicate::str::contains("Calculation from Ivan Petrov"));

    let outbox = base.path().join("outbox");
    assert!(outbox.join("5").join("benefit.pdf").exists());
    assert!(outbox.join("5").join("benefit.xlsx").exists());
    assert!(outbox.join("77").join("user_benefit.pdf").exists());
    assert!(outbox.join("77").join("user_benefit.xlsx").exists());

    let log = std::fs::read_to_string(base.path().join("data").join("history.csv")).unwrap();
    assert!(log.starts_with("date,user,current_rate"));
    assert_eq!(log.lines().count(), 2);
}

#[test]
fn calc_rejects_period_above_bound() {
    let base = TempDir::new().unwrap();

    calc(&base, "Ivan", "200")
        .assert()
        .failure()
        .stderr(predicate::str::contains("too long"));

    assert!(!base.path().join("data").join("history.csv").exists());
}

#[test]
fn history_reports_missing_log() {
    let base = TempDir::new().unwrap();

    tariffs(&base)
        .args(["history", "--name", "Ivan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History is empty."));
}

#[test]
fn history_lists_and_exports_user_rows() {
    let base = TempDir::new().unwrap();
    calc(&base, "Ivan", "1").assert().success();
    calc(&base, "Anna", "2").assert().success();

    let export = base.path().join("ivan.xlsx");
    tariffs(&base)
        .args(["history", "--name", "Ivan", "--output"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("1800"))
        .stdout(predicate::str::contains("History exported to:"));
    assert!(export.exists());

    tariffs(&base)
        .args(["history", "--name", "Boris"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations recorded for Boris."));
}

#[test]
fn chat_runs_the_wizard_from_stdin() {
    let base = TempDir::new().unwrap();

    tariffs(&base)
        .args(["chat", "--user-id", "3", "--name", "Anna"])
        .write_stdin("/start\n1000\nlots\n600\n3000\n1\n/history\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a number."))
        .stdout(predicate::str::contains("Payback: 8 months."))
        .stdout(predicate::str::contains("my_history.xlsx"));

    assert!(base
        .path()
        .join("outbox")
        .join("3")
        .join("my_history.xlsx")
        .exists());
}
