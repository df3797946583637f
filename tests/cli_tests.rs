use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "payday";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
        cmd.env("PAYDAY_BUDGET_DIR", self.dir.path().join("config"));
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn new_budget(&self, document: &Path, period: &str) {
        self.command()
            .arg("new")
            .arg(document)
            .args(["--period", period, "--template", "single"])
            .assert()
            .success();
    }
}

fn rollover_line_id(document: &Path, budget_index: usize) -> String {
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(document).unwrap()).unwrap();
    json["budgets"][budget_index]["lines"]
        .as_array()
        .unwrap()
        .iter()
        .find(|line| line["origin"]["type"] == "rollover")
        .and_then(|line| line["id"].as_str())
        .unwrap()
        .to_string()
}

#[test]
fn period_follows_pay_day() {
    let ws = Workspace::new();
    ws.command()
        .args(["period", "--date", "2025-01-27", "--pay-day", "27"])
        .assert()
        .success()
        .stdout(contains("2025-01-27 belongs to 2025-02"))
        .stdout(contains("February 2025 (2025-01-27 to 2025-02-26)"));

    ws.command()
        .args(["period", "--date", "2025-01-26", "--pay-day", "27"])
        .assert()
        .success()
        .stdout(contains("belongs to 2025-01"));
}

#[test]
fn period_defaults_to_calendar_month() {
    let ws = Workspace::new();
    ws.command()
        .args(["period", "--date", "2024-12-28"])
        .assert()
        .success()
        .stdout(contains("belongs to 2024-12"))
        .stdout(contains("calendar month"));
}

#[test]
fn summary_counts_savings_as_expenses() {
    let ws = Workspace::new();
    let document = ws.file("budgets.json");
    ws.new_budget(&document, "2025-01");

    ws.command()
        .arg("summary")
        .arg(&document)
        .args(["--period", "2025-01"])
        .assert()
        .success()
        .stdout(contains("$5000.00"))
        .stdout(contains("$2870.00"))
        .stdout(contains("$2130.00"));

    ws.command()
        .arg("summary")
        .arg(&document)
        .args(["--period", "2025-01", "--rollover", "-200"])
        .assert()
        .success()
        .stdout(contains("$4800.00"))
        .stdout(contains("$1930.00"));
}

#[test]
fn new_rejects_duplicate_period() {
    let ws = Workspace::new();
    let document = ws.file("budgets.yaml");
    ws.new_budget(&document, "2025-03");

    ws.command()
        .arg("new")
        .arg(&document)
        .args(["--period", "2025-03"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn new_rejects_unknown_template_and_period() {
    let ws = Workspace::new();
    let document = ws.file("budgets.json");

    ws.command()
        .arg("new")
        .arg(&document)
        .args(["--period", "2025-01", "--template", "millionaire"])
        .assert()
        .failure()
        .stderr(contains("not found"));

    ws.command()
        .arg("new")
        .arg(&document)
        .args(["--period", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
    assert!(!document.exists());
}

#[test]
fn table_shows_running_balance_and_exports_csv() {
    let ws = Workspace::new();
    let document = ws.file("budgets.json");
    ws.new_budget(&document, "2025-01");

    ws.command()
        .args(["line", "add"])
        .arg(&document)
        .args(["--name", "Birthday gift", "--kind", "expense", "--amount", "80"])
        .args(["--recurrence", "one_off", "--period", "2025-01"])
        .assert()
        .success()
        .stdout(contains("Added expense 'Birthday gift'"));

    ws.command()
        .arg("table")
        .arg(&document)
        .args(["--period", "2025-01"])
        .assert()
        .success()
        .stdout(contains("Birthday gift"))
        .stdout(contains("$2050.00"))
        .stdout(contains("Includes one-off lines"));

    let csv = ws.file("table.csv");
    ws.command()
        .arg("table")
        .arg(&document)
        .args(["--period", "2025-01", "--output"])
        .arg(&csv)
        .assert()
        .success();
    let content = fs::read_to_string(&csv).unwrap();
    assert!(content.starts_with("item_type,id,name,kind,recurrence,date,amount,cumulative_balance"));
    assert!(content.contains("Birthday gift,expense,one_off,,80.00"));
}

#[test]
fn rollover_carries_balance_and_locks_line() {
    let ws = Workspace::new();
    let document = ws.file("budgets.json");
    ws.new_budget(&document, "2025-01");
    ws.new_budget(&document, "2025-02");

    ws.command()
        .arg("rollover")
        .arg(&document)
        .assert()
        .success()
        .stdout(contains("Rollover applied to 1 budget(s)"))
        .stdout(contains("$4260.00"));

    ws.command()
        .arg("summary")
        .arg(&document)
        .args(["--period", "2025-02"])
        .assert()
        .success()
        .stdout(contains("$2130.00"))
        .stdout(contains("$4260.00"));

    let id = rollover_line_id(&document, 1);
    ws.command()
        .args(["line", "edit"])
        .arg(&document)
        .arg(&id)
        .args(["--amount", "5", "--period", "2025-02"])
        .assert()
        .failure()
        .stderr(contains("locked"));

    ws.command()
        .args(["line", "remove"])
        .arg(&document)
        .arg(&id)
        .args(["--period", "2025-02"])
        .assert()
        .failure()
        .stderr(contains("locked"));

    // Editing a rollover row never puts it in edit mode
    ws.command()
        .arg("table")
        .arg(&document)
        .args(["--period", "2025-02", "--editing"])
        .arg(&id)
        .assert()
        .success()
        .stdout(contains("* Rollover from 2025-01"))
        .stdout(contains("> ").not());
}

#[test]
fn transactions_land_in_pay_day_period() {
    let ws = Workspace::new();
    let document = ws.file("budgets.json");

    ws.command()
        .args(["config", "--pay-day", "27"])
        .assert()
        .success()
        .stdout(contains("day 27"));

    ws.new_budget(&document, "2025-02");

    ws.command()
        .args(["txn", "add"])
        .arg(&document)
        .args(["--name", "Dinner", "--amount", "40", "--date", "2025-01-28"])
        .assert()
        .success()
        .stdout(contains("in 2025-02"));

    ws.command()
        .arg("summary")
        .arg(&document)
        .args(["--period", "2025-02"])
        .assert()
        .success()
        .stdout(contains("1 transactions"))
        .stdout(contains("$2090.00"));

    // No budget for the calendar month of the date
    ws.command()
        .args(["txn", "add"])
        .arg(&document)
        .args(["--name", "Coffee", "--amount", "4", "--date", "2025-01-10"])
        .assert()
        .failure()
        .stderr(contains("Budget not found: 2025-01"));
}

#[test]
fn export_formats() {
    let ws = Workspace::new();
    let document = ws.file("budgets.json");
    ws.new_budget(&document, "2025-01");

    ws.command()
        .arg("export")
        .arg(&document)
        .args(["--format", "yaml"])
        .assert()
        .success()
        .stdout(contains("# payday-budget export"))
        .stdout(contains("schema_version"));

    ws.command()
        .arg("export")
        .arg(&document)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(contains("period,item_type,id"))
        .stdout(contains("2025-01,budget_line"));

    let output = ws.file("export.json");
    ws.command()
        .arg("export")
        .arg(&document)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["metadata"]["budget_count"], 1);
    assert_eq!(json["balances"][0]["metrics"]["ending_balance"], 213000);
}

#[test]
fn delete_removes_budget_with_its_items() {
    let ws = Workspace::new();
    let document = ws.file("budgets.json");
    ws.new_budget(&document, "2025-01");
    ws.new_budget(&document, "2025-02");

    ws.command()
        .arg("delete")
        .arg(&document)
        .args(["--period", "2025-01"])
        .assert()
        .failure()
        .stderr(contains("--force"));

    ws.command()
        .arg("delete")
        .arg(&document)
        .args(["--period", "2025-01", "--force"])
        .assert()
        .success()
        .stdout(contains("Deleted budget 2025-01 (6 lines, 0 transactions)"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&document).unwrap()).unwrap();
    let budgets = json["budgets"].as_array().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0]["period"]["month"], 2);

    ws.command()
        .arg("summary")
        .arg(&document)
        .args(["--period", "2025-01"])
        .assert()
        .failure()
        .stderr(contains("Budget not found: 2025-01"));

    ws.command()
        .arg("delete")
        .arg(&document)
        .args(["--period", "2025-01", "--force"])
        .assert()
        .failure()
        .stderr(contains("Budget not found"));
}

#[test]
fn templates_lists_builtins() {
    let ws = Workspace::new();
    ws.command()
        .arg("templates")
        .assert()
        .success()
        .stdout(contains("single (default)"))
        .stdout(contains("couple").and(contains("student")));
}
