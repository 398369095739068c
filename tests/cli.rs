use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn monitor(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense-monitor").unwrap();
    cmd.env("EXPENSE_MONITOR_DATA_DIR", dir.path())
        .env_remove("EXPENSE_MONITOR_LOG");
    cmd
}

fn run(dir: &TempDir, args: &[&str]) {
    monitor(dir).args(args).assert().success();
}

fn expenses_file(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("data").join("expenses.csv")
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

#[test]
fn test_summary_against_budget() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["expense", "add", "2025-11-02", "Coffee at Cafe", "4.50"]);
    run(&dir, &["expense", "add", "2025-11-03", "Uber ride", "12.00"]);
    run(&dir, &["budget", "set", "2025-11", "Food", "50"]);

    monitor(&dir)
        .args(["summary", "--month", "2025-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Month: 2025-11"))
        .stdout(predicate::str::is_match(r"Food\s+50\.00\s+4\.50\s+45\.50\s+OK").unwrap())
        .stdout(predicate::str::is_match(r"Transport\s+12\.00\s+NO BUDGET").unwrap())
        .stdout(predicate::str::contains("WARNING").not());
}

#[test]
fn test_summary_warns_when_exceeded() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["expense", "add", "2025-11-01", "Monthly rent", "900"]);
    run(&dir, &["budget", "set", "2025-11", "Housing", "850"]);

    monitor(&dir)
        .args(["summary", "--year", "2025", "--month-number", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BUDGET EXCEEDED"))
        .stdout(predicate::str::contains("-50.00"))
        .stdout(predicate::str::contains("WARNING: Budget exceeded in: Housing"));
}

#[test]
fn test_summary_empty_month() {
    let dir = TempDir::new().unwrap();
    monitor(&dir)
        .args(["summary", "--month", "2024-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found for month '2024-01'."));
}

#[test]
fn test_summary_rejects_month_number_out_of_range() {
    let dir = TempDir::new().unwrap();
    monitor(&dir)
        .args(["summary", "--year", "2025", "--month-number", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 01 and 12"));
}

#[test]
fn test_summary_json_output_file() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["expense", "add", "2025-11-02", "Coffee", "4.50"]);
    run(&dir, &["budget", "set", "2025-11", "Food", "50"]);

    let output = dir.path().join("summary.json");
    monitor(&dir)
        .args(["summary", "--month", "2025-11", "--format", "json", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("written to"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["rows"][0]["category"], "Food");
    assert_eq!(value["rows"][0]["remaining"], "45.50");
}

#[test]
fn test_summary_csv() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["expense", "add", "2025-11-02", "Coffee", "4.50"]);

    monitor(&dir)
        .args(["summary", "--month", "2025-11", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "month,category,budget,spent,remaining,status",
        ))
        .stdout(predicate::str::contains("2025-11,Food,,4.50,,NO BUDGET"));
}

#[test]
fn test_expense_import_reports_counts() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bank.csv");
    write(
        &input,
        "date,description,amount\n\
         2025-11-02,Coffee at Cafe,4.50\n\
         \n\
         2025-11-03,Uber ride,abc\n\
         bad-date,Taxi,3.00\n\
         2025-11-04,Cinema,10\n",
    );

    monitor(&dir)
        .args(["expense", "import"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Loaded 2 expense(s). Skipped 2 invalid row(s).",
        ));

    let saved = fs::read_to_string(expenses_file(&dir)).unwrap();
    assert!(saved.starts_with("date,description,amount,category,month"));
    assert!(saved.contains("2025-11-04,Cinema,10.00,Entertainment,2025-11"));
}

#[test]
fn test_import_missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    monitor(&dir)
        .args(["expense", "import", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_import_empty_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.csv");
    write(&input, "");

    monitor(&dir)
        .args(["budget", "import"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File is empty"));
}

#[test]
fn test_expense_list_edit_delete() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["expense", "add", "2025-11-02", "Coffee", "4.50"]);
    run(&dir, &["expense", "add", "2025-11-03", "Bus ticket", "2.00"]);
    run(&dir, &["expense", "add", "2025-12-01", "Taxi", "9.00"]);

    monitor(&dir)
        .args(["expense", "list", "--month", "2025-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bus ticket"))
        .stdout(predicate::str::contains("Taxi").not())
        .stdout(predicate::str::contains("2 expense(s), total 6.50"));

    monitor(&dir)
        .args(["expense", "edit", "2025-11", "2", "--description", "Cinema night"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Entertainment]"));

    monitor(&dir)
        .args(["expense", "delete", "2025-11", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense: 2025-11-02  Coffee"));

    monitor(&dir)
        .args(["expense", "delete", "2025-11", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expense not found"));

    let saved = fs::read_to_string(expenses_file(&dir)).unwrap();
    assert!(!saved.contains("Coffee"));
    assert!(saved.contains("Cinema night"));
}

#[test]
fn test_expense_add_rejects_bad_amount() {
    let dir = TempDir::new().unwrap();
    monitor(&dir)
        .args(["expense", "add", "2025-11-02", "Coffee", "four"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount: 'four'"));
    assert!(!expenses_file(&dir).exists());
}

#[test]
fn test_budget_list_edit_remove() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["budget", "set", "2025-11", "transport", "30"]);
    run(&dir, &["budget", "set", "2025-11", "Food", "100"]);

    let listing = monitor(&dir)
        .args(["budget", "list", "--month", "2025-11"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let listing = String::from_utf8(listing).unwrap();
    assert!(listing.find("Food").unwrap() < listing.find("transport").unwrap());

    monitor(&dir)
        .args(["budget", "edit", "2025-11", "transport", "--rename", "Transport", "--amount", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated budget: 2025-11 Transport 40.00"));

    monitor(&dir)
        .args(["budget", "remove", "2025-11", "Food"])
        .assert()
        .success();

    let saved = fs::read_to_string(dir.path().join("data").join("budgets.csv")).unwrap();
    assert_eq!(saved, "month,category,budget\n2025-11,Transport,40.00\n");
}

#[test]
fn test_category_add_and_test() {
    let dir = TempDir::new().unwrap();

    monitor(&dir)
        .args(["category", "test", "Gym membership"])
        .assert()
        .success()
        .stdout("Other\n");

    monitor(&dir)
        .args(["category", "add", "Health", "--keywords", "gym, pharmacy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added category: Health (gym, pharmacy)"));

    monitor(&dir)
        .args(["category", "test", "Gym membership"])
        .assert()
        .success()
        .stdout("Health\n");

    monitor(&dir)
        .args(["category", "add", "health", "--keywords", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_category_rename_carries_budgets_and_expenses() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["expense", "add", "2025-11-02", "Coffee", "4.50"]);
    run(&dir, &["budget", "set", "2025-11", "Food", "50"]);

    // Food is the third default rule
    monitor(&dir)
        .args(["category", "edit", "3", "--rename", "Dining"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed category: Food -> Dining"));

    monitor(&dir)
        .args(["summary", "--month", "2025-11"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Dining\s+50\.00\s+4\.50\s+45\.50\s+OK").unwrap());
}

#[test]
fn test_invalid_working_rows_are_kept() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    let original = "date,description,amount\n2025-11-02,Coffee,4.50\n2025-11-03,Taxi,12.O0\n";
    write(&expenses_file(&dir), original);

    monitor(&dir)
        .args(["expense", "list", "--month", "2025-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 expense(s), total 4.50"))
        .stderr(predicate::str::contains("invalid rows in working file were skipped"));

    monitor(&dir)
        .args(["expense", "add", "2025-11-04", "Bus", "1.00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 invalid row(s) (line 3)"));

    assert_eq!(fs::read_to_string(expenses_file(&dir)).unwrap(), original);

    // The budget file is clean, so budgets can still change
    run(&dir, &["budget", "set", "2025-11", "Food", "50"]);
}

#[test]
fn test_rule_changes_apply_on_next_run() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["expense", "add", "2025-11-02", "Coffee", "4.50"]);

    // Food is the third default rule
    monitor(&dir)
        .args(["category", "delete", "3"])
        .assert()
        .success()
        .stdout("Deleted category: Food\n");

    monitor(&dir)
        .args(["expense", "list", "--month", "2025-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Other"))
        .stdout(predicate::str::contains("Food").not());

    monitor(&dir)
        .args(["category", "recategorize"])
        .assert()
        .failure();
}

#[test]
fn test_category_list() {
    let dir = TempDir::new().unwrap();
    monitor(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Housing"))
        .stdout(predicate::str::contains("uber, taxi"));
}

#[test]
fn test_chart() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["expense", "add", "2025-11-02", "Coffee", "4.50"]);
    run(&dir, &["budget", "set", "2025-11", "Food", "10"]);

    monitor(&dir)
        .args(["chart", "--month", "2025-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spending by Category (2025-11)"))
        .stdout(predicate::str::contains("(| marks the budget)"));
}

#[test]
fn test_global_expense_file_override() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("custom.csv");

    monitor(&dir)
        .arg("--expenses")
        .arg(&custom)
        .args(["expense", "add", "2025-11-02", "Coffee", "4.50"])
        .assert()
        .success();

    assert!(custom.exists());
    assert!(!expenses_file(&dir).exists());
}

#[test]
fn test_config_shows_paths() {
    let dir = TempDir::new().unwrap();
    monitor(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Monitor Configuration"))
        .stdout(predicate::str::contains("expenses.csv"));
}
