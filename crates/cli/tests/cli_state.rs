use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;

#[test]
fn cli_import_then_export_round_trips_through_state_dir() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");
    let csv_in = dir.path().join("in.csv");
    fs::write(
        &csv_in,
        "Input Parameter,Value\nMonthly Website Visitors,123456\nNot A Parameter,5\nNumber of CMS Systems,abc\n",
    )
    .unwrap();

    let mut import = cargo_bin_cmd!("valuecalc");
    import.current_dir(dir.path()).env("NO_COLOR", "1").args([
        "import-csv",
        "--preset",
        "ecommerce",
        "--state-dir",
        state.to_str().unwrap(),
        "--input",
        csv_in.to_str().unwrap(),
    ]);
    import
        .assert()
        .success()
        .stdout(predicate::str::contains("updated=1 skipped=2"));

    assert!(state.join("inputs-ecommerce.json").exists());

    let mut export = cargo_bin_cmd!("valuecalc");
    export.current_dir(dir.path()).env("NO_COLOR", "1").args([
        "export-csv",
        "--preset",
        "ecommerce",
        "--state-dir",
        state.to_str().unwrap(),
    ]);
    export
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Input Parameter,Value\n"))
        .stdout(predicate::str::contains("Monthly Website Visitors,123456\n"))
        .stdout(predicate::str::contains("Number of CMS Systems,2\n"));
}

#[test]
fn cli_reset_discards_saved_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");

    let mut save = cargo_bin_cmd!("valuecalc");
    save.current_dir(dir.path()).env("NO_COLOR", "1").args([
        "evaluate",
        "--preset",
        "platform",
        "--set",
        "numberOfCMS=4",
        "--save",
        "--state-dir",
        state.to_str().unwrap(),
        "--out",
        dir.path().join("out").to_str().unwrap(),
    ]);
    save.assert().success();
    assert!(state.join("inputs-platform.json").exists());

    let mut reset = cargo_bin_cmd!("valuecalc");
    reset.current_dir(dir.path()).env("NO_COLOR", "1").args([
        "reset",
        "--preset",
        "platform",
        "--state-dir",
        state.to_str().unwrap(),
    ]);
    reset.assert().success();
    assert!(!state.join("inputs-platform.json").exists());
    assert!(!state.join("drivers-platform.json").exists());
}

#[test]
fn cli_lookup_applies_confirmed_suggestions() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");
    let responses = dir.path().join("responses");
    fs::create_dir_all(&responses).unwrap();
    fs::write(
        responses.join("example.com.json"),
        r#"{"success":true,"data":{"name":"Example","industry":"Retail","monthlyVisitors":90000,"numberOfCMS":5}}"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("valuecalc");
    cmd.current_dir(dir.path()).env("NO_COLOR", "1").args([
        "lookup",
        "--preset",
        "marketing",
        "--state-dir",
        state.to_str().unwrap(),
        "--query",
        "Example.com",
        "--responses-dir",
        responses.to_str().unwrap(),
        "--apply",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("status=ready fields=2 applied=true"));

    let saved: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(state.join("inputs-marketing.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(saved["monthlyVisitors"], 90000.0);
    assert_eq!(saved["numberOfCMS"], 5.0);
    assert_eq!(saved["avgRevenuePerConversion"], 5000.0);
}

#[test]
fn cli_lookup_without_data_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let responses = dir.path().join("responses");
    fs::create_dir_all(&responses).unwrap();

    let mut cmd = cargo_bin_cmd!("valuecalc");
    cmd.current_dir(dir.path()).env("NO_COLOR", "1").args([
        "lookup",
        "--query",
        "Nobody Ltd",
        "--responses-dir",
        responses.to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("status=no_data"))
        .stderr(predicate::str::contains("no data"));
}

#[test]
fn cli_config_supplies_preset_and_horizon() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("valuecalc.toml"),
        "preset = \"lifeblood\"\nhorizon = 5\ncurrency = \"AUD\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("valuecalc");
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .args(["evaluate", "--output-format", "markdown"]);
    cmd.assert().success();

    let md = fs::read_to_string(dir.path().join("valuecalc-out/report.md")).unwrap();
    assert!(md.contains("- model: `lifeblood`"));
    assert!(md.contains("- 5_year_benefit: `A$"));
    assert!(md.contains("- additional_donations: `150,000` (`75,000 L`)"));
}
