use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Runs in an empty directory so no stray `configurator.*` file is picked up.
fn pcfg(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pcfg"));
    cmd.current_dir(dir.path()).env_remove("RUST_LOG").args(["--log-level", "warn"]);
    cmd
}

/// A one-pair model whose reverse matrix forgets an exclusion.
fn write_asymmetric_document(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("lopsided.json");
    let document = r#"{
        "definition": {
            "id": "lopsided",
            "name": "Lopsided",
            "slug": "lopsided",
            "steps": [
                { "id": "colour", "title": "Colour", "options": [
                    { "id": "R", "label": "Red", "code": "R" },
                    { "id": "G", "label": "Green", "code": "G" } ] },
                { "id": "label", "title": "Label", "options": [
                    { "id": "HF", "label": "Heart and flame", "code": "HF" },
                    { "id": "EM", "label": "Emergency", "code": "EM" } ] }
            ],
            "stepOrder": ["colour", "label"],
            "schema": { "baseCode": "L", "partsOrder": ["colour", "label"] }
        },
        "constraints": {
            "model": "lopsided",
            "constraints": [
                { "source": "colour", "target": "label", "matrix": { "R": ["HF"] } },
                { "source": "label", "target": "colour", "matrix": {} }
            ]
        }
    }"#;
    fs::write(&path, document).unwrap();
    path
}

#[test]
fn models_lists_the_builtin_catalog() {
    let dir = TempDir::new().unwrap();
    pcfg(&dir)
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("global-reset"))
        .stdout(predicate::str::contains("codes, 18 false positives)"))
        .stdout(predicate::str::contains("universal-stopper"));
}

#[test]
fn steps_show_option_codes() {
    let dir = TempDir::new().unwrap();
    pcfg(&dir)
        .args(["steps", "reset-call-point"])
        .assert()
        .success()
        .stdout(predicate::str::contains("label: Label (required)"))
        .stdout(predicate::str::contains("(no code)"));
}

#[test]
fn configure_reports_cascades_and_the_code() {
    let dir = TempDir::new().unwrap();
    pcfg(&dir)
        .args(["configure", "global-reset", "colour=1", "text=RM", "colour=0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("colour=0 cleared text"))
        .stdout(predicate::str::contains("code:     GLR0"))
        .stdout(predicate::str::contains("complete: no (missing cover, text, language)"));

    pcfg(&dir)
        .args(["configure", "global-reset", "colour=1", "cover=01", "text=EM", "language=EN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("code:     GLR101EM-EN"))
        .stdout(predicate::str::contains("status:   valid"));
}

#[test]
fn configure_emits_json() {
    let dir = TempDir::new().unwrap();
    let output = pcfg(&dir)
        .args(["configure", "reset-call-point", "colour=R", "mounting=S2", "electricalArrangement=02", "label=HF"])
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["product"]["code"], "RP-RS2-02");
    assert_eq!(report["product"]["isComplete"], true);
    assert_eq!(report["validity"]["status"], "valid");
}

#[test]
fn configure_rejects_unknown_options() {
    let dir = TempDir::new().unwrap();
    pcfg(&dir)
        .args(["configure", "global-reset", "colour=9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Selecting colour=9"));

    pcfg(&dir).args(["configure", "global-reset", "colour"]).assert().failure();
}

#[test]
fn parse_and_validate_product_codes() {
    let dir = TempDir::new().unwrap();
    pcfg(&dir)
        .args(["parse", "reset-call-point", "RP-OS2-11-EV"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mounting=S2"))
        .stdout(predicate::str::contains("label=EV"));

    pcfg(&dir).args(["validate", "reset-call-point", "RP-RS2-02"]).assert().success().stdout("valid: RP-RS2-02\n");

    pcfg(&dir)
        .args(["validate", "reset-call-point", "RP-GF-11-EM"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No manufactured product matches code RP-GF-11-EM"));

    pcfg(&dir)
        .args(["validate", "global-reset", "GLR0RM"])
        .assert()
        .failure();

    pcfg(&dir)
        .args(["parse", "reset-call-point", "RP-RS2-02-HF"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a ReSet Call Point product code"));
}

#[test]
fn false_positives_are_listed() {
    let dir = TempDir::new().unwrap();
    pcfg(&dir)
        .args(["false-positives", "waterproof-call-point"])
        .assert()
        .success()
        .stdout("WRP2-G-11-EX\nWRP2-W-11-CU\n");
}

#[test]
fn strict_registries_refuse_broken_documents() {
    let dir = TempDir::new().unwrap();
    let document = write_asymmetric_document(&dir);

    pcfg(&dir)
        .arg("--document")
        .arg(&document)
        .arg("models")
        .assert()
        .failure()
        .stderr(predicate::str::contains("colour=R excludes label=EM, but label=EM permits colour=R"));
}

#[test]
fn environment_overrides_relax_strict_mode() {
    let dir = TempDir::new().unwrap();
    let document = write_asymmetric_document(&dir);

    pcfg(&dir)
        .env("PCFG__REGISTRY__STRICT", "false")
        .arg("--document")
        .arg(&document)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("ok    global-reset"))
        .stdout(predicate::str::contains("FAIL  lopsided"))
        .stdout(predicate::str::contains("colour=R excludes label=EM"));
}

#[test]
fn config_files_are_layered_under_the_environment() {
    let dir = TempDir::new().unwrap();
    let document = write_asymmetric_document(&dir);
    let config = dir.path().join("configurator.toml");
    fs::write(
        &config,
        format!(
            "[registry]\nstrict = false\n\n[catalog]\nbuiltin = false\ndocuments = [{:?}]\n",
            document.display().to_string()
        ),
    )
    .unwrap();

    pcfg(&dir).arg("models").assert().success().stdout(predicate::str::contains("lopsided"));
    pcfg(&dir).env("PCFG__REGISTRY__STRICT", "true").arg("models").assert().failure();
}

#[test]
fn explicit_config_files_are_reported_once_logging_is_up() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("settings.toml");
    fs::write(&config, "[registry]\nstrict = true\n").unwrap();

    Command::new(env!("CARGO_BIN_EXE_pcfg"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["--log-level", "info", "--config"])
        .arg(&config)
        .arg("models")
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration loaded"))
        .stderr(predicate::str::contains("settings.toml"))
        .stdout(predicate::str::contains("Configuration loaded").not());
}
