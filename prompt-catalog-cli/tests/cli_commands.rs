use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Command isolated from the user's home and project configuration
fn prompt_catalog(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("prompt-catalog").unwrap();
    cmd.current_dir(workdir)
        .env("HOME", workdir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn write_prompts(dir: &Path) {
    let prompts = dir.join("prompts");
    fs::create_dir_all(prompts.join("nested")).unwrap();
    fs::write(
        prompts.join("frontend-helper.md"),
        "---\ndescription: Write React components\ncategory: Dev\n---\n\n# Frontend Helper\n",
    )
    .unwrap();
    fs::write(prompts.join("nested/notes.md"), "Plain notes without metadata").unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    prompt_catalog(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compile"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("fix"));
}

#[test]
fn test_compile_writes_default_output_file() {
    let temp = TempDir::new().unwrap();
    write_prompts(temp.path());

    prompt_catalog(temp.path())
        .args(["compile", "prompts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/2] frontend-helper.md... OK"))
        .stdout(predicate::str::contains("[2/2] notes.md... OK"))
        .stdout(predicate::str::contains("Prompts compiled: 2"));

    let catalog = read_json(&temp.path().join("cherry-studio-prompts.json"));
    assert_eq!(catalog[0]["id"], "1");
    assert_eq!(catalog[0]["name"], "frontend-helper");
    assert_eq!(catalog[0]["group"], json!(["Dev"]));
    assert_eq!(catalog[1]["id"], "2");
    assert_eq!(catalog[1]["name"], "notes");
    assert_eq!(catalog[1]["group"], json!(["General"]));
}

#[test]
fn test_compile_no_recursive() {
    let temp = TempDir::new().unwrap();
    write_prompts(temp.path());

    prompt_catalog(temp.path())
        .args(["compile", "prompts", "out.json", "--no-recursive"])
        .assert()
        .success();

    let catalog = read_json(&temp.path().join("out.json"));
    assert_eq!(catalog.as_array().unwrap().len(), 1);
}

#[test]
fn test_compile_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    prompt_catalog(temp.path())
        .args(["compile", "does-not-exist"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
    assert!(!temp.path().join("cherry-studio-prompts.json").exists());
}

#[test]
fn test_compile_empty_directory_fails() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("prompts")).unwrap();
    prompt_catalog(temp.path())
        .args(["compile", "prompts"])
        .assert()
        .code(1);
}

#[test]
fn test_compile_writes_nothing_when_every_document_fails() {
    let temp = TempDir::new().unwrap();
    let prompts = temp.path().join("prompts");
    fs::create_dir_all(&prompts).unwrap();
    fs::write(prompts.join("broken.md"), [0xff, 0xfe, 0x00]).unwrap();

    prompt_catalog(temp.path())
        .args(["compile", "prompts", "out.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[1/1] broken.md... FAILED"))
        .stdout(predicate::str::contains("Errors (1):"))
        .stdout(predicate::str::contains("  - Failed to read broken.md"))
        .stderr(predicate::str::contains("No prompts compiled"));

    assert!(!temp.path().join("out.json").exists());
    assert!(!temp.path().join("cherry-studio-prompts.json").exists());
}

#[test]
fn test_compile_with_failures_skips_success_line() {
    let temp = TempDir::new().unwrap();
    write_prompts(temp.path());
    fs::write(temp.path().join("prompts/broken.md"), [0xff, 0xfe, 0x00]).unwrap();

    prompt_catalog(temp.path())
        .args(["compile", "prompts", "out.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("broken.md... FAILED"))
        .stdout(predicate::str::contains("Prompts compiled: 2"))
        .stdout(predicate::str::contains("Successfully compiled").not());

    let catalog = read_json(&temp.path().join("out.json"));
    assert_eq!(catalog.as_array().unwrap().len(), 2);
}

#[test]
fn test_compiled_catalog_has_no_errors() {
    let temp = TempDir::new().unwrap();
    write_prompts(temp.path());
    prompt_catalog(temp.path())
        .args(["compile", "prompts", "catalog.json"])
        .assert()
        .success();

    prompt_catalog(temp.path())
        .args(["validate", "catalog.json"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Errors: 0"))
        .stdout(predicate::str::contains("Validation completed with warnings"));
}

#[test]
fn test_validate_reports_errors() {
    let temp = TempDir::new().unwrap();
    let catalog = json!([
        {"id": "1", "name": "a", "description": "", "emoji": "🔧", "group": ["General"], "prompt": "---\n---\nbody"},
        {"id": "2", "description": "", "emoji": "🔧", "group": ["General"], "prompt": "---\n---\nbody"}
    ]);
    fs::write(temp.path().join("catalog.json"), catalog.to_string()).unwrap();

    prompt_catalog(temp.path())
        .args(["validate", "catalog.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Required field 'name' is missing"))
        .stdout(predicate::str::contains("Validation failed"));
}

#[test]
fn test_validate_duplicate_ids_json() {
    let temp = TempDir::new().unwrap();
    let record = |name: &str| {
        json!({"id": "3", "name": name, "description": "", "emoji": "🔧",
               "group": ["General"], "prompt": "---\n---\nbody"})
    };
    fs::write(
        temp.path().join("catalog.json"),
        json!([record("a"), record("b")]).to_string(),
    )
    .unwrap();

    let output = prompt_catalog(temp.path())
        .args(["validate", "catalog.json", "--format", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["passed"], false);
    assert_eq!(report["errors"], 1);
    let duplicates: Vec<&Value> = report["issues"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|issue| issue["message"] == "Duplicate ID found: '3'")
        .collect();
    assert_eq!(duplicates.len(), 1);
}

#[test]
fn test_validate_warnings_exit_code() {
    let temp = TempDir::new().unwrap();
    let catalog = json!([
        {"id": "7", "name": "a", "description": "", "emoji": "🔧", "group": ["General"], "prompt": "---\n---\nbody"}
    ]);
    fs::write(temp.path().join("catalog.json"), catalog.to_string()).unwrap();

    prompt_catalog(temp.path())
        .args(["validate", "catalog.json", "--verbose"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("not sequential"));
}

#[test]
fn test_validate_invalid_json_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("catalog.json"), "[{").unwrap();
    prompt_catalog(temp.path())
        .args(["validate", "catalog.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_validate_empty_catalog_succeeds() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("catalog.json"), "[]").unwrap();
    prompt_catalog(temp.path())
        .args(["validate", "catalog.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to validate"));
}

#[test]
fn test_fix_overwrites_input_and_validates() {
    let temp = TempDir::new().unwrap();
    let catalog = json!([
        {"id": "1", "name": "a", "emoji": "🔧", "group": ["General"], "prompt": "---\n---\nbody"},
        {"id": "9", "name": "code review helper"}
    ]);
    let path = temp.path().join("catalog.json");
    fs::write(&path, catalog.to_string()).unwrap();

    prompt_catalog(temp.path())
        .args(["fix", "catalog.json", "--validate-after"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changed to '2'"))
        .stdout(predicate::str::contains("Running validation"))
        .stdout(predicate::str::contains("Successfully fixed"));

    let fixed = read_json(&path);
    assert_eq!(fixed[1]["id"], "2");
    assert_eq!(fixed[1]["group"], json!(["General"]));
    assert!(fixed[1]["prompt"].as_str().unwrap().starts_with("---\n"));

    prompt_catalog(temp.path())
        .args(["validate", "catalog.json"])
        .assert()
        .stdout(predicate::str::contains("Errors: 0"));
}

#[test]
fn test_fix_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let original = json!([{"id": "5", "name": "x"}]).to_string();
    let path = temp.path().join("catalog.json");
    fs::write(&path, &original).unwrap();

    prompt_catalog(temp.path())
        .args(["fix", "catalog.json", "out.json", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run mode"));

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert!(!temp.path().join("out.json").exists());
}

#[test]
fn test_fix_empty_catalog() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("catalog.json"), "[]").unwrap();
    prompt_catalog(temp.path())
        .args(["fix", "catalog.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to fix"));
}

#[test]
fn test_fix_non_array_root_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("catalog.json"), r#"{"id": "1"}"#).unwrap();
    prompt_catalog(temp.path())
        .args(["fix", "catalog.json"])
        .assert()
        .code(1);
}

#[test]
fn test_config_file_sets_output_file() {
    let temp = TempDir::new().unwrap();
    write_prompts(temp.path());
    fs::write(
        temp.path().join("custom.toml"),
        "output_file = \"from-config.json\"\nrecursive = false\n",
    )
    .unwrap();

    prompt_catalog(temp.path())
        .args(["--config", "custom.toml", "compile", "prompts"])
        .assert()
        .success();

    let catalog = read_json(&temp.path().join("from-config.json"));
    assert_eq!(catalog.as_array().unwrap().len(), 1);
}

#[test]
fn test_missing_config_file_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("catalog.json"), "[]").unwrap();
    prompt_catalog(temp.path())
        .args(["--config", "missing.toml", "validate", "catalog.json"])
        .assert()
        .code(1);
}

#[test]
fn test_env_overrides_report_limit_validation() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("catalog.json"), "[]").unwrap();
    prompt_catalog(temp.path())
        .env("PROMPT_CATALOG_REPORT_LIMIT", "0")
        .args(["validate", "catalog.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("report_limit"));
}
