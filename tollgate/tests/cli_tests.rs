use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A throwaway copy of the demo data context, so tests may write into it.
struct TollgateTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl TollgateTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .context("Workspace root not found")?
            .join("demos/sqlite_context");

        let dest = tmp.path().join("sqlite_context");
        Self::copy_dir(&fixture, &dest)?;

        Ok(Self {
            _tmp: tmp,
            root: dest,
        })
    }

    fn copy_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.content_only = true;

        fs::create_dir_all(dst)?;
        fs_extra::dir::copy(src, dst, &options)
            .map(|_| ())
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    fn checkpoint(&self, name: &str) -> PathBuf {
        self.root.join("checkpoints").join(format!("{}.yml", name))
    }

    fn tollgate(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tollgate"));
        cmd.current_dir(&self.root)
            .env_remove("TOLLGATE_CONTEXT_DIR")
            .env_remove("TOLLGATE_CHECKPOINT_DIR")
            .env_remove("TOLLGATE_CONFIG_VARIABLES")
            .env_remove("ometa_service");
        cmd
    }
}

#[test]
fn test_check_accepts_runnable_checkpoint() -> Result<()> {
    let env = TollgateTestEnv::new()?;

    env.tollgate()
        .arg("check")
        .arg(env.checkpoint("sqlite"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Checkpoint: sqlite (1 validation(s), 4 action(s))"))
        .stdout(predicate::str::contains("looks runnable"));

    Ok(())
}

#[test]
fn test_check_rejects_schema_errors() -> Result<()> {
    let env = TollgateTestEnv::new()?;

    env.tollgate()
        .arg("check")
        .arg(env.checkpoint("broken"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.yml"));

    Ok(())
}

#[test]
fn test_check_fails_on_lint_errors() -> Result<()> {
    let env = TollgateTestEnv::new()?;
    let file = env.root.join("no_suite.yml");
    fs::write(
        &file,
        r#"
name: no_suite
class_name: Checkpoint
run_name_template: '%Y-%m-%d'
validations:
  - batch_request:
      datasource_name: my_sqlite_datasource
      data_asset_name: main.users
"#,
    )?;

    env.tollgate()
        .arg("check")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("validations[0]"))
        .stderr(predicate::str::contains("is not runnable"));

    Ok(())
}

#[test]
fn test_show_keeps_values_and_order() -> Result<()> {
    let env = TollgateTestEnv::new()?;

    let output = env
        .tollgate()
        .arg("show")
        .arg(env.checkpoint("sqlite"))
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let shown: serde_yaml::Value = serde_yaml::from_str(&stdout)?;
    assert_eq!(shown["name"], serde_yaml::Value::from("sqlite"));
    assert_eq!(
        shown["validations"][0]["batch_request"]["data_connector_query"]["index"],
        serde_yaml::Value::from(-1)
    );
    // show does not resolve config variables
    assert_eq!(
        shown["action_list"][3]["action"]["config_file_path"],
        serde_yaml::Value::from("${ometa_config_dir}")
    );

    let names: Vec<&str> = shown["action_list"]
        .as_sequence()
        .context("action_list is not a sequence")?
        .iter()
        .filter_map(|a| a["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "store_validation_result",
            "store_evaluation_params",
            "update_data_docs",
            "ometa_ingestion"
        ]
    );

    Ok(())
}

#[test]
fn test_show_json() -> Result<()> {
    let env = TollgateTestEnv::new()?;

    let output = env
        .tollgate()
        .args(["show", "--format", "json"])
        .arg(env.checkpoint("nightly/orders"))
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["name"], "nightly/orders");
    assert_eq!(
        json["validations"][1]["batch_request"]["data_connector_query"]["index"],
        "[-3:]"
    );

    Ok(())
}

#[test]
fn test_list_context_checkpoints() -> Result<()> {
    let env = TollgateTestEnv::new()?;

    env.tollgate()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("nightly/orders"))
        .stdout(predicate::str::contains("sqlite"))
        .stdout(predicate::str::contains("broken"))
        .stdout(predicate::str::contains("1 checkpoint(s) need attention"));

    Ok(())
}

#[test]
fn test_list_without_context_fails() -> Result<()> {
    let tmp = tempfile::tempdir()?;

    Command::new(assert_cmd::cargo::cargo_bin!("tollgate"))
        .env_remove("TOLLGATE_CONTEXT_DIR")
        .args(["list", "--context-dir"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load data context"));

    Ok(())
}

#[test]
fn test_plan_resolves_run() -> Result<()> {
    let env = TollgateTestEnv::new()?;

    let output = env
        .tollgate()
        .args(["plan", "nightly/orders", "--run-time", "2024-01-02T03:04:05Z"])
        .output()?;
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(plan["checkpoint"], "nightly/orders");
    assert_eq!(plan["run_name"], "nightly-20240102");
    assert_eq!(plan["run_time"], "2024-01-02T03:04:05Z");

    let validations = plan["validations"]
        .as_array()
        .context("validations is not an array")?;
    assert_eq!(validations.len(), 2);
    assert_eq!(validations[0]["expectation_suite_name"], "orders.warning");
    assert_eq!(validations[1]["expectation_suite_name"], "order_items.critical");
    assert_eq!(
        validations[1]["batch_request"]["datasource_name"],
        "my_sqlite_datasource"
    );

    assert_eq!(plan["actions"][1]["class_name"], "WebhookAction");

    Ok(())
}

fn planned_service(output: &std::process::Output) -> Result<String> {
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let action = &plan["actions"][3];
    assert_eq!(action["name"], "ometa_ingestion");
    action["params"]["database_service_name"]
        .as_str()
        .map(str::to_string)
        .context("database_service_name missing from the plan")
}

#[test]
fn test_plan_resolves_config_variables() -> Result<()> {
    let env = TollgateTestEnv::new()?;

    let output = env.tollgate().args(["plan", "sqlite"]).output()?;
    assert!(output.status.success());
    assert_eq!(planned_service(&output)?, "test_sqlite");

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(plan["actions"][3]["params"]["config_file_path"], "ometa_config");
    assert_eq!(
        plan["validations"][0]["batch_request"]["data_connector_query"]["index"],
        -1
    );

    Ok(())
}

#[test]
fn test_plan_environment_wins_over_variables_file() -> Result<()> {
    let env = TollgateTestEnv::new()?;

    let output = env
        .tollgate()
        .env("ometa_service", "prod_sqlite")
        .args(["plan", "sqlite"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(planned_service(&output)?, "prod_sqlite");

    Ok(())
}

#[test]
fn test_plan_honours_config_variables_override() -> Result<()> {
    let env = TollgateTestEnv::new()?;
    fs::write(
        env.root.join("uncommitted/staging_variables.yml"),
        "ometa_config_dir: ometa_config\nometa_service: staging_sqlite\n",
    )?;

    let output = env
        .tollgate()
        .env("TOLLGATE_CONFIG_VARIABLES", "uncommitted/staging_variables.yml")
        .args(["plan", "sqlite"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(planned_service(&output)?, "staging_sqlite");

    Ok(())
}

#[test]
fn test_plan_unknown_checkpoint() -> Result<()> {
    let env = TollgateTestEnv::new()?;

    env.tollgate()
        .args(["plan", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to plan checkpoint 'missing'"));

    Ok(())
}

#[test]
fn test_plan_honours_checkpoint_dir_override() -> Result<()> {
    let env = TollgateTestEnv::new()?;
    fs::create_dir_all(env.root.join("staging"))?;
    fs::write(
        env.root.join("staging/only_here.yml"),
        "name: only_here\nclass_name: Checkpoint\n",
    )?;

    env.tollgate()
        .env("TOLLGATE_CHECKPOINT_DIR", "staging")
        .args(["plan", "only_here", "--run-time", "2024-01-02T03:04:05Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"checkpoint\": \"only_here\""));

    Ok(())
}

#[test]
fn test_set_action_appends_and_writes_output() -> Result<()> {
    let env = TollgateTestEnv::new()?;
    let output = env.root.join("out/nightly_orders.yml");

    env.tollgate()
        .arg("set-action")
        .arg(env.checkpoint("nightly/orders"))
        .args([
            "--name",
            "ometa_ingestion",
            "--class-name",
            "OpenMetadataValidationAction",
            "--module-name",
            "metadata.great_expectations.action",
            "-p",
            "database_service_name=test_sqlite",
            "-p",
            "config_file_path=/etc/ometa",
            "--output",
        ])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 action(s)"));

    let written: serde_yaml::Value = serde_yaml::from_str(&fs::read_to_string(&output)?)?;
    let last = &written["action_list"][2];
    assert_eq!(last["name"], serde_yaml::Value::from("ometa_ingestion"));
    assert_eq!(
        last["action"]["config_file_path"],
        serde_yaml::Value::from("/etc/ometa")
    );

    // the input is left alone when --output is given
    let original = fs::read_to_string(env.checkpoint("nightly/orders"))?;
    assert!(!original.contains("ometa_ingestion"));

    Ok(())
}

#[test]
fn test_set_action_replaces_in_place() -> Result<()> {
    let env = TollgateTestEnv::new()?;
    let file = env.checkpoint("sqlite");

    env.tollgate()
        .arg("set-action")
        .arg(&file)
        .args([
            "--name",
            "update_data_docs",
            "--class-name",
            "UpdateDataDocsAction",
            "--param",
            "site_names=all",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 action(s)"));

    let written: serde_yaml::Value = serde_yaml::from_str(&fs::read_to_string(&file)?)?;
    assert_eq!(
        written["action_list"][2]["action"]["site_names"],
        serde_yaml::Value::from("all")
    );

    Ok(())
}

#[test]
fn test_set_action_rejects_bad_param() -> Result<()> {
    let env = TollgateTestEnv::new()?;

    env.tollgate()
        .arg("set-action")
        .arg(env.checkpoint("sqlite"))
        .args(["--name", "x", "--class-name", "Y", "-p", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected key=value"));

    Ok(())
}
