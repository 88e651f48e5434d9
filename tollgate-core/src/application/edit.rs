// tollgate-core/src/application/edit.rs
//
// USE CASE: point an action at a different target without hand-editing YAML
// (e.g. swap the catalog config path of the metadata ingestion action per environment).

use serde_yaml::Value;
use std::path::Path;
use tracing::info;

use crate::domain::checkpoint::{ActionConfig, ActionSpec, CheckpointConfig};
use crate::error::TollgateError;
use crate::infrastructure::config::loader::{load_checkpoint, save_checkpoint};

#[derive(Debug, Clone, Default)]
pub struct ActionUpdate {
    pub name: String,
    pub class_name: String,
    pub module_name: Option<String>,
    /// Raw `key=value` pairs; values are read as YAML scalars.
    pub params: Vec<(String, String)>,
}

impl ActionUpdate {
    pub fn into_spec(self) -> ActionSpec {
        let mut action = ActionConfig::new(self.class_name);
        action.module_name = self.module_name;
        for (key, raw) in self.params {
            action.params.insert(Value::String(key), parse_scalar(&raw));
        }
        ActionSpec::new(self.name, action)
    }
}

/// Parses `key=value`. The value may itself contain `=`.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

// "3" -> 3, "-1" -> -1, "true" -> true; anything that is not a plain scalar stays a string
fn parse_scalar(raw: &str) -> Value {
    match serde_yaml::from_str::<Value>(raw) {
        Ok(v @ (Value::Bool(_) | Value::Number(_))) => v,
        _ => Value::String(raw.to_string()),
    }
}

/// Loads `source`, upserts the action, validates, and writes the result to `target`.
pub fn apply_action_update(
    source: &Path,
    target: &Path,
    update: ActionUpdate,
) -> Result<CheckpointConfig, TollgateError> {
    let config = load_checkpoint(source)?;
    let action_name = update.name.clone();
    let updated = config.with_action(update.into_spec());
    updated.check()?;

    save_checkpoint(target, &updated)?;
    info!(action = %action_name, target = ?target, "Action updated");
    Ok(updated)
}
