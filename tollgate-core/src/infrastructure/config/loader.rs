// tollgate-core/src/infrastructure/config/loader.rs

use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::domain::checkpoint::CheckpointConfig;
use crate::infrastructure::config::variables::ConfigVariables;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write_yaml;

const INLINE_ORIGIN: &str = "<inline>";

/// Parses a checkpoint document held in memory (YAML, or JSON as a YAML subset).
pub fn parse_checkpoint(text: &str) -> Result<CheckpointConfig, InfrastructureError> {
    parse_document(text, INLINE_ORIGIN, None)
}

#[instrument]
pub fn load_checkpoint(path: &Path) -> Result<CheckpointConfig, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    let config = parse_document(&content, &path.display().to_string(), None)?;
    info!(checkpoint = %config.name, "Checkpoint loaded");
    Ok(config)
}

/// Same as [`load_checkpoint`], with `${VAR}` references resolved first.
#[instrument(skip(variables))]
pub fn load_checkpoint_with(
    path: &Path,
    variables: &ConfigVariables,
) -> Result<CheckpointConfig, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    let config = parse_document(&content, &path.display().to_string(), Some(variables))?;
    info!(checkpoint = %config.name, "Checkpoint loaded");
    Ok(config)
}

pub fn to_yaml(config: &CheckpointConfig) -> Result<String, InfrastructureError> {
    Ok(serde_yaml::to_string(config)?)
}

pub fn to_json(config: &CheckpointConfig) -> Result<String, InfrastructureError> {
    Ok(serde_json::to_string_pretty(config)?)
}

#[instrument(skip(config), fields(checkpoint = %config.name))]
pub fn save_checkpoint(path: &Path, config: &CheckpointConfig) -> Result<(), InfrastructureError> {
    atomic_write_yaml(path, config)?;
    info!(path = ?path, "Checkpoint saved");
    Ok(())
}

// Two passes: untyped first so that substitution only ever rewrites string
// nodes (a lone reference may bring a typed value), then typed so that shape
// errors name the offending field.
fn parse_document(
    text: &str,
    origin: &str,
    variables: Option<&ConfigVariables>,
) -> Result<CheckpointConfig, InfrastructureError> {
    let schema_error = |message: String| InfrastructureError::Schema {
        path: origin.to_string(),
        message,
    };

    let mut raw: Value = serde_yaml::from_str(text).map_err(|e| schema_error(e.to_string()))?;
    if !raw.is_mapping() {
        return Err(schema_error(
            "the document must be a mapping at the top level".to_string(),
        ));
    }
    raw.apply_merge().map_err(|e| schema_error(e.to_string()))?;

    if let Some(vars) = variables {
        debug!("Substituting config variables");
        vars.substitute(&mut raw);
    }

    let config: CheckpointConfig =
        serde_yaml::from_value(raw).map_err(|e| schema_error(e.to_string()))?;
    config.check().map_err(|e| schema_error(e.to_string()))?;

    Ok(config)
}
