// tollgate-core/src/infrastructure/config/context.rs
//
// The data context: the directory holding `great_expectations.yml` and the stores.
// Only the parts needed to locate checkpoints and config variables are modelled.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::infrastructure::error::InfrastructureError;

pub const CONTEXT_FILE_CANDIDATES: [&str; 2] = ["great_expectations.yml", "great_expectations.yaml"];
pub const DEFAULT_CHECKPOINT_DIR: &str = "checkpoints";

pub const ENV_CHECKPOINT_DIR: &str = "TOLLGATE_CHECKPOINT_DIR";
pub const ENV_CONFIG_VARIABLES: &str = "TOLLGATE_CONFIG_VARIABLES";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ContextConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_version: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_variables_file_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint_store_name: Option<String>,

    #[serde(default)]
    pub stores: BTreeMap<String, StoreConfig>,

    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub class_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_backend: Option<StoreBackendConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StoreBackendConfig {
    #[serde(default)]
    pub class_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<String>,
}

impl ContextConfig {
    /// Directory (relative to the context root) holding checkpoint documents.
    ///
    /// Uses the store named by `checkpoint_store_name`, else the first store whose
    /// class is `CheckpointStore`, else `checkpoints/`.
    pub fn checkpoint_directory(&self) -> String {
        let store = self
            .checkpoint_store_name
            .as_ref()
            .and_then(|name| self.stores.get(name))
            .or_else(|| {
                self.stores
                    .values()
                    .find(|s| s.class_name == "CheckpointStore")
            });

        store
            .and_then(|s| s.store_backend.as_ref())
            .and_then(|b| b.base_directory.clone())
            .unwrap_or_else(|| DEFAULT_CHECKPOINT_DIR.to_string())
    }
}

/// Resolved locations of a data context, after environment overrides.
#[derive(Debug, Clone)]
pub struct DataContext {
    pub root: PathBuf,
    pub config: ContextConfig,
    pub checkpoint_dir: PathBuf,
    pub config_variables_path: Option<PathBuf>,
}

#[instrument(skip(context_dir), fields(dir = %context_dir.display()))]
pub fn load_context_config(context_dir: &Path) -> Result<DataContext, InfrastructureError> {
    let config_path = find_context_file(context_dir)?;
    info!(path = ?config_path, "Loading data context");

    let content = fs::read_to_string(&config_path)?;
    let config: ContextConfig =
        serde_yaml::from_str::<Option<ContextConfig>>(&content)?.unwrap_or_default();

    let mut context = DataContext {
        root: context_dir.to_path_buf(),
        checkpoint_dir: context_dir.join(config.checkpoint_directory()),
        config_variables_path: config
            .config_variables_file_path
            .as_ref()
            .map(|p| context_dir.join(p)),
        config,
    };

    apply_env_overrides(&mut context);

    Ok(context)
}

fn find_context_file(root: &Path) -> Result<PathBuf, InfrastructureError> {
    CONTEXT_FILE_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
        .ok_or_else(|| {
            InfrastructureError::ConfigNotFound(format!(
                "{} (checked: {:?})",
                root.display(),
                CONTEXT_FILE_CANDIDATES
            ))
        })
}

// Layering: TOLLGATE_CHECKPOINT_DIR=/tmp/checkpoints tollgate list
fn apply_env_overrides(context: &mut DataContext) {
    if let Ok(val) = std::env::var(ENV_CHECKPOINT_DIR) {
        info!(old = ?context.checkpoint_dir, new = ?val, "Overriding checkpoint directory via ENV");
        context.checkpoint_dir = context.root.join(val);
    }
    if let Ok(val) = std::env::var(ENV_CONFIG_VARIABLES) {
        info!(new = ?val, "Overriding config variables file via ENV");
        context.config_variables_path = Some(context.root.join(val));
    }
}
