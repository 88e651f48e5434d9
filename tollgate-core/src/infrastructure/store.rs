// tollgate-core/src/infrastructure/store.rs
//
// Checkpoint store backed by a directory of YAML files: `<base>/<name>.yml`.

use std::path::{Component, Path, PathBuf};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::domain::checkpoint::CheckpointConfig;
use crate::error::TollgateError;
use crate::infrastructure::config::context::DataContext;
use crate::infrastructure::config::loader::{load_checkpoint_with, save_checkpoint};
use crate::infrastructure::config::variables::ConfigVariables;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::repository::CheckpointRepository;

const SUPPORTED_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

pub struct FilesystemCheckpointStore {
    base_dir: PathBuf,
    variables: ConfigVariables,
}

impl FilesystemCheckpointStore {
    pub fn new(base_dir: impl Into<PathBuf>, variables: ConfigVariables) -> Self {
        Self {
            base_dir: base_dir.into(),
            variables,
        }
    }

    /// Store of a data context, with its config variables file and the environment.
    pub fn from_context(context: &DataContext) -> Result<Self, InfrastructureError> {
        let variables = match &context.config_variables_path {
            Some(path) => ConfigVariables::from_file(path)?,
            None => ConfigVariables::empty()?,
        };
        Ok(Self::new(
            context.checkpoint_dir.clone(),
            variables.with_environment(),
        ))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Existing file for `name`, or the `.yml` path it would be written to.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, InfrastructureError> {
        let relative = Path::new(name);
        let is_safe = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_safe {
            return Err(InfrastructureError::UnsafePath(name.to_string()));
        }

        let existing = SUPPORTED_EXTENSIONS
            .iter()
            .map(|ext| self.base_dir.join(format!("{}.{}", name, ext)))
            .find(|p| p.exists());

        Ok(existing.unwrap_or_else(|| self.base_dir.join(format!("{}.yml", name))))
    }

    fn existing_path(&self, name: &str) -> Result<PathBuf, InfrastructureError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(InfrastructureError::CheckpointNotFound(name.to_string()));
        }
        Ok(path)
    }

    fn name_of(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.base_dir).ok()?.with_extension("");
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        Some(parts.join("/"))
    }
}

impl CheckpointRepository for FilesystemCheckpointStore {
    #[instrument(skip(self), fields(base = %self.base_dir.display()))]
    fn list(&self) -> Result<Vec<String>, TollgateError> {
        if !self.base_dir.exists() {
            warn!("Checkpoint directory does not exist");
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.base_dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                InfrastructureError::Io(std::io::Error::other(e.to_string()))
            })?;
            let path = entry.path();
            let supported = path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));

            if path.is_file()
                && supported
                && let Some(name) = self.name_of(path)
            {
                debug!(checkpoint = %name, "Found checkpoint");
                names.push(name);
            }
        }

        names.sort();
        names.dedup();
        Ok(names)
    }

    #[instrument(skip(self))]
    fn load(&self, name: &str) -> Result<CheckpointConfig, TollgateError> {
        let path = self.existing_path(name)?;
        Ok(load_checkpoint_with(&path, &self.variables)?)
    }

    /// Writes `config` verbatim. To edit a stored checkpoint without persisting
    /// resolved variables, read it with `load_checkpoint(store.path_for(name)?)`.
    #[instrument(skip(self, config), fields(checkpoint = %config.name))]
    fn save(&self, config: &CheckpointConfig) -> Result<PathBuf, TollgateError> {
        let path = self.path_for(&config.name)?;
        save_checkpoint(&path, config)?;
        Ok(path)
    }
}
