// tollgate-core/src/ports/repository.rs

// What the use cases need from a checkpoint store, without knowing where the
// documents live (directory of YAML files, a cloud backend...).

use std::path::PathBuf;

use crate::domain::checkpoint::CheckpointConfig;
use crate::error::TollgateError;

pub trait CheckpointRepository: Send + Sync {
    /// Names of every stored checkpoint, sorted.
    fn list(&self) -> Result<Vec<String>, TollgateError>;

    /// Loads a checkpoint by name, with config variables substituted.
    fn load(&self, name: &str) -> Result<CheckpointConfig, TollgateError>;

    /// Persists a checkpoint under its own `name` and returns where it landed.
    /// Written as given: a config from `load` carries resolved variable values,
    /// secrets included.
    fn save(&self, config: &CheckpointConfig) -> Result<PathBuf, TollgateError>;
}
