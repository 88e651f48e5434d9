// tollgate-core/src/domain/checkpoint/mod.rs

pub mod action;
pub mod batch;
pub mod configuration;
pub mod linter;
pub mod run_name;

pub use action::{ActionConfig, ActionKind, ActionSpec, SiteNames};
pub use batch::{BatchIndex, BatchRequest, DataConnectorQuery};
pub use configuration::{CheckpointConfig, ValidationSpec};
pub use linter::{CheckpointLinter, LintFinding, LintReport, LintSeverity};
pub use run_name::RunNameTemplate;

use serde::{Deserialize, Deserializer};

/// `null` on a sequence or mapping field means "empty", the same as an absent key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
