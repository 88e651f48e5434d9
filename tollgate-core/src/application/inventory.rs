// tollgate-core/src/application/inventory.rs
//
// One line per stored checkpoint, for listings. A document that fails to load
// is still listed, with its error, so one broken file does not hide the others.

use serde::Serialize;
use tracing::warn;

use crate::domain::checkpoint::{CheckpointConfig, CheckpointLinter, LintSeverity};
use crate::error::TollgateError;
use crate::ports::repository::CheckpointRepository;

#[derive(Debug, Serialize, PartialEq)]
pub struct CheckpointSummary {
    pub name: String,
    pub class_name: Option<String>,
    pub validations: usize,
    pub actions: usize,
    pub lint_errors: usize,
    pub load_error: Option<String>,
}

impl CheckpointSummary {
    fn from_config(name: &str, config: &CheckpointConfig) -> Self {
        let report = CheckpointLinter::lint(config);
        Self {
            name: name.to_string(),
            class_name: Some(config.class_name.clone()),
            validations: config.validations.len(),
            actions: config.action_list.len(),
            lint_errors: report.count(LintSeverity::Error),
            load_error: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.load_error.is_none() && self.lint_errors == 0
    }
}

pub fn summarize_checkpoints<R: CheckpointRepository>(
    repository: &R,
) -> Result<Vec<CheckpointSummary>, TollgateError> {
    let names = repository.list()?;
    let mut summaries = Vec::with_capacity(names.len());

    for name in names {
        match repository.load(&name) {
            Ok(config) => summaries.push(CheckpointSummary::from_config(&name, &config)),
            Err(e) => {
                warn!(checkpoint = %name, error = %e, "Checkpoint failed to load");
                summaries.push(CheckpointSummary {
                    name,
                    class_name: None,
                    validations: 0,
                    actions: 0,
                    lint_errors: 0,
                    load_error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(summaries)
}
