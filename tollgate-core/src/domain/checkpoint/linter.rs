// tollgate-core/src/domain/checkpoint/linter.rs
//
// Static checks a runner would trip over at execution time, reported up front.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::action::{ActionKind, OPENMETADATA_ACTION};
use super::batch::BatchRequest;
use super::configuration::CheckpointConfig;
use super::run_name::RunNameTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LintSeverity {
    Info,
    Warning,
    Error,
}

impl LintSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintFinding {
    pub severity: LintSeverity,
    /// Location in the document, e.g. `validations[0].batch_request`.
    pub location: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    pub checkpoint: String,
    pub findings: Vec<LintFinding>,
}

impl LintReport {
    pub fn has_errors(&self) -> bool {
        self.count(LintSeverity::Error) > 0
    }

    pub fn count(&self, severity: LintSeverity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    fn push(&mut self, severity: LintSeverity, location: impl Into<String>, message: String) {
        self.findings.push(LintFinding {
            severity,
            location: location.into(),
            message,
        });
    }
}

impl fmt::Display for LintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finding in &self.findings {
            writeln!(
                f,
                "{:<7} {}: {}",
                finding.severity, finding.location, finding.message
            )?;
        }
        write!(
            f,
            "{}: {} error(s), {} warning(s), {} info",
            self.checkpoint,
            self.count(LintSeverity::Error),
            self.count(LintSeverity::Warning),
            self.count(LintSeverity::Info)
        )
    }
}

pub struct CheckpointLinter;

impl CheckpointLinter {
    pub fn lint(config: &CheckpointConfig) -> LintReport {
        let mut report = LintReport {
            checkpoint: config.name.clone(),
            findings: Vec::new(),
        };

        Self::lint_run_name(config, &mut report);
        Self::lint_validations(config, &mut report);
        Self::lint_actions(config, &mut report);

        report
    }

    fn lint_run_name(config: &CheckpointConfig, report: &mut LintReport) {
        if let Some(template) = &config.run_name_template
            && let Err(e) = RunNameTemplate::parse(template)
        {
            report.push(LintSeverity::Error, "run_name_template", e.to_string());
        }
    }

    fn lint_validations(config: &CheckpointConfig, report: &mut LintReport) {
        if !config.has_validations() {
            if config.batch_request.is_empty() {
                report.push(
                    LintSeverity::Warning,
                    "validations",
                    "no validations and no default batch_request: nothing will be validated"
                        .to_string(),
                );
            } else {
                // planned as one implicit validation built from the defaults
                if config.expectation_suite_name.is_none() {
                    report.push(
                        LintSeverity::Error,
                        "expectation_suite_name",
                        "the default batch_request has no expectation suite to run".to_string(),
                    );
                }
                Self::lint_batch_request(&config.batch_request, "batch_request", report);
            }
            return;
        }

        for (index, validation) in config.validations.iter().enumerate() {
            if config.suite_for(validation).is_none() {
                report.push(
                    LintSeverity::Error,
                    format!("validations[{}].expectation_suite_name", index),
                    "no expectation suite here and no checkpoint default".to_string(),
                );
            }

            Self::lint_batch_request(
                &config.batch_request_for(validation),
                &format!("validations[{}].batch_request", index),
                report,
            );
        }
    }

    fn lint_batch_request(request: &BatchRequest, location: &str, report: &mut LintReport) {
        let mut missing = Vec::new();
        if request.datasource_name.is_none() {
            missing.push("datasource_name");
        }
        if request.data_asset_name.is_none() {
            missing.push("data_asset_name");
        }
        if !missing.is_empty() {
            report.push(
                LintSeverity::Error,
                location,
                format!("missing {}", missing.join(", ")),
            );
        }
    }

    fn lint_actions(config: &CheckpointConfig, report: &mut LintReport) {
        if !config.has_actions() {
            report.push(
                LintSeverity::Info,
                "action_list",
                "no actions: validation results will not be stored".to_string(),
            );
            return;
        }

        let mut seen = HashSet::new();
        for (index, spec) in config.action_list.iter().enumerate() {
            let location = format!("action_list[{}]", index);

            if !seen.insert(spec.name.as_str()) {
                report.push(
                    LintSeverity::Warning,
                    location.clone(),
                    format!("duplicate action name '{}'", spec.name),
                );
            }

            if !spec.action.is_builtin() && spec.action.module_name.is_none() {
                report.push(
                    LintSeverity::Warning,
                    location.clone(),
                    format!(
                        "'{}' is not a built-in action and has no module_name",
                        spec.action.class_name
                    ),
                );
            }

            match spec.kind() {
                Ok(ActionKind::OpenMetadataValidation(params))
                    if params.database_service_name.is_none() =>
                {
                    report.push(
                        LintSeverity::Info,
                        location,
                        format!(
                            "{} without database_service_name searches every database service",
                            OPENMETADATA_ACTION
                        ),
                    );
                }
                Ok(_) => {}
                Err(e) => report.push(LintSeverity::Error, location, e.to_string()),
            }
        }
    }
}
