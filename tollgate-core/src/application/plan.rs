// tollgate-core/src/application/plan.rs
//
// What a runner would execute for a checkpoint, resolved statically:
// run name, effective batch requests and suites, ordered actions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_yaml::Mapping;
use tracing::{debug, info, instrument};

use crate::domain::checkpoint::{BatchRequest, CheckpointConfig, RunNameTemplate};
use crate::domain::error::DomainError;
use crate::error::TollgateError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::repository::CheckpointRepository;

#[derive(Debug, Serialize)]
pub struct RunPlan {
    pub checkpoint: String,
    pub run_name: String,
    pub run_time: DateTime<Utc>,
    pub validations: Vec<PlannedValidation>,
    /// Run after every validation, in this order.
    pub actions: Vec<PlannedAction>,
    pub evaluation_parameters: Mapping,
    pub runtime_configuration: Mapping,
}

#[derive(Debug, Serialize)]
pub struct PlannedValidation {
    /// Position in `validations`; `None` for the implicit validation built from
    /// the checkpoint-level defaults.
    pub index: Option<usize>,
    pub expectation_suite_name: String,
    pub batch_request: BatchRequest,
}

#[derive(Debug, Serialize)]
pub struct PlannedAction {
    pub name: String,
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    /// Parameters after config-variable substitution.
    #[serde(skip_serializing_if = "Mapping::is_empty")]
    pub params: Mapping,
}

impl RunPlan {
    pub fn to_json(&self) -> Result<String, InfrastructureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[instrument(skip(config), fields(checkpoint = %config.name))]
pub fn plan_checkpoint(
    config: &CheckpointConfig,
    run_time: DateTime<Utc>,
) -> Result<RunPlan, DomainError> {
    let template = RunNameTemplate::for_checkpoint(config.run_name_template.as_deref())?;

    let validations = if config.has_validations() {
        config
            .validations
            .iter()
            .enumerate()
            .map(|(index, validation)| -> Result<PlannedValidation, DomainError> {
                let suite = config
                    .suite_for(validation)
                    .ok_or(DomainError::MissingExpectationSuite { index })?;
                Ok(PlannedValidation {
                    index: Some(index),
                    expectation_suite_name: suite.to_string(),
                    batch_request: config.batch_request_for(validation),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?
    } else if !config.batch_request.is_empty() {
        let suite = config
            .expectation_suite_name
            .clone()
            .ok_or(DomainError::MissingExpectationSuite { index: 0 })?;
        vec![PlannedValidation {
            index: None,
            expectation_suite_name: suite,
            batch_request: config.batch_request.clone(),
        }]
    } else {
        Vec::new()
    };

    let actions = config
        .action_list
        .iter()
        .map(|spec| PlannedAction {
            name: spec.name.clone(),
            class_name: spec.action.class_name.clone(),
            module_name: spec.action.module_name.clone(),
            params: spec.action.params.clone(),
        })
        .collect();

    for validation in &validations {
        debug!(
            batch = %validation.batch_request.label(),
            suite = %validation.expectation_suite_name,
            "Planned validation"
        );
    }

    let plan = RunPlan {
        checkpoint: config.name.clone(),
        run_name: template.render(run_time),
        run_time,
        validations,
        actions,
        evaluation_parameters: config.evaluation_parameters.clone(),
        runtime_configuration: config.runtime_configuration.clone(),
    };

    info!(
        run_name = %plan.run_name,
        validations = plan.validations.len(),
        actions = plan.actions.len(),
        "Run plan resolved"
    );

    Ok(plan)
}

/// Loads a checkpoint through the repository port, then plans it.
pub fn plan_stored_checkpoint<R: CheckpointRepository>(
    repository: &R,
    name: &str,
    run_time: DateTime<Utc>,
) -> Result<RunPlan, TollgateError> {
    let config = repository.load(name)?;
    Ok(plan_checkpoint(&config, run_time)?)
}
