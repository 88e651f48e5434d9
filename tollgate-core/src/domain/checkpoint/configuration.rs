// tollgate-core/src/domain/checkpoint/configuration.rs

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use validator::Validate;

use super::action::ActionSpec;
use super::batch::BatchRequest;
use super::null_as_default;
use crate::domain::error::DomainError;

/// A checkpoint document: validation targets plus the actions run after each of them.
///
/// The struct is read-only configuration. Keys this crate does not model are kept in
/// `extra` so that a load/save cycle does not lose them.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
pub struct CheckpointConfig {
    #[validate(length(min = 1, message = "checkpoint name cannot be empty"))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_version: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,

    #[validate(length(min = 1, message = "checkpoint class_name cannot be empty"))]
    pub class_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_name_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectation_suite_name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub batch_request: BatchRequest,

    #[validate(nested)]
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_list: Vec<ActionSpec>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub evaluation_parameters: Mapping,

    #[serde(default, deserialize_with = "null_as_default")]
    pub runtime_configuration: Mapping,

    #[serde(default, deserialize_with = "null_as_default")]
    pub validations: Vec<ValidationSpec>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub profilers: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge_cloud_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectation_suite_ge_cloud_id: Option<String>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// One validation target of a checkpoint.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ValidationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_request: Option<BatchRequest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectation_suite_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectation_suite_ge_cloud_id: Option<String>,

    #[serde(flatten)]
    pub extra: Mapping,
}

impl CheckpointConfig {
    pub fn new(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_version: None,
            module_name: None,
            class_name: class_name.into(),
            run_name_template: None,
            expectation_suite_name: None,
            batch_request: BatchRequest::default(),
            action_list: Vec::new(),
            evaluation_parameters: Mapping::new(),
            runtime_configuration: Mapping::new(),
            validations: Vec::new(),
            profilers: Vec::new(),
            ge_cloud_id: None,
            expectation_suite_ge_cloud_id: None,
            extra: Mapping::new(),
        }
    }

    /// Structural checks serde cannot express (non-empty identifiers).
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::InvalidConfig(e.to_string()))
    }

    pub fn has_validations(&self) -> bool {
        !self.validations.is_empty()
    }

    pub fn has_actions(&self) -> bool {
        !self.action_list.is_empty()
    }

    pub fn action_names(&self) -> Vec<&str> {
        self.action_list.iter().map(|a| a.name.as_str()).collect()
    }

    /// Returns a copy where the action named like `spec` is replaced in place,
    /// or `spec` is appended when no action carries that name.
    pub fn with_action(mut self, spec: ActionSpec) -> Self {
        match self.action_list.iter_mut().find(|a| a.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.action_list.push(spec),
        }
        self
    }

    /// Suite a validation runs with: its own name, else the checkpoint default.
    pub fn suite_for<'a>(&'a self, validation: &'a ValidationSpec) -> Option<&'a str> {
        validation
            .expectation_suite_name
            .as_deref()
            .or(self.expectation_suite_name.as_deref())
    }

    /// Batch request a validation runs with once the checkpoint default is overlaid.
    pub fn batch_request_for(&self, validation: &ValidationSpec) -> BatchRequest {
        match &validation.batch_request {
            Some(own) => own.merged_over(&self.batch_request),
            None => self.batch_request.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::checkpoint::action::ActionConfig;
    use crate::domain::checkpoint::batch::BatchIndex;

    const SQLITE_CHECKPOINT: &str = r#"
name: sqlite
config_version: 1.0
template_name:
module_name: great_expectations.checkpoint
class_name: Checkpoint
run_name_template: '%Y%m%d-%H%M%S-my-run-name-template'
expectation_suite_name:
batch_request: {}
action_list:
  - name: store_validation_result
    action:
      class_name: StoreValidationResultAction
  - name: store_evaluation_params
    action:
      class_name: StoreEvaluationParametersAction
  - name: update_data_docs
    action:
      class_name: UpdateDataDocsAction
      site_names: []
  - name: ometa_ingestion
    action:
      module_name: metadata.great_expectations.action
      class_name: OpenMetadataValidationAction
      config_file_path: ometa_config/
      database_service_name: test_sqlite
      database_name: default
evaluation_parameters: {}
runtime_configuration: {}
validations:
  - batch_request:
      datasource_name: my_sqlite_datasource
      data_connector_name: default_inferred_data_connector_name
      data_asset_name: main.users
      data_connector_query:
        index: -1
    expectation_suite_name: IntegrationTestExpectation
profilers: []
ge_cloud_id:
expectation_suite_ge_cloud_id:
"#;

    #[test]
    fn test_parse_full_checkpoint() {
        let config: CheckpointConfig = serde_yaml::from_str(SQLITE_CHECKPOINT).unwrap();

        assert_eq!(config.name, "sqlite");
        assert_eq!(config.config_version, Some(1.0));
        assert_eq!(config.class_name, "Checkpoint");
        assert_eq!(config.expectation_suite_name, None);
        assert_eq!(config.expectation_suite_ge_cloud_id, None);
        assert!(config.batch_request.is_empty());
        assert_eq!(
            config.action_names(),
            vec![
                "store_validation_result",
                "store_evaluation_params",
                "update_data_docs",
                "ometa_ingestion"
            ]
        );
        // 'template_name' is not modelled but must survive
        assert!(config.extra.contains_key("template_name"));

        let validation = &config.validations[0];
        let query = validation
            .batch_request
            .as_ref()
            .and_then(|b| b.data_connector_query.as_ref())
            .unwrap();
        assert_eq!(query.index, Some(BatchIndex::Position(-1)));
        assert_eq!(config.suite_for(validation), Some("IntegrationTestExpectation"));
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_round_trip_preserves_document() {
        let config: CheckpointConfig = serde_yaml::from_str(SQLITE_CHECKPOINT).unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let reloaded: CheckpointConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(reloaded, config);
        assert_eq!(reloaded.action_names(), config.action_names());
    }

    #[test]
    fn test_missing_sequences_mean_empty() {
        let config: CheckpointConfig =
            serde_yaml::from_str("name: bare\nclass_name: Checkpoint\n").unwrap();
        assert!(!config.has_actions());
        assert!(!config.has_validations());
        assert!(config.profilers.is_empty());

        let nulls: CheckpointConfig = serde_yaml::from_str(
            "name: bare\nclass_name: Checkpoint\naction_list:\nvalidations: ~\n",
        )
        .unwrap();
        assert!(!nulls.has_actions());
        assert!(!nulls.has_validations());
    }

    #[test]
    fn test_required_fields() {
        let no_name: Result<CheckpointConfig, _> = serde_yaml::from_str("class_name: Checkpoint");
        assert!(no_name.unwrap_err().to_string().contains("name"));

        let no_class: Result<CheckpointConfig, _> = serde_yaml::from_str("name: x");
        assert!(no_class.unwrap_err().to_string().contains("class_name"));

        let empty = CheckpointConfig::new("", "Checkpoint");
        assert!(matches!(empty.check(), Err(DomainError::InvalidConfig(_))));
    }

    #[test]
    fn test_wrong_shape_fails() {
        let result: Result<CheckpointConfig, _> =
            serde_yaml::from_str("name: x\nclass_name: Checkpoint\naction_list: nope\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_with_action_replaces_in_place_or_appends() {
        let config: CheckpointConfig = serde_yaml::from_str(SQLITE_CHECKPOINT).unwrap();

        let mut replacement = ActionConfig::new("OpenMetadataValidationAction");
        replacement.module_name = Some("metadata.great_expectations.action".into());
        replacement.params.insert(
            Value::String("config_file_path".into()),
            Value::String("/tmp/ometa".into()),
        );

        let updated = config
            .clone()
            .with_action(ActionSpec::new("ometa_ingestion", replacement));
        assert_eq!(updated.action_list.len(), 4);
        assert_eq!(
            updated.action_list[3].action.param("config_file_path"),
            Some(&Value::String("/tmp/ometa".into()))
        );

        let appended = config.with_action(ActionSpec::new(
            "notify",
            ActionConfig::new("SlackNotificationAction"),
        ));
        assert_eq!(appended.action_list.len(), 5);
        assert_eq!(appended.action_list[4].name, "notify");
    }

    #[test]
    fn test_batch_request_for_uses_default() {
        let mut config = CheckpointConfig::new("c", "Checkpoint");
        config.batch_request.datasource_name = Some("warehouse".into());

        let validation = ValidationSpec::default();
        assert_eq!(
            config.batch_request_for(&validation).datasource_name.as_deref(),
            Some("warehouse")
        );
        assert_eq!(config.suite_for(&validation), None);
    }
}
