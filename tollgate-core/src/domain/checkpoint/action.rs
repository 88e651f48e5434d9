// tollgate-core/src/domain/checkpoint/action.rs

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use validator::Validate;

use crate::domain::error::DomainError;

/// Action classes shipped with the validation framework itself.
/// They resolve without a `module_name`.
pub const BUILTIN_ACTIONS: [&str; 10] = [
    "StoreValidationResultAction",
    "StoreEvaluationParametersAction",
    "StoreMetricsAction",
    "UpdateDataDocsAction",
    "SlackNotificationAction",
    "EmailAction",
    "MicrosoftTeamsNotificationAction",
    "PagerdutyAlertAction",
    "OpsgenieAlertAction",
    "SNSNotificationAction",
];

pub const OPENMETADATA_ACTION: &str = "OpenMetadataValidationAction";

/// One entry of `action_list`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
pub struct ActionSpec {
    #[validate(length(min = 1, message = "action name cannot be empty"))]
    pub name: String,

    #[validate(nested)]
    pub action: ActionConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
pub struct ActionConfig {
    #[validate(length(min = 1, message = "action class_name cannot be empty"))]
    pub class_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,

    /// Action-specific parameters, in document order.
    #[serde(flatten)]
    pub params: Mapping,
}

/// `site_names` of `UpdateDataDocsAction`: either a list or the keyword `all`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum SiteNames {
    Sites(Vec<String>),
    Keyword(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct OpenMetadataParams {
    pub config_file_path: Option<String>,
    pub database_service_name: Option<String>,
    pub database_name: Option<String>,
    pub schema_name: Option<String>,
    pub table_name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct UpdateDataDocsParams {
    site_names: Option<SiteNames>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SlackParams {
    slack_webhook: Option<String>,
    notify_on: Option<String>,
}

/// Typed view over the actions this crate knows how to reason about.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    StoreValidationResult,
    StoreEvaluationParameters,
    UpdateDataDocs {
        site_names: Option<SiteNames>,
    },
    OpenMetadataValidation(OpenMetadataParams),
    SlackNotification {
        slack_webhook: Option<String>,
        notify_on: Option<String>,
    },
    Custom {
        class_name: String,
        module_name: Option<String>,
    },
}

impl ActionConfig {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            module_name: None,
            params: Mapping::new(),
        }
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn is_builtin(&self) -> bool {
        BUILTIN_ACTIONS.contains(&self.class_name.as_str())
    }

    fn decode<T: DeserializeOwned>(&self) -> Result<T, String> {
        serde_yaml::from_value(Value::Mapping(self.params.clone())).map_err(|e| e.to_string())
    }
}

impl ActionSpec {
    pub fn new(name: impl Into<String>, action: ActionConfig) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    /// Decodes the parameters of well-known actions.
    /// Unknown classes are reported as `Custom` without looking at their parameters.
    pub fn kind(&self) -> Result<ActionKind, DomainError> {
        let invalid = |message: String| DomainError::InvalidAction {
            name: self.name.clone(),
            class_name: self.action.class_name.clone(),
            message,
        };

        let kind = match self.action.class_name.as_str() {
            "StoreValidationResultAction" => ActionKind::StoreValidationResult,
            "StoreEvaluationParametersAction" => ActionKind::StoreEvaluationParameters,
            "UpdateDataDocsAction" => {
                let params: UpdateDataDocsParams = self.action.decode().map_err(invalid)?;
                if let Some(SiteNames::Keyword(word)) = &params.site_names
                    && word != "all"
                {
                    return Err(invalid(format!(
                        "site_names must be a list or 'all', got '{}'",
                        word
                    )));
                }
                ActionKind::UpdateDataDocs {
                    site_names: params.site_names,
                }
            }
            OPENMETADATA_ACTION => {
                ActionKind::OpenMetadataValidation(self.action.decode().map_err(invalid)?)
            }
            "SlackNotificationAction" => {
                let params: SlackParams = self.action.decode().map_err(invalid)?;
                ActionKind::SlackNotification {
                    slack_webhook: params.slack_webhook,
                    notify_on: params.notify_on,
                }
            }
            other => ActionKind::Custom {
                class_name: other.to_string(),
                module_name: self.action.module_name.clone(),
            },
        };

        Ok(kind)
    }
}
