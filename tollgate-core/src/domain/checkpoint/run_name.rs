// tollgate-core/src/domain/checkpoint/run_name.rs

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::error::DomainError;

/// Pattern used when a checkpoint has no `run_name_template`.
pub const DEFAULT_RUN_NAME_FORMAT: &str = "%Y%m%dT%H%M%S%.6fZ";

/// A validated strftime-like run name pattern.
///
/// chrono panics when formatting an invalid pattern through `Display`,
/// so every specifier is checked once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunNameTemplate {
    template: String,
}

impl RunNameTemplate {
    pub fn parse(template: &str) -> Result<Self, DomainError> {
        if StrftimeItems::new(template).any(|item| matches!(item, Item::Error)) {
            return Err(DomainError::InvalidRunNameTemplate {
                template: template.to_string(),
            });
        }
        Ok(Self {
            template: template.to_string(),
        })
    }

    /// Template of the checkpoint, or the timestamp default when it has none.
    pub fn for_checkpoint(template: Option<&str>) -> Result<Self, DomainError> {
        Self::parse(template.unwrap_or(DEFAULT_RUN_NAME_FORMAT))
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn render(&self, at: DateTime<Utc>) -> String {
        at.format_with_items(StrftimeItems::new(&self.template))
            .to_string()
    }
}

impl fmt::Display for RunNameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)
    }
}
