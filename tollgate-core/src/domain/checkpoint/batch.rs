// tollgate-core/src/domain/checkpoint/batch.rs

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::fmt;

/// Parameters identifying which slice of data a validation runs against.
///
/// Only the identifiers are typed. Everything else a data connector may accept
/// (`batch_spec_passthrough`, `runtime_parameters`, `batch_identifiers`...) is kept
/// in `extra`, in document order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BatchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_connector_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_asset_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_connector_query: Option<DataConnectorQuery>,

    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct DataConnectorQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<BatchIndex>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_filter_parameters: Option<Mapping>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Batch selector inside a `data_connector_query`.
///
/// Negative positions count from the most recent batch (`-1` is the latest).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum BatchIndex {
    Position(i64),
    Positions(Vec<i64>),
    /// Python-style slice expression, e.g. `"[:3]"` or `"-1"`.
    Slice(String),
}

impl BatchIndex {
    pub fn as_position(&self) -> Option<i64> {
        match self {
            Self::Position(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for BatchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(p) => write!(f, "{}", p),
            Self::Positions(ps) => {
                let items: Vec<String> = ps.iter().map(|p| p.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Self::Slice(s) => write!(f, "{}", s),
        }
    }
}

impl BatchRequest {
    pub fn is_empty(&self) -> bool {
        self.datasource_name.is_none()
            && self.data_connector_name.is_none()
            && self.data_asset_name.is_none()
            && self.data_connector_query.is_none()
            && self.extra.is_empty()
    }

    /// Overlays `self` on top of `defaults`: keys set here win, missing keys are
    /// taken from the defaults. `data_connector_query` is merged the same way.
    pub fn merged_over(&self, defaults: &BatchRequest) -> BatchRequest {
        let data_connector_query = match (&self.data_connector_query, &defaults.data_connector_query)
        {
            (Some(own), Some(base)) => Some(own.merged_over(base)),
            (own, base) => own.clone().or_else(|| base.clone()),
        };

        BatchRequest {
            datasource_name: self
                .datasource_name
                .clone()
                .or_else(|| defaults.datasource_name.clone()),
            data_connector_name: self
                .data_connector_name
                .clone()
                .or_else(|| defaults.data_connector_name.clone()),
            data_asset_name: self
                .data_asset_name
                .clone()
                .or_else(|| defaults.data_asset_name.clone()),
            data_connector_query,
            extra: overlay(&defaults.extra, &self.extra),
        }
    }

    /// Short `datasource/connector/asset` label, `?` for missing parts.
    pub fn label(&self) -> String {
        let part = |p: &Option<String>| p.clone().unwrap_or_else(|| "?".to_string());
        format!(
            "{}/{}/{}",
            part(&self.datasource_name),
            part(&self.data_connector_name),
            part(&self.data_asset_name)
        )
    }
}

impl DataConnectorQuery {
    pub fn merged_over(&self, defaults: &DataConnectorQuery) -> DataConnectorQuery {
        let batch_filter_parameters = match (
            &self.batch_filter_parameters,
            &defaults.batch_filter_parameters,
        ) {
            (Some(own), Some(base)) => Some(overlay(base, own)),
            (own, base) => own.clone().or_else(|| base.clone()),
        };

        DataConnectorQuery {
            index: self.index.clone().or_else(|| defaults.index.clone()),
            batch_filter_parameters,
            limit: self.limit.or(defaults.limit),
            extra: overlay(&defaults.extra, &self.extra),
        }
    }
}

fn overlay(base: &Mapping, top: &Mapping) -> Mapping {
    let mut merged = base.clone();
    for (key, value) in top {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
