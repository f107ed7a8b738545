use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::telemetry::TelemetryConfig;
use crate::errors::config::ConfigError;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq, Clone)]
#[serde(deny_unknown_fields)]
/// The configuration for the join evaluator
pub struct Config {
    #[serde(default)]
    /// evaluation options applied to every join
    pub options: EvaluatorOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// log output; no subscriber is installed when absent
    pub telemetry: Option<TelemetryConfig>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(ConfigError::Parse)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Serialize)
    }

    pub fn json_schema() -> Result<String, ConfigError> {
        let schema = schemars::schema_for!(Config);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq, Clone)]
#[serde(deny_unknown_fields)]
pub struct EvaluatorOptions {
    #[serde(default)]
    /// how equality joins are executed. Default: Hash
    pub join_strategy: JoinStrategy,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// upper bound on |left| * |right| for cross joins
    pub cross_join_row_limit: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq, Clone, Copy)]
pub enum JoinStrategy {
    /// Index the inner side by join key when the predicate is a conjunction of column equalities.
    #[default]
    Hash,
    /// Always compare every pair of rows.
    NestedLoop,
}
