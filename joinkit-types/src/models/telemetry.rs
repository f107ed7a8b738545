use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Clone)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is not set. Default: info
    #[serde(default = "TelemetryConfig::default_filter")]
    pub filter: String,

    /// include the event target in formatted output
    #[serde(default)]
    pub with_target: bool,
}

impl TelemetryConfig {
    pub fn default_filter() -> String {
        "info".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
            with_target: false,
        }
    }
}
