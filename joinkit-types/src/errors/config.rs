use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[source] serde_yaml::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml::Error),
    #[error("Failed to render config schema: {0}")]
    Schema(#[from] serde_json::Error),
}
