use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration for applications embedding Forma.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormaConfig {
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

/// Model construction knobs.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub duplicate_params: DuplicatePolicy,
}

/// What a model does when two parameters share a name.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later parameter replaces the earlier one.
    #[default]
    LastWins,
    /// Construction fails.
    Reject,
}

/// Logging output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub name: String,
    /// Default level directive, e.g. `"info"` or `"forma_model=debug"`.
    pub level: String,
    pub console: bool,
    /// Log files are written as JSON lines.
    pub json: bool,
    /// Rolling log files are written here when set.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "forma".to_owned(),
            level: "info".to_owned(),
            console: true,
            json: false,
            directory: None,
        }
    }
}
