use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitializationError {
    #[error("Invalid log level '{input}'. Valid levels: {valid_levels:?}")]
    InvalidLogLevel {
        /// Configuration key the value was read from, if any.
        key: Option<String>,
        input: String,
        valid_levels: Vec<String>,
    },

    #[error("Cannot load logging configuration from '{}'", path.display())]
    ConfigFileUnreadable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Resource unavailable: {resource} ({details})")]
    ResourceUnavailable { resource: String, details: String },

    #[error("Logging backend initialization failed: {details}")]
    BackendInitFailed {
        details: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl InitializationError {
    /// Whether initialization still ends with the configured backend in place.
    pub fn is_recoverable(&self) -> bool {
        match self {
            InitializationError::InvalidLogLevel { .. } => true,
            InitializationError::ConfigFileUnreadable { .. } => true,
            InitializationError::ResourceUnavailable { .. } => true,
            InitializationError::BackendInitFailed { .. } => false,
        }
    }

    /// How the initializer degrades when it hits this error.
    pub fn fallback_strategy(&self) -> FallbackStrategy {
        match self {
            InitializationError::InvalidLogLevel { .. } => FallbackStrategy::UseDefaultLevel,
            InitializationError::ConfigFileUnreadable { .. } => FallbackStrategy::SkipSource,
            InitializationError::ResourceUnavailable { .. } => FallbackStrategy::UsePlaceholder,
            InitializationError::BackendInitFailed { .. } => FallbackStrategy::UseDefaultLevel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStrategy {
    UseDefaultLevel,
    SkipSource,
    UsePlaceholder,
}

impl FallbackStrategy {
    pub fn describe(&self) -> &'static str {
        match self {
            FallbackStrategy::UseDefaultLevel => "using default level",
            FallbackStrategy::SkipSource => "skipping configuration source",
            FallbackStrategy::UsePlaceholder => "using placeholder",
        }
    }
}

/// Reports a startup error on stderr. The subsystem keeps running, so this
/// is the only trace the error leaves.
pub(crate) fn report(error: &InitializationError) {
    let severity = if error.is_recoverable() { "Warning" } else { "Error" };
    eprintln!("{severity}: {}, {}", error, error.fallback_strategy().describe());
}
