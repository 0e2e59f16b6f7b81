use super::initialization::{InitializationError, report};
use crate::domain::Severity;
use std::collections::HashMap;
use std::path::Path;

/// Minimum severity override. Exact severity name, e.g. `ERROR`.
pub const LEVEL_KEY: &str = "dominion.logging.level";
/// Prefixes the logger name into every message when exactly `true`.
pub const LOG_CALLER_KEY: &str = "dominion.logging.log-caller";
/// Suppresses the startup banner when exactly `false`.
pub const SHOW_BANNER_KEY: &str = "dominion.show-banner";
/// Environment variable naming an optional TOML properties file.
pub const CONFIG_FILE_ENV: &str = "DOMINION_LOGGING_CONFIG";

/// Key/value configuration lookup.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads keys from the process environment, `dominion.logging.level`
/// becoming `DOMINION_LOGGING_LEVEL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl EnvSource {
    pub fn env_var_name(key: &str) -> String {
        key.chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect()
    }
}

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(Self::env_var_name(key)).ok()
    }
}

/// In-memory properties, usually loaded from a TOML file.
///
/// Nested tables flatten to dotted keys, so both of these set the level:
///
/// ```toml
/// [dominion.logging]
/// level = "DEBUG"
/// ```
///
/// ```toml
/// "dominion.logging.level" = "DEBUG"
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertiesSource {
    values: HashMap<String, String>,
}

impl PropertiesSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn from_toml_str(document: &str) -> Result<Self, toml::de::Error> {
        let table: toml::Table = document.parse()?;
        let mut values = HashMap::new();
        flatten_into(&mut values, None, &table);
        Ok(Self { values })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InitializationError> {
        let path = path.as_ref();
        let unreadable = |source: Box<dyn std::error::Error + Send + Sync>| {
            InitializationError::ConfigFileUnreadable {
                path: path.to_path_buf(),
                source,
            }
        };

        let document = std::fs::read_to_string(path).map_err(|e| unreadable(Box::new(e)))?;
        Self::from_toml_str(&document).map_err(|e| unreadable(Box::new(e)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn flatten_into(values: &mut HashMap<String, String>, prefix: Option<&str>, table: &toml::Table) {
    for (key, value) in table {
        let full_key = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };

        match value {
            toml::Value::Table(nested) => flatten_into(values, Some(&full_key), nested),
            toml::Value::String(s) => {
                values.insert(full_key, s.clone());
            }
            other => {
                values.insert(full_key, other.to_string());
            }
        }
    }
}

impl ConfigSource for PropertiesSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Ordered stack of sources; the first one that knows a key wins.
#[derive(Default)]
pub struct LayeredSource {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl ConfigSource for LayeredSource {
    fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(key))
    }
}

/// Source used by the process-wide system: the environment, layered over
/// the properties file named by `DOMINION_LOGGING_CONFIG` if there is one.
pub fn default_source() -> LayeredSource {
    let layered = LayeredSource::new().with_source(EnvSource);

    let Ok(path) = std::env::var(CONFIG_FILE_ENV) else {
        return layered;
    };

    match PropertiesSource::from_file(&path) {
        Ok(properties) => layered.with_source(properties),
        Err(e) => {
            report(&e);
            layered
        }
    }
}

/// Settings resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub severity: Severity,
    pub log_caller: bool,
    pub show_banner: bool,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            severity: Severity::Info,
            log_caller: false,
            show_banner: true,
        }
    }
}

pub struct ConfigResolver<'a> {
    source: &'a dyn ConfigSource,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(source: &'a dyn ConfigSource) -> Self {
        Self { source }
    }

    pub fn resolve(&self) -> Result<EffectiveConfig, InitializationError> {
        let severity = match self.source.get(LEVEL_KEY) {
            Some(level) => level.parse().map_err(|e| match e {
                InitializationError::InvalidLogLevel {
                    input,
                    valid_levels,
                    ..
                } => InitializationError::InvalidLogLevel {
                    key: Some(LEVEL_KEY.to_string()),
                    input,
                    valid_levels,
                },
                other => other,
            })?,
            None => Severity::default(),
        };

        // Only the exact strings count: anything else keeps the default
        let log_caller = self.source.get(LOG_CALLER_KEY).as_deref() == Some("true");
        let show_banner = self.source.get(SHOW_BANNER_KEY).as_deref() != Some("false");

        Ok(EffectiveConfig {
            severity,
            log_caller,
            show_banner,
        })
    }
}
