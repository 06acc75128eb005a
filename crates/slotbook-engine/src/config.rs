//! Engine configuration.
//!
//! Loaded from TOML; every section and key is optional:
//!
//! ```toml
//! [scheduling]
//! unknown_participants = "skip"   # or "reject"
//!
//! [logging]
//! level = "info"
//! format = "pretty"               # pretty | compact | json
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use slotbook_core::{TracingConfig, TracingOutputFormat};
use tracing::Level;

use crate::error::ConfigError;

/// What to do with a requested participant id that is not registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownParticipantPolicy {
    /// Leave the id out of the meeting and carry on.
    #[default]
    Skip,
    /// Fail the whole scheduling call with `UnknownUser`.
    Reject,
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scheduling policy settings.
    pub scheduling: SchedulingSettings,

    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Scheduling policy settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingSettings {
    /// Policy for participant ids that do not resolve to a user.
    pub unknown_participants: UnknownParticipantPolicy,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
            LogFormat::Json => Self::Json,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl EngineConfig {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Builder: set the unknown participant policy.
    pub fn with_unknown_participants(mut self, policy: UnknownParticipantPolicy) -> Self {
        self.scheduling.unknown_participants = policy;
        self
    }

    /// Builder: set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Checks values that TOML parsing alone cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unrecognised log level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log_level().map(|_| ())
    }

    /// Builds the tracing configuration described by `[logging]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unrecognised log level.
    pub fn tracing_config(&self) -> Result<TracingConfig, ConfigError> {
        Ok(TracingConfig::default()
            .with_level(self.log_level()?)
            .with_format(self.logging.format.into()))
    }

    fn log_level(&self) -> Result<Level, ConfigError> {
        self.logging
            .level
            .parse::<Level>()
            .map_err(|e| ConfigError::invalid("logging.level", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotbook_core::{TracingError, init_tracing};
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(
            config.scheduling.unknown_participants,
            UnknownParticipantPolicy::Skip
        );
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn parse_full_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            [scheduling]
            unknown_participants = "reject"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.scheduling.unknown_participants,
            UnknownParticipantPolicy::Reject
        );
        let settings = config.tracing_config().unwrap();
        assert_eq!(settings.default_level, Level::DEBUG);
        assert_eq!(settings.output_format, TracingOutputFormat::Json);
    }

    #[test]
    fn unknown_policy_rejected() {
        let err = EngineConfig::from_toml_str("[scheduling]\nunknown_participants = \"maybe\"")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_log_level_rejected() {
        let err = EngineConfig::from_toml_str("[logging]\nlevel = \"loud\"").unwrap_err();
        match err {
            ConfigError::Invalid { key, .. } => assert_eq!(key, "logging.level"),
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn builder_methods() {
        let config = EngineConfig::default()
            .with_unknown_participants(UnknownParticipantPolicy::Reject)
            .with_log_level("warn");
        assert_eq!(
            config.scheduling.unknown_participants,
            UnknownParticipantPolicy::Reject
        );
        assert_eq!(config.tracing_config().unwrap().default_level, Level::WARN);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scheduling]\nunknown_participants = \"reject\"").unwrap();

        let config = EngineConfig::load_from(file.path()).unwrap();
        assert_eq!(
            config.scheduling.unknown_participants,
            UnknownParticipantPolicy::Reject
        );
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load_from(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    // The only test in this crate that installs a global subscriber.
    #[test]
    fn tracing_config_installs_subscriber_once() {
        let toml = "[logging]\nlevel = \"debug\"\nformat = \"json\"";
        let config = EngineConfig::from_toml_str(toml).unwrap();
        let settings = config.tracing_config().unwrap();
        assert_eq!(settings.default_level, Level::DEBUG);

        assert!(init_tracing(settings.clone()).is_ok());
        assert!(matches!(
            init_tracing(settings),
            Err(TracingError::SetGlobalSubscriber(_))
        ));
    }
}
