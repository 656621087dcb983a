use crate::billing::OutputFormat;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub statement: StatementConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let format = env::var("STATEMENT_FORMAT")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let plays_path = env::var("THEATER_PLAYS_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            environment,
            statement: StatementConfig { format, plays_path },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Defaults for statement generation, overridable from the command line.
#[derive(Debug, Clone)]
pub struct StatementConfig {
    /// Raw `STATEMENT_FORMAT`, validated only when no `--format` is given.
    pub format: Option<String>,
    pub plays_path: Option<PathBuf>,
}

impl StatementConfig {
    pub fn default_format(&self) -> Result<OutputFormat, ConfigError> {
        match &self.format {
            Some(raw) => raw
                .parse::<OutputFormat>()
                .map_err(|_| ConfigError::InvalidFormat { value: raw.clone() }),
            None => Ok(OutputFormat::default()),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFormat { value } => {
                write!(
                    f,
                    "STATEMENT_FORMAT must be one of text, html or json (got '{value}')"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("STATEMENT_FORMAT");
        env::remove_var("THEATER_PLAYS_PATH");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(
            config.statement.default_format().expect("default format"),
            OutputFormat::Text
        );
        assert!(config.statement.plays_path.is_none());
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn reads_statement_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "CI");
        env::set_var("STATEMENT_FORMAT", "html");
        env::set_var("THEATER_PLAYS_PATH", "data/plays.json");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(
            config.statement.default_format().expect("html format"),
            OutputFormat::Html
        );
        assert_eq!(
            config.statement.plays_path,
            Some(PathBuf::from("data/plays.json"))
        );
        reset_env();
    }

    #[test]
    fn unknown_format_fails_only_when_used() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("STATEMENT_FORMAT", "pdf");
        let config = AppConfig::load().expect("config loads with a bad format");
        let err = config
            .statement
            .default_format()
            .expect_err("pdf is not a statement format");
        assert!(matches!(err, ConfigError::InvalidFormat { ref value } if value == "pdf"));
        reset_env();
    }
}
