use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
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

/// Top-level configuration for an embedding process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub documents: DocumentPaths,
    pub reload: ReloadConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let foundation = path_var("APP_FOUNDATION_PATH", "config/foundation.json");
        let governance = path_var("APP_GOVERNANCE_PATH", "config/governance.json");
        let flags = path_var("APP_FLAGS_PATH", "config/feature_flags.json");

        let reload_interval_secs = env::var("APP_RELOAD_INTERVAL_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidReloadInterval)?;
        if reload_interval_secs == 0 {
            return Err(ConfigError::InvalidReloadInterval);
        }

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            documents: DocumentPaths {
                foundation,
                governance,
                flags,
            },
            reload: ReloadConfig {
                interval_secs: reload_interval_secs,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

/// Filesystem locations of the three configuration documents.
#[derive(Debug, Clone)]
pub struct DocumentPaths {
    pub foundation: PathBuf,
    pub governance: PathBuf,
    pub flags: PathBuf,
}

/// Cadence for the document watcher.
#[derive(Debug, Clone, Copy)]
pub struct ReloadConfig {
    pub interval_secs: u64,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidReloadInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidReloadInterval => {
                write!(f, "APP_RELOAD_INTERVAL_SECS must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
