use std::fmt;

use crate::config::ConfigError;
use crate::resolution::LoadError;
use crate::telemetry::TelemetryError;

/// Top-level error for processes embedding the engine: configuration,
/// telemetry bootstrap, and snapshot loading failures.
#[derive(Debug)]
pub enum EngineError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Load(LoadError),
    Io(std::io::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Config(err) => write!(f, "configuration error: {err}"),
            EngineError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            EngineError::Load(err) => write!(f, "snapshot load error: {err}"),
            EngineError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Config(err) => Some(err),
            EngineError::Telemetry(err) => Some(err),
            EngineError::Load(err) => Some(err),
            EngineError::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for EngineError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<LoadError> for EngineError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<std::io::Error> for EngineError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
