use crate::analysis_config::AnalysisConfig;
use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: AppSettings,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub analysis: AnalysisConfig,
}

impl Settings {
    /// Rejects configurations that would misbehave at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate().map_err(ConfigError::ValidationError)
    }
}

/// Identity and runtime mode of the application.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub environment: Environment,
    /// When set, transport error bodies may include defect details.
    /// Must stay off in production.
    pub debug: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "prism".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Bind address and request limits for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

/// Connection-pool parameters. The connection URL itself comes from the
/// `DATABASE_URL` environment variable, never from the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self { max_connections: 10, acquire_timeout_secs: 5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_a_valid_development_configuration() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.app.environment, Environment::Development);
        assert!(!settings.app.debug);
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.database.max_connections, 10);
    }

    #[test]
    fn environment_deserializes_from_lowercase() {
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert!(env.is_production());
    }
}
