// Declare the modules that make up this crate.
pub mod analysis_config;
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use analysis_config::{AnalysisConfig, ScoreWeights};
pub use error::ConfigError;
pub use settings::{AppSettings, DatabaseSettings, Environment, ServerSettings, Settings};

/// Loads the application settings.
///
/// Reads `config.toml` when present, then applies `PRISM_`-prefixed
/// environment overrides (e.g. `PRISM_SERVER__PORT=8080`). Every
/// section has defaults, so a missing file yields a fully usable
/// development configuration.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`.
        .add_source(config::File::with_name("config.toml").required(false))
        // Environment variables override the file, `__` separates sections.
        .add_source(config::Environment::with_prefix("PRISM").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct.
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
