use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{
    BatchSettings, CategoryLabels, GrowthThresholds, LoggingSettings, PredictabilityRules,
    ValuationSettings,
};
pub use telemetry::init_tracing;

/// Environment variables with this prefix override file values,
/// e.g. `INCROLINK__VALUATION__PROJECTION_YEARS=7`.
pub const ENV_PREFIX: &str = "INCROLINK";

/// Loads the engine configuration from `config.toml` in the working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config.toml")
}

/// Loads the engine configuration from `path`, layering environment overrides on top.
///
/// The file is optional: every setting has a default, so an absent file yields
/// the standard thresholds and labels. The result is validated before it is returned.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        path = %path.display(),
        file_found = path.is_file(),
        projection_years = config.valuation.projection_years,
        "Configuration loaded."
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config_from("no-such-dir/incrolink.toml").unwrap();
        assert_eq!(config.valuation.projection_years, 5);
        assert!(!config.batch.sequential);
    }

    #[test]
    fn file_values_are_loaded_and_validated() {
        let dir = std::env::temp_dir().join(format!("incrolink-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let good = dir.join("good.toml");
        writeln!(std::fs::File::create(&good).unwrap(), "[valuation]\nprojection_years = 3").unwrap();
        assert_eq!(load_config_from(&good).unwrap().valuation.projection_years, 3);

        let bad = dir.join("bad.toml");
        writeln!(std::fs::File::create(&bad).unwrap(), "[valuation]\nprojection_years = 0").unwrap();
        assert!(matches!(load_config_from(&bad), Err(ConfigError::ValidationError(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
