//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! TOML file, then `NOBS_*` environment variables
//! (e.g. `NOBS_WEATHER__TIMEOUT_SECS=10`, `NOBS_LOGGING__FORMAT=json`).

mod cities;

use std::path::Path;

pub use cities::CityConfig;
use domain::entities::City;
use domain::errors::DomainError;
use integration_weather::WeatherConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::LoggingConfig;

/// Config file looked up in the working directory when no path is given
const DEFAULT_CONFIG_NAME: &str = "config";

/// Prefix for environment overrides
const ENV_PREFIX: &str = "NOBS";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Open-Meteo client configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Saved cities, in display order
    #[serde(default)]
    pub cities: Vec<CityConfig>,
}

impl AppConfig {
    /// Load configuration from environment and `path`, falling back to an
    /// optional `config.toml` in the working directory
    ///
    /// An explicit path must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or does not match the
    /// configuration schema.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("logging.level", "warn")?
            .set_default("logging.format", "text")?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables
            .add_source(env);

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// The favourite city: the first one marked `pinned`
    #[must_use]
    pub fn pinned_city(&self) -> Option<&CityConfig> {
        self.cities.iter().find(|city| city.pinned)
    }

    /// All saved cities validated into domain cities, pinned city first
    ///
    /// # Errors
    ///
    /// Returns the first invalid city's error.
    pub fn saved_cities(&self) -> Result<Vec<City>, DomainError> {
        let pinned = self.cities.iter().position(|city| city.pinned);

        let mut cities = Vec::with_capacity(self.cities.len());
        if let Some(index) = pinned {
            cities.push(self.cities[index].to_city()?);
        }
        for (index, city) in self.cities.iter().enumerate() {
            if Some(index) != pinned {
                cities.push(city.to_city()?);
            }
        }

        Ok(cities)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use integration_weather::TemperatureUnit;

    use super::*;
    use crate::telemetry::LogFormat;

    fn no_env() -> config::Environment {
        AppConfig::environment().source(Some(config::Map::new()))
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        AppConfig::environment().source(Some(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        ))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = r#"
[weather]
timeout_secs = 10
temperature_unit = "celsius"

[logging]
format = "json"

[[cities]]
name = "Gainesville"
state_abbr = "FL"
latitude = 29.6516
longitude = -82.3248
timezone = "America/New_York"

[[cities]]
name = "Honolulu"
state_abbr = "HI"
latitude = 21.3069
longitude = -157.8583
timezone = "Pacific/Honolulu"
pinned = true
"#;

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::load_with_env(None, no_env()).unwrap();

        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_secs, 30);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.cities.is_empty());
        assert!(config.pinned_city().is_none());
    }

    #[test]
    fn loads_toml_file() {
        let file = toml_file(SAMPLE);
        let config = AppConfig::load_with_env(Some(file.path()), no_env()).unwrap();

        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(config.weather.temperature_unit, TemperatureUnit::Celsius);
        assert_eq!(
            config.weather.air_quality_base_url,
            "https://air-quality-api.open-meteo.com/v1"
        );
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.cities.len(), 2);
        assert_eq!(config.pinned_city().unwrap().name, "Honolulu");
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file(SAMPLE);
        let config = AppConfig::load_with_env(
            Some(file.path()),
            env(&[
                ("NOBS_WEATHER__TIMEOUT_SECS", "5"),
                ("NOBS_LOGGING__LEVEL", "debug"),
            ]),
        )
        .unwrap();

        assert_eq!(config.weather.timeout_secs, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result =
            AppConfig::load_with_env(Some(Path::new("/nonexistent/nobs.toml")), no_env());
        assert!(result.is_err());
    }

    #[test]
    fn saved_cities_puts_pinned_first() {
        let file = toml_file(SAMPLE);
        let config = AppConfig::load_with_env(Some(file.path()), no_env()).unwrap();

        let cities = config.saved_cities().unwrap();
        let names: Vec<_> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Honolulu", "Gainesville"]);
    }

    #[test]
    fn saved_cities_reports_invalid_city() {
        let config = AppConfig {
            cities: vec![CityConfig {
                name: "Nowhere".to_string(),
                state_abbr: String::new(),
                latitude: 0.0,
                longitude: 0.0,
                timezone: "Not/AZone".to_string(),
                pinned: false,
            }],
            ..AppConfig::default()
        };

        assert!(config.saved_cities().is_err());
    }
}
