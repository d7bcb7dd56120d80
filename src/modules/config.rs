use std::env;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;

use crate::errors::{CustomResult, Error};

pub const DEFAULT_TIMING_API_URL: &str = "https://api.openf1.org/v1";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub logging_level: String,
    pub log_file: String,
    pub timing_api_url: String,
    pub timing_api_timeout: Duration,
    pub min_degradation_samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            logging_level: "INFO".to_string(),
            log_file: "program.log".to_string(),
            timing_api_url: DEFAULT_TIMING_API_URL.to_string(),
            timing_api_timeout: Duration::from_secs(30),
            min_degradation_samples: 10,
        }
    }
}

impl Config {
    /// # load the config from the environment
    /// variables from a `.env` file are loaded first. unset variables fall back to the defaults.
    ///
    /// ## Returns
    /// * `Config` - the loaded config
    /// * `Error::ConfigError` - a numeric variable could not be parsed
    pub fn from_env() -> CustomResult<Config> {
        dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// # build the config from a key lookup
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> CustomResult<Config> {
        let defaults = Config::default();

        let timeout_secs = parse_or(&lookup, "TIMING_API_TIMEOUT_SECS", defaults.timing_api_timeout.as_secs())?;

        Ok(Config {
            logging_level: lookup("LOGGING_LEVEL")
                .map(|level| level.trim().to_uppercase())
                .unwrap_or(defaults.logging_level),
            log_file: lookup("LOG_FILE").unwrap_or(defaults.log_file),
            timing_api_url: lookup("TIMING_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.timing_api_url),
            timing_api_timeout: Duration::from_secs(timeout_secs),
            min_degradation_samples: parse_or(&lookup, "MIN_DEGRADATION_SAMPLES", defaults.min_degradation_samples)?,
        })
    }
}

fn parse_or<T: FromStr, F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: T) -> CustomResult<T> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse::<T>().map_err(|_| Error::ConfigError {
            key: key.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.min_degradation_samples, 10);
    }

    #[test]
    fn values_are_read_and_normalised() {
        let config = Config::from_lookup(lookup_from(&[
            ("LOGGING_LEVEL", "debug"),
            ("TIMING_API_URL", "http://localhost:9000/v1/"),
            ("TIMING_API_TIMEOUT_SECS", "5"),
            ("MIN_DEGRADATION_SAMPLES", "6"),
        ]))
        .unwrap();

        assert_eq!(config.logging_level, "DEBUG");
        assert_eq!(config.timing_api_url, "http://localhost:9000/v1");
        assert_eq!(config.timing_api_timeout, Duration::from_secs(5));
        assert_eq!(config.min_degradation_samples, 6);
    }

    #[test]
    fn malformed_threshold_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("MIN_DEGRADATION_SAMPLES", "ten")]));
        match result {
            Err(Error::ConfigError { key, value }) => {
                assert_eq!(key, "MIN_DEGRADATION_SAMPLES");
                assert_eq!(value, "ten");
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
