use crate::theme::{ThemeChoice, UnknownTheme};
use reqwest::Url;
use std::{env, time::Duration};
use thiserror::Error;

pub const DEFAULT_UPSTREAM_URL: &str = "https://github-contributions-api.jogruber.de/v4/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("{var} must be a whole number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
    #[error("GARDEN_THEME: {0}")]
    Theme(#[from] UnknownTheme),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upstream_url: Url,
    pub timeout: Duration,
    pub theme: ThemeChoice,
    pub public_url: Option<Url>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let upstream = lookup("GARDEN_UPSTREAM_URL");
        let mut config = Config {
            port: DEFAULT_PORT,
            upstream_url: parse_url(
                "GARDEN_UPSTREAM_URL",
                upstream.as_deref().unwrap_or(DEFAULT_UPSTREAM_URL),
            )?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            theme: ThemeChoice::Auto,
            public_url: None,
        };

        if let Some(value) = lookup("PORT") {
            config.port = parse_number("PORT", &value)?;
        }
        if let Some(value) = lookup("GARDEN_TIMEOUT_SECS") {
            let secs: u64 = parse_number("GARDEN_TIMEOUT_SECS", &value)?;
            config.timeout = Duration::from_secs(secs.max(1));
        }
        if let Some(value) = lookup("GARDEN_THEME") {
            config.theme = value.parse()?;
        }
        if let Some(value) = lookup("GARDEN_PUBLIC_URL").filter(|v| !v.trim().is_empty()) {
            config.public_url = Some(parse_url("GARDEN_PUBLIC_URL", &value)?);
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|err| ConfigError::InvalidUrl {
        var,
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            var,
            reason: "must be a hierarchical http(s) URL".to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Season;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_env() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_url.as_str(), DEFAULT_UPSTREAM_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.theme, ThemeChoice::Auto);
        assert!(config.public_url.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "9001"),
            ("GARDEN_UPSTREAM_URL", "http://127.0.0.1:4000/v4/"),
            ("GARDEN_TIMEOUT_SECS", "3"),
            ("GARDEN_THEME", "winter"),
            ("GARDEN_PUBLIC_URL", "https://garden.example/"),
        ])
        .unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.upstream_url.port(), Some(4000));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.theme, ThemeChoice::Fixed(Season::Winter));
        assert_eq!(config.public_url.unwrap().host_str(), Some("garden.example"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidNumber { var: "PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("GARDEN_UPSTREAM_URL", "mailto:someone@example.com")]),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            config_from(&[("GARDEN_THEME", "neon")]),
            Err(ConfigError::Theme(_))
        ));
    }

    #[test]
    fn zero_timeout_is_raised_to_one_second() {
        let config = config_from(&[("GARDEN_TIMEOUT_SECS", "0")]).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
