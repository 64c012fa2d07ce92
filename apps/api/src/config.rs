use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_TEMPLATE_BYTES: usize = 256 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Extra `*.tex` templates loaded at startup.
    pub template_dir: Option<PathBuf>,
    /// Upper bound on a template's size, inline or stored.
    pub max_template_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            template_dir: None,
            max_template_bytes: DEFAULT_MAX_TEMPLATE_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            port: match lookup("PORT") {
                Some(v) => v
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            template_dir: lookup("TEMPLATE_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            max_template_bytes: match lookup("MAX_TEMPLATE_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .with_context(|| format!("MAX_TEMPLATE_BYTES must be a byte count, got '{v}'"))?,
                None => defaults.max_template_bytes,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(config.template_dir.is_none());
        assert_eq!(config.max_template_bytes, 262_144);
    }

    #[test]
    fn test_values_from_env() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("RUST_LOG", "debug"),
            ("TEMPLATE_DIR", "/srv/templates"),
            ("MAX_TEMPLATE_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.rust_log, "debug");
        assert_eq!(config.template_dir, Some(PathBuf::from("/srv/templates")));
        assert_eq!(config.max_template_bytes, 1024);
    }

    #[test]
    fn test_invalid_port_fails() {
        assert!(Config::from_lookup(lookup(&[("PORT", "http")])).is_err());
    }

    #[test]
    fn test_invalid_max_bytes_fails() {
        let err = Config::from_lookup(lookup(&[("MAX_TEMPLATE_BYTES", "lots")])).unwrap_err();
        assert!(err.to_string().contains("MAX_TEMPLATE_BYTES"));
    }
}
