use std::env;

use thiserror::Error;

use crate::contact::DEFAULT_WEBHOOK_URL;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database: String,
    pub redis_url: Option<String>,
    pub contact_webhook_url: String,
}

impl Config {
    /// Read from the process environment (call `dotenv()` first to pick up `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // empty values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("SERVICE_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "SERVICE_PORT",
                value: raw.clone(),
            })?,
            None => 3003,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            mongodb_uri: get("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?,
            database: get("MONGODB_DB").unwrap_or_else(|| "catalog".into()),
            redis_url: get("REDIS_URL"),
            contact_webhook_url: get("CONTACT_WEBHOOK_URL").unwrap_or_else(|| DEFAULT_WEBHOOK_URL.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[("MONGODB_URI", "mongodb://localhost:27017")]).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 3003);
        assert_eq!(cfg.database, "catalog");
        assert_eq!(cfg.redis_url, None);
        assert_eq!(cfg.contact_webhook_url, DEFAULT_WEBHOOK_URL);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("MONGODB_URI", "mongodb://db:27017"),
            ("MONGODB_DB", "supplements"),
            ("SERVICE_PORT", "8080"),
            ("REDIS_URL", "redis://cache:6379"),
            ("CONTACT_WEBHOOK_URL", "http://localhost:9000/hook"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.database, "supplements");
        assert_eq!(cfg.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(cfg.contact_webhook_url, "http://localhost:9000/hook");
    }

    #[test]
    fn test_missing_mongodb_uri() {
        let err = config(&[("MONGODB_URI", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("MONGODB_URI")));
    }

    #[test]
    fn test_invalid_port() {
        let err = config(&[("MONGODB_URI", "mongodb://x"), ("SERVICE_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "SERVICE_PORT", .. }));
    }
}
