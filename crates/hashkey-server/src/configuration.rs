use std::path::Path;

use pingora::prelude::*;
use serde::Deserialize;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
/// Six hours, the advertised lifetime of a batch.
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 6 * 60 * 60;

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

fn default_cache_max_age() -> u64 {
    DEFAULT_CACHE_MAX_AGE_SECS
}

fn default_allow_origin() -> String {
    "*".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
    /// `max-age` of the `Cache-Control` header on generated key sets.
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_secs: u64,
    /// Value of `Access-Control-Allow-Origin`.
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            cache_max_age_secs: default_cache_max_age(),
            allow_origin: default_allow_origin(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.listen.trim().is_empty() {
            return Err("listen address must not be empty".to_string());
        }
        if self.allow_origin.trim().is_empty() {
            return Err("allow_origin must not be empty".to_string());
        }
        Ok(())
    }

    /// Read the YAML file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let conf_str = std::fs::read_to_string(path).map_err(|e| {
            Error::explain(
                ErrorType::InternalError,
                format!("failed to read server config: {e}"),
            )
        })?;
        Self::from_yaml(&conf_str)
    }

    pub fn from_yaml(conf_str: &str) -> Result<Self> {
        let config: ServerConfig = serde_yaml::from_str(conf_str).map_err(|e| {
            Error::explain(
                ErrorType::InternalError,
                format!("failed to parse server config: {e}"),
            )
        })?;
        config.validate().map_err(|e| {
            Error::explain(
                ErrorType::InternalError,
                format!("invalid server config: {e}"),
            )
        })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
listen: "127.0.0.1:9000"
cache_max_age_secs: 60
allow_origin: "https://keys.example"
"#;
        let config = ServerConfig::from_yaml(yaml).expect("Failed to parse config");
        assert_eq!(config.listen, "127.0.0.1:9000");
        assert_eq!(config.cache_max_age_secs, 60);
        assert_eq!(config.allow_origin, "https://keys.example");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = ServerConfig::from_yaml("listen: \"127.0.0.1:9000\"\n").unwrap();
        assert_eq!(config.cache_max_age_secs, 21600);
        assert_eq!(config.allow_origin, "*");
    }

    #[test]
    fn test_empty_listen_rejected() {
        assert!(ServerConfig::from_yaml("listen: \"\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let config = ServerConfig::load(Path::new("/nonexistent/hashkey.yaml")).unwrap();
        assert_eq!(config.listen, DEFAULT_LISTEN);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"cache_max_age_secs: 120\n").unwrap();
        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.cache_max_age_secs, 120);
        assert_eq!(config.listen, DEFAULT_LISTEN);
    }
}
