//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: `{value}`")]
    Env { key: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub const ENV_LOGIN: &str = "DATAFORSEO_LOGIN";
pub const ENV_PASSWORD: &str = "DATAFORSEO_PASSWORD";
pub const ENV_BASE_URL: &str = "DATAFORSEO_BASE_URL";
pub const ENV_PORT: &str = "PORT";
pub const ENV_API_KEY: &str = "API_KEY";

/// Parse a TOML configuration file without validating it.
pub fn read_config_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment-provided values on top of a configuration.
///
/// `lookup` abstracts the environment so callers can supply a fixed map.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(login) = lookup(ENV_LOGIN) {
        config.upstream.login = login;
    }
    if let Some(password) = lookup(ENV_PASSWORD) {
        config.upstream.password = password;
    }
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.upstream.base_url = base_url;
    }
    if let Some(port) = lookup(ENV_PORT) {
        let parsed = port.trim().parse::<u16>().map_err(|_| ConfigError::Env {
            key: ENV_PORT,
            value: port.clone(),
        })?;
        config.listener.set_port(parsed);
    }
    if let Some(api_key) = lookup(ENV_API_KEY) {
        config.auth.api_key = Some(api_key);
    }
    Ok(())
}

/// Build the startup configuration: defaults, then the optional file,
/// then the process environment, then validation.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_credentials_port_and_key() {
        let mut config = ProxyConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_LOGIN, "me@example.com"),
                (ENV_PASSWORD, "pw"),
                (ENV_PORT, "8081"),
                (ENV_API_KEY, "abc"),
            ]),
        )
        .unwrap();

        assert_eq!(config.upstream.login, "me@example.com");
        assert_eq!(config.upstream.password, "pw");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");
        assert_eq!(config.auth.api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_env_rejects_bad_port() {
        let mut config = ProxyConfig::default();
        let err = apply_env_overrides(&mut config, env(&[(ENV_PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { key: ENV_PORT, .. }));
    }

    #[test]
    fn test_missing_env_leaves_config_untouched() {
        let mut config = ProxyConfig::default();
        apply_env_overrides(&mut config, env(&[])).unwrap();
        assert!(config.auth.api_key.is_none());
        assert!(config.upstream.login.is_empty());
    }

    #[test]
    fn test_read_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [listener]
            bind_address = "127.0.0.1:4000"

            [upstream]
            login = "file-login"
            password = "file-password"

            [auth]
            api_key = "file-key"
            "#
        )
        .unwrap();

        let config = read_config_file(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
        assert_eq!(config.upstream.login, "file-login");
        assert_eq!(config.auth.api_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn test_read_config_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener").unwrap();
        assert!(matches!(
            read_config_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_error_display_joins_messages() {
        let err = ConfigError::Validation(vec![
            ValidationError::MissingLogin,
            ValidationError::MissingPassword,
        ]);
        let text = err.to_string();
        assert!(text.starts_with("Validation failed: "));
        assert!(text.contains("DATAFORSEO_LOGIN"));
        assert!(text.contains("DATAFORSEO_PASSWORD"));
    }
}
