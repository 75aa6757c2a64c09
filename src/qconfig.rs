//! The repository-resident `qconfig.json` file.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;

use crate::error::{ActionError, Result};

/// Path of the config file in the target repository.
pub const CONFIG_PATH: &str = "qconfig.json";

/// Parsed `qconfig.json`. The only required field is `base_file`, the
/// repository-relative path whose modification triggers the webhook.
#[derive(Debug, Deserialize)]
pub struct RepoConfig {
    #[serde(default)]
    pub base_file: Option<String>,
}

impl RepoConfig {
    /// Returns the watched file path, or the fatal error reported when the
    /// config file lacks a usable `base_file` key.
    pub fn watched_file(&self) -> Result<&str> {
        match self.base_file.as_deref() {
            Some(path) if !path.is_empty() => Ok(path),
            _ => Err(ActionError::ConfigError(format!(
                "Failed to get base file from config file. Make sure '{}' has the 'base_file' key.",
                CONFIG_PATH
            ))),
        }
    }
}

/// Decodes the base64 transport encoding of the contents API (which embeds
/// newlines) and parses the result as JSON.
pub fn parse_config(encoded: &str) -> Result<RepoConfig> {
    let cleaned: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64.decode(cleaned)?;
    let config: RepoConfig = serde_json::from_slice(&bytes)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(json: &str) -> String {
        BASE64.encode(json.as_bytes())
    }

    #[test]
    fn parses_config_with_base_file() {
        let config = parse_config(&encode(r#"{"base_file": "locales/en.json"}"#)).unwrap();
        assert_eq!(config.watched_file().unwrap(), "locales/en.json");
    }

    #[test]
    fn handles_newlines_in_transport_encoding() {
        let mut encoded = encode(r#"{"base_file": "config/watch.json"}"#);
        encoded.insert(10, '\n');
        encoded.push('\n');
        let config = parse_config(&encoded).unwrap();
        assert_eq!(config.watched_file().unwrap(), "config/watch.json");
    }

    #[test]
    fn missing_base_file_key_is_a_config_error() {
        let config = parse_config(&encode(r#"{"other": 1}"#)).unwrap();
        let err = config.watched_file().unwrap_err();
        assert!(matches!(err, ActionError::ConfigError(_)));
        assert!(err.to_string().contains("base_file"));
    }

    #[test]
    fn empty_base_file_is_a_config_error() {
        let config = parse_config(&encode(r#"{"base_file": ""}"#)).unwrap();
        assert!(config.watched_file().is_err());
    }

    #[test]
    fn invalid_base64_is_a_decode_error() {
        let err = parse_config("not-base64!!!").unwrap_err();
        assert!(matches!(err, ActionError::DecodeError(_)));
    }

    #[test]
    fn invalid_json_is_a_json_error() {
        let err = parse_config(&encode("{nope")).unwrap_err();
        assert!(matches!(err, ActionError::JsonError(_)));
    }
}
