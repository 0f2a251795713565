//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `language_redirect.enabled`.
pub const LANGUAGE_REDIRECT_ENV: &str = "LANGUAGE_REDIRECT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A non-fatal problem found while loading; logged by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    #[error("ignoring unrecognised LANGUAGE_REDIRECT value '{0}'")]
    UnrecognisedLanguageFlag(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, logging any warnings.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let (config, warnings) = read_config(path)?;
    log_warnings(&warnings);
    Ok(config)
}

/// Load and validate configuration, returning warnings instead of logging them.
///
/// Used at startup, before a tracing subscriber is installed.
pub fn read_config(path: &Path) -> Result<(GatewayConfig, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path)?;
    let flag = std::env::var(LANGUAGE_REDIRECT_ENV).ok();
    parse_config_with_flag(&content, flag.as_deref())
}

/// Parse, apply environment overrides, and validate configuration text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let flag = std::env::var(LANGUAGE_REDIRECT_ENV).ok();
    let (config, warnings) = parse_config_with_flag(content, flag.as_deref())?;
    log_warnings(&warnings);
    Ok(config)
}

fn parse_config_with_flag(
    content: &str,
    flag: Option<&str>,
) -> Result<(GatewayConfig, Vec<ConfigWarning>), ConfigError> {
    let mut config: GatewayConfig = toml::from_str(content)?;

    let warnings = apply_language_flag(&mut config, flag).into_iter().collect();

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok((config, warnings))
}

/// Emit warnings through the active subscriber.
pub fn log_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        tracing::warn!("{}", warning);
    }
}

/// Apply the `LANGUAGE_REDIRECT` override, if any.
///
/// Unrecognised values leave the setting unchanged and produce a warning.
pub fn apply_language_flag(
    config: &mut GatewayConfig,
    value: Option<&str>,
) -> Option<ConfigWarning> {
    let value = value?;

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => config.language_redirect.enabled = true,
        "0" | "false" | "no" | "off" | "" => config.language_redirect.enabled = false,
        other => return Some(ConfigWarning::UnrecognisedLanguageFlag(other.to_string())),
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(!config.language_redirect.enabled);
        assert_eq!(config.language_redirect.admin_path_prefixes, vec!["/admin"]);
        assert!(config.static_redirects.enabled);
        assert!(config.sites.is_empty());
    }

    #[test]
    fn test_parse_sites_and_rules() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [language_redirect]
            enabled = true

            [aliases]
            web = "https://example.com"

            [[sites]]
            handle = "en"
            base_url = "@web/"
            language = "en-US"
            group_id = 1
            primary = true

            [[sites]]
            handle = "de"
            base_url = "@web/de"
            language = "de-CH"
            group_id = 1
            enabled = false

            [[static_redirects.rules]]
            source = "^/old/(.*)$"
            destination = "/new/$1"
            match_type = "regex"
            status = 302
            "#,
        )
        .unwrap();

        assert_eq!(config.sites.len(), 2);
        assert!(config.sites[0].primary);
        assert!(config.sites[0].enabled);
        assert!(!config.sites[1].enabled);
        assert_eq!(config.aliases["web"], "https://example.com");

        let rule = &config.static_redirects.rules[0];
        assert_eq!(rule.match_type, crate::config::MatchType::Regex);
        assert_eq!(rule.source_match, crate::config::SourceMatch::Path);
        assert_eq!(rule.status, 302);
    }

    #[test]
    fn test_language_flag_override() {
        let mut config = GatewayConfig::default();

        assert_eq!(apply_language_flag(&mut config, Some("TRUE")), None);
        assert!(config.language_redirect.enabled);

        assert_eq!(
            apply_language_flag(&mut config, Some("maybe")),
            Some(ConfigWarning::UnrecognisedLanguageFlag("maybe".into()))
        );
        assert!(config.language_redirect.enabled);

        assert_eq!(apply_language_flag(&mut config, Some("0")), None);
        assert!(!config.language_redirect.enabled);

        assert_eq!(apply_language_flag(&mut config, None), None);
        assert!(!config.language_redirect.enabled);
    }

    #[test]
    fn test_flag_warning_is_returned_to_caller() {
        let (config, warnings) = parse_config_with_flag(
            r#"
            [language_redirect]
            enabled = true
            "#,
            Some("ture"),
        )
        .unwrap();

        assert!(config.language_redirect.enabled);
        assert_eq!(
            warnings,
            vec![ConfigWarning::UnrecognisedLanguageFlag("ture".into())]
        );
        assert_eq!(
            warnings[0].to_string(),
            "ignoring unrecognised LANGUAGE_REDIRECT value 'ture'"
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = parse_config(
            r#"
            [upstream]
            address = "http://cms:80/"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("upstream.address"));
    }
}
