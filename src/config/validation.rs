//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses, site URLs and redirect rules
//! - Ensure group resolution always has a safe default
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::config::schema::{GatewayConfig, MatchType};
use crate::sites::resolve_alias;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid host:port '{value}'")]
    InvalidAuthority { field: &'static str, value: String },

    #[error("site '{handle}': invalid base_url '{base_url}'")]
    InvalidBaseUrl { handle: String, base_url: String },

    #[error("site '{handle}': language must not be empty")]
    EmptyLanguage { handle: String },

    #[error("duplicate site handle '{0}'")]
    DuplicateHandle(String),

    #[error("language redirect is enabled but no site is primary")]
    MissingPrimarySite,

    #[error("static redirect #{index}: status {status} is not a redirect status")]
    InvalidRedirectStatus { index: usize, status: u16 },

    #[error("static redirect #{index}: invalid pattern: {message}")]
    InvalidPattern { index: usize, message: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if Authority::from_str(&config.upstream.address).is_err() {
        errors.push(ValidationError::InvalidAuthority {
            field: "upstream.address",
            value: config.upstream.address.clone(),
        });
    }
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    let mut handles = HashSet::new();
    for site in &config.sites {
        if !handles.insert(site.handle.as_str()) {
            errors.push(ValidationError::DuplicateHandle(site.handle.clone()));
        }

        let resolved = resolve_alias(&config.aliases, &site.base_url);
        if site.base_url.trim().is_empty() || Url::parse(&resolved).is_err() {
            errors.push(ValidationError::InvalidBaseUrl {
                handle: site.handle.clone(),
                base_url: site.base_url.clone(),
            });
        }

        if site.language.trim().is_empty() {
            errors.push(ValidationError::EmptyLanguage {
                handle: site.handle.clone(),
            });
        }
    }

    if config.language_redirect.enabled
        && !config.sites.is_empty()
        && !config.sites.iter().any(|s| s.primary)
    {
        errors.push(ValidationError::MissingPrimarySite);
    }

    for (index, rule) in config.static_redirects.rules.iter().enumerate() {
        if !matches!(rule.status, 301 | 302 | 303 | 307 | 308) {
            errors.push(ValidationError::InvalidRedirectStatus {
                index,
                status: rule.status,
            });
        }
        if rule.match_type == MatchType::Regex {
            if let Err(e) = Regex::new(&rule.source) {
                errors.push(ValidationError::InvalidPattern {
                    index,
                    message: e.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
