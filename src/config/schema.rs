//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The content-management application requests fall through to.
    pub upstream: UpstreamConfig,

    /// How public URLs are reconstructed from incoming requests.
    pub server: ServerConfig,

    /// Site registry, in registry order.
    pub sites: Vec<SiteConfig>,

    /// Aliases usable as the leading segment of a site base URL (`@web`).
    pub aliases: HashMap<String, String>,

    /// Locale-based redirection settings.
    pub language_redirect: LanguageRedirectConfig,

    /// Static redirect table settings.
    pub static_redirects: StaticRedirectConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Public URL reconstruction.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Scheme used for absolute URLs when no trusted forwarded header is present.
    pub public_scheme: String,

    /// Honour `X-Forwarded-Proto` and `X-Forwarded-Host` from a fronting proxy.
    pub trust_forwarded_headers: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            public_scheme: "https".to_string(),
            trust_forwarded_headers: false,
        }
    }
}

/// One locale-specific site.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Unique site identifier for logging.
    pub handle: String,

    /// Absolute URL prefix, optionally starting with an alias.
    pub base_url: String,

    /// Locale tag (e.g. "en-US").
    pub language: String,

    /// Group clustering language alternates of one another.
    pub group_id: u32,

    /// Primary site flag.
    #[serde(default)]
    pub primary: bool,

    /// Disabled sites are skipped when loading a group.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Locale-based redirection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LanguageRedirectConfig {
    /// Global feature flag. Overridable with `LANGUAGE_REDIRECT`.
    pub enabled: bool,

    /// Path prefixes identifying admin (control panel) requests.
    pub admin_path_prefixes: Vec<String>,
}

impl Default for LanguageRedirectConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            admin_path_prefixes: vec!["/admin".to_string()],
        }
    }
}

/// Static redirect table configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticRedirectConfig {
    /// Enable the static redirect stage.
    pub enabled: bool,

    /// Remove the query string before matching.
    pub strip_query_string: bool,

    /// Rules, evaluated in order.
    pub rules: Vec<RedirectRuleConfig>,
}

impl Default for StaticRedirectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strip_query_string: false,
            rules: Vec::new(),
        }
    }
}

/// A single static redirect rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedirectRuleConfig {
    /// Path, URL or regex to match.
    pub source: String,

    /// Redirect target. Regex rules may use `$1`-style captures.
    pub destination: String,

    #[serde(default)]
    pub match_type: MatchType,

    #[serde(default)]
    pub source_match: SourceMatch,

    /// HTTP status of the redirect.
    #[serde(default = "default_redirect_status")]
    pub status: u16,
}

fn default_redirect_status() -> u16 {
    301
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    #[default]
    Exact,
    Regex,
}

/// Which part of the request a rule is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMatch {
    #[default]
    Path,
    FullUrl,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
