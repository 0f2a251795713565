//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → compiled into resolver state by the HTTP server
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server swaps its resolver state atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, log_warnings, parse_config, read_config, ConfigError, ConfigWarning};
pub use schema::{
    GatewayConfig, LanguageRedirectConfig, ListenerConfig, LogFormat, MatchType,
    ObservabilityConfig, RedirectRuleConfig, ServerConfig, SiteConfig, SourceMatch,
    StaticRedirectConfig, TimeoutConfig, UpstreamConfig,
};
