//! Locale-based redirection.
//!
//! # Data Flow
//! ```text
//! RequestContext (absolute URL, path, query, Accept-Language)
//!     → resolver.rs: already on a site boundary? → Continue
//!     → resolver.rs: resolve site group for the host
//!     → accept.rs: Accept-Language → ranked preferences
//!     → negotiate.rs: preferences × group locales → locale
//!     → resolver.rs: locale → site → target URL → Flow::Terminated(302)
//! ```
//!
//! # Design Decisions
//! - Malformed URLs never redirect
//! - Broken site registries are hard errors, not silent fallthrough
//! - Registry order decides every tie

pub mod accept;
pub mod error;
pub mod negotiate;
pub mod resolver;

pub use accept::{parse_accept_language, LocalePreference};
pub use error::RedirectError;
pub use negotiate::negotiate_language;
pub use resolver::{LanguageRedirect, RedirectTarget};
