//! Locale-aware redirect gateway.
//!
//! Sits in front of a content-management application and, per request,
//! runs a static redirect table and then locale negotiation against the
//! configured sites before forwarding to the application.

pub mod config;
pub mod http;
pub mod language;
pub mod lifecycle;
pub mod observability;
pub mod redirect;
pub mod sites;

pub use config::GatewayConfig;
pub use http::{GatewayState, HttpServer, RequestContext};
pub use language::{LanguageRedirect, RedirectError};
pub use lifecycle::Shutdown;
pub use redirect::{Flow, RedirectAction};
