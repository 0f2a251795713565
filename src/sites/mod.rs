//! Site registry subsystem.
//!
//! # Data Flow
//! ```text
//! [[sites]] + [aliases] (config)
//!     → site.rs (Site entities, registry order preserved)
//!     → registry.rs (lookup by group, alias resolution)
//!     → consumed read-only by the language redirect resolver
//! ```
//!
//! # Design Decisions
//! - Registry is immutable; a reload builds a new one
//! - Registry order is significant (first match wins everywhere)
//! - Lookups go through the `SiteRegistry` trait so tests can fabricate registries

pub mod registry;
pub mod site;

pub use registry::{resolve_alias, SiteRegistry, StaticSiteRegistry};
pub use site::Site;
