//! Redirect stages and their shared vocabulary.
//!
//! # Data Flow
//! ```text
//! RequestContext
//!     → static_table.rs (configured URL → URL rules)   → Flow
//!     → language::LanguageRedirect (locale negotiation) → Flow
//!     → Flow::Continue falls through to the upstream application
//! ```
//!
//! # Design Decisions
//! - Each stage returns an explicit `Flow`; the orchestrator decides whether to go on
//! - A terminated flow carries the redirect to send, nothing runs after it
//! - Stages never touch the HTTP response directly

pub mod flow;
pub mod static_table;

pub use flow::{Flow, RedirectAction};
pub use static_table::{StaticRedirectError, StaticRedirectResolver, StaticRedirectTable};
