//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → middleware/redirect.rs (RequestContext → state.rs stages)
//!         → Flow::Terminated → response.rs (302/301 + Location, or 500)
//!         → Flow::Continue   → server.rs forwards to the upstream application
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod state;

pub use request::{RequestContext, UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
pub use state::{GatewayState, SharedGatewayState};
