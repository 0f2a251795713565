//! Stage outcome types.

use axum::http::StatusCode;

/// A redirect a stage decided to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectAction {
    /// Absolute or root-relative `Location` value.
    pub location: String,
    pub status: StatusCode,
}

impl RedirectAction {
    pub fn new(location: impl Into<String>, status: StatusCode) -> Self {
        Self {
            location: location.into(),
            status,
        }
    }

    /// 302 Found, the status used for locale redirects.
    pub fn found(location: impl Into<String>) -> Self {
        Self::new(location, StatusCode::FOUND)
    }
}

/// Outcome of one request-handling stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Nothing to do; the next stage runs.
    Continue,
    /// A redirect was decided; request processing stops here.
    Terminated(RedirectAction),
}

impl Flow {
    pub fn is_terminated(&self) -> bool {
        matches!(self, Flow::Terminated(_))
    }
}
