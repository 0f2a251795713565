//! Response construction.
//!
//! # Responsibilities
//! - Turn a terminal redirect decision into a `Location` response
//! - Map redirect configuration errors to an application error page
//!
//! # Design Decisions
//! - Configuration errors surface as 500, never as a redirect loop
//! - Error bodies are plain text and carry no registry details

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::language::RedirectError;
use crate::redirect::RedirectAction;

impl IntoResponse for RedirectAction {
    fn into_response(self) -> Response {
        match HeaderValue::from_str(&self.location) {
            Ok(location) => (self.status, [(header::LOCATION, location)]).into_response(),
            Err(_) => {
                tracing::error!(location = %self.location, "Redirect target is not a valid header value");
                (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect target").into_response()
            }
        }
    }
}

impl IntoResponse for RedirectError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Site configuration error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Site configuration error",
        )
            .into_response()
    }
}
