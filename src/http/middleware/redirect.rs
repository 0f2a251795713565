//! Redirect middleware.
//! Runs the static and language redirect stages before the upstream handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::RequestContext;
use crate::http::state::SharedGatewayState;
use crate::redirect::Flow;

pub async fn redirect_middleware(
    State(state): State<SharedGatewayState>,
    req: Request,
    next: Next,
) -> Response {
    // One snapshot per request; a concurrent reload is seen by the next request.
    let snapshot = state.load_full();
    let ctx = RequestContext::from_request(&req, &snapshot.server, &snapshot.admin_path_prefixes);

    match snapshot.process(&ctx) {
        Ok(Flow::Continue) => next.run(req).await,
        Ok(Flow::Terminated(action)) => action.into_response(),
        Err(e) => e.into_response(),
    }
}
