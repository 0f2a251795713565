//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Reconstruct the public absolute URL of a request
//! - Extract everything the redirect stages need into a `RequestContext`
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Forwarded headers are ignored unless explicitly trusted
//! - A request without any host yields a path-only URL, which never redirects

use axum::http::{header, HeaderMap, HeaderValue, Request, Uri};
use serde::Serialize;
use tower_http::request_id::{MakeRequestId, RequestId};
use url::Url;
use uuid::Uuid;

use crate::config::ServerConfig;

pub const X_REQUEST_ID: &str = "x-request-id";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// What the redirect stages know about one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    /// Public URL including query string.
    pub absolute_url: String,
    /// Path only, starting with `/`.
    pub path: String,
    /// Raw query string without the `?`.
    pub query: Option<String>,
    /// Raw `Accept-Language` header value.
    pub accept_language: Option<String>,
    /// Admin (control panel) request; redirects never apply.
    pub is_admin: bool,
}

impl RequestContext {
    /// Build the context for an incoming request.
    pub fn from_request<B>(
        request: &Request<B>,
        server: &ServerConfig,
        admin_path_prefixes: &[String],
    ) -> Self {
        let headers = request.headers();
        let uri = request.uri();

        let scheme = forwarded(headers, X_FORWARDED_PROTO, server.trust_forwarded_headers)
            .unwrap_or_else(|| server.public_scheme.clone());

        let host = forwarded(headers, X_FORWARDED_HOST, server.trust_forwarded_headers)
            .or_else(|| header_str(headers, header::HOST.as_str()))
            .or_else(|| uri.authority().map(|a| a.to_string()));

        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());

        let absolute_url = match host {
            Some(host) => format!("{}://{}{}", scheme, host, path_and_query),
            None => path_and_query,
        };

        Self::from_parts(
            absolute_url,
            uri,
            header_str(headers, header::ACCEPT_LANGUAGE.as_str()),
            admin_path_prefixes,
        )
    }

    /// Build a context from a bare absolute URL, as the CLI does.
    pub fn from_url(
        absolute_url: &str,
        accept_language: Option<String>,
        admin_path_prefixes: &[String],
    ) -> Self {
        let (path, query) = match Url::parse(absolute_url) {
            Ok(url) => (url.path().to_string(), url.query().map(ToString::to_string)),
            Err(_) => match absolute_url.parse::<Uri>() {
                Ok(uri) => (uri.path().to_string(), uri.query().map(ToString::to_string)),
                Err(_) => ("/".to_string(), None),
            },
        };

        Self {
            is_admin: is_admin_path(&path, admin_path_prefixes),
            absolute_url: absolute_url.to_string(),
            path,
            query,
            accept_language,
        }
    }

    fn from_parts(
        absolute_url: String,
        uri: &Uri,
        accept_language: Option<String>,
        admin_path_prefixes: &[String],
    ) -> Self {
        let path = uri.path().to_string();
        Self {
            is_admin: is_admin_path(&path, admin_path_prefixes),
            absolute_url,
            query: uri.query().map(ToString::to_string),
            path,
            accept_language,
        }
    }

    /// Path plus `?query` when present.
    pub fn path_and_query(&self) -> String {
        match self.query.as_deref() {
            Some(q) if !q.is_empty() => format!("{}?{}", self.path, q),
            _ => self.path.clone(),
        }
    }
}

/// True when `path` equals or is nested under one of `prefixes`.
pub fn is_admin_path(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| {
        let prefix = prefix.trim_end_matches('/');
        !prefix.is_empty()
            && path
                .strip_prefix(prefix)
                .map(|rest| rest.is_empty() || rest.starts_with('/'))
                .unwrap_or(false)
    })
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// First value of a forwarded header, if trusted.
fn forwarded(headers: &HeaderMap, name: &str, trusted: bool) -> Option<String> {
    if !trusted {
        return None;
    }
    header_str(headers, name)
        .and_then(|v| v.split(',').next().map(|s| s.trim().to_string()))
        .filter(|v| !v.is_empty())
}
