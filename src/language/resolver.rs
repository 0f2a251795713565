//! Language redirect resolution.
//!
//! # Responsibilities
//! - Detect whether the current URL already sits on a site boundary
//! - Resolve which site group the request host belongs to
//! - Negotiate the visitor's locale within that group
//! - Build the redirect target, preserving path and query string

use serde::Serialize;

use crate::http::request::RequestContext;
use crate::language::accept::parse_accept_language;
use crate::language::error::RedirectError;
use crate::language::negotiate::negotiate_language;
use crate::observability::metrics;
use crate::redirect::{Flow, RedirectAction};
use crate::sites::{Site, SiteRegistry};

/// The site and URL a visitor should be sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectTarget {
    pub site: Site,
    pub locale: String,
    pub url: String,
}

/// Resolves locale redirects against a site registry.
pub struct LanguageRedirect<'a> {
    registry: &'a dyn SiteRegistry,
    enabled: bool,
}

impl<'a> LanguageRedirect<'a> {
    pub fn new(registry: &'a dyn SiteRegistry, enabled: bool) -> Self {
        Self { registry, enabled }
    }

    /// Run the language stage for one request.
    ///
    /// Admin requests and a disabled feature flag always continue.
    pub fn handle(&self, request: &RequestContext) -> Result<Flow, RedirectError> {
        if !self.enabled || request.is_admin {
            return Ok(Flow::Continue);
        }

        match self.decide(request)? {
            Some(target) => {
                tracing::info!(
                    from = %request.absolute_url,
                    to = %target.url,
                    site = %target.site.handle,
                    locale = %target.locale,
                    "Language redirect"
                );
                metrics::record_language_redirect(&target.locale);
                Ok(Flow::Terminated(RedirectAction::found(target.url)))
            }
            None => Ok(Flow::Continue),
        }
    }

    /// Compute the redirect for `request`, ignoring the stage guards.
    pub fn decide(&self, request: &RequestContext) -> Result<Option<RedirectTarget>, RedirectError> {
        if !self.needs_redirect(&request.absolute_url) {
            return Ok(None);
        }

        let group_id = self.figure_out_group_id(&request.absolute_url)?;
        let sites = self.registry.sites_by_group(group_id, false);
        if sites.is_empty() {
            return Err(RedirectError::NoSitesInGroup { group_id });
        }

        let locales: Vec<String> = sites.iter().map(|s| s.locale()).collect();
        let fallback = fallback_locale(&sites)?;

        let preferences = parse_accept_language(request.accept_language.as_deref().unwrap_or(""));
        let locale = negotiate_language(&preferences, &locales, &fallback);

        let index = locales.iter().position(|l| *l == locale).unwrap_or(0);
        let site = sites
            .get(index)
            .copied()
            .ok_or(RedirectError::NoSitesInGroup { group_id })?;

        tracing::debug!(
            group_id,
            ?locales,
            fallback = %fallback,
            negotiated = %locale,
            "Negotiated locale"
        );

        Ok(Some(RedirectTarget {
            url: self.target_url(site, request),
            site: site.clone(),
            locale,
        }))
    }

    /// False when `absolute_url` already sits on a configured site, or cannot be parsed.
    pub fn needs_redirect(&self, absolute_url: &str) -> bool {
        let Some(parts) = UrlParts::parse(absolute_url) else {
            tracing::debug!(url = %absolute_url, "Unparsable URL, skipping language redirect");
            return false;
        };

        let current = parts.without_query.trim_end_matches('/');
        let current_dir = format!("{}/", current);

        for site in self.registry.all_sites() {
            let base = self.registry.resolve_alias(&site.base_url);
            let base = base.trim_end_matches('/');

            if base == current || current_dir.starts_with(&format!("{}/", base)) {
                return false;
            }
        }

        true
    }

    /// Find the site group serving the host of `absolute_url`.
    ///
    /// The primary site's group wins if it serves the host or if no group
    /// does; otherwise the first serving group in registry order.
    pub fn figure_out_group_id(&self, absolute_url: &str) -> Result<u32, RedirectError> {
        let origin = UrlParts::parse(absolute_url)
            .map(|p| p.origin)
            .unwrap_or(absolute_url);

        let mut candidates: Vec<u32> = Vec::new();
        let mut primary_group = None;

        for site in self.registry.all_sites() {
            let base = self.registry.resolve_alias(&site.base_url);
            if !candidates.contains(&site.group_id) && serves_origin(&base, origin) {
                candidates.push(site.group_id);
            }
            if site.primary {
                primary_group = Some(site.group_id);
            }
        }

        match primary_group {
            Some(group) if candidates.is_empty() || candidates.contains(&group) => Ok(group),
            _ => candidates.first().copied().ok_or(RedirectError::NoPrimarySite),
        }
    }

    fn target_url(&self, site: &Site, request: &RequestContext) -> String {
        let base = self.registry.resolve_alias(&site.base_url);
        let mut url = base.trim_end_matches('/').to_string();

        if !request.path.starts_with('/') {
            url.push('/');
        }
        url.push_str(&request.path);

        if let Some(query) = request.query.as_deref().filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}

/// Locale of the group's primary site, else of its first site.
fn fallback_locale(sites: &[&Site]) -> Result<String, RedirectError> {
    sites
        .iter()
        .rev()
        .find(|s| s.primary)
        .or_else(|| sites.first())
        .map(|s| s.locale())
        .ok_or(RedirectError::NoFallbackLocale)
}

/// `base` lives under `origin` (`https://host[:port]`), on a segment boundary.
fn serves_origin(base: &str, origin: &str) -> bool {
    match base.strip_prefix(origin) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Raw slices of an absolute URL, taken from the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UrlParts<'a> {
    /// `scheme://authority`
    origin: &'a str,
    /// Origin plus path, no query or fragment.
    without_query: &'a str,
}

impl<'a> UrlParts<'a> {
    /// `None` unless `raw` is an absolute URL with a host and an explicit path.
    fn parse(raw: &'a str) -> Option<Self> {
        let parsed = url::Url::parse(raw).ok()?;
        parsed.host_str()?;

        let authority_start = raw.find("://")? + 3;
        let authority_len = raw[authority_start..]
            .find(['/', '?', '#'])
            .unwrap_or(raw.len() - authority_start);
        let path_start = authority_start + authority_len;

        if !raw[path_start..].starts_with('/') {
            return None;
        }

        let path_len = raw[path_start..]
            .find(['?', '#'])
            .unwrap_or(raw.len() - path_start);

        Some(Self {
            origin: &raw[..path_start],
            without_query: &raw[..path_start + path_len],
        })
    }
}
