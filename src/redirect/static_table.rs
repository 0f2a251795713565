//! Static redirect table.
//!
//! # Responsibilities
//! - Match a request's path or full URL against configured rules
//! - Count hits per rule
//! - Produce the redirect action for the first matching rule
//!
//! # Design Decisions
//! - Rules compiled once per configuration, evaluated in order
//! - Matching happens on the percent-decoded URL
//! - Resolver errors are returned, never panicked; the caller decides to swallow them

use std::borrow::Cow;

use axum::http::StatusCode;
use dashmap::DashMap;
use regex::Regex;
use thiserror::Error;

use crate::config::{MatchType, RedirectRuleConfig, SourceMatch, StaticRedirectConfig};
use crate::observability::metrics;
use crate::redirect::flow::RedirectAction;

/// Errors raised by a static redirect resolver.
#[derive(Debug, Error)]
pub enum StaticRedirectError {
    #[error("invalid pattern in rule #{index}: {source}")]
    InvalidPattern {
        index: usize,
        #[source]
        source: regex::Error,
    },

    #[error("invalid redirect status {0}")]
    InvalidStatus(u16),

    #[error("static redirect lookup failed: {0}")]
    Lookup(String),
}

/// Resolves a request URL against static redirect rules.
pub trait StaticRedirectResolver: Send + Sync {
    /// Return the redirect for `full_url`/`path`, if any rule matches.
    fn resolve(
        &self,
        full_url: &str,
        path: &str,
    ) -> Result<Option<RedirectAction>, StaticRedirectError>;
}

#[derive(Debug)]
enum RuleMatcher {
    Exact(String),
    Regex(Regex),
}

#[derive(Debug)]
struct CompiledRule {
    matcher: RuleMatcher,
    source_match: SourceMatch,
    destination: String,
    status: u16,
}

impl CompiledRule {
    fn compile(index: usize, rule: &RedirectRuleConfig) -> Result<Self, StaticRedirectError> {
        let matcher = match rule.match_type {
            MatchType::Exact => RuleMatcher::Exact(rule.source.clone()),
            MatchType::Regex => RuleMatcher::Regex(
                Regex::new(&rule.source)
                    .map_err(|source| StaticRedirectError::InvalidPattern { index, source })?,
            ),
        };

        Ok(Self {
            matcher,
            source_match: rule.source_match,
            destination: rule.destination.clone(),
            status: rule.status,
        })
    }

    /// Destination for `subject`, if this rule matches it.
    fn apply<'a>(&'a self, subject: &str) -> Option<Cow<'a, str>> {
        match &self.matcher {
            RuleMatcher::Exact(source) => {
                (source == subject).then_some(Cow::Borrowed(self.destination.as_str()))
            }
            RuleMatcher::Regex(re) => re
                .is_match(subject)
                .then(|| Cow::Owned(re.replace(subject, self.destination.as_str()).into_owned())),
        }
    }
}

/// Rule table built from `[static_redirects]`.
#[derive(Debug)]
pub struct StaticRedirectTable {
    rules: Vec<CompiledRule>,
    strip_query_string: bool,
    hits: DashMap<usize, u64>,
}

impl StaticRedirectTable {
    pub fn from_config(config: &StaticRedirectConfig) -> Result<Self, StaticRedirectError> {
        let rules = config
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| CompiledRule::compile(index, rule))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            strip_query_string: config.strip_query_string,
            hits: DashMap::new(),
        })
    }

    /// Hits recorded for the rule at `index` since the table was built.
    pub fn hits(&self, index: usize) -> u64 {
        self.hits.get(&index).map(|h| *h).unwrap_or(0)
    }

    /// Form-decode `value`; `+` is a space and invalid UTF-8 is replaced.
    fn prepare(&self, value: &str) -> String {
        let spaced = value.replace('+', " ");
        let bytes = urlencoding::decode_binary(spaced.as_bytes());
        let mut decoded = String::from_utf8_lossy(&bytes).into_owned();

        if self.strip_query_string {
            if let Some(idx) = decoded.find('?') {
                decoded.truncate(idx);
            }
        }
        decoded
    }
}

impl StaticRedirectResolver for StaticRedirectTable {
    fn resolve(
        &self,
        full_url: &str,
        path: &str,
    ) -> Result<Option<RedirectAction>, StaticRedirectError> {
        if self.rules.is_empty() {
            return Ok(None);
        }

        let full_url = self.prepare(full_url);
        let path = self.prepare(path);

        for (index, rule) in self.rules.iter().enumerate() {
            let subject = match rule.source_match {
                SourceMatch::Path => path.as_str(),
                SourceMatch::FullUrl => full_url.as_str(),
            };

            let Some(destination) = rule.apply(subject) else {
                continue;
            };

            let status = StatusCode::from_u16(rule.status)
                .map_err(|_| StaticRedirectError::InvalidStatus(rule.status))?;

            let hits = {
                let mut entry = self.hits.entry(index).or_insert(0);
                *entry += 1;
                *entry
            };
            metrics::record_static_redirect(status.as_u16());

            tracing::info!(
                rule = index,
                from = %subject,
                to = %destination,
                status = status.as_u16(),
                hits,
                "Static redirect matched"
            );

            return Ok(Some(RedirectAction::new(destination.into_owned(), status)));
        }

        Ok(None)
    }
}
