//! Language redirect errors.

use thiserror::Error;

/// Site registry inconsistencies detected while resolving a redirect.
///
/// These indicate a misconfigured deployment and are surfaced to the
/// operator instead of falling through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedirectError {
    #[error("no sites found in group id {group_id}")]
    NoSitesInGroup { group_id: u32 },

    #[error("no locales found, so no fallback locale could be determined")]
    NoFallbackLocale,

    #[error("no site group matches the request host and no primary site is configured")]
    NoPrimarySite,
}

impl RedirectError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoSitesInGroup { .. } => "no_sites_in_group",
            Self::NoFallbackLocale => "no_fallback_locale",
            Self::NoPrimarySite => "no_primary_site",
        }
    }
}
