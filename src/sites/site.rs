//! The site entity.

use serde::Serialize;

use crate::config::SiteConfig;

/// One locale-specific presentation of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    pub handle: String,
    /// Absolute URL prefix, possibly alias-prefixed (`@web/de`).
    pub base_url: String,
    /// Locale tag as configured (e.g. `de-CH`).
    pub language: String,
    pub group_id: u32,
    pub primary: bool,
    pub enabled: bool,
}

impl Site {
    /// Lowercased locale tag, the form negotiation works with.
    pub fn locale(&self) -> String {
        self.language.to_lowercase()
    }
}

impl From<&SiteConfig> for Site {
    fn from(config: &SiteConfig) -> Self {
        Self {
            handle: config.handle.clone(),
            base_url: config.base_url.clone(),
            language: config.language.clone(),
            group_id: config.group_id,
            primary: config.primary,
            enabled: config.enabled,
        }
    }
}
