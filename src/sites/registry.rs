//! Site lookup.
//!
//! # Responsibilities
//! - Expose all configured sites in registry order
//! - Load the sites of one group, optionally skipping disabled ones
//! - Resolve alias-prefixed base URLs

use std::collections::HashMap;

use crate::config::GatewayConfig;
use crate::sites::site::Site;

/// Read-only view of the host application's sites.
pub trait SiteRegistry: Send + Sync {
    /// Every configured site, in registry order.
    fn all_sites(&self) -> &[Site];

    /// Sites sharing `group_id`, in registry order.
    fn sites_by_group(&self, group_id: u32, include_disabled: bool) -> Vec<&Site> {
        self.all_sites()
            .iter()
            .filter(|s| s.group_id == group_id && (include_disabled || s.enabled))
            .collect()
    }

    /// Expand an alias-prefixed URL. Identity by default.
    fn resolve_alias(&self, value: &str) -> String {
        value.to_string()
    }
}

/// Registry built from the `[[sites]]` and `[aliases]` config sections.
#[derive(Debug, Clone, Default)]
pub struct StaticSiteRegistry {
    sites: Vec<Site>,
    aliases: HashMap<String, String>,
}

impl StaticSiteRegistry {
    pub fn new(sites: Vec<Site>, aliases: HashMap<String, String>) -> Self {
        Self { sites, aliases }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            config.sites.iter().map(Site::from).collect(),
            config.aliases.clone(),
        )
    }
}

impl SiteRegistry for StaticSiteRegistry {
    fn all_sites(&self) -> &[Site] {
        &self.sites
    }

    fn resolve_alias(&self, value: &str) -> String {
        resolve_alias(&self.aliases, value)
    }
}

/// Replace a leading `@name` segment with its configured value.
///
/// Unknown aliases and plain URLs are returned unchanged.
pub fn resolve_alias(aliases: &HashMap<String, String>, value: &str) -> String {
    let Some(rest) = value.strip_prefix('@') else {
        return value.to_string();
    };

    let (name, tail) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };

    match aliases.get(name) {
        Some(target) => format!("{}{}", target.trim_end_matches('/'), tail),
        None => value.to_string(),
    }
}
