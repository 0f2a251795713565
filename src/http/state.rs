//! Per-configuration resolver state and the stage orchestrator.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::{GatewayConfig, ServerConfig};
use crate::http::request::RequestContext;
use crate::language::{LanguageRedirect, RedirectError};
use crate::observability::metrics;
use crate::redirect::{Flow, StaticRedirectError, StaticRedirectResolver, StaticRedirectTable};
use crate::sites::{SiteRegistry, StaticSiteRegistry};

/// Everything the redirect stages need, built from one configuration.
pub struct GatewayState {
    pub registry: Arc<dyn SiteRegistry>,
    /// `None` when the static stage is disabled.
    pub static_redirects: Option<Arc<dyn StaticRedirectResolver>>,
    pub language_redirect_enabled: bool,
    pub admin_path_prefixes: Vec<String>,
    pub server: ServerConfig,
    pub upstream_address: String,
}

/// State shared with request handlers; swapped whole on reload.
pub type SharedGatewayState = Arc<ArcSwap<GatewayState>>;

impl GatewayState {
    pub fn from_config(config: &GatewayConfig) -> Result<Self, StaticRedirectError> {
        let static_redirects: Option<Arc<dyn StaticRedirectResolver>> =
            if config.static_redirects.enabled {
                Some(Arc::new(StaticRedirectTable::from_config(&config.static_redirects)?))
            } else {
                None
            };

        Ok(Self {
            registry: Arc::new(StaticSiteRegistry::from_config(config)),
            static_redirects,
            language_redirect_enabled: config.language_redirect.enabled,
            admin_path_prefixes: config.language_redirect.admin_path_prefixes.clone(),
            server: config.server.clone(),
            upstream_address: config.upstream.address.clone(),
        })
    }

    /// Replace the static stage.
    pub fn with_static_resolver(mut self, resolver: Option<Arc<dyn StaticRedirectResolver>>) -> Self {
        self.static_redirects = resolver;
        self
    }

    /// Replace the site registry.
    pub fn with_registry(mut self, registry: Arc<dyn SiteRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn into_shared(self) -> SharedGatewayState {
        Arc::new(ArcSwap::from_pointee(self))
    }

    /// Run the static stage, then the language stage.
    pub fn process(&self, request: &RequestContext) -> Result<Flow, RedirectError> {
        if let Flow::Terminated(action) = self.static_stage(request) {
            return Ok(Flow::Terminated(action));
        }

        LanguageRedirect::new(self.registry.as_ref(), self.language_redirect_enabled)
            .handle(request)
            .inspect_err(|e| metrics::record_redirect_error(e.kind()))
    }

    fn static_stage(&self, request: &RequestContext) -> Flow {
        let Some(resolver) = &self.static_redirects else {
            return Flow::Continue;
        };
        if request.is_admin {
            return Flow::Continue;
        }

        match resolver.resolve(&request.absolute_url, &request.path_and_query()) {
            Ok(Some(action)) => Flow::Terminated(action),
            Ok(None) => Flow::Continue,
            Err(e) => {
                tracing::error!(error = %e, url = %request.absolute_url, "Static redirect lookup failed");
                metrics::record_redirect_error("static_lookup");
                Flow::Continue
            }
        }
    }
}
