use super::{HttpSearch, SearchBackend};
use crate::config::DataforgeConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Choose the search backend for a run from configuration.
///
/// Never fails: a missing URL or an unusable client yields
/// [`SearchBackend::Unavailable`] and extraction runs pattern-only.
pub fn select_search_backend(config: &DataforgeConfig) -> SearchBackend {
    let Some(url) = config.search_url.as_deref() else {
        debug!("No search URL configured, enrichment disabled");
        return SearchBackend::unavailable("not configured");
    };

    match HttpSearch::new(url, Duration::from_secs(config.search_timeout_secs)) {
        Ok(client) => {
            info!(url = %url, "Using semantic search service");
            SearchBackend::Available(Arc::new(client))
        }
        Err(e) => {
            warn!(url = %url, "Failed to initialize search client: {:#}", e);
            SearchBackend::unavailable(e.to_string())
        }
    }
}
