//! Optional semantic-search collaborator
//!
//! The backend is chosen once, when the pipeline is constructed. Callers
//! match on [`SearchBackend`] instead of probing a client per call.

mod http;
mod mock;
mod selector;

pub use http::HttpSearch;
pub use mock::MockSearch;
pub use selector::select_search_backend;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// One ranked snippet returned by a search backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub file: String,
    pub snippet: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Search service returned HTTP {0}")]
    Status(u16),

    #[error("Malformed search response: {0}")]
    Decode(String),
}

pub trait SemanticSearch: Send + Sync {
    fn name(&self) -> &str;

    /// Ranked hits for `query`, best first, at most `k`
    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError>;
}

#[derive(Clone)]
pub enum SearchBackend {
    Available(Arc<dyn SemanticSearch>),
    Unavailable { reason: String },
}

impl SearchBackend {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        SearchBackend::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, SearchBackend::Available(_))
    }

    pub fn describe(&self) -> String {
        match self {
            SearchBackend::Available(client) => client.name().to_string(),
            SearchBackend::Unavailable { reason } => format!("unavailable ({})", reason),
        }
    }
}

impl std::fmt::Debug for SearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchBackend({})", self.describe())
    }
}
