use super::{SearchError, SearchHit, SemanticSearch};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory search backend with canned results
pub struct MockSearch {
    hits: Mutex<HashMap<String, Vec<SearchHit>>>,
    fail_with: Option<SearchError>,
    calls: AtomicUsize,
}

impl MockSearch {
    pub fn new() -> Self {
        Self {
            hits: Mutex::new(HashMap::new()),
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A backend whose every call fails with `error`
    pub fn failing(error: SearchError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::new()
        }
    }

    pub fn add_hit(&self, query: &str, file: &str, snippet: &str, score: f64) {
        self.hits
            .lock()
            .unwrap()
            .entry(query.to_string())
            .or_default()
            .push(SearchHit {
                file: file.to_string(),
                snippet: snippet.to_string(),
                score,
            });
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticSearch for MockSearch {
    fn name(&self) -> &str {
        "mock"
    }

    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let mut hits = self
            .hits
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(k);
        Ok(hits)
    }
}
