use super::{SearchError, SearchHit, SemanticSearch};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Search service reached over HTTP: `GET {base}/search?q=<query>&k=<k>`
pub struct HttpSearch {
    client: Client,
    base_url: String,
    name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Wrapped { results: Vec<SearchHit> },
    Bare(Vec<SearchHit>),
}

impl HttpSearch {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for search service")?;

        Ok(Self {
            name: format!("http ({})", base_url),
            client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl SemanticSearch for HttpSearch {
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError> {
        let url = format!("{}/search", self.base_url);
        debug!(url = %url, query = %query, k, "Semantic search request");

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.to_string()), ("k", k.to_string())])
            .send()
            .map_err(|e| SearchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        let mut hits = match body {
            SearchResponse::Wrapped { results } => results,
            SearchResponse::Bare(hits) => hits,
        };
        hits.truncate(k);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let search = HttpSearch::new("http://localhost:8420/", Duration::from_secs(1)).unwrap();
        assert_eq!(search.base_url(), "http://localhost:8420");
        assert_eq!(search.name(), "http (http://localhost:8420)");
    }

    #[test]
    fn test_response_shapes() {
        let wrapped: SearchResponse = serde_json::from_str(
            r#"{"results": [{"file": "A.as", "snippet": "x", "score": 0.9}]}"#,
        )
        .unwrap();
        assert!(matches!(wrapped, SearchResponse::Wrapped { results } if results.len() == 1));

        let bare: SearchResponse =
            serde_json::from_str(r#"[{"file": "A.as", "snippet": "x"}]"#).unwrap();
        assert!(matches!(bare, SearchResponse::Bare(hits) if hits[0].score == 0.0));
    }

    /// Serve one canned HTTP response on a loopback port, returning the base URL
    fn serve_once(status: &str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_hits_are_truncated_to_k() {
        let url = serve_once(
            "200 OK",
            r#"{"results": [{"file": "A.as", "snippet": "a", "score": 0.9}, {"file": "B.as", "snippet": "b", "score": 0.5}]}"#,
        );
        let search = HttpSearch::new(url, Duration::from_secs(5)).unwrap();
        let hits = search.search("army.newArmy", 1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].file, "A.as");
    }

    #[test]
    fn test_error_status_is_reported() {
        let url = serve_once("503 Service Unavailable", "{}");
        let search = HttpSearch::new(url, Duration::from_secs(5)).unwrap();
        assert!(matches!(
            search.search("army.newArmy", 3),
            Err(SearchError::Status(503))
        ));
    }

    #[test]
    fn test_closed_port_is_a_request_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let search = HttpSearch::new(format!("http://127.0.0.1:{}", port), Duration::from_secs(2)).unwrap();
        let err = search.search("army.newArmy", 3).unwrap_err();
        assert!(matches!(err, SearchError::Request(_)));
    }

    #[test]
    fn test_invalid_url_is_a_request_error() {
        let search = HttpSearch::new("http://", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            search.search("army.newArmy", 3),
            Err(SearchError::Request(_))
        ));
    }
}
