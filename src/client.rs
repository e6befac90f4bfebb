//! Remote legislation API client.
//!
//! Talks to the mevzuat.gov.tr JSON endpoints: a date-ranged paginated search,
//! a per-document detail lookup, and a per-document article listing. Every
//! request carries a fixed timeout and a static browser-like header set.
//!
//! # Failure contract
//!
//! The client never surfaces network or decoding failures to callers: a
//! non-200 status, a connection/timeout error, or a malformed body collapses
//! to an empty list (search, articles) or `None` (detail). There is no retry;
//! one failed attempt is final for that call.
//!
//! The [`LegislationSource`] trait is the seam between the pipeline and the
//! network: the pipeline and the HTTP server take a source explicitly, so
//! tests can substitute an in-memory implementation.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::RemoteConfig;

const SEARCH_PATH: &str = "/MevzuatMetin/1.0.1/MevzuatListe";
const DETAIL_PATH: &str = "/MevzuatMetin/1.0.1/MevzuatDetay";
const ARTICLES_PATH: &str = "/MevzuatMetin/1.0.1/MevzuatMaddeleri";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// A remote source of legislation records.
///
/// Implementations return untyped JSON at the boundary; normalization happens
/// downstream. All operations absorb their own failures per the module-level
/// contract.
#[async_trait]
pub trait LegislationSource: Send + Sync {
    /// Date-ranged, paginated search. An empty type filter means all types.
    async fn search(
        &self,
        start_date: &str,
        end_date: &str,
        page: i64,
        page_size: i64,
    ) -> Vec<Value>;

    /// Full detail record for one document, or `None` on any failure.
    async fn fetch_detail(&self, document_id: &str) -> Option<Value>;

    /// Article list for one document; empty on any failure.
    async fn fetch_articles(&self, document_id: &str) -> Vec<Value>;
}

/// reqwest-backed [`LegislationSource`] for mevzuat.gov.tr.
///
/// Constructed once per run and passed to the pipeline and server
/// explicitly.
pub struct MevzuatClient {
    base_url: String,
    http: reqwest::Client,
}

impl MevzuatClient {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("tr-TR,tr;q=0.9,en;q=0.8"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(REFERER, HeaderValue::from_static("https://www.mevzuat.gov.tr"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// POST a JSON body and parse the JSON response. `None` on non-200,
    /// network failure, or unparsable body.
    async fn post_json(&self, path: &str, body: &Value) -> Option<Value> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }

        response.json().await.ok()
    }

    /// Unwrap the `data` array that the list endpoints respond with.
    fn data_array(response: Option<Value>) -> Vec<Value> {
        match response.and_then(|mut v| v.get_mut("data").map(Value::take)) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl LegislationSource for MevzuatClient {
    async fn search(
        &self,
        start_date: &str,
        end_date: &str,
        page: i64,
        page_size: i64,
    ) -> Vec<Value> {
        let body = json!({
            "baslangicTarihi": start_date,
            "bitisTarihi": end_date,
            "mevzuatTuru": "",
            "sayfaNo": page,
            "kayitSayisi": page_size,
        });

        Self::data_array(self.post_json(SEARCH_PATH, &body).await)
    }

    async fn fetch_detail(&self, document_id: &str) -> Option<Value> {
        self.post_json(DETAIL_PATH, &json!({ "mevzuatId": document_id }))
            .await
    }

    async fn fetch_articles(&self, document_id: &str) -> Vec<Value> {
        Self::data_array(
            self.post_json(ARTICLES_PATH, &json!({ "mevzuatId": document_id }))
                .await,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve one canned HTTP response on an ephemeral port, then exit.
    fn spawn_canned_server(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> MevzuatClient {
        let config = RemoteConfig {
            base_url,
            timeout_secs: 2,
            page_size: 100,
            throttle_ms: 0,
        };
        MevzuatClient::new(&config).unwrap()
    }

    fn unreachable_client() -> MevzuatClient {
        // Nothing listens on port 9; connections are refused immediately.
        client_for("http://127.0.0.1:9".to_string())
    }

    #[tokio::test]
    async fn test_search_collapses_network_failure_to_empty() {
        let client = unreachable_client();
        let results = client.search("2024-01-01", "2024-01-07", 1, 100).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_detail_collapses_network_failure_to_none() {
        let client = unreachable_client();
        assert!(client.fetch_detail("1").await.is_none());
    }

    #[tokio::test]
    async fn test_articles_collapse_network_failure_to_empty() {
        let client = unreachable_client();
        assert!(client.fetch_articles("1").await.is_empty());
    }

    #[tokio::test]
    async fn test_search_collapses_http_500_to_empty() {
        let base = spawn_canned_server(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let client = client_for(base);
        let results = client.search("2024-01-01", "2024-01-07", 1, 100).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_collapses_unparsable_body_to_empty() {
        let base = spawn_canned_server(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 14\r\nConnection: close\r\n\r\nnot json today",
        );
        let client = client_for(base);
        let results = client.search("2024-01-01", "2024-01-07", 1, 100).await;
        assert!(results.is_empty());
    }

    #[test]
    fn test_data_array_shapes() {
        let ok = json!({ "data": [ {"no": "1"}, {"no": "2"} ] });
        assert_eq!(MevzuatClient::data_array(Some(ok)).len(), 2);

        // Missing key, wrong type, and absent response all collapse to empty.
        assert!(MevzuatClient::data_array(Some(json!({ "rows": [] }))).is_empty());
        assert!(MevzuatClient::data_array(Some(json!({ "data": "oops" }))).is_empty());
        assert!(MevzuatClient::data_array(None).is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client_for("http://127.0.0.1:9/".to_string());
        assert_eq!(client.base_url, "http://127.0.0.1:9");
    }
}
