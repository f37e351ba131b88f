//! HTTP client for the data-serving API.
//!
//! All variant, gene, coverage and sequence data lives behind a separate
//! REST API; this module owns the single shared [`reqwest::Client`] used to
//! reach it. JSON endpoints are decoded here; sequence artifacts are fetched
//! as raw responses so handlers can stream them through.

use reqwest::Client;
use reqwest::header::{ACCEPT_ENCODING, HeaderValue, RANGE};
use serde::de::DeserializeOwned;

use crate::types::{ApiEnvelope, GeneRecord, VariantRecord};
use crate::{Error, Result};

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path plus query string.
    pub fn endpoint(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// GET an absolute URL and decode its JSON payload. A non-success status
    /// is reported as a bad query; transport failures as upstream errors.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::BadQuery);
        }
        response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("invalid JSON from API: {e}")))
    }

    pub async fn genes_by_name(&self, name: &str) -> Result<ApiEnvelope<GeneRecord>> {
        let url = self.endpoint(&format!("/genes?name={}", encode(name)));
        self.get_json(&url).await
    }

    /// Variant lookup by exact id or rsID; the API resolves both through the
    /// same parameter.
    pub async fn snv_by_id(&self, variant_id: &str) -> Result<ApiEnvelope<VariantRecord>> {
        let url = self.endpoint(&format!("/snv?variant_id={}", encode(variant_id)));
        self.get_json(&url).await
    }

    /// GET with gzip passthrough, for payloads relayed to the client without
    /// inspection. Any non-success status surfaces as a not-found.
    pub async fn fetch_content(&self, path_and_query: &str) -> Result<reqwest::Response> {
        let response = self
            .http
            .get(self.endpoint(path_and_query))
            .header(ACCEPT_ENCODING, "gzip")
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::NotFound);
        }
        Ok(response)
    }

    /// GET a sequence artifact, forwarding the client's Range header
    /// verbatim. The upstream status is returned as-is for the caller to
    /// proxy through.
    pub async fn fetch_range(
        &self,
        path_and_query: &str,
        range: Option<HeaderValue>,
    ) -> Result<reqwest::Response> {
        let mut request = self.http.get(self.endpoint(path_and_query));
        if let Some(range) = range {
            request = request.header(RANGE, range);
        }
        request
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))
    }
}

/// Form-encode a single query-string value.
pub(crate) fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let api = ApiClient::new("http://api.internal/".to_string()).unwrap();
        assert_eq!(
            api.endpoint("/genes?name=PCSK9"),
            "http://api.internal/genes?name=PCSK9"
        );
    }

    #[test]
    fn test_encode_query_values() {
        assert_eq!(encode("rs334"), "rs334");
        assert_eq!(encode("a b&c"), "a+b%26c");
    }
}
