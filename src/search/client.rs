//! Search service wire protocol.
//!
//! [`SearchClient`] is stateless apart from its endpoint configuration. It
//! turns a [`SearchRequest`] into a host-neutral [`WebRequest`] and validates
//! the `{ success, data }` response envelope. It never retries.

use super::dispatcher::RequestId;
use super::request::{CacheKey, SearchRequest};
use crate::domain::{Journal, Result, ScoutError};
use serde_json::Value;
use std::collections::BTreeMap;

/// Errors a search attempt can end with.
pub type SearchError = ScoutError;

/// Path appended to the configured base URL.
pub const SEARCH_PATH: &str = "/api/journals/search";

const CONTEXT_REQUEST_ID: &str = "request_id";
const CONTEXT_CACHE_KEY: &str = "cache_key";

/// A POST ready to be handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    /// Returned verbatim with the response for correlation.
    pub context: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClient {
    base_url: String,
    api_key: Option<String>,
    api_version: Option<String>,
}

impl SearchClient {
    #[must_use]
    pub fn new(base_url: &str, api_key: Option<String>, api_version: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_version,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{SEARCH_PATH}", self.base_url)
    }

    /// # Errors
    ///
    /// Returns `ScoutError::Serialization` if the body cannot be encoded.
    pub fn build_request(
        &self,
        request: &SearchRequest,
        id: RequestId,
        key: &CacheKey,
    ) -> Result<WebRequest> {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(api_key) = &self.api_key {
            headers.insert("Authorization".to_string(), format!("Bearer {api_key}"));
        }
        if let Some(version) = &self.api_version {
            headers.insert("X-API-Version".to_string(), version.clone());
        }

        let context = BTreeMap::from([
            (CONTEXT_REQUEST_ID.to_string(), id.to_string()),
            (CONTEXT_CACHE_KEY.to_string(), key.as_str().to_string()),
        ]);

        Ok(WebRequest {
            url: self.endpoint(),
            headers,
            body: request.wire_body()?,
            context,
        })
    }

    /// Recovers the request id and cache key from a response context.
    #[must_use]
    pub fn correlate(context: &BTreeMap<String, String>) -> Option<(RequestId, CacheKey)> {
        let id = RequestId::parse(context.get(CONTEXT_REQUEST_ID)?)?;
        let key = CacheKey::from_raw(context.get(CONTEXT_CACHE_KEY)?.clone());
        Some((id, key))
    }

    /// Validates a response and extracts the journal list.
    ///
    /// # Errors
    ///
    /// - `Transport` for a non-2xx status
    /// - `Protocol` when the body is not JSON, `success` is not `true`, `data`
    ///   is not an array, or an element is not a journal object
    pub fn parse_response(status: u16, body: &[u8]) -> std::result::Result<Vec<Journal>, SearchError> {
        if !(200..300).contains(&status) {
            return Err(ScoutError::Transport {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            });
        }

        let envelope: Value = serde_json::from_slice(body)
            .map_err(|e| ScoutError::Protocol(format!("body is not JSON: {e}")))?;

        if envelope.get("success").and_then(Value::as_bool) != Some(true) {
            return Err(ScoutError::Protocol("success flag missing or false".into()));
        }

        let Some(Value::Array(items)) = envelope.get("data") else {
            return Err(ScoutError::Protocol("data is not an array".into()));
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                if !item.is_object() {
                    return Err(ScoutError::Protocol(format!("data[{index}] is not an object")));
                }
                serde_json::from_value(item.clone())
                    .map_err(|e| ScoutError::Protocol(format!("data[{index}]: {e}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterCriteria;
    use pretty_assertions::assert_eq;

    fn request() -> SearchRequest {
        SearchRequest::normalize("graph theory", &FilterCriteria::default(), false, None).unwrap()
    }

    #[test]
    fn builds_post_with_auth_and_version_headers() {
        let client = SearchClient::new(
            "http://localhost:5000/",
            Some("secret".into()),
            Some("2".into()),
        );
        let req = request();
        let key = req.cache_key().unwrap();
        let web = client.build_request(&req, RequestId::new(7), &key).unwrap();

        assert_eq!(web.url, "http://localhost:5000/api/journals/search");
        assert_eq!(web.headers["Content-Type"], "application/json");
        assert_eq!(web.headers["Authorization"], "Bearer secret");
        assert_eq!(web.headers["X-API-Version"], "2");
        assert_eq!(SearchClient::correlate(&web.context), Some((RequestId::new(7), key)));
    }

    #[test]
    fn omits_optional_headers() {
        let client = SearchClient::new("http://api", None, None);
        let req = request();
        let web = client
            .build_request(&req, RequestId::new(1), &req.cache_key().unwrap())
            .unwrap();
        assert_eq!(web.headers.len(), 1);
    }

    #[test]
    fn parses_success_envelope() {
        let body = br#"{"success": true, "data": [{"title": "Nature", "issn": "0028-0836", "impactFactor": 64.8}]}"#;
        let journals = SearchClient::parse_response(200, body).unwrap();
        assert_eq!(journals.len(), 1);
        assert_eq!(journals[0].title, "Nature");
    }

    #[test]
    fn non_success_status_is_transport_error() {
        let err = SearchClient::parse_response(503, b"down").unwrap_err();
        assert!(matches!(err, ScoutError::Transport { status: 503, ref body } if body == "down"));
    }

    #[test]
    fn malformed_envelopes_are_protocol_errors() {
        let cases: [&[u8]; 5] = [
            br#"{"success": false}"#,
            br#"{"success": true, "data": "not-an-array"}"#,
            br#"{"data": []}"#,
            br#"{"success": true, "data": [42]}"#,
            b"<html>",
        ];
        for body in cases {
            let err = SearchClient::parse_response(200, body).unwrap_err();
            assert!(matches!(err, ScoutError::Protocol(_)), "{}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn correlate_rejects_foreign_context() {
        let context = BTreeMap::from([("request_id".to_string(), "abc".to_string())]);
        assert_eq!(SearchClient::correlate(&context), None);
    }
}
