//! Raw service responses
//!
//! Pairs a decoded JSON body with the transport metadata the materializer
//! hoists onto the resulting objects.

use crate::core::constants::header;
use crate::core::error::Result;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::debug;

/// A response body plus transport-level metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawServiceResponse {
    pub data: Value,
    pub organization: Option<String>,
    pub response_ms: Option<u64>,
    pub request_id: Option<String>,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Processing time header is a float; round to whole milliseconds.
///
/// `response_ms` is unsigned, so negative or non-finite values are dropped.
fn parse_processing_ms(raw: &str) -> Option<u64> {
    let ms: f64 = raw.trim().parse().ok()?;
    if ms.is_finite() && ms >= 0.0 {
        Some(ms.round() as u64)
    } else {
        None
    }
}

impl RawServiceResponse {
    /// Wrap `data` with the metadata found in `headers`
    pub fn from_parts(data: Value, headers: &HeaderMap) -> Self {
        Self {
            data,
            organization: header_str(headers, header::ORGANIZATION).map(str::to_string),
            response_ms: header_str(headers, header::PROCESSING_MS).and_then(parse_processing_ms),
            request_id: header_str(headers, header::REQUEST_ID).map(str::to_string),
        }
    }

    /// Read the body and headers of an HTTP response
    ///
    /// # Errors
    ///
    /// Returns `Http` if the body cannot be read and `Json` if it is not JSON.
    pub async fn from_response(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        let data: Value = serde_json::from_slice(&body)?;

        let raw = Self::from_parts(data, &headers);
        debug!(
            status = status.as_u16(),
            request_id = ?raw.request_id,
            response_ms = ?raw.response_ms,
            "captured service response"
        );
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ClientError;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    #[test]
    fn test_from_parts_reads_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("openai-organization", HeaderValue::from_static("org-abc"));
        headers.insert("openai-processing-ms", HeaderValue::from_static("41.6"));
        headers.insert("request-id", HeaderValue::from_static("req-1"));

        let raw = RawServiceResponse::from_parts(json!({"id": "x"}), &headers);
        assert_eq!(raw.organization.as_deref(), Some("org-abc"));
        assert_eq!(raw.response_ms, Some(42));
        assert_eq!(raw.request_id.as_deref(), Some("req-1"));
        assert_eq!(raw.data, json!({"id": "x"}));
    }

    #[test]
    fn test_from_parts_without_headers() {
        let raw = RawServiceResponse::from_parts(json!([1]), &HeaderMap::new());
        assert_eq!(raw.organization, None);
        assert_eq!(raw.response_ms, None);
        assert_eq!(raw.request_id, None);
    }

    #[test]
    fn test_negative_processing_ms_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert("openai-processing-ms", HeaderValue::from_static("-12"));
        headers.insert("request-id", HeaderValue::from_static("req-2"));

        let raw = RawServiceResponse::from_parts(json!({}), &headers);
        assert_eq!(raw.response_ms, None);
        assert_eq!(raw.request_id.as_deref(), Some("req-2"));
    }

    #[test]
    fn test_processing_ms_parsing() {
        assert_eq!(parse_processing_ms("120"), Some(120));
        assert_eq!(parse_processing_ms("0.4"), Some(0));
        assert_eq!(parse_processing_ms("not-a-number"), None);
        assert_eq!(parse_processing_ms("-3"), None);
        assert_eq!(parse_processing_ms("inf"), None);
        assert_eq!(parse_processing_ms("NaN"), None);
    }

    #[tokio::test]
    async fn test_from_response() {
        let response = http::Response::builder()
            .status(200)
            .header("OpenAI-Organization", "org-live")
            .header("Openai-Processing-Ms", "7")
            .body(r#"{"object": "list", "data": []}"#)
            .unwrap();

        let raw = RawServiceResponse::from_response(reqwest::Response::from(response))
            .await
            .unwrap();
        assert_eq!(raw.organization.as_deref(), Some("org-live"));
        assert_eq!(raw.response_ms, Some(7));
        assert_eq!(raw.data, json!({"object": "list", "data": []}));
    }

    #[tokio::test]
    async fn test_from_response_rejects_non_json() {
        let response = http::Response::builder()
            .status(502)
            .body("<html>bad gateway</html>")
            .unwrap();

        let err = RawServiceResponse::from_response(reqwest::Response::from(response))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }
}
