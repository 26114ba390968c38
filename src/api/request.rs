//! Headers and URLs per API type
//!
//! The OpenAI endpoint and Azure AD deployments take a bearer token; key-based
//! Azure deployments take an `api-key` header. Azure URLs address a
//! deployment and carry the API version as a query parameter.

use crate::core::api_type::ApiType;
use crate::core::config::ClientConfig;
use crate::core::constants::header;
use crate::core::error::{ClientError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};

const CLIENT_USER_AGENT: &str = concat!("amari-openai/", env!("CARGO_PKG_VERSION"));

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader(e.to_string()))
}

/// Authentication header for `api_type`
pub fn api_key_to_header(api_type: ApiType, key: &str) -> Result<(HeaderName, HeaderValue)> {
    let (name, mut value) = if api_type.uses_bearer_auth() {
        (AUTHORIZATION, header_value(&format!("Bearer {key}"))?)
    } else {
        (HeaderName::from_static(header::API_KEY), header_value(key)?)
    };
    value.set_sensitive(true);
    Ok((name, value))
}

/// Headers sent with every request
///
/// # Arguments
///
/// * `config` - Supplies organization and API version
/// * `api_type` - Selects the authentication header
/// * `api_key` - Resolved credential
/// * `request_id` - Optional caller-chosen request identifier
pub fn request_headers(
    config: &ClientConfig,
    api_type: ApiType,
    api_key: &str,
    request_id: Option<&str>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let (name, value) = api_key_to_header(api_type, api_key)?;
    headers.insert(name, value);
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(ref organization) = config.organization {
        headers.insert(
            HeaderName::from_static(header::ORGANIZATION),
            header_value(organization)?,
        );
    }

    if api_type == ApiType::OpenAi
        && let Some(ref version) = config.api_version
    {
        headers.insert(HeaderName::from_static(header::VERSION), header_value(version)?);
    }

    if let Some(id) = request_id {
        headers.insert(HeaderName::from_static(header::CLIENT_REQUEST_ID), header_value(id)?);
    }

    Ok(headers)
}

/// URL of `operation`, optionally scoped to an engine or deployment
///
/// # Errors
///
/// Azure API types need both `engine` (the deployment name) and `api_version`.
pub fn resource_url(
    api_base: &str,
    api_type: ApiType,
    engine: Option<&str>,
    operation: &str,
    api_version: Option<&str>,
) -> Result<String> {
    let base = api_base.trim_end_matches('/');
    let operation = operation.trim_start_matches('/');

    if api_type.is_azure() {
        let version = api_version.ok_or_else(|| {
            ClientError::InvalidRequest(
                "An API version is required for the Azure API type.".to_string(),
            )
        })?;
        let deployment = engine.ok_or_else(|| {
            ClientError::InvalidRequest(
                "You must provide the deployment name in the 'engine' parameter to access the Azure OpenAI service"
                    .to_string(),
            )
        })?;
        return Ok(format!(
            "{base}/openai/deployments/{deployment}/{operation}?api-version={version}"
        ));
    }

    Ok(match engine {
        Some(engine) => format!("{base}/engines/{engine}/{operation}"),
        None => format!("{base}/{operation}"),
    })
}
