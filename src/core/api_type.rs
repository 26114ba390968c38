//! API type classification
//!
//! Decides which header and URL shape an outbound request uses.

use crate::core::error::ClientError;
use std::fmt;
use std::str::FromStr;

/// Supported API types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiType {
    /// Azure-hosted deployment authenticated with an `api-key` header
    Azure,
    /// Standard OpenAI endpoint
    OpenAi,
    /// Azure-hosted deployment authenticated with an Azure AD bearer token
    AzureAd,
}

impl ApiType {
    /// Canonical configuration spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiType::Azure => "azure",
            ApiType::OpenAi => "open_ai",
            ApiType::AzureAd => "azure_ad",
        }
    }

    /// Whether requests go to an Azure deployment URL
    pub fn is_azure(&self) -> bool {
        matches!(self, ApiType::Azure | ApiType::AzureAd)
    }

    /// Whether the key is sent as `Authorization: Bearer`
    pub fn uses_bearer_auth(&self) -> bool {
        matches!(self, ApiType::OpenAi | ApiType::AzureAd)
    }
}

impl FromStr for ApiType {
    type Err = ClientError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.to_lowercase().as_str() {
            "azure" => Ok(ApiType::Azure),
            "azure_ad" | "azuread" => Ok(ApiType::AzureAd),
            "open_ai" | "openai" => Ok(ApiType::OpenAi),
            _ => Err(ClientError::InvalidApiType(label.to_string())),
        }
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
