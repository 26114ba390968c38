//! Client error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the client core
///
/// None of these are retried; each one is terminal for the current request.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(
        "The API type provided in invalid. Please select one of the supported API types: 'azure', 'azure_ad', 'open_ai'"
    )]
    InvalidApiType(String),

    #[error("Malformed API key in {}.", .path.display())]
    MalformedCredential { path: PathBuf },

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to parse response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_credential_names_path() {
        let err = ClientError::MalformedCredential {
            path: PathBuf::from("/tmp/key.txt"),
        };
        assert_eq!(err.to_string(), "Malformed API key in /tmp/key.txt.");
    }

    #[test]
    fn test_io_error_keeps_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ClientError = io_err.into();
        match err {
            ClientError::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_api_type_lists_choices() {
        let err = ClientError::InvalidApiType("bogus".to_string());
        let message = err.to_string();
        assert!(message.contains("'azure'"));
        assert!(message.contains("'azure_ad'"));
        assert!(message.contains("'open_ai'"));
    }
}
