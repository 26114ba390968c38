//! Credential resolution
//!
//! Each credential slot is resolved fresh on every call, in priority order:
//! key file, then inline value, then failure.

use crate::core::constants::{defaults, env};
use crate::core::error::{ClientError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Which credential is being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSlot {
    /// OpenAI API key, validated against the `sk-` prefix when read from a file
    Primary,
    /// Amari API key, never validated
    Secondary,
}

impl CredentialSlot {
    fn missing_message(&self) -> String {
        match self {
            CredentialSlot::Primary => format!(
                "No API key provided. You can set your API key in code using 'config.api_key = <API-KEY>', \
                 or you can set the environment variable {}=<API-KEY>. If your API key is stored in a file, \
                 you can point the client at it with 'config.api_key_path = <PATH>' or {}=<PATH>. \
                 You can generate API keys in the OpenAI web interface. See {} for details.",
                env::API_KEY,
                env::API_KEY_PATH,
                defaults::API_KEYS_URL
            ),
            CredentialSlot::Secondary => format!(
                "No Amari API key provided. You can set your Amari API key in code using \
                 'config.amari_api_key = <API-KEY>', or you can set the environment variable {}=<API-KEY>. \
                 If your API key is stored in a file, you can point the client at it with \
                 'config.amari_api_key_path = <PATH>' or {}=<PATH>. \
                 You can generate Amari API keys by contacting Amari support.",
                env::AMARI_API_KEY,
                env::AMARI_API_KEY_PATH
            ),
        }
    }
}

/// Resolve the effective secret for one credential slot
///
/// # Errors
///
/// - `Io` if the key file cannot be read; the underlying error is kept as is
/// - `MalformedCredential` if a primary key file does not hold an `sk-` key
/// - `Authentication` if neither a path nor a value is configured
pub fn resolve_credential(
    slot: CredentialSlot,
    key_path: Option<&Path>,
    key_value: Option<&str>,
) -> Result<String> {
    // an empty path counts as unset
    if let Some(path) = key_path.filter(|p| !p.as_os_str().is_empty()) {
        let key = fs::read_to_string(path)?.trim().to_string();
        if slot == CredentialSlot::Primary && !key.starts_with(defaults::API_KEY_PREFIX) {
            return Err(ClientError::MalformedCredential {
                path: path.to_path_buf(),
            });
        }
        debug!(slot = ?slot, path = %path.display(), "resolved credential from file");
        return Ok(key);
    }

    if let Some(key) = key_value {
        return Ok(key.to_string());
    }

    Err(ClientError::Authentication(slot.missing_message()))
}
