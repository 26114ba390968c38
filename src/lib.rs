//! Amari OpenAI client core
//!
//! Credential resolution, API-type routing, response materialization and
//! logfmt-style logging for the OpenAI-compatible completion service,
//! including the Amari key and Azure-hosted deployments.

pub mod api;
pub mod conversion;
pub mod core;
pub mod models;

pub use crate::api::request::{api_key_to_header, request_headers, resource_url};
pub use crate::conversion::materialize::{
    ConvertOptions, Materialized, Payload, convert_to_object, flatten,
};
pub use crate::core::api_type::ApiType;
pub use crate::core::config::ClientConfig;
pub use crate::core::credentials::{CredentialSlot, resolve_credential};
pub use crate::core::error::{ClientError, Result};
pub use crate::core::logging::{format_logline, log_debug, log_info, log_warn, logfmt};
pub use crate::models::object::{ObjectKind, ObjectValue, ResponseMetadata, StructuredResponse};
pub use crate::models::response::RawServiceResponse;
