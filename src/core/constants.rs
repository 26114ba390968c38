//! Constants for environment variables, headers and defaults
//!
//! String constants shared by configuration loading, request shaping and
//! response capture.

/// Environment variable names
pub mod env {
    /// Primary (OpenAI) API key
    pub const API_KEY: &str = "OPENAI_API_KEY";

    /// File holding the primary API key
    pub const API_KEY_PATH: &str = "OPENAI_API_KEY_PATH";

    /// Secondary (Amari) API key
    pub const AMARI_API_KEY: &str = "AMARI_API_KEY";

    /// File holding the Amari API key
    pub const AMARI_API_KEY_PATH: &str = "AMARI_API_KEY_PATH";

    /// Organization identifier
    pub const ORGANIZATION: &str = "OPENAI_ORGANIZATION";

    /// API base URL
    pub const API_BASE: &str = "OPENAI_API_BASE";

    /// API type label
    pub const API_TYPE: &str = "OPENAI_API_TYPE";

    /// API version tag
    pub const API_VERSION: &str = "OPENAI_API_VERSION";

    /// Console log level fallback
    pub const LOG: &str = "OPENAI_LOG";

    /// Optional TOML configuration file
    pub const CONFIG_PATH: &str = "CONFIG_PATH";
}

/// HTTP header names, lowercase as they go on the wire
pub mod header {
    /// Azure key header
    pub const API_KEY: &str = "api-key";

    /// Organization header, sent and received
    pub const ORGANIZATION: &str = "openai-organization";

    /// API version header for the OpenAI endpoint
    pub const VERSION: &str = "openai-version";

    /// Server-side processing time in milliseconds
    pub const PROCESSING_MS: &str = "openai-processing-ms";

    /// Request identifier returned by the service
    pub const REQUEST_ID: &str = "request-id";

    /// Request identifier supplied by the caller
    pub const CLIENT_REQUEST_ID: &str = "x-request-id";
}

/// Default values
pub mod defaults {
    /// Default API base URL
    pub const API_BASE: &str = "https://api.openai.com/v1";

    /// Default API type label
    pub const API_TYPE: &str = "open_ai";

    /// Default API version for Azure deployments
    pub const AZURE_API_VERSION: &str = "2023-05-15";

    /// Required prefix of a primary key read from a file
    pub const API_KEY_PREFIX: &str = "sk-";

    /// Where primary keys are issued
    pub const API_KEYS_URL: &str = "https://platform.openai.com/account/api-keys";

    /// Target used for log lines
    pub const LOG_TARGET: &str = "openai";
}
