//! Response data models
//!
//! This module contains the structured response tree and the raw response
//! wrapper produced by the transport layer.

pub mod object;
pub mod response;
