//! Outbound request shaping
//!
//! This module builds the headers and URLs the transport layer sends.

pub mod request;
