//! Core client modules
//!
//! This module contains configuration, constants, errors, logging, API-type
//! classification and credential resolution.

pub mod api_type;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod logging;
