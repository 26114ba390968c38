//! Response conversion
//!
//! This module turns raw JSON responses into structured objects and back.

pub mod materialize;
pub mod registry;
