//! Platform abstraction layer.
//!
//! Provides a consistent interface for reading environment variables.

pub mod env;
