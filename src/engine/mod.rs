//! Harness engine.
//!
//! Provides check execution, the result log, the run report, and settings
//! file cleanup.

pub mod cleanup;
pub mod harness;
pub mod reporter;
pub mod result;
