//! CLI module for argument parsing, logging setup, and output formatting.

pub mod args;
pub mod logging;
pub mod output;
