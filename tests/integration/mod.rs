//! Integration tests for fwcheck.
//!
//! Library-level runs use mock environments and scratch directories; the CLI
//! tests run the real binary with the environment set on the child only.

pub mod cli_tests;
