//! Data definitions.
//!
//! Contains the on-disk settings file model.

pub mod settings;
