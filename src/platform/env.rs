//! Environment variable access.
//!
//! Checks never read `std::env` directly. They go through [`EnvSource`] so a
//! value is re-read on every access (nothing is cached between checks) and
//! tests can substitute a fixed environment without touching the process.

use crate::FwCheckError;
use std::collections::HashMap;
use std::env::{self, VarError};

/// Source of environment variables.
pub trait EnvSource {
    /// Read a variable. `Ok(None)` means unset; `Err` means it is set but unreadable.
    fn var(&self, name: &str) -> Result<Option<String>, FwCheckError>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Result<Option<String>, FwCheckError> {
        match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(e @ VarError::NotUnicode(_)) => Err(FwCheckError::EnvRead {
                name: name.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// A fixed in-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Result<Option<String>, FwCheckError> {
        Ok(self.vars.get(name).cloned())
    }
}
