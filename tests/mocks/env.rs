//! Mock environment sources for testing without touching the process environment.
//!
//! Provides configurable mocks that simulate:
//! - A toggle variable that changes value between reads
//! - A variable that is set but unreadable

use fwcheck::platform::env::EnvSource;
use fwcheck::FwCheckError;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Environment whose toggle variable yields a new value on each read.
///
/// Once the script runs out, the last value repeats. `None` entries read as unset.
#[derive(Debug)]
pub struct ScriptedEnv {
    name: String,
    script: RefCell<VecDeque<Option<String>>>,
    last: RefCell<Option<String>>,
    reads: RefCell<u32>,
}

impl ScriptedEnv {
    pub fn new(name: &str, values: &[Option<&str>]) -> Self {
        ScriptedEnv {
            name: name.to_string(),
            script: RefCell::new(values.iter().map(|v| v.map(str::to_string)).collect()),
            last: RefCell::new(None),
            reads: RefCell::new(0),
        }
    }

    /// How many times the toggle variable was read.
    pub fn reads(&self) -> u32 {
        *self.reads.borrow()
    }
}

impl EnvSource for ScriptedEnv {
    fn var(&self, name: &str) -> Result<Option<String>, FwCheckError> {
        if name != self.name {
            return Ok(None);
        }

        *self.reads.borrow_mut() += 1;
        if let Some(next) = self.script.borrow_mut().pop_front() {
            *self.last.borrow_mut() = next;
        }
        Ok(self.last.borrow().clone())
    }
}

/// Environment where every read fails, like a non-Unicode value.
#[derive(Debug, Default)]
pub struct UnreadableEnv;

impl EnvSource for UnreadableEnv {
    fn var(&self, name: &str) -> Result<Option<String>, FwCheckError> {
        Err(FwCheckError::EnvRead {
            name: name.to_string(),
            message: "environment variable was not valid unicode".to_string(),
        })
    }
}
