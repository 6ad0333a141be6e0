//! Settings file cleanup.
//!
//! [`SettingsGuard`] watches the settings path for the length of a run. It
//! owns the file only once the flag given to [`SettingsGuard::track`] is set,
//! i.e. a check has written it; any other file belongs to the user and is
//! never deleted. Calling [`SettingsGuard::release`] removes an owned file and
//! reports what happened; if an owned guard is dropped without being released
//! (a panic unwinding through the run), `Drop` makes the same attempt and logs
//! the outcome.
//!
//! A failed removal is never fatal: it becomes [`CleanupOutcome::Failed`] and
//! a warning.

use std::cell::Cell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, warn};

/// What happened to the settings file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Removed,
    /// Nothing to remove
    Absent,
    /// Left in place on request
    Kept,
    /// Not written by this run, so not ours to remove
    Untouched,
    Failed(String),
}

impl CleanupOutcome {
    /// Line to show the user, if any.
    pub fn message(&self, path: &Path) -> Option<String> {
        match self {
            CleanupOutcome::Removed => Some(format!("Cleaned up {}", path.display())),
            CleanupOutcome::Absent => None,
            CleanupOutcome::Kept => Some(format!("Kept {} (--keep-settings)", path.display())),
            CleanupOutcome::Untouched => None,
            CleanupOutcome::Failed(error) => Some(format!(
                "Warning: Could not clean up {}: {}",
                path.display(),
                error
            )),
        }
    }
}

/// Scoped ownership of the settings file
#[derive(Debug)]
pub struct SettingsGuard {
    path: PathBuf,
    keep: bool,
    owned: Rc<Cell<bool>>,
    released: bool,
}

impl SettingsGuard {
    pub fn new(path: impl Into<PathBuf>, keep: bool) -> Self {
        SettingsGuard {
            path: path.into(),
            keep,
            owned: Rc::new(Cell::new(false)),
            released: false,
        }
    }

    /// Follow a flag set by whoever writes the file.
    ///
    /// Ownership is read at release or drop time, so a write that happens
    /// after this call is still cleaned up.
    pub fn track(&mut self, written: Rc<Cell<bool>>) {
        self.owned = written;
    }

    /// Remove the file now (unless kept) and disarm the guard.
    pub fn release(mut self) -> CleanupOutcome {
        self.released = true;
        self.cleanup()
    }

    fn cleanup(&self) -> CleanupOutcome {
        if !self.owned.get() {
            return CleanupOutcome::Untouched;
        }
        if self.keep {
            return CleanupOutcome::Kept;
        }
        remove_settings(&self.path)
    }
}

impl Drop for SettingsGuard {
    fn drop(&mut self) {
        if self.released || !self.owned.get() {
            return;
        }

        match self.cleanup() {
            CleanupOutcome::Failed(error) => {
                warn!(path = %self.path.display(), %error, "could not clean up settings file");
            }
            outcome => {
                debug!(path = %self.path.display(), ?outcome, "settings guard dropped");
            }
        }
    }
}

/// Delete the settings file if it exists.
pub fn remove_settings(path: &Path) -> CleanupOutcome {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed settings file");
            CleanupOutcome::Removed
        }
        Err(e) if e.kind() == ErrorKind::NotFound => CleanupOutcome::Absent,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not clean up settings file");
            CleanupOutcome::Failed(e.to_string())
        }
    }
}
