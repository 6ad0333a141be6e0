//! Firewall settings file model.
//!
//! The file is a two-section JSON object:
//!
//! ```json
//! {
//!   "firewall": {
//!     "enabled": false,
//!     "manually_disabled": true,
//!     "disabled_by": "user_settings",
//!     "disabled_timestamp": "2024-01-01T00:00:00Z"
//!   },
//!   "security": {
//!     "allow_manual_firewall_disable": true
//!   }
//! }
//! ```
//!
//! Missing sections and keys fall back to safe values: the firewall counts as
//! enabled and not manually disabled unless the file says otherwise.

use crate::FwCheckError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Default settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "firewall_settings.json";

/// `disabled_by` value recorded for a manual override.
pub const USER_SETTINGS_SOURCE: &str = "user_settings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FirewallSettings {
    pub firewall: FirewallSection,
    pub security: SecuritySection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallSection {
    pub enabled: bool,
    pub manually_disabled: bool,
    pub disabled_by: String,
    /// ISO-8601 UTC timestamp of the override
    pub disabled_timestamp: String,
}

impl Default for FirewallSection {
    fn default() -> Self {
        FirewallSection {
            enabled: true,
            manually_disabled: false,
            disabled_by: String::new(),
            disabled_timestamp: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SecuritySection {
    pub allow_manual_firewall_disable: bool,
}

impl FirewallSettings {
    /// Snapshot of a manual disable performed by `source` at `at`.
    pub fn manual_disable(source: &str, at: DateTime<Utc>) -> Self {
        FirewallSettings {
            firewall: FirewallSection {
                enabled: false,
                manually_disabled: true,
                disabled_by: source.to_string(),
                disabled_timestamp: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            },
            security: SecuritySection {
                allow_manual_firewall_disable: true,
            },
        }
    }

    pub fn is_disabled(&self) -> bool {
        !self.firewall.enabled
    }

    /// Whether the file records a manual override by the user.
    pub fn is_user_override(&self) -> bool {
        self.firewall.manually_disabled && self.firewall.disabled_by == USER_SETTINGS_SOURCE
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, FwCheckError> {
        serde_json::to_string_pretty(self).map_err(FwCheckError::Serialize)
    }

    /// Write the snapshot, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), FwCheckError> {
        let mut json = self.to_json()?;
        json.push('\n');

        fs::write(path, json).map_err(|e| FwCheckError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }

    pub fn load(path: &Path) -> Result<Self, FwCheckError> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                FwCheckError::SettingsNotFound {
                    path: path.display().to_string(),
                }
            } else {
                FwCheckError::Io {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|e| FwCheckError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Load the file if it exists; a missing file is `Ok(None)`.
    pub fn load_if_present(path: &Path) -> Result<Option<Self>, FwCheckError> {
        match Self::load(path) {
            Ok(settings) => Ok(Some(settings)),
            Err(FwCheckError::SettingsNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
