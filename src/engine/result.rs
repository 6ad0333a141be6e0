//! Run report and summary statistics.

use crate::CheckResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub passed: u32,
    pub failed: u32,
    /// Scheduled but never executed (fail-fast)
    pub not_run: u32,
    pub total: u32,
}

/// Report of one harness run
#[derive(Debug, Clone, Serialize)]
pub struct HarnessReport {
    pub title: String,
    pub started_at: DateTime<Utc>,
    pub settings_path: String,
    /// Results in execution order
    pub results: Vec<CheckResult>,
    /// Number of checks selected for the run
    pub scheduled: u32,
    pub total_duration_ms: u64,
}

impl HarnessReport {
    /// Calculate summary statistics
    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary {
            total: self.scheduled,
            ..Default::default()
        };

        for result in &self.results {
            if result.passed {
                summary.passed += 1;
            } else {
                summary.failed += 1;
            }
        }

        summary.not_run = self
            .scheduled
            .saturating_sub(summary.passed + summary.failed);
        summary
    }

    /// Every scheduled check ran and passed.
    pub fn success(&self) -> bool {
        let summary = self.summary();
        summary.passed == summary.total
    }
}
