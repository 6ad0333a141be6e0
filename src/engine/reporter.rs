//! Result log and live line rendering.
//!
//! Every result is appended to an ordered log; insertion order is display
//! order. Depending on the echo mode, the result is also printed to stdout as
//! `[PASS|FAIL] <name>: <message>` at the moment it is logged.

use crate::CheckResult;

/// What the reporter prints while checks run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    /// Log only (JSON/JUnit output, tests)
    Silent,
    /// Print failing results only
    Failures,
    /// Print every result
    All,
}

/// Ordered result log
#[derive(Debug, Clone)]
pub struct Reporter {
    results: Vec<CheckResult>,
    echo: Echo,
    color: bool,
}

impl Reporter {
    pub fn new(echo: Echo, color: bool) -> Self {
        Reporter {
            results: Vec::new(),
            echo,
            color,
        }
    }

    pub fn silent() -> Self {
        Self::new(Echo::Silent, false)
    }

    /// Print the suite header (not in silent mode).
    pub fn begin_suite(&self, title: &str) {
        if self.echo != Echo::Silent {
            println!("=== {} ===", title);
            println!();
        }
    }

    /// Build a result from its parts, echo it, and append it to the log.
    ///
    /// Returns the logged entry so the caller can attach the check id and
    /// timing; the echoed line does not include them.
    pub fn log_result(&mut self, name: &str, passed: bool, message: &str) -> &mut CheckResult {
        let result = CheckResult::new(name, passed, message);
        let show = match self.echo {
            Echo::Silent => false,
            Echo::Failures => !result.passed,
            Echo::All => true,
        };
        if show {
            println!("{}", render_line(&result, self.color));
        }

        self.results.push(result);
        let last = self.results.len() - 1;
        &mut self.results[last]
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }
}

/// Render one result as a report line, optionally with ANSI color on the tag.
pub fn render_line(result: &CheckResult, color: bool) -> String {
    if !color {
        return result.to_string();
    }

    let code = if result.passed { "32" } else { "31" };
    format!(
        "\x1b[{}m[{}]\x1b[0m {}: {}",
        code,
        result.status(),
        result.name,
        result.message
    )
}
