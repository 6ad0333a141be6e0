//! Output formatting for fwcheck.
//!
//! Provides terminal, JSON, and JUnit XML output formatters.
//!
//! The terminal formatter renders only the closing part of a run (tally,
//! audit echo of every logged result, banner); the live result lines were
//! already printed by the reporter while the checks ran. Quiet mode only
//! trims the live lines, never the audit echo. JSON and JUnit render the
//! whole report and are meant to be the only thing on stdout.

use crate::cli::args::OutputFormat;
use crate::engine::reporter::render_line;
use crate::engine::result::{HarnessReport, ResultSummary};
use crate::{CheckResult, FwCheckError};
use chrono::SecondsFormat;
use serde::Serialize;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a harness report into a string
    fn format(&self, report: &HarnessReport) -> Result<String, FwCheckError>;
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    verbose: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool, verbose: bool) -> Self {
        TerminalFormatter { color, verbose }
    }

    fn echo_line(&self, result: &CheckResult) -> String {
        let line = render_line(result, self.color);
        if self.verbose {
            format!("{} ({}ms)", line, result.duration_ms)
        } else {
            line
        }
    }
}

impl OutputFormatter for TerminalFormatter {
    fn format(&self, report: &HarnessReport) -> Result<String, FwCheckError> {
        let summary = report.summary();
        let mut output = String::new();

        output.push('\n');
        output.push_str(&format!(
            "=== Test Results: {}/{} tests passed ===\n",
            summary.passed, summary.total
        ));

        for result in &report.results {
            output.push_str(&self.echo_line(result));
            output.push('\n');
        }

        if self.verbose {
            output.push_str(&format!(
                "Started: {}, total time: {:.1}s, settings: {}\n",
                report.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                report.total_duration_ms as f64 / 1000.0,
                report.settings_path
            ));
        }

        output.push('\n');
        if report.success() {
            output.push_str("✅ All tests passed! Firewall can be manually disabled successfully.");
        } else if summary.not_run > 0 {
            output.push_str(&format!(
                "❌ {} test(s) failed, {} not run.",
                summary.failed, summary.not_run
            ));
        } else {
            output.push_str(&format!("❌ {} test(s) failed.", summary.failed));
        }

        Ok(output)
    }
}

/// Envelope for JSON output
#[derive(Serialize)]
struct JsonOut<'a> {
    ok: bool,
    summary: ResultSummary,
    data: &'a HarnessReport,
}

/// JSON formatter
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &HarnessReport) -> Result<String, FwCheckError> {
        let out = JsonOut {
            ok: report.success(),
            summary: report.summary(),
            data: report,
        };

        if self.pretty {
            serde_json::to_string_pretty(&out).map_err(FwCheckError::Serialize)
        } else {
            serde_json::to_string(&out).map_err(FwCheckError::Serialize)
        }
    }
}

/// JUnit XML formatter
pub struct JunitFormatter;

impl JunitFormatter {
    fn escape_xml(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&apos;"),
                c => result.push(c),
            }
        }
        result
    }
}

impl OutputFormatter for JunitFormatter {
    fn format(&self, report: &HarnessReport) -> Result<String, FwCheckError> {
        let summary = report.summary();
        let time = report.total_duration_ms as f64 / 1000.0;
        let mut output = String::new();
        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

        output.push_str(&format!(
            "<testsuites tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"{}\" time=\"{:.3}\">\n",
            summary.total, summary.failed, summary.not_run, time
        ));
        output.push_str(&format!(
            "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"{}\" time=\"{:.3}\" timestamp=\"{}\">\n",
            Self::escape_xml(&report.title),
            summary.total,
            summary.failed,
            summary.not_run,
            time,
            report.started_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));

        for result in &report.results {
            let name = if result.id.is_empty() {
                result.name.clone()
            } else {
                format!("{} {}", result.id, result.name)
            };

            output.push_str(&format!(
                "    <testcase name=\"{}\" classname=\"fwcheck.firewall\" time=\"{:.3}\">\n",
                Self::escape_xml(&name),
                result.duration_ms as f64 / 1000.0
            ));
            if result.passed {
                output.push_str(&format!(
                    "      <system-out>{}</system-out>\n",
                    Self::escape_xml(&result.message)
                ));
            } else {
                output.push_str(&format!(
                    "      <failure message=\"{}\" />\n",
                    Self::escape_xml(&result.message)
                ));
            }
            output.push_str("    </testcase>\n");
        }

        output.push_str("  </testsuite>\n");
        output.push_str("</testsuites>");
        Ok(output)
    }
}

/// Get a formatter based on the output format
pub fn get_formatter(format: OutputFormat, color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TerminalFormatter::new(color, verbose)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Junit => Box::new(JunitFormatter),
    }
}
