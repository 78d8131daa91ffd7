//! Links Notation (Lino) timing report.
//!
//! The benchmark driver records one result per `(mode, n, workers)` run and
//! renders them as a Links Notation document: plain references, `key value`
//! pairs, nesting by indentation. Speedup and efficiency against the
//! sequential run at the same size are computed into a `comparisons`
//! section, and the whole document round-trips through [`parse_lino_report`]
//! so the `lino2md` tool can render it as Markdown later.

// Allow dead_code since this module provides a public API for external use
// (lino2md binary, future tools, etc.)
#![allow(dead_code)]

use std::fmt::Write;
use std::fs;
use std::io;
use std::path::Path;

/// Mode label for the sequential reference run.
pub const MODE_SEQUENTIAL: &str = "sequential";
/// Mode label for the synchronous-discipline run.
pub const MODE_SYNCHRONOUS: &str = "synchronous";
/// Mode label for the pipelined-discipline run.
pub const MODE_PIPELINED: &str = "pipelined";

/// One timed sort run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// One of the `MODE_*` labels.
    pub mode: String,
    /// Element count.
    pub n: usize,
    /// Generator seed.
    pub seed: u64,
    /// Worker count (1 for the sequential reference).
    pub workers: usize,
    /// Wall time in milliseconds.
    pub time_ms: f64,
    /// Total swaps performed.
    pub swaps: u64,
    /// Whether the run matched the sequential reference.
    pub verified: bool,
}

/// A complete timing report.
#[derive(Debug, Clone)]
pub struct SpeedupReport {
    /// ISO 8601 timestamp of the run.
    pub timestamp: String,
    /// Free-form description.
    pub description: String,
    /// All recorded results.
    pub results: Vec<RunResult>,
}

impl SpeedupReport {
    /// Create an empty report stamped with the current time.
    pub fn new(description: &str) -> Self {
        SpeedupReport {
            timestamp: utc_timestamp(),
            description: description.to_string(),
            results: Vec::new(),
        }
    }

    /// Record one run.
    pub fn add_result(&mut self, result: RunResult) {
        self.results.push(result);
    }

    /// The sequential baseline for a given size, if recorded.
    fn baseline_ms(&self, n: usize) -> Option<f64> {
        self.results
            .iter()
            .find(|r| r.n == n && r.mode == MODE_SEQUENTIAL)
            .map(|r| r.time_ms)
    }

    fn sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.results.iter().map(|r| r.n).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Render the report in Links Notation.
    pub fn to_lino(&self) -> String {
        let mut out = String::new();

        writeln!(out, "speedup_report:").unwrap();
        writeln!(out, "  timestamp '{}'", self.timestamp).unwrap();
        writeln!(out, "  description '{}'", escape_lino_string(&self.description)).unwrap();

        writeln!(out).unwrap();
        writeln!(out, "results:").unwrap();
        for n in self.sizes() {
            writeln!(out, "  n_{}:", n).unwrap();
            for result in self.results.iter().filter(|r| r.n == n) {
                writeln!(out, "    {}_w{}:", result.mode, result.workers).unwrap();
                writeln!(out, "      mode {}", result.mode).unwrap();
                writeln!(out, "      workers {}", result.workers).unwrap();
                writeln!(out, "      seed {}", result.seed).unwrap();
                writeln!(out, "      time_ms {:.3}", result.time_ms).unwrap();
                writeln!(out, "      swaps {}", result.swaps).unwrap();
                writeln!(out, "      verified {}", result.verified).unwrap();
            }
        }

        writeln!(out).unwrap();
        writeln!(out, "comparisons:").unwrap();
        for n in self.sizes() {
            let Some(seq_ms) = self.baseline_ms(n) else {
                continue;
            };
            writeln!(out, "  n_{}:", n).unwrap();
            for result in self
                .results
                .iter()
                .filter(|r| r.n == n && r.mode != MODE_SEQUENTIAL)
            {
                let speedup = seq_ms / result.time_ms;
                let efficiency = speedup / result.workers as f64 * 100.0;
                writeln!(out, "    {}_w{}:", result.mode, result.workers).unwrap();
                writeln!(out, "      speedup {:.2}", speedup).unwrap();
                writeln!(out, "      efficiency_pct {:.1}", efficiency).unwrap();
            }
        }

        out
    }

    /// Save the report to a file in Links Notation.
    pub fn save_lino(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_lino())
    }

    /// Render the report as a Markdown document with speedup and
    /// efficiency computed against the sequential baseline per size.
    pub fn to_markdown_table(&self) -> String {
        let mut out = String::new();

        writeln!(out, "# Distributed Bubble Sort Timing Report").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "**Timestamp:** {}", self.timestamp).unwrap();
        writeln!(out, "**Description:** {}", self.description).unwrap();
        writeln!(out).unwrap();

        writeln!(out, "## Results").unwrap();
        writeln!(out).unwrap();
        writeln!(
            out,
            "| n | Mode | Workers | Time (ms) | Swaps | Verified | Speedup | Efficiency |"
        )
        .unwrap();
        writeln!(
            out,
            "|---|------|---------|-----------|-------|----------|---------|------------|"
        )
        .unwrap();

        for n in self.sizes() {
            let baseline = self.baseline_ms(n);
            for result in self.results.iter().filter(|r| r.n == n) {
                let (speedup, efficiency) = match baseline {
                    Some(seq_ms) if result.mode != MODE_SEQUENTIAL => {
                        let s = seq_ms / result.time_ms;
                        (
                            format!("{:.2}x", s),
                            format!("{:.1}%", s / result.workers as f64 * 100.0),
                        )
                    }
                    _ => ("-".to_string(), "-".to_string()),
                };
                writeln!(
                    out,
                    "| {} | {} | {} | {:.3} | {} | {} | {} | {} |",
                    result.n,
                    result.mode,
                    result.workers,
                    result.time_ms,
                    result.swaps,
                    if result.verified { "yes" } else { "NO" },
                    speedup,
                    efficiency
                )
                .unwrap();
            }
        }

        writeln!(out).unwrap();
        writeln!(out, "---").unwrap();
        writeln!(out, "*Report generated by the channel-sorting benchmark driver*").unwrap();

        out
    }

    /// Save the report as a Markdown file.
    pub fn save_markdown(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_markdown_table())
    }
}

/// Escape a string for Links Notation (single quotes).
fn escape_lino_string(s: &str) -> String {
    s.replace('\'', "\\'")
}

/// Parse a Links Notation report produced by [`SpeedupReport::to_lino`].
///
/// Comparisons are not parsed; they are recomputed from the results when
/// rendering. Returns `None` when no results can be recovered.
pub fn parse_lino_report(content: &str) -> Option<SpeedupReport> {
    let mut report = SpeedupReport::new("Parsed report");
    let mut current_n: Option<usize> = None;
    let mut current: Option<RunResult> = None;
    let mut in_results = false;

    fn flush(current: &mut Option<RunResult>, results: &mut Vec<RunResult>) {
        if let Some(result) = current.take() {
            results.push(result);
        }
    }

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed == "results:" {
            in_results = true;
            continue;
        }
        if trimmed == "comparisons:" {
            flush(&mut current, &mut report.results);
            in_results = false;
            continue;
        }

        if let Some(ts) = extract_quoted_value(trimmed, "timestamp") {
            report.timestamp = ts;
            continue;
        }
        if let Some(desc) = extract_quoted_value(trimmed, "description") {
            report.description = desc;
            continue;
        }

        if !in_results {
            continue;
        }

        if let Some(size) = trimmed
            .strip_prefix("n_")
            .and_then(|rest| rest.strip_suffix(':'))
        {
            flush(&mut current, &mut report.results);
            current_n = size.parse().ok();
            continue;
        }

        let is_result_key = trimmed.ends_with(':')
            && [MODE_SEQUENTIAL, MODE_SYNCHRONOUS, MODE_PIPELINED]
                .iter()
                .any(|mode| trimmed.starts_with(mode));
        if is_result_key {
            if let Some(n) = current_n {
                flush(&mut current, &mut report.results);
                current = Some(RunResult {
                    mode: String::new(),
                    n,
                    seed: 0,
                    workers: 1,
                    time_ms: 0.0,
                    swaps: 0,
                    verified: false,
                });
            }
            continue;
        }

        if let Some(ref mut result) = current {
            if let Some(rest) = trimmed.strip_prefix("mode ") {
                result.mode = rest.to_string();
            } else if let Some(rest) = trimmed.strip_prefix("workers ") {
                result.workers = rest.parse().unwrap_or(1);
            } else if let Some(rest) = trimmed.strip_prefix("seed ") {
                result.seed = rest.parse().unwrap_or(0);
            } else if let Some(rest) = trimmed.strip_prefix("time_ms ") {
                result.time_ms = rest.parse().unwrap_or(0.0);
            } else if let Some(rest) = trimmed.strip_prefix("swaps ") {
                result.swaps = rest.parse().unwrap_or(0);
            } else if let Some(rest) = trimmed.strip_prefix("verified ") {
                result.verified = rest == "true";
            }
        }
    }

    flush(&mut current, &mut report.results);

    if report.results.is_empty() {
        None
    } else {
        Some(report)
    }
}

fn extract_quoted_value(line: &str, key: &str) -> Option<String> {
    let rest = line.strip_prefix(key)?.trim();
    let inner = rest.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("\\'", "'"))
}

/// UTC timestamp without pulling in a date-time dependency.
fn utc_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (mut days, rem) = (secs / 86_400, secs % 86_400);
    let (hh, mm, ss) = (rem / 3_600, rem % 3_600 / 60, rem % 60);

    let mut year = 1970u64;
    loop {
        let len = if leap(year) { 366 } else { 365 };
        if days < len {
            break;
        }
        days -= len;
        year += 1;
    }
    let feb = if leap(year) { 29 } else { 28 };
    let lengths = [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut month = 1;
    for len in lengths {
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        days + 1,
        hh,
        mm,
        ss
    )
}

fn leap(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
