//! Machine-readable join report.
//!
//! An optional JSON artifact summarizing one invocation: which inputs went
//! in, what they agreed on, how much data came out per strategy, and every
//! finding that was logged along the way. Consumers pin
//! [`REPORT_SCHEMA_VERSION`] before interpreting the rest.

use std::fs;
use std::path::Path;

use bfstats_error::{Result, StatsError};
use bfstats_model::{Finding, FilterSetup, MergedResult, StrategyStats};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Bump when the report layout changes shape.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Findings attributed to one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFindings {
    pub path: String,
    pub findings: Vec<Finding>,
}

/// Aggregate shape of one strategy's merged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub categories: usize,
    pub trials: u64,
    pub correct: u64,
    pub incorrect: u64,
    pub missed_words: usize,
}

impl StrategySummary {
    fn of(stats: &StrategyStats) -> Self {
        let mut trials = 0;
        let mut correct = 0;
        let mut incorrect = 0;
        for counts in stats.table.values() {
            trials += counts.total;
            correct += counts.correct;
            incorrect += counts.incorrect;
        }
        Self {
            categories: stats.table.len(),
            trials,
            correct,
            incorrect,
            missed_words: stats.missed.len(),
        }
    }
}

/// Everything one invocation produced, minus the CSVs themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinReport {
    pub schema_version: u32,
    pub setup: FilterSetup,
    /// Inputs that merged, sorted.
    pub inputs: Vec<String>,
    /// Inputs that were skipped because they did not exist.
    pub skipped: Vec<String>,
    pub dfs: StrategySummary,
    pub simple: StrategySummary,
    pub edge: StrategySummary,
    pub findings: Vec<FileFindings>,
}

impl JoinReport {
    #[must_use]
    pub fn new(merged: &MergedResult, skipped: Vec<String>, findings: Vec<FileFindings>) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION,
            setup: merged.setup.clone(),
            inputs: merged.sources.clone(),
            skipped,
            dfs: StrategySummary::of(&merged.dfs),
            simple: StrategySummary::of(&merged.simple),
            edge: StrategySummary::of(&merged.edge),
            findings,
        }
    }
}

/// Serializes `report` as pretty-printed JSON at `path`.
pub fn write_join_report(report: &JoinReport, path: &Path) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(report)
        .map_err(|error| StatsError::ReportEncode(error.to_string()))?;
    fs::write(path, bytes).map_err(|error| StatsError::io(path.display().to_string(), error))?;
    info!(path = %path.display(), "wrote join report");
    Ok(())
}
