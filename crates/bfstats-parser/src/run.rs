//! Whole-run parsing.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use bfstats_error::{Result, StatsError};
use bfstats_model::{Diagnostics, Finding, FilterSetup, RunResult, Strategy, StrategyStats};
use regex::Regex;
use tracing::{debug, info};

use crate::cursor::LineCursor;
use crate::density::read_density;
use crate::reconcile::reconcile_triplet;

static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Size \(m\) = (\d+)").expect("valid regex"));
// Hash counts in these logs are a single digit.
static HASH_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"k = (\d)").expect("valid regex"));
static ALPHABET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Using alphabet: (.*)").expect("valid regex"));
static COMPLETE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Complete\. Total of (\d+) lines\.").expect("valid regex"));
static TRIALS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total trials: (\d+)").expect("valid regex"));

/// A fully parsed run plus whatever findings turned up along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRun {
    pub run: RunResult,
    pub diagnostics: Diagnostics,
}

/// Reads and parses the run log at `path`.
pub fn parse_run_file(path: &Path) -> Result<ParsedRun> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|error| StatsError::io(display.clone(), error))?;
    parse_run_str(&display, &text)
}

/// Parses a run log already held in memory. `path` is used for error and
/// finding attribution only.
pub fn parse_run_str(path: &str, text: &str) -> Result<ParsedRun> {
    info!(path, "parsing run log");
    let mut cursor = LineCursor::new(path, text);
    let mut diagnostics = Diagnostics::new();

    let setup = parse_setup(&mut cursor)?;
    debug!(
        path,
        m = setup.m,
        k = setup.k,
        alphabet = %setup.alphabet,
        "parsed filter setup"
    );

    let (line_number, raw) = cursor
        .scan_capture(&COMPLETE_RE)
        .ok_or_else(|| StatsError::CompletionMarkerMissing {
            path: path.to_owned(),
        })?;
    let processed: u64 = parse_field(&cursor, line_number, "processed line count", raw)?;
    debug!(path, lines = processed, "found completion marker");

    cursor.skip(2, "stats banner")?;
    let line_number = cursor.line_number();
    let raw = cursor.capture(&TRIALS_RE, "total trials")?;
    let declared: u64 = parse_field(&cursor, line_number, "total trials", raw)?;
    if declared != processed {
        diagnostics.push(Finding::DeclaredTrialMismatch {
            declared,
            expected: processed,
        });
    }

    // The filter-occupancy and graph-shape tables are read only to keep the
    // cursor aligned; nothing downstream uses them.
    cursor.skip(3, "filter stats banner")?;
    read_density(&mut cursor)?;
    read_density(&mut cursor)?;
    cursor.skip(3, "graph stats banner")?;
    for _ in 0..4 {
        read_density(&mut cursor)?;
    }

    let dfs = parse_section(&mut cursor, Strategy::Dfs, processed, &mut diagnostics)?;
    let simple = parse_section(&mut cursor, Strategy::Simple, processed, &mut diagnostics)?;
    let edge = parse_section(&mut cursor, Strategy::Edge, processed, &mut diagnostics)?;

    Ok(ParsedRun {
        run: RunResult {
            path: path.to_owned(),
            setup,
            dfs,
            simple,
            edge,
        },
        diagnostics,
    })
}

fn parse_setup(cursor: &mut LineCursor<'_>) -> Result<FilterSetup> {
    cursor.skip(5, "run preamble")?;

    let line_number = cursor.line_number();
    let raw = cursor.capture(&SIZE_RE, "filter size (m)")?;
    let m = parse_field(cursor, line_number, "filter size (m)", raw)?;

    // The hash line is kept verbatim for the setup comparison; k is lifted
    // out of it for convenience.
    let line_number = cursor.line_number();
    let hash_policy = cursor.next_line("hash policy line")?.trim_end().to_owned();
    let caps = HASH_COUNT_RE
        .captures(&hash_policy)
        .ok_or_else(|| StatsError::HeaderField {
            path: cursor.path().to_owned(),
            line: line_number,
            field: "hash count (k)",
            text: hash_policy.clone(),
        })?;
    let k = parse_field(cursor, line_number, "hash count (k)", caps[1].to_owned())?;

    let insertion_policy = cursor
        .next_line("insertion policy line")?
        .trim_end()
        .to_owned();
    cursor.skip(6, "filter contents")?;
    let alphabet = cursor.capture(&ALPHABET_RE, "alphabet line")?;
    let filters = cursor.next_line("filter list line")?.trim_end().to_owned();

    Ok(FilterSetup {
        m,
        k,
        hash_policy,
        insertion_policy,
        alphabet,
        filters,
    })
}

fn parse_section(
    cursor: &mut LineCursor<'_>,
    strategy: Strategy,
    processed: u64,
    diagnostics: &mut Diagnostics,
) -> Result<StrategyStats> {
    cursor.skip(3, "traversal stats banner")?;
    let total = read_density(cursor)?;
    let correct = read_density(cursor)?;
    let incorrect = read_density(cursor)?;
    cursor.skip(1, "missed-words header")?;

    let (table, trials) = reconcile_triplet(&total, &correct, &incorrect, diagnostics)?;
    let missed: Vec<String> = cursor
        .next_line("missed words")?
        .split_ascii_whitespace()
        .map(str::to_owned)
        .collect();

    if trials != processed {
        diagnostics.push(Finding::SectionTrialMismatch {
            strategy,
            found: trials,
            expected: processed,
        });
    }

    debug!(
        strategy = %strategy,
        categories = table.len(),
        missed = missed.len(),
        "parsed traversal section"
    );
    Ok(StrategyStats { table, missed })
}

fn parse_field<T: FromStr>(
    cursor: &LineCursor<'_>,
    line: usize,
    field: &'static str,
    raw: String,
) -> Result<T> {
    raw.parse().map_err(|_| StatsError::HeaderField {
        path: cursor.path().to_owned(),
        line,
        field,
        text: raw,
    })
}
