//! Error type shared by every `bfstats` crate.
//!
//! Fatal conditions get a dedicated variant with enough attribution (input
//! path, line number, offending text) to point at the exact spot in a
//! malformed log. Non-fatal log inconsistencies are *not* errors; they are
//! `Finding`s collected by `bfstats-model` and surfaced by the caller.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, StatsError>;

/// All fatal failure modes of the join pipeline.
#[derive(Debug, Error)]
pub enum StatsError {
    /// A required configuration or totals field did not match its pattern.
    #[error("{path}: line {line}: expected {field}, got {text:?}")]
    HeaderField {
        path: String,
        line: usize,
        field: &'static str,
        text: String,
    },

    /// The stream ended in the middle of a fixed structure.
    #[error("{path}: input ended while reading {expecting}")]
    UnexpectedEof { path: String, expecting: String },

    /// The `Complete. Total of N lines.` marker never appeared.
    #[error("{path}: no `Complete. Total of N lines.` marker before end of input")]
    CompletionMarkerMissing { path: String },

    /// A density table's value row and count row have different lengths.
    #[error(
        "{path}: line {line}: density table {table:?} has {values} value \
         tokens but {counts} count tokens"
    )]
    RowLengthMismatch {
        path: String,
        line: usize,
        table: String,
        values: usize,
        counts: usize,
    },

    /// A density-table count token is not an unsigned integer.
    #[error("{path}: line {line}: density table {table:?} count {token:?} is not an unsigned integer")]
    InvalidCount {
        path: String,
        line: usize,
        table: String,
        token: String,
    },

    /// The total table seeded the same category key twice.
    #[error("duplicate category {key:?} in total table {table:?}")]
    DuplicateCategory { table: String, key: String },

    /// A correct/incorrect table names a category the total table never seeded.
    #[error("table {table:?} names category {key:?} absent from the total table")]
    CategoryNotInTotal { table: String, key: String },

    /// Two input files were produced with different filter setups.
    #[error("incompatible filter setups in {first:?} and {offender:?}")]
    SetupMismatch { first: String, offender: String },

    /// Every input file was skipped or the input list was empty.
    #[error("no runs parsed; nothing to merge")]
    NoRuns,

    /// Failed to encode the JSON join report.
    #[error("failed to encode join report: {0}")]
    ReportEncode(String),

    /// I/O failure, tagged with the path it happened on.
    #[error("{path}: {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },
}

impl StatsError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<String>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }
}
