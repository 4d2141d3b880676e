//! Parser for the text logs produced by the Bloom-filter attack benchmark.
//!
//! A run log is line-oriented and positional: a fixed-shape header
//! describing the filter configuration, a progress region terminated by a
//! completion marker, and a sequence of density tables of which only the
//! per-traversal guess-set triplets survive into the parsed result. The
//! parser walks the log with a [`LineCursor`] so every failure can name the
//! file, line, and what was expected there.
//!
//! Structural damage (truncation, unrecognizable header lines, ragged
//! tables) is a hard error. Suspicious-but-usable numbers, such as trial
//! counts that disagree with the completion marker, are collected as
//! [`Diagnostics`](bfstats_model::Diagnostics) on the [`ParsedRun`] instead.

pub mod cursor;
pub mod density;
pub mod reconcile;
pub mod run;

pub use cursor::LineCursor;
pub use density::read_density;
pub use reconcile::reconcile_triplet;
pub use run::{ParsedRun, parse_run_file, parse_run_str};
