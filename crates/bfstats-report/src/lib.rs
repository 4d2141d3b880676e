//! Everything downstream of the parser: checking that runs share a filter
//! setup, folding them into one [`MergedResult`](bfstats_model::MergedResult),
//! and writing the per-strategy CSVs and the optional JSON join report.

pub mod emit;
pub mod merge;
pub mod report;
pub mod validate;

pub use emit::{write_category_csv, write_reports};
pub use merge::{combine_merged, merge_runs};
pub use report::{
    FileFindings, JoinReport, REPORT_SCHEMA_VERSION, StrategySummary, write_join_report,
};
pub use validate::validate_setups;
