//! Data model for the benchmark-log join pipeline.
//!
//! Everything here is plain data: the parser in `bfstats-parser` produces
//! these types, the validator/merger in `bfstats-report` consumes them.
//! Ordered maps (`BTreeMap` keyed by [`CategoryKey`]) keep every downstream
//! artifact deterministic regardless of input order.

pub mod density;
pub mod diagnostics;
pub mod run;
pub mod setup;
pub mod strategy;

pub use density::{CategoryKey, DensityTable};
pub use diagnostics::{Diagnostics, Finding};
pub use run::{MergedResult, RunResult, StrategyStats};
pub use setup::FilterSetup;
pub use strategy::{CategoryMap, Strategy, StrategyCounts};
