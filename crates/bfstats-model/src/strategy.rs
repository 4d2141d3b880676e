//! Traversal strategies and the reconciled per-category counts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::density::CategoryKey;

/// The three guessing traversals each run reports, in log order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Dfs,
    Simple,
    Edge,
}

impl Strategy {
    /// Log order, which is also emission order.
    pub const ALL: [Self; 3] = [Self::Dfs, Self::Simple, Self::Edge];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dfs => "dfs",
            Self::Simple => "simple",
            Self::Edge => "edge",
        }
    }

    /// Suffix appended to the output stem for this strategy's CSV.
    #[must_use]
    pub const fn csv_suffix(self) -> &'static str {
        match self {
            Self::Dfs => "-dfs.csv",
            Self::Simple => "-simple.csv",
            Self::Edge => "-edge.csv",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reconciled counts for one category: how many trials produced a guess set
/// of this size, split into correct and incorrect outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyCounts {
    pub correct: u64,
    pub incorrect: u64,
    pub total: u64,
}

impl StrategyCounts {
    /// Counts seeded from a total-table row, before the correct/incorrect
    /// overlay.
    #[must_use]
    pub const fn seed(total: u64) -> Self {
        Self {
            correct: 0,
            incorrect: 0,
            total,
        }
    }

    /// Whether `correct + incorrect == total` holds for this category.
    #[must_use]
    pub const fn is_consistent(self) -> bool {
        self.correct + self.incorrect == self.total
    }

    /// Element-wise sum, used when merging runs.
    pub const fn accumulate(&mut self, other: Self) {
        self.correct += other.correct;
        self.incorrect += other.incorrect;
        self.total += other.total;
    }
}

/// Category key to reconciled counts, ordered for deterministic emission.
pub type CategoryMap = BTreeMap<CategoryKey, StrategyCounts>;
