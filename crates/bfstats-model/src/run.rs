//! Per-run and merged result records.

use serde::{Deserialize, Serialize};

use crate::setup::FilterSetup;
use crate::strategy::{CategoryMap, Strategy};

/// Reconciled statistics for one traversal strategy within one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyStats {
    /// Guess-set-size categories with their correct/incorrect/total counts.
    pub table: CategoryMap,
    /// Words this traversal never guessed, in log order.
    pub missed: Vec<String>,
}

/// Everything extracted from a single experiment log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Source file, kept for diagnostics and the join report.
    pub path: String,
    pub setup: FilterSetup,
    pub dfs: StrategyStats,
    pub simple: StrategyStats,
    pub edge: StrategyStats,
}

impl RunResult {
    #[must_use]
    pub fn stats(&self, strategy: Strategy) -> &StrategyStats {
        match strategy {
            Strategy::Dfs => &self.dfs,
            Strategy::Simple => &self.simple,
            Strategy::Edge => &self.edge,
        }
    }
}

/// Several runs folded together after the setup check passed.
///
/// Per-category counts are element-wise sums; missed-word lists and the
/// source list are sorted unions (with multiplicity) of the inputs, so
/// merging is order independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedResult {
    /// The shared configuration every merged run was checked against.
    pub setup: FilterSetup,
    /// Paths of the runs folded in, sorted.
    pub sources: Vec<String>,
    pub dfs: StrategyStats,
    pub simple: StrategyStats,
    pub edge: StrategyStats,
}

impl MergedResult {
    /// An empty accumulator for the given setup.
    #[must_use]
    pub fn empty(setup: FilterSetup) -> Self {
        Self {
            setup,
            sources: Vec::new(),
            dfs: StrategyStats::default(),
            simple: StrategyStats::default(),
            edge: StrategyStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self, strategy: Strategy) -> &StrategyStats {
        match strategy {
            Strategy::Dfs => &self.dfs,
            Strategy::Simple => &self.simple,
            Strategy::Edge => &self.edge,
        }
    }

    pub fn stats_mut(&mut self, strategy: Strategy) -> &mut StrategyStats {
        match strategy {
            Strategy::Dfs => &mut self.dfs,
            Strategy::Simple => &mut self.simple,
            Strategy::Edge => &mut self.edge,
        }
    }
}
