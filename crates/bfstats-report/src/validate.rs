//! Cross-run compatibility check.

use bfstats_error::{Result, StatsError};
use bfstats_model::{FilterSetup, RunResult};
use tracing::debug;

/// Checks that every run was produced under the same filter setup and
/// returns that setup.
///
/// Runs against different configurations must not be summed, so the first
/// disagreement is fatal and names both files. An empty batch is fatal too;
/// it means nothing was parsed and there is nothing to emit.
pub fn validate_setups(runs: &[RunResult]) -> Result<&FilterSetup> {
    let first = runs.first().ok_or(StatsError::NoRuns)?;
    for run in &runs[1..] {
        if run.setup != first.setup {
            return Err(StatsError::SetupMismatch {
                first: first.path.clone(),
                offender: run.path.clone(),
            });
        }
    }
    debug!(runs = runs.len(), "filter setups agree");
    Ok(&first.setup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfstats_model::StrategyStats;

    fn run(path: &str, alphabet: &str) -> RunResult {
        RunResult {
            path: path.to_owned(),
            setup: FilterSetup {
                m: 1000,
                k: 4,
                hash_policy: "Hashes: HashSetPair (k = 4)".to_owned(),
                insertion_policy: "Insertion policy: insert every element".to_owned(),
                alphabet: alphabet.to_owned(),
                filters: "Filters: length in [3, 5]".to_owned(),
            },
            dfs: StrategyStats::default(),
            simple: StrategyStats::default(),
            edge: StrategyStats::default(),
        }
    }

    #[test]
    fn agreeing_runs_pass() {
        let runs = [run("a.log", "abc"), run("b.log", "abc")];
        let setup = validate_setups(&runs).expect("setups agree");
        assert_eq!(setup.alphabet, "abc");
    }

    #[test]
    fn mismatch_names_both_files() {
        let runs = [run("a.log", "abc"), run("b.log", "abcd")];
        let err = validate_setups(&runs).expect_err("alphabets differ");
        match err {
            StatsError::SetupMismatch { first, offender } => {
                assert_eq!(first, "a.log");
                assert_eq!(offender, "b.log");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_batch_is_fatal() {
        let err = validate_setups(&[]).expect_err("nothing to validate");
        assert!(matches!(err, StatsError::NoRuns));
    }
}
