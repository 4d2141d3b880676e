//! Folding validated runs into one result.

use bfstats_error::{Result, StatsError};
use bfstats_model::{MergedResult, RunResult, Strategy, StrategyStats};
use tracing::debug;

use crate::validate::validate_setups;

/// Merges a batch of runs into a single result.
///
/// Validates the setups first, then unions the per-strategy category maps
/// with element-wise sums and concatenates the missed-word lists. Missed
/// words and source paths are sorted afterwards, so the result does not
/// depend on the order of `runs`.
pub fn merge_runs(runs: &[RunResult]) -> Result<MergedResult> {
    let setup = validate_setups(runs)?.clone();
    let mut merged = MergedResult::empty(setup);
    for run in runs {
        merged.sources.push(run.path.clone());
        for strategy in Strategy::ALL {
            fold_stats(merged.stats_mut(strategy), run.stats(strategy));
        }
    }
    canonicalize(&mut merged);
    debug!(runs = runs.len(), "merged runs");
    Ok(merged)
}

/// Folds `right` into `left`, so batches can be merged incrementally.
/// Both sides must describe the same filter setup.
pub fn combine_merged(left: &mut MergedResult, right: &MergedResult) -> Result<()> {
    if left.setup != right.setup {
        return Err(StatsError::SetupMismatch {
            first: left.sources.first().cloned().unwrap_or_default(),
            offender: right.sources.first().cloned().unwrap_or_default(),
        });
    }
    left.sources.extend(right.sources.iter().cloned());
    for strategy in Strategy::ALL {
        fold_stats(left.stats_mut(strategy), right.stats(strategy));
    }
    canonicalize(left);
    Ok(())
}

fn fold_stats(target: &mut StrategyStats, source: &StrategyStats) {
    for (key, counts) in &source.table {
        target.table.entry(key.clone()).or_default().accumulate(*counts);
    }
    target.missed.extend(source.missed.iter().cloned());
}

fn canonicalize(merged: &mut MergedResult) {
    merged.sources.sort();
    for strategy in Strategy::ALL {
        merged.stats_mut(strategy).missed.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfstats_model::{CategoryKey, FilterSetup, StrategyCounts};

    fn setup() -> FilterSetup {
        FilterSetup {
            m: 1000,
            k: 4,
            hash_policy: "Hashes: HashSetPair (k = 4)".to_owned(),
            insertion_policy: "Insertion policy: insert every element".to_owned(),
            alphabet: "abc".to_owned(),
            filters: "Filters: length in [3, 5]".to_owned(),
        }
    }

    fn run(path: &str, dfs_rows: &[(&str, u64, u64, u64)], missed: &[&str]) -> RunResult {
        let mut dfs = StrategyStats::default();
        for (key, correct, incorrect, total) in dfs_rows {
            dfs.table.insert(
                CategoryKey::from(*key),
                StrategyCounts {
                    correct: *correct,
                    incorrect: *incorrect,
                    total: *total,
                },
            );
        }
        dfs.missed = missed.iter().map(|word| (*word).to_owned()).collect();
        RunResult {
            path: path.to_owned(),
            setup: setup(),
            dfs,
            simple: StrategyStats::default(),
            edge: StrategyStats::default(),
        }
    }

    #[test]
    fn sums_shared_categories_and_keeps_disjoint_ones() {
        let runs = [
            run("a.log", &[("10", 3, 2, 5), ("2", 1, 0, 1)], &["ghost"]),
            run("b.log", &[("10", 4, 3, 7)], &["wraith", "banshee"]),
        ];

        let merged = merge_runs(&runs).expect("same setup");
        assert_eq!(
            merged.dfs.table[&CategoryKey::from("10")],
            StrategyCounts {
                correct: 7,
                incorrect: 5,
                total: 12,
            }
        );
        assert_eq!(
            merged.dfs.table[&CategoryKey::from("2")],
            StrategyCounts {
                correct: 1,
                incorrect: 0,
                total: 1,
            }
        );
        assert_eq!(merged.dfs.missed, ["banshee", "ghost", "wraith"]);
        assert_eq!(merged.sources, ["a.log", "b.log"]);
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = run("a.log", &[("10", 3, 2, 5)], &["ghost"]);
        let b = run("b.log", &[("10", 4, 3, 7), ("3", 0, 1, 1)], &["wraith"]);

        let forward = merge_runs(&[a.clone(), b.clone()]).expect("same setup");
        let backward = merge_runs(&[b, a]).expect("same setup");
        assert_eq!(forward, backward);
    }

    #[test]
    fn mismatched_setup_refuses_to_merge() {
        let mut other = run("b.log", &[], &[]);
        other.setup.alphabet = "abcd".to_owned();
        let runs = [run("a.log", &[], &[]), other];

        let err = merge_runs(&runs).expect_err("setups differ");
        assert!(matches!(err, StatsError::SetupMismatch { .. }));
    }

    #[test]
    fn combine_matches_merging_in_one_batch() {
        let a = run("a.log", &[("10", 3, 2, 5)], &["ghost"]);
        let b = run("b.log", &[("10", 4, 3, 7)], &[]);
        let c = run("c.log", &[("2", 1, 0, 1)], &["wraith"]);

        let whole = merge_runs(&[a.clone(), b.clone(), c.clone()]).expect("same setup");

        let mut left = merge_runs(&[a, b]).expect("same setup");
        let right = merge_runs(&[c]).expect("same setup");
        combine_merged(&mut left, &right).expect("same setup");

        assert_eq!(whole, left);
    }

    #[test]
    fn combine_rejects_foreign_batches() {
        let mut left = merge_runs(&[run("a.log", &[], &[])]).expect("one run");
        let mut foreign = run("b.log", &[], &[]);
        foreign.setup.m = 2000;
        let right = merge_runs(&[foreign]).expect("one run");

        let err = combine_merged(&mut left, &right).expect_err("setups differ");
        match err {
            StatsError::SetupMismatch { first, offender } => {
                assert_eq!(first, "a.log");
                assert_eq!(offender, "b.log");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
