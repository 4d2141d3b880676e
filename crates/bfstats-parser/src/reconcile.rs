//! Reconciliation of a total/correct/incorrect table triplet.

use std::collections::BTreeSet;

use bfstats_error::{Result, StatsError};
use bfstats_model::{CategoryKey, CategoryMap, DensityTable, Diagnostics, Finding, StrategyCounts};

/// Folds one traversal's three density tables into a single category map.
///
/// The total table seeds every category; the correct and incorrect tables
/// overlay their counts onto existing categories. A category appearing
/// twice within one table, or appearing in an overlay without appearing in
/// the total, means the tables do not describe the same trials and is a
/// hard error. Categories where `correct + incorrect != total` are recorded
/// as findings and kept.
///
/// Also returns the number of trials the triplet accounts for, the sum of
/// the total column.
pub fn reconcile_triplet(
    total: &DensityTable,
    correct: &DensityTable,
    incorrect: &DensityTable,
    diagnostics: &mut Diagnostics,
) -> Result<(CategoryMap, u64)> {
    let mut merged = CategoryMap::new();
    for (key, count) in &total.rows {
        if merged.insert(key.clone(), StrategyCounts::seed(*count)).is_some() {
            return Err(duplicate(total, key));
        }
    }

    let mut seen = BTreeSet::new();
    for (key, count) in &correct.rows {
        if !seen.insert(key) {
            return Err(duplicate(correct, key));
        }
        match merged.get_mut(key) {
            Some(counts) => counts.correct = *count,
            None => return Err(not_in_total(correct, key)),
        }
    }

    seen.clear();
    for (key, count) in &incorrect.rows {
        if !seen.insert(key) {
            return Err(duplicate(incorrect, key));
        }
        match merged.get_mut(key) {
            Some(counts) => counts.incorrect = *count,
            None => return Err(not_in_total(incorrect, key)),
        }
    }

    let mut trials = 0;
    for (key, counts) in &merged {
        trials += counts.total;
        if !counts.is_consistent() {
            diagnostics.push(Finding::InconsistentTotals {
                key: key.clone(),
                correct: counts.correct,
                incorrect: counts.incorrect,
                total: counts.total,
            });
        }
    }

    Ok((merged, trials))
}

fn duplicate(table: &DensityTable, key: &CategoryKey) -> StatsError {
    StatsError::DuplicateCategory {
        table: table.name.clone(),
        key: key.as_str().to_owned(),
    }
}

fn not_in_total(table: &DensityTable, key: &CategoryKey) -> StatsError {
    StatsError::CategoryNotInTotal {
        table: table.name.clone(),
        key: key.as_str().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, rows: &[(&str, u64)]) -> DensityTable {
        DensityTable::new(
            name,
            rows.iter()
                .map(|(key, count)| (CategoryKey::from(*key), *count))
                .collect(),
        )
    }

    #[test]
    fn overlays_correct_and_incorrect_onto_totals() {
        let mut diagnostics = Diagnostics::new();
        let (merged, trials) = reconcile_triplet(
            &table("total guess set", &[("1", 1), ("2", 3), ("3", 1)]),
            &table("correct guess set", &[("1", 1), ("2", 2), ("3", 1)]),
            &table("incorrect guess set", &[("2", 1)]),
            &mut diagnostics,
        )
        .expect("consistent triplet");

        assert_eq!(trials, 5);
        assert!(diagnostics.is_empty());
        assert_eq!(
            merged[&CategoryKey::from("2")],
            StrategyCounts {
                correct: 2,
                incorrect: 1,
                total: 3,
            }
        );
        assert_eq!(
            merged[&CategoryKey::from("3")],
            StrategyCounts {
                correct: 1,
                incorrect: 0,
                total: 1,
            }
        );
    }

    #[test]
    fn unattributed_categories_become_findings() {
        let mut diagnostics = Diagnostics::new();
        let (_, trials) = reconcile_triplet(
            &table("total guess set", &[("4", 2)]),
            &table("correct guess set", &[]),
            &table("incorrect guess set", &[]),
            &mut diagnostics,
        )
        .expect("structurally fine");

        assert_eq!(trials, 2);
        assert_eq!(
            diagnostics.findings(),
            [Finding::InconsistentTotals {
                key: CategoryKey::from("4"),
                correct: 0,
                incorrect: 0,
                total: 2,
            }]
        );
    }

    #[test]
    fn overlay_key_missing_from_total_is_fatal() {
        let mut diagnostics = Diagnostics::new();
        let err = reconcile_triplet(
            &table("total guess set", &[("1", 1)]),
            &table("correct guess set", &[("9", 1)]),
            &table("incorrect guess set", &[]),
            &mut diagnostics,
        )
        .expect_err("category 9 has no total");

        match err {
            StatsError::CategoryNotInTotal { table, key } => {
                assert_eq!(table, "correct guess set");
                assert_eq!(key, "9");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_total_category_is_fatal() {
        let mut diagnostics = Diagnostics::new();
        let err = reconcile_triplet(
            &table("total guess set", &[("2", 1), ("2", 4)]),
            &table("correct guess set", &[]),
            &table("incorrect guess set", &[]),
            &mut diagnostics,
        )
        .expect_err("category 2 appears twice");
        assert!(matches!(err, StatsError::DuplicateCategory { .. }));
    }

    #[test]
    fn duplicate_overlay_category_is_fatal() {
        let mut diagnostics = Diagnostics::new();
        let err = reconcile_triplet(
            &table("total guess set", &[("2", 5)]),
            &table("correct guess set", &[("2", 1), ("2", 4)]),
            &table("incorrect guess set", &[]),
            &mut diagnostics,
        )
        .expect_err("category 2 overlaid twice");

        match err {
            StatsError::DuplicateCategory { table, key } => {
                assert_eq!(table, "correct guess set");
                assert_eq!(key, "2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn findings_report_the_arithmetic() {
        let mut diagnostics = Diagnostics::new();
        let (merged, _) = reconcile_triplet(
            &table("total guess set", &[("10", 12)]),
            &table("correct guess set", &[("10", 7)]),
            &table("incorrect guess set", &[("10", 4)]),
            &mut diagnostics,
        )
        .expect("structurally fine");

        // The inconsistent category stays in the result.
        assert_eq!(
            merged[&CategoryKey::from("10")],
            StrategyCounts {
                correct: 7,
                incorrect: 4,
                total: 12,
            }
        );
        assert_eq!(
            diagnostics.findings(),
            [Finding::InconsistentTotals {
                key: CategoryKey::from("10"),
                correct: 7,
                incorrect: 4,
                total: 12,
            }]
        );
    }
}
