//! Non-fatal findings collected while parsing and reconciling a run.
//!
//! Suspicious-but-tolerable conditions do not abort a parse; they are
//! recorded here and surfaced by the caller, which knows which file they
//! belong to. Structural damage is a hard error instead, see
//! `bfstats-error`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::density::CategoryKey;
use crate::strategy::Strategy;

/// One suspicious condition observed in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// The `Total trials:` header disagrees with the completion marker's
    /// line count.
    DeclaredTrialMismatch { declared: u64, expected: u64 },
    /// One strategy section's own trial count disagrees with the completion
    /// marker's line count.
    SectionTrialMismatch {
        strategy: Strategy,
        found: u64,
        expected: u64,
    },
    /// A reconciled category where `correct + incorrect != total`.
    InconsistentTotals {
        key: CategoryKey,
        correct: u64,
        incorrect: u64,
        total: u64,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeclaredTrialMismatch { declared, expected } => write!(
                f,
                "declared trial count {declared} does not match the {expected} lines processed"
            ),
            Self::SectionTrialMismatch {
                strategy,
                found,
                expected,
            } => write!(
                f,
                "{strategy} section accounts for {found} trials, source processed {expected} lines"
            ),
            Self::InconsistentTotals {
                key,
                correct,
                incorrect,
                total,
            } => write!(
                f,
                "invalid totals for set size {key}: {correct} correct + {incorrect} incorrect != {total}"
            ),
        }
    }
}

/// Ordered collection of findings from one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    findings: Vec<Finding>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Append everything from `other`, preserving order.
    pub fn absorb(&mut self, other: Self) {
        self.findings.extend(other.findings);
    }

    #[must_use]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inconsistent_totals_display_names_the_category() {
        let finding = Finding::InconsistentTotals {
            key: CategoryKey::from("10"),
            correct: 7,
            incorrect: 4,
            total: 12,
        };
        let message = finding.to_string();
        assert!(
            message.contains("set size 10"),
            "message names the category: {message}"
        );
        assert!(
            message.contains("7 correct + 4 incorrect != 12"),
            "message shows the arithmetic: {message}"
        );
    }

    #[test]
    fn absorb_keeps_order() {
        let mut first = Diagnostics::new();
        first.push(Finding::DeclaredTrialMismatch {
            declared: 9,
            expected: 10,
        });
        let mut second = Diagnostics::new();
        second.push(Finding::SectionTrialMismatch {
            strategy: Strategy::Edge,
            found: 8,
            expected: 10,
        });

        first.absorb(second);
        assert_eq!(first.len(), 2);
        assert!(matches!(
            first.findings()[1],
            Finding::SectionTrialMismatch { .. }
        ));
    }

    #[test]
    fn finding_serializes_with_kind_tag() {
        let finding = Finding::DeclaredTrialMismatch {
            declared: 9,
            expected: 10,
        };
        let json = serde_json::to_value(&finding).expect("serializes");
        assert_eq!(json["kind"], "declared_trial_mismatch");
        assert_eq!(json["declared"], 9);
    }
}
