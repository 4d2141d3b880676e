//! Density tables as they appear in the log, prior to reconciliation.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CategoryKey
// ---------------------------------------------------------------------------

/// A category key ("set size") distinguishing rows within a density table.
///
/// Keys are carried as text: most are small integers, but the Bloom-filter
/// estimate tables produce fractional values like `12.5`. Ordering is numeric
/// when both sides parse as unsigned integers (so `10` sorts after `2`) and
/// lexicographic otherwise, with integer keys sorting before everything else.
/// Equality stays purely textual, which keeps the order total: numerically
/// equal spellings such as `007` and `7` fall back to the lexicographic
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Ord for CategoryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for CategoryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

// ---------------------------------------------------------------------------
// DensityTable
// ---------------------------------------------------------------------------

/// One named attribute's parallel value/count rows, zipped positionally.
///
/// Counts are normalized to integers at ingestion; keys stay text. Row order
/// is the order of the source tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityTable {
    /// Attribute name from the line preceding the table, trailing colon
    /// stripped (e.g. `bf_bits_set`, `total guess set`).
    pub name: String,
    /// `(category key, occurrence count)` pairs.
    pub rows: Vec<(CategoryKey, u64)>,
}

impl DensityTable {
    #[must_use]
    pub fn new(name: impl Into<String>, rows: Vec<(CategoryKey, u64)>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
