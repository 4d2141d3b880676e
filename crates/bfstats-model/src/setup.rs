//! The filter configuration read from a run's log header.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bloom-filter configuration of one benchmark run.
///
/// Two setups compare equal iff every field is textually identical; runs may
/// only be merged when their setups match. The `hash_policy`,
/// `insertion_policy`, and `filters` fields carry their header lines verbatim
/// (without the line terminator) so that equality covers details the numeric
/// fields do not, such as the full hash list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSetup {
    /// Bit-array size, from `Size (m) = N`.
    pub m: u64,
    /// Hash-function count, from the `k = N` fragment of the hash line.
    pub k: u32,
    /// The hash-setup line.
    pub hash_policy: String,
    /// The insertion-policy line.
    pub insertion_policy: String,
    /// Captured from `Using alphabet: ...`.
    pub alphabet: String,
    /// The filters line.
    pub filters: String,
}

impl fmt::Display for FilterSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m={} k={} alphabet={:?}",
            self.m, self.k, self.alphabet
        )
    }
}
