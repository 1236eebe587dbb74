//! Aggregate study counts.

use serde::{Deserialize, Serialize};

/// Per-learner summary of the catalogue.
///
/// `new` is not stored: it is whatever the catalogue holds beyond the
/// learner's recorded outcomes.
///
/// # Examples
/// ```
/// use backend::domain::StudyStats;
///
/// let stats = StudyStats { total: 10, known: 3, unknown: 2 };
/// assert_eq!(stats.new_count(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudyStats {
    /// Catalogue cardinality.
    pub total: u64,
    /// Records marked Known.
    pub known: u64,
    /// Records marked Unknown.
    pub unknown: u64,
}

impl StudyStats {
    /// Items never seen by the learner.
    pub fn new_count(&self) -> u64 {
        self.total
            .saturating_sub(self.known)
            .saturating_sub(self.unknown)
    }
}
