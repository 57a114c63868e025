//! Busy intervals and the half-open overlap predicate.
//!
//! All interval comparisons in this crate use half-open semantics: `[a, b)`
//! and `[c, d)` overlap iff `a < d && c < b`. Adjacent intervals, where one
//! ends exactly when another starts, do NOT overlap.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An occupied period for a resource, already committed to storage.
///
/// Immutable snapshot passed into the engine; the engine does not own or
/// mutate it. An interval with `end <= start` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Widen the interval by `buffer` on both sides.
    ///
    /// The availability engine applies this per busy interval before overlap
    /// testing, so back-to-back bookings keep a transition gap.
    pub fn expand(&self, buffer: Duration) -> Self {
        Self {
            start: self.start - buffer,
            end: self.end + buffer,
        }
    }

    /// Half-open overlap test against another interval.
    pub fn overlaps(&self, other: &BusyInterval) -> bool {
        ranges_overlap(self.start, self.end, other.start, other.end)
    }
}

/// Two half-open intervals `[a_start, a_end)` and `[b_start, b_end)` overlap
/// iff `a_start < b_end && b_start < a_end`.
///
/// Touching endpoints (`a_end == b_start`) are not an overlap.
pub fn ranges_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}
