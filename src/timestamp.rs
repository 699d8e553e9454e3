/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! Engine-assigned ordering (§9: "replace implicit wall-clock time ordering
//! with an engine-assigned monotonic timestamp taken inside the book
//! lock").
//!
//! A [`Timestamp`] carries a `sequence` that is the *sole* priority key —
//! two orders or trades compare only on `sequence`, never on `wall_clock` —
//! plus a wall-clock instant for the ISO-8601 rendering external views need
//! (§6).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Timestamp {
    sequence: u64,
    wall_clock: DateTime<Utc>,
}

impl Timestamp {
    #[must_use]
    pub fn new(sequence: u64, wall_clock: DateTime<Utc>) -> Self {
        Self { sequence, wall_clock }
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    #[must_use]
    pub fn wall_clock(&self) -> DateTime<Utc> {
        self.wall_clock
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sequence.cmp(&other.sequence)
    }
}

/// Hands out strictly increasing sequence numbers for one contract's book.
/// Lives inside the per-contract lock, so a single counter per kind
/// (orders, trades) is enough to give total ordering without atomics.
#[derive(Debug, Default)]
pub(crate) struct SequenceCounter(u64);

impl SequenceCounter {
    pub(crate) fn next(&mut self, wall_clock: DateTime<Utc>) -> Timestamp {
        let sequence = self.0;
        self.0 += 1;
        Timestamp::new(sequence, wall_clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_counter_strictly_increases() {
        let mut counter = SequenceCounter::default();
        let now = Utc::now();
        let first = counter.next(now);
        let second = counter.next(now);
        assert!(second > first);
    }

    #[test]
    fn ordering_ignores_wall_clock() {
        let earlier = Utc::now();
        let later = earlier + chrono::Duration::seconds(60);
        let a = Timestamp::new(5, later);
        let b = Timestamp::new(6, earlier);
        assert!(a < b, "sequence must win even if wall clocks disagree");
    }
}
