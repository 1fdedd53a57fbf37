//! Rank-change classification between two snapshots of the same timeframe.
//!
//! [`compare`] is pure: it takes the current records and, when one exists,
//! the previous snapshot's records, and returns a [`Comparison`] holding
//! every current record with its [`RankChange`], the new entries, the
//! dropped records and the fastest risers.
//!
//! Duplicate names are handled best-effort rather than rejected here
//! (rejection happens in [`crate::Snapshot::validate`] at the store and
//! fetch boundaries): the first, best-ranked previous record for a name is
//! the one matched against.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::RepoRecord;

/// Maximum number of entries in [`Comparison::rising`].
pub const RISING_LIMIT: usize = 5;

/// How a record's rank moved relative to the previous snapshot.
///
/// `Risen` and `Fallen` always carry a magnitude greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankChange {
    /// Not present in the previous snapshot (or there was no previous snapshot).
    New,
    Unchanged,
    /// Moved this many places toward rank 1.
    Risen(u32),
    /// Moved this many places away from rank 1.
    Fallen(u32),
}

impl RankChange {
    /// Classifies a move from `previous` rank to `current` rank.
    #[must_use]
    pub fn from_ranks(previous: u32, current: u32) -> Self {
        match previous.cmp(&current) {
            Ordering::Greater => RankChange::Risen(previous - current),
            Ordering::Less => RankChange::Fallen(current - previous),
            Ordering::Equal => RankChange::Unchanged,
        }
    }

    /// Number of places gained, if the record rose.
    #[must_use]
    pub fn rise(self) -> Option<u32> {
        match self {
            RankChange::Risen(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_new(self) -> bool {
        self == RankChange::New
    }
}

/// A current-snapshot record together with its rank change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRepo {
    pub record: RepoRecord,
    pub change: RankChange,
}

/// Output of [`compare`] for one (current, previous) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Every current record, in current rank order.
    pub classified: Vec<ClassifiedRepo>,
    /// Records labelled [`RankChange::New`], in current rank order.
    pub new_entries: Vec<ClassifiedRepo>,
    /// Previous records whose name no longer appears, in previous rank order.
    pub dropped: Vec<RepoRecord>,
    /// Up to [`RISING_LIMIT`] risers, largest gain first, ties by current rank.
    pub rising: Vec<ClassifiedRepo>,
}

impl Comparison {
    /// Mutable access to the records that carry report text: the classified
    /// rows and the dropped records. Call [`Comparison::refresh_derived`]
    /// after editing so `new_entries` and `rising` pick up the changes.
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut RepoRecord> {
        self.classified
            .iter_mut()
            .map(|c| &mut c.record)
            .chain(self.dropped.iter_mut())
    }

    /// Rebuilds `new_entries` and `rising` from `classified`.
    pub fn refresh_derived(&mut self) {
        self.new_entries = new_entries_of(&self.classified);
        self.rising = rising_of(&self.classified);
    }
}

/// Classifies every record of `current` against `previous`.
///
/// When `previous` is `None` every record is [`RankChange::New`] and both
/// `dropped` and `rising` are empty.
#[must_use]
pub fn compare(current: &[RepoRecord], previous: Option<&[RepoRecord]>) -> Comparison {
    let previous = previous.unwrap_or_default();

    let mut by_name: HashMap<&str, &RepoRecord> = HashMap::with_capacity(previous.len());
    for record in previous {
        by_name.entry(record.name.as_str()).or_insert(record);
    }

    let classified: Vec<ClassifiedRepo> = current
        .iter()
        .map(|record| {
            let change = by_name
                .get(record.name.as_str())
                .map_or(RankChange::New, |prev| {
                    RankChange::from_ranks(prev.rank, record.rank)
                });
            ClassifiedRepo {
                record: record.clone(),
                change,
            }
        })
        .collect();

    let current_names: HashSet<&str> = current.iter().map(|r| r.name.as_str()).collect();
    let dropped = previous
        .iter()
        .filter(|r| !current_names.contains(r.name.as_str()))
        .cloned()
        .collect();

    let new_entries = new_entries_of(&classified);
    let rising = rising_of(&classified);

    Comparison {
        classified,
        new_entries,
        dropped,
        rising,
    }
}

fn new_entries_of(classified: &[ClassifiedRepo]) -> Vec<ClassifiedRepo> {
    classified
        .iter()
        .filter(|c| c.change.is_new())
        .cloned()
        .collect()
}

/// Largest gain first; equal gains keep the better (lower) current rank first.
fn rising_of(classified: &[ClassifiedRepo]) -> Vec<ClassifiedRepo> {
    let mut rising: Vec<ClassifiedRepo> = classified
        .iter()
        .filter(|c| c.change.rise().is_some())
        .cloned()
        .collect();
    rising.sort_by(|a, b| {
        b.change
            .rise()
            .cmp(&a.change.rise())
            .then_with(|| a.record.rank.cmp(&b.record.rank))
    });
    rising.truncate(RISING_LIMIT);
    rising
}

#[cfg(test)]
#[path = "diff_test.rs"]
mod tests;
