//! Stability over a whole sequence of snapshots.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{snapshot::Snapshot, stats::percentage};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SequenceAggregate {
    /// Destinations present in every snapshot, sorted.
    pub universal: Vec<String>,
    /// Universal destinations whose AS path never changes between consecutive
    /// snapshots, sorted.
    pub totally_stable: Vec<String>,
    /// `universal` relative to the first snapshot's route count.
    pub perc_universal: f64,
    /// `totally_stable` relative to the first snapshot's route count.
    pub perc_totally_stable: f64,
}

/// Intersection of the destination sets of all snapshots. A single snapshot
/// yields its own destination set; an empty slice yields an empty set.
pub fn universal_destinations(snapshots: &[Snapshot]) -> BTreeSet<&str> {
    let (first, rest) = match snapshots.split_first() {
        Some(split) => split,
        None => return BTreeSet::new(),
    };

    first
        .destinations()
        .filter(|destination| rest.iter().all(|snap| snap.contains(destination)))
        .collect()
}

/// Whether `destination` has the same AS path in every consecutive pair.
/// Stops at the first mismatch.
fn never_changes(destination: &str, snapshots: &[Snapshot]) -> bool {
    snapshots
        .windows(2)
        .all(|pair| pair[0].get(destination) == pair[1].get(destination))
}

pub fn aggregate(snapshots: &[Snapshot]) -> SequenceAggregate {
    let universal = universal_destinations(snapshots);

    let totally_stable = universal
        .iter()
        .filter(|destination| never_changes(destination, snapshots))
        .map(|destination| destination.to_string())
        .collect::<Vec<_>>();

    let base = snapshots.first().map(Snapshot::len).unwrap_or(0);

    SequenceAggregate {
        perc_universal: percentage(universal.len(), base),
        perc_totally_stable: percentage(totally_stable.len(), base),
        universal: universal.into_iter().map(String::from).collect(),
        totally_stable,
    }
}
