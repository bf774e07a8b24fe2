//! Per-snapshot composition.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{snapshot::Snapshot, stats::mean_len, topology::Topology};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsFrequency {
    pub asn: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub source: String,
    pub route_count: usize,
    /// Mean AS path length, 0.0 for an empty snapshot.
    pub avg_path_length: f64,
    /// Most frequent AS identifiers, see [`as_frequencies`] for the ordering.
    pub top_ases: Vec<AsFrequency>,
    pub distinct_ases: usize,
    /// Distinct directed AS adjacencies seen in the paths.
    pub as_links: usize,
    pub skipped_records: usize,
}

/// Occurrence count of every AS identifier over all paths of the snapshot.
///
/// An identifier is counted once per occurrence, so prepending and presence
/// in many paths both add up. The result is ordered by descending count; ties
/// keep first-encounter order, walking destinations in snapshot order and each
/// path from left to right.
pub fn as_frequencies(snapshot: &Snapshot) -> Vec<AsFrequency> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for path in snapshot.paths() {
        for asn in path {
            match position.get(asn.as_str()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    position.insert(asn.as_str(), counts.len());
                    counts.push((asn.as_str(), 1));
                }
            }
        }
    }

    // stable sort: equal counts stay in first-encounter order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .map(|(asn, count)| AsFrequency {
            asn: asn.to_string(),
            count,
        })
        .collect()
}

pub fn summarize(snapshot: &Snapshot, top_k: usize) -> SnapshotSummary {
    let topo = Topology::from_snapshot(snapshot);

    let mut top_ases = as_frequencies(snapshot);
    top_ases.truncate(top_k);

    SnapshotSummary {
        source: snapshot.source_id().to_string(),
        route_count: snapshot.len(),
        avg_path_length: mean_len(snapshot.paths().map(Vec::len)),
        top_ases,
        distinct_ases: topo.asn_count(),
        as_links: topo.link_count(),
        skipped_records: snapshot.skipped_records(),
    }
}
