//! End-to-end stability analysis over an ordered list of snapshot sources.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::{
    aggregate::{aggregate, SequenceAggregate},
    compare::{compare, PairwiseComparison},
    config::{AnalysisConfig, RecordPolicy},
    error::{Error, Result},
    loader::SnapshotSource,
    snapshot::Snapshot,
    summary::{summarize, SnapshotSummary},
};

/// Everything computed for one sequence of snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    /// One summary per snapshot, in sequence order.
    pub snapshots: Vec<SnapshotSummary>,
    /// One comparison per consecutive pair, in sequence order.
    pub comparisons: Vec<PairwiseComparison>,
    pub aggregate: SequenceAggregate,
}

/// Loads every source in order, stopping at the first one that fails.
pub fn load_all<S: AsRef<str>>(
    source: &impl SnapshotSource,
    source_ids: &[S],
    policy: RecordPolicy,
) -> Result<Vec<Snapshot>> {
    source_ids
        .iter()
        .map(|id| -> Result<Snapshot> {
            let snapshot = source.load(id.as_ref(), policy)?;
            tracing::debug!(source = id.as_ref(), routes = snapshot.len(), "loaded snapshot");
            Ok(snapshot)
        })
        .collect()
}

/// Loads `source_ids` in the given order and analyses them.
///
/// The order defines "earlier" and "later" for every comparison. Fails with
/// [`Error::EmptySequence`] when no source is given and with the loader's
/// error (typically [`Error::SourceNotFound`]) as soon as one source cannot be
/// loaded; no partial report is produced.
pub fn analyze<S: AsRef<str>>(
    source: &impl SnapshotSource,
    source_ids: &[S],
    config: &AnalysisConfig,
) -> Result<StabilityReport> {
    config.validate()?;
    if source_ids.is_empty() {
        return Err(Error::EmptySequence);
    }

    log_op_start!("load", sources = source_ids.len());
    let started = Instant::now();
    let snapshots = load_all(source, source_ids, config.malformed_records)?;
    log_op_end!("load", duration_ms = started.elapsed().as_millis() as u64);

    analyze_snapshots(&snapshots, config)
}

/// Analyses snapshots the caller already holds, in slice order.
pub fn analyze_snapshots(
    snapshots: &[Snapshot],
    config: &AnalysisConfig,
) -> Result<StabilityReport> {
    config.validate()?;
    if snapshots.is_empty() {
        return Err(Error::EmptySequence);
    }

    log_op_start!("analyze", snapshots = snapshots.len());
    let started = Instant::now();

    let summaries = snapshots
        .iter()
        .map(|snap| summarize(snap, config.top_k))
        .collect::<Vec<_>>();

    let comparisons = snapshots
        .windows(2)
        .map(|pair| compare(&pair[0], &pair[1], config.new_route_base))
        .collect::<Vec<_>>();

    let aggregate = aggregate(snapshots);

    log_op_end!(
        "analyze",
        duration_ms = started.elapsed().as_millis() as u64,
        universal = aggregate.universal.len(),
        totally_stable = aggregate.totally_stable.len()
    );

    Ok(StabilityReport {
        snapshots: summaries,
        comparisons,
        aggregate,
    })
}
