//! rib-stability measures how BGP routes evolve across a sequence of RIB
//! snapshots: what each snapshot contains, which prefixes stay, change,
//! disappear or appear between consecutive snapshots, and which prefixes keep
//! the very same AS path over the whole sequence.
//!
//! ```
//! use rib_stability::{analyze, AnalysisConfig, MemorySource};
//!
//! let source = MemorySource::new()
//!     .with("t0", "=|10.0.0.0/8|3356 174|\n=|11.0.0.0/8|6939|\n")
//!     .with("t1", "=|10.0.0.0/8|3356 174|\n=|12.0.0.0/8|1299|\n");
//!
//! let report = analyze(&source, &["t0", "t1"], &AnalysisConfig::default()).unwrap();
//!
//! assert_eq!(report.comparisons[0].counts.stable, 1);
//! assert_eq!(report.comparisons[0].counts.disappeared, 1);
//! assert_eq!(report.aggregate.totally_stable, vec!["10.0.0.0/8"]);
//! ```

#[macro_use]
pub mod logging;

pub mod aggregate;
pub mod analysis;
pub mod compare;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod snapshot;
mod stats;
pub mod summary;
pub mod topology;

pub use aggregate::{aggregate, SequenceAggregate};
pub use analysis::{analyze, analyze_snapshots, StabilityReport};
pub use compare::{compare, fate_of, PairwiseComparison, RouteFate};
pub use config::{AnalysisConfig, ConfigOverrides, NewRouteBase, RecordPolicy};
pub use error::{ConfigError, Error, Result};
pub use loader::{FileSource, MemorySource, SnapshotSource};
pub use snapshot::{AsPath, Snapshot};
pub use summary::{summarize, SnapshotSummary};
pub use topology::Topology;
