//! Human-readable rendering of a [`StabilityReport`].

use std::fmt;

use crate::{
    analysis::StabilityReport,
    compare::PairwiseComparison,
    config::NewRouteBase,
    summary::SnapshotSummary,
};

/// Plain-text view of a report, all figures with two decimals.
pub struct TextReport<'a>(pub &'a StabilityReport);

pub fn render_text(report: &StabilityReport) -> String {
    TextReport(report).to_string()
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "=== BGP STABILITY ANALYSIS ACROSS SNAPSHOTS ===")?;
        writeln!(f)?;

        for (i, summary) in report.snapshots.iter().enumerate() {
            write_summary(f, i + 1, summary)?;
        }

        writeln!(f, "=== Consecutive snapshot comparisons ===")?;
        writeln!(f)?;
        for comparison in &report.comparisons {
            write_comparison(f, comparison)?;
        }

        let agg = &report.aggregate;
        writeln!(f, "=== Global metrics ===")?;
        writeln!(f, "Prefixes present in ALL snapshots: {}", agg.universal.len())?;
        writeln!(
            f,
            "Share of first-snapshot prefixes present in all: {:.2}%",
            agg.perc_universal
        )?;
        writeln!(
            f,
            "Totally stable prefixes (AS_PATH unchanged across all snapshots): {}",
            agg.totally_stable.len()
        )?;
        writeln!(f, "Totally stable share: {:.2}%", agg.perc_totally_stable)
    }
}

fn write_summary(
    f: &mut fmt::Formatter<'_>,
    position: usize,
    summary: &SnapshotSummary,
) -> fmt::Result {
    writeln!(f, "Snapshot {}: {}", position, summary.source)?;
    writeln!(f, "  Routes: {}", summary.route_count)?;
    if summary.skipped_records > 0 {
        writeln!(f, "  Skipped malformed records: {}", summary.skipped_records)?;
    }
    writeln!(f, "  Mean AS_PATH length: {:.2}", summary.avg_path_length)?;
    writeln!(
        f,
        "  Distinct ASes: {} | AS links: {}",
        summary.distinct_ases, summary.as_links
    )?;
    writeln!(
        f,
        "  Top {} most frequent ASes (AS, count):",
        summary.top_ases.len()
    )?;
    for freq in &summary.top_ases {
        writeln!(f, "    {}: {}", freq.asn, freq.count)?;
    }
    writeln!(f)
}

fn write_comparison(f: &mut fmt::Formatter<'_>, cmp: &PairwiseComparison) -> fmt::Result {
    let pct = &cmp.percentages;
    let avg = &cmp.avg_path_length;
    let new_base = match cmp.new_route_base {
        NewRouteBase::Earlier => "",
        NewRouteBase::Later => " of final",
    };

    writeln!(f, "Comparison: {} -> {}", cmp.from, cmp.to)?;
    writeln!(
        f,
        "  Routes in initial snapshot: {} | Routes in final snapshot: {}",
        cmp.total_before, cmp.total_after
    )?;
    writeln!(f, "  Stable: {} ({:.2}%)", cmp.counts.stable, pct.stable)?;
    writeln!(f, "  AS_PATH changed: {} ({:.2}%)", cmp.counts.changed, pct.changed)?;
    writeln!(
        f,
        "  Disappeared: {} ({:.2}%)",
        cmp.counts.disappeared, pct.disappeared
    )?;
    writeln!(
        f,
        "  New in final snapshot: {} ({:.2}%{})",
        cmp.counts.new, pct.new, new_base
    )?;
    writeln!(f, "  Mean AS_PATH length (stable): {:.2}", avg.stable)?;
    writeln!(f, "  Mean AS_PATH length (before change): {:.2}", avg.changed_before)?;
    writeln!(f, "  Mean AS_PATH length (after change): {:.2}", avg.changed_after)?;
    writeln!(f, "  Mean AS_PATH length (disappeared): {:.2}", avg.disappeared)?;
    writeln!(f, "  Mean AS_PATH length (new): {:.2}", avg.new)?;
    writeln!(f)
}
