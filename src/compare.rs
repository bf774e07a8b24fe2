//! Route fate between two temporally adjacent snapshots.
//!
//! Every destination of the earlier snapshot is exactly one of stable, changed
//! or disappeared; every destination of the later snapshot absent from the
//! earlier one is new. All percentages use the earlier snapshot's route count
//! as base, except that the base for new routes can be switched to the later
//! snapshot with [`NewRouteBase::Later`].

use serde::{Deserialize, Serialize};

use crate::{
    config::NewRouteBase,
    snapshot::Snapshot,
    stats::{mean_len, percentage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteFate {
    /// Present in both with an identical AS path.
    Stable,
    /// Present in both with a different AS path.
    Changed,
    /// Present only in the earlier snapshot.
    Disappeared,
    /// Present only in the later snapshot.
    New,
}

/// Fate of `destination` going from `before` to `after`, `None` when it is in
/// neither.
pub fn fate_of(destination: &str, before: &Snapshot, after: &Snapshot) -> Option<RouteFate> {
    match (before.get(destination), after.get(destination)) {
        (Some(a), Some(b)) if a == b => Some(RouteFate::Stable),
        (Some(_), Some(_)) => Some(RouteFate::Changed),
        (Some(_), None) => Some(RouteFate::Disappeared),
        (None, Some(_)) => Some(RouteFate::New),
        (None, None) => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FateCounts {
    pub stable: usize,
    pub changed: usize,
    pub disappeared: usize,
    pub new: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FatePercentages {
    pub stable: f64,
    pub changed: f64,
    pub disappeared: f64,
    pub new: f64,
}

/// Mean AS path length per fate, 0.0 for an empty category.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathLengthAverages {
    pub stable: f64,
    /// Changed routes, measured in the earlier snapshot.
    pub changed_before: f64,
    /// Changed routes, measured in the later snapshot.
    pub changed_after: f64,
    pub disappeared: f64,
    pub new: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseComparison {
    pub from: String,
    pub to: String,
    pub total_before: usize,
    pub total_after: usize,
    pub counts: FateCounts,
    pub percentages: FatePercentages,
    pub avg_path_length: PathLengthAverages,
    pub new_route_base: NewRouteBase,
}

pub fn compare(
    before: &Snapshot,
    after: &Snapshot,
    new_route_base: NewRouteBase,
) -> PairwiseComparison {
    let mut counts = FateCounts::default();

    let mut stable_len = Vec::new();
    let mut changed_before_len = Vec::new();
    let mut changed_after_len = Vec::new();
    let mut disappeared_len = Vec::new();
    let mut new_len = Vec::new();

    for (destination, path) in before.iter() {
        match after.get(destination) {
            None => {
                counts.disappeared += 1;
                disappeared_len.push(path.len());
            }
            Some(later) if later == path => {
                counts.stable += 1;
                stable_len.push(path.len());
            }
            Some(later) => {
                counts.changed += 1;
                changed_before_len.push(path.len());
                changed_after_len.push(later.len());
            }
        }
    }

    for (destination, path) in after.iter() {
        if !before.contains(destination) {
            counts.new += 1;
            new_len.push(path.len());
        }
    }

    let base = before.len();
    let new_base = match new_route_base {
        NewRouteBase::Earlier => base,
        NewRouteBase::Later => after.len(),
    };

    PairwiseComparison {
        from: before.source_id().to_string(),
        to: after.source_id().to_string(),
        total_before: before.len(),
        total_after: after.len(),
        counts,
        percentages: FatePercentages {
            stable: percentage(counts.stable, base),
            changed: percentage(counts.changed, base),
            disappeared: percentage(counts.disappeared, base),
            new: percentage(counts.new, new_base),
        },
        avg_path_length: PathLengthAverages {
            stable: mean_len(stable_len),
            changed_before: mean_len(changed_before_len),
            changed_after: mean_len(changed_after_len),
            disappeared: mean_len(disappeared_len),
            new: mean_len(new_len),
        },
        new_route_base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(id: &str, routes: Vec<(&str, Vec<u32>)>) -> Snapshot {
        Snapshot::from_routes(id, routes)
    }

    #[test]
    fn test_identical_route_is_stable() {
        let a = snap("a", vec![("10.0.0.0/8", vec![1, 2, 3])]);
        let b = snap("b", vec![("10.0.0.0/8", vec![1, 2, 3])]);

        let cmp = compare(&a, &b, NewRouteBase::Earlier);

        assert_eq!(
            cmp.counts,
            FateCounts {
                stable: 1,
                changed: 0,
                disappeared: 0,
                new: 0
            }
        );
        assert_eq!(cmp.percentages.stable, 100.0);
        assert_eq!(cmp.avg_path_length.stable, 3.0);
        assert_eq!(cmp.from, "a");
        assert_eq!(cmp.to, "b");
    }

    #[test]
    fn test_changed_path() {
        let a = snap("a", vec![("p", vec![1, 2])]);
        let b = snap("b", vec![("p", vec![1, 3])]);

        let cmp = compare(&a, &b, NewRouteBase::Earlier);

        assert_eq!(cmp.counts.changed, 1);
        assert_eq!(cmp.avg_path_length.changed_before, 2.0);
        assert_eq!(cmp.avg_path_length.changed_after, 2.0);
        assert_eq!(cmp.percentages.changed, 100.0);
    }

    #[test]
    fn test_prepending_change_is_a_change() {
        let a = snap("a", vec![("p", vec![1, 2])]);
        let b = snap("b", vec![("p", vec![1, 1, 2])]);

        let cmp = compare(&a, &b, NewRouteBase::Earlier);

        assert_eq!(cmp.counts.changed, 1);
        assert_eq!(cmp.avg_path_length.changed_before, 2.0);
        assert_eq!(cmp.avg_path_length.changed_after, 3.0);
    }

    #[test]
    fn test_disappeared() {
        let a = snap("a", vec![("p", vec![1])]);
        let b = snap("b", vec![]);

        let cmp = compare(&a, &b, NewRouteBase::Earlier);

        assert_eq!(cmp.counts.disappeared, 1);
        assert_eq!(cmp.percentages.disappeared, 100.0);
        assert_eq!(cmp.avg_path_length.disappeared, 1.0);
    }

    #[test]
    fn test_new_from_empty_snapshot() {
        let a = snap("a", vec![]);
        let b = snap("b", vec![("q", vec![5])]);

        let cmp = compare(&a, &b, NewRouteBase::Earlier);

        assert_eq!(cmp.counts.new, 1);
        assert_eq!(cmp.avg_path_length.new, 1.0);
        assert_eq!(cmp.percentages, FatePercentages::default());
    }

    #[test]
    fn test_new_route_base() {
        let a = snap("a", vec![("p", vec![1])]);
        let b = snap(
            "b",
            vec![("p", vec![1]), ("q", vec![2]), ("r", vec![3]), ("s", vec![4])],
        );

        assert_eq!(compare(&a, &b, NewRouteBase::Earlier).percentages.new, 300.0);
        assert_eq!(compare(&a, &b, NewRouteBase::Later).percentages.new, 75.0);
    }

    #[test]
    fn test_mixed() {
        let a = snap(
            "a",
            vec![
                ("s", vec![1, 2]),
                ("c", vec![1, 2, 3]),
                ("d", vec![4, 5, 6, 7]),
                ("s2", vec![9]),
            ],
        );
        let b = snap(
            "b",
            vec![
                ("s", vec![1, 2]),
                ("c", vec![1, 3]),
                ("n", vec![8, 8, 8, 8, 8]),
                ("s2", vec![9]),
            ],
        );

        let cmp = compare(&a, &b, NewRouteBase::Earlier);

        assert_eq!(
            cmp.counts,
            FateCounts {
                stable: 2,
                changed: 1,
                disappeared: 1,
                new: 1
            }
        );
        assert_eq!(cmp.percentages.stable, 50.0);
        assert_eq!(cmp.percentages.changed, 25.0);
        assert_eq!(cmp.percentages.disappeared, 25.0);
        assert_eq!(cmp.percentages.new, 25.0);
        assert_eq!(cmp.avg_path_length.stable, 1.5);
        assert_eq!(cmp.avg_path_length.changed_before, 3.0);
        assert_eq!(cmp.avg_path_length.changed_after, 2.0);
        assert_eq!(cmp.avg_path_length.disappeared, 4.0);
        assert_eq!(cmp.avg_path_length.new, 5.0);
        assert_eq!((cmp.total_before, cmp.total_after), (4, 4));
    }

    #[test]
    fn test_fate_of() {
        let a = snap("a", vec![("s", vec![1]), ("c", vec![1]), ("d", vec![1])]);
        let b = snap("b", vec![("s", vec![1]), ("c", vec![2]), ("n", vec![1])]);

        assert_eq!(fate_of("s", &a, &b), Some(RouteFate::Stable));
        assert_eq!(fate_of("c", &a, &b), Some(RouteFate::Changed));
        assert_eq!(fate_of("d", &a, &b), Some(RouteFate::Disappeared));
        assert_eq!(fate_of("n", &a, &b), Some(RouteFate::New));
        assert_eq!(fate_of("x", &a, &b), None);
    }

    #[test]
    fn test_both_empty() {
        let cmp = compare(&Snapshot::new("a"), &Snapshot::new("b"), NewRouteBase::Later);

        assert_eq!(cmp.counts, FateCounts::default());
        assert_eq!(cmp.percentages, FatePercentages::default());
        assert_eq!(cmp.avg_path_length, PathLengthAverages::default());
    }
}
