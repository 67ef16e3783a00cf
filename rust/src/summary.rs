//! Placement statistics recomputed from finished groups.
//!
//! The allocator does not record which rank each person received; this
//! module derives it by comparing a member's rankings with the group's
//! category.

use pyo3::prelude::*;

use crate::models::{Group, Person};

/// Position of `group`'s category in `person`'s rankings.
pub fn preference_rank(person: &Person, group: &Group) -> Option<usize> {
    person
        .rankings
        .iter()
        .position(|key| *key == group.category_key)
}

/// How well an allocation honored stated preferences.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementSummary {
    #[pyo3(get)]
    pub total_people: usize,
    #[pyo3(get)]
    pub group_count: usize,
    /// rank_counts[r] = people placed in their rank-r category
    #[pyo3(get)]
    pub rank_counts: Vec<usize>,
    /// People placed in a category they did not rank
    #[pyo3(get)]
    pub unmatched: usize,
    #[pyo3(get)]
    pub min_group_size: usize,
    #[pyo3(get)]
    pub max_group_size: usize,
}

#[pymethods]
impl PlacementSummary {
    /// People placed in any ranked category.
    pub fn matched(&self) -> usize {
        self.rank_counts.iter().sum()
    }

    /// Share of people placed in their first choice (0.0 for an empty roster).
    pub fn top_choice_rate(&self) -> f64 {
        if self.total_people == 0 {
            return 0.0;
        }
        self.rank_counts.first().copied().unwrap_or(0) as f64 / self.total_people as f64
    }

    fn __repr__(&self) -> String {
        format!(
            "PlacementSummary(total={}, rank_counts={:?}, unmatched={}, sizes={}..={})",
            self.total_people,
            self.rank_counts,
            self.unmatched,
            self.min_group_size,
            self.max_group_size
        )
    }
}

/// Summarize groups returned by `allocate`.
pub fn summarize(groups: &[Group]) -> PlacementSummary {
    let mut summary = PlacementSummary {
        group_count: groups.len(),
        min_group_size: groups.iter().map(Group::size).min().unwrap_or(0),
        max_group_size: groups.iter().map(Group::size).max().unwrap_or(0),
        ..PlacementSummary::default()
    };

    for group in groups {
        for member in &group.members {
            summary.total_people += 1;
            match preference_rank(member, group) {
                Some(rank) => {
                    if summary.rank_counts.len() <= rank {
                        summary.rank_counts.resize(rank + 1, 0);
                    }
                    summary.rank_counts[rank] += 1;
                }
                None => summary.unmatched += 1,
            }
        }
    }

    summary
}
