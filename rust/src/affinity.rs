//! Pairwise shared-interest links between people.
//!
//! A link joins two people who rank at least one category in common; its
//! strength is how many categories they share. Drawing the links is left to
//! the caller.

use pyo3::prelude::*;
use rustc_hash::FxHashSet;

use crate::models::Person;

/// Undirected link between two people, `source` earlier in the roster.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterestLink {
    #[pyo3(get)]
    pub source: String,
    #[pyo3(get)]
    pub target: String,
    /// Number of categories both people ranked
    #[pyo3(get)]
    pub strength: usize,
}

#[pymethods]
impl InterestLink {
    fn __repr__(&self) -> String {
        format!(
            "InterestLink({:?} -- {:?}, strength={})",
            self.source, self.target, self.strength
        )
    }
}

/// Category a person is grouped under when only one is shown.
pub fn primary_category(person: &Person) -> Option<&str> {
    person.rankings.first().map(String::as_str)
}

/// Links for every pair sharing a ranked category, in roster pair order.
pub fn shared_interest_links(roster: &[Person]) -> Vec<InterestLink> {
    let ranked: Vec<FxHashSet<&str>> = roster
        .iter()
        .map(|p| p.rankings.iter().map(String::as_str).collect())
        .collect();

    let mut links = Vec::new();
    for (i, first) in roster.iter().enumerate() {
        for (j, second) in roster.iter().enumerate().skip(i + 1) {
            let strength = ranked[i].intersection(&ranked[j]).count();
            if strength > 0 {
                links.push(InterestLink {
                    source: first.id.clone(),
                    target: second.id.clone(),
                    strength,
                });
            }
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, rankings: &[&str]) -> Person {
        Person::new(
            id.to_string(),
            id.to_string(),
            rankings.iter().map(|r| r.to_string()).collect(),
        )
    }

    #[test]
    fn test_links_count_shared_categories() {
        let roster = vec![
            person("p1", &["a", "b", "c"]),
            person("p2", &["c", "b", "a"]),
            person("p3", &["d", "e", "a"]),
            person("p4", &["d", "e", "f"]),
        ];

        let links = shared_interest_links(&roster);
        let summary: Vec<(&str, &str, usize)> = links
            .iter()
            .map(|l| (l.source.as_str(), l.target.as_str(), l.strength))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("p1", "p2", 3),
                ("p1", "p3", 1),
                ("p2", "p3", 1),
                ("p3", "p4", 2),
            ]
        );
    }

    #[test]
    fn test_no_links_without_overlap() {
        let roster = vec![person("p1", &["a", "b"]), person("p2", &["c", "d"])];
        assert!(shared_interest_links(&roster).is_empty());
        assert!(shared_interest_links(&[]).is_empty());
    }

    #[test]
    fn test_primary_category() {
        assert_eq!(primary_category(&person("p1", &["c", "a"])), Some("c"));
        assert_eq!(primary_category(&person("p2", &[])), None);
    }
}
