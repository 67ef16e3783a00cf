//! Placement rule for people still unassigned after backfill.

use crate::category_index::CategoryId;
use crate::validation::ValidationError;

/// How an overflow person picks a group.
///
/// Ties always go to the earliest group in initialization order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Least-full group among the person's ranked categories, falling back to
    /// the globally least-full group when none of them has a group.
    #[default]
    PreferenceThenLeastFull,
    /// Globally least-full group, ignoring rankings.
    LeastFull,
}

impl OverflowPolicy {
    pub const PREFERENCE_THEN_LEAST_FULL: &'static str = "preference_then_least_full";
    pub const LEAST_FULL: &'static str = "least_full";

    /// Parse a configuration name.
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        match name {
            Self::PREFERENCE_THEN_LEAST_FULL => Ok(Self::PreferenceThenLeastFull),
            Self::LEAST_FULL => Ok(Self::LeastFull),
            other => Err(ValidationError::UnknownOverflowPolicy(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreferenceThenLeastFull => Self::PREFERENCE_THEN_LEAST_FULL,
            Self::LeastFull => Self::LEAST_FULL,
        }
    }

    /// Choose a group for one overflow person.
    ///
    /// `sizes` and `group_categories` are parallel, in group order. Returns
    /// None only when there are no groups at all.
    pub fn select_group(
        &self,
        sizes: &[usize],
        group_categories: &[CategoryId],
        rankings: &[CategoryId],
    ) -> Option<usize> {
        if *self == Self::PreferenceThenLeastFull {
            let preferred = least_full(
                sizes
                    .iter()
                    .zip(group_categories)
                    .enumerate()
                    .filter(|(_, (_, category))| rankings.contains(*category))
                    .map(|(group, (&size, _))| (group, size)),
            );
            if preferred.is_some() {
                return preferred;
            }
        }
        least_full(sizes.iter().copied().enumerate())
    }
}

/// First group with the minimum size.
fn least_full(groups: impl Iterator<Item = (usize, usize)>) -> Option<usize> {
    // min_by_key keeps the first of equal minima
    groups.min_by_key(|&(_, size)| size).map(|(group, _)| group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(
            OverflowPolicy::parse("preference_then_least_full"),
            Ok(OverflowPolicy::PreferenceThenLeastFull)
        );
        assert_eq!(
            OverflowPolicy::parse("least_full"),
            Ok(OverflowPolicy::LeastFull)
        );
        assert_eq!(
            OverflowPolicy::parse("LEAST_FULL"),
            Err(ValidationError::UnknownOverflowPolicy("LEAST_FULL".to_string()))
        );
        assert_eq!(OverflowPolicy::default().as_str(), "preference_then_least_full");
    }

    #[test]
    fn test_preference_picks_least_full_ranked_group() {
        // groups: cat0 room1, cat0 room2, cat1 room1, cat1 room2
        let categories = [0, 0, 1, 1];
        let sizes = [5, 4, 4, 3];
        let group = OverflowPolicy::PreferenceThenLeastFull.select_group(&sizes, &categories, &[0]);
        assert_eq!(group, Some(1));
    }

    #[test]
    fn test_preference_tie_goes_to_first_group() {
        let categories = [0, 1, 2];
        let sizes = [4, 3, 3];
        let group =
            OverflowPolicy::PreferenceThenLeastFull.select_group(&sizes, &categories, &[2, 1]);
        assert_eq!(group, Some(1));
    }

    #[test]
    fn test_preference_ignores_smaller_unranked_group() {
        let categories = [0, 1, 2];
        let sizes = [4, 4, 1];
        let group =
            OverflowPolicy::PreferenceThenLeastFull.select_group(&sizes, &categories, &[0, 1]);
        assert_eq!(group, Some(0));
    }

    #[test]
    fn test_preference_falls_back_to_global_least_full() {
        let categories = [0, 1, 2];
        let sizes = [4, 2, 2];
        let group =
            OverflowPolicy::PreferenceThenLeastFull.select_group(&sizes, &categories, &[7]);
        assert_eq!(group, Some(1));
    }

    #[test]
    fn test_least_full_ignores_rankings() {
        let categories = [0, 1, 2];
        let sizes = [4, 4, 1];
        let group = OverflowPolicy::LeastFull.select_group(&sizes, &categories, &[0, 1]);
        assert_eq!(group, Some(2));
    }

    #[test]
    fn test_no_groups() {
        assert_eq!(OverflowPolicy::LeastFull.select_group(&[], &[], &[0]), None);
    }
}
