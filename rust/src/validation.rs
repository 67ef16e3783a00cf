//! Configuration and roster validation.
//!
//! Everything here runs before the first pass so the allocator never has to
//! drop or repair a record.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::allocator::OverflowPolicy;
use crate::category_index::{CategoryId, CategoryIndex};
use crate::config::AllocationConfig;
use crate::models::{Category, Person};

/// Fewest rankings a person may submit.
pub const MIN_RANKINGS: usize = 2;

/// Errors raised for malformed configuration or records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No categories configured")]
    NoCategories,
    #[error("Category at position {0} has an empty key")]
    EmptyCategoryKey(usize),
    #[error("Duplicate category key: {0}")]
    DuplicateCategory(String),
    #[error("rooms_per_category must be at least 1")]
    ZeroRooms,
    #[error("fixed_target must be at least 1")]
    ZeroTarget,
    #[error("Unknown overflow policy: {0}")]
    UnknownOverflowPolicy(String),
    #[error("Roster has {size} people, maximum is {max}")]
    RosterTooLarge { size: usize, max: usize },
    #[error("Person at position {0} has an empty id")]
    EmptyPersonId(usize),
    #[error("Person {0} has an empty name")]
    EmptyName(String),
    #[error("Duplicate person id: {0}")]
    DuplicatePerson(String),
    #[error("Person {person_id} has {count} rankings, at least {min} required")]
    TooFewRankings {
        person_id: String,
        count: usize,
        min: usize,
    },
    #[error("Person {person_id} ranks category {category} more than once")]
    DuplicateRanking { person_id: String, category: String },
    #[error("Person {person_id} ranks unknown category {category}")]
    UnknownCategory { person_id: String, category: String },
}

/// Check the category list: at least one, keys non-empty and unique.
pub fn validate_categories(categories: &[Category]) -> Result<(), ValidationError> {
    if categories.is_empty() {
        return Err(ValidationError::NoCategories);
    }
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for (position, category) in categories.iter().enumerate() {
        if category.key.trim().is_empty() {
            return Err(ValidationError::EmptyCategoryKey(position));
        }
        if !seen.insert(category.key.as_str()) {
            return Err(ValidationError::DuplicateCategory(category.key.clone()));
        }
    }
    Ok(())
}

/// Check room count, fixed target and overflow policy name.
pub fn validate_config(config: &AllocationConfig) -> Result<(), ValidationError> {
    if config.rooms_per_category == 0 {
        return Err(ValidationError::ZeroRooms);
    }
    if config.fixed_target == Some(0) {
        return Err(ValidationError::ZeroTarget);
    }
    OverflowPolicy::parse(&config.overflow_policy)?;
    Ok(())
}

/// Validate every person and resolve their rankings to category ids.
///
/// The returned vector is parallel to `roster`.
pub fn validate_roster(
    roster: &[Person],
    index: &CategoryIndex,
    config: &AllocationConfig,
) -> Result<Vec<Vec<CategoryId>>, ValidationError> {
    if let Some(max) = config.max_roster_size {
        if roster.len() > max {
            return Err(ValidationError::RosterTooLarge {
                size: roster.len(),
                max,
            });
        }
    }

    let mut seen_ids: FxHashSet<&str> = FxHashSet::default();
    let mut resolved = Vec::with_capacity(roster.len());

    for (position, person) in roster.iter().enumerate() {
        if person.id.is_empty() {
            return Err(ValidationError::EmptyPersonId(position));
        }
        if !seen_ids.insert(person.id.as_str()) {
            return Err(ValidationError::DuplicatePerson(person.id.clone()));
        }
        if person.name.trim().is_empty() {
            return Err(ValidationError::EmptyName(person.id.clone()));
        }
        resolved.push(resolve_rankings(person, index)?);
    }

    Ok(resolved)
}

fn resolve_rankings(
    person: &Person,
    index: &CategoryIndex,
) -> Result<Vec<CategoryId>, ValidationError> {
    if person.rankings.len() < MIN_RANKINGS {
        return Err(ValidationError::TooFewRankings {
            person_id: person.id.clone(),
            count: person.rankings.len(),
            min: MIN_RANKINGS,
        });
    }

    let mut ids: Vec<CategoryId> = Vec::with_capacity(person.rankings.len());
    for key in &person.rankings {
        let id = index
            .get(key)
            .ok_or_else(|| ValidationError::UnknownCategory {
                person_id: person.id.clone(),
                category: key.clone(),
            })?;
        if ids.contains(&id) {
            return Err(ValidationError::DuplicateRanking {
                person_id: person.id.clone(),
                category: key.clone(),
            });
        }
        ids.push(id);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        ["a", "b", "c"]
            .iter()
            .map(|k| Category::new(k.to_string(), k.to_uppercase()))
            .collect()
    }

    fn person(id: &str, rankings: &[&str]) -> Person {
        Person::new(
            id.to_string(),
            format!("Person {}", id),
            rankings.iter().map(|r| r.to_string()).collect(),
        )
    }

    #[test]
    fn test_valid_roster_resolves_ids() {
        let index = CategoryIndex::new(&categories());
        let roster = vec![person("p1", &["c", "a", "b"]), person("p2", &["b", "a"])];

        let resolved = validate_roster(&roster, &index, &AllocationConfig::default()).unwrap();
        assert_eq!(resolved, vec![vec![2, 0, 1], vec![1, 0]]);
    }

    #[test]
    fn test_empty_roster_is_valid() {
        let index = CategoryIndex::new(&categories());
        let resolved = validate_roster(&[], &index, &AllocationConfig::default()).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_too_few_rankings() {
        let index = CategoryIndex::new(&categories());
        let roster = vec![person("p1", &["a"])];

        let err = validate_roster(&roster, &index, &AllocationConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooFewRankings {
                person_id: "p1".to_string(),
                count: 1,
                min: MIN_RANKINGS,
            }
        );
    }

    #[test]
    fn test_unknown_category() {
        let index = CategoryIndex::new(&categories());
        let roster = vec![person("p1", &["a", "z"])];

        let err = validate_roster(&roster, &index, &AllocationConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownCategory {
                person_id: "p1".to_string(),
                category: "z".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_ranking() {
        let index = CategoryIndex::new(&categories());
        let roster = vec![person("p1", &["a", "b", "a"])];

        let err = validate_roster(&roster, &index, &AllocationConfig::default()).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateRanking { .. }));
    }

    #[test]
    fn test_duplicate_person() {
        let index = CategoryIndex::new(&categories());
        let roster = vec![person("p1", &["a", "b"]), person("p1", &["b", "c"])];

        let err = validate_roster(&roster, &index, &AllocationConfig::default()).unwrap_err();
        assert_eq!(err, ValidationError::DuplicatePerson("p1".to_string()));
    }

    #[test]
    fn test_blank_name_and_id() {
        let index = CategoryIndex::new(&categories());
        let mut blank_name = person("p1", &["a", "b"]);
        blank_name.name = "   ".to_string();
        let err = validate_roster(&[blank_name], &index, &AllocationConfig::default()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyName("p1".to_string()));

        let blank_id = person("", &["a", "b"]);
        let err = validate_roster(&[blank_id], &index, &AllocationConfig::default()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyPersonId(0));
    }

    #[test]
    fn test_roster_size_cap() {
        let index = CategoryIndex::new(&categories());
        let roster = vec![person("p1", &["a", "b"]), person("p2", &["a", "b"])];
        let config = AllocationConfig {
            max_roster_size: Some(1),
            ..AllocationConfig::default()
        };

        let err = validate_roster(&roster, &index, &config).unwrap_err();
        assert_eq!(err, ValidationError::RosterTooLarge { size: 2, max: 1 });
    }

    #[test]
    fn test_validate_categories() {
        assert_eq!(validate_categories(&[]), Err(ValidationError::NoCategories));

        let mut dup = categories();
        dup.push(Category::new("b".to_string(), "Again".to_string()));
        assert_eq!(
            validate_categories(&dup),
            Err(ValidationError::DuplicateCategory("b".to_string()))
        );

        let blank = vec![Category::new(" ".to_string(), "Blank".to_string())];
        assert_eq!(
            validate_categories(&blank),
            Err(ValidationError::EmptyCategoryKey(0))
        );

        assert!(validate_categories(&categories()).is_ok());
    }

    #[test]
    fn test_validate_config() {
        assert!(validate_config(&AllocationConfig::default()).is_ok());
        assert_eq!(
            validate_config(&AllocationConfig::with_rooms(0)),
            Err(ValidationError::ZeroRooms)
        );

        let zero_target = AllocationConfig {
            fixed_target: Some(0),
            ..AllocationConfig::default()
        };
        assert_eq!(validate_config(&zero_target), Err(ValidationError::ZeroTarget));

        let bad_policy = AllocationConfig {
            overflow_policy: "random".to_string(),
            ..AllocationConfig::default()
        };
        assert_eq!(
            validate_config(&bad_policy),
            Err(ValidationError::UnknownOverflowPolicy("random".to_string()))
        );
    }
}
