//! Three-pass greedy allocation of people into category groups.

use thiserror::Error;

use crate::category_index::{CategoryId, CategoryIndex};
use crate::config::AllocationConfig;
use crate::models::{Category, Group, Person};
use crate::validation::{validate_categories, validate_config, validate_roster, ValidationError};
use crate::{log_changes, log_checks, log_debug};

use super::overflow::OverflowPolicy;
use super::state::AllocationState;

/// Errors that can occur during allocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),
    #[error("Person {0} was assigned more than once")]
    AlreadyAssigned(String),
}

/// Balanced per-group size goal: `fixed` when set, else ceil(people / groups).
pub fn compute_target(people: usize, groups: usize, fixed: Option<usize>) -> usize {
    match fixed {
        Some(target) => target,
        None if groups == 0 => 0,
        None => people.div_ceil(groups),
    }
}

/// A validated allocation run over one roster.
///
/// Groups are laid out category by category in configured order, rooms
/// ascending within a category. That order drives every pass and every
/// tie-break, and is the order of the returned groups.
pub struct Allocator<'a> {
    roster: &'a [Person],
    /// Rankings resolved to category ids, parallel to `roster`
    rankings: Vec<Vec<CategoryId>>,
    /// Empty groups in initialization order
    groups: Vec<Group>,
    /// Category id of each group, parallel to `groups`
    group_categories: Vec<CategoryId>,
    target: usize,
    policy: OverflowPolicy,
    verbosity: u8,
}

impl<'a> Allocator<'a> {
    /// Validate inputs and lay out the empty groups.
    pub fn new(
        roster: &'a [Person],
        categories: &[Category],
        config: &AllocationConfig,
    ) -> Result<Self, AllocationError> {
        validate_categories(categories)?;
        validate_config(config)?;
        let policy = OverflowPolicy::parse(&config.overflow_policy)?;

        let index = CategoryIndex::new(categories);
        let rankings = validate_roster(roster, &index, config)?;

        let group_count = index.len() * config.rooms_per_category as usize;
        let mut groups = Vec::with_capacity(group_count);
        let mut group_categories = Vec::with_capacity(group_count);
        for (id, category) in index.categories().iter().enumerate() {
            for room in 1..=config.rooms_per_category {
                groups.push(Group::empty(category, room));
                group_categories.push(id as CategoryId);
            }
        }

        let target = compute_target(roster.len(), groups.len(), config.fixed_target);
        log_debug!(
            config.verbosity,
            "{} people, {} groups, target {} ({}), overflow policy {}",
            roster.len(),
            groups.len(),
            target,
            if config.fixed_target.is_some() { "fixed" } else { "computed" },
            policy.as_str()
        );

        Ok(Self {
            roster,
            rankings,
            groups,
            group_categories,
            target,
            policy,
            verbosity: config.verbosity,
        })
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Run all three passes and return the filled groups.
    pub fn run(&self) -> Result<Vec<Group>, AllocationError> {
        let mut state = AllocationState::new(self.roster.len(), self.groups.len());

        self.preference_passes(&mut state)?;
        self.backfill_pass(&mut state)?;
        self.overflow_pass(&mut state)?;

        Ok(self.build_groups(state))
    }

    /// Pass 1: for each rank, fill groups below target with people whose
    /// preference at that rank is the group's category.
    fn preference_passes(&self, state: &mut AllocationState) -> Result<(), AllocationError> {
        let max_rank = self.rankings.iter().map(Vec::len).max().unwrap_or(0);

        for rank in 0..max_rank {
            log_debug!(
                self.verbosity,
                "rank {}: {} unassigned",
                rank,
                state.unassigned().len()
            );
            let mut placed = 0;

            for (group, &category) in self.group_categories.iter().enumerate() {
                let open = self.target.saturating_sub(state.group_size(group));
                if open == 0 {
                    log_checks!(
                        self.verbosity,
                        "{} at target {}, skipping for rank {}",
                        self.groups[group].id,
                        self.target,
                        rank
                    );
                    continue;
                }

                let interested: Vec<usize> = state
                    .unassigned()
                    .iter()
                    .copied()
                    .filter(|&person| self.rankings[person].get(rank) == Some(&category))
                    .take(open)
                    .collect();

                self.place(state, group, &interested, "preference")?;
                placed += interested.len();
            }

            log_changes!(self.verbosity, "rank {} pass placed {}", rank, placed);
        }
        Ok(())
    }

    /// Pass 2: top up groups below target from the pool, ignoring rankings.
    fn backfill_pass(&self, state: &mut AllocationState) -> Result<(), AllocationError> {
        let mut placed = 0;
        for group in 0..self.groups.len() {
            if !state.has_unassigned() {
                break;
            }
            let needed = self.target.saturating_sub(state.group_size(group));
            if needed == 0 {
                continue;
            }
            let fill: Vec<usize> = state.unassigned().iter().copied().take(needed).collect();
            self.place(state, group, &fill, "backfill")?;
            placed += fill.len();
        }
        log_changes!(self.verbosity, "backfill pass placed {}", placed);
        Ok(())
    }

    /// Pass 3: place each remaining person individually per the overflow
    /// policy. This may push a group above target.
    fn overflow_pass(&self, state: &mut AllocationState) -> Result<(), AllocationError> {
        let remaining: Vec<usize> = state.unassigned().to_vec();
        for person in remaining {
            let sizes = state.group_sizes();
            let group = self
                .policy
                .select_group(&sizes, &self.group_categories, &self.rankings[person])
                .ok_or(ValidationError::NoCategories)?;
            log_checks!(
                self.verbosity,
                "overflow {} -> {} (size {})",
                self.roster[person].id,
                self.groups[group].id,
                sizes[group]
            );
            self.place(state, group, &[person], "overflow")?;
        }
        Ok(())
    }

    fn place(
        &self,
        state: &mut AllocationState,
        group: usize,
        people: &[usize],
        pass: &str,
    ) -> Result<(), AllocationError> {
        state
            .assign(group, people)
            .map_err(|person| AllocationError::AlreadyAssigned(self.roster[person].id.clone()))?;
        for &person in people {
            log_changes!(
                self.verbosity,
                "{}: {} -> {}",
                pass,
                self.roster[person].name,
                self.groups[group].id
            );
        }
        Ok(())
    }

    fn build_groups(&self, state: AllocationState) -> Vec<Group> {
        self.groups
            .iter()
            .zip(state.into_members())
            .map(|(template, members)| Group {
                members: members
                    .into_iter()
                    .map(|person| self.roster[person].clone())
                    .collect(),
                ..template.clone()
            })
            .collect()
    }
}

/// Allocate `roster` into `categories.len() * config.rooms_per_category`
/// groups.
///
/// Every person ends up in exactly one group. The result is deterministic
/// for a given input order.
///
/// # Errors
/// * `AllocationError::Invalid` if the configuration or any record fails
///   validation; no person is ever dropped silently.
pub fn allocate(
    roster: &[Person],
    categories: &[Category],
    config: &AllocationConfig,
) -> Result<Vec<Group>, AllocationError> {
    Allocator::new(roster, categories, config)?.run()
}
