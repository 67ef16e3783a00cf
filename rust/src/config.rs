//! Configuration types for the allocator.

use pyo3::prelude::*;

/// Configuration for one allocation run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct AllocationConfig {
    /// Number of groups created for each category (rooms are numbered from 1)
    #[pyo3(get, set)]
    pub rooms_per_category: u32,
    /// Fixed per-group target; None computes ceil(people / groups)
    #[pyo3(get, set)]
    pub fixed_target: Option<usize>,
    /// Overflow placement: "preference_then_least_full" or "least_full"
    #[pyo3(get, set)]
    pub overflow_policy: String,
    /// Reject rosters larger than this
    #[pyo3(get, set)]
    pub max_roster_size: Option<usize>,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            rooms_per_category: 2,
            fixed_target: None,
            overflow_policy: "preference_then_least_full".to_string(),
            max_roster_size: None,
            verbosity: 0,
        }
    }
}

impl AllocationConfig {
    /// Default configuration with a different room count.
    pub fn with_rooms(rooms_per_category: u32) -> Self {
        Self {
            rooms_per_category,
            ..Self::default()
        }
    }
}

#[pymethods]
impl AllocationConfig {
    #[new]
    #[pyo3(signature = (
        rooms_per_category=None,
        fixed_target=None,
        overflow_policy=None,
        max_roster_size=None,
        verbosity=None
    ))]
    fn new(
        rooms_per_category: Option<u32>,
        fixed_target: Option<usize>,
        overflow_policy: Option<String>,
        max_roster_size: Option<usize>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            rooms_per_category: rooms_per_category.unwrap_or(defaults.rooms_per_category),
            fixed_target,
            overflow_policy: overflow_policy.unwrap_or(defaults.overflow_policy),
            max_roster_size,
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AllocationConfig(rooms_per_category={}, fixed_target={:?}, overflow_policy={:?})",
            self.rooms_per_category, self.fixed_target, self.overflow_policy
        )
    }
}
