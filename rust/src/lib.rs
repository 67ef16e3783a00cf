//! Preference-based group allocation.
//!
//! Places a roster of people, each ranking a few categories, into a fixed
//! layout of category rooms. Usable directly from Rust or, with the
//! `extension-module` feature, as the `rust` Python module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

pub mod affinity;
pub mod allocator;
pub mod category_index;
mod config;
pub mod logging;
mod models;
pub mod summary;
pub mod validation;

pub use affinity::{primary_category, shared_interest_links, InterestLink};
pub use allocator::{allocate, AllocationError, Allocator, OverflowPolicy};
pub use category_index::{CategoryId, CategoryIndex};
pub use config::AllocationConfig;
pub use models::{Category, Group, Person};
pub use summary::{preference_rank, summarize, PlacementSummary};
pub use validation::{ValidationError, MIN_RANKINGS};

/// Allocate people into groups.
///
/// # Arguments
/// * `roster` - People to place; each ranks category keys, most preferred first
/// * `categories` - Categories in the order their groups should appear
/// * `config` - Room count, target and overflow policy (defaults if omitted)
///
/// # Returns
/// * Groups in configured order, every person placed exactly once
///
/// # Raises
/// * ValueError if the configuration or any person is invalid
#[pyfunction]
#[pyo3(signature = (roster, categories, config=None))]
fn allocate_groups(
    roster: Vec<Person>,
    categories: Vec<Category>,
    config: Option<AllocationConfig>,
) -> PyResult<Vec<Group>> {
    let config = config.unwrap_or_default();
    allocate(&roster, &categories, &config)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Check people and configuration without allocating.
///
/// # Raises
/// * ValueError describing the first problem found
#[pyfunction]
#[pyo3(signature = (roster, categories, config=None))]
fn validate_people(
    roster: Vec<Person>,
    categories: Vec<Category>,
    config: Option<AllocationConfig>,
) -> PyResult<()> {
    let config = config.unwrap_or_default();
    let checked = validation::validate_categories(&categories)
        .and_then(|_| validation::validate_config(&config))
        .and_then(|_| {
            let index = CategoryIndex::new(&categories);
            validation::validate_roster(&roster, &index, &config)
        });
    match checked {
        Ok(_) => Ok(()),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Match free text (e.g. an imported spreadsheet cell) to a category key.
#[pyfunction]
fn resolve_category(text: &str, categories: Vec<Category>) -> Option<String> {
    CategoryIndex::new(&categories)
        .resolve_text(text)
        .map(str::to_string)
}

/// Summarize which preference rank each person received.
#[pyfunction]
fn summarize_groups(groups: Vec<Group>) -> PlacementSummary {
    summarize(&groups)
}

/// Pairwise shared-interest links for a roster.
#[pyfunction]
#[pyo3(name = "shared_interest_links")]
fn py_shared_interest_links(roster: Vec<Person>) -> Vec<InterestLink> {
    shared_interest_links(&roster)
}

/// The casegroups.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Records
    m.add_class::<Category>()?;
    m.add_class::<Person>()?;
    m.add_class::<Group>()?;
    m.add_class::<PlacementSummary>()?;
    m.add_class::<InterestLink>()?;

    // Config types
    m.add_class::<AllocationConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(allocate_groups, m)?)?;
    m.add_function(wrap_pyfunction!(validate_people, m)?)?;
    m.add_function(wrap_pyfunction!(resolve_category, m)?)?;
    m.add_function(wrap_pyfunction!(summarize_groups, m)?)?;
    m.add_function(wrap_pyfunction!(py_shared_interest_links, m)?)?;

    Ok(())
}
