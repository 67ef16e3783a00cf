//! Core records exchanged with the allocator.

use pyo3::prelude::*;

/// A topic people can rank. Keys are stable; labels are for display.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    #[pyo3(get, set)]
    pub key: String,
    #[pyo3(get, set)]
    pub label: String,
}

#[pymethods]
impl Category {
    #[new]
    pub fn new(key: String, label: String) -> Self {
        Self { key, label }
    }

    fn __repr__(&self) -> String {
        format!("Category(key={:?}, label={:?})", self.key, self.label)
    }
}

/// A person to place, with category keys ranked most preferred first.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub rankings: Vec<String>,
}

#[pymethods]
impl Person {
    #[new]
    pub fn new(id: String, name: String, rankings: Vec<String>) -> Self {
        Self { id, name, rankings }
    }

    /// Most preferred category key, if any.
    pub fn top_choice(&self) -> Option<String> {
        self.rankings.first().cloned()
    }

    fn __repr__(&self) -> String {
        format!(
            "Person(id={:?}, name={:?}, rankings={:?})",
            self.id, self.name, self.rankings
        )
    }
}

/// One room of one category, filled by an allocation run.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub category_key: String,
    #[pyo3(get, set)]
    pub category_label: String,
    /// 1-based room index within the category.
    #[pyo3(get, set)]
    pub room_number: u32,
    #[pyo3(get, set)]
    pub members: Vec<Person>,
}

impl Group {
    /// Create an empty group for `room_number` of `category`.
    pub fn empty(category: &Category, room_number: u32) -> Self {
        Self {
            id: format!("{}-room-{}", category.key, room_number),
            category_key: category.key.clone(),
            category_label: category.label.clone(),
            room_number,
            members: Vec::new(),
        }
    }
}

#[pymethods]
impl Group {
    /// Number of assigned members.
    pub fn size(&self) -> usize {
        self.members.len()
    }

    fn __len__(&self) -> usize {
        self.members.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Group(id={:?}, category={:?}, room={}, members={})",
            self.id,
            self.category_key,
            self.room_number,
            self.members.len()
        )
    }
}
