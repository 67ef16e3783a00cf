//! Category key interning.
//!
//! Maps category keys to dense integer ids in configured order so the
//! allocator compares preferences by integer instead of by string.

use rustc_hash::FxHashMap;

use crate::models::Category;

/// Interned category id (position in configured order).
pub type CategoryId = u32;

/// Lookup from category key to id and back, in configured order.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    to_id: FxHashMap<String, CategoryId>,
    categories: Vec<Category>,
}

impl CategoryIndex {
    /// Build an index over `categories`. Duplicate keys keep their first id;
    /// `validation::validate_categories` rejects them before this matters.
    pub fn new(categories: &[Category]) -> Self {
        let mut to_id: FxHashMap<String, CategoryId> =
            FxHashMap::with_capacity_and_hasher(categories.len(), Default::default());
        let mut kept = Vec::with_capacity(categories.len());
        for category in categories {
            if to_id.contains_key(&category.key) {
                continue;
            }
            to_id.insert(category.key.clone(), kept.len() as CategoryId);
            kept.push(category.clone());
        }
        Self {
            to_id,
            categories: kept,
        }
    }

    /// Id of a category key, if configured.
    #[inline]
    pub fn get(&self, key: &str) -> Option<CategoryId> {
        self.to_id.get(key).copied()
    }

    /// Key for an id.
    #[inline]
    pub fn resolve(&self, id: CategoryId) -> Option<&str> {
        self.categories.get(id as usize).map(|c| c.key.as_str())
    }

    /// Full category record for an id.
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id as usize)
    }

    /// Categories in configured order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Match free text (an imported cell, a typed name) to a category key.
    ///
    /// Case-insensitive on trimmed text. A category matches when its label
    /// contains the text, the text contains its label, or the text equals its
    /// key. The first match in configured order wins.
    pub fn resolve_text(&self, raw: &str) -> Option<&str> {
        let needle = raw.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.categories
            .iter()
            .find(|c| {
                let label = c.label.to_lowercase();
                label.contains(&needle) || needle.contains(&label) || needle == c.key.to_lowercase()
            })
            .map(|c| c.key.as_str())
    }
}
