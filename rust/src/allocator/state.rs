//! Working state of one allocation run.

use rustc_hash::FxHashSet;

/// Groups being filled plus the shrinking pool of unassigned people.
///
/// People are roster indices. The pool keeps roster order; the assigned set
/// is checked on every insertion so nobody can be placed twice.
#[derive(Clone, Debug)]
pub struct AllocationState {
    /// Member roster indices per group, in group order
    members: Vec<Vec<usize>>,
    /// Roster indices not yet placed, in roster order
    unassigned: Vec<usize>,
    /// Roster indices already placed
    assigned: FxHashSet<usize>,
}

impl AllocationState {
    /// Start with every person unassigned and every group empty.
    pub fn new(roster_len: usize, group_count: usize) -> Self {
        Self {
            members: vec![Vec::new(); group_count],
            unassigned: (0..roster_len).collect(),
            assigned: FxHashSet::with_capacity_and_hasher(roster_len, Default::default()),
        }
    }

    #[inline]
    pub fn group_size(&self, group: usize) -> usize {
        self.members.get(group).map_or(0, Vec::len)
    }

    pub fn group_sizes(&self) -> Vec<usize> {
        self.members.iter().map(Vec::len).collect()
    }

    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    pub fn has_unassigned(&self) -> bool {
        !self.unassigned.is_empty()
    }

    /// Move `people` into `group`, in the given order.
    ///
    /// Returns the first roster index that was already placed, leaving the
    /// run unusable.
    pub fn assign(&mut self, group: usize, people: &[usize]) -> Result<(), usize> {
        if people.is_empty() {
            return Ok(());
        }
        for &person in people {
            if !self.assigned.insert(person) {
                return Err(person);
            }
            self.members[group].push(person);
        }
        self.unassigned.retain(|p| !self.assigned.contains(p));
        Ok(())
    }

    /// Consume the state, yielding member indices per group.
    pub fn into_members(self) -> Vec<Vec<usize>> {
        self.members
    }
}
