//! Uniqueness-enforcing collection with set algebra.
//!
//! [`BoundedSet`] guarantees "exactly one of each member" under the element's
//! `Eq + Hash` rule. Set operations return new sets and never mutate their
//! operands. Iteration order is unspecified and may differ between a set and
//! the results of operations on it; callers that need order track it
//! separately.

use std::collections::HashSet;
use std::collections::hash_set;
use std::hash::Hash;

/// A set of unique members.
///
/// # Example
///
/// ```
/// use conclave_domain::BoundedSet;
///
/// let mut set = BoundedSet::new();
/// assert!(set.add("optimist"));
/// assert!(!set.add("optimist"));
/// assert_eq!(set.cardinality(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedSet<T: Eq + Hash> {
    members: HashSet<T>,
}

impl<T: Eq + Hash> Default for BoundedSet<T> {
    fn default() -> Self {
        Self {
            members: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash> BoundedSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member. Returns `false` when an equal member is already present.
    pub fn add(&mut self, member: T) -> bool {
        self.members.insert(member)
    }

    /// Remove a member. Returns `false` when it was not present.
    pub fn remove(&mut self, member: &T) -> bool {
        self.members.remove(member)
    }

    pub fn has(&self, member: &T) -> bool {
        self.members.contains(member)
    }

    pub fn cardinality(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, T> {
        self.members.iter()
    }

    /// Every member of `self` is also a member of `other`.
    pub fn is_subset_of(&self, other: &BoundedSet<T>) -> bool {
        self.members.is_subset(&other.members)
    }
}

impl<T: Eq + Hash + Clone> BoundedSet<T> {
    pub fn union(&self, other: &BoundedSet<T>) -> BoundedSet<T> {
        self.members.union(&other.members).cloned().collect()
    }

    pub fn intersection(&self, other: &BoundedSet<T>) -> BoundedSet<T> {
        self.members.intersection(&other.members).cloned().collect()
    }

    pub fn difference(&self, other: &BoundedSet<T>) -> BoundedSet<T> {
        self.members.difference(&other.members).cloned().collect()
    }

    pub fn symmetric_difference(&self, other: &BoundedSet<T>) -> BoundedSet<T> {
        self.members
            .symmetric_difference(&other.members)
            .cloned()
            .collect()
    }

    /// Snapshot of the members in unspecified order.
    pub fn to_vec(&self) -> Vec<T> {
        self.members.iter().cloned().collect()
    }
}

impl<T: Eq + Hash> FromIterator<T> for BoundedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<T: Eq + Hash> Extend<T> for BoundedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl<T: Eq + Hash> IntoIterator for BoundedSet<T> {
    type Item = T;
    type IntoIter = hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a BoundedSet<T> {
    type Item = &'a T;
    type IntoIter = hash_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
