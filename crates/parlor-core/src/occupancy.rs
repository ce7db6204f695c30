//! Occupancy set: display names currently seated in a match.
//!
//! Membership here is what makes a user invisible to matchmaking. The
//! lobby adds both players on acceptance and removes them on any
//! terminal outcome, so at all times the set is exactly the union of
//! live sessions' participants.

use indexmap::IndexSet;

/// Insertion-ordered set of seated display names.
#[derive(Debug, Default)]
pub struct OccupancySet {
    names: IndexSet<String>,
}

impl OccupancySet {
    pub fn new() -> Self {
        OccupancySet::default()
    }

    /// Seat a name. Returns `false` if it was already seated.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Unseat a name, keeping the order of the rest. Returns `false`
    /// if the name was not seated.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Seated names, oldest seating first.
    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove_report_membership_changes() {
        let mut set = OccupancySet::new();
        assert!(set.insert("alice"));
        assert!(!set.insert("alice"));
        assert!(set.contains("alice"));

        assert!(set.remove("alice"));
        assert!(!set.remove("alice"));
        assert!(set.is_empty());
    }

    #[test]
    fn names_keep_seating_order_across_removals() {
        let mut set = OccupancySet::new();
        set.insert("carol");
        set.insert("alice");
        set.insert("bob");

        set.remove("alice");
        assert_eq!(set.names(), vec!["carol", "bob"]);

        set.insert("alice");
        assert_eq!(set.names(), vec!["carol", "bob", "alice"]);
    }
}
