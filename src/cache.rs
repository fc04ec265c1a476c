//! Per-page-session state shared between the selection handlers and fetch
//! completions.
//!
//! Both types are cheap handles around `Rc` state: clones observe the same
//! data, and everything lives exactly as long as the start page instance that
//! created it. Everything runs on the single browser thread, so `RefCell` and
//! `Cell` are enough.

use crate::{GymId, UserEntry};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Users already fetched, keyed by gym id. Empty results are cached too so a
/// gym known to have no users is never fetched twice.
#[derive(Clone, Default)]
pub struct GymUserCache {
    entries: Rc<RefCell<HashMap<GymId, Rc<[UserEntry]>>>>,
}

impl GymUserCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, gym: GymId) -> Option<Rc<[UserEntry]>> {
        self.entries.borrow().get(&gym).cloned()
    }

    pub fn contains(&self, gym: GymId) -> bool {
        self.entries.borrow().contains_key(&gym)
    }

    pub fn insert(&self, gym: GymId, users: Vec<UserEntry>) -> Rc<[UserEntry]> {
        let users: Rc<[UserEntry]> = users.into();
        self.entries.borrow_mut().insert(gym, users.clone());
        users
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identifies one user-list lookup: which gym it was issued for and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    pub gym: GymId,
    generation: u64,
}

/// Hands out tickets for user-list lookups; only the newest one is current.
#[derive(Clone, Default)]
pub struct LookupTracker {
    generation: Rc<Cell<u64>>,
}

impl LookupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, gym: GymId) -> LookupTicket {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        LookupTicket { gym, generation }
    }

    /// Make every outstanding ticket stale, e.g. when a remembered user
    /// replaces the manual selection.
    pub fn invalidate(&self) {
        self.generation.set(self.generation.get() + 1);
    }

    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        ticket.generation == self.generation.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let cache = GymUserCache::new();
        let other = cache.clone();
        other.insert(130, vec![UserEntry::new("6693546282", "Marco")]);
        assert!(cache.contains(130));
        assert_eq!(cache.get(130).unwrap().len(), 1);
    }

    #[test]
    fn empty_results_are_remembered() {
        let cache = GymUserCache::new();
        cache.insert(95, Vec::new());
        assert!(cache.contains(95));
        assert!(cache.get(95).unwrap().is_empty());
        assert!(!cache.is_empty());
    }

    #[test]
    fn only_latest_ticket_is_current() {
        let tracker = LookupTracker::new();
        let first = tracker.begin(130);
        let second = tracker.begin(183);
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));

        tracker.invalidate();
        assert!(!tracker.is_current(&second));
    }

    #[test]
    fn reselecting_same_gym_still_supersedes() {
        let tracker = LookupTracker::new();
        let first = tracker.begin(130);
        let second = tracker.begin(130);
        assert_ne!(first, second);
        assert!(!tracker.is_current(&first));
    }
}
