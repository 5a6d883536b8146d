//! In-memory session storage
//!
//! Process-wide map from user id to that user's tutoring state. Every user
//! owns a slot behind its own mutex, so a get-validate-mutate-set cycle for
//! one user never interleaves with another message from the same user while
//! different users proceed in parallel. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::debug;

use crate::utils::errors::Result;
use super::context::TutorState;

/// Opaque, stable user identifier supplied by the transport
pub type UserId = i64;

type Slot = Arc<Mutex<Option<TutorState>>>;

/// Session storage manager
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: RwLock<HashMap<UserId, Slot>>,
}

/// Storage statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    pub known_users: usize,
    pub active_sessions: usize,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn existing_slot(&self, user_id: UserId) -> Option<Slot> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .map(Arc::clone)
    }

    fn slot_or_insert(&self, user_id: UserId) -> Slot {
        if let Some(slot) = self.existing_slot(user_id) {
            return slot;
        }

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(user_id).or_default())
    }

    fn lock(slot: &Slot) -> MutexGuard<'_, Option<TutorState>> {
        // The slot is only ever assigned whole states, so a poisoned lock
        // still guards a consistent value.
        slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop the map entry if it is empty and nobody else holds the slot.
    ///
    /// Callers must have released the slot's mutex.
    fn prune(&self, user_id: UserId, slot: Slot) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let Some(stored) = slots.get(&user_id) else {
            return;
        };
        // new clones are only taken under the map lock held here, so a count
        // of two (map + ours) means no other thread can reach the slot
        if Arc::ptr_eq(stored, &slot) && Arc::strong_count(&slot) == 2 && Self::lock(&slot).is_none() {
            slots.remove(&user_id);
            debug!(user_id = user_id, "Released empty session slot");
        }
    }

    /// Snapshot of the user's state
    pub fn get(&self, user_id: UserId) -> Option<TutorState> {
        let slot = self.existing_slot(user_id)?;
        let state = Self::lock(&slot).clone();
        state
    }

    /// Replace the user's state wholesale
    pub fn set(&self, user_id: UserId, state: TutorState) {
        debug!(user_id = user_id, skill = %state.skill_id, "Storing session state");
        *Self::lock(&self.slot_or_insert(user_id)) = Some(state);
    }

    /// Remove the user's state; returns whether one existed
    pub fn clear(&self, user_id: UserId) -> bool {
        let Some(slot) = self.existing_slot(user_id) else {
            return false;
        };
        let removed = Self::lock(&slot).take().is_some();
        self.prune(user_id, slot);
        debug!(user_id = user_id, removed = removed, "Cleared session state");
        removed
    }

    /// Run `f` with exclusive access to the user's slot, creating it if needed.
    ///
    /// A slot left empty by `f` is released afterwards.
    pub fn with_session<R>(&self, user_id: UserId, f: impl FnOnce(&mut Option<TutorState>) -> R) -> R {
        let slot = self.slot_or_insert(user_id);
        let (output, empty) = {
            let mut guard = Self::lock(&slot);
            let output = f(&mut guard);
            (output, guard.is_none())
        };
        if empty {
            self.prune(user_id, slot);
        }
        output
    }

    /// Run `f` on the user's state only if one is stored; never creates a slot
    pub fn with_existing<R>(&self, user_id: UserId, f: impl FnOnce(&mut TutorState) -> R) -> Option<R> {
        let slot = self.existing_slot(user_id)?;
        let mut guard = Self::lock(&slot);
        let output = guard.as_mut().map(f);
        output
    }

    /// Run `f` against a draft copy of the user's slot under the user's lock.
    ///
    /// The draft replaces the stored value only when `f` succeeds; on error
    /// the stored state is left exactly as it was.
    pub fn transaction<R>(
        &self,
        user_id: UserId,
        f: impl FnOnce(&mut Option<TutorState>) -> Result<R>,
    ) -> Result<R> {
        self.with_session(user_id, |stored| {
            let mut draft = stored.clone();
            let output = f(&mut draft)?;
            *stored = draft;
            Ok(output)
        })
    }

    /// Check if a session exists for a user
    pub fn contains(&self, user_id: UserId) -> bool {
        self.existing_slot(user_id)
            .is_some_and(|slot| Self::lock(&slot).is_some())
    }

    /// Get storage statistics
    pub fn stats(&self) -> StorageStats {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let active_sessions = slots.values().filter(|slot| Self::lock(slot).is_some()).count();
        StorageStats {
            known_users: slots.len(),
            active_sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillId;
    use crate::state::context::{SkillScratch, Step, Validator};
    use crate::utils::errors::CoachError;

    fn state(problem: &str) -> TutorState {
        TutorState::new(
            SkillId::Proportion,
            problem,
            vec![Step::new("q", &["h"], Validator::DiagonalRule)],
            SkillScratch::Proportion,
        )
    }

    #[test]
    fn test_get_set_clear() {
        let store = SessionStore::new();
        assert!(store.get(1).is_none());

        store.set(1, state("2:3 = 4:y"));
        assert_eq!(store.get(1).map(|s| s.problem_text), Some("2:3 = 4:y".to_string()));
        assert!(store.contains(1));

        assert!(store.clear(1));
        assert!(!store.clear(1));
        assert!(store.get(1).is_none());
    }

    #[test]
    fn test_users_are_isolated() {
        let store = SessionStore::new();
        store.set(1, state("first"));
        store.set(2, state("second"));
        store.clear(1);

        assert!(store.get(1).is_none());
        assert_eq!(store.get(2).map(|s| s.problem_text), Some("second".to_string()));
        assert_eq!(store.stats(), StorageStats { known_users: 1, active_sessions: 1 });
    }

    #[test]
    fn test_reads_do_not_create_slots() {
        let store = SessionStore::new();
        assert!(store.get(1).is_none());
        assert!(!store.contains(2));
        assert!(!store.clear(3));
        assert_eq!(store.with_existing(4, |s| s.step_index), None);
        assert_eq!(store.stats(), StorageStats { known_users: 0, active_sessions: 0 });
    }

    #[test]
    fn test_emptied_slots_are_released() {
        let store = SessionStore::new();
        store.set(1, state("first"));
        store.set(2, state("second"));
        assert_eq!(store.stats().known_users, 2);

        store.clear(1);
        store.transaction(2, |slot| {
            *slot = None;
            Ok(())
        })
        .expect("transaction");
        store.with_session(3, |slot| slot.is_some());

        assert_eq!(store.stats(), StorageStats { known_users: 0, active_sessions: 0 });
    }

    #[test]
    fn test_failed_transaction_on_empty_slot_leaves_nothing() {
        let store = SessionStore::new();
        let result: Result<()> = store.transaction(5, |slot| {
            *slot = Some(state("draft"));
            Err(CoachError::InvalidInput("boom".to_string()))
        });
        assert!(result.is_err());
        assert!(store.get(5).is_none());
        assert_eq!(store.stats().known_users, 0);
    }

    #[test]
    fn test_failed_transaction_keeps_state() {
        let store = SessionStore::new();
        store.set(7, state("keep me"));

        let result: Result<()> = store.transaction(7, |slot| {
            if let Some(s) = slot.as_mut() {
                s.step_index = 1;
                s.scratch.hints_used = 3;
            }
            Err(CoachError::InvalidInput("boom".to_string()))
        });

        assert!(result.is_err());
        let kept = store.get(7).expect("state kept");
        assert_eq!(kept.step_index, 0);
        assert_eq!(kept.scratch.hints_used, 0);
    }

    #[test]
    fn test_successful_transaction_commits() {
        let store = SessionStore::new();
        store.set(7, state("commit"));

        store
            .transaction(7, |slot| {
                *slot = None;
                Ok(())
            })
            .expect("transaction");

        assert!(store.get(7).is_none());
    }
}
