// Fri Oct 16 2026 - Alex

use crate::locator::Identity;
use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct SlotState {
    value: Option<u64>,
    closed: bool,
}

#[derive(Default)]
struct Slot {
    state: Mutex<SlotState>,
    ready: Condvar,
}

impl Slot {
    fn publish(&self, value: Option<u64>) {
        let mut state = self.state.lock();
        if !state.closed {
            state.value = value;
            state.closed = true;
            self.ready.notify_all();
        }
    }

    fn wait(&self) -> Option<u64> {
        let mut state = self.state.lock();
        while !state.closed {
            self.ready.wait(&mut state);
        }
        state.value
    }
}

/// One shot slots carrying the curated size of structures that other
/// structures embed by value.
///
/// A reader blocks until the slot's owner publishes or releases it, or until
/// the whole store is pruned.
pub struct Backref {
    enabled: bool,
    slots: Mutex<HashMap<Identity, Arc<Slot>>>,
}

impl Backref {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn alloc(&self, key: &Identity) {
        if self.enabled {
            self.slots.lock().entry(key.clone()).or_default();
        }
    }

    /// Publishes a value; unallocated keys are ignored.
    pub fn set(&self, key: &Identity, value: u64) {
        if let Some(slot) = self.slot(key) {
            slot.publish(Some(value));
        }
    }

    /// Closes a slot without a value, readers fall back to their own size.
    pub fn release(&self, key: &Identity) {
        if let Some(slot) = self.slot(key) {
            slot.publish(None);
        }
    }

    pub fn get(&self, key: &Identity) -> Option<u64> {
        if !self.enabled {
            return None;
        }
        self.slot(key)?.wait()
    }

    /// Releases every waiter and forgets all slots.
    pub fn prune(&self) {
        let slots: Vec<Arc<Slot>> = self.slots.lock().drain().map(|(_, slot)| slot).collect();
        for slot in slots {
            slot.publish(None);
        }
    }

    fn slot(&self, key: &Identity) -> Option<Arc<Slot>> {
        self.slots.lock().get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_disabled_and_unallocated() {
        let key = Identity::new("1");
        let off = Backref::disabled();
        off.alloc(&key);
        off.set(&key, 8);
        assert_eq!(off.get(&key), None);

        let on = Backref::new(true);
        on.set(&key, 8);
        assert_eq!(on.get(&key), None);
    }

    #[test]
    fn test_get_waits_for_set() {
        let store = Arc::new(Backref::new(true));
        let key = Identity::new("7-abc");
        store.alloc(&key);
        let reader = {
            let store = Arc::clone(&store);
            let key = key.clone();
            thread::spawn(move || store.get(&key))
        };
        thread::sleep(Duration::from_millis(20));
        store.set(&key, 24);
        store.set(&key, 99);
        assert_eq!(reader.join().unwrap(), Some(24));
        assert_eq!(store.get(&key), Some(24));
    }

    #[test]
    fn test_prune_releases_waiters() {
        let store = Arc::new(Backref::new(true));
        let key = Identity::new("3");
        store.alloc(&key);
        let reader = {
            let store = Arc::clone(&store);
            let key = key.clone();
            thread::spawn(move || store.get(&key))
        };
        thread::sleep(Duration::from_millis(20));
        store.prune();
        assert_eq!(reader.join().unwrap(), None);
        assert_eq!(store.get(&key), None);
    }

    #[test]
    fn test_release_yields_none() {
        let store = Backref::new(true);
        let key = Identity::new("4");
        store.alloc(&key);
        store.release(&key);
        assert_eq!(store.get(&key), None);
    }
}
