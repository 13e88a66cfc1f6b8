// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container storage and listener bookkeeping.
//!
//! ## Overview
//!
//! A container is a subtree root carrying the delegated listeners. The
//! registry is a generational slot arena (stale handles never alias a later
//! container) and records, per container, exactly which listeners are
//! installed — removal must detach the listeners that were attached, not
//! fresh stand-ins.
//!
//! Whether a container is *active* (listeners installed) or *nested*
//! (tracked, but listener-free because an ancestor container already
//! intercepts the bubble) is decided by the contract's partitioning; the
//! registry just stores the verdict.

use alloc::string::String;
use alloc::vec::Vec;

/// Handle for a registered container.
///
/// Slot index plus generation, so a handle kept past removal is detectably
/// stale rather than aliasing whichever container reuses the slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ContainerId(pub(crate) u32, pub(crate) u32);

impl ContainerId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identity of one installed listener.
///
/// Monotonic per contract. Two installations of the same event type on the
/// same container get distinct ids, which is what makes removal exact.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(pub(crate) u32);

/// One listener physically installed on a container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstalledListener {
    /// Semantic event name the handler resolves under.
    pub name: String,
    /// Raw host event type the listener is attached for.
    pub raw: String,
    pub id: ListenerId,
}

#[derive(Clone, Debug)]
pub(crate) struct ContainerEntry<K> {
    generation: u32,
    pub root: K,
    pub active: bool,
    pub installed: Vec<InstalledListener>,
    /// iOS bubbling workaround applied to this root (pointer cursor).
    pub cursor_patched: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct ContainerRegistry<K> {
    slots: Vec<Option<ContainerEntry<K>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl<K: Copy> ContainerRegistry<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, root: K) -> ContainerId {
        let entry = |generation| ContainerEntry {
            generation,
            root,
            active: false,
            installed: Vec::new(),
            cursor_patched: false,
        };
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(entry(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Container handles use 32-bit indices by design."
            )]
            ContainerId::new(idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(entry(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Container handles use 32-bit indices by design."
            )]
            ContainerId::new((self.slots.len() - 1) as u32, generation)
        }
    }

    pub(crate) fn remove(&mut self, id: ContainerId) -> Option<ContainerEntry<K>> {
        if !self.is_alive(id) {
            return None;
        }
        let entry = self.slots[id.idx()].take();
        self.free_list.push(id.idx());
        entry
    }

    pub(crate) fn is_alive(&self, id: ContainerId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get(&self, id: ContainerId) -> Option<&ContainerEntry<K>> {
        let e = self.slots.get(id.idx())?.as_ref()?;
        (e.generation == id.1).then_some(e)
    }

    pub(crate) fn get_mut(&mut self, id: ContainerId) -> Option<&mut ContainerEntry<K>> {
        let e = self.slots.get_mut(id.idx())?.as_mut()?;
        (e.generation == id.1).then_some(e)
    }

    /// Live containers in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (ContainerId, &ContainerEntry<K>)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let e = slot.as_ref()?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Container handles use 32-bit indices by design."
            )]
            Some((ContainerId::new(i as u32, e.generation), e))
        })
    }

    /// Live container ids in slot order.
    pub(crate) fn ids(&self) -> Vec<ContainerId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut reg: ContainerRegistry<u32> = ContainerRegistry::new();
        let a = reg.insert(10);
        let b = reg.insert(20);
        assert_eq!(reg.get(a).map(|e| e.root), Some(10));
        assert_eq!(reg.get(b).map(|e| e.root), Some(20));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.ids(), alloc::vec![a, b]);
    }

    #[test]
    fn removal_makes_the_handle_stale() {
        let mut reg: ContainerRegistry<u32> = ContainerRegistry::new();
        let a = reg.insert(10);
        assert!(reg.remove(a).is_some());
        assert!(!reg.is_alive(a));
        assert!(reg.remove(a).is_none(), "double remove is a no-op");
    }

    #[test]
    fn slot_reuse_bumps_the_generation() {
        let mut reg: ContainerRegistry<u32> = ContainerRegistry::new();
        let a = reg.insert(10);
        reg.remove(a);
        let b = reg.insert(30);
        assert!(reg.is_alive(b));
        assert!(!reg.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn installed_listeners_are_tracked_per_container() {
        let mut reg: ContainerRegistry<u32> = ContainerRegistry::new();
        let a = reg.insert(10);
        let entry = reg.get_mut(a).unwrap();
        entry.installed.push(InstalledListener {
            name: String::from("click"),
            raw: String::from("click"),
            id: ListenerId(1),
        });
        entry.active = true;

        let removed = reg.remove(a).unwrap();
        assert_eq!(removed.installed.len(), 1);
        assert_eq!(removed.installed[0].id, ListenerId(1));
    }
}
