// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Namespace qualification for bare action names.
//!
//! An action name containing `.` is already qualified and passes through
//! untouched (which makes qualification idempotent). A bare name is
//! qualified by the nearest `jsnamespace` attribute on the element or its
//! ancestors, container inclusive; without one it stays bare and is read as
//! global.
//!
//! The per-element cache distinguishes "queried, no namespace" from "never
//! queried", so resolving many actions under one subtree costs one
//! attribute read per element.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::types::{DomLookup, ATTR_NAMESPACE};

/// Per-element namespace cache: absent key = never queried, `None` =
/// queried and attribute-less.
pub(crate) type NamespaceCache<K> = BTreeMap<K, Option<String>>;

/// Qualify `name` relative to `start`, walking up to `container` inclusive.
pub(crate) fn resolve<K, D>(
    cache: &mut NamespaceCache<K>,
    doc: &D,
    name: &str,
    start: K,
    container: K,
) -> String
where
    K: Copy + Ord,
    D: DomLookup<K> + ?Sized,
{
    if name.contains('.') {
        return String::from(name);
    }
    let mut cur = start;
    loop {
        let ns = match cache.get(&cur) {
            Some(cached) => cached.clone(),
            None => {
                let queried = doc.attribute(&cur, ATTR_NAMESPACE).map(String::from);
                cache.insert(cur, queried.clone());
                queried
            }
        };
        if let Some(ns) = ns {
            let mut qualified = ns;
            qualified.push('.');
            qualified.push_str(name);
            return qualified;
        }
        if cur == container {
            break;
        }
        match doc.parent_of(&cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    String::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    // Chain 3 → 2 → 1; node 2 carries the namespace. Attribute reads are
    // counted to observe the cache.
    struct Doc {
        reads: Cell<u32>,
    }

    impl Doc {
        fn new() -> Self {
            Self {
                reads: Cell::new(0),
            }
        }
    }

    impl DomLookup<u32> for Doc {
        fn parent_of(&self, node: &u32) -> Option<u32> {
            match node {
                3 => Some(2),
                2 => Some(1),
                _ => None,
            }
        }
        fn attribute(&self, node: &u32, name: &str) -> Option<&str> {
            self.reads.set(self.reads.get() + 1);
            (name == ATTR_NAMESPACE && *node == 2).then_some("menu")
        }
    }

    #[test]
    fn qualified_names_pass_through() {
        let mut cache = NamespaceCache::new();
        let doc = Doc::new();
        assert_eq!(resolve(&mut cache, &doc, "menu.open", 3, 1), "menu.open");
        assert_eq!(doc.reads.get(), 0, "no walk for qualified names");
    }

    #[test]
    fn bare_name_picks_up_the_nearest_namespace() {
        let mut cache = NamespaceCache::new();
        let doc = Doc::new();
        assert_eq!(resolve(&mut cache, &doc, "open", 3, 1), "menu.open");
    }

    #[test]
    fn no_namespace_means_global() {
        struct Bare;
        impl DomLookup<u32> for Bare {
            fn parent_of(&self, node: &u32) -> Option<u32> {
                (*node == 2).then_some(1)
            }
            fn attribute(&self, _node: &u32, _name: &str) -> Option<&str> {
                None
            }
        }
        let mut cache = NamespaceCache::new();
        assert_eq!(resolve(&mut cache, &Bare, "open", 2, 1), "open");
    }

    #[test]
    fn container_itself_is_consulted() {
        struct OnContainer;
        impl DomLookup<u32> for OnContainer {
            fn parent_of(&self, node: &u32) -> Option<u32> {
                (*node == 2).then_some(1)
            }
            fn attribute(&self, node: &u32, name: &str) -> Option<&str> {
                (name == ATTR_NAMESPACE && *node == 1).then_some("root")
            }
        }
        let mut cache = NamespaceCache::new();
        assert_eq!(resolve(&mut cache, &OnContainer, "go", 2, 1), "root.go");
    }

    #[test]
    fn walk_stops_at_the_container() {
        // Namespace sits above the container; it must not be found.
        struct Above;
        impl DomLookup<u32> for Above {
            fn parent_of(&self, node: &u32) -> Option<u32> {
                match node {
                    3 => Some(2),
                    2 => Some(1),
                    _ => None,
                }
            }
            fn attribute(&self, node: &u32, name: &str) -> Option<&str> {
                (name == ATTR_NAMESPACE && *node == 1).then_some("outside")
            }
        }
        let mut cache = NamespaceCache::new();
        assert_eq!(resolve(&mut cache, &Above, "go", 3, 2), "go");
    }

    #[test]
    fn repeated_resolution_costs_one_read_per_element() {
        let mut cache = NamespaceCache::new();
        let doc = Doc::new();
        assert_eq!(resolve(&mut cache, &doc, "open", 3, 1), "menu.open");
        let reads_after_first = doc.reads.get();
        assert_eq!(resolve(&mut cache, &doc, "close", 3, 1), "menu.close");
        assert_eq!(
            doc.reads.get(),
            reads_after_first,
            "absence and presence are both cached"
        );
    }

    #[test]
    fn qualification_is_idempotent() {
        let mut cache = NamespaceCache::new();
        let doc = Doc::new();
        let once = resolve(&mut cache, &doc, "open", 3, 1);
        let twice = resolve(&mut cache, &doc, &once, 3, 1);
        assert_eq!(once, twice);
    }
}
