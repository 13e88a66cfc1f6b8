// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for the Overstory DOM element tree.
//!
//! ## Feature
//!
//! Enable with `dom_adapter` (on by default).
//!
//! ## Notes
//!
//! [`Dom`] implements [`DomLookup`] directly, so a contract over
//! [`NodeId`] keys works out of the box. [`add_container`] additionally
//! applies the iOS pointer-cursor patch to container roots when the quirk
//! is configured — the one contract side effect that needs write access to
//! the tree.

use overstory_dom::{Dom, NodeId};

use crate::containers::ContainerId;
use crate::contract::Contract;
use crate::types::DomLookup;

impl DomLookup<NodeId> for Dom {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<&str> {
        Dom::attribute(self, *node, name)
    }

    fn owner_of(&self, node: &NodeId) -> Option<NodeId> {
        self.owner(*node)
    }

    fn is_anchor(&self, node: &NodeId) -> bool {
        self.tag(*node).is_some_and(|t| t == overstory_dom::Tag::A)
    }

    fn is_text_entry(&self, node: &NodeId) -> bool {
        self.tag(*node).is_some_and(|t| t.is_text_entry())
    }

    fn is_form_control(&self, node: &NodeId) -> bool {
        self.tag(*node).is_some_and(|t| t.is_form_control())
    }

    fn is_native_control(&self, node: &NodeId) -> bool {
        self.tag(*node).is_some_and(|t| t.is_native_control())
    }

    fn is_focusable(&self, node: &NodeId) -> bool {
        self.tag(*node).is_some_and(|t| t.is_naturally_focusable())
            || Dom::attribute(self, *node, "tabindex").is_some()
    }
}

/// Register a container and apply any pending host patches to the tree
/// (currently the iOS pointer-cursor workaround).
pub fn add_container<M: Clone>(
    contract: &mut Contract<NodeId, M>,
    dom: &mut Dom,
    root: NodeId,
) -> ContainerId {
    let id = contract.add_container(&*dom, root);
    for patched in contract.take_cursor_patches() {
        dom.set_attribute(patched, "style", "cursor:pointer");
    }
    id
}
