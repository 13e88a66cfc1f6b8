// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, tags, and element
//! data.

use alloc::string::String;
use alloc::vec::Vec;

/// Identifier for an element in the tree.
///
/// This is a small, copyable handle that stays stable across updates but
/// becomes invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that
///   slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a
///   new, distinct `NodeId`.
///
/// Stale `NodeId`s never alias a different live element because the
/// generation must match; use [`Dom::is_alive`](crate::Dom::is_alive) to
/// check liveness. This also means anything keyed by `NodeId` (the
/// contract's per-element caches, for example) is invalidated by node
/// replacement for free.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Element tag, reduced to the kinds delegation treats differently.
///
/// Everything without special behavior is [`Tag::Other`]; the contract only
/// asks the questions below.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Tag {
    Div,
    Span,
    /// Anchor; click delegation suppresses its navigation default.
    A,
    Button,
    Input,
    TextArea,
    Select,
    /// `<option>`; named to avoid clashing with `core::option::Option`.
    OptionEl,
    Other,
}

impl Default for Tag {
    fn default() -> Self {
        Tag::Div
    }
}

impl Tag {
    /// Text-entry controls, where stealing focus events or synthesizing
    /// clicks breaks the caret.
    pub fn is_text_entry(self) -> bool {
        matches!(self, Tag::Input | Tag::TextArea)
    }

    /// Form controls excluded from click synthesis (touch and keyboard):
    /// they have native activation behavior of their own.
    pub fn is_form_control(self) -> bool {
        matches!(
            self,
            Tag::Input | Tag::TextArea | Tag::Select | Tag::OptionEl
        )
    }

    /// Native HTML controls: elements whose key handling the browser owns,
    /// so keyboard activation must suppress the default.
    pub fn is_native_control(self) -> bool {
        matches!(
            self,
            Tag::A | Tag::Button | Tag::Input | Tag::TextArea | Tag::Select | Tag::OptionEl
        )
    }

    /// Naturally focusable without a `tabindex` attribute.
    pub fn is_naturally_focusable(self) -> bool {
        matches!(
            self,
            Tag::A | Tag::Button | Tag::Input | Tag::TextArea | Tag::Select
        )
    }
}

/// Data carried by one element: its tag and attribute list.
#[derive(Clone, Debug, Default)]
pub struct Element {
    pub tag: Tag,
    // Elements carry a handful of attributes; a flat pair list keeps this
    // allocation-light and preserves document order.
    attrs: Vec<(String, String)>,
}

impl Element {
    /// Create an element with no attributes.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
        }
    }

    /// Builder-style attribute setter for literal construction.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// The value of `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set `name` to `value`, replacing any existing value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some(entry) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            entry.1.clear();
            entry.1.push_str(value);
        } else {
            self.attrs.push((String::from(name), String::from(value)));
        }
    }

    /// Remove `name` if present.
    pub fn remove_attribute(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| n != name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_set_get_remove() {
        let mut el = Element::new(Tag::Div);
        assert_eq!(el.attribute("jsaction"), None);
        el.set_attribute("jsaction", "click:open");
        assert_eq!(el.attribute("jsaction"), Some("click:open"));
        el.set_attribute("jsaction", "click:close");
        assert_eq!(el.attribute("jsaction"), Some("click:close"));
        el.remove_attribute("jsaction");
        assert_eq!(el.attribute("jsaction"), None);
    }

    #[test]
    fn tag_classification() {
        assert!(Tag::Input.is_text_entry());
        assert!(Tag::TextArea.is_text_entry());
        assert!(!Tag::Select.is_text_entry());

        assert!(Tag::OptionEl.is_form_control());
        assert!(!Tag::Button.is_form_control());

        assert!(Tag::A.is_native_control());
        assert!(Tag::Button.is_native_control());
        assert!(!Tag::Div.is_native_control());

        assert!(Tag::A.is_naturally_focusable());
        assert!(!Tag::OptionEl.is_naturally_focusable());
        assert!(!Tag::Span.is_naturally_focusable());
    }
}
