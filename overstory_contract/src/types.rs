// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the contract: raw events, event records, lookups,
//! dispatchers, and settings.
//!
//! ## Overview
//!
//! These types describe the contract's protocol and its inputs/outputs. A
//! host feeds [`RawEvent`]s in; the contract resolves them against declared
//! actions and surfaces [`EventRecord`]s to a [`Dispatcher`]. The contract
//! never executes actions itself.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

/// Attribute holding an element's action declarations.
pub const ATTR_ACTIONS: &str = "jsaction";
/// Attribute qualifying bare action names on descendants.
pub const ATTR_NAMESPACE: &str = "jsnamespace";

/// DOM `keyCode` for Enter.
pub const KEY_ENTER: u32 = 13;
/// DOM `keyCode` for Space.
pub const KEY_SPACE: u32 = 32;

bitflags::bitflags! {
    /// Modifier state carried by pointer and key events.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CTRL          = 0b0000_0001;
        const ALT           = 0b0000_0010;
        const SHIFT         = 0b0000_0100;
        const META          = 0b0000_1000;
        /// Middle (auxiliary) mouse button.
        const MIDDLE_BUTTON = 0b0001_0000;
    }
}

bitflags::bitflags! {
    /// Contract feature toggles.
    ///
    /// The source system compiled these in; here they are per-contract state
    /// so independent contracts can coexist and tests can exercise both
    /// sides of each toggle.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ContractFlags: u16 {
        /// Walk the event's propagation path instead of parent links when
        /// the event provides one.
        const USE_EVENT_PATH   = 0b0000_0001;
        /// Qualify bare action names through ancestor namespaces.
        const NAMESPACES       = 0b0000_0010;
        /// Treat Enter/Space keydown on focusable elements as clicks.
        const A11Y_CLICK       = 0b0000_0100;
        /// Emulate `mouseenter`/`mouseleave` from over/out.
        const MOUSE_SPECIAL    = 0b0000_1000;
        /// Synthesize immediate clicks from touch sequences.
        const FAST_CLICK       = 0b0001_0000;
        /// Stop propagation of handled events at the container boundary.
        const STOP_PROPAGATION = 0b0010_0000;
        /// Demultiplex application events by their detail type.
        const CUSTOM_EVENTS    = 0b0100_0000;
    }
}

bitflags::bitflags! {
    /// Host platform quirks the contract works around.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Quirks: u8 {
        /// Gecko breaks the caret if focus events on text entries are
        /// stopped at the container.
        const GECKO_FOCUS = 0b0000_0001;
        /// iOS only bubbles through arbitrary elements when they look
        /// clickable; container roots get a pointer cursor.
        const IOS_BUBBLE  = 0b0000_0010;
    }
}

/// Tunable windows for the fast-click machine.
///
/// The defaults are empirical browser behavior, not contract.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FastClickTuning {
    /// How long a touch may rest before it counts as a long press.
    pub press_timeout_ms: u64,
    /// How long after a synthesized click the emulated mouse cascade is
    /// suppressed.
    pub suppress_window_ms: u64,
    /// Manhattan slop, in px, within which touch points correlate.
    pub slop_px: f64,
}

impl Default for FastClickTuning {
    fn default() -> Self {
        Self {
            press_timeout_ms: 400,
            suppress_window_ms: 800,
            slop_px: 4.0,
        }
    }
}

impl Default for ContractFlags {
    fn default() -> Self {
        ContractFlags::STOP_PROPAGATION
    }
}

/// Per-contract configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContractSettings {
    pub flags: ContractFlags,
    pub quirks: Quirks,
    pub fast_click: FastClickTuning,
}

/// Read access to the host's element tree.
///
/// `K` is the host's copyable node handle. The default answers are the
/// conservative ones, so a minimal host only supplies structure and
/// attributes.
pub trait DomLookup<K> {
    /// The structural parent of `node`, or `None` at a root.
    fn parent_of(&self, node: &K) -> Option<K>;

    /// The value of attribute `name` on `node`.
    ///
    /// Removed or otherwise unreadable nodes must answer `None`; the
    /// contract treats that as "no attribute", never as an error.
    fn attribute(&self, node: &K, name: &str) -> Option<&str>;

    /// The logical owner of `node`, if re-parented. Ancestor walks prefer
    /// this link over the structural parent.
    fn owner_of(&self, _node: &K) -> Option<K> {
        None
    }

    /// Anchor elements get their navigation default suppressed on matched
    /// clicks.
    fn is_anchor(&self, _node: &K) -> bool {
        false
    }

    /// Text-entry controls (input, textarea).
    fn is_text_entry(&self, _node: &K) -> bool {
        false
    }

    /// Form controls excluded from click synthesis.
    fn is_form_control(&self, _node: &K) -> bool {
        false
    }

    /// Native controls whose key handling the host owns.
    fn is_native_control(&self, _node: &K) -> bool {
        false
    }

    /// Keyboard-focusable elements (naturally or via `tabindex`).
    fn is_focusable(&self, _node: &K) -> bool {
        false
    }
}

/// Detail payload of an application-defined event.
///
/// `event_type` is the semantic type the contract dispatches on; it is
/// required, and events without one are dropped silently. `payload` is
/// opaque to the contract and rides along into the record.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomDetail<M = ()> {
    pub event_type: Option<String>,
    pub payload: M,
}

/// A host event, the contract's raw input.
///
/// This is the value a browser host builds from a DOM event and a headless
/// host builds directly. Unlike a live DOM event it is a plain owned value,
/// so queueing a record clones it and the clone outlives the dispatch turn.
///
/// Construct with [`RawEvent::new`] and override fields with struct update
/// syntax:
///
/// ```rust
/// use overstory_contract::types::{Modifiers, RawEvent};
///
/// let ev: RawEvent<u32> = RawEvent {
///     modifiers: Modifiers::CTRL,
///     time_stamp: 1_000,
///     ..RawEvent::new("click", 7)
/// };
/// assert!(ev.is_modified());
/// ```
#[derive(Clone, Debug)]
pub struct RawEvent<K, M = ()> {
    /// Host event type name (`"click"`, `"touchstart"`, [`CUSTOM`]).
    ///
    /// [`CUSTOM`]: overstory_actions::names::CUSTOM
    pub event_type: String,
    /// The element the event originated on.
    pub target: K,
    /// For over/out events, the element the pointer came from or went to.
    pub related_target: Option<K>,
    /// Propagation path, target first, when the host can supply one
    /// (composed trees). Consulted only in event-path mode.
    pub path: Option<Vec<K>>,
    /// Viewport position for pointer and touch events.
    pub point: Point,
    pub modifiers: Modifiers,
    /// DOM key code for key events; `0` otherwise.
    pub key_code: u32,
    /// Concurrent touches on the target; more than one disables click
    /// synthesis for this event.
    pub touch_count: u32,
    /// Host clock, in ms. Captured into records at creation because
    /// synthetic events carry broken timestamps in some browsers.
    pub time_stamp: u64,
    /// Application event detail; present only on custom events.
    pub detail: Option<CustomDetail<M>>,
    /// Set when the contract (or host) suppressed the default action.
    pub default_prevented: bool,
    /// Set when the contract stopped the bubble.
    pub propagation_stopped: bool,
    /// Sentinel marking a click synthesized by the fast-click machine, so
    /// the suppression sweeper lets it pass.
    pub synthetic_click: bool,
    /// Capability flag set on delivered `touchend` records; see
    /// [`Contract::suppress_mouse_cascade`](crate::Contract::suppress_mouse_cascade).
    pub can_prevent_mouse_events: bool,
}

impl<K, M> RawEvent<K, M> {
    /// A plain event of `event_type` on `target`; all other fields neutral.
    pub fn new(event_type: &str, target: K) -> Self {
        Self {
            event_type: String::from(event_type),
            target,
            related_target: None,
            path: None,
            point: Point::ZERO,
            modifiers: Modifiers::empty(),
            key_code: 0,
            touch_count: 1,
            time_stamp: 0,
            detail: None,
            default_prevented: false,
            propagation_stopped: false,
            synthetic_click: false,
            can_prevent_mouse_events: false,
        }
    }

    /// Any modifier or the middle button held.
    pub fn is_modified(&self) -> bool {
        !self.modifiers.is_empty()
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// The structured value produced for each intercepted event.
#[derive(Clone, Debug)]
pub struct EventRecord<K, M = ()> {
    /// Semantic event type (`"click"`, `"clickmod"`, `"clickonly"`, …),
    /// distinct from the raw type on [`Self::event`].
    pub event_type: String,
    /// Owned copy of the raw event, alive past the dispatch window.
    pub event: RawEvent<K, M>,
    /// The original event target.
    pub target: K,
    /// Resolved action name; `None` when no ancestor matched.
    pub action: Option<String>,
    /// The ancestor bearing the matched action; `None` when none matched.
    pub action_element: Option<K>,
    /// Captured once at record construction.
    pub time_stamp: u64,
}

/// Why a batch of records is being handed to the dispatcher.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DispatchScope {
    /// The queued backlog, delivered once when the dispatcher attaches.
    Replay,
    /// A live record whose walk matched an action.
    Matched,
    /// The action-less pre-dispatch copy every live event gets, so
    /// dispatch-wide listeners observe unmatched traffic too.
    Global,
}

/// The external component that executes actions.
///
/// On attach it receives the whole queued backlog as one
/// [`Replay`](DispatchScope::Replay) batch; afterwards it receives
/// single-record slices, [`Global`](DispatchScope::Global) copies first,
/// then the [`Matched`](DispatchScope::Matched) record when the walk found
/// one.
pub trait Dispatcher<K, M = ()> {
    fn dispatch(&mut self, records: &[EventRecord<K, M>], scope: DispatchScope);
}

/// Side effects the contract asks its host to apply.
///
/// The contract cannot blur controls or clear selections itself; hosts
/// should apply these defensively and swallow any failure.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HostEffects {
    /// Blur whichever text entry currently holds focus.
    pub blur_active_input: bool,
    /// Clear the host's text selection.
    pub clear_selection: bool,
}

impl HostEffects {
    /// Fold another effect set into this one.
    pub fn merge(&mut self, other: HostEffects) {
        self.blur_active_input |= other.blur_active_input;
        self.clear_selection |= other.clear_selection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_event_defaults_are_neutral() {
        let ev: RawEvent<u32> = RawEvent::new("click", 3);
        assert_eq!(ev.event_type, "click");
        assert_eq!(ev.target, 3);
        assert!(!ev.is_modified());
        assert!(!ev.default_prevented);
        assert!(!ev.propagation_stopped);
        assert!(!ev.synthetic_click);
        assert_eq!(ev.touch_count, 1);
    }

    #[test]
    fn modifier_detection_covers_the_middle_button() {
        let mut ev: RawEvent<u32> = RawEvent::new("click", 1);
        ev.modifiers = Modifiers::MIDDLE_BUTTON;
        assert!(ev.is_modified());
        ev.modifiers = Modifiers::SHIFT | Modifiers::META;
        assert!(ev.is_modified());
    }

    #[test]
    fn default_settings_stop_propagation_only() {
        let s = ContractSettings::default();
        assert_eq!(s.flags, ContractFlags::STOP_PROPAGATION);
        assert!(s.quirks.is_empty());
        assert_eq!(s.fast_click.press_timeout_ms, 400);
        assert_eq!(s.fast_click.suppress_window_ms, 800);
        assert_eq!(s.fast_click.slop_px, 4.0);
    }

    #[test]
    fn host_effects_merge_is_a_union() {
        let mut e = HostEffects::default();
        e.merge(HostEffects {
            blur_active_input: true,
            clear_selection: false,
        });
        e.merge(HostEffects {
            blur_active_input: false,
            clear_selection: true,
        });
        assert!(e.blur_active_input);
        assert!(e.clear_selection);
    }
}
