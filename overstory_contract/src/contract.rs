// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract: container registration, delegated handling, queueing, and
//! the dispatcher seam.
//!
//! ## Overview
//!
//! A [`Contract`] binds registered event types to a set of container
//! elements. The host feeds raw events to [`Contract::deliver`]; the
//! contract finds the containers the event bubbles through, runs the
//! matching delegated handler on each, and surfaces [`EventRecord`]s —
//! either to the attached [`Dispatcher`], or into a queue that is drained
//! once, as a batch, when a dispatcher attaches.
//!
//! ## Containers and nesting
//!
//! With stop-propagation on (the default), every container carries
//! handlers; the innermost container stops the bubble, so nesting is
//! harmless. With it off, the contract re-partitions containers on every
//! add/remove so that at most one container per subtree carries handlers —
//! otherwise one event would dispatch twice.
//!
//! ## Never throws
//!
//! Every public operation is infallible: stale handles, malformed
//! attributes, and missing detail types all degrade to "the contract was
//! not present", never to a panic into the host's event loop.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use overstory_actions::{names, ActionCache, ActionMap, MapId};

use crate::classify;
use crate::containers::{ContainerId, ContainerRegistry, InstalledListener, ListenerId};
use crate::fast_click::{FastClick, TouchEndOutcome};
use crate::namespace::{self, NamespaceCache};
use crate::types::{
    ContractFlags, ContractSettings, DispatchScope, Dispatcher, DomLookup, EventRecord,
    HostEffects, Quirks, RawEvent, ATTR_ACTIONS,
};
use crate::walker;

/// How an element's actions are bound: the shared interned map, or a
/// private namespace-qualified clone. The shared map is never mutated.
#[derive(Clone, Debug)]
enum Binding {
    Shared(MapId),
    Qualified(ActionMap),
}

/// One registered (semantic name, raw type) pair. The registration list is
/// the installer: it is replayed onto every container that becomes active.
#[derive(Clone, Debug, PartialEq, Eq)]
struct EventBinding {
    name: String,
    raw: String,
}

/// Token for an installed handler, reusable by replay code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerRef {
    name: String,
}

struct Resolved<K> {
    action: String,
    element: K,
    event_type: String,
}

/// The event-delegation contract. See the [module docs](self).
pub struct Contract<K, M = ()> {
    settings: ContractSettings,
    actions: ActionCache,
    // Per-element caches, keyed by node identity. Generational node ids
    // make node replacement invalidate these for free.
    bindings: BTreeMap<K, Binding>,
    namespaces: NamespaceCache<K>,
    registry: ContainerRegistry<K>,
    events: Vec<EventBinding>,
    sweepers_installed: bool,
    fast_click: FastClick<K>,
    queue: Option<Vec<EventRecord<K, M>>>,
    dispatcher: Option<Box<dyn Dispatcher<K, M>>>,
    next_listener: u32,
}

impl<K: core::fmt::Debug + Copy + Ord, M> core::fmt::Debug for Contract<K, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Contract")
            .field("settings", &self.settings)
            .field("events", &self.events.len())
            .field("containers", &self.registry.len())
            .field("queued", &self.queue.as_ref().map(Vec::len))
            .field("dispatcher", &self.dispatcher.is_some())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Ord, M: Clone> Default for Contract<K, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Ord, M: Clone> Contract<K, M> {
    /// A contract with default settings (stop-propagation only).
    pub fn new() -> Self {
        Self::with_settings(ContractSettings::default())
    }

    pub fn with_settings(settings: ContractSettings) -> Self {
        Self {
            settings,
            actions: ActionCache::new(),
            bindings: BTreeMap::new(),
            namespaces: NamespaceCache::new(),
            registry: ContainerRegistry::new(),
            events: Vec::new(),
            sweepers_installed: false,
            fast_click: FastClick::new(settings.fast_click),
            queue: Some(Vec::new()),
            dispatcher: None,
            next_listener: 0,
        }
    }

    pub fn settings(&self) -> &ContractSettings {
        &self.settings
    }

    /// The parser cache, exposed for inspection.
    pub fn actions(&self) -> &ActionCache {
        &self.actions
    }

    /// Change the event type bound by attribute clauses that omit one.
    /// Applies to attributes parsed after the change.
    pub fn set_default_event_type(&mut self, event_type: &str) {
        self.actions.set_default_event_type(event_type);
    }

    /// The fast-click machine, exposed for inspection.
    pub fn fast_click(&self) -> &FastClick<K> {
        &self.fast_click
    }

    /// Expire an aged-out pending tap. Hosts with a timer call this at the
    /// pending deadline; hosts without one rely on the lazy expiry built
    /// into event handling.
    pub fn poll_fast_click(&mut self, now: u64) -> bool {
        self.fast_click.poll(now)
    }

    // --- event registration ---

    /// Register interest in a semantic event type. Idempotent.
    ///
    /// Registering `click` also registers, per enabled features, `keydown`
    /// (keyboard activation), and the touch trio plus the capture-phase
    /// mouse sweepers (fast clicks).
    pub fn add_event(&mut self, name: &str) {
        let flags = self.settings.flags;
        let raw = match name {
            names::MOUSEENTER if flags.contains(ContractFlags::MOUSE_SPECIAL) => names::MOUSEOVER,
            names::MOUSELEAVE if flags.contains(ContractFlags::MOUSE_SPECIAL) => names::MOUSEOUT,
            _ => name,
        };
        self.add_event_as(name, raw);
        if name == names::CLICK {
            if flags.contains(ContractFlags::A11Y_CLICK) {
                self.add_event_as(names::CLICK, names::KEYDOWN);
            }
            if flags.contains(ContractFlags::FAST_CLICK) {
                self.add_event_as(names::TOUCHSTART, names::TOUCHSTART);
                self.add_event_as(names::TOUCHEND, names::TOUCHEND);
                self.add_event_as(names::TOUCHMOVE, names::TOUCHMOVE);
                self.sweepers_installed = true;
            }
        }
    }

    /// Register a semantic event type listening on an explicit raw type.
    pub fn add_event_as(&mut self, name: &str, raw: &str) {
        if self.events.iter().any(|e| e.name == name && e.raw == raw) {
            return;
        }
        let binding = EventBinding {
            name: String::from(name),
            raw: String::from(raw),
        };
        self.events.push(binding.clone());
        // Replay the new registration over every active container.
        for id in self.registry.ids() {
            let Some(e) = self.registry.get_mut(id) else {
                continue;
            };
            if !e.active {
                continue;
            }
            self.next_listener += 1;
            e.installed.push(InstalledListener {
                name: binding.name.clone(),
                raw: binding.raw.clone(),
                id: ListenerId(self.next_listener),
            });
        }
    }

    /// Registered (semantic, raw) pairs, in registration order.
    pub fn registered_events(&self) -> impl Iterator<Item = (&str, &str)> {
        self.events.iter().map(|e| (e.name.as_str(), e.raw.as_str()))
    }

    /// The installed handler for `name`, for reuse by replay code.
    pub fn handler(&self, name: &str) -> Option<HandlerRef> {
        self.events
            .iter()
            .any(|e| e.name == name)
            .then(|| HandlerRef {
                name: String::from(name),
            })
    }

    /// Run an installed handler directly against one container, bypassing
    /// the bubbling simulation. No-op on stale container handles.
    pub fn replay<D: DomLookup<K>>(
        &mut self,
        doc: &D,
        handler: &HandlerRef,
        container: ContainerId,
        raw: &mut RawEvent<K, M>,
    ) -> HostEffects {
        match self.registry.get(container).map(|e| e.root) {
            Some(root) => self.run_handler(doc, &handler.name, root, raw, false),
            None => HostEffects::default(),
        }
    }

    // --- containers ---

    /// Register a container. Returns a handle for later removal.
    pub fn add_container<D: DomLookup<K>>(&mut self, doc: &D, root: K) -> ContainerId {
        let id = self.registry.insert(root);
        if self.settings.flags.contains(ContractFlags::STOP_PROPAGATION) {
            // Nesting is harmless: the inner handler stops the bubble.
            self.install_all_on(id);
        } else {
            self.repartition(doc);
        }
        id
    }

    /// Unregister a container, detaching exactly the listeners it carried.
    pub fn remove_container<D: DomLookup<K>>(&mut self, doc: &D, id: ContainerId) {
        if self.registry.remove(id).is_none() {
            return;
        }
        if !self.settings.flags.contains(ContractFlags::STOP_PROPAGATION) {
            self.repartition(doc);
        }
    }

    pub fn container_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_container_active(&self, id: ContainerId) -> bool {
        self.registry.get(id).is_some_and(|e| e.active)
    }

    /// Listeners currently installed on a container; `None` for stale
    /// handles.
    pub fn container_listeners(&self, id: ContainerId) -> Option<&[InstalledListener]> {
        self.registry.get(id).map(|e| e.installed.as_slice())
    }

    /// Roots of containers currently carrying listeners, in slot order.
    pub fn active_roots(&self) -> Vec<K> {
        self.registry
            .iter()
            .filter(|(_, e)| e.active)
            .map(|(_, e)| e.root)
            .collect()
    }

    /// Active container roots that still need the iOS pointer-cursor patch;
    /// marks them patched. Empty unless the quirk is configured.
    pub fn take_cursor_patches(&mut self) -> Vec<K> {
        if !self.settings.quirks.contains(Quirks::IOS_BUBBLE) {
            return Vec::new();
        }
        let mut out = Vec::new();
        for id in self.registry.ids() {
            if let Some(e) = self.registry.get_mut(id)
                && e.active
                && !e.cursor_patched
            {
                e.cursor_patched = true;
                out.push(e.root);
            }
        }
        out
    }

    // --- dispatcher and queue ---

    /// Attach the dispatcher. If records were queued, the dispatcher
    /// receives the whole backlog as one batch, once; the queue is then
    /// discarded and all further events dispatch live.
    pub fn dispatch_to(&mut self, mut dispatcher: Box<dyn Dispatcher<K, M>>) {
        if let Some(queued) = self.queue.take()
            && !queued.is_empty()
        {
            dispatcher.dispatch(&queued, DispatchScope::Replay);
        }
        self.dispatcher = Some(dispatcher);
    }

    /// The pre-dispatcher queue; `None` once a dispatcher has attached.
    pub fn queued(&self) -> Option<&[EventRecord<K, M>]> {
        self.queue.as_deref()
    }

    /// Ask for the emulated mouse cascade following a delivered `touchend`
    /// to be suppressed. Only records carrying the capability qualify.
    pub fn suppress_mouse_cascade(&mut self, record: &EventRecord<K, M>) -> bool {
        if !record.event.can_prevent_mouse_events {
            return false;
        }
        self.fast_click
            .begin_suppression(record.event.target, record.event.point, record.time_stamp);
        true
    }

    // --- delivery ---

    /// Route one raw event through the contract, the way a bubbling DOM
    /// event would reach delegated listeners: capture-phase sweepers first,
    /// then each active container on the target's ancestor chain, innermost
    /// first, until the bubble is stopped.
    ///
    /// Returns side effects for the host to apply.
    pub fn deliver<D: DomLookup<K>>(&mut self, doc: &D, raw: &mut RawEvent<K, M>) -> HostEffects {
        let mut effects = HostEffects::default();
        let fast = self.settings.flags.contains(ContractFlags::FAST_CLICK);

        // Document-level capture phase: the suppression sweeper sees mouse
        // events before any container does.
        if fast
            && self.sweepers_installed
            && matches!(
                raw.event_type.as_str(),
                names::MOUSEDOWN | names::MOUSEUP | names::CLICK
            )
        {
            let is_click = raw.event_type == names::CLICK;
            if self.fast_click.on_mouse(
                raw.target,
                raw.point,
                raw.time_stamp,
                is_click,
                raw.synthetic_click,
            ) {
                raw.stop_propagation();
                raw.prevent_default();
                return effects;
            }
        }

        let chain = self.container_chain(doc, raw.target);
        if chain.is_empty() {
            return effects;
        }

        let mut force_ignore = false;
        if fast && self.sweepers_installed && !raw.synthetic_click {
            match raw.event_type.as_str() {
                names::TOUCHSTART => {
                    let boundary = chain[0].1;
                    let eligible = self.fast_click_eligible(doc, raw.target, boundary);
                    if self.fast_click.on_touchstart(
                        raw.target,
                        raw.point,
                        raw.time_stamp,
                        raw.touch_count,
                        eligible,
                    ) {
                        // Mid-sequence: the walk is aborted and the event
                        // resolves action-less.
                        force_ignore = true;
                    }
                }
                names::TOUCHMOVE => self.fast_click.on_touchmove(raw.point, raw.time_stamp),
                names::TOUCHEND => {
                    let outcome = self.fast_click.on_touchend(
                        raw.target,
                        raw.point,
                        raw.time_stamp,
                        raw.default_prevented,
                    );
                    if outcome == TouchEndOutcome::Synthesize {
                        raw.stop_propagation();
                        raw.prevent_default();
                        // Host event objects are immutable; the click is a
                        // fresh event built from the touchend, tagged so
                        // the sweeper lets it pass.
                        let mut synth: RawEvent<K, M> = RawEvent {
                            point: raw.point,
                            time_stamp: raw.time_stamp,
                            synthetic_click: true,
                            ..RawEvent::new(names::CLICK, raw.target)
                        };
                        effects.merge(self.deliver(doc, &mut synth));
                        if !synth.default_prevented {
                            effects.merge(HostEffects {
                                blur_active_input: true,
                                clear_selection: true,
                            });
                        }
                        return effects;
                    }
                }
                _ => {}
            }
        }

        for (id, root) in chain {
            let handlers: Vec<String> = match self.registry.get(id) {
                Some(e) => e
                    .installed
                    .iter()
                    .filter(|l| l.raw == raw.event_type)
                    .map(|l| l.name.clone())
                    .collect(),
                None => continue,
            };
            for name in handlers {
                effects.merge(self.run_handler(doc, &name, root, raw, force_ignore));
            }
            if raw.propagation_stopped {
                break;
            }
        }
        effects
    }

    // --- internals ---

    /// Active containers the event bubbles through: innermost first.
    fn container_chain<D: DomLookup<K>>(&self, doc: &D, target: K) -> Vec<(ContainerId, K)> {
        let mut out = Vec::new();
        let mut cur = Some(target);
        while let Some(node) = cur {
            for (id, e) in self.registry.iter() {
                if e.active && e.root == node {
                    out.push((id, node));
                }
            }
            cur = doc.parent_of(&node);
        }
        out
    }

    fn install_all_on(&mut self, id: ContainerId) {
        let bindings = self.events.clone();
        let Some(e) = self.registry.get_mut(id) else {
            return;
        };
        e.active = true;
        for b in bindings {
            self.next_listener += 1;
            e.installed.push(InstalledListener {
                name: b.name,
                raw: b.raw,
                id: ListenerId(self.next_listener),
            });
        }
    }

    /// Re-partition containers into active and nested so no active
    /// container contains another. Ancestors win; newly nested containers
    /// lose all listeners, newly active ones get the full installer replay.
    fn repartition<D: DomLookup<K>>(&mut self, doc: &D) {
        let live: Vec<(ContainerId, K)> = self
            .registry
            .iter()
            .map(|(id, e)| (id, e.root))
            .collect();
        for (id, root) in &live {
            let nested = live
                .iter()
                .any(|(other, oroot)| other != id && is_strict_ancestor(doc, *oroot, *root));
            let currently = self.registry.get(*id).is_some_and(|e| e.active);
            if nested && currently {
                if let Some(e) = self.registry.get_mut(*id) {
                    e.active = false;
                    e.installed.clear();
                }
            } else if !nested && !currently {
                self.install_all_on(*id);
            }
        }
    }

    /// The delegated handler for one semantic event type on one container.
    fn run_handler<D: DomLookup<K>>(
        &mut self,
        doc: &D,
        name: &str,
        container: K,
        raw: &mut RawEvent<K, M>,
        force_ignore: bool,
    ) -> HostEffects {
        let effects = HostEffects::default();
        let flags = self.settings.flags;

        // Custom events dispatch on their detail type; absence drops the
        // event silently.
        let owned_inner;
        let name: &str = if name == names::CUSTOM && flags.contains(ContractFlags::CUSTOM_EVENTS) {
            match raw.detail.as_ref().and_then(|d| d.event_type.clone()) {
                Some(inner) => {
                    owned_inner = inner;
                    owned_inner.as_str()
                }
                None => return effects,
            }
        } else {
            name
        };

        let Some(classified) = classify::classify(doc, name, raw, flags) else {
            return effects;
        };

        let resolved = if force_ignore {
            None
        } else {
            self.resolve_action(doc, &classified.event_type, raw, container)
        };

        // The record's timestamp is captured here, once, and preserved
        // across any later resolution restart.
        let mut event = raw.clone();
        let record_type = resolved
            .as_ref()
            .map(|r| r.event_type.clone())
            .unwrap_or_else(|| classified.event_type.clone());
        if matches!(record_type.as_str(), names::MOUSEENTER | names::MOUSELEAVE) {
            // Two semantic handlers may observe the same raw over/out
            // event, so each record carries its own retargeted copy.
            event.event_type = record_type.clone();
            if let Some(r) = &resolved {
                event.target = r.element;
            }
        }
        if raw.event_type == names::TOUCHEND {
            event.can_prevent_mouse_events = true;
        }
        let record = EventRecord {
            event_type: record_type,
            target: raw.target,
            action: resolved.as_ref().map(|r| r.action.clone()),
            action_element: resolved.as_ref().map(|r| r.element),
            time_stamp: raw.time_stamp,
            event,
        };

        if self.dispatcher.is_some() {
            // Dispatch-wide listeners observe every event, matched or not.
            let mut global = record.clone();
            global.action = None;
            global.action_element = None;
            if global.event_type == names::CLICKONLY {
                global.event_type = String::from(names::CLICK);
            }
            self.dispatch_one(global, DispatchScope::Global);
            if record.action_element.is_some() {
                self.dispatch_one(record, DispatchScope::Matched);
            }
        } else if record.action_element.is_some() {
            // The record owns a copy of the event; the host's original is
            // dead after this turn.
            if let Some(q) = self.queue.as_mut() {
                q.push(record);
            }
        }

        if flags.contains(ContractFlags::STOP_PROPAGATION) {
            // Stopping focus events at the container breaks the caret in
            // Gecko text entries.
            let caret_quirk = self.settings.quirks.contains(Quirks::GECKO_FOCUS)
                && names::is_focus_family(&raw.event_type)
                && doc.is_text_entry(&raw.target);
            if !caret_quirk {
                raw.stop_propagation();
            }
        }

        if let Some(r) = &resolved {
            // Matched plain clicks suppress anchor navigation; modified
            // clicks stay native so new-tab clicks keep working.
            if doc.is_anchor(&r.element)
                && matches!(
                    classified.event_type.as_str(),
                    names::CLICK | names::CLICKMOD
                )
            {
                raw.prevent_default();
            }
            if classified.event_type == names::CLICKKEY && classified.prevent_on_match {
                raw.prevent_default();
            }
        }
        effects
    }

    fn resolve_action<D: DomLookup<K>>(
        &mut self,
        doc: &D,
        event_type: &str,
        raw: &RawEvent<K, M>,
        container: K,
    ) -> Option<Resolved<K>> {
        let use_path = self.settings.flags.contains(ContractFlags::USE_EVENT_PATH);
        let chain = walker::walk_chain(doc, raw.target, container, raw.path.as_deref(), use_path);
        for node in chain {
            let matched = {
                let map = self.bound_map(doc, node, container);
                walker::match_binding(map, event_type).map(|(a, t)| (String::from(a), t))
            };
            let Some((action, recorded_as)) = matched else {
                continue;
            };
            // Enter/leave only fire when the pointer actually crossed this
            // element's subtree boundary.
            if matches!(event_type, names::MOUSEENTER | names::MOUSELEAVE)
                && let Some(related) = raw.related_target
                && walker::contains(doc, node, related)
            {
                continue;
            }
            let event_type = recorded_as
                .map(String::from)
                .unwrap_or_else(|| String::from(event_type));
            return Some(Resolved {
                action,
                element: node,
                event_type,
            });
        }
        None
    }

    /// The action map bound to `node`, parsing and (if enabled) qualifying
    /// on first sight. The binding is memoized per node instance.
    fn bound_map<D: DomLookup<K>>(&mut self, doc: &D, node: K, container: K) -> &ActionMap {
        if !self.bindings.contains_key(&node) {
            let id = match doc.attribute(&node, ATTR_ACTIONS) {
                Some(raw_attr) => self.actions.intern(raw_attr),
                None => MapId::EMPTY,
            };
            let binding = if id != MapId::EMPTY
                && self.settings.flags.contains(ContractFlags::NAMESPACES)
            {
                // Qualification works on a clone; the shared interned map
                // stays unqualified.
                let entries: Vec<(String, String)> = self
                    .actions
                    .map(id)
                    .iter()
                    .map(|(t, a)| (String::from(t), String::from(a)))
                    .collect();
                let mut qualified = ActionMap::new();
                for (event_type, action) in entries {
                    let action =
                        namespace::resolve(&mut self.namespaces, doc, &action, node, container);
                    qualified.set(&event_type, &action);
                }
                Binding::Qualified(qualified)
            } else {
                Binding::Shared(id)
            };
            self.bindings.insert(node, binding);
        }
        match self.bindings.get(&node) {
            Some(Binding::Shared(id)) => self.actions.map(*id),
            Some(Binding::Qualified(map)) => map,
            None => self.actions.map(MapId::EMPTY),
        }
    }

    /// A touch is fast-click eligible when its target is no form control
    /// and the action that would handle the click declares no touch
    /// bindings of its own.
    fn fast_click_eligible<D: DomLookup<K>>(&mut self, doc: &D, target: K, container: K) -> bool {
        if doc.is_form_control(&target) || doc.is_text_entry(&target) {
            return false;
        }
        let chain = walker::walk_chain(doc, target, container, None, false);
        for node in chain {
            let map = self.bound_map(doc, node, container);
            if map.get(names::TOUCHSTART).is_some() || map.get(names::TOUCHEND).is_some() {
                return false;
            }
            if map.get(names::CLICK).is_some() || map.get(names::CLICKONLY).is_some() {
                return true;
            }
        }
        false
    }

    fn dispatch_one(&mut self, record: EventRecord<K, M>, scope: DispatchScope) {
        if let Some(d) = self.dispatcher.as_mut() {
            let batch = [record];
            d.dispatch(&batch, scope);
        }
    }
}

fn is_strict_ancestor<K: Copy + Eq, D: DomLookup<K>>(doc: &D, ancestor: K, node: K) -> bool {
    match doc.parent_of(&node) {
        Some(p) => walker::contains(doc, ancestor, p),
        None => false,
    }
}
