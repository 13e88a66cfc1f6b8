// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fast-click machine: touch sequences → immediate synthetic clicks.
//!
//! ## Overview
//!
//! Touch browsers historically delay the click that follows `touchend` by
//! ~300 ms. This machine watches the raw touch sequence and, when a
//! `touchstart`/`touchend` pair lands on the same element within the press
//! timeout and slop radius, directs the contract to synthesize an immediate
//! click — then suppresses the emulated mouse cascade
//! (`mousedown`/`mouseup`/`click`) the browser fires afterwards.
//!
//! Two windows are tracked independently, mirroring the state record of the
//! delegation contract this implements: a *pending tap* awaiting its
//! `touchend`, and a *suppression window* anchored at the synthesized click.
//! They overlap when a second tap starts while the first tap's cascade is
//! still being swept.
//!
//! Suppression correlates by coordinates as well as by target: during
//! scrolls and overlay animations the emulated events can land on a
//! different element than the touch, and viewport nearness is the more
//! reliable signal.
//!
//! ## Time
//!
//! The machine never reads a clock. Deadlines are armed from event
//! timestamps and checked lazily against later events; hosts that want
//! eager long-press expiry call [`FastClick::poll`] from any timer they
//! like. An expiry and a `touchend` carrying the same timestamp resolve in
//! favor of the `touchend`, which is the cancel-on-entry ordering the
//! contract requires.

use kurbo::Point;

use crate::types::FastClickTuning;

fn manhattan(a: Point, b: Point) -> f64 {
    fn abs(v: f64) -> f64 {
        if v < 0.0 { -v } else { v }
    }
    abs(a.x - b.x) + abs(a.y - b.y)
}

/// A touch awaiting its `touchend`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PendingTap<K> {
    pub node: K,
    pub point: Point,
    /// Timestamp past which the touch counts as a long press.
    pub deadline: u64,
}

/// The window after a synthesized click during which the emulated mouse
/// cascade is swallowed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SuppressWindow<K> {
    pub node: K,
    pub point: Point,
    pub until: u64,
}

/// What the contract should do with a `touchend`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TouchEndOutcome {
    /// Consume the `touchend` and dispatch a synthetic click in its place.
    Synthesize,
    /// Not a fast click; handle the `touchend` normally.
    PassThrough,
}

/// The machine. One per contract; at most one tap in flight.
#[derive(Clone, Debug)]
pub struct FastClick<K> {
    tuning: FastClickTuning,
    pending: Option<PendingTap<K>>,
    suppressing: Option<SuppressWindow<K>>,
}

impl<K: Copy + Eq> FastClick<K> {
    pub(crate) fn new(tuning: FastClickTuning) -> Self {
        Self {
            tuning,
            pending: None,
            suppressing: None,
        }
    }

    /// The pending tap's long-press deadline, if a tap is in flight.
    pub fn pending_deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// True while the emulated mouse cascade is being swallowed.
    pub fn is_suppressing(&self) -> bool {
        self.suppressing.is_some()
    }

    /// Abandon any in-flight tap.
    pub(crate) fn reset(&mut self) {
        self.pending = None;
    }

    /// Expire a pending tap whose deadline has passed. Returns true if a tap
    /// was abandoned.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.pending {
            Some(p) if now > p.deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// A `touchstart` arrived. Returns true when the touch was captured as a
    /// pending tap (the caller resolves the event action-less).
    ///
    /// Any `touchstart` abandons the previous tap first; multi-touch
    /// disables capture for this event.
    pub(crate) fn on_touchstart(
        &mut self,
        node: K,
        point: Point,
        time_stamp: u64,
        touch_count: u32,
        eligible: bool,
    ) -> bool {
        self.pending = None;
        if touch_count > 1 || !eligible {
            return false;
        }
        self.pending = Some(PendingTap {
            node,
            point,
            deadline: time_stamp.saturating_add(self.tuning.press_timeout_ms),
        });
        true
    }

    /// A `touchmove` arrived. Movement beyond the slop radius abandons the
    /// tap; the event always propagates normally.
    pub(crate) fn on_touchmove(&mut self, point: Point, time_stamp: u64) {
        if self.poll(time_stamp) {
            return;
        }
        if let Some(p) = &self.pending
            && manhattan(p.point, point) > self.tuning.slop_px
        {
            self.pending = None;
        }
    }

    /// A `touchend` arrived. On a completed tap, opens the suppression
    /// window and asks the contract to synthesize.
    pub(crate) fn on_touchend(
        &mut self,
        node: K,
        point: Point,
        time_stamp: u64,
        default_prevented: bool,
    ) -> TouchEndOutcome {
        let Some(p) = self.pending.take() else {
            return TouchEndOutcome::PassThrough;
        };
        if time_stamp > p.deadline {
            // Long press aged out; the timer just never got to say so.
            return TouchEndOutcome::PassThrough;
        }
        if p.node != node || default_prevented || manhattan(p.point, point) > self.tuning.slop_px {
            return TouchEndOutcome::PassThrough;
        }
        self.begin_suppression(node, point, time_stamp);
        TouchEndOutcome::Synthesize
    }

    /// Open a suppression window anchored at `(node, point)`.
    ///
    /// Also the entry point for the `touchend` capability surface: handlers
    /// that run their own touch logic can ask for the cascade to be
    /// swallowed after the fact.
    pub(crate) fn begin_suppression(&mut self, node: K, point: Point, time_stamp: u64) {
        self.suppressing = Some(SuppressWindow {
            node,
            point,
            until: time_stamp.saturating_add(self.tuning.suppress_window_ms),
        });
    }

    /// A capture-phase `mousedown`/`mouseup`/`click` arrived. Returns true
    /// when the event is part of the emulated cascade and must be stopped.
    ///
    /// The synthesized click itself carries a sentinel and is never
    /// swallowed; a swallowed `click` closes the window, and any event
    /// outside it clears the state and passes through.
    pub(crate) fn on_mouse(
        &mut self,
        node: K,
        point: Point,
        time_stamp: u64,
        is_click: bool,
        synthetic: bool,
    ) -> bool {
        if synthetic {
            return false;
        }
        let Some(s) = &self.suppressing else {
            return false;
        };
        let near = node == s.node || manhattan(point, s.point) <= self.tuning.slop_px;
        if time_stamp <= s.until && near {
            if is_click {
                self.suppressing = None;
            }
            true
        } else {
            self.suppressing = None;
            false
        }
    }
}
