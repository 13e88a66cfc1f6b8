// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Well-known event type names.
//!
//! The contract is string-keyed because applications may register arbitrary
//! event types; these constants cover the names the core gives special
//! treatment. The `click` family splits one DOM event type into several
//! semantic ones: a plain click is `click`, a modified click is `clickmod`
//! (so the browser's native modified-click behavior survives delegation),
//! keyboard activation is `clickkey`, and `clickonly` is a binding that opts
//! out of keyboard synthesis.

/// Plain, unmodified click.
pub const CLICK: &str = "click";
/// Click with ctrl/meta/shift/alt or the middle button held.
pub const CLICKMOD: &str = "clickmod";
/// Binding that accepts only real DOM clicks, never keyboard activation.
pub const CLICKONLY: &str = "clickonly";
/// Keyboard activation (Enter/Space) resolved against a `click` binding.
/// Internal; never written in attributes.
pub const CLICKKEY: &str = "clickkey";

pub const FOCUS: &str = "focus";
pub const FOCUSIN: &str = "focusin";
pub const BLUR: &str = "blur";
pub const FOCUSOUT: &str = "focusout";

/// Emulated from `mouseover` with a subtree-exit test.
pub const MOUSEENTER: &str = "mouseenter";
/// Emulated from `mouseout` with a subtree-exit test.
pub const MOUSELEAVE: &str = "mouseleave";
pub const MOUSEOVER: &str = "mouseover";
pub const MOUSEOUT: &str = "mouseout";
pub const MOUSEDOWN: &str = "mousedown";
pub const MOUSEUP: &str = "mouseup";

pub const TOUCHSTART: &str = "touchstart";
pub const TOUCHMOVE: &str = "touchmove";
pub const TOUCHEND: &str = "touchend";

pub const KEYDOWN: &str = "keydown";
pub const KEYPRESS: &str = "keypress";

/// Envelope type for application-defined events; the semantic type rides in
/// the event detail.
pub const CUSTOM: &str = "custom";

/// True for the four focus-family event types.
pub fn is_focus_family(event_type: &str) -> bool {
    matches!(event_type, FOCUS | FOCUSIN | BLUR | FOCUSOUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_family_membership() {
        assert!(is_focus_family(FOCUS));
        assert!(is_focus_family(FOCUSOUT));
        assert!(!is_focus_family(CLICK));
        assert!(!is_focus_family(MOUSEOVER));
    }
}
