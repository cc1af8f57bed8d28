//! Key-capture state machine.
//!
//! Converts a raw stream of key press/release events into a canonical
//! [`ShortcutValue`] under ambiguous-input rules. The machine is
//! `Idle -> Recording -> (Committed | Cancelled) -> Idle`; while recording it
//! tracks the physically held modifiers, buffers at most one keystroke, and
//! commits automatically once all modifiers have been released for 600 ms.
//!
//! The gating rules follow long-standing key-sequence-widget conventions: a
//! bare character key is only a valid shortcut when explicitly allowed, but
//! shift plus a navigation key is always accepted.

use crate::constants::IDLE_COMMIT_TIMEOUT;
use crate::models::shortcut::normalize_modifiers;
use crate::models::{ShortcutValue, MODIFIERS_MASK};
use crate::timer::DebounceTimer;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

/// Keys accepted with a bare Shift even when modifierless shortcuts are
/// disallowed. Shift+navigation is conventional and unambiguous.
const SHIFT_WHITELIST: [KeyCode; 7] = [
    KeyCode::Enter,
    KeyCode::Char(' '),
    KeyCode::Tab,
    KeyCode::BackTab,
    KeyCode::Backspace,
    KeyCode::Delete,
    KeyCode::Esc,
];

/// Per-edit recorder turning key events into one committed shortcut.
#[derive(Debug, Clone)]
pub struct KeyCapture {
    allow_modifierless: bool,
    recording: bool,
    /// Pending keystroke while recording; capacity 1.
    buffer: ShortcutValue,
    /// Last committed value, also the value shown while idle.
    committed: ShortcutValue,
    /// Modifiers currently held down, as last reported by the input layer.
    held: KeyModifiers,
    idle_timer: DebounceTimer,
}

impl KeyCapture {
    /// Creates an idle recorder.
    ///
    /// With `allow_modifierless` false, a bare key like `B` is rejected
    /// unless a qualifying modifier or whitelist rule applies.
    #[must_use]
    pub fn new(allow_modifierless: bool) -> Self {
        Self {
            allow_modifierless,
            recording: false,
            buffer: ShortcutValue::empty(),
            committed: ShortcutValue::empty(),
            held: KeyModifiers::NONE,
            idle_timer: DebounceTimer::new(IDLE_COMMIT_TIMEOUT),
        }
    }

    /// Seeds the committed value, e.g. the shortcut being edited.
    pub fn set_value(&mut self, value: ShortcutValue) {
        self.committed = value;
    }

    /// True while listening to key events.
    #[must_use]
    pub const fn is_recording(&self) -> bool {
        self.recording
    }

    /// Whether bare, modifierless keys are accepted.
    #[must_use]
    pub const fn allow_modifierless(&self) -> bool {
        self.allow_modifierless
    }

    /// Changes the modifierless gate for subsequent recordings.
    pub fn set_allow_modifierless(&mut self, allow: bool) {
        self.allow_modifierless = allow;
    }

    /// Enters `Recording`, seeding the held-modifier set with whatever is
    /// already physically down and clearing the pending buffer.
    pub fn start(&mut self, held: KeyModifiers, now: Instant) {
        self.recording = true;
        self.buffer = ShortcutValue::empty();
        self.held = normalize_modifiers(held);
        self.control_timer(now);
    }

    /// Feeds one key event into the recorder. Ignored while idle and for
    /// auto-repeat events.
    pub fn key_event(&mut self, event: &KeyEvent, now: Instant) {
        if !self.recording {
            return;
        }
        match event.kind {
            KeyEventKind::Repeat => {}
            KeyEventKind::Press => self.key_press(event, now),
            KeyEventKind::Release => {
                self.held = normalize_modifiers(event.modifiers);
                self.control_timer(now);
            }
        }
    }

    fn key_press(&mut self, event: &KeyEvent, now: Instant) {
        let mods = normalize_modifiers(event.modifiers);

        // Garbage key codes from the input layer update the modifier
        // display only (InvalidKeyEvent is never fatal).
        if event.code == KeyCode::Null {
            self.held = mods;
            self.control_timer(now);
            return;
        }

        // A modifier key itself is never a keystroke.
        if !matches!(event.code, KeyCode::Modifier(_)) && self.accepts(event.code, mods) {
            // Buffer holds at most one keystroke; extra presses are no-ops.
            if self.buffer.is_empty() {
                self.buffer = ShortcutValue::from_key(event.code, mods);
            }
        }

        self.held = mods;
        self.control_timer(now);
    }

    /// The modifierless gate: a bare text-producing key is accepted only
    /// when allowed, a keystroke is already buffered, a non-shift modifier
    /// is held, the key has no printable text, or bare Shift pairs with a
    /// whitelisted navigation key.
    fn accepts(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.allow_modifierless
            || !self.buffer.is_empty()
            || mods.intersects(MODIFIERS_MASK.difference(KeyModifiers::SHIFT))
            || !produces_text(code)
            || (mods.contains(KeyModifiers::SHIFT) && SHIFT_WHITELIST.contains(&code))
    }

    /// Arms the idle-commit timer when no modifier is held and a keystroke
    /// is buffered; any held modifier (or an empty buffer) stops it.
    fn control_timer(&mut self, now: Instant) {
        if self.held.is_empty() && !self.buffer.is_empty() {
            self.idle_timer.restart(now);
        } else {
            self.idle_timer.stop();
        }
    }

    /// Fires the idle-commit timer if due. Returns true when a commit
    /// happened (the "value changed" signal).
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.recording && self.idle_timer.fire(now) {
            return self.done_recording();
        }
        false
    }

    /// Commits the buffered keystroke and returns to `Idle`. Returns true
    /// exactly once per successful commit; false if not recording.
    pub fn done_recording(&mut self) -> bool {
        if !self.recording {
            return false;
        }
        self.committed = self.buffer;
        self.buffer = ShortcutValue::empty();
        self.recording = false;
        self.held = KeyModifiers::NONE;
        self.idle_timer.stop();
        true
    }

    /// Discards the buffer and returns to `Idle` without signaling.
    /// Called when the capture surface loses context while recording.
    pub fn cancel_recording(&mut self) {
        self.buffer = ShortcutValue::empty();
        self.recording = false;
        self.held = KeyModifiers::NONE;
        self.idle_timer.stop();
    }

    /// The committed value. Recording and reading are mutually exclusive:
    /// querying while still recording commits first.
    pub fn value(&mut self) -> ShortcutValue {
        if self.recording {
            self.done_recording();
        }
        self.committed
    }

    /// Human-readable state for a host UI: the committed value while idle,
    /// or the pending keystroke plus held modifiers while recording.
    #[must_use]
    pub fn display(&self) -> String {
        if !self.recording {
            return self.committed.to_canonical_string();
        }
        let mut s = self.buffer.to_canonical_string();
        if !self.held.is_empty() {
            if !s.is_empty() {
                s.push(',');
            }
            s.push_str(&held_string(self.held));
        } else if s.is_empty() {
            s.push_str("Input");
        }
        s.push_str(" ...");
        s
    }
}

/// Keys that type a character into a text field, and therefore fall under
/// the modifierless gate. Enter, Tab, Backspace, Delete, and Esc all emit
/// control characters; function keys, navigation keys, and the like do not.
fn produces_text(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char(_)
            | KeyCode::Enter
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Esc
    )
}

fn held_string(mods: KeyModifiers) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if mods.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if mods.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }
    if mods.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }
    if mods.contains(KeyModifiers::META) {
        parts.push("Meta");
    }
    parts.join("+")
}
