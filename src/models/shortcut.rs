//! Canonical shortcut values with string parsing and serialization.
//!
//! A [`ShortcutValue`] holds at most one keystroke (key plus modifier mask).
//! All comparisons go through the canonical string form, so two values that
//! mean the same physical combination are equal regardless of how they were
//! produced (raw key event, saved settings string, user input).

use crossterm::event::{KeyCode, KeyModifiers};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Modifiers that participate in shortcuts. Everything else (hyper, caps
/// state flags) is masked off at the boundary.
pub const MODIFIERS_MASK: KeyModifiers = KeyModifiers::SHIFT
    .union(KeyModifiers::CONTROL)
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::META);

/// Folds `SUPER` into `META` and masks to the shortcut-relevant modifiers.
///
/// Terminals report the platform command/windows key inconsistently; both
/// spellings mean the same binding here.
#[must_use]
pub fn normalize_modifiers(mods: KeyModifiers) -> KeyModifiers {
    let mut out = mods & MODIFIERS_MASK;
    if mods.contains(KeyModifiers::SUPER) {
        out |= KeyModifiers::META;
    }
    out
}

/// A single key plus modifier mask, already canonicalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    /// The non-modifier key.
    pub code: KeyCode,
    /// Modifier mask (subset of [`MODIFIERS_MASK`]).
    pub mods: KeyModifiers,
}

/// An ordered sequence of at most one keystroke, or empty.
///
/// Parsing never fails: unparseable text yields the empty value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutValue {
    stroke: Option<Keystroke>,
}

impl ShortcutValue {
    /// The empty shortcut (no binding).
    #[must_use]
    pub const fn empty() -> Self {
        Self { stroke: None }
    }

    /// Builds a shortcut from a raw key event, applying canonicalization:
    ///
    /// - `Shift+Backtab` is rewritten to `Shift+Tab`;
    /// - Shift is stripped for keys in the punctuation range where Shift is
    ///   already needed to produce the character on common keyboards;
    /// - keys with no canonical name yield the empty value.
    #[must_use]
    pub fn from_key(code: KeyCode, mods: KeyModifiers) -> Self {
        let mods = normalize_modifiers(mods);
        let (code, mods) = canonicalize(code, mods);
        if key_name(code).is_none() {
            return Self::empty();
        }
        Self {
            stroke: Some(Keystroke { code, mods }),
        }
    }

    /// Parses a shortcut from its string form (e.g. `"Ctrl+Shift+B"`).
    ///
    /// Unrecognized text yields the empty value; parsing never fails.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::empty();
        }

        // The separator is itself a bindable key: a lone "+", or a trailing
        // "++" after the modifier list, means the plus key.
        if let Some(mods_text) = text
            .strip_suffix("++")
            .or_else(|| (text == "+").then_some(""))
        {
            let mut mods = KeyModifiers::NONE;
            for token in mods_text.split('+').map(str::trim).filter(|t| !t.is_empty()) {
                match parse_modifier(token) {
                    Some(m) => mods |= m,
                    None => return Self::empty(),
                }
            }
            return Self::from_key(KeyCode::Char('+'), mods);
        }

        let mut mods = KeyModifiers::NONE;
        let mut key: Option<KeyCode> = None;

        let tokens: Vec<&str> = text.split('+').map(str::trim).collect();
        let last = tokens.len() - 1;
        for (i, token) in tokens.iter().enumerate() {
            if i < last {
                match parse_modifier(token) {
                    Some(m) => mods |= m,
                    None => return Self::empty(),
                }
            } else {
                key = parse_key(token);
            }
        }

        match key {
            Some(code) => Self::from_key(code, mods),
            None => Self::empty(),
        }
    }

    /// True if no keystroke is bound.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stroke.is_none()
    }

    /// The bound keystroke, if any.
    #[must_use]
    pub const fn keystroke(&self) -> Option<Keystroke> {
        self.stroke
    }

    /// Canonical string form: modifiers in Ctrl, Alt, Shift, Meta order,
    /// then the key name. Empty shortcut renders as the empty string.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        let Some(stroke) = self.stroke else {
            return String::new();
        };
        let mut parts: Vec<&str> = Vec::with_capacity(5);
        if stroke.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if stroke.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if stroke.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }
        if stroke.mods.contains(KeyModifiers::META) {
            parts.push("Meta");
        }
        let name = key_name(stroke.code).unwrap_or_default();
        let mut out = parts.join("+");
        if !out.is_empty() {
            out.push('+');
        }
        out.push_str(&name);
        out
    }
}

impl fmt::Display for ShortcutValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

// Equality is defined on the canonical string form, not on the raw
// representation, so two spellings of the same combo compare equal.
impl PartialEq for ShortcutValue {
    fn eq(&self, other: &Self) -> bool {
        self.to_canonical_string() == other.to_canonical_string()
    }
}

impl Eq for ShortcutValue {}

impl Hash for ShortcutValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_canonical_string().hash(state);
    }
}

/// Applies the canonicalization rules for a raw key/modifier pair.
fn canonicalize(code: KeyCode, mods: KeyModifiers) -> (KeyCode, KeyModifiers) {
    // Shift+Backtab means Shift+Tab.
    if code == KeyCode::BackTab && mods.contains(KeyModifiers::SHIFT) {
        return (KeyCode::Tab, mods);
    }

    if let KeyCode::Char(c) = code {
        let c = c.to_ascii_uppercase();
        // Keys in the punctuation range need Shift to type on common
        // layouts, so a stored Shift bit is redundant/ambiguous. Ranges
        // match the original rule exactly: '!'..='@' and the codes above
        // 'Z' up to 0xFF (letters are uppercased first, keeping A-Z out).
        let n = c as u32;
        let shift_redundant = ('!'..='@').contains(&c) || (n > 'Z' as u32 && n <= 0xFF);
        let mods = if shift_redundant {
            mods & !KeyModifiers::SHIFT
        } else {
            mods
        };
        return (KeyCode::Char(c), mods);
    }

    (code, mods)
}

/// Canonical display name for a key, or `None` for keys that cannot appear
/// in a shortcut (modifiers, media keys, `Null`).
fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Backtab".to_string(),
        KeyCode::Enter => "Return".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Insert => "Ins".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDown".to_string(),
        _ => return None,
    };
    Some(name)
}

fn parse_modifier(token: &str) -> Option<KeyModifiers> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(KeyModifiers::CONTROL),
        "alt" | "opt" | "option" => Some(KeyModifiers::ALT),
        "shift" => Some(KeyModifiers::SHIFT),
        "meta" | "cmd" | "super" | "win" => Some(KeyModifiers::META),
        _ => None,
    }
}

fn parse_key(token: &str) -> Option<KeyCode> {
    if token.is_empty() {
        return None;
    }
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_uppercase()));
    }

    // F1..F24
    if let Some(rest) = token.strip_prefix(['F', 'f']) {
        if let Ok(n) = rest.parse::<u8>() {
            if (1..=24).contains(&n) {
                return Some(KeyCode::F(n));
            }
        }
    }

    let code = match token.to_ascii_lowercase().as_str() {
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "return" | "enter" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "del" | "delete" => KeyCode::Delete,
        "ins" | "insert" => KeyCode::Insert,
        "esc" | "escape" => KeyCode::Esc,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdown" | "pagedown" => KeyCode::PageDown,
        _ => return None,
    };
    Some(code)
}
