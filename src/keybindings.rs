//! Keyboard shortcuts for the annotator.
//!
//! Defaults: Delete/Backspace removes the selected box, Ctrl+Z undoes,
//! Ctrl+Y redoes and Escape abandons an in-progress drag. Bindings are
//! serializable so pages can override them through the config file.

use serde::{Deserialize, Serialize};
use urchin_canvas::{Key, Modifiers};

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Remove the selected box
    DeleteSelected,
    /// Step back in history
    Undo,
    /// Step forward in history
    Redo,
    /// Abandon the current drag and clear the selection
    CancelDrag,
}

/// A key plus the modifiers that must be held with it.
///
/// `ctrl` is satisfied by either Ctrl or Cmd, so bindings work on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: Key,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeyChord {
    /// A key with no modifiers.
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    /// A key with Ctrl (or Cmd) held.
    pub const fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            shift: false,
            alt: false,
        }
    }

    /// Check whether a key press triggers this chord.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key.matches(&key)
            && self.ctrl == modifiers.command()
            && self.shift == modifiers.shift
            && self.alt == modifiers.alt
    }
}

/// Keybinding configuration for the annotator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub delete_selected: Vec<KeyChord>,
    pub undo: Vec<KeyChord>,
    pub redo: Vec<KeyChord>,
    pub cancel_drag: Vec<KeyChord>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            delete_selected: vec![KeyChord::plain(Key::Delete), KeyChord::plain(Key::Backspace)],
            undo: vec![KeyChord::ctrl(Key::Char('z'))],
            redo: vec![KeyChord::ctrl(Key::Char('y'))],
            cancel_drag: vec![KeyChord::plain(Key::Escape)],
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for(&self, key: Key, modifiers: Modifiers) -> Option<KeyAction> {
        let hit = |chords: &[KeyChord]| chords.iter().any(|c| c.matches(key, modifiers));

        if hit(&self.delete_selected) {
            Some(KeyAction::DeleteSelected)
        } else if hit(&self.undo) {
            Some(KeyAction::Undo)
        } else if hit(&self.redo) {
            Some(KeyAction::Redo)
        } else if hit(&self.cancel_drag) {
            Some(KeyAction::CancelDrag)
        } else {
            None
        }
    }
}

/// Convert a chord to a display string such as `Ctrl+Z`.
pub fn chord_to_string(chord: &KeyChord) -> String {
    let mut parts: Vec<String> = Vec::new();
    if chord.ctrl {
        parts.push("Ctrl".into());
    }
    if chord.shift {
        parts.push("Shift".into());
    }
    if chord.alt {
        parts.push("Alt".into());
    }
    parts.push(match chord.key {
        Key::Char(c) => c.to_ascii_uppercase().to_string(),
        Key::Enter => "Enter".into(),
        Key::Escape => "Esc".into(),
        Key::Backspace => "Backspace".into(),
        Key::Delete => "Delete".into(),
        Key::Tab => "Tab".into(),
        Key::Space => "Space".into(),
        Key::Up => "Up".into(),
        Key::Down => "Down".into(),
        Key::Left => "Left".into(),
        Key::Right => "Right".into(),
    });
    parts.join("+")
}
