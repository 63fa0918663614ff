use serde::{Deserialize, Serialize};

/// A position in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Input events the annotator responds to.
///
/// Hosts translate their native events into these, already converted to
/// surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer button pressed.
    PointerDown {
        button: MouseButton,
        position: Point,
    },
    /// Pointer moved, with or without a button held.
    PointerMove { position: Point },
    /// Pointer button released.
    PointerUp {
        button: MouseButton,
        position: Point,
    },
    /// Pointer left the surface.
    PointerLeave { position: Point },
    /// Touch event. For `Start`/`Move` `touches` holds the active touches;
    /// for `End`/`Cancel` it holds the touches that were lifted.
    Touch {
        phase: TouchPhase,
        touches: Vec<TouchPoint>,
    },
    /// Keyboard key pressed.
    KeyPressed { key: Key, modifiers: Modifiers },
}

impl Event {
    /// Translate a touch event into the pointer event it stands for.
    ///
    /// Only single-touch gestures map to pointer input; anything with more
    /// (or fewer) than one touch point yields `None`.
    pub fn touch_as_pointer(phase: TouchPhase, touches: &[TouchPoint]) -> Option<Event> {
        let [touch] = touches else {
            return None;
        };
        let position = touch.position;
        Some(match phase {
            TouchPhase::Start => Event::PointerDown {
                button: MouseButton::Left,
                position,
            },
            TouchPhase::Move => Event::PointerMove { position },
            TouchPhase::End | TouchPhase::Cancel => Event::PointerUp {
                button: MouseButton::Left,
                position,
            },
        })
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            n => MouseButton::Other(n.max(0) as u16),
        }
    }
}

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub position: Point,
}

/// Keyboard keys (the subset the annotator binds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` string. Unknown names yield `None`.
    pub fn from_dom(key: &str) -> Option<Self> {
        let key = match key {
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Delete" | "Del" => Key::Delete,
            "Tab" => Key::Tab,
            " " | "Spacebar" => Key::Space,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Compare keys, ignoring letter case for character keys.
    pub fn matches(&self, other: &Key) -> bool {
        match (self, other) {
            (Key::Char(a), Key::Char(b)) => a.to_ascii_lowercase() == b.to_ascii_lowercase(),
            (a, b) => a == b,
        }
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}
