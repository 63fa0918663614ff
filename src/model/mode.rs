//! Interaction modes and the pointer affordances they suggest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a mode name is not one of the known modes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown interaction mode '{0}'")]
pub struct ParseModeError(pub String);

/// What pointer input does on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Drag to draw new boxes.
    #[default]
    Create,
    /// Click to select, drag to move.
    Edit,
    /// Click a box to remove it.
    Delete,
}

impl InteractionMode {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionMode::Create => "create",
            InteractionMode::Edit => "edit",
            InteractionMode::Delete => "delete",
        }
    }

    pub fn all() -> &'static [InteractionMode] {
        &[
            InteractionMode::Create,
            InteractionMode::Edit,
            InteractionMode::Delete,
        ]
    }

    /// Cursor suggested while idle in this mode.
    pub fn cursor_hint(&self) -> CursorHint {
        match self {
            InteractionMode::Create => CursorHint::Crosshair,
            InteractionMode::Edit => CursorHint::Default,
            InteractionMode::Delete => CursorHint::Pointer,
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InteractionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(InteractionMode::Create),
            "edit" => Ok(InteractionMode::Edit),
            "delete" => Ok(InteractionMode::Delete),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Advisory pointer affordance for the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Crosshair,
    Move,
    Pointer,
}

impl CursorHint {
    /// CSS `cursor` value.
    pub fn css(&self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Crosshair => "crosshair",
            CursorHint::Move => "move",
            CursorHint::Pointer => "pointer",
        }
    }
}
