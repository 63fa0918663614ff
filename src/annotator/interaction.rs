//! Pointer and keyboard handling.
//!
//! Every handler takes the drag state out of the annotator before acting on
//! it, so no exit path can leave a drag active by accident.

use urchin_canvas::{Event, Key, Modifiers, MouseButton, Point, Surface};

use super::Annotator;
use crate::keybindings::KeyAction;
use crate::model::{BoundingBox, CursorHint, InteractionMode};

/// Pointer drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No button held.
    #[default]
    Idle,
    /// Drawing a new box from `start` to the live `current` point.
    Creating { start: Point, current: Point },
    /// Moving the box at `index`. `origin` is the box as it was when the drag
    /// began and `grab` the pointer position at that moment.
    Moving {
        index: usize,
        origin: BoundingBox,
        grab: Point,
    },
}

impl DragState {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::Idle)
    }
}

impl<S: Surface> Annotator<S> {
    /// Dispatch an input event. Returns true when the event was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::PointerDown {
                button: MouseButton::Left,
                position,
            } => {
                self.pointer_down(*position);
                true
            }
            Event::PointerMove { position } => {
                self.pointer_move(*position);
                true
            }
            Event::PointerUp {
                button: MouseButton::Left,
                position,
            } => {
                self.pointer_up(*position);
                true
            }
            Event::PointerDown { .. } | Event::PointerUp { .. } => false,
            Event::PointerLeave { position } => self.pointer_leave(*position),
            Event::Touch { phase, touches } => match Event::touch_as_pointer(*phase, touches) {
                Some(pointer) => self.handle_event(&pointer),
                None => false,
            },
            Event::KeyPressed { key, modifiers } => self.key_pressed(*key, *modifiers),
        }
    }

    /// Primary button pressed at `p`.
    pub fn pointer_down(&mut self, p: Point) {
        // A press while still dragging means the release was never delivered
        if self.drag.is_active() {
            log::debug!("Pointer down during an active drag, finishing it first");
            self.pointer_up(p);
        }

        match self.mode {
            InteractionMode::Create => {
                self.drag = DragState::Creating {
                    start: p,
                    current: p,
                };
            }
            InteractionMode::Edit => {
                match self.find_box_at(p) {
                    Some(index) => {
                        self.selected = Some(index);
                        if self.capabilities.enable_move {
                            if let Some(origin) = self.boxes.get(index).copied() {
                                self.drag = DragState::Moving {
                                    index,
                                    origin,
                                    grab: p,
                                };
                                self.set_cursor(CursorHint::Move);
                            }
                        }
                    }
                    None => self.selected = None,
                }
                self.redraw();
            }
            InteractionMode::Delete => {
                if let Some(index) = self.find_box_at(p) {
                    self.remove_box(index);
                }
            }
        }
    }

    /// Pointer moved to `p`.
    pub fn pointer_move(&mut self, p: Point) {
        match self.drag {
            DragState::Creating { start, .. } => {
                self.drag = DragState::Creating { start, current: p };
                self.redraw();
            }
            DragState::Moving {
                index,
                origin,
                grab,
            } => {
                self.apply_move(index, origin, grab, p);
                self.redraw();
            }
            DragState::Idle => {
                if self.mode == InteractionMode::Edit {
                    let hint = if self.find_box_at(p).is_some() {
                        CursorHint::Move
                    } else {
                        CursorHint::Default
                    };
                    self.set_cursor(hint);
                }
            }
        }
    }

    /// Primary button released at `p`.
    pub fn pointer_up(&mut self, p: Point) {
        match std::mem::take(&mut self.drag) {
            DragState::Idle => {}
            DragState::Creating { start, .. } => self.finish_create(start, p),
            DragState::Moving {
                index,
                origin,
                grab,
            } => {
                self.apply_move(index, origin, grab, p);
                self.set_cursor(CursorHint::Move);

                let moved = self
                    .boxes
                    .get(index)
                    .is_some_and(|current| !current.same_corners(&origin));
                if moved {
                    log::debug!("Moved box {}", index);
                    self.commit();
                    self.redraw();
                    self.notify_changed();
                } else {
                    self.redraw();
                }
            }
        }
    }

    /// Pointer left the surface. An active drag ends as if released at `p`.
    pub fn pointer_leave(&mut self, p: Point) -> bool {
        if !self.drag.is_active() {
            return false;
        }
        self.pointer_up(p);
        true
    }

    /// Keyboard shortcut handling. Returns true when the key did something.
    pub fn key_pressed(&mut self, key: Key, modifiers: Modifiers) -> bool {
        if !self.capabilities.enable_keyboard {
            return false;
        }
        let Some(action) = self.keybindings.action_for(key, modifiers) else {
            return false;
        };

        match action {
            KeyAction::DeleteSelected => self.delete_selected(),
            KeyAction::Undo => self.undo(),
            KeyAction::Redo if self.capabilities.enable_redo => self.redo(),
            KeyAction::Redo => false,
            KeyAction::CancelDrag => {
                let had_drag = self.cancel_drag();
                let had_selection = self.selected.take().is_some();
                if had_drag || had_selection {
                    self.redraw();
                }
                had_drag || had_selection
            }
        }
    }

    /// Abandon the current drag. A box being moved returns to where it started.
    /// Returns true if a drag was active.
    pub(crate) fn cancel_drag(&mut self) -> bool {
        match std::mem::take(&mut self.drag) {
            DragState::Idle => false,
            DragState::Creating { .. } => {
                log::debug!("Create drag cancelled");
                true
            }
            DragState::Moving { index, origin, .. } => {
                if let Some(bbox) = self.boxes.get_mut(index) {
                    *bbox = origin;
                }
                log::debug!("Move of box {} cancelled", index);
                true
            }
        }
    }

    fn finish_create(&mut self, start: Point, end: Point) {
        let min = self.interaction.min_drag_size;
        let width = (end.x - start.x).abs();
        let height = (end.y - start.y).abs();

        if width > min && height > min {
            let bbox = BoundingBox::from_corners(start, end, self.current_class);
            log::debug!(
                "Created {} box ({:.1}, {:.1}) - ({:.1}, {:.1})",
                self.classes.resolve(bbox.class_id).name,
                bbox.x1,
                bbox.y1,
                bbox.x2,
                bbox.y2
            );
            self.boxes.push(bbox);
            self.commit();
            self.redraw();
            self.notify_changed();
        } else {
            log::trace!("Drag of {:.1}x{:.1} treated as a click", width, height);
            self.redraw();
        }
    }

    /// Place the moved box: origin translated by the pointer displacement,
    /// then shifted back inside the surface. With the pointer back at `grab`
    /// the box is exactly `origin`, even when that lies partly off-surface.
    fn apply_move(&mut self, index: usize, origin: BoundingBox, grab: Point, p: Point) {
        let moved = if p == grab {
            origin
        } else {
            let (width, height) = (self.surface.width(), self.surface.height());
            origin
                .translated(p.x - grab.x, p.y - grab.y)
                .clamped_within(width, height)
        };
        if let Some(bbox) = self.boxes.get_mut(index) {
            *bbox = moved;
        }
    }
}
