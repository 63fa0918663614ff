//! The interactive bounding-box annotator.
//!
//! An [`Annotator`] owns one drawing surface, the boxes drawn on it and their
//! undo history. Hosts feed it [`Event`](urchin_canvas::Event)s and call the
//! public operations; it redraws the surface after every visible change and
//! fires the change callback after every mutation of the box set.

mod interaction;
mod render;

#[cfg(test)]
mod tests;

pub use interaction::DragState;

use urchin_canvas::{Point, Surface};

use crate::config::{AnnotatorConfig, Capabilities, InteractionSettings, RenderStyle};
use crate::format::{self, FormatError, SkippedLine};
use crate::history::{History, HistoryConfig};
use crate::keybindings::KeyBindings;
use crate::model::{AnnotationSet, BoundingBox, ClassList, CursorHint, InteractionMode};

/// Callback fired after the box set changes.
pub type ChangeCallback = Box<dyn FnMut()>;

/// Callback receiving advisory cursor changes.
pub type CursorCallback = Box<dyn FnMut(CursorHint)>;

/// Outcome of loading normalized label text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    /// Number of boxes now loaded
    pub loaded: usize,
    /// Lines that were dropped
    pub skipped: Vec<SkippedLine>,
}

/// Canvas-style bounding-box annotator.
pub struct Annotator<S: Surface> {
    surface: S,
    background: Option<S::Image>,
    classes: ClassList,
    capabilities: Capabilities,
    interaction: InteractionSettings,
    style: RenderStyle,
    keybindings: KeyBindings,

    boxes: AnnotationSet,
    selected: Option<usize>,
    mode: InteractionMode,
    current_class: u32,
    history: History<AnnotationSet>,
    drag: DragState,
    cursor: CursorHint,

    on_change: Option<ChangeCallback>,
    on_cursor_hint: Option<CursorCallback>,
}

impl<S: Surface> Annotator<S> {
    /// Create an annotator with default settings and the given classes.
    pub fn new(surface: S, classes: ClassList) -> Self {
        Self::with_config(surface, &AnnotatorConfig::new().with_classes(classes))
    }

    /// Create an annotator from a full configuration.
    pub fn with_config(surface: S, config: &AnnotatorConfig) -> Self {
        let mut history = History::with_config(HistoryConfig {
            max_depth: config.interaction.max_history,
        });
        history.reset(AnnotationSet::new());

        Self {
            surface,
            background: None,
            classes: config.classes.clone(),
            capabilities: config.capabilities,
            interaction: config.interaction,
            style: config.style.clone(),
            keybindings: config.keybindings.clone(),
            boxes: AnnotationSet::new(),
            selected: None,
            mode: config.initial_mode,
            current_class: 0,
            history,
            drag: DragState::Idle,
            cursor: config.initial_mode.cursor_hint(),
            on_change: None,
            on_cursor_hint: None,
        }
    }

    /// Attach the background image drawn beneath the boxes.
    pub fn with_background(mut self, image: S::Image) -> Self {
        self.background = Some(image);
        self
    }

    /// Replace (or remove) the background image and redraw.
    pub fn set_background(&mut self, image: Option<S::Image>) {
        self.background = image;
        self.redraw();
    }

    /// Register the callback fired after every change to the box set.
    pub fn on_annotations_changed(&mut self, callback: impl FnMut() + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Register the callback receiving cursor affordance hints.
    pub fn on_cursor_hint(&mut self, callback: impl FnMut(CursorHint) + 'static) {
        self.on_cursor_hint = Some(Box::new(callback));
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn boxes(&self) -> &AnnotationSet {
        &self.boxes
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_box(&self) -> Option<&BoundingBox> {
        self.selected.and_then(|i| self.boxes.get(i))
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn current_class(&self) -> u32 {
        self.current_class
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn cursor_hint(&self) -> CursorHint {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of snapshots in the history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Position of the live state within the history.
    pub fn history_cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // ========================================================================
    // Mode and class
    // ========================================================================

    /// Switch interaction mode. Cancels any drag, clears the selection and
    /// redraws, even when the mode is unchanged.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.cancel_drag();
        self.mode = mode;
        self.selected = None;
        log::debug!("Mode: {}", mode);
        self.set_cursor(mode.cursor_hint());
        self.redraw();
    }

    /// Switch mode by name (`"create"`, `"edit"`, `"delete"`).
    ///
    /// Unknown names are ignored and leave the annotator untouched.
    pub fn set_mode_str(&mut self, name: &str) -> bool {
        match name.parse::<InteractionMode>() {
            Ok(mode) => {
                self.set_mode(mode);
                true
            }
            Err(e) => {
                log::warn!("Ignoring mode change: {}", e);
                false
            }
        }
    }

    /// Select the class for newly created boxes. Ids outside the class list
    /// are ignored.
    pub fn set_current_class(&mut self, class_id: u32) -> bool {
        if self.classes.contains(class_id) {
            self.current_class = class_id;
            log::debug!("Current class: {}", self.classes.resolve(class_id).name);
            true
        } else {
            log::warn!(
                "Ignoring class id {} (have {} classes)",
                class_id,
                self.classes.len()
            );
            false
        }
    }

    // ========================================================================
    // Loading and exporting
    // ========================================================================

    /// Replace all boxes. History restarts with the loaded set as its only
    /// snapshot. Does not fire the change callback.
    pub fn load_annotations(&mut self, boxes: impl Into<AnnotationSet>) {
        self.drag = DragState::Idle;
        self.boxes = boxes.into();
        self.selected = None;
        self.history.reset(self.boxes.clone());
        log::info!("Loaded {} annotations", self.boxes.len());
        self.redraw();
    }

    /// Load YOLO normalized label text, relative to the current surface size.
    ///
    /// Malformed lines are skipped and reported; only a surface without a
    /// usable size is an error, in which case nothing changes.
    pub fn load_from_normalized_text(&mut self, text: &str) -> Result<ImportSummary, FormatError> {
        let report = format::parse_labels(text, self.surface.width(), self.surface.height())?;
        if !report.skipped.is_empty() {
            log::warn!("Skipped {} malformed label lines", report.skipped.len());
        }

        let loaded = report.boxes.len();
        self.load_annotations(report.boxes);
        Ok(ImportSummary {
            loaded,
            skipped: report.skipped,
        })
    }

    /// Export the boxes as YOLO normalized label text.
    pub fn export_to_normalized_text(&self) -> Result<String, FormatError> {
        format::export_labels(
            self.boxes.as_slice(),
            self.surface.width(),
            self.surface.height(),
        )
    }

    /// Export the boxes in pixel coordinates as a JSON array.
    pub fn export_to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string(&self.boxes)?)
    }

    /// Append externally detected boxes `[x1, y1, x2, y2]`, tagged with the
    /// current class, as one undoable step. Returns how many were added.
    pub fn load_auto_detected_boxes<I>(&mut self, boxes: I) -> usize
    where
        I: IntoIterator<Item = [f64; 4]>,
    {
        self.cancel_drag();
        let class_id = self.current_class;
        let before = self.boxes.len();
        self.boxes.extend(
            boxes
                .into_iter()
                .map(|[x1, y1, x2, y2]| BoundingBox::new(x1, y1, x2, y2, class_id)),
        );

        let added = self.boxes.len() - before;
        if added == 0 {
            log::debug!("No auto-detected boxes to add");
            return 0;
        }

        log::info!("Added {} auto-detected boxes", added);
        self.commit();
        self.redraw();
        self.notify_changed();
        added
    }

    /// Remove every box as one undoable step.
    pub fn clear_annotations(&mut self) {
        self.drag = DragState::Idle;
        self.boxes.clear();
        self.selected = None;
        self.commit();
        log::info!("Cleared annotations");
        self.redraw();
        self.notify_changed();
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Restore the previous snapshot. Returns false at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        self.cancel_drag();
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Restore the next snapshot. Returns false at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        self.cancel_drag();
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    fn restore(&mut self, snapshot: AnnotationSet) {
        self.boxes = snapshot;
        self.selected = None;
        self.redraw();
        self.notify_changed();
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Index of the topmost box at `point`, if any.
    pub fn find_box_at(&self, point: Point) -> Option<usize> {
        self.boxes.find_box_at(point, self.interaction.hit_tolerance)
    }

    /// Remove the selected box. Returns false when nothing is selected.
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        self.cancel_drag();
        self.remove_box(index)
    }

    pub(crate) fn remove_box(&mut self, index: usize) -> bool {
        let Some(removed) = self.boxes.remove(index) else {
            return false;
        };
        log::debug!(
            "Removed box {} ({})",
            index,
            self.classes.resolve(removed.class_id).name
        );
        self.selected = None;
        self.commit();
        self.redraw();
        self.notify_changed();
        true
    }

    /// Record the live box set as a new history snapshot.
    fn commit(&mut self) {
        self.history.record(self.boxes.clone());
    }

    fn notify_changed(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback();
        }
    }

    fn set_cursor(&mut self, hint: CursorHint) {
        if self.cursor == hint {
            return;
        }
        self.cursor = hint;
        if let Some(callback) = self.on_cursor_hint.as_mut() {
            callback(hint);
        }
    }
}
