//! Browser binding.
//!
//! `WebAnnotator` wires an `Annotator<CanvasSurface>` to DOM mouse, touch and
//! keyboard events and exposes the annotator operations to JavaScript.
//!
//! JS callbacks are never invoked while the annotator is borrowed: the
//! annotator only raises flags, and they are flushed once each operation or
//! event handler has released it. A callback may therefore call straight back
//! into the `WebAnnotator`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use urchin_canvas::{
    CanvasSurface, Event, Key, Modifiers, MouseButton, Point, TouchPhase, TouchPoint,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    EventTarget, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent, TouchEvent,
    TouchList,
};

use crate::annotator::Annotator;
use crate::config::AnnotatorConfig;
use crate::format;
use crate::model::CursorHint;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let level = AnnotatorConfig::load_from_local_storage()
        .map(|config| config.log_level)
        .unwrap_or_default();
    if console_log::init_with_level(level.to_level()).is_ok() {
        log::info!("Urchin annotator loaded (log level {})", level.name());
    }
}

/// JSON for a named preset (`"basic"`, `"classification"` or `"yolo"`), to
/// pass to the `WebAnnotator` constructor or edit first.
#[wasm_bindgen(js_name = presetConfig)]
pub fn preset_config(name: &str) -> Result<String, JsValue> {
    let config = match name {
        "basic" => AnnotatorConfig::basic(),
        "classification" => AnnotatorConfig::classification(),
        "yolo" => AnnotatorConfig::yolo(),
        other => return Err(JsValue::from_str(&format!("Unknown preset '{}'", other))),
    };
    config.to_json().map_err(js_error)
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// State shared between the `WebAnnotator` handle and its DOM listeners.
struct Shared {
    annotator: RefCell<Annotator<CanvasSurface>>,
    canvas: HtmlCanvasElement,
    changed: Rc<Cell<bool>>,
    cursor: Rc<Cell<Option<CursorHint>>>,
    on_change: RefCell<Option<js_sys::Function>>,
    on_cursor_hint: RefCell<Option<js_sys::Function>>,
}

impl Shared {
    /// Run `f` on the annotator, then deliver any pending notifications.
    fn with<R>(&self, f: impl FnOnce(&mut Annotator<CanvasSurface>) -> R) -> R {
        let result = f(&mut self.annotator.borrow_mut());
        self.flush();
        result
    }

    fn dispatch(&self, event: Event) -> bool {
        self.with(|annotator| annotator.handle_event(&event))
    }

    fn to_surface(&self, client_x: i32, client_y: i32) -> Point {
        self.annotator
            .borrow()
            .surface()
            .client_to_surface(client_x as f64, client_y as f64)
    }

    fn flush(&self) {
        if let Some(hint) = self.cursor.take() {
            if let Err(e) = self.canvas.style().set_property("cursor", hint.css()) {
                log::warn!("Failed to set cursor: {:?}", e);
            }
            let callback = self.on_cursor_hint.borrow().clone();
            if let Some(callback) = callback {
                if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(hint.css())) {
                    log::warn!("Cursor hint callback failed: {:?}", e);
                }
            }
        }

        if self.changed.replace(false) {
            let callback = self.on_change.borrow().clone();
            if let Some(callback) = callback {
                if let Err(e) = callback.call0(&JsValue::NULL) {
                    log::warn!("Change callback failed: {:?}", e);
                }
            }
        }
    }
}

/// A registered DOM listener, removed again when the annotator is dropped.
struct Listener {
    target: EventTarget,
    name: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

fn listen<E, F>(
    shared: &Rc<Shared>,
    target: &EventTarget,
    name: &'static str,
    mut handler: F,
) -> Result<Listener, JsValue>
where
    E: JsCast + 'static,
    F: FnMut(&Shared, &E) + 'static,
{
    let shared = Rc::clone(shared);
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(event) = event.dyn_ref::<E>() {
            handler(&shared, event);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    Ok(Listener {
        target: target.clone(),
        name,
        closure,
    })
}

fn touch_points(shared: &Shared, list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|touch| TouchPoint {
            id: touch.identifier(),
            position: shared.to_surface(touch.client_x(), touch.client_y()),
        })
        .collect()
}

fn modifiers(event: &KeyboardEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    }
}

/// Keys typed into form fields belong to the field, not the annotator.
fn targets_text_field(event: &KeyboardEvent) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .is_some_and(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
}

/// Bounding-box annotator bound to a canvas element.
#[wasm_bindgen]
pub struct WebAnnotator {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WebAnnotator {
    /// Attach to `canvas`, drawing over `image` (already loaded). The canvas
    /// is resized to the image's natural size. `config_json` falls back to
    /// the config saved in localStorage, then to the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        image: HtmlImageElement,
        config_json: Option<String>,
    ) -> Result<WebAnnotator, JsValue> {
        let config = match config_json {
            Some(json) => AnnotatorConfig::from_json(&json).map_err(js_error)?,
            None => AnnotatorConfig::load_from_local_storage().unwrap_or_default(),
        };

        canvas.set_width(image.natural_width());
        canvas.set_height(image.natural_height());
        log::info!(
            "Annotating {}x{} image with {} classes",
            canvas.width(),
            canvas.height(),
            config.classes.len()
        );

        let surface = CanvasSurface::new(canvas.clone())?;
        let mut annotator = Annotator::with_config(surface, &config).with_background(image);

        let changed = Rc::new(Cell::new(false));
        let cursor = Rc::new(Cell::new(Some(config.initial_mode.cursor_hint())));
        {
            let changed = Rc::clone(&changed);
            annotator.on_annotations_changed(move || changed.set(true));
        }
        {
            let cursor = Rc::clone(&cursor);
            annotator.on_cursor_hint(move |hint| cursor.set(Some(hint)));
        }

        let shared = Rc::new(Shared {
            annotator: RefCell::new(annotator),
            canvas: canvas.clone(),
            changed,
            cursor,
            on_change: RefCell::new(None),
            on_cursor_hint: RefCell::new(None),
        });
        shared.with(|annotator| annotator.redraw());

        let mut web = WebAnnotator {
            shared,
            listeners: Vec::new(),
        };
        web.attach_listeners()?;
        Ok(web)
    }

    fn attach_listeners(&mut self) -> Result<(), JsValue> {
        let shared = &self.shared;
        let canvas: EventTarget = shared.canvas.clone().into();

        self.listeners.push(listen(shared, &canvas, "mousedown", |s, e: &MouseEvent| {
            let position = s.to_surface(e.client_x(), e.client_y());
            s.dispatch(Event::PointerDown {
                button: MouseButton::from_dom(e.button()),
                position,
            });
        })?);
        self.listeners.push(listen(shared, &canvas, "mousemove", |s, e: &MouseEvent| {
            let position = s.to_surface(e.client_x(), e.client_y());
            s.dispatch(Event::PointerMove { position });
        })?);
        self.listeners.push(listen(shared, &canvas, "mouseup", |s, e: &MouseEvent| {
            let position = s.to_surface(e.client_x(), e.client_y());
            s.dispatch(Event::PointerUp {
                button: MouseButton::from_dom(e.button()),
                position,
            });
        })?);
        self.listeners.push(listen(shared, &canvas, "mouseleave", |s, e: &MouseEvent| {
            let position = s.to_surface(e.client_x(), e.client_y());
            s.dispatch(Event::PointerLeave { position });
        })?);

        for (name, phase) in [
            ("touchstart", TouchPhase::Start),
            ("touchmove", TouchPhase::Move),
            ("touchend", TouchPhase::End),
            ("touchcancel", TouchPhase::Cancel),
        ] {
            self.listeners.push(listen(shared, &canvas, name, move |s, e: &TouchEvent| {
                // Released fingers are only listed in changedTouches
                let list = match phase {
                    TouchPhase::Start | TouchPhase::Move => e.touches(),
                    TouchPhase::End | TouchPhase::Cancel => e.changed_touches(),
                };
                let touches = touch_points(s, &list);
                if s.dispatch(Event::Touch { phase, touches }) {
                    e.prevent_default();
                }
            })?);
        }

        let document: EventTarget = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?
            .into();
        self.listeners.push(listen(shared, &document, "keydown", |s, e: &KeyboardEvent| {
            if targets_text_field(e) {
                return;
            }
            let Some(key) = Key::from_dom(&e.key()) else {
                return;
            };
            if s.dispatch(Event::KeyPressed {
                key,
                modifiers: modifiers(e),
            }) {
                e.prevent_default();
            }
        })?);

        log::debug!("Attached {} DOM listeners", self.listeners.len());
        Ok(())
    }

    /// Switch to `"create"`, `"edit"` or `"delete"`. Unknown names are ignored.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> bool {
        self.shared.with(|a| a.set_mode_str(mode))
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.shared.with(|a| a.mode().name().to_string())
    }

    #[wasm_bindgen(js_name = setCurrentClass)]
    pub fn set_current_class(&self, class_id: u32) -> bool {
        self.shared.with(|a| a.set_current_class(class_id))
    }

    /// Replace the boxes with YOLO label text. Returns the number loaded.
    #[wasm_bindgen(js_name = loadFromNormalizedText)]
    pub fn load_from_normalized_text(&self, text: &str) -> Result<usize, JsValue> {
        self.shared
            .with(|a| a.load_from_normalized_text(text))
            .map(|summary| summary.loaded)
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = exportToNormalizedText)]
    pub fn export_to_normalized_text(&self) -> Result<String, JsValue> {
        self.shared
            .with(|a| a.export_to_normalized_text())
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = exportToJson)]
    pub fn export_to_json(&self) -> Result<String, JsValue> {
        self.shared.with(|a| a.export_to_json()).map_err(js_error)
    }

    /// Add detector output given as a flat `[x1, y1, x2, y2, ...]` array.
    /// Replace all annotations with `x1, y1, x2, y2, class` groups in
    /// pixels. Resets history and returns the number of boxes loaded.
    #[wasm_bindgen(js_name = loadAnnotations)]
    pub fn load_annotations(&self, values: Vec<f64>) -> usize {
        let boxes = format::boxes_from_flat(&values);
        let loaded = boxes.len();
        self.shared.with(|a| a.load_annotations(boxes));
        loaded
    }

    #[wasm_bindgen(js_name = loadAutoDetectedBoxes)]
    pub fn load_auto_detected_boxes(&self, coords: Vec<f64>) -> usize {
        let boxes = format::corners_from_flat(&coords);
        self.shared.with(|a| a.load_auto_detected_boxes(boxes))
    }

    pub fn clear(&self) {
        self.shared.with(|a| a.clear_annotations());
    }

    pub fn undo(&self) -> bool {
        self.shared.with(|a| a.undo())
    }

    pub fn redo(&self) -> bool {
        self.shared.with(|a| a.redo())
    }

    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&self) -> bool {
        self.shared.with(|a| a.delete_selected())
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.shared.annotator.borrow().boxes().len()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.shared.annotator.borrow().can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.shared.annotator.borrow().can_redo()
    }

    /// Called with no arguments after every change to the boxes.
    #[wasm_bindgen(js_name = onAnnotationsChanged)]
    pub fn on_annotations_changed(&self, callback: js_sys::Function) {
        *self.shared.on_change.borrow_mut() = Some(callback);
    }

    /// Called with a CSS cursor name whenever the suggested cursor changes.
    #[wasm_bindgen(js_name = onCursorHint)]
    pub fn on_cursor_hint(&self, callback: js_sys::Function) {
        *self.shared.on_cursor_hint.borrow_mut() = Some(callback);
    }
}

impl Drop for WebAnnotator {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(e) = listener
                .target
                .remove_event_listener_with_callback(
                    listener.name,
                    listener.closure.as_ref().unchecked_ref(),
                )
            {
                log::warn!("Failed to remove {} listener: {:?}", listener.name, e);
            }
        }
    }
}
