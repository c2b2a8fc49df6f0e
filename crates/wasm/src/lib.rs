#![deny(unsafe_code)]
//! Browser host for the particle-field background.
//!
//! Wires a `<canvas>` to the core [`Simulation`]: sizes it to the window,
//! forwards pointer and resize events, drives frames with
//! `requestAnimationFrame`, applies the persisted theme, and gives elements
//! with the `magnetic` class the cursor-follow offset.
//!
//! Everything runs on the UI thread. Callbacks share state through
//! `Rc<RefCell<_>>` and never hold a borrow across a yield.

mod canvas;
mod console;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use particle_field_core::magnet::{magnetic_offset, DEFAULT_MAGNET_STRENGTH};
use particle_field_core::{FieldParams, FrameStatus, PointerState, Simulation, Theme, ThemeController};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, EventTarget, HtmlCanvasElement,
    HtmlElement, MouseEvent, Window,
};

use canvas::CanvasSurface;
use storage::LocalStorage;

/// Id of the optional theme toggle button.
const THEME_TOGGLE_ID: &str = "theme-toggle";
/// Class marking elements that get the magnetic cursor effect.
const MAGNETIC_CLASS: &str = "magnetic";

type Shared<T> = Rc<RefCell<T>>;

/// Handle to a running background, returned to JavaScript.
#[wasm_bindgen]
pub struct ParticleBackground {
    sim: Shared<Simulation>,
    themes: Shared<ThemeController<LocalStorage>>,
    document: Document,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Stops the frame loop after the current frame.
    pub fn stop(&self) {
        self.sim.borrow_mut().stop();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.sim.borrow().is_running()
    }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> usize {
        self.sim.borrow().particles().len()
    }

    /// Flips the theme, persists it and returns the new name.
    pub fn toggle_theme(&self) -> String {
        toggle_theme(&self.themes, &self.sim, &self.document).as_str().to_owned()
    }
}

/// Starts the background on the canvas with id `canvas_id`.
///
/// `params_json` optionally overrides field parameters. Returns `undefined`
/// (and logs a warning) when there is no window, no such canvas, or no 2D
/// context; the page simply runs without a background.
#[wasm_bindgen]
pub fn start_background(canvas_id: &str, params_json: Option<String>) -> Option<ParticleBackground> {
    console::init(log::LevelFilter::Info);

    let window = web_sys::window()?;
    let document = window.document()?;
    let Some(canvas) = document
        .get_element_by_id(canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        log::warn!("no <canvas id=\"{canvas_id}\">; particle background disabled");
        return None;
    };
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        log::warn!("canvas #{canvas_id} has no 2d context; particle background disabled");
        return None;
    };

    let params = parse_params(params_json.as_deref());
    let seed = js_sys::Date::now().to_bits();
    let sim = Rc::new(RefCell::new(Simulation::new(params, seed)));
    fit_to_window(&window, &canvas, &sim);

    let prefers_dark = window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(true);
    let themes = Rc::new(RefCell::new(ThemeController::load(
        LocalStorage::from_window(&window),
        prefers_dark,
    )));
    apply_theme(themes.borrow().theme(), &sim, &document);

    wire_resize(&window, &canvas, &sim);
    wire_pointer(&window, &document, &sim);
    wire_theme_toggle(&document, &themes, &sim);
    wire_magnetic(&document);
    schedule_frames(window, Rc::clone(&sim), CanvasSurface::new(ctx));

    log::info!(
        "particle background started with {} particles",
        sim.borrow().particles().len()
    );
    Some(ParticleBackground {
        sim,
        themes,
        document,
    })
}

/// Field params from optional JSON; bad input falls back to defaults.
fn parse_params(raw: Option<&str>) -> FieldParams {
    let Some(raw) = raw else {
        return FieldParams::default();
    };
    match serde_json::from_str::<serde_json::Value>(raw)
        .map_err(|e| e.to_string())
        .and_then(|v| FieldParams::try_from_json(&v).map_err(|e| e.to_string()))
    {
        Ok(params) => params,
        Err(e) => {
            log::warn!("ignoring background params: {e}");
            FieldParams::default()
        }
    }
}

/// CSS transform for a magnetic offset.
fn translate_css(offset: DVec2) -> String {
    format!("translate({}px, {}px)", offset.x, offset.y)
}

fn viewport(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// Re-seeds the field for new extents unless the simulation was stopped.
/// Returns whether the resize happened.
fn resize_if_running(sim: &Shared<Simulation>, width: f64, height: f64) -> bool {
    let mut sim = sim.borrow_mut();
    if !sim.is_running() {
        return false;
    }
    sim.resize(width, height);
    true
}

fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement, sim: &Shared<Simulation>) {
    let (width, height) = viewport(window);
    if resize_if_running(sim, width, height) {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
    }
}

/// Records a pointer move or leave, ignored once the simulation is stopped.
fn track_pointer(sim: &Shared<Simulation>, position: Option<(f64, f64)>) {
    let mut sim = sim.borrow_mut();
    if !sim.is_running() {
        return;
    }
    match position {
        Some((x, y)) => sim.pointer_moved(x, y),
        None => sim.pointer_left(),
    }
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("failed to listen for {event}: {e:?}");
    }
    // Listeners live as long as the page; handlers check liveness themselves.
    closure.forget();
}

fn wire_resize(window: &Window, canvas: &HtmlCanvasElement, sim: &Shared<Simulation>) {
    let win = window.clone();
    let canvas = canvas.clone();
    let sim = Rc::clone(sim);
    listen(window, "resize", move |_| fit_to_window(&win, &canvas, &sim));
}

fn wire_pointer(window: &Window, document: &Document, sim: &Shared<Simulation>) {
    let on_move = Rc::clone(sim);
    listen(window, "mousemove", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            let position = (mouse.client_x() as f64, mouse.client_y() as f64);
            track_pointer(&on_move, Some(position));
        }
    });

    let Some(root) = document.document_element() else {
        return;
    };
    let on_leave = Rc::clone(sim);
    listen(&root, "mouseleave", move |_| track_pointer(&on_leave, None));
}

fn apply_theme(theme: Theme, sim: &Shared<Simulation>, document: &Document) {
    sim.borrow_mut().set_hue(theme.particle_hue());
    if let Some(root) = document.document_element() {
        if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
            log::warn!("failed to apply theme: {e:?}");
        }
    }
}

fn toggle_theme(
    themes: &Shared<ThemeController<LocalStorage>>,
    sim: &Shared<Simulation>,
    document: &Document,
) -> Theme {
    let theme = themes.borrow_mut().toggle();
    apply_theme(theme, sim, document);
    theme
}

fn wire_theme_toggle(
    document: &Document,
    themes: &Shared<ThemeController<LocalStorage>>,
    sim: &Shared<Simulation>,
) {
    let Some(button) = document.get_element_by_id(THEME_TOGGLE_ID) else {
        log::debug!("no #{THEME_TOGGLE_ID} button; theme toggle left to the page");
        return;
    };
    let themes = Rc::clone(themes);
    let sim = Rc::clone(sim);
    let doc = document.clone();
    listen(&button, "click", move |_| {
        toggle_theme(&themes, &sim, &doc);
    });
}

fn element_center(element: &Element) -> DVec2 {
    let rect = element.get_bounding_client_rect();
    DVec2::new(
        rect.left() + rect.width() / 2.0,
        rect.top() + rect.height() / 2.0,
    )
}

fn set_transform(element: &HtmlElement, offset: DVec2) {
    if let Err(e) = element
        .style()
        .set_property("transform", &translate_css(offset))
    {
        log::warn!("failed to move magnetic element: {e:?}");
    }
}

fn wire_magnetic(document: &Document) {
    let elements = document.get_elements_by_class_name(MAGNETIC_CLASS);
    for i in 0..elements.length() {
        let Some(element) = elements
            .item(i)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };

        let el = element.clone();
        listen(&element, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let pointer = PointerState::at(mouse.client_x() as f64, mouse.client_y() as f64);
                let offset = magnetic_offset(element_center(&el), pointer, DEFAULT_MAGNET_STRENGTH);
                set_transform(&el, offset);
            }
        });

        let el = element.clone();
        listen(&element, "mouseleave", move |_| {
            let offset = magnetic_offset(DVec2::ZERO, PointerState::Absent, DEFAULT_MAGNET_STRENGTH);
            set_transform(&el, offset);
        });
    }
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut()>) {
    if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {e:?}");
    }
}

/// Runs one frame per display refresh until the simulation is stopped.
fn schedule_frames(window: Window, sim: Shared<Simulation>, mut surface: CanvasSurface) {
    let callback: Shared<Option<Closure<dyn FnMut()>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&callback);
    let win = window.clone();

    *callback.borrow_mut() = Some(Closure::new(move || {
        if sim.borrow_mut().frame(&mut surface) == FrameStatus::Stopped {
            // Drop our own handle so the closure and its captures are freed.
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(cb) = next.borrow().as_ref() {
            request_frame(&win, cb);
        }
    }));

    if let Some(cb) = callback.borrow().as_ref() {
        request_frame(&window, cb);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_params_defaults_without_input() {
        assert_eq!(parse_params(None), FieldParams::default());
    }

    #[test]
    fn parse_params_reads_overrides() {
        let p = parse_params(Some(r#"{"interaction_radius": 150}"#));
        assert_eq!(p.interaction_radius, 150.0);
    }

    #[test]
    fn parse_params_falls_back_on_bad_json() {
        assert_eq!(parse_params(Some("{nope")), FieldParams::default());
        assert_eq!(
            parse_params(Some(r#"{"max_speed": "fast"}"#)),
            FieldParams::default()
        );
    }

    #[test]
    fn parse_params_falls_back_on_zero_area() {
        assert_eq!(
            parse_params(Some(r#"{"area_per_particle": 0}"#)),
            FieldParams::default()
        );
    }

    fn shared_sim() -> Shared<Simulation> {
        let sim = Rc::new(RefCell::new(Simulation::new(FieldParams::default(), 42)));
        sim.borrow_mut().resize(900.0, 900.0);
        sim
    }

    #[test]
    fn resize_reseeds_running_simulation() {
        let sim = shared_sim();
        assert!(resize_if_running(&sim, 300.0, 300.0));
        assert_eq!(sim.borrow().particles().len(), 10);
    }

    #[test]
    fn resize_after_stop_leaves_field_alone() {
        let sim = shared_sim();
        sim.borrow_mut().stop();
        let before = sim.borrow().particles().to_vec();
        assert!(!resize_if_running(&sim, 1920.0, 1080.0));
        assert_eq!(sim.borrow().particles(), before.as_slice());
    }

    #[test]
    fn pointer_events_after_stop_are_ignored() {
        let sim = shared_sim();
        track_pointer(&sim, Some((10.0, 20.0)));
        assert_eq!(sim.borrow().pointer(), PointerState::at(10.0, 20.0));
        sim.borrow_mut().stop();
        track_pointer(&sim, None);
        track_pointer(&sim, Some((500.0, 500.0)));
        assert_eq!(sim.borrow().pointer(), PointerState::at(10.0, 20.0));
    }

    #[test]
    fn translate_css_formats_pixels() {
        assert_eq!(translate_css(DVec2::new(3.0, -1.5)), "translate(3px, -1.5px)");
        assert_eq!(translate_css(DVec2::ZERO), "translate(0px, 0px)");
    }
}
