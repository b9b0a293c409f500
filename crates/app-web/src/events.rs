use std::cell::{Cell, RefCell};
use std::rc::Rc;

use app_core::{DeviceClass, HeroView, ProjectsView, PRESET_COUNT};
use instant::Instant;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

/// Viewport width below which the compact presentation is used.
const COMPACT_WIDTH_PX: f64 = 768.0;

/// Coarse-pointer/small-screen detection decides the initial device class
/// and is re-evaluated on resize.
pub fn detect_device_class(window: &web::Window) -> DeviceClass {
    let coarse = window
        .match_media("(pointer: coarse)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false);
    let narrow = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .map(|w| w < COMPACT_WIDTH_PX)
        .unwrap_or(false);
    if coarse || narrow {
        DeviceClass::Mobile
    } else {
        DeviceClass::Desktop
    }
}

#[derive(Clone)]
pub struct InputWiring {
    pub hero: Rc<RefCell<HeroView>>,
    pub projects: Rc<RefCell<ProjectsView>>,
    pub hero_canvas: web::HtmlCanvasElement,
    pub projects_canvas: web::HtmlCanvasElement,
    pub start: Instant,
}

impl InputWiring {
    fn now_sec(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    let drag_moved: Rc<Cell<bool>> = Rc::new(Cell::new(false));
    let down_at: Rc<Cell<Option<(f32, f32)>>> = Rc::new(Cell::new(None));

    wire_pointerdown(&w, &down_at, &drag_moved);
    wire_pointermove(&w, &down_at, &drag_moved);
    wire_pointerup(&w, &down_at, &drag_moved);
    wire_pointercancel(&w);
    wire_visibility(&w);
    wire_resize(&w);
    wire_menu(&w);
}

fn wire_pointerdown(
    w: &InputWiring,
    down_at: &Rc<Cell<Option<(f32, f32)>>>,
    drag_moved: &Rc<Cell<bool>>,
) {
    let w = w.clone();
    let down_at = down_at.clone();
    let drag_moved = drag_moved.clone();
    let canvas_for_listener = w.hero_canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (sx, sy) = dom::pointer_canvas_px(&ev, &w.hero_canvas);
        w.hero.borrow_mut().pointer.pointer_down(sx, sy);
        down_at.set(Some((sx, sy)));
        drag_moved.set(false);
        let _ = w.hero_canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    let _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(
    w: &InputWiring,
    down_at: &Rc<Cell<Option<(f32, f32)>>>,
    drag_moved: &Rc<Cell<bool>>,
) {
    let w = w.clone();
    let down_at = down_at.clone();
    let drag_moved = drag_moved.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (sx, sy) = dom::pointer_canvas_px(&ev, &w.hero_canvas);
        w.hero.borrow_mut().pointer.pointer_move(sx, sy);
        if let Some((dx, dy)) = down_at.get() {
            if ((sx - dx).powi(2) + (sy - dy).powi(2)).sqrt() > 4.0 {
                drag_moved.set(true);
            }
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        let _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(
    w: &InputWiring,
    down_at: &Rc<Cell<Option<(f32, f32)>>>,
    drag_moved: &Rc<Cell<bool>>,
) {
    let w = w.clone();
    let down_at = down_at.clone();
    let drag_moved = drag_moved.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let was_press = down_at.take().is_some();
        w.hero.borrow_mut().pointer.pointer_up();
        // a press that never travelled is a click on the model
        if was_press && !drag_moved.get() {
            let fired = w.hero.borrow_mut().click(w.now_sec());
            if fired {
                log::info!("[hero] egg overlay armed");
            }
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        let _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointercancel(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        w.hero.borrow_mut().pointer.cancel();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        let _ =
            wnd.add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Returning from a backgrounded tab resets transient physics so no
/// catch-up animation fires.
fn wire_visibility(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        if let Some(doc) = dom::window_document() {
            if doc.visibility_state() == web::VisibilityState::Visible {
                let now = w.now_sec();
                w.hero.borrow_mut().resume(now);
                w.projects.borrow_mut().resume(now);
                log::info!("[view] resumed from background");
            }
        }
    }) as Box<dyn FnMut()>);
    if let Some(doc) = dom::window_document() {
        let _ = doc
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_resize(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&w.hero_canvas);
        dom::sync_canvas_backing_size(&w.projects_canvas);
        w.hero.borrow_mut().pointer.set_viewport(
            w.hero_canvas.width() as f32,
            w.hero_canvas.height() as f32,
        );
        if let Some(wnd) = web::window() {
            let device = detect_device_class(&wnd);
            w.hero.borrow_mut().set_device(device);
            w.projects.borrow_mut().set_device(device);
        }
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        let _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Menu items are static DOM nodes `project-0` .. `project-7`; each click
/// flies the camera to that item's preset pose.
fn wire_menu(w: &InputWiring) {
    if let Some(doc) = dom::window_document() {
        for index in 0..PRESET_COUNT {
            let w = w.clone();
            dom::add_click_listener(&doc, &format!("project-{index}"), move || {
                w.projects.borrow_mut().select(index, w.now_sec());
            });
        }
    }
}
