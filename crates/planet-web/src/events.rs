//! Pointer/keyboard wiring. Handlers only mutate interaction and camera-rig
//! state; all geometry writes happen on the frame step.

use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use planet_core::PlanetScene;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::camera::OrbitRig;
use crate::{dom, input, modal};

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<PlanetScene>>,
    pub orbit: Rc<RefCell<OrbitRig>>,
    pub quotes: Rc<Vec<String>>,
    pub start: Instant,
}

impl InputWiring {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_pointer_exit(&w);
    wire_wheel(&w);
    wire_quote_click(&w);
    wire_keydown(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let px = input::pointer_page_px(&ev);
        let ndc = input::pointer_ndc(&ev, &w.canvas);
        w.scene.borrow_mut().pointer_moved(ndc, px, w.now());
        w.orbit.borrow_mut().pointer_moved(px, dom::viewport_size());
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        let _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let px = input::pointer_page_px(&ev);
        let ndc = input::pointer_ndc(&ev, &w.canvas);
        let grabbed = w.scene.borrow_mut().pointer_down(ndc, px);
        if grabbed {
            log::info!("[pointer] press on the sphere surface");
        } else {
            // The press missed the planet; the orbit rig owns this drag
            w.orbit.borrow_mut().begin_drag(px);
        }
        let _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    let _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        w.scene.borrow_mut().pointer_up();
        w.orbit.borrow_mut().end_drag();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        let _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// `pointerleave` on the document plus `mouseout` with no related target both
/// mean the cursor left the page entirely.
fn wire_pointer_exit(w: &InputWiring) {
    let Some(document) = dom::window_document() else {
        return;
    };
    {
        let w = w.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            w.scene.borrow_mut().pointer_left();
            w.orbit.borrow_mut().end_drag();
        }) as Box<dyn FnMut(_)>);
        let _ = document
            .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let w = w.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            if ev.related_target().is_none() {
                w.scene.borrow_mut().pointer_left();
                w.orbit.borrow_mut().end_drag();
            }
        }) as Box<dyn FnMut(_)>);
        let _ =
            document.add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        w.orbit.borrow_mut().zoom(ev.delta_y() as f32);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    let _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Clicking a hovered quote opens the modal with its full text.
fn wire_quote_click(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        let Some(document) = dom::window_document() else {
            return;
        };
        if !modal::is_hidden(&document) {
            return;
        }
        let hovered = w.scene.borrow().hovered_quote();
        if let Some(i) = hovered {
            if let Some(text) = w.quotes.get(i) {
                modal::show(&document, text);
            }
        }
    }) as Box<dyn FnMut(_)>);
    let _ = canvas_for_listener
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_keydown(_w: &InputWiring) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.key() == "Escape" {
            if let Some(document) = dom::window_document() {
                modal::hide(&document);
            }
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        let _ = wnd.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
