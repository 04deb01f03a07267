use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::cursor::HeartCursor as CursorModel;
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;

struct CursorGlyph {
    el: web::HtmlElement,
    model: CursorModel,
}

impl CursorGlyph {
    fn frame(&mut self, dt: f32) {
        let pos = self.model.step(dt);
        let style = self.el.style();
        _ = style.set_property(
            "transform",
            &format!("translate3d({:.2}px, {:.2}px, 0)", pos.x, pos.y),
        );
        _ = style.set_property("opacity", if self.model.is_visible() { "1" } else { "0" });
    }
}

fn pointer_listener(
    target: &web::EventTarget,
    event: &'static str,
    glyph: &Rc<RefCell<CursorGlyph>>,
    apply: fn(&mut CursorModel, &web::Event),
) -> Option<Listener> {
    let glyph = glyph.clone();
    Listener::add(target, event, move |ev| apply(&mut glyph.borrow_mut().model, &ev))
}

/// Heart glyph that trails the mouse on a spring. Inert on touch devices and
/// when the element is missing.
#[wasm_bindgen]
pub struct HeartCursor {
    frames: Option<FrameLoop>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl HeartCursor {
    pub fn mount(element_id: &str) -> HeartCursor {
        let mut cursor = HeartCursor {
            frames: None,
            listeners: Vec::new(),
        };
        if dom::prefers_coarse_pointer() {
            log::info!("[cursor] coarse pointer, native cursor kept");
            return cursor;
        }
        let Some(document) = dom::window_document() else {
            return cursor;
        };
        let Some(el) = document
            .get_element_by_id(element_id)
            .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
        else {
            log::warn!("[cursor] missing #{}", element_id);
            return cursor;
        };
        let glyph = Rc::new(RefCell::new(CursorGlyph {
            el,
            model: CursorModel::default(),
        }));

        if let Some(window) = web::window() {
            cursor.listeners.extend(pointer_listener(&window, "mousemove", &glyph, |m, ev| {
                if let Some(me) = ev.dyn_ref::<web::MouseEvent>() {
                    m.on_move(me.client_x() as f32, me.client_y() as f32);
                }
            }));
        }
        if let Some(body) = document.body() {
            cursor
                .listeners
                .extend(pointer_listener(&body, "mouseenter", &glyph, |m, _| m.on_enter()));
            cursor
                .listeners
                .extend(pointer_listener(&body, "mouseleave", &glyph, |m, _| m.on_leave()));
        }
        cursor.frames = Some(FrameLoop::start(move |dt| glyph.borrow_mut().frame(dt)));
        cursor
    }

    pub fn is_active(&self) -> bool {
        self.frames.is_some()
    }

    pub fn unmount(&mut self) {
        if let Some(frames) = self.frames.take() {
            frames.cancel();
        }
        self.listeners.clear();
    }
}
