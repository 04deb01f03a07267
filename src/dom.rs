use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::FxError;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Current viewport size in CSS pixels.
pub fn viewport_size() -> (u32, u32) {
    let Some(w) = web::window() else {
        return (1, 1);
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    (dim(w.inner_width()), dim(w.inner_height()))
}

/// Resize a full-viewport canvas backing store to the window size.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let (w, h) = viewport_size();
    canvas.set_width(w);
    canvas.set_height(h);
    (w, h)
}

pub fn canvas_2d(
    canvas_id: &str,
) -> Result<(web::HtmlCanvasElement, web::CanvasRenderingContext2d), FxError> {
    let document = window_document()
        .ok_or_else(|| FxError::SurfaceUnavailable("no document".into()))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| FxError::SurfaceUnavailable(format!("missing #{canvas_id}")))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| FxError::SurfaceUnavailable(format!("#{canvas_id} is not a canvas")))?;
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| FxError::SurfaceUnavailable(format!("{:?}", e)))?
        .ok_or_else(|| FxError::SurfaceUnavailable("2d context refused".into()))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| FxError::SurfaceUnavailable("unexpected context type".into()))?;
    Ok((canvas, ctx))
}

pub fn prefers_coarse_pointer() -> bool {
    web::window()
        .and_then(|w| w.match_media(crate::constants::COARSE_POINTER_QUERY).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// An event listener that is removed again when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn add(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("{} listener error: {:?}", event, e);
            return None;
        }
        Some(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Listen on the window.
    pub fn on_window(event: &'static str, handler: impl FnMut(web::Event) + 'static) -> Option<Self> {
        let window = web::window()?;
        Self::add(&window, event, handler)
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// A pending `setTimeout`; cleared when cancelled or dropped.
pub struct Timeout {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn schedule(delay_sec: f64, f: impl FnMut() + 'static) -> Option<Self> {
        let window = web::window()?;
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let delay_ms = (delay_sec.max(0.0) * crate::constants::MS_PER_SEC).round() as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms,
        ) {
            Ok(id) => Some(Self {
                id,
                _closure: closure,
            }),
            Err(e) => {
                log::warn!("setTimeout error: {:?}", e);
                None
            }
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(self.id);
        }
    }
}
