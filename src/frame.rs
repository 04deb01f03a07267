use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{DEFAULT_FRAME_DT_SEC, MAX_FRAME_DT_SEC, MS_PER_SEC};

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` loop that remembers its registration so it can be
/// cancelled on unmount.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    alive: Rc<Cell<bool>>,
    tick: Tick,
}

impl FrameLoop {
    /// Call `on_frame(dt_sec)` once per display refresh until cancelled.
    /// `dt_sec` is clamped so a backgrounded tab does not produce huge steps.
    pub fn start(mut on_frame: impl FnMut(f32) + 'static) -> Self {
        let raf_id = Rc::new(Cell::new(None));
        let alive = Rc::new(Cell::new(true));
        let tick: Tick = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let raf_clone = raf_id.clone();
        let alive_clone = alive.clone();
        let mut last_ms: Option<f64> = None;
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
            if !alive_clone.get() {
                return;
            }
            let dt = match last_ms {
                Some(prev) => (((now_ms - prev) / MS_PER_SEC) as f32).clamp(0.0, MAX_FRAME_DT_SEC),
                None => DEFAULT_FRAME_DT_SEC,
            };
            last_ms = Some(now_ms);
            on_frame(dt);
            if let Some(id) = request_frame(&tick_clone) {
                raf_clone.set(Some(id));
            }
        }) as Box<dyn FnMut(f64)>));

        raf_id.set(request_frame(&tick));
        Self { raf_id, alive, tick }
    }

    pub fn cancel(&self) {
        self.alive.set(false);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // breaks the closure's self-reference
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(tick: &Tick) -> Option<i32> {
    let w = web::window()?;
    let guard = tick.borrow();
    let cb = guard.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}
