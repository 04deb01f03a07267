use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

use crate::core::{Celebrate, ParticleField};
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;

struct HeartSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    field: ParticleField<SmallRng>,
}

impl HeartSurface {
    fn resize(&mut self) {
        let (w, h) = dom::sync_canvas_to_viewport(&self.canvas);
        self.field.resize(w as f32, h as f32);
    }

    fn frame(&mut self) {
        let size = self.field.viewport();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
        self.field.advance_frame();
        for p in self.field.particles() {
            let heart = p.heart();
            self.ctx.save();
            self.ctx.set_global_alpha(p.alpha() as f64);
            #[allow(deprecated)]
            self.ctx.set_fill_style(&JsValue::from_str(p.accent.css()));
            self.ctx.begin_path();
            self.ctx.move_to(heart.start.x as f64, heart.start.y as f64);
            for seg in heart.segments.iter() {
                self.ctx.bezier_curve_to(
                    seg.c1.x as f64,
                    seg.c1.y as f64,
                    seg.c2.x as f64,
                    seg.c2.y as f64,
                    seg.to.x as f64,
                    seg.to.y as f64,
                );
            }
            self.ctx.fill();
            self.ctx.restore();
        }
    }
}

/// Heart burst / confetti rain renderer bound to one canvas.
///
/// Mounting onto a missing canvas yields an inert handle: every method is then
/// a no-op.
#[wasm_bindgen]
pub struct HeartParticles {
    surface: Option<Rc<RefCell<HeartSurface>>>,
    frames: Option<FrameLoop>,
    _resize: Option<Listener>,
}

#[wasm_bindgen]
impl HeartParticles {
    pub fn mount(canvas_id: &str) -> HeartParticles {
        let (canvas, ctx) = match dom::canvas_2d(canvas_id) {
            Ok(parts) => parts,
            Err(e) => {
                log::warn!("[hearts] not mounted: {}", e);
                return HeartParticles {
                    surface: None,
                    frames: None,
                    _resize: None,
                };
            }
        };
        let (w, h) = dom::sync_canvas_to_viewport(&canvas);
        let surface = Rc::new(RefCell::new(HeartSurface {
            canvas,
            ctx,
            field: ParticleField::new(SmallRng::from_entropy(), w as f32, h as f32),
        }));

        let on_resize = surface.clone();
        let resize = Listener::on_window("resize", move |_| on_resize.borrow_mut().resize());
        let on_frame = surface.clone();
        let frames = FrameLoop::start(move |_dt| on_frame.borrow_mut().frame());
        log::info!("[hearts] mounted on #{}", canvas_id);

        HeartParticles {
            surface: Some(surface),
            frames: Some(frames),
            _resize: resize,
        }
    }

    pub fn trigger_explosion(&mut self) {
        Celebrate::trigger_explosion(self);
    }

    pub fn set_celebrated(&mut self, on: bool) {
        Celebrate::set_celebrated(self, on);
    }

    pub fn live_count(&self) -> usize {
        self.surface
            .as_ref()
            .map_or(0, |s| s.borrow().field.len())
    }

    pub fn unmount(&mut self) {
        if let Some(frames) = self.frames.take() {
            frames.cancel();
        }
        self._resize = None;
        if let Some(surface) = self.surface.take() {
            let mut s = surface.borrow_mut();
            s.field.clear();
            let size = s.field.viewport();
            s.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
        }
    }
}

impl Celebrate for HeartParticles {
    fn trigger_explosion(&mut self) {
        if let Some(s) = &self.surface {
            s.borrow_mut().field.trigger_explosion();
        }
    }

    fn set_celebrated(&mut self, on: bool) {
        if let Some(s) = &self.surface {
            s.borrow_mut().field.set_celebrated(on);
        }
    }
}
