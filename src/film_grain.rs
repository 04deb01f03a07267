use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys as web;

use crate::core::grain::GrainOverlay;
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;

struct GrainSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    overlay: GrainOverlay<SmallRng>,
}

impl GrainSurface {
    fn resize(&mut self) {
        let (w, h) = dom::sync_canvas_to_viewport(&self.canvas);
        self.overlay.resize(w, h);
    }

    fn frame(&mut self) -> anyhow::Result<()> {
        let frame = self.overlay.render_frame();
        let (w, h) = (frame.width as f64, frame.height as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
        let image = web::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(frame.rgba),
            frame.width,
            frame.height,
        )
        .map_err(|e| anyhow::anyhow!("ImageData error: {:?}", e))?;
        self.ctx
            .put_image_data(&image, 0.0, 0.0)
            .map_err(|e| anyhow::anyhow!("putImageData error: {:?}", e))?;

        if let Some(s) = frame.scratch {
            self.ctx.begin_path();
            #[allow(deprecated)]
            self.ctx.set_stroke_style(&JsValue::from_str(&s.css_color()));
            self.ctx.set_line_width(s.line_width as f64);
            self.ctx.move_to(s.x_top as f64, 0.0);
            self.ctx.line_to(s.x_bottom as f64, s.height as f64);
            self.ctx.stroke();
        }
        Ok(())
    }
}

/// Full-viewport film grain overlay bound to one canvas.
#[wasm_bindgen]
pub struct FilmGrain {
    frames: Option<FrameLoop>,
    _resize: Option<Listener>,
}

#[wasm_bindgen]
impl FilmGrain {
    pub fn mount(canvas_id: &str) -> FilmGrain {
        let (canvas, ctx) = match dom::canvas_2d(canvas_id) {
            Ok(parts) => parts,
            Err(e) => {
                log::warn!("[grain] not mounted: {}", e);
                return FilmGrain {
                    frames: None,
                    _resize: None,
                };
            }
        };
        let (w, h) = dom::sync_canvas_to_viewport(&canvas);
        let surface = Rc::new(RefCell::new(GrainSurface {
            canvas,
            ctx,
            overlay: GrainOverlay::new(SmallRng::from_entropy(), w, h),
        }));

        let on_resize = surface.clone();
        let resize = Listener::on_window("resize", move |_| on_resize.borrow_mut().resize());
        let frames = FrameLoop::start(move |_dt| {
            if let Err(e) = surface.borrow_mut().frame() {
                log::debug!("[grain] frame skipped: {:?}", e);
            }
        });
        FilmGrain {
            frames: Some(frames),
            _resize: resize,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.frames.is_some()
    }

    pub fn unmount(&mut self) {
        if let Some(frames) = self.frames.take() {
            frames.cancel();
        }
        self._resize = None;
    }
}
