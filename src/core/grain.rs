// Film grain overlay generator.
//
// Each frame is pure noise: a sparse sprinkling of faint white pixels and,
// now and then, a single near-vertical scratch. No frame reads anything left
// over from the previous one.

use rand::Rng;

use super::constants::*;

#[derive(Clone, Debug)]
pub struct GrainParams {
    pub pixel_probability: f32,
    /// Noise pixel alpha is drawn from `0..max_alpha`.
    pub max_alpha: u8,
    pub scratch_probability: f32,
    pub scratch_max_alpha: f32,
    pub scratch_max_width: f32,
    pub scratch_max_drift: f32,
}

impl Default for GrainParams {
    fn default() -> Self {
        Self {
            pixel_probability: GRAIN_PIXEL_PROBABILITY,
            max_alpha: GRAIN_MAX_ALPHA,
            scratch_probability: SCRATCH_PROBABILITY,
            scratch_max_alpha: SCRATCH_MAX_ALPHA,
            scratch_max_width: SCRATCH_MAX_WIDTH,
            scratch_max_drift: SCRATCH_MAX_DRIFT_PX,
        }
    }
}

/// A faint line from `(x_top, 0)` to `(x_bottom, height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scratch {
    pub x_top: f32,
    pub x_bottom: f32,
    pub height: f32,
    pub alpha: f32,
    pub line_width: f32,
}

impl Scratch {
    pub fn css_color(&self) -> String {
        format!("rgba(255, 255, 255, {:.4})", self.alpha)
    }
}

/// Overwrite `rgba` (4 bytes per pixel) with a fresh grain pattern.
/// Returns the number of noise pixels written.
pub fn fill_grain<R: Rng + ?Sized>(rgba: &mut [u8], params: &GrainParams, rng: &mut R) -> usize {
    let mut lit = 0;
    for px in rgba.chunks_exact_mut(4) {
        if rng.gen::<f32>() < params.pixel_probability {
            let alpha = if params.max_alpha > 0 {
                rng.gen_range(0..params.max_alpha)
            } else {
                0
            };
            px.copy_from_slice(&[255, 255, 255, alpha]);
            lit += 1;
        } else {
            px.copy_from_slice(&[0, 0, 0, 0]);
        }
    }
    lit
}

pub fn maybe_scratch<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    params: &GrainParams,
    rng: &mut R,
) -> Option<Scratch> {
    if rng.gen::<f32>() >= params.scratch_probability {
        return None;
    }
    let x_top = rng.gen::<f32>() * width as f32;
    let drift = (rng.gen::<f32>() - 0.5) * params.scratch_max_drift;
    Some(Scratch {
        x_top,
        x_bottom: x_top + drift,
        height: height as f32,
        alpha: rng.gen::<f32>() * params.scratch_max_alpha,
        line_width: rng.gen::<f32>() * params.scratch_max_width,
    })
}

pub struct GrainFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub rgba: &'a [u8],
    pub noise_pixels: usize,
    pub scratch: Option<Scratch>,
}

pub struct GrainOverlay<R: Rng> {
    pub params: GrainParams,
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    rng: R,
}

impl<R: Rng> GrainOverlay<R> {
    pub fn new(rng: R, width: u32, height: u32) -> Self {
        let mut overlay = Self {
            params: GrainParams::default(),
            width: 0,
            height: 0,
            rgba: Vec::new(),
            rng,
        };
        overlay.resize(width, height);
        overlay
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.rgba.resize(width as usize * height as usize * 4, 0);
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Regenerate every pixel and roll for a scratch.
    pub fn render_frame(&mut self) -> GrainFrame<'_> {
        let noise_pixels = fill_grain(&mut self.rgba, &self.params, &mut self.rng);
        let scratch = maybe_scratch(self.width, self.height, &self.params, &mut self.rng);
        GrainFrame {
            width: self.width,
            height: self.height,
            rgba: &self.rgba,
            noise_pixels,
            scratch,
        }
    }
}
