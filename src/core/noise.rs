// Noise buffers for the noise-based cues (whoosh, paper crinkle).

use rand::Rng;

/// Amplitude shape applied across a noise buffer, from full level to silence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeShape {
    /// `1 - x`
    Linear,
    /// `(1 - x)^2`, a quicker tail for crinkly textures.
    Quadratic,
}

impl FadeShape {
    /// Gain at normalized position `x` in `[0, 1)`.
    #[inline]
    pub fn gain(self, x: f32) -> f32 {
        let rest = (1.0 - x).clamp(0.0, 1.0);
        match self {
            FadeShape::Linear => rest,
            FadeShape::Quadratic => rest * rest,
        }
    }
}

/// Number of frames needed to hold `seconds` of audio.
#[inline]
pub fn buffer_len(sample_rate: f32, seconds: f64) -> usize {
    if !(sample_rate > 0.0) || !(seconds > 0.0) {
        return 0;
    }
    (sample_rate as f64 * seconds) as usize
}

/// Uniform white noise in `[-1, 1)` shaped by `fade`.
pub fn shaped_noise<R: Rng + ?Sized>(rng: &mut R, len: usize, fade: FadeShape) -> Vec<f32> {
    let inv = if len > 0 { 1.0 / len as f32 } else { 0.0 };
    (0..len)
        .map(|i| {
            let n: f32 = rng.gen::<f32>() * 2.0 - 1.0;
            n * fade.gain(i as f32 * inv)
        })
        .collect()
}
