// One-shot scroll progress checkpoints.

use smallvec::SmallVec;

/// `(percent, shimmer pitch)` along the travel route.
pub const ROUTE_CHECKPOINTS: [(u32, f32); 3] = [(25, 0.6), (50, 0.8), (75, 1.0)];

#[derive(Clone, Debug)]
pub struct ProgressCheckpoints {
    marks: SmallVec<[(u32, f32, bool); 4]>,
}

impl Default for ProgressCheckpoints {
    fn default() -> Self {
        Self::new(&ROUTE_CHECKPOINTS)
    }
}

impl ProgressCheckpoints {
    pub fn new(marks: &[(u32, f32)]) -> Self {
        Self {
            marks: marks.iter().map(|&(pct, pitch)| (pct, pitch, false)).collect(),
        }
    }

    /// Feed scroll progress in `[0, 1]`; returns the pitch of every
    /// checkpoint passed for the first time.
    pub fn update(&mut self, progress: f32) -> SmallVec<[f32; 4]> {
        let mut fired = SmallVec::new();
        if !progress.is_finite() {
            return fired;
        }
        let pct = (progress.clamp(0.0, 1.0) * 100.0).floor() as u32;
        for (mark, pitch, done) in self.marks.iter_mut() {
            if !*done && pct > *mark {
                *done = true;
                fired.push(*pitch);
            }
        }
        fired
    }

    pub fn all_fired(&self) -> bool {
        self.marks.iter().all(|m| m.2)
    }

    pub fn reset(&mut self) {
        for m in self.marks.iter_mut() {
            m.2 = false;
        }
    }
}
