use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::core::checkpoints::ProgressCheckpoints;
use crate::core::proposal::ProposalScene;
use crate::core::CueKind;
use crate::hearts::HeartParticles;
use crate::sound::SoundBoard;

/// New placement of the "no" button, in percent of its container.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct NoButtonPosition {
    pub top_pct: u32,
    pub left_pct: u32,
}

#[wasm_bindgen]
pub struct Proposal {
    scene: ProposalScene,
    rng: SmallRng,
}

impl Default for Proposal {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Proposal {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Proposal {
        Proposal {
            scene: ProposalScene::default(),
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn on_in_view(&mut self, board: &SoundBoard) {
        if let Some(cue) = self.scene.on_in_view() {
            board.play(cue, 1.0);
        }
    }

    pub fn on_no_hover(&mut self, board: &SoundBoard) -> NoButtonPosition {
        let (cue, pos) = self.scene.on_no_hover(&mut self.rng);
        board.play(cue, 1.0);
        NoButtonPosition {
            top_pct: pos.top_pct,
            left_pct: pos.left_pct,
        }
    }

    /// Returns true only for the acceptance that started the celebration.
    pub fn on_yes(&mut self, board: &SoundBoard, particles: &mut HeartParticles) -> bool {
        match self.scene.on_yes(particles) {
            Some(cue) => {
                board.play(cue, 1.0);
                true
            }
            None => false,
        }
    }

    pub fn said_yes(&self) -> bool {
        self.scene.said_yes()
    }
}

/// Shimmers once at each quarter of the travel route.
#[wasm_bindgen]
pub struct RouteCheckpoints {
    marks: ProgressCheckpoints,
}

impl Default for RouteCheckpoints {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl RouteCheckpoints {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RouteCheckpoints {
        RouteCheckpoints {
            marks: ProgressCheckpoints::default(),
        }
    }

    pub fn update(&mut self, board: &SoundBoard, progress: f32) {
        for pitch in self.marks.update(progress) {
            board.play(CueKind::Shimmer, pitch);
        }
    }

    pub fn reset(&mut self) {
        self.marks.reset();
    }
}
