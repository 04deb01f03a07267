// Interaction handlers of the final proposal scene.

use rand::Rng;

use super::constants::{ESCAPE_MIN_PCT, ESCAPE_SPAN_PCT};
use super::cue::CueKind;
use super::particles::Celebrate;

/// Where the "no" button jumps to, as percentages of its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscapePosition {
    pub top_pct: u32,
    pub left_pct: u32,
}

pub fn escape_position<R: Rng + ?Sized>(rng: &mut R) -> EscapePosition {
    EscapePosition {
        top_pct: rng.gen_range(0..ESCAPE_SPAN_PCT) + ESCAPE_MIN_PCT,
        left_pct: rng.gen_range(0..ESCAPE_SPAN_PCT) + ESCAPE_MIN_PCT,
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProposalScene {
    said_yes: bool,
    heartbeat_played: bool,
    no_button: Option<EscapePosition>,
}

impl ProposalScene {
    #[inline]
    pub fn said_yes(&self) -> bool {
        self.said_yes
    }

    #[inline]
    pub fn no_button(&self) -> Option<EscapePosition> {
        self.no_button
    }

    /// Scene scrolled into view: a heartbeat, the first time only.
    pub fn on_in_view(&mut self) -> Option<CueKind> {
        if self.heartbeat_played {
            return None;
        }
        self.heartbeat_played = true;
        Some(CueKind::Heartbeat)
    }

    /// Pointer reached the "no" button: it pops away somewhere else.
    pub fn on_no_hover<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (CueKind, EscapePosition) {
        let pos = escape_position(rng);
        self.no_button = Some(pos);
        (CueKind::Pop, pos)
    }

    /// "Yes": burst, start the rain and return the cue to play.
    /// Only the first acceptance celebrates.
    pub fn on_yes<C: Celebrate + ?Sized>(&mut self, target: &mut C) -> Option<CueKind> {
        if self.said_yes {
            return None;
        }
        self.said_yes = true;
        target.set_celebrated(true);
        target.trigger_explosion();
        log::info!("[proposal] accepted");
        Some(CueKind::Celebration)
    }
}
