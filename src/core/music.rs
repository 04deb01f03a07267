use std::collections::VecDeque;

use super::automation::{Automation, SILENCE_FLOOR};
use super::constants::*;
use super::cue::{Route, Tone};

/// Am / F / C / G / Am / Dm / G / C, four voicing notes each (Hz).
pub const CHORD_PROGRESSION: [[f32; 4]; 8] = [
    [220.0, 261.63, 329.63, 440.0],  // Am
    [174.61, 220.0, 261.63, 349.23], // F
    [261.63, 329.63, 392.0, 523.25], // C
    [196.0, 246.94, 293.66, 392.0],  // G
    [220.0, 329.63, 440.0, 523.25],  // Am (higher)
    [146.83, 220.0, 293.66, 349.23], // Dm
    [196.0, 246.94, 392.0, 493.88],  // G
    [261.63, 329.63, 392.0, 523.25], // C
];

#[derive(Clone, Debug)]
pub struct LoopParams {
    pub note_duration: f64,
    pub note_gap: f64,
    pub chord_pad: f64,
    pub first_lead: f64,
    pub wake_lead: f64,
    pub fade_in_target: f32,
    pub fade_in_sec: f64,
    pub fade_out_sec: f64,
    pub suspend_after_sec: f64,
}

impl Default for LoopParams {
    fn default() -> Self {
        Self {
            note_duration: LOOP_NOTE_DURATION_SEC,
            note_gap: LOOP_NOTE_GAP_SEC,
            chord_pad: LOOP_CHORD_PAD_SEC,
            first_lead: LOOP_FIRST_LEAD_SEC,
            wake_lead: LOOP_WAKE_LEAD_SEC,
            fade_in_target: MASTER_FADE_IN_TARGET,
            fade_in_sec: MASTER_FADE_IN_SEC,
            fade_out_sec: MASTER_FADE_OUT_SEC,
            suspend_after_sec: SUSPEND_AFTER_STOP_SEC,
        }
    }
}

impl LoopParams {
    /// Length of one pass through the progression.
    pub fn cycle_len(&self) -> f64 {
        CHORD_PROGRESSION
            .iter()
            .map(|chord| self.note_gap * chord.len() as f64 + self.chord_pad)
            .sum()
    }
}

/// A soft sine "piano" note: fundamental, octave harmonic and sub-octave body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PianoNote {
    pub frequency_hz: f32,
    pub start: f64,
    pub duration: f64,
}

impl PianoNote {
    pub fn stop_time(&self) -> f64 {
        self.start + self.duration + LOOP_NOTE_RELEASE_PAD_SEC
    }

    pub fn tones(&self) -> [Tone; 3] {
        let (f, s, d) = (self.frequency_hz, self.start, self.duration);
        let stop = self.stop_time();
        let main = Tone::sine(
            s,
            stop,
            Automation::constant(f, s),
            Automation::starting_at(0.0, s)
                .linear(0.15, s + 0.02)
                .exponential(0.08, s + 0.15)
                .exponential(SILENCE_FLOOR, s + d),
        );
        let harmonic = Tone::sine(
            s,
            stop,
            Automation::constant(f * 2.0, s),
            Automation::attack_release(s, 0.03, s + 0.02, s + d * 0.6),
        );
        let sub = Tone::sine(
            s,
            stop,
            Automation::constant(f * 0.5, s),
            Automation::attack_release(s, 0.04, s + 0.03, s + d * 0.8),
        );
        [main, harmonic, sub].map(|t| t.routed(Route::MusicBus))
    }
}

/// One scheduled pass through [`CHORD_PROGRESSION`].
#[derive(Clone, Debug)]
pub struct Cycle {
    pub generation: u64,
    pub start: f64,
    pub end: f64,
    pub notes: Vec<PianoNote>,
    /// Set when the loop is stopped while this cycle may still sound.
    pub cutoff: Option<f64>,
}

impl Cycle {
    pub fn tones(&self) -> impl Iterator<Item = Tone> + '_ {
        self.notes.iter().flat_map(|n| n.tones())
    }

    fn effective_end(&self, note: &PianoNote) -> f64 {
        match self.cutoff {
            Some(c) => note.stop_time().min(c),
            None => note.stop_time(),
        }
    }

    /// Last moment any note of this cycle can be heard.
    pub fn last_sound(&self) -> f64 {
        self.notes
            .iter()
            .map(|n| self.effective_end(n))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Notes still producing sound strictly after `t`.
    pub fn sounding_after(&self, t: f64) -> usize {
        self.notes
            .iter()
            .filter(|n| {
                let end = self.effective_end(n);
                end > t && n.start < end
            })
            .count()
    }
}

/// Lay out one cycle beginning at `offset`.
pub fn lay_out_cycle(params: &LoopParams, offset: f64, generation: u64) -> Cycle {
    let mut notes = Vec::with_capacity(CHORD_PROGRESSION.len() * 4);
    let mut t = offset;
    for chord in CHORD_PROGRESSION.iter() {
        for (i, &frequency_hz) in chord.iter().enumerate() {
            notes.push(PianoNote {
                frequency_hz,
                start: t + i as f64 * params.note_gap,
                duration: params.note_duration,
            });
        }
        t += params.note_gap * chord.len() as f64 + params.chord_pad;
    }
    Cycle {
        generation,
        start: offset,
        end: t,
        notes,
        cutoff: None,
    }
}

/// Master gain move: cancel pending automation at `at`, hold the current
/// value, then ramp linearly to `target` by `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MasterFade {
    pub at: f64,
    pub target: f32,
    pub end: f64,
}

#[derive(Clone, Debug)]
pub struct LoopStart {
    pub generation: u64,
    pub fade: MasterFade,
    pub cycle: Cycle,
    pub wake_at: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct LoopStop {
    pub generation: u64,
    pub fade: MasterFade,
    /// Every oscillator still scheduled past this point is cut here.
    pub cutoff: f64,
    pub suspend_at: f64,
}

/// Scheduler for the ambient piano loop.
///
/// Holds a single wake time instead of a chain of self-rescheduling
/// callbacks. Every start and stop bumps `generation`; a wake carrying an
/// older generation is ignored, so a timer that fires after `stop` can never
/// revive the loop.
#[derive(Clone, Debug, Default)]
pub struct MusicLoop {
    pub params: LoopParams,
    playing: bool,
    generation: u64,
    next_wake: Option<f64>,
    last_end: f64,
    cycles: VecDeque<Cycle>,
    suspend_pending: bool,
}

impl MusicLoop {
    pub fn new(params: LoopParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn next_wake(&self) -> Option<f64> {
        self.next_wake
    }

    pub fn scheduled_cycles(&self) -> impl Iterator<Item = &Cycle> {
        self.cycles.iter()
    }

    /// Begin playback. Returns `None` when already playing.
    pub fn start(&mut self, now: f64) -> Option<LoopStart> {
        if self.playing {
            return None;
        }
        self.playing = true;
        self.generation += 1;
        self.suspend_pending = false;
        self.prune(now);

        let cycle = lay_out_cycle(&self.params, now + self.params.first_lead, self.generation);
        let wake_at = cycle.end - self.params.wake_lead;
        self.last_end = cycle.end;
        self.next_wake = Some(wake_at);
        self.cycles.push_back(cycle.clone());
        log::debug!(
            "[music] start gen={} cycle {:.2}..{:.2}",
            self.generation,
            cycle.start,
            cycle.end
        );
        Some(LoopStart {
            generation: self.generation,
            fade: MasterFade {
                at: now,
                target: self.params.fade_in_target,
                end: now + self.params.fade_in_sec,
            },
            cycle,
            wake_at,
        })
    }

    /// Wake handler. Liveness, generation and due-time are all checked here,
    /// under the same `&mut` as the scheduling decision.
    pub fn poll(&mut self, now: f64, generation: u64) -> Option<Cycle> {
        if !self.playing || generation != self.generation {
            return None;
        }
        let wake = self.next_wake?;
        if now < wake {
            return None;
        }
        let offset = (now + self.params.wake_lead).max(self.last_end);
        let cycle = lay_out_cycle(&self.params, offset, self.generation);
        self.last_end = cycle.end;
        self.next_wake = Some(cycle.end - self.params.wake_lead);
        self.prune(now);
        self.cycles.push_back(cycle.clone());
        log::debug!("[music] cycle {:.2}..{:.2}", cycle.start, cycle.end);
        Some(cycle)
    }

    /// End playback. Returns `None` when already stopped.
    pub fn stop(&mut self, now: f64) -> Option<LoopStop> {
        if !self.playing {
            return None;
        }
        self.playing = false;
        self.generation += 1;
        self.next_wake = None;
        self.suspend_pending = true;

        let cutoff = now + self.params.fade_out_sec;
        for c in self.cycles.iter_mut() {
            c.cutoff = Some(c.cutoff.map_or(cutoff, |prev| prev.min(cutoff)));
        }
        log::debug!("[music] stop gen={} cutoff={:.2}", self.generation, cutoff);
        Some(LoopStop {
            generation: self.generation,
            fade: MasterFade {
                at: now,
                target: 0.0,
                end: cutoff,
            },
            cutoff,
            suspend_at: now + self.params.suspend_after_sec,
        })
    }

    /// Consume the deferred suspend request issued by the stop of `generation`.
    pub fn take_suspend(&mut self, generation: u64) -> bool {
        if self.playing || !self.suspend_pending || generation != self.generation {
            return false;
        }
        self.suspend_pending = false;
        true
    }

    /// Notes that will still be heard after `t`.
    pub fn notes_sounding_after(&self, t: f64) -> usize {
        self.cycles.iter().map(|c| c.sounding_after(t)).sum()
    }

    fn prune(&mut self, now: f64) {
        self.cycles.retain(|c| c.last_sound() > now);
    }
}
