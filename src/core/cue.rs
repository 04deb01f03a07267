// Sound cue shapes.
//
// Every cue is described as a [`CuePlan`]: a handful of sine tones and noise
// bursts with their own gain and frequency automation, all expressed in
// absolute device time. Plans are built fresh per invocation and carry no
// state; rendering them onto real audio nodes happens in the web layer.

use smallvec::SmallVec;

use super::automation::Automation;
use super::noise::FadeShape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CueKind {
    Shimmer,
    Whoosh,
    WarmTone,
    Pop,
    Heartbeat,
    Celebration,
    SoftClick,
    EtherealReveal,
    PaperUnfold,
}

impl CueKind {
    pub const ALL: [CueKind; 9] = [
        CueKind::Shimmer,
        CueKind::Whoosh,
        CueKind::WarmTone,
        CueKind::Pop,
        CueKind::Heartbeat,
        CueKind::Celebration,
        CueKind::SoftClick,
        CueKind::EtherealReveal,
        CueKind::PaperUnfold,
    ];

    /// Whether the multiplier passed with this cue transposes it.
    pub fn is_pitched(self) -> bool {
        matches!(self, CueKind::Shimmer | CueKind::EtherealReveal)
    }

    pub fn name(self) -> &'static str {
        match self {
            CueKind::Shimmer => "shimmer",
            CueKind::Whoosh => "whoosh",
            CueKind::WarmTone => "warm-tone",
            CueKind::Pop => "pop",
            CueKind::Heartbeat => "heartbeat",
            CueKind::Celebration => "celebration",
            CueKind::SoftClick => "soft-click",
            CueKind::EtherealReveal => "ethereal-reveal",
            CueKind::PaperUnfold => "paper-unfold",
        }
    }
}

/// Where a tone's envelope output is connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Straight to the device output.
    Destination,
    /// Through the music loop's master gain and delay reverb.
    MusicBus,
}

/// One sine oscillator feeding one gain envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct Tone {
    pub start: f64,
    pub stop: f64,
    pub frequency: Automation,
    pub gain: Automation,
    pub route: Route,
}

impl Tone {
    pub fn sine(start: f64, stop: f64, frequency: Automation, gain: Automation) -> Self {
        debug_assert!(stop > start);
        Self {
            start,
            stop,
            frequency,
            gain,
            route: Route::Destination,
        }
    }

    pub fn routed(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    /// Frequency at the moment the oscillator starts.
    pub fn base_frequency(&self) -> f32 {
        self.frequency.value_at(self.start)
    }

    fn shifted(&self, dt: f64) -> Self {
        Self {
            start: self.start + dt,
            stop: self.stop + dt,
            frequency: self.frequency.shifted(dt),
            gain: self.gain.shifted(dt),
            route: self.route,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    Bandpass,
    Highpass,
}

/// A one-shot buffer of shaped noise pushed through a swept filter.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseBurst {
    pub start: f64,
    pub duration: f64,
    pub fade: FadeShape,
    pub filter: FilterKind,
    pub q: Option<f32>,
    pub cutoff: Automation,
    pub gain: Automation,
}

impl NoiseBurst {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn shifted(&self, dt: f64) -> Self {
        Self {
            start: self.start + dt,
            cutoff: self.cutoff.shifted(dt),
            gain: self.gain.shifted(dt),
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CuePlan {
    pub tones: SmallVec<[Tone; 6]>,
    pub noises: SmallVec<[NoiseBurst; 1]>,
}

impl CuePlan {
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty() && self.noises.is_empty()
    }

    /// Latest moment any generator in the plan is still running.
    pub fn end_time(&self) -> f64 {
        let tones = self.tones.iter().map(|t| t.stop);
        let noises = self.noises.iter().map(NoiseBurst::end);
        tones.chain(noises).fold(f64::NEG_INFINITY, f64::max)
    }

    /// Append `other` delayed by `dt` seconds.
    pub fn append_delayed(&mut self, other: &CuePlan, dt: f64) {
        self.tones.extend(other.tones.iter().map(|t| t.shifted(dt)));
        self.noises.extend(other.noises.iter().map(|n| n.shifted(dt)));
    }
}

/// Multipliers that are not strictly positive and finite fall back to 1.
#[inline]
pub fn sanitize_multiplier(m: f32) -> f32 {
    if m.is_finite() && m > 0.0 {
        m
    } else {
        1.0
    }
}

/// Build the plan for `kind` starting at device time `now`.
pub fn build_cue(kind: CueKind, multiplier: f32, now: f64) -> CuePlan {
    let p = sanitize_multiplier(multiplier);
    match kind {
        CueKind::Shimmer => shimmer(p, now),
        CueKind::Whoosh => whoosh(now),
        CueKind::WarmTone => warm_tone(now),
        CueKind::Pop => pop(now),
        CueKind::Heartbeat => heartbeat(now),
        CueKind::Celebration => celebration(now),
        CueKind::SoftClick => soft_click(now),
        CueKind::EtherealReveal => ethereal_reveal(p, now),
        CueKind::PaperUnfold => paper_unfold(now),
    }
}

fn shimmer(p: f32, now: f64) -> CuePlan {
    let mut plan = CuePlan::default();
    plan.tones.push(Tone::sine(
        now,
        now + 0.5,
        Automation::starting_at(1200.0 * p, now).exponential(2400.0 * p, now + 0.08),
        Automation::attack_release(now, 0.06, now + 0.01, now + 0.4),
    ));
    plan.tones.push(Tone::sine(
        now,
        now + 0.5,
        Automation::starting_at(1800.0 * p, now).exponential(3200.0 * p, now + 0.1),
        Automation::attack_release(now, 0.03, now + 0.02, now + 0.35),
    ));
    plan
}

fn whoosh(now: f64) -> CuePlan {
    let mut plan = CuePlan::default();
    plan.noises.push(NoiseBurst {
        start: now,
        duration: 0.3,
        fade: FadeShape::Linear,
        filter: FilterKind::Bandpass,
        q: Some(1.5),
        cutoff: Automation::starting_at(300.0, now)
            .exponential(1500.0, now + 0.15)
            .exponential(200.0, now + 0.3),
        gain: Automation::attack_release(now, 0.08, now + 0.05, now + 0.3),
    });
    plan
}

fn warm_tone(now: f64) -> CuePlan {
    let mut plan = CuePlan::default();
    for (i, freq) in [330.0, 440.0, 550.0].into_iter().enumerate() {
        let stagger = i as f64 * 0.02;
        plan.tones.push(Tone::sine(
            now + stagger,
            now + 0.7,
            Automation::constant(freq, now),
            Automation::attack_release(now, 0.035, now + 0.05 + stagger, now + 0.6),
        ));
    }
    plan
}

fn pop(now: f64) -> CuePlan {
    let mut plan = CuePlan::default();
    plan.tones.push(Tone::sine(
        now,
        now + 0.2,
        Automation::starting_at(800.0, now).exponential(200.0, now + 0.1),
        Automation::struck(now, 0.12, now + 0.15),
    ));
    plan
}

fn heartbeat(now: f64) -> CuePlan {
    let mut plan = CuePlan::default();
    // lub, dub
    for offset in [0.0, 0.15] {
        let t = now + offset;
        plan.tones.push(Tone::sine(
            t,
            t + 0.3,
            Automation::starting_at(60.0, t).exponential(40.0, t + 0.15),
            Automation::attack_release(t, 0.25, t + 0.02, t + 0.2),
        ));
    }
    plan
}

/// Ascending arpeggio, C5 up to G6.
pub const CELEBRATION_NOTES: [f32; 6] = [523.25, 659.25, 783.99, 1046.5, 1318.5, 1568.0];
pub const CELEBRATION_STAGGER_SEC: f64 = 0.08;
pub const CELEBRATION_HEARTBEAT_DELAY_SEC: f64 = 0.3;

fn celebration(now: f64) -> CuePlan {
    let mut plan = CuePlan::default();
    for (i, freq) in CELEBRATION_NOTES.into_iter().enumerate() {
        let d = now + i as f64 * CELEBRATION_STAGGER_SEC;
        plan.tones.push(Tone::sine(
            d,
            d + 1.0,
            Automation::constant(freq, d),
            Automation::attack_release(d, 0.08, d + 0.02, d + 0.8),
        ));
        plan.tones.push(Tone::sine(
            d,
            d + 0.6,
            Automation::constant(freq * 1.5, d),
            Automation::attack_release(d, 0.03, d + 0.02, d + 0.5),
        ));
    }
    plan.append_delayed(&heartbeat(now), CELEBRATION_HEARTBEAT_DELAY_SEC);
    plan
}

fn soft_click(now: f64) -> CuePlan {
    let mut plan = CuePlan::default();
    plan.tones.push(Tone::sine(
        now,
        now + 0.08,
        Automation::starting_at(1000.0, now).exponential(500.0, now + 0.03),
        Automation::struck(now, 0.08, now + 0.06),
    ));
    plan
}

fn ethereal_reveal(p: f32, now: f64) -> CuePlan {
    let mut plan = CuePlan::default();
    for (i, freq) in [440.0, 554.0, 660.0].into_iter().enumerate() {
        let t = now + i as f64 * 0.1;
        plan.tones.push(Tone::sine(
            t,
            t + 1.5,
            Automation::constant(freq * p, t),
            Automation::attack_release(t, 0.04, t + 0.1, t + 1.2),
        ));
    }
    plan
}

fn paper_unfold(now: f64) -> CuePlan {
    let mut plan = CuePlan::default();
    plan.noises.push(NoiseBurst {
        start: now,
        duration: 0.4,
        fade: FadeShape::Quadratic,
        filter: FilterKind::Highpass,
        q: None,
        cutoff: Automation::starting_at(2000.0, now).exponential(500.0, now + 0.3),
        gain: Automation::attack_release(now, 0.05, now + 0.02, now + 0.4),
    });
    // warm bed under the crinkle
    let t = now + 0.1;
    plan.tones.push(Tone::sine(
        t,
        now + 1.0,
        Automation::constant(330.0, t),
        Automation::attack_release(t, 0.03, now + 0.15, now + 0.8),
    ));
    plan
}
