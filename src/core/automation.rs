// Parameter automation timelines.
//
// An [`Automation`] is the ordered list of value changes applied to a single
// audio parameter (a gain or a frequency) against the device clock. It is a
// plain value so cue shapes can be built, inspected and tested without an
// audio device; the web layer replays the events onto an `AudioParam`.

use smallvec::SmallVec;

/// Smallest target an exponential ramp may aim for.
///
/// Exponential ramps towards zero are undefined, so every release ends on this
/// floor instead and the oscillator is stopped shortly after.
pub const SILENCE_FLOOR: f32 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamEvent {
    /// Jump to `value` at `at`.
    Set { value: f32, at: f64 },
    /// Ramp linearly from the previous event to `value`, arriving at `at`.
    Linear { value: f32, at: f64 },
    /// Ramp exponentially from the previous event to `value`, arriving at `at`.
    Exponential { value: f32, at: f64 },
}

impl ParamEvent {
    #[inline]
    pub fn time(&self) -> f64 {
        match *self {
            ParamEvent::Set { at, .. }
            | ParamEvent::Linear { at, .. }
            | ParamEvent::Exponential { at, .. } => at,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        match *self {
            ParamEvent::Set { value, .. }
            | ParamEvent::Linear { value, .. }
            | ParamEvent::Exponential { value, .. } => value,
        }
    }

    fn shifted(self, dt: f64) -> Self {
        match self {
            ParamEvent::Set { value, at } => ParamEvent::Set { value, at: at + dt },
            ParamEvent::Linear { value, at } => ParamEvent::Linear { value, at: at + dt },
            ParamEvent::Exponential { value, at } => ParamEvent::Exponential { value, at: at + dt },
        }
    }

    fn scaled(self, factor: f32) -> Self {
        match self {
            ParamEvent::Set { value, at } => ParamEvent::Set { value: value * factor, at },
            ParamEvent::Linear { value, at } => ParamEvent::Linear { value: value * factor, at },
            ParamEvent::Exponential { value, at } => ParamEvent::Exponential {
                value: value * factor,
                at,
            },
        }
    }
}

/// Time-ordered list of [`ParamEvent`]s, always opened by a `Set`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Automation {
    events: SmallVec<[ParamEvent; 4]>,
}

impl Automation {
    pub fn starting_at(value: f32, at: f64) -> Self {
        let mut events = SmallVec::new();
        events.push(ParamEvent::Set { value, at });
        Self { events }
    }

    /// Constant value from `at` onwards.
    pub fn constant(value: f32, at: f64) -> Self {
        Self::starting_at(value, at)
    }

    pub fn linear(mut self, value: f32, at: f64) -> Self {
        self.push(ParamEvent::Linear { value, at });
        self
    }

    /// Exponential ramp; targets below [`SILENCE_FLOOR`] are raised to it.
    pub fn exponential(mut self, value: f32, at: f64) -> Self {
        self.push(ParamEvent::Exponential {
            value: value.max(SILENCE_FLOOR),
            at,
        });
        self
    }

    /// Linear attack from silence to `peak`, exponential release to the floor.
    pub fn attack_release(start: f64, peak: f32, attack_end: f64, release_end: f64) -> Self {
        Self::starting_at(0.0, start)
            .linear(peak, attack_end)
            .exponential(SILENCE_FLOOR, release_end)
    }

    /// Instant onset at `level`, exponential release to the floor.
    pub fn struck(start: f64, level: f32, release_end: f64) -> Self {
        Self::starting_at(level, start).exponential(SILENCE_FLOOR, release_end)
    }

    fn push(&mut self, ev: ParamEvent) {
        debug_assert!(
            self.events.last().map_or(true, |prev| prev.time() <= ev.time()),
            "automation events must be time-ordered"
        );
        self.events.push(ev);
    }

    #[inline]
    pub fn events(&self) -> &[ParamEvent] {
        &self.events
    }

    pub fn start_time(&self) -> f64 {
        self.events.first().map_or(0.0, ParamEvent::time)
    }

    pub fn end_time(&self) -> f64 {
        self.events.last().map_or(0.0, ParamEvent::time)
    }

    pub fn final_value(&self) -> f32 {
        self.events.last().map_or(0.0, ParamEvent::value)
    }

    /// Same shape moved `dt` seconds later.
    pub fn shifted(&self, dt: f64) -> Self {
        Self {
            events: self.events.iter().map(|e| e.shifted(dt)).collect(),
        }
    }

    /// Same timing with every value multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            events: self.events.iter().map(|e| e.scaled(factor)).collect(),
        }
    }

    /// Evaluate the parameter at time `t` the way an audio device would.
    pub fn value_at(&self, t: f64) -> f32 {
        let Some(first) = self.events.first() else {
            return 0.0;
        };
        if t <= first.time() {
            return first.value();
        }
        let mut prev = *first;
        for ev in self.events.iter().skip(1) {
            if t < ev.time() {
                return match *ev {
                    ParamEvent::Set { .. } => prev.value(),
                    ParamEvent::Linear { value, at } => {
                        let span = at - prev.time();
                        if span <= 0.0 {
                            return value;
                        }
                        let k = ((t - prev.time()) / span) as f32;
                        prev.value() + (value - prev.value()) * k
                    }
                    ParamEvent::Exponential { value, at } => {
                        let v0 = prev.value();
                        let span = at - prev.time();
                        if v0 <= 0.0 || span <= 0.0 {
                            return v0;
                        }
                        let k = ((t - prev.time()) / span) as f32;
                        v0 * (value / v0).powf(k)
                    }
                };
            }
            prev = *ev;
        }
        prev.value()
    }
}
