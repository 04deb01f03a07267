use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys as web;

use crate::audio::{self, AudioHub, MusicBus};
use crate::core::device::{bus_is_stale, should_suspend};
use crate::core::{build_cue, Cycle, CueKind, MasterFade, MusicLoop};
use crate::dom::Timeout;

struct BoardState {
    hub: AudioHub,
    rng: SmallRng,
    music: MusicLoop,
    bus: Option<MusicBus>,
    // (stop time, node) for every loop oscillator that may still sound
    loop_voices: Vec<(f64, web::OscillatorNode)>,
    wake: Option<Timeout>,
    suspend: Option<Timeout>,
}

impl BoardState {
    fn play(&mut self, kind: CueKind, multiplier: f32) {
        let ctx = match self.hub.acquire() {
            Ok(ctx) => ctx,
            Err(e) => {
                log::debug!("[cue] {} skipped: {}", kind.name(), e);
                return;
            }
        };
        let plan = build_cue(kind, multiplier, ctx.current_time());
        audio::render_plan(ctx, &plan, &mut self.rng);
    }

    fn ensure_bus(&mut self) -> bool {
        let Some(ctx) = self.hub.current() else {
            return false;
        };
        let epoch = self.hub.epoch();
        if !bus_is_stale(self.bus.as_ref().map(|b| b.epoch), epoch) {
            return true;
        }
        let bus = match MusicBus::build(ctx, epoch) {
            Ok(bus) => bus,
            Err(e) => {
                log::warn!("[music] bus unavailable: {:?}", e);
                return false;
            }
        };
        // the device was replaced under a playing loop: bring the new bus up
        if self.music.is_playing() {
            let now = ctx.current_time();
            let params = &self.music.params;
            bus.fade(&MasterFade {
                at: now,
                target: params.fade_in_target,
                end: now + params.fade_in_sec,
            });
            log::debug!("[music] bus rebuilt for epoch {}", epoch);
        }
        self.loop_voices.clear();
        self.bus = Some(bus);
        true
    }

    fn render_cycle(&mut self, cycle: &Cycle) {
        if !self.ensure_bus() {
            return;
        }
        let (Some(ctx), Some(bus)) = (self.hub.current(), self.bus.as_ref()) else {
            return;
        };
        let now = ctx.current_time();
        self.loop_voices.retain(|(stop, _)| *stop > now);
        for tone in cycle.tones() {
            match audio::render_tone(ctx, &tone, Some(bus)) {
                Ok(osc) => self.loop_voices.push((tone.stop, osc)),
                Err(e) => log::debug!("[music] note skipped: {:?}", e),
            }
        }
    }
}

/// Explicit handle to the shared output device: every cue and the ambient
/// music loop go through one `SoundBoard` created by the page at start-up.
///
/// All methods are fire-and-forget; when audio is unavailable they do nothing.
#[wasm_bindgen]
pub struct SoundBoard {
    inner: Rc<RefCell<BoardState>>,
}

impl SoundBoard {
    pub(crate) fn play(&self, kind: CueKind, multiplier: f32) {
        self.inner.borrow_mut().play(kind, multiplier);
    }
}

impl Default for SoundBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl SoundBoard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SoundBoard {
        SoundBoard {
            inner: Rc::new(RefCell::new(BoardState {
                hub: AudioHub::default(),
                rng: SmallRng::from_entropy(),
                music: MusicLoop::default(),
                bus: None,
                loop_voices: Vec::new(),
                wake: None,
                suspend: None,
            })),
        }
    }

    pub fn shimmer(&self, pitch: Option<f32>) {
        self.play(CueKind::Shimmer, pitch.unwrap_or(1.0));
    }

    pub fn whoosh(&self) {
        self.play(CueKind::Whoosh, 1.0);
    }

    pub fn warm_tone(&self) {
        self.play(CueKind::WarmTone, 1.0);
    }

    pub fn pop(&self) {
        self.play(CueKind::Pop, 1.0);
    }

    pub fn heartbeat(&self) {
        self.play(CueKind::Heartbeat, 1.0);
    }

    pub fn celebration(&self) {
        self.play(CueKind::Celebration, 1.0);
    }

    pub fn soft_click(&self) {
        self.play(CueKind::SoftClick, 1.0);
    }

    pub fn ethereal_reveal(&self, pitch: Option<f32>) {
        self.play(CueKind::EtherealReveal, pitch.unwrap_or(1.0));
    }

    pub fn paper_unfold(&self) {
        self.play(CueKind::PaperUnfold, 1.0);
    }

    pub fn is_music_playing(&self) -> bool {
        self.inner.borrow().music.is_playing()
    }

    pub fn start_music_loop(&self) {
        let mut st = self.inner.borrow_mut();
        let now = match st.hub.acquire() {
            Ok(ctx) => ctx.current_time(),
            Err(e) => {
                log::debug!("[music] start skipped: {}", e);
                return;
            }
        };
        if st.music.is_playing() || !st.ensure_bus() {
            return;
        }
        let Some(start) = st.music.start(now) else {
            return;
        };
        st.suspend = None;
        if let Some(bus) = &st.bus {
            bus.fade(&start.fade);
        }
        st.render_cycle(&start.cycle);
        st.wake = arm_wake(Rc::downgrade(&self.inner), start.generation, start.wake_at - now);
        log::info!("[music] playing");
    }

    pub fn stop_music_loop(&self) {
        let mut st = self.inner.borrow_mut();
        let Some(now) = st.hub.current().map(|c| c.current_time()) else {
            return;
        };
        let Some(stop) = st.music.stop(now) else {
            return;
        };
        // dropping the handle clears the pending timeout
        st.wake = None;
        if let Some(bus) = &st.bus {
            bus.fade(&stop.fade);
        }
        for (stop_at, osc) in st.loop_voices.drain(..) {
            if stop_at > stop.cutoff {
                _ = osc.stop_with_when(stop.cutoff);
            }
        }
        let weak = Rc::downgrade(&self.inner);
        let generation = stop.generation;
        st.suspend = Timeout::schedule(stop.suspend_at - now, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut st = inner.borrow_mut();
            let state = st.hub.current().map(audio::device_state);
            if st.music.take_suspend(generation) && should_suspend(state, st.music.is_playing()) {
                st.hub.suspend();
            }
            st.suspend = None;
        });
        log::info!("[music] stopped");
    }

    /// Soft click, then flip the loop. Returns whether music is now playing.
    pub fn toggle_music(&self) -> bool {
        self.soft_click();
        if self.is_music_playing() {
            self.stop_music_loop();
        } else {
            self.start_music_loop();
        }
        self.is_music_playing()
    }

    /// Page teardown: stop everything and release the device.
    pub fn close(&self) {
        let mut st = self.inner.borrow_mut();
        let now = st.hub.current().map(|c| c.current_time()).unwrap_or(0.0);
        _ = st.music.stop(now);
        st.wake = None;
        st.suspend = None;
        st.loop_voices.clear();
        st.bus = None;
        st.hub.close();
    }
}

fn arm_wake(weak: Weak<RefCell<BoardState>>, generation: u64, delay_sec: f64) -> Option<Timeout> {
    Timeout::schedule(delay_sec, move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut st = inner.borrow_mut();
        let Some(now) = st.hub.current().map(|c| c.current_time()) else {
            return;
        };
        // stale wakes (stopped or restarted since) fall through here
        if let Some(cycle) = st.music.poll(now, generation) {
            st.render_cycle(&cycle);
        }
        if st.music.generation() == generation {
            st.wake = st
                .music
                .next_wake()
                .and_then(|wake| arm_wake(weak.clone(), generation, wake - now));
        }
    })
}
