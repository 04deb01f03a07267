use rand::Rng;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::core::constants::{REVERB_DELAY_SEC, REVERB_FEEDBACK, REVERB_WET};
use crate::core::device::{acquire_action, DeviceAction, DeviceState};
use crate::core::noise::{buffer_len, shaped_noise};
use crate::core::{Automation, CuePlan, FilterKind, FxError, MasterFade, NoiseBurst, ParamEvent, Route, Tone};

/// The single output device shared by every cue and the music loop.
///
/// Created lazily on first use, recreated if it was closed, resumed if the
/// browser parked it. `epoch` changes whenever a new context is created so
/// that nodes built on an older context can be rebuilt.
#[derive(Default)]
pub struct AudioHub {
    ctx: Option<web::AudioContext>,
    epoch: u32,
}

pub fn device_state(ctx: &web::AudioContext) -> DeviceState {
    match ctx.state() {
        web::AudioContextState::Running => DeviceState::Running,
        web::AudioContextState::Suspended => DeviceState::Suspended,
        _ => DeviceState::Closed,
    }
}

impl AudioHub {
    pub fn acquire(&mut self) -> Result<&web::AudioContext, FxError> {
        match acquire_action(self.ctx.as_ref().map(device_state)) {
            DeviceAction::Create => {
                let ctx = web::AudioContext::new()
                    .map_err(|e| FxError::DeviceUnavailable(format!("{:?}", e)))?;
                self.epoch = self.epoch.wrapping_add(1);
                log::info!("[audio] context created (epoch {})", self.epoch);
                resume(&ctx);
                self.ctx = Some(ctx);
            }
            DeviceAction::Resume => {
                if let Some(ctx) = &self.ctx {
                    resume(ctx);
                }
            }
            DeviceAction::Use => {}
        }
        self.ctx
            .as_ref()
            .ok_or_else(|| FxError::DeviceUnavailable("no context".into()))
    }

    /// The current context without touching its state.
    #[inline]
    pub fn current(&self) -> Option<&web::AudioContext> {
        self.ctx.as_ref()
    }

    #[inline]
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn suspend(&self) {
        if let Some(ctx) = &self.ctx {
            if device_state(ctx) == DeviceState::Running {
                log::debug!("[audio] suspending idle context");
                settle(ctx.suspend(), "suspend");
            }
        }
    }

    pub fn close(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            settle(ctx.close(), "close");
        }
    }
}

fn resume(ctx: &web::AudioContext) {
    settle(ctx.resume(), "resume");
}

// Autoplay policy may reject; that is expected and only worth a debug line.
fn settle(promise: Result<js_sys::Promise, wasm_bindgen::JsValue>, what: &'static str) {
    match promise {
        Ok(p) => spawn_local(async move {
            if let Err(e) = JsFuture::from(p).await {
                log::debug!("[audio] {} rejected: {:?}", what, e);
            }
        }),
        Err(e) => log::debug!("[audio] {} failed: {:?}", what, e),
    }
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(ctx).map_err(|e| anyhow::anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

/// Replay an automation timeline onto a live parameter.
pub fn apply_automation(param: &web::AudioParam, automation: &Automation) {
    for ev in automation.events() {
        let res = match *ev {
            ParamEvent::Set { value, at } => param.set_value_at_time(value, at),
            ParamEvent::Linear { value, at } => param.linear_ramp_to_value_at_time(value, at),
            ParamEvent::Exponential { value, at } => {
                param.exponential_ramp_to_value_at_time(value, at)
            }
        };
        if let Err(e) = res {
            log::debug!("[audio] automation event rejected: {:?}", e);
        }
    }
}

/// Master gain plus a feedback-delay "reverb", feeding the destination.
pub struct MusicBus {
    pub master_gain: web::GainNode,
    pub epoch: u32,
}

impl MusicBus {
    pub fn build(ctx: &web::AudioContext, epoch: u32) -> anyhow::Result<Self> {
        let master_gain = create_gain(ctx, 0.0, "Master")?;
        let delay = ctx
            .create_delay()
            .map_err(|e| anyhow::anyhow!("DelayNode error: {:?}", e))?;
        delay.delay_time().set_value(REVERB_DELAY_SEC);
        let feedback = create_gain(ctx, REVERB_FEEDBACK, "Delay feedback")?;
        let wet = create_gain(ctx, REVERB_WET, "Reverb wet")?;

        // master -> dst, master -> delay <-> feedback, delay -> wet -> dst
        let dst = ctx.destination();
        _ = master_gain.connect_with_audio_node(&dst);
        _ = master_gain.connect_with_audio_node(&delay);
        _ = delay.connect_with_audio_node(&feedback);
        _ = feedback.connect_with_audio_node(&delay);
        _ = delay.connect_with_audio_node(&wet);
        _ = wet.connect_with_audio_node(&dst);
        Ok(Self { master_gain, epoch })
    }

    pub fn fade(&self, fade: &MasterFade) {
        let g = self.master_gain.gain();
        let current = g.value();
        _ = g.cancel_scheduled_values(fade.at);
        _ = g.set_value_at_time(current, fade.at);
        _ = g.linear_ramp_to_value_at_time(fade.target, fade.end);
    }
}

/// Build and start one tone. Returns the oscillator so its stop time can be
/// moved later (music loop cut-off).
pub fn render_tone(
    ctx: &web::AudioContext,
    tone: &Tone,
    bus: Option<&MusicBus>,
) -> anyhow::Result<web::OscillatorNode> {
    let osc = web::OscillatorNode::new(ctx).map_err(|e| anyhow::anyhow!("OscillatorNode error: {:?}", e))?;
    osc.set_type(web::OscillatorType::Sine);
    apply_automation(&osc.frequency(), &tone.frequency);
    let env = create_gain(ctx, 0.0, "Envelope")?;
    apply_automation(&env.gain(), &tone.gain);
    _ = osc.connect_with_audio_node(&env);
    match (tone.route, bus) {
        (Route::MusicBus, Some(bus)) => {
            _ = env.connect_with_audio_node(&bus.master_gain);
        }
        _ => {
            _ = env.connect_with_audio_node(&ctx.destination());
        }
    }
    _ = osc.start_with_when(tone.start);
    _ = osc.stop_with_when(tone.stop);
    Ok(osc)
}

pub fn render_noise<R: Rng + ?Sized>(
    ctx: &web::AudioContext,
    noise: &NoiseBurst,
    rng: &mut R,
) -> anyhow::Result<()> {
    let sr = ctx.sample_rate();
    let len = buffer_len(sr, noise.duration);
    if len == 0 {
        return Ok(());
    }
    let buffer = ctx
        .create_buffer(1, len as u32, sr)
        .map_err(|e| anyhow::anyhow!("AudioBuffer error: {:?}", e))?;
    let mut samples = shaped_noise(rng, len, noise.fade);
    _ = buffer.copy_to_channel(&mut samples, 0);

    let source = web::AudioBufferSourceNode::new(ctx)
        .map_err(|e| anyhow::anyhow!("AudioBufferSourceNode error: {:?}", e))?;
    source.set_buffer(Some(&buffer));

    let filter = web::BiquadFilterNode::new(ctx)
        .map_err(|e| anyhow::anyhow!("BiquadFilterNode error: {:?}", e))?;
    filter.set_type(match noise.filter {
        FilterKind::Bandpass => web::BiquadFilterType::Bandpass,
        FilterKind::Highpass => web::BiquadFilterType::Highpass,
    });
    apply_automation(&filter.frequency(), &noise.cutoff);
    if let Some(q) = noise.q {
        filter.q().set_value(q);
    }

    let env = create_gain(ctx, 0.0, "Noise envelope")?;
    apply_automation(&env.gain(), &noise.gain);

    _ = source.connect_with_audio_node(&filter);
    _ = filter.connect_with_audio_node(&env);
    _ = env.connect_with_audio_node(&ctx.destination());
    _ = source.start_with_when(noise.start);
    Ok(())
}

/// Render a whole cue plan straight to the device output.
pub fn render_plan<R: Rng + ?Sized>(ctx: &web::AudioContext, plan: &CuePlan, rng: &mut R) {
    for tone in plan.tones.iter() {
        if let Err(e) = render_tone(ctx, tone, None) {
            log::debug!("[audio] tone skipped: {:?}", e);
        }
    }
    for noise in plan.noises.iter() {
        if let Err(e) = render_noise(ctx, noise, rng) {
            log::debug!("[audio] noise skipped: {:?}", e);
        }
    }
}
