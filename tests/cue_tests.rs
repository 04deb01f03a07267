// Host-side tests for cue shapes and parameter automation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod automation {
    include!("../src/core/automation.rs");
}
mod noise {
    include!("../src/core/noise.rs");
}
mod cue {
    include!("../src/core/cue.rs");
}

use automation::*;
use cue::*;
use noise::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

const NOW: f64 = 3.25;

fn all_automations(plan: &CuePlan) -> Vec<&Automation> {
    let mut out = Vec::new();
    for t in plan.tones.iter() {
        out.push(&t.frequency);
        out.push(&t.gain);
    }
    for n in plan.noises.iter() {
        out.push(&n.cutoff);
        out.push(&n.gain);
    }
    out
}

#[test]
fn every_cue_produces_sound_starting_now() {
    for kind in CueKind::ALL {
        let plan = build_cue(kind, 1.0, NOW);
        assert!(!plan.is_empty(), "{} is silent", kind.name());
        let earliest = plan
            .tones
            .iter()
            .map(|t| t.start)
            .chain(plan.noises.iter().map(|n| n.start))
            .fold(f64::INFINITY, f64::min);
        assert!((earliest - NOW).abs() < 1e-9, "{} starts at {earliest}", kind.name());
        assert!(plan.end_time() > NOW);
    }
}

#[test]
fn exponential_targets_never_reach_zero() {
    for kind in CueKind::ALL {
        let plan = build_cue(kind, 1.0, NOW);
        for a in all_automations(&plan) {
            for ev in a.events() {
                if let ParamEvent::Exponential { value, .. } = *ev {
                    assert!(value >= SILENCE_FLOOR, "{}: exp target {value}", kind.name());
                }
            }
        }
    }
}

#[test]
fn gain_envelopes_end_on_the_floor_before_stop() {
    for kind in CueKind::ALL {
        let plan = build_cue(kind, 1.0, NOW);
        for t in plan.tones.iter() {
            assert!((t.gain.final_value() - SILENCE_FLOOR).abs() < 1e-9);
            assert!(t.gain.end_time() <= t.stop + 1e-9, "{} rings past stop", kind.name());
        }
    }
}

#[test]
fn automation_events_are_time_ordered() {
    for kind in CueKind::ALL {
        let plan = build_cue(kind, 1.0, NOW);
        for a in all_automations(&plan) {
            let times: Vec<f64> = a.events().iter().map(ParamEvent::time).collect();
            assert!(times.windows(2).all(|w| w[0] <= w[1]), "{}: {times:?}", kind.name());
        }
    }
}

#[test]
fn shimmer_pitch_scales_every_frequency_linearly() {
    let base = build_cue(CueKind::Shimmer, 1.0, NOW);
    let low = build_cue(CueKind::Shimmer, 0.6, NOW);
    assert_eq!(base.tones.len(), 2);
    for (b, l) in base.tones.iter().zip(low.tones.iter()) {
        for (eb, el) in b.frequency.events().iter().zip(l.frequency.events()) {
            assert!((el.value() - eb.value() * 0.6).abs() < 1e-3);
            assert_eq!(eb.time(), el.time());
        }
    }
    assert!((base.tones[0].base_frequency() - 1200.0).abs() < 1e-3);
    assert!((base.tones[1].base_frequency() - 1800.0).abs() < 1e-3);
}

#[test]
fn ethereal_reveal_is_transposed_by_pitch() {
    let plan = build_cue(CueKind::EtherealReveal, 2.0, NOW);
    let freqs: Vec<f32> = plan.tones.iter().map(Tone::base_frequency).collect();
    assert_eq!(freqs, vec![880.0, 1108.0, 1320.0]);
    let starts: Vec<f64> = plan.tones.iter().map(|t| t.start - NOW).collect();
    for (got, want) in starts.iter().zip([0.0, 0.1, 0.2]) {
        assert!((got - want).abs() < 1e-9);
    }
}

#[test]
fn unpitched_cues_ignore_the_multiplier() {
    for kind in CueKind::ALL.into_iter().filter(|k| !k.is_pitched()) {
        assert_eq!(build_cue(kind, 1.0, NOW), build_cue(kind, 3.0, NOW), "{}", kind.name());
    }
}

#[test]
fn invalid_multipliers_fall_back_to_unity() {
    let reference = build_cue(CueKind::Shimmer, 1.0, NOW);
    for m in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        assert_eq!(build_cue(CueKind::Shimmer, m, NOW), reference, "multiplier {m}");
    }
    assert_eq!(sanitize_multiplier(0.8), 0.8);
}

#[test]
fn celebration_is_an_arpeggio_followed_by_a_heartbeat() {
    let plan = build_cue(CueKind::Celebration, 1.0, NOW);
    assert_eq!(plan.tones.len(), CELEBRATION_NOTES.len() * 2 + 2);

    for (i, note) in CELEBRATION_NOTES.iter().enumerate() {
        let fundamental = &plan.tones[i * 2];
        let overtone = &plan.tones[i * 2 + 1];
        let expected_start = NOW + i as f64 * CELEBRATION_STAGGER_SEC;
        assert!((fundamental.start - expected_start).abs() < 1e-9);
        assert!((fundamental.base_frequency() - note).abs() < 1e-3);
        assert!((overtone.base_frequency() - note * 1.5).abs() < 1e-2);
    }

    let beats = &plan.tones[CELEBRATION_NOTES.len() * 2..];
    let lone = build_cue(CueKind::Heartbeat, 1.0, NOW);
    for (b, l) in beats.iter().zip(lone.tones.iter()) {
        assert!((b.start - l.start - CELEBRATION_HEARTBEAT_DELAY_SEC).abs() < 1e-9);
        assert!((b.base_frequency() - 60.0).abs() < 1e-3);
    }
}

#[test]
fn heartbeat_has_lub_and_dub() {
    let plan = build_cue(CueKind::Heartbeat, 1.0, NOW);
    assert_eq!(plan.tones.len(), 2);
    assert!((plan.tones[1].start - plan.tones[0].start - 0.15).abs() < 1e-9);
    // frequency falls 60 -> 40 Hz over 150 ms
    let f = &plan.tones[0].frequency;
    assert!((f.value_at(NOW + 0.15) - 40.0).abs() < 1e-3);
    assert!(f.value_at(NOW + 0.075) < 60.0 && f.value_at(NOW + 0.075) > 40.0);
}

#[test]
fn noise_cues_use_their_filters() {
    let whoosh = build_cue(CueKind::Whoosh, 1.0, NOW);
    assert!(whoosh.tones.is_empty());
    let n = &whoosh.noises[0];
    assert_eq!(n.filter, FilterKind::Bandpass);
    assert_eq!(n.q, Some(1.5));
    assert_eq!(n.fade, FadeShape::Linear);
    assert!((n.cutoff.value_at(NOW + 0.15) - 1500.0).abs() < 1e-2);

    let paper = build_cue(CueKind::PaperUnfold, 1.0, NOW);
    assert_eq!(paper.noises[0].filter, FilterKind::Highpass);
    assert_eq!(paper.noises[0].fade, FadeShape::Quadratic);
    assert_eq!(paper.tones.len(), 1);
    assert!((paper.tones[0].start - NOW - 0.1).abs() < 1e-9);
}

#[test]
fn automation_follows_device_ramp_semantics() {
    let a = Automation::starting_at(0.0, 1.0)
        .linear(1.0, 2.0)
        .exponential(0.0, 3.0);
    assert_eq!(a.value_at(0.5), 0.0);
    assert!((a.value_at(1.5) - 0.5).abs() < 1e-6);
    assert!((a.value_at(2.5) - SILENCE_FLOOR.sqrt()).abs() < 1e-4);
    assert_eq!(a.value_at(10.0), SILENCE_FLOOR);

    // an exponential ramp out of zero holds zero
    let stuck = Automation::starting_at(0.0, 0.0).exponential(1.0, 1.0);
    assert_eq!(stuck.value_at(0.5), 0.0);
}

#[test]
fn shifted_and_scaled_preserve_shape() {
    let a = Automation::attack_release(0.0, 0.5, 0.1, 1.0);
    let s = a.shifted(2.0).scaled(2.0);
    assert!((s.start_time() - 2.0).abs() < 1e-9);
    assert!((s.value_at(2.1) - 1.0).abs() < 1e-6);
    assert!((s.end_time() - 3.0).abs() < 1e-9);
}

#[test]
fn shaped_noise_fades_out_and_stays_in_range() {
    let mut rng = SmallRng::seed_from_u64(7);
    let len = buffer_len(48_000.0, 0.25);
    assert_eq!(len, 12_000);
    let samples = shaped_noise(&mut rng, len, FadeShape::Quadratic);
    assert_eq!(samples.len(), len);
    assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
    let head: f32 = samples[..1000].iter().map(|s| s.abs()).sum();
    let tail: f32 = samples[len - 1000..].iter().map(|s| s.abs()).sum();
    assert!(tail < head * 0.05, "tail {tail} head {head}");
}

#[test]
fn degenerate_buffers_are_empty() {
    assert_eq!(buffer_len(0.0, 1.0), 0);
    assert_eq!(buffer_len(48_000.0, -0.1), 0);
    assert_eq!(buffer_len(f32::NAN, 0.3), 0);
    assert_eq!(FadeShape::Linear.gain(0.0), 1.0);
    assert_eq!(FadeShape::Quadratic.gain(0.5), 0.25);
}
