// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn loop_timing_is_consistent() {
    // consecutive notes of a chord overlap
    assert!(LOOP_NOTE_DURATION_SEC > LOOP_NOTE_GAP_SEC);
    // the wake must fire before the cycle ends
    assert!(LOOP_WAKE_LEAD_SEC > 0.0);
    assert!(LOOP_WAKE_LEAD_SEC < LOOP_NOTE_GAP_SEC * 4.0 + LOOP_CHORD_PAD_SEC);
    assert!(LOOP_FIRST_LEAD_SEC > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn stop_fades_out_before_the_device_is_suspended() {
    assert!(MASTER_FADE_OUT_SEC > 0.0);
    assert!(SUSPEND_AFTER_STOP_SEC > MASTER_FADE_OUT_SEC);
    assert!(MASTER_FADE_IN_TARGET > 0.0 && MASTER_FADE_IN_TARGET <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn reverb_feedback_decays() {
    assert!(REVERB_FEEDBACK > 0.0 && REVERB_FEEDBACK < 1.0);
    assert!(REVERB_WET > 0.0 && REVERB_WET < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn particle_ranges_are_ordered() {
    assert!(PARTICLE_DECAY_MIN > 0.0 && PARTICLE_DECAY_MIN < PARTICLE_DECAY_MAX);
    assert!(PARTICLE_SIZE_MIN > 0.0 && PARTICLE_SPEED_MIN > 0.0);
    assert!(PARTICLE_SHRINK_PER_FRAME > 0.0 && PARTICLE_SHRINK_PER_FRAME < 1.0);
    assert!(RAIN_PROBABILITY > 0.0 && RAIN_PROBABILITY < 1.0);
    assert!(RAIN_SPAWN_Y < 0.0, "rain starts above the viewport");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn escape_range_stays_inside_the_container() {
    assert!(ESCAPE_MIN_PCT + ESCAPE_SPAN_PCT <= 100);
}

#[test]
fn accents_are_css_hex_colors() {
    for c in [ACCENT_CRIMSON, ACCENT_GOLD] {
        assert_eq!(c.len(), 7);
        assert!(c.starts_with('#'));
        assert!(c[1..].chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_pacing_and_cursor_spring() {
    assert!(DEFAULT_FRAME_DT_SEC < MAX_FRAME_DT_SEC);
    assert!(CURSOR_MAX_SUBSTEP_SEC < DEFAULT_FRAME_DT_SEC);
    assert!(CURSOR_STIFFNESS > 0.0 && CURSOR_DAMPING > 0.0 && CURSOR_MASS > 0.0);
    assert!(CURSOR_PARKED_PX + CURSOR_HALF_SIZE_PX * 2.0 < 0.0, "parked glyph is off-screen");
    assert_eq!(MS_PER_SEC, 1000.0);
    assert!(COARSE_POINTER_QUERY.contains("coarse"));
}
