// Host-side tests for the interactive scenes: proposal, route checkpoints
// and the spring cursor.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod automation {
    include!("../src/core/automation.rs");
}
mod noise {
    include!("../src/core/noise.rs");
}
mod cue {
    include!("../src/core/cue.rs");
}
mod particles {
    include!("../src/core/particles.rs");
}
mod proposal {
    include!("../src/core/proposal.rs");
}
mod checkpoints {
    include!("../src/core/checkpoints.rs");
}
mod cursor {
    include!("../src/core/cursor.rs");
}

use checkpoints::*;
use cue::{build_cue, CueKind};
use cursor::*;
use glam::Vec2;
use particles::*;
use proposal::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn escape_positions_stay_inside_the_container() {
    let mut rng = SmallRng::seed_from_u64(21);
    let mut seen_low = false;
    let mut seen_high = false;
    for _ in 0..2000 {
        let p = escape_position(&mut rng);
        for v in [p.top_pct, p.left_pct] {
            assert!((10..=89).contains(&v), "{v}");
            seen_low |= v < 20;
            seen_high |= v > 80;
        }
    }
    assert!(seen_low && seen_high);
}

#[test]
fn hovering_no_pops_and_moves_the_button() {
    let mut scene = ProposalScene::default();
    let mut rng = SmallRng::seed_from_u64(22);
    assert_eq!(scene.no_button(), None);
    let (cue, pos) = scene.on_no_hover(&mut rng);
    assert_eq!(cue, CueKind::Pop);
    assert_eq!(scene.no_button(), Some(pos));
    assert!(!scene.said_yes());
}

#[test]
fn yes_bursts_hearts_starts_rain_and_celebrates_once() {
    let mut scene = ProposalScene::default();
    let mut field = ParticleField::new(SmallRng::seed_from_u64(23), 800.0, 600.0);

    let cue = scene.on_yes(&mut field);
    assert_eq!(cue, Some(CueKind::Celebration));
    assert!(scene.said_yes());
    assert_eq!(field.len(), 300);
    assert!(field.is_celebrated());
    assert_eq!(field.phase(), FieldPhase::BurstAndRain);

    let plan = build_cue(cue.unwrap(), 1.0, 0.0);
    assert_eq!(plan.tones.len(), 14);

    assert_eq!(scene.on_yes(&mut field), None);
    assert_eq!(field.len(), 300);
}

#[test]
fn heartbeat_plays_the_first_time_the_scene_is_seen() {
    let mut scene = ProposalScene::default();
    assert_eq!(scene.on_in_view(), Some(CueKind::Heartbeat));
    assert_eq!(scene.on_in_view(), None);
}

#[test]
fn route_checkpoints_fire_once_each_in_order() {
    let mut marks = ProgressCheckpoints::default();
    assert!(marks.update(0.1).is_empty());
    assert!(marks.update(0.25).is_empty(), "exactly 25% has not passed the mark");
    assert_eq!(marks.update(0.27).as_slice(), &[0.6]);
    assert!(marks.update(0.3).is_empty());
    // a fast scroll can pass several marks in one update
    assert_eq!(marks.update(0.9).as_slice(), &[0.8, 1.0]);
    assert!(marks.all_fired());
    assert!(marks.update(1.0).is_empty());
    assert!(marks.update(0.1).is_empty(), "scrolling back does not re-arm");
}

#[test]
fn checkpoints_ignore_garbage_and_can_be_reset() {
    let mut marks = ProgressCheckpoints::new(&ROUTE_CHECKPOINTS);
    assert!(marks.update(f32::NAN).is_empty());
    assert_eq!(marks.update(7.0).len(), 3);
    marks.reset();
    assert!(!marks.all_fired());
    assert_eq!(marks.update(0.55).as_slice(), &[0.6, 0.8]);
}

#[test]
fn cursor_starts_parked_and_hidden() {
    let mut c = HeartCursor::default();
    assert!(!c.is_visible());
    assert_eq!(c.step(1.0 / 60.0), Vec2::splat(-100.0));
}

#[test]
fn cursor_centres_on_the_pointer_and_settles() {
    let mut c = HeartCursor::default();
    c.on_move(200.0, 100.0);
    assert!(c.is_visible());
    assert_eq!(c.target(), Vec2::new(184.0, 84.0));

    let first = c.step(1.0 / 60.0);
    assert!(first.x > -100.0 && first.x < 184.0, "spring should lag, got {first}");
    let mut pos = first;
    for _ in 0..120 {
        pos = c.step(1.0 / 60.0);
    }
    assert!(pos.distance(c.target()) < 0.5, "{pos}");

    c.on_leave();
    assert!(!c.is_visible());
    c.on_enter();
    assert!(c.is_visible());
}

#[test]
fn spring_is_stable_for_long_and_degenerate_steps() {
    let mut s = SpringFollower::new(SpringParams::default(), Vec2::ZERO);
    s.target = Vec2::new(500.0, -300.0);
    let before = s.pos;
    assert_eq!(s.step(0.0), before);
    assert_eq!(s.step(f32::NAN), before);
    for _ in 0..10 {
        s.step(0.25);
    }
    assert!(s.pos.is_finite());
    assert!(s.is_settled(0.1));
}
