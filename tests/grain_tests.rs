// Host-side tests for the film grain generator.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod grain {
    include!("../src/core/grain.rs");
}

use grain::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn about_five_percent_of_pixels_are_lit() {
    let mut overlay = GrainOverlay::new(SmallRng::seed_from_u64(11), 400, 300);
    let frame = overlay.render_frame();
    assert_eq!(frame.rgba.len(), 400 * 300 * 4);
    let ratio = frame.noise_pixels as f32 / (400.0 * 300.0);
    assert!((0.045..0.055).contains(&ratio), "ratio {ratio}");
}

#[test]
fn lit_pixels_are_faint_white_and_the_rest_transparent() {
    let mut rng = SmallRng::seed_from_u64(12);
    let mut rgba = vec![7u8; 200 * 200 * 4];
    let lit = fill_grain(&mut rgba, &GrainParams::default(), &mut rng);
    let mut counted = 0;
    for px in rgba.chunks_exact(4) {
        if px[..3] == [255, 255, 255] {
            assert!(px[3] < 50);
            counted += 1;
        } else {
            assert_eq!(px, [0, 0, 0, 0]);
        }
    }
    assert_eq!(counted, lit);
}

#[test]
fn every_frame_is_regenerated_from_scratch() {
    let mut overlay = GrainOverlay::new(SmallRng::seed_from_u64(13), 64, 64);
    let first: Vec<u8> = overlay.render_frame().rgba.to_vec();
    let second: Vec<u8> = overlay.render_frame().rgba.to_vec();
    assert_ne!(first, second);
    let lit_in_both = first
        .chunks_exact(4)
        .zip(second.chunks_exact(4))
        .filter(|(a, b)| a[0] == 255 && b[0] == 255)
        .count();
    // independent 5% draws overlap on roughly 0.25% of pixels
    assert!(lit_in_both < 64 * 64 / 50);
}

#[test]
fn scratches_are_rare_faint_and_near_vertical() {
    let params = GrainParams::default();
    let mut rng = SmallRng::seed_from_u64(14);
    let mut hits = 0;
    for _ in 0..5000 {
        if let Some(s) = maybe_scratch(800, 600, &params, &mut rng) {
            hits += 1;
            assert!((0.0..800.0).contains(&s.x_top));
            assert!((s.x_bottom - s.x_top).abs() <= 5.0);
            assert_eq!(s.height, 600.0);
            assert!(s.alpha < 0.1);
            assert!(s.line_width < 2.0);
            assert!(s.css_color().starts_with("rgba(255, 255, 255, "));
        }
    }
    // 2% of 5000 frames
    assert!(hits > 60 && hits < 150, "hits {hits}");
}

#[test]
fn resize_changes_the_buffer() {
    let mut overlay = GrainOverlay::new(SmallRng::seed_from_u64(15), 10, 10);
    overlay.resize(20, 5);
    assert_eq!(overlay.size(), (20, 5));
    let frame = overlay.render_frame();
    assert_eq!((frame.width, frame.height), (20, 5));
    assert_eq!(frame.rgba.len(), 20 * 5 * 4);
}
