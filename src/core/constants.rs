// Shared audio/visual tuning constants for the effects core.

// Music loop timing (seconds)
pub const LOOP_NOTE_DURATION_SEC: f64 = 1.8;
pub const LOOP_NOTE_GAP_SEC: f64 = 0.45;
pub const LOOP_CHORD_PAD_SEC: f64 = 0.3; // extra breath after each chord
pub const LOOP_FIRST_LEAD_SEC: f64 = 0.2; // first cycle starts this far ahead of "now"
pub const LOOP_WAKE_LEAD_SEC: f64 = 0.5; // wake this long before a cycle ends
pub const LOOP_NOTE_RELEASE_PAD_SEC: f64 = 0.1; // oscillators outlive their envelope by this

// Music loop master bus
pub const MASTER_FADE_IN_TARGET: f32 = 0.6;
pub const MASTER_FADE_IN_SEC: f64 = 1.5;
pub const MASTER_FADE_OUT_SEC: f64 = 0.8;
pub const SUSPEND_AFTER_STOP_SEC: f64 = 1.0;
pub const REVERB_DELAY_SEC: f32 = 0.3;
pub const REVERB_FEEDBACK: f32 = 0.2;
pub const REVERB_WET: f32 = 0.3;

// Heart particles
pub const BURST_PARTICLE_COUNT: usize = 300;
pub const BURST_FORCE: f32 = 1.5;
pub const RAIN_PROBABILITY: f32 = 0.3;
pub const RAIN_SPAWN_Y: f32 = -20.0;
pub const PARTICLE_SIZE_MIN: f32 = 5.0;
pub const PARTICLE_SIZE_SPAN: f32 = 15.0;
pub const PARTICLE_SPEED_MIN: f32 = 2.0;
pub const PARTICLE_SPEED_SPAN: f32 = 3.0;
pub const PARTICLE_DECAY_MIN: f32 = 0.005;
pub const PARTICLE_DECAY_MAX: f32 = 0.015;
pub const PARTICLE_SHRINK_PER_FRAME: f32 = 0.99;
pub const HEART_TOP_CURVE_RATIO: f32 = 0.3;

// Accent palette
pub const ACCENT_CRIMSON: &str = "#8B0000";
pub const ACCENT_GOLD: &str = "#C9A94E";

// Film grain
pub const GRAIN_PIXEL_PROBABILITY: f32 = 0.05;
pub const GRAIN_MAX_ALPHA: u8 = 50; // exclusive
pub const SCRATCH_PROBABILITY: f32 = 0.02;
pub const SCRATCH_MAX_ALPHA: f32 = 0.1;
pub const SCRATCH_MAX_WIDTH: f32 = 2.0;
pub const SCRATCH_MAX_DRIFT_PX: f32 = 10.0;

// Heart cursor spring
pub const CURSOR_STIFFNESS: f32 = 300.0;
pub const CURSOR_DAMPING: f32 = 25.0;
pub const CURSOR_MASS: f32 = 0.5;
pub const CURSOR_HALF_SIZE_PX: f32 = 16.0; // centres the 32px glyph on the pointer
pub const CURSOR_PARKED_PX: f32 = -100.0;
pub const CURSOR_MAX_SUBSTEP_SEC: f32 = 1.0 / 240.0;

// Escape button bounds (percent of container)
pub const ESCAPE_MIN_PCT: u32 = 10;
pub const ESCAPE_SPAN_PCT: u32 = 80;
