// Browser-side wiring constants.

pub const MS_PER_SEC: f64 = 1000.0;

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 1.0 / 30.0; // tab switches must not fling the cursor
pub const DEFAULT_FRAME_DT_SEC: f32 = 1.0 / 60.0;

// Media query for touch-first devices, where no cursor is drawn
pub const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";
