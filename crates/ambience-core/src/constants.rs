// Shared visual/audio tuning constants used by the web frontend.

// Blob field
pub const BLOB_COUNT: usize = 5;
pub const BLOB_RADIUS_MIN: f32 = 200.0;
pub const BLOB_RADIUS_MAX: f32 = 600.0;
pub const BLOB_SPEED_MAX: f32 = 0.25; // per axis, units per tick
pub const BLOB_OPACITY_MIN: f32 = 0.02;
pub const BLOB_OPACITY_MAX: f32 = 0.07;
pub const BLOB_MID_STOP: f32 = 0.5; // gradient stop carrying half the peak opacity

// Default palette for the blobs
pub const BLOB_PALETTE: [[u8; 3]; 3] = [
    [100, 255, 218], // cyan
    [0, 217, 255],   // blue
    [199, 146, 234], // purple
];

// Bus levels
pub const AMBIENT_VOLUME: f32 = 0.08;
pub const EFFECTS_VOLUME: f32 = 0.15;

// Fades (seconds)
pub const DRONE_FADE_SEC: f64 = 2.0;
pub const MUTE_FADE_SEC: f64 = 0.3;

// Exponential ramps cannot target zero
pub const EXP_RAMP_FLOOR: f32 = 0.01;

// Ambient drone: root plus harmonics, quieter per layer
pub const DRONE_FREQUENCIES_HZ: [f32; 3] = [55.0, 82.5, 110.0];
pub const DRONE_LAYER_GAINS: [f32; 3] = [0.30, 0.22, 0.14];
pub const DRONE_LFO_HZ: f32 = 0.2;
pub const DRONE_LFO_DEPTH_HZ: f32 = 3.0;
pub const DRONE_LFO_TARGET_LAYER: usize = 0;

// Hover tick
pub const HOVER_FREQUENCY_HZ: f32 = 1200.0;
pub const HOVER_DURATION_SEC: f64 = 0.08;
pub const HOVER_PEAK_GAIN: f32 = 0.4;
pub const HOVER_MIN_INTERVAL_MS: u64 = 100;

// Click chime
pub const CLICK_FREQUENCIES_HZ: [f32; 3] = [800.0, 1000.0, 1200.0];
pub const CLICK_STAGGER_SEC: f64 = 0.04;
pub const CLICK_DURATION_SEC: f64 = 0.12;
pub const CLICK_PEAK_GAIN: f32 = 0.3;

// Section transition sweep
pub const TRANSITION_FROM_HZ: f32 = 1000.0;
pub const TRANSITION_TO_HZ: f32 = 200.0;
pub const TRANSITION_DURATION_SEC: f64 = 0.2;
pub const TRANSITION_ATTACK_SEC: f64 = 0.03;
pub const TRANSITION_PEAK_GAIN: f32 = 0.2;

// Cosmetic effects
pub const TILT_DIVISOR: f32 = 20.0; // px of pointer offset per degree of rotation
pub const PARALLAX_SPEED_STEP: f32 = 10.0; // px per shape index
pub const NAV_SECTION_OFFSET: f32 = 200.0; // a section counts as active this far above its top
pub const NAVBAR_SCROLLED_AT: f32 = 100.0;
pub const SCROLL_INDICATOR_HIDE_AT: f32 = 200.0;

// Scroll reveal
pub const REVEAL_STAGGER_MS: u32 = 100; // per entry in one observer batch
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
