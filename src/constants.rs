/// Page wiring: element ids, selectors and class names the front end binds to.
///
/// Tuning for the blob field and the tone engine lives in `ambience_core`;
/// this module only names the DOM hooks.
// Canvas the blob field paints into
pub const CANVAS_ID: &str = "gradient-canvas";

// Mute toggle button and the class it carries while muted
pub const AUDIO_TOGGLE_ID: &str = "audio-toggle";
pub const MUTED_CLASS: &str = "muted";

// Any of these count as the user gesture that unlocks audio
pub const UNLOCK_EVENTS: [&str; 3] = ["click", "keydown", "touchstart"];

// Interactive elements
pub const HOVER_SOUND_SELECTOR: &str = "a, button, .btn, .project-card";
pub const CLICK_SOUND_SELECTOR: &str = "a, button, .btn";
pub const TILT_SELECTOR: &str = ".project-card";
pub const RIPPLE_SELECTOR: &str = ".btn";
pub const PARALLAX_SELECTOR: &str = ".shape";

// Ripple element lifetime, matches the css animation below
pub const RIPPLE_LIFETIME_MS: i32 = 600;
pub const RIPPLE_CLASS: &str = "ripple";
pub const RIPPLE_STYLE_ID: &str = "ripple-keyframes";

// Scroll-linked navigation
pub const NAVBAR_ID: &str = "navbar";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const NAV_LINK_SELECTOR: &str = ".nav-links a";
pub const ACTIVE_CLASS: &str = "active";
pub const SCROLL_PROGRESS_ID: &str = "scroll-progress";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const SCROLL_INDICATOR_SELECTOR: &str = ".scroll-indicator";

// Elements that fade in once scrolled into view; they get ACTIVE_CLASS
pub const REVEAL_SELECTOR: &str = ".reveal";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
