// Inline style strings written by the event handlers. Pure functions so the
// host-side tests can include this file directly.

/// Card transform for a tilt of `rotate_x`/`rotate_y` degrees.
pub fn tilt_transform(rotate_x: f32, rotate_y: f32) -> String {
    format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-8px)",
        rotate_x, rotate_y
    )
}

pub const TILT_RESET: &str = "perspective(1000px) rotateX(0) rotateY(0) translateY(0)";

pub fn translate_px(x: f32, y: f32) -> String {
    format!("translate({}px, {}px)", x, y)
}

pub fn percent_width(percent: f32) -> String {
    format!("{}%", percent)
}

/// `rgba(...)` with the alpha clamped to `0..=1`.
pub fn rgba(rgb: [u8; 3], alpha: f32) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        rgb[0],
        rgb[1],
        rgb[2],
        alpha.clamp(0.0, 1.0)
    )
}

/// Style attribute for a ripple square of side `size` at (`left`, `top`).
pub fn ripple_style(size: f32, left: f32, top: f32, lifetime_ms: i32) -> String {
    format!(
        "position: absolute; width: {size}px; height: {size}px; top: {top}px; left: {left}px; \
         background: rgba(255, 255, 255, 0.3); border-radius: 50%; transform: scale(0); \
         animation: ripple {lifetime_ms}ms ease-out; pointer-events: none;"
    )
}

pub const RIPPLE_KEYFRAMES: &str = "@keyframes ripple { to { transform: scale(4); opacity: 0; } }";
