//! Pointer- and scroll-driven cosmetic effects, as plain arithmetic so the web
//! layer only has to read DOM geometry and write styles.

use crate::constants::*;
use glam::Vec2;

/// Card tilt in degrees `(rotate_x, rotate_y)` for a pointer at `local`
/// (relative to the card's top-left) on a card of `size`.
#[inline]
pub fn tilt_degrees(size: Vec2, local: Vec2) -> Vec2 {
    let center = size * 0.5;
    Vec2::new(
        (local.y - center.y) / TILT_DIVISOR,
        (center.x - local.x) / TILT_DIVISOR,
    )
}

/// Offset of the `index`-th floating shape; `pointer` is the pointer position
/// over the viewport mapped to `[-0.5, 0.5]` on each axis.
#[inline]
pub fn parallax_offset(index: usize, pointer: Vec2) -> Vec2 {
    pointer * ((index + 1) as f32 * PARALLAX_SPEED_STEP)
}

/// Map a viewport position to the `[-0.5, 0.5]` range used by [`parallax_offset`].
#[inline]
pub fn centered_pointer(client: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    client / viewport - Vec2::splat(0.5)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub size: f32,
    /// Top-left of the ripple square relative to the button.
    pub origin: Vec2,
}

/// A square ripple covering the button's longer side, centred on the pointer.
#[inline]
pub fn ripple_geometry(size: Vec2, local: Vec2) -> Ripple {
    let side = size.x.max(size.y);
    Ripple {
        size: side,
        origin: local - Vec2::splat(side / 2.0),
    }
}

/// Index of the last section whose top is within [`NAV_SECTION_OFFSET`] of
/// the scroll position, in document order.
pub fn active_section(scroll_y: f32, section_tops: &[f32]) -> Option<usize> {
    section_tops
        .iter()
        .rposition(|top| scroll_y >= top - NAV_SECTION_OFFSET)
}

#[inline]
pub fn is_scrolled(scroll_y: f32) -> bool {
    scroll_y > NAVBAR_SCROLLED_AT
}

#[inline]
pub fn hides_scroll_indicator(scroll_y: f32) -> bool {
    scroll_y > SCROLL_INDICATOR_HIDE_AT
}

/// Delay before the `index`-th entry of one intersection batch is revealed.
#[inline]
pub fn reveal_delay_ms(index: usize) -> u32 {
    (index as u32).saturating_mul(REVEAL_STAGGER_MS)
}

/// Element id an in-page link points at; `None` for a bare `#` or an
/// external href.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Share of the scrollable distance covered, in percent.
#[inline]
pub fn scroll_progress_percent(scroll_y: f32, scroll_height: f32, client_height: f32) -> f32 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Remembers the active section so a change can be reported once.
#[derive(Clone, Debug, Default)]
pub struct SectionTracker {
    current: Option<usize>,
}

impl SectionTracker {
    pub fn new(initial: Option<usize>) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// True when `next` names a different section than before.
    pub fn update(&mut self, next: Option<usize>) -> bool {
        if next == self.current {
            return false;
        }
        self.current = next;
        next.is_some()
    }
}
