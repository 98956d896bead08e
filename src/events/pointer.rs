use super::SharedEngine;
use crate::constants::{
    CLICK_SOUND_SELECTOR, HOVER_SOUND_SELECTOR, PARALLAX_SELECTOR, RIPPLE_CLASS,
    RIPPLE_LIFETIME_MS, RIPPLE_SELECTOR, RIPPLE_STYLE_ID, TILT_SELECTOR,
};
use crate::css;
use crate::dom;
use ambience_core::effects::{centered_pointer, parallax_offset, ripple_geometry, tilt_degrees};
use glam::Vec2;
use web_sys as web;

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Pointer position relative to `el`'s bounding box, plus the box size.
fn local_pos(el: &web::Element, ev: &web::MouseEvent) -> (Vec2, Vec2) {
    let rect = el.get_bounding_client_rect();
    let origin = Vec2::new(rect.left() as f32, rect.top() as f32);
    let size = Vec2::new(rect.width() as f32, rect.height() as f32);
    (client_pos(ev) - origin, size)
}

pub fn wire_interaction_sounds(document: &web::Document, engine: &SharedEngine) {
    for el in dom::query_all(document, HOVER_SOUND_SELECTOR) {
        let engine = engine.clone();
        dom::listen(&el, "mouseenter", move |_: web::MouseEvent| {
            engine.borrow_mut().play_hover();
        });
    }
    for el in dom::query_all(document, CLICK_SOUND_SELECTOR) {
        let engine = engine.clone();
        dom::listen(&el, "click", move |_: web::MouseEvent| {
            engine.borrow_mut().play_click();
        });
    }
}

pub fn wire_tilt_cards(document: &web::Document) {
    for card in dom::query_all(document, TILT_SELECTOR) {
        let target = card.clone();
        dom::listen(&card, "mousemove", move |ev: web::MouseEvent| {
            let (local, size) = local_pos(&target, &ev);
            let tilt = tilt_degrees(size, local);
            dom::set_style(&target, "transform", &css::tilt_transform(tilt.x, tilt.y));
        });
        let target = card.clone();
        dom::listen(&card, "mouseleave", move |_: web::MouseEvent| {
            dom::set_style(&target, "transform", css::TILT_RESET);
        });
    }
}

pub fn wire_parallax(document: &web::Document) {
    let shapes = dom::query_all(document, PARALLAX_SELECTOR);
    if shapes.is_empty() {
        return;
    }
    dom::listen(document, "mousemove", move |ev: web::MouseEvent| {
        let Some(w) = web::window() else {
            return;
        };
        let viewport = Vec2::new(
            w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
            w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
        );
        let pointer = centered_pointer(client_pos(&ev), viewport);
        for (i, shape) in shapes.iter().enumerate() {
            let offset = parallax_offset(i, pointer);
            dom::set_style(shape, "transform", &css::translate_px(offset.x, offset.y));
        }
    });
}

fn inject_ripple_keyframes(document: &web::Document) {
    if document.get_element_by_id(RIPPLE_STYLE_ID).is_some() {
        return;
    }
    let (Ok(style), Some(head)) = (document.create_element("style"), document.head()) else {
        return;
    };
    style.set_id(RIPPLE_STYLE_ID);
    style.set_text_content(Some(css::RIPPLE_KEYFRAMES));
    _ = head.append_child(&style);
}

pub fn wire_ripples(document: &web::Document) {
    let buttons = dom::query_all(document, RIPPLE_SELECTOR);
    if buttons.is_empty() {
        return;
    }
    inject_ripple_keyframes(document);
    for button in buttons {
        let target = button.clone();
        let document = document.clone();
        dom::listen(&button, "click", move |ev: web::MouseEvent| {
            let (local, size) = local_pos(&target, &ev);
            let ripple = ripple_geometry(size, local);
            let Ok(span) = document.create_element("span") else {
                return;
            };
            span.set_class_name(RIPPLE_CLASS);
            _ = span.set_attribute(
                "style",
                &css::ripple_style(
                    ripple.size,
                    ripple.origin.x,
                    ripple.origin.y,
                    RIPPLE_LIFETIME_MS,
                ),
            );
            if target.append_child(&span).is_err() {
                return;
            }
            dom::set_timeout(RIPPLE_LIFETIME_MS, move || span.remove());
        });
    }
}
