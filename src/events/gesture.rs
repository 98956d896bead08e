use super::SharedEngine;
use crate::constants::{AUDIO_TOGGLE_ID, MUTED_CLASS, UNLOCK_EVENTS};
use crate::dom;
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

/// First click, key or touch anywhere on the page opens the audio graph and
/// starts the drone. Later gestures are ignored. Registered for the capture
/// phase so the graph is open before the clicked element's own sound plays.
pub fn wire_audio_unlock(document: &web::Document, engine: &SharedEngine) {
    let unlocked = Rc::new(Cell::new(false));
    for event in UNLOCK_EVENTS {
        let engine = engine.clone();
        let unlocked = unlocked.clone();
        dom::listen_capture(document, event, move |_: web::Event| {
            if unlocked.replace(true) {
                return;
            }
            let mut eng = engine.borrow_mut();
            eng.activate();
            eng.start_ambient_drone();
        });
    }
}

fn reflect_mute(button: &web::Element, muted: bool) {
    let classes = button.class_list();
    _ = if muted {
        classes.add_1(MUTED_CLASS)
    } else {
        classes.remove_1(MUTED_CLASS)
    };
    _ = button.set_attribute("aria-pressed", if muted { "true" } else { "false" });
}

/// `#audio-toggle` flips the mute flag and mirrors it on the button.
pub fn wire_mute_toggle(document: &web::Document, engine: &SharedEngine) {
    let Some(button) = document.get_element_by_id(AUDIO_TOGGLE_ID) else {
        log::debug!("no #{} on page", AUDIO_TOGGLE_ID);
        return;
    };
    reflect_mute(&button, engine.borrow().is_muted());
    let engine = engine.clone();
    let target = button.clone();
    dom::add_click_listener(document, AUDIO_TOGGLE_ID, move || {
        let mut eng = engine.borrow_mut();
        // the button is itself a gesture, so the graph can open here
        eng.activate();
        let muted = eng.toggle_mute();
        reflect_mute(&target, muted);
    });
}
