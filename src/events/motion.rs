use crate::constants::REDUCED_MOTION_QUERY;
use crate::dom;
use web_sys as web;

fn prefers_reduced_motion() -> bool {
    web::window()
        .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .map_or(false, |mq| mq.matches())
}

/// Strip css animations and transitions from every element when the user
/// asked the system for reduced motion. Returns whether it did.
pub fn apply_reduced_motion(document: &web::Document) -> bool {
    if !prefers_reduced_motion() {
        return false;
    }
    let all = dom::query_all(document, "*");
    for el in &all {
        dom::set_style(el, "animation", "none");
        dom::set_style(el, "transition", "none");
    }
    log::info!("reduced motion: animations off on {} elements", all.len());
    true
}
