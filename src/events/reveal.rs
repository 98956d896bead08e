use crate::constants::{ACTIVE_CLASS, REVEAL_SELECTOR};
use crate::dom;
use ambience_core::effects::reveal_delay_ms;
use ambience_core::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Mark `.reveal` elements `active` as they scroll into view, staggered by
/// their position in each intersection batch.
pub fn wire_reveal(document: &web::Document) {
    let targets = dom::query_all(document, REVEAL_SELECTOR);
    if targets.is_empty() {
        return;
    }
    let on_intersect = move |entries: js_sys::Array, _: web::IntersectionObserver| {
        // the stagger index counts every entry in the batch, visible or not
        let intersecting = entries
            .iter()
            .filter_map(|e| e.dyn_into::<web::IntersectionObserverEntry>().ok())
            .enumerate()
            .filter(|(_, entry)| entry.is_intersecting());
        for (index, entry) in intersecting {
            let target = entry.target();
            dom::set_timeout(reveal_delay_ms(index) as i32, move || {
                _ = target.class_list().add_1(ACTIVE_CLASS);
            });
        }
    };
    let callback = Closure::wrap(
        Box::new(on_intersect) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>
    );

    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer = match web::IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(o) => o,
        Err(e) => {
            log::warn!("IntersectionObserver unavailable, revealing all: {:?}", e);
            for el in &targets {
                _ = el.class_list().add_1(ACTIVE_CLASS);
            }
            return;
        }
    };
    callback.forget();
    for el in &targets {
        observer.observe(el);
    }
    log::debug!("[reveal] observing {} elements", targets.len());
}
