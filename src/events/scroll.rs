use super::SharedEngine;
use crate::constants::{
    ACTIVE_CLASS, ANCHOR_SELECTOR, NAVBAR_ID, NAV_LINK_SELECTOR, SCROLLED_CLASS,
    SCROLL_INDICATOR_SELECTOR, SCROLL_PROGRESS_ID, SECTION_SELECTOR,
};
use crate::css;
use crate::dom;
use ambience_core::effects::{
    active_section, anchor_target_id, hides_scroll_indicator, is_scrolled,
    scroll_progress_percent, SectionTracker,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct ScrollTargets {
    navbar: Option<web::Element>,
    progress: Option<web::HtmlElement>,
    indicator: Option<web::HtmlElement>,
    sections: Vec<web::HtmlElement>,
    nav_links: Vec<web::HtmlElement>,
}

impl ScrollTargets {
    fn collect(document: &web::Document) -> Self {
        Self {
            navbar: document.get_element_by_id(NAVBAR_ID),
            progress: document
                .get_element_by_id(SCROLL_PROGRESS_ID)
                .and_then(|el| el.dyn_into::<web::HtmlElement>().ok()),
            indicator: dom::query_all(document, SCROLL_INDICATOR_SELECTOR)
                .into_iter()
                .next(),
            sections: dom::query_all(document, SECTION_SELECTOR),
            nav_links: dom::query_all(document, NAV_LINK_SELECTOR),
        }
    }

    fn section_tops(&self) -> Vec<f32> {
        self.sections.iter().map(|s| s.offset_top() as f32).collect()
    }

    fn highlight(&self, section: Option<usize>) {
        let id = section
            .and_then(|i| self.sections.get(i))
            .map(|s| s.id())
            .unwrap_or_default();
        for link in &self.nav_links {
            let href = link.get_attribute("href").unwrap_or_default();
            let classes = link.class_list();
            _ = classes.remove_1(ACTIVE_CLASS);
            if !id.is_empty() && href.trim_start_matches('#') == id {
                _ = classes.add_1(ACTIVE_CLASS);
            }
        }
    }
}

/// Navbar state, scroll hint, active nav link, progress bar, and the
/// transition sound whenever the active section changes.
pub fn wire_scroll_effects(document: &web::Document, engine: &SharedEngine) {
    let Some(window) = web::window() else {
        return;
    };
    let targets = ScrollTargets::collect(document);
    let initial = active_section(
        window.scroll_y().unwrap_or(0.0) as f32,
        &targets.section_tops(),
    );
    targets.highlight(initial);
    let tracker = Rc::new(RefCell::new(SectionTracker::new(initial)));

    let engine = engine.clone();
    let document = document.clone();
    dom::listen(&window, "scroll", move |_: web::Event| {
        let Some(w) = web::window() else {
            return;
        };
        let scroll_y = w.scroll_y().unwrap_or(0.0) as f32;

        if let Some(nav) = &targets.navbar {
            let classes = nav.class_list();
            _ = if is_scrolled(scroll_y) {
                classes.add_1(SCROLLED_CLASS)
            } else {
                classes.remove_1(SCROLLED_CLASS)
            };
        }

        if let (Some(bar), Some(root)) = (&targets.progress, document.document_element()) {
            let percent = scroll_progress_percent(
                scroll_y,
                root.scroll_height() as f32,
                root.client_height() as f32,
            );
            dom::set_style(bar, "width", &css::percent_width(percent));
        }

        if let Some(indicator) = &targets.indicator {
            let hidden = hides_scroll_indicator(scroll_y);
            dom::set_style(indicator, "opacity", if hidden { "0" } else { "1" });
            dom::set_style(
                indicator,
                "pointer-events",
                if hidden { "none" } else { "auto" },
            );
        }

        let section = active_section(scroll_y, &targets.section_tops());
        targets.highlight(section);
        if tracker.borrow_mut().update(section) {
            log::debug!("[scroll] entered section {:?}", section);
            engine.borrow_mut().play_transition();
        }
    });
}

/// In-page links scroll smoothly to their target instead of jumping.
pub fn wire_smooth_anchors(document: &web::Document) {
    for anchor in dom::query_all(document, ANCHOR_SELECTOR) {
        let link = anchor.clone();
        let document = document.clone();
        dom::listen(&anchor, "click", move |ev: web::MouseEvent| {
            ev.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(target) =
                anchor_target_id(&href).and_then(|id| document.get_element_by_id(id))
            else {
                return;
            };
            let options = web::ScrollIntoViewOptions::new();
            options.set_behavior(web::ScrollBehavior::Smooth);
            options.set_block(web::ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        });
    }
}
