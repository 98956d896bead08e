#![cfg(target_arch = "wasm32")]
use ambience_core::{BlobField, BlobFieldConfig, InstantClock, ToneConfig, ToneEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod canvas;
mod constants;
mod css;
mod dom;
mod events;
mod frame;
mod storage;

use audio::WebAudioBackend;
use constants::CANVAS_ID;
use events::SharedEngine;
use frame::FrameContext;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, field: &Rc<RefCell<BlobField>>) {
    let canvas_resize = canvas.clone();
    let field_resize = field.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        if let Some((w, h)) = dom::sync_canvas_to_window(&canvas_resize) {
            field_resize.borrow_mut().resize(w as f32, h as f32);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn build_backdrop(document: &web::Document) -> anyhow::Result<Rc<RefCell<FrameContext>>> {
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("#{} not found", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (w, h) = dom::sync_canvas_to_window(&canvas).unwrap_or((canvas.width(), canvas.height()));
    let field = Rc::new(RefCell::new(BlobField::new(
        BlobFieldConfig::default(),
        w as f32,
        h as f32,
        StdRng::from_entropy(),
    )));
    log::info!("[blobs] {} blobs on {}x{}", field.borrow().blobs().len(), w, h);
    wire_canvas_resize(&canvas, &field);

    Ok(Rc::new(RefCell::new(FrameContext {
        field,
        surface: canvas::CanvasSurface::new(ctx),
    })))
}

fn build_engine() -> SharedEngine {
    let engine = ToneEngine::new(
        ToneConfig::default(),
        WebAudioBackend::open,
        InstantClock::new(),
        storage::LocalStorageStore::new(),
    );
    log::info!("[tone] ready, muted={}", engine.is_muted());
    Rc::new(RefCell::new(engine))
}

fn wire_events(document: &web::Document, engine: &SharedEngine) {
    events::wire_mute_toggle(document, engine);
    events::wire_audio_unlock(document, engine);
    events::wire_interaction_sounds(document, engine);
    events::wire_scroll_effects(document, engine);
    events::wire_tilt_cards(document);
    events::wire_parallax(document);
    events::wire_ripples(document);
    events::wire_smooth_anchors(document);
    events::wire_reveal(document);
    events::apply_reduced_motion(document);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ambience-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    // audio is independent of the canvas, so wire it first
    let engine = build_engine();
    wire_events(&document, &engine);

    let frame_ctx = build_backdrop(&document)?;
    frame::start_loop(frame_ctx);
    Ok(())
}
