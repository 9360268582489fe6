#![cfg(target_arch = "wasm32")]
//! WASM entry point. Wires the DOM, loads the model, and starts the
//! frame loop; the animation semantics all live in `contrail-core`.

pub mod dom;
pub mod events;
pub mod frame;
pub mod hand;
pub mod hud;
pub mod loader;
pub mod render;

use contrail_core::{ControlMode, GestureState, MotionBlender, RenderTransform, ScrollState};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("contrail-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("stage-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #stage-canvas"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("#stage-canvas is not a canvas: {e:?}"))?;
    let video: web::HtmlVideoElement = document
        .get_element_by_id("webcam")
        .ok_or_else(|| anyhow::anyhow!("missing #webcam"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("#webcam is not a video element: {e:?}"))?;

    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        let _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
        resize_closure.forget();
    }

    // Shared state between the scroll/detection callbacks and the frame
    // loop. Single-threaded cooperative scheduling, so plain Rc<RefCell>.
    let scroll = Rc::new(RefCell::new(ScrollState::default()));
    let gesture = Rc::new(RefCell::new(GestureState::default()));
    let hand_enabled = Rc::new(RefCell::new(false));

    events::wire_scroll(&window, &document, scroll.clone());
    events::wire_nav(&window, &document);
    events::wire_hand_toggle(&document, video, hand_enabled.clone(), gesture.clone());

    let mesh = loader::load_with_fallback(&document).await;
    let beacon = mesh.as_ref().and_then(|m| m.beacon);
    let gpu = frame::init_gpu(&canvas, mesh.as_ref()).await;

    let now = Instant::now();
    let ctx = frame::FrameContext {
        scroll,
        gesture,
        hand_enabled,
        keyframes: contrail_core::keyframes(),
        blender: MotionBlender,
        transform: RenderTransform::default(),
        mode: ControlMode::ScrollDriven,
        canvas,
        hud: hud::Hud::new(&document),
        gpu,
        beacon,
        clip_time: 0.0,
        start_instant: now,
        last_instant: now,
    };
    frame::start_loop(Rc::new(RefCell::new(ctx)));
    Ok(())
}
