//! Webcam acquisition and the gesture detection tick loop.
//!
//! Landmark extraction itself stays external: the page provides a
//! `window.__handDetector(video)` function (the MediaPipe glue) that
//! resolves to a `Float32Array` of 21 * 3 normalized coordinates, or
//! null when no hand is visible. This module only schedules the ticks
//! and feeds the gesture signal filter.

use contrail_core::{DetectionGeneration, GestureState, HandLandmarks};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const DETECTOR_GLOBAL: &str = "__handDetector";
const DETECTION_INTERVAL_MS: i32 = 33;

/// Request the webcam and attach the stream to the hidden video element.
/// This is the only suspending acquisition in the app; the caller turns a
/// failure into the user-visible alert and toggle revert.
pub async fn acquire_camera(video: &web::HtmlVideoElement) -> anyhow::Result<web::MediaStream> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| anyhow::anyhow!("media devices unavailable: {e:?}"))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    constraints.set_audio(&JsValue::FALSE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| anyhow::anyhow!("getUserMedia rejected: {e:?}"))?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("camera permission denied: {e:?}"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("unexpected getUserMedia result: {e:?}"))?;

    video.set_src_object(Some(&stream));
    if let Ok(play) = video.play() {
        let _ = JsFuture::from(play).await;
    }
    Ok(stream)
}

/// Stop all tracks and detach the stream.
pub fn release_camera(video: &web::HtmlVideoElement, stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
    video.set_src_object(None);
}

/// Run the detection tick loop until the enabled flag drops or a newer
/// loop supersedes this one.
///
/// The loop is cooperative: an in-flight detection call is never
/// cancelled, its continuation just checks the flag and the generation
/// stamp before rescheduling. The stamp closes the race where a fast
/// toggle off/on restarts the loop while the old one is still awaiting
/// a detection: the stale loop exits without touching the filter.
pub fn start_detection_loop(
    enabled: Rc<RefCell<bool>>,
    gesture: Rc<RefCell<GestureState>>,
    video: web::HtmlVideoElement,
    generation: Rc<RefCell<DetectionGeneration>>,
    stamp: DetectionGeneration,
) {
    spawn_local(async move {
        let Some(detector) = detector_fn() else {
            log::warn!("[hand] window.{DETECTOR_GLOBAL} missing; gesture input stays inactive");
            return;
        };
        log::info!("[hand] detection loop started");
        loop {
            if !*enabled.borrow() || !generation.borrow().is_current(stamp) {
                break;
            }
            let frame = detect_once(&detector, &video).await;
            gesture.borrow_mut().update(frame.as_ref());
            sleep_ms(DETECTION_INTERVAL_MS).await;
        }
        // Only the current loop owns the teardown; a superseded one must
        // not clear signals the replacement is already producing.
        if generation.borrow().is_current(stamp) {
            gesture.borrow_mut().update(None);
        }
        log::info!("[hand] detection loop stopped");
    });
}

fn detector_fn() -> Option<js_sys::Function> {
    let window = web::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(DETECTOR_GLOBAL))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()
}

/// One detection tick: zero-or-one hand, or `None` for anything the
/// detector could not produce (no hand, wrong length, call failure).
async fn detect_once(
    detector: &js_sys::Function,
    video: &web::HtmlVideoElement,
) -> Option<HandLandmarks> {
    let ret = detector.call1(&JsValue::NULL, video).ok()?;
    let value = if ret.has_type::<js_sys::Promise>() {
        JsFuture::from(ret.unchecked_into::<js_sys::Promise>())
            .await
            .ok()?
    } else {
        ret
    };
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let array: js_sys::Float32Array = value.dyn_into().ok()?;
    HandLandmarks::from_flat(&array.to_vec())
}

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        if let Some(w) = web::window() {
            let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = JsFuture::from(promise).await;
}
