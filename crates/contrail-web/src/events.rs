//! DOM event wiring: scroll mapping, section navigation, and the
//! hand-control toggle.

use crate::{dom, hand};
use contrail_core::{DetectionGeneration, GestureState, ScrollState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Recompute [`ScrollState`] on every scroll event and keep the shared
/// cell current. Also runs once immediately so a reloaded page that is
/// already scrolled starts in the right section.
pub fn wire_scroll(
    window: &web::Window,
    document: &web::Document,
    scroll: Rc<RefCell<ScrollState>>,
) {
    let update = {
        let window = window.clone();
        let document = document.clone();
        move || {
            let offset = dom::scroll_offset(&window);
            let range = dom::scrollable_range(&window, &document);
            ScrollState::from_offset(offset, range)
        }
    };
    *scroll.borrow_mut() = update();

    let closure = Closure::wrap(Box::new(move || {
        *scroll.borrow_mut() = update();
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Wire every `.nav-item[data-section]` marker to smooth-scroll to its
/// section's share of the scrollable range.
pub fn wire_nav(window: &web::Window, document: &web::Document) {
    let Ok(items) = document.query_selector_all(".nav-item") else {
        return;
    };
    for i in 0..items.length() {
        let Some(el) = items.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let Some(section) = el
            .get_attribute("data-section")
            .and_then(|s| s.parse::<usize>().ok())
        else {
            continue;
        };
        let window = window.clone();
        let document = document.clone();
        let closure = Closure::wrap(Box::new(move || {
            let range = dom::scrollable_range(&window, &document) as f64;
            let denom = (contrail_core::SECTION_COUNT - 1) as f64;
            dom::smooth_scroll_to(&window, range * section as f64 / denom);
        }) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Wire the hand-control toggle button.
///
/// Toggle-on awaits camera acquisition; a permission failure alerts the
/// user and reverts the toggle. Toggle-off drops the flag (which the
/// detection loop checks before rescheduling itself) and releases the
/// camera stream.
pub fn wire_hand_toggle(
    document: &web::Document,
    video: web::HtmlVideoElement,
    enabled: Rc<RefCell<bool>>,
    gesture: Rc<RefCell<GestureState>>,
) {
    let stream: Rc<RefCell<Option<web::MediaStream>>> = Rc::new(RefCell::new(None));
    let generation: Rc<RefCell<DetectionGeneration>> = Rc::new(RefCell::new(Default::default()));
    let document = document.clone();
    let doc_for_click = document.clone();

    dom::add_click_listener(&doc_for_click, "hand-toggle", move || {
        if *enabled.borrow() {
            *enabled.borrow_mut() = false;
            if let Some(s) = stream.borrow_mut().take() {
                hand::release_camera(&video, &s);
            }
            set_toggle_class(&document, false);
            log::info!("[hand] control disabled");
            return;
        }

        let enabled = enabled.clone();
        let gesture = gesture.clone();
        let stream = stream.clone();
        let video = video.clone();
        let document = document.clone();
        let generation = generation.clone();
        spawn_local(async move {
            match hand::acquire_camera(&video).await {
                Ok(s) => {
                    *stream.borrow_mut() = Some(s);
                    *enabled.borrow_mut() = true;
                    set_toggle_class(&document, true);
                    log::info!("[hand] control enabled");
                    // New stamp supersedes any loop still draining from a
                    // previous enable, so at most one loop feeds the filter.
                    let stamp = generation.borrow_mut().bump();
                    hand::start_detection_loop(enabled, gesture, video, generation, stamp);
                }
                Err(e) => {
                    log::error!("[hand] camera acquisition failed: {e:?}");
                    if let Some(w) = web::window() {
                        let _ = w.alert_with_message(
                            "Hand control needs webcam access. Scroll control stays active.",
                        );
                    }
                    set_toggle_class(&document, false);
                }
            }
        });
    });
}

fn set_toggle_class(document: &web::Document, on: bool) {
    if let Some(el) = document.get_element_by_id("hand-toggle") {
        let list = el.class_list();
        let _ = if on {
            list.add_1("on")
        } else {
            list.remove_1("on")
        };
    }
}
