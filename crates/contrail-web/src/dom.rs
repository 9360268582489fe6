use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Current vertical scroll offset in CSS pixels.
#[inline]
pub fn scroll_offset(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

/// Scrollable range: document height minus viewport height. May be zero
/// on pages shorter than the viewport; the scroll mapper clamps that case.
pub fn scrollable_range(window: &web::Window, document: &web::Document) -> f32 {
    let doc_height = document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (doc_height - viewport) as f32
}

pub fn smooth_scroll_to(window: &web::Window, top: f64) {
    let opts = web::ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(web::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&opts);
}

#[inline]
pub fn set_text(el: &web::Element, text: &str) {
    el.set_text_content(Some(text));
}
