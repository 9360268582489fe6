//! HUD and background-layer DOM updates driven by scroll progress.

use crate::dom;
use contrail_core::{hud, ScrollState};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Cached handles to the HUD elements; looked up once at startup so the
/// per-frame update never queries the DOM tree.
pub struct Hud {
    altitude: Option<web::Element>,
    velocity: Option<web::Element>,
    progress_bar: Option<web::Element>,
    nav_items: Vec<(usize, web::Element)>,
    background_layers: Vec<web::Element>,
}

impl Hud {
    pub fn new(document: &web::Document) -> Self {
        let mut nav_items = Vec::new();
        if let Ok(items) = document.query_selector_all(".nav-item") {
            for i in 0..items.length() {
                if let Some(el) = items.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                    if let Some(section) = el
                        .get_attribute("data-section")
                        .and_then(|s| s.parse::<usize>().ok())
                    {
                        nav_items.push((section, el));
                    }
                }
            }
        }
        let background_layers = (0..contrail_core::BACKGROUND_LAYER_COUNT)
            .filter_map(|i| document.get_element_by_id(&format!("bg-layer-{i}")))
            .collect();
        Self {
            altitude: document.get_element_by_id("hud-altitude"),
            velocity: document.get_element_by_id("hud-velocity"),
            progress_bar: document.get_element_by_id("progress-bar"),
            nav_items,
            background_layers,
        }
    }

    pub fn update(&self, scroll: &ScrollState) {
        if let Some(el) = &self.altitude {
            dom::set_text(el, &hud::format_altitude(scroll.progress));
        }
        if let Some(el) = &self.velocity {
            dom::set_text(el, &hud::format_mach(scroll.progress));
        }
        if let Some(el) = &self.progress_bar {
            let _ = el.set_attribute("style", &format!("width:{:.1}%", scroll.progress * 100.0));
        }
        for (section, el) in &self.nav_items {
            set_active(el, *section == scroll.section);
        }
        let active_layer = hud::background_layer(scroll.section);
        for (i, el) in self.background_layers.iter().enumerate() {
            set_active(el, i == active_layer);
        }
    }
}

fn set_active(el: &web::Element, active: bool) {
    let list = el.class_list();
    let _ = if active {
        list.add_1("active")
    } else {
        list.remove_1("active")
    };
}
