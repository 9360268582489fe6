//! Mesh asset loading over fetch, with a fallback chain: primary model,
//! then the low-poly fallback, then no model at all. Every failure is
//! logged and degrades gracefully; the page keeps running either way.

use contrail_core::{AssetError, MeshAsset};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub const PRIMARY_MESH_PATH: &str = "assets/aircraft.mesh.json";
pub const FALLBACK_MESH_PATH: &str = "assets/aircraft-lowpoly.mesh.json";

pub async fn load_with_fallback(document: &web::Document) -> Option<MeshAsset> {
    set_progress(document, 0.0);
    for (i, path) in [PRIMARY_MESH_PATH, FALLBACK_MESH_PATH].iter().enumerate() {
        set_progress(document, 0.5 * i as f32);
        match fetch_mesh(path).await {
            Ok(mesh) => {
                log::info!(
                    "[assets] loaded {} ({} triangles)",
                    path,
                    mesh.triangle_count()
                );
                finish_progress(document);
                return Some(mesh);
            }
            Err(e) => log::error!("[assets] {e}"),
        }
    }
    log::warn!("[assets] no model available; rendering scene without it");
    finish_progress(document);
    None
}

async fn fetch_mesh(path: &str) -> Result<MeshAsset, AssetError> {
    let fetch_err = |detail: String| AssetError::Fetch {
        path: path.to_string(),
        detail,
    };
    let window = web::window().ok_or_else(|| fetch_err("no window".into()))?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| fetch_err(format!("{e:?}")))?
        .dyn_into()
        .map_err(|e| fetch_err(format!("{e:?}")))?;
    if !response.ok() {
        return Err(fetch_err(format!("HTTP {}", response.status())));
    }
    let body = JsFuture::from(
        response
            .text()
            .map_err(|e| fetch_err(format!("{e:?}")))?,
    )
    .await
    .map_err(|e| fetch_err(format!("{e:?}")))?
    .as_string()
    .ok_or_else(|| fetch_err("non-text body".into()))?;
    MeshAsset::from_json(path, &body)
}

fn set_progress(document: &web::Document, ratio: f32) {
    if let Some(el) = document.get_element_by_id("load-progress") {
        let pct = (ratio.clamp(0.0, 1.0) * 100.0) as u32;
        let _ = el.set_attribute("style", &format!("width:{pct}%"));
    }
}

fn finish_progress(document: &web::Document) {
    set_progress(document, 1.0);
    if let Some(el) = document.get_element_by_id("load-overlay") {
        let _ = el.set_attribute("style", "display:none");
    }
}
