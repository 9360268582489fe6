//! On-disk mesh asset format shared by the web and native frontends.
//! Loading transports (fetch / filesystem) live with each frontend; this
//! module owns parsing and validation.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("fetch failed for {path}: {detail}")]
    Fetch { path: String, detail: String },
    #[error("malformed mesh asset {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("mesh asset {path} failed validation: {reason}")]
    Invalid { path: String, reason: String },
}

/// Optional anti-collision beacon clip carried by an asset. The frame
/// driver advances clip time; the renderer maps intensity to emissive.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BeaconClip {
    pub rate_hz: f32,
}

impl BeaconClip {
    /// Blink intensity in [0, 1] at a given clip time. Cubed so the
    /// beacon reads as a flash rather than a slow glow.
    pub fn intensity(&self, clip_time_s: f32) -> f32 {
        let phase = (clip_time_s * self.rate_hz * std::f32::consts::TAU).sin() * 0.5 + 0.5;
        phase * phase * phase
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeshAsset {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    #[serde(default)]
    pub beacon: Option<BeaconClip>,
}

impl MeshAsset {
    /// Parse and validate a JSON asset body. `path` is only used for
    /// error context.
    pub fn from_json(path: &str, body: &str) -> Result<Self, AssetError> {
        let mesh: MeshAsset = serde_json::from_str(body).map_err(|source| AssetError::Parse {
            path: path.to_string(),
            source,
        })?;
        mesh.validate(path)?;
        Ok(mesh)
    }

    pub fn validate(&self, path: &str) -> Result<(), AssetError> {
        let invalid = |reason: String| AssetError::Invalid {
            path: path.to_string(),
            reason,
        };
        if self.positions.is_empty() {
            return Err(invalid("no vertices".into()));
        }
        if self.normals.len() != self.positions.len() {
            return Err(invalid(format!(
                "{} normals for {} positions",
                self.normals.len(),
                self.positions.len()
            )));
        }
        if self.indices.is_empty() || self.indices.len() % 3 != 0 {
            return Err(invalid(format!(
                "index count {} is not a positive multiple of 3",
                self.indices.len()
            )));
        }
        let max = self.positions.len() as u32;
        if let Some(&bad) = self.indices.iter().find(|&&i| i >= max) {
            return Err(invalid(format!("index {bad} out of range (< {max})")));
        }
        Ok(())
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
