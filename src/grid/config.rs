//! Grid construction options.

use serde::{Deserialize, Serialize};

use crate::topology::validation::NonManifoldHandling;

/// How face normals are oriented after they are computed from the winding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalOrientation {
    /// Flip a normal pointing toward the mean of all vertex positions.
    /// Sound for star-shaped meshes around their centroid.
    #[default]
    Centroid,
    /// Flip a normal pointing toward the coordinate origin.
    Origin,
    /// Keep the normal implied by each face's index order.
    Winding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub non_manifold: NonManifoldHandling,
    pub orientation: NormalOrientation,
    /// Reject faces that repeat a vertex index.
    pub reject_degenerate_faces: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            non_manifold: NonManifoldHandling::Warn,
            orientation: NormalOrientation::Centroid,
            reject_degenerate_faces: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_config_roundtrip() {
        let cfg = GridConfig {
            non_manifold: NonManifoldHandling::Error,
            orientation: NormalOrientation::Winding,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
        assert!(back.reject_degenerate_faces);
    }
}
