//! Glyph point sets: the morph endpoints produced by the rasterization
//! collaborator (flat position/edge arrays) lifted into typed storage.

use glam::Vec3;

use crate::constants::SCATTER_TARGET_RADIUS;

#[derive(Debug, thiserror::Error)]
pub enum GlyphError {
    #[error("glyph position array length {0} is not a multiple of 3")]
    RaggedPositions(usize),
    #[error("glyph edge list length {0} is odd")]
    RaggedEdges(usize),
    #[error("glyph edge references point {index} but only {count} points exist")]
    EdgeOutOfRange { index: u32, count: usize },
}

/// A rasterized glyph: point cloud plus a wireframe edge list (index pairs).
#[derive(Clone, Debug, Default)]
pub struct GlyphPointSet {
    pub positions: Vec<Vec3>,
    pub edges: Vec<u32>,
}

impl GlyphPointSet {
    /// Lift the rasterizer's flat arrays, validating the edge indices.
    pub fn from_raster(positions: &[f32], edge_indices: &[u32]) -> Result<Self, GlyphError> {
        if positions.len() % 3 != 0 {
            return Err(GlyphError::RaggedPositions(positions.len()));
        }
        if edge_indices.len() % 2 != 0 {
            return Err(GlyphError::RaggedEdges(edge_indices.len()));
        }
        let count = positions.len() / 3;
        for &idx in edge_indices {
            if idx as usize >= count {
                return Err(GlyphError::EdgeOutOfRange { index: idx, count });
            }
        }
        let positions = positions
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            positions,
            edges: edge_indices.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Synthetic morph target for an index that does not exist in the target
/// variant: a point on a circle so absent points scatter outward coherently
/// instead of collapsing to the origin.
#[inline]
pub fn scatter_target(index: usize, max_points: usize) -> Vec3 {
    let angle = (index as f32 / max_points.max(1) as f32) * std::f32::consts::TAU;
    Vec3::new(
        angle.cos() * SCATTER_TARGET_RADIUS,
        angle.sin() * SCATTER_TARGET_RADIUS,
        0.0,
    )
}
