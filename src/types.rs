use crate::error::{ProjectionError, ProjectionResult};
use geo::Coord;
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// A cuboid in world space, oriented by roll/pitch/yaw.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedBox3D {
    pub center: na::Vector3<f64>,
    /// Full extents along the local axes, not half extents.
    pub size: na::Vector3<f64>,
    /// Roll, pitch and yaw in radians.
    pub rpy: na::Vector3<f64>,
    pub label: String,
}

impl OrientedBox3D {
    pub fn new(
        center: [f64; 3],
        size: [f64; 3],
        rpy: [f64; 3],
        label: impl Into<String>,
    ) -> Self {
        Self {
            center: center.into(),
            size: size.into(),
            rpy: rpy.into(),
            label: label.into(),
        }
    }
}

/// Drawing area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Which face of the box an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Top,
    Bottom,
    Vertical,
}

/// One projected box edge, ready to be drawn as a rotated stick.
#[derive(Debug, Clone, PartialEq)]
pub struct WireEdge2D {
    pub box_index: usize,
    pub kind: EdgeKind,
    /// Position of the edge within its group of four.
    pub slot: usize,
    pub start: Coord<f64>,
    pub end: Coord<f64>,
    pub length: f64,
    /// `atan2(dy, dx)` in radians.
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnchor2D {
    pub box_index: usize,
    pub text: String,
    pub pos: Coord<f64>,
}

/// Output of one projection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub edges: Vec<WireEdge2D>,
    pub labels: Vec<LabelAnchor2D>,
}

impl Projection {
    pub fn edges_of(&self, box_index: usize) -> impl Iterator<Item = &WireEdge2D> {
        self.edges
            .iter()
            .filter(move |edge| edge.box_index == box_index)
    }
}

/// Knobs for the projection pipeline.
///
/// The defaults reproduce the unclipped behavior: points at or behind the
/// camera plane are projected anyway and come out mirrored or non-finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Clip edges against the plane `Z = near_depth` in view space and drop
    /// labels behind it.
    pub clip_behind_camera: bool,
    pub near_depth: f64,
    /// Rescale orientation quaternions whose norm drifts from one.
    pub normalize_orientation: bool,
    pub normalization_tolerance: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            clip_behind_camera: false,
            near_depth: 1e-3,
            normalize_orientation: true,
            normalization_tolerance: 1e-9,
        }
    }
}

impl ProjectionConfig {
    /// Reject settings the pipeline cannot honor. `near_depth` is only
    /// checked when clipping is enabled.
    pub fn validate(&self) -> ProjectionResult<()> {
        let near_depth = self.near_depth;
        if self.clip_behind_camera && !(near_depth.is_finite() && near_depth > 0.0) {
            return Err(ProjectionError::InvalidNearDepth { near_depth });
        }
        Ok(())
    }
}
