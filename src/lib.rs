//! Project oriented 3D bounding boxes into 2D wireframes.
//!
//! Each box (center, full extents, roll/pitch/yaw) goes through a fixed
//! pipeline: Euler angles to a rotation matrix, eight corners in a fixed
//! winding, world placement, a 90° tilt into the camera frame and a pinhole
//! projection. The result is twelve screen-space edges and one label anchor
//! per box.
//!
//! Degenerate geometry is not an error. Points on or behind the camera plane
//! project to non-finite or mirrored coordinates unless
//! [`ProjectionConfig::clip_behind_camera`] is set. Only a viewport or field
//! of view that cannot describe a camera is rejected.

mod cache;
mod error;
mod types;
mod viewport;

pub mod camera;
pub mod corners;
pub mod orientation;
pub mod wireframe;

pub use cache::ProjectionCache;
pub use camera::CameraModel;
pub use error::{ProjectionError, ProjectionResult};
pub use types::{
    EdgeKind, LabelAnchor2D, OrientedBox3D, Projection, ProjectionConfig, ViewportSize,
    WireEdge2D,
};
pub use viewport::fit_rect;

use crate::wireframe::{project_box, EDGES_PER_BOX};
use tracing::debug;

/// Project every box through a camera with horizontal field of view
/// `fov_deg` over `viewport`.
///
/// Edges come out box-major, each box ordered top ring, bottom ring, then
/// verticals. Labels follow the input order.
#[tracing::instrument(skip_all, fields(boxes = boxes.len(), fov_deg = fov_deg))]
pub fn project_boxes(
    boxes: &[OrientedBox3D],
    viewport: ViewportSize,
    fov_deg: f64,
    config: &ProjectionConfig,
) -> ProjectionResult<Projection> {
    config.validate()?;
    let camera = CameraModel::new(fov_deg, viewport)?;

    let mut projection = Projection {
        edges: Vec::with_capacity(boxes.len() * EDGES_PER_BOX),
        labels: Vec::with_capacity(boxes.len()),
    };
    for (box_index, bbox) in boxes.iter().enumerate() {
        let (edges, label) = project_box(box_index, bbox, &camera, config);
        projection.edges.extend(edges);
        projection.labels.extend(label);
    }

    debug!(
        edges = projection.edges.len(),
        labels = projection.labels.len(),
        focal_length = camera.focal_length,
        "projected boxes"
    );
    Ok(projection)
}
