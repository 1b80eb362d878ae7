use crate::camera::{clip_segment, CameraModel};
use crate::corners::{centroid, quads, world_corners, QUAD_LEN};
use crate::orientation::rotation_from_rpy;
use crate::types::{EdgeKind, LabelAnchor2D, OrientedBox3D, ProjectionConfig, WireEdge2D};
use geo::{prelude::*, Coord, Line};
use itertools::{izip, Itertools};
use nalgebra as na;
use tracing::trace;

/// World-space Z nudge applied to the label anchor before projection.
pub const LABEL_Z_OFFSET: f64 = 0.1;

/// Edges per box.
pub const EDGES_PER_BOX: usize = 3 * QUAD_LEN;

impl WireEdge2D {
    pub fn new(
        box_index: usize,
        kind: EdgeKind,
        slot: usize,
        start: Coord<f64>,
        end: Coord<f64>,
    ) -> Self {
        let line = Line::new(start, end);
        Self {
            box_index,
            kind,
            slot,
            start,
            end,
            length: line.euclidean_length(),
            angle: line.dy().atan2(line.dx()),
        }
    }
}

fn quad_ring<T: Copy>(
    kind: EdgeKind,
    quad: [T; QUAD_LEN],
) -> impl Iterator<Item = (EdgeKind, usize, T, T)> {
    quad.into_iter()
        .circular_tuple_windows::<(T, T)>()
        .enumerate()
        .map(move |(slot, (a, b))| (kind, slot, a, b))
}

/// The twelve corner pairs of a box in drawing order: top ring, bottom ring,
/// then the verticals joining `top[i]` to `bottom[i]`.
pub fn edge_pairs<T: Copy>(corners: &[T; 8]) -> Vec<(EdgeKind, usize, T, T)> {
    let (top, bottom) = quads(corners);
    let verticals = izip!(top, bottom)
        .enumerate()
        .map(|(slot, (a, b))| (EdgeKind::Vertical, slot, a, b));

    quad_ring(EdgeKind::Top, top)
        .chain(quad_ring(EdgeKind::Bottom, bottom))
        .chain(verticals)
        .collect()
}

/// Build the twelve edges from already projected corners.
pub fn assemble_edges(box_index: usize, projected: &[Coord<f64>; 8]) -> Vec<WireEdge2D> {
    edge_pairs(projected)
        .into_iter()
        .map(|(kind, slot, start, end)| WireEdge2D::new(box_index, kind, slot, start, end))
        .collect()
}

/// Project the label anchor of a box from its world-space corners.
pub fn label_anchor(
    box_index: usize,
    bbox: &OrientedBox3D,
    world: &[na::Vector3<f64>; 8],
    camera: &CameraModel,
    config: &ProjectionConfig,
) -> Option<LabelAnchor2D> {
    let anchor = centroid(world) + na::Vector3::new(0.0, 0.0, LABEL_Z_OFFSET);
    let view = camera.to_view(&anchor);
    if config.clip_behind_camera && view.z < config.near_depth {
        trace!(box_index, depth = view.z, "label behind camera");
        return None;
    }

    Some(LabelAnchor2D {
        box_index,
        text: bbox.label.clone(),
        pos: camera.project(&view),
    })
}

/// Wireframe edges and label anchor of one box.
pub fn project_box(
    box_index: usize,
    bbox: &OrientedBox3D,
    camera: &CameraModel,
    config: &ProjectionConfig,
) -> (Vec<WireEdge2D>, Option<LabelAnchor2D>) {
    let tolerance = config.normalize_orientation.then_some(config.normalization_tolerance);
    let rotation = rotation_from_rpy(&bbox.rpy, tolerance);
    let world = world_corners(bbox, &rotation);
    let label = label_anchor(box_index, bbox, &world, camera, config);

    let edges = if config.clip_behind_camera {
        let view = world.map(|corner| camera.to_view(&corner));
        let edges: Vec<_> = edge_pairs(&view)
            .into_iter()
            .filter_map(|(kind, slot, a, b)| {
                let (a, b) = clip_segment(a, b, config.near_depth)?;
                Some(WireEdge2D::new(
                    box_index,
                    kind,
                    slot,
                    camera.project(&a),
                    camera.project(&b),
                ))
            })
            .collect();
        if edges.len() < EDGES_PER_BOX {
            trace!(box_index, kept = edges.len(), "clipped edges behind camera");
        }
        edges
    } else {
        let projected = world.map(|corner| camera.project_world(&corner));
        assemble_edges(box_index, &projected)
    };

    (edges, label)
}
