use crate::types::OrientedBox3D;
use nalgebra as na;

/// Winding of the eight corners.
///
/// Indexes the corners as enumerated by [`enumerated_corners`] (x outer,
/// y middle, z inner, minus before plus). After reordering, entries 0..4
/// are the top quad (+z), entries 4..8 the bottom quad, `i` and `i + 4` are
/// joined by a vertical edge and `i`, `(i + 1) % 4` by a quad edge.
pub const CORNER_ORDER: [usize; 8] = [1, 3, 7, 5, 0, 2, 6, 4];

/// Number of corners in one quad.
pub const QUAD_LEN: usize = 4;

fn enumerated_corners(half: &na::Vector3<f64>) -> [na::Vector3<f64>; 8] {
    let signs = [-1.0, 1.0];
    let mut corners = [na::Vector3::zeros(); 8];
    let mut idx = 0;
    for sx in signs {
        for sy in signs {
            for sz in signs {
                corners[idx] = na::Vector3::new(sx * half.x, sy * half.y, sz * half.z);
                idx += 1;
            }
        }
    }
    corners
}

/// Corner offsets from the box center, in [`CORNER_ORDER`].
pub fn local_corners(size: &na::Vector3<f64>) -> [na::Vector3<f64>; 8] {
    debug_assert!(
        size.iter().all(|s| s.is_nan() || *s >= 0.0),
        "box size must not be negative: {size:?}"
    );

    let enumerated = enumerated_corners(&(size / 2.0));
    CORNER_ORDER.map(|idx| enumerated[idx])
}

/// Corners rotated by `rotation` and moved to the box center.
pub fn world_corners(bbox: &OrientedBox3D, rotation: &na::Matrix3<f64>) -> [na::Vector3<f64>; 8] {
    local_corners(&bbox.size).map(|corner| rotation * corner + bbox.center)
}

/// Split corners into the top and bottom quads.
pub fn quads<T: Copy>(corners: &[T; 8]) -> ([T; QUAD_LEN], [T; QUAD_LEN]) {
    let top = [corners[0], corners[1], corners[2], corners[3]];
    let bottom = [corners[4], corners[5], corners[6], corners[7]];
    (top, bottom)
}

/// Mean of the corners.
pub fn centroid(corners: &[na::Vector3<f64>; 8]) -> na::Vector3<f64> {
    corners.iter().sum::<na::Vector3<f64>>() / corners.len() as f64
}
