//! Pinhole camera: intrinsics, the fixed view tilt and perspective projection.

use crate::error::{ProjectionError, ProjectionResult};
use crate::types::ViewportSize;
use geo::Coord;
use nalgebra as na;
use std::f64::consts::FRAC_PI_2;

/// Rotation about X between the world frame (Z up) and the camera frame.
pub const TILT_ANGLE: f64 = FRAC_PI_2;

/// Rotation taking world coordinates into the camera frame.
pub fn tilt_matrix() -> na::Matrix3<f64> {
    let (s, c) = TILT_ANGLE.sin_cos();
    na::Matrix3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraModel {
    /// Horizontal field of view in degrees.
    pub fov_deg: f64,
    pub viewport: ViewportSize,
    pub focal_length: f64,
    pub principal_point: Coord<f64>,
    tilt: na::Matrix3<f64>,
}

impl CameraModel {
    pub fn new(fov_deg: f64, viewport: ViewportSize) -> ProjectionResult<Self> {
        let ViewportSize { width, height } = viewport;
        let usable = |side: f64| side.is_finite() && side > 0.0;
        if !usable(width) || !usable(height) {
            return Err(ProjectionError::DegenerateViewport { width, height });
        }
        if !(fov_deg > 0.0 && fov_deg < 180.0) {
            return Err(ProjectionError::InvalidFieldOfView { fov_deg });
        }

        let focal_length = width / (2.0 * (fov_deg.to_radians() / 2.0).tan());
        Ok(Self {
            fov_deg,
            viewport,
            focal_length,
            principal_point: Coord {
                x: width / 2.0,
                y: height / 2.0,
            },
            tilt: tilt_matrix(),
        })
    }

    pub fn intrinsics(&self) -> na::Matrix3<f64> {
        let f = self.focal_length;
        let Coord { x: cx, y: cy } = self.principal_point;
        na::Matrix3::new(f, 0.0, cx, 0.0, f, cy, 0.0, 0.0, 1.0)
    }

    /// World point into the camera frame. The camera sits at the origin.
    pub fn to_view(&self, world: &na::Vector3<f64>) -> na::Vector3<f64> {
        self.tilt * world
    }

    /// Perspective-divide a camera-frame point into pixels.
    ///
    /// Zero depth gives non-finite coordinates and negative depth a mirrored
    /// point; neither is rejected here.
    pub fn project(&self, view: &na::Vector3<f64>) -> Coord<f64> {
        let p = self.intrinsics() * view;
        Coord {
            x: p.x / p.z,
            y: p.y / p.z,
        }
    }

    pub fn project_world(&self, world: &na::Vector3<f64>) -> Coord<f64> {
        self.project(&self.to_view(world))
    }
}

/// Clip a camera-frame segment to the half space `Z >= near`.
///
/// Returns `None` when the whole segment lies behind the plane.
pub fn clip_segment(
    a: na::Vector3<f64>,
    b: na::Vector3<f64>,
    near: f64,
) -> Option<(na::Vector3<f64>, na::Vector3<f64>)> {
    match (a.z >= near, b.z >= near) {
        (true, true) => Some((a, b)),
        (false, false) => None,
        (a_front, _) => {
            let t = (near - a.z) / (b.z - a.z);
            let cut = a + (b - a) * t;
            if a_front {
                Some((a, cut))
            } else {
                Some((cut, b))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_camera() -> CameraModel {
        CameraModel::new(90.0, ViewportSize::new(200.0, 200.0)).unwrap()
    }

    #[test]
    fn intrinsics_from_fov() {
        let camera = square_camera();
        assert_relative_eq!(camera.focal_length, 100.0, epsilon = 1e-9);
        assert_eq!(camera.principal_point, Coord { x: 100.0, y: 100.0 });

        let wide = CameraModel::new(60.0, ViewportSize::new(640.0, 480.0)).unwrap();
        assert_relative_eq!(wide.focal_length, 320.0 * 3f64.sqrt(), epsilon = 1e-9);
        assert_eq!(wide.principal_point, Coord { x: 320.0, y: 240.0 });
    }

    #[test]
    fn optical_axis_hits_principal_point() {
        let camera = square_camera();
        let p = camera.project(&na::Vector3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(p.x, 100.0);
        assert_relative_eq!(p.y, 100.0);

        let p = camera.project(&na::Vector3::new(1.0, -2.0, 5.0));
        assert_relative_eq!(p.x, 120.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn tilt_maps_world_up_to_screen_up() {
        let camera = square_camera();
        let up = camera.to_view(&na::Vector3::z());
        assert_relative_eq!(up, na::Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-12);

        let forward = camera.to_view(&na::Vector3::y());
        assert_relative_eq!(forward, na::Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn zero_depth_is_not_finite() {
        let p = square_camera().project(&na::Vector3::new(1.0, 1.0, 0.0));
        assert!(!p.x.is_finite());
    }

    #[test]
    fn behind_camera_is_mirrored() {
        let camera = square_camera();
        let front = camera.project(&na::Vector3::new(1.0, 0.0, 5.0));
        let back = camera.project(&na::Vector3::new(1.0, 0.0, -5.0));
        assert_relative_eq!(front.x - 100.0, 100.0 - back.x, epsilon = 1e-9);
    }

    #[test]
    fn rejects_degenerate_viewports() {
        for (w, h) in [(200.0, 0.0), (0.0, 200.0), (-1.0, 10.0), (f64::NAN, 10.0)] {
            let err = CameraModel::new(60.0, ViewportSize::new(w, h)).unwrap_err();
            assert!(matches!(err, ProjectionError::DegenerateViewport { .. }));
        }
    }

    #[test]
    fn rejects_bad_fov() {
        for fov in [0.0, 180.0, -10.0, f64::NAN] {
            let err = CameraModel::new(fov, ViewportSize::new(10.0, 10.0)).unwrap_err();
            assert!(matches!(err, ProjectionError::InvalidFieldOfView { .. }));
        }
    }

    #[test]
    fn clip_keeps_front_segments() {
        let a = na::Vector3::new(0.0, 0.0, 1.0);
        let b = na::Vector3::new(1.0, 0.0, 2.0);
        assert_eq!(clip_segment(a, b, 0.1), Some((a, b)));
    }

    #[test]
    fn clip_drops_segments_behind() {
        let a = na::Vector3::new(0.0, 0.0, -1.0);
        let b = na::Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(clip_segment(a, b, 0.1), None);
    }

    #[test]
    fn clip_cuts_straddling_segments() {
        let a = na::Vector3::new(0.0, 0.0, -1.0);
        let b = na::Vector3::new(4.0, 0.0, 3.0);
        let (start, end) = clip_segment(a, b, 1.0).unwrap();
        assert_relative_eq!(start, na::Vector3::new(2.0, 0.0, 1.0), epsilon = 1e-12);
        assert_eq!(end, b);

        let (start, end) = clip_segment(b, a, 1.0).unwrap();
        assert_eq!(start, b);
        assert_relative_eq!(end, na::Vector3::new(2.0, 0.0, 1.0), epsilon = 1e-12);
    }
}
