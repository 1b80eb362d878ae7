use nalgebra as na;
use tracing::warn;

/// Convert roll, pitch and yaw (radians) into a quaternion using the ZYX
/// composition. The result is not renormalized; see [`normalize_quaternion`].
pub fn euler_to_quaternion(rpy: &na::Vector3<f64>) -> na::Quaternion<f64> {
    let (sr, cr) = (rpy.x * 0.5).sin_cos();
    let (sp, cp) = (rpy.y * 0.5).sin_cos();
    let (sy, cy) = (rpy.z * 0.5).sin_cos();

    let qx = sr * cp * cy - cr * sp * sy;
    let qy = cr * sp * cy + sr * cp * sy;
    let qz = cr * cp * sy - sr * sp * cy;
    let qw = cr * cp * cy + sr * sp * sy;

    na::Quaternion::new(qw, qx, qy, qz)
}

/// Rotation matrix of `q`, read as-is. A quaternion that is not unit
/// length gives a matrix that also scales.
pub fn quaternion_to_matrix(q: &na::Quaternion<f64>) -> na::Matrix3<f64> {
    let (x, y, z, w) = (q.i, q.j, q.k, q.w);

    na::Matrix3::new(
        1.0 - 2.0 * (y * y + z * z),
        2.0 * (x * y - w * z),
        2.0 * (x * z + w * y),
        2.0 * (x * y + w * z),
        1.0 - 2.0 * (x * x + z * z),
        2.0 * (y * z - w * x),
        2.0 * (x * z - w * y),
        2.0 * (y * z + w * x),
        1.0 - 2.0 * (x * x + y * y),
    )
}

/// Rescale `q` to unit norm when its norm is off by more than `tolerance`.
///
/// Quaternions within tolerance are returned untouched so valid input keeps
/// its exact bits. Zero and non-finite norms cannot be repaired and are
/// passed through.
pub fn normalize_quaternion(q: na::Quaternion<f64>, tolerance: f64) -> na::Quaternion<f64> {
    let norm = q.norm();
    if !norm.is_finite() || norm == 0.0 || approx::abs_diff_eq!(norm, 1.0, epsilon = tolerance) {
        return q;
    }
    warn!(norm, "renormalizing orientation quaternion");
    q.normalize()
}

/// Rotation matrix for a roll/pitch/yaw triple, optionally renormalizing the
/// intermediate quaternion.
pub fn rotation_from_rpy(rpy: &na::Vector3<f64>, normalize: Option<f64>) -> na::Matrix3<f64> {
    let q = euler_to_quaternion(rpy);
    let q = match normalize {
        Some(tolerance) => normalize_quaternion(q, tolerance),
        None => q,
    };
    quaternion_to_matrix(&q)
}
