use thiserror::Error;

pub type ProjectionResult<T> = Result<T, ProjectionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// The viewport cannot host a camera.
    #[error("degenerate viewport {width}x{height}: both sides must be finite and positive")]
    DegenerateViewport { width: f64, height: f64 },

    #[error("field of view {fov_deg} deg is outside (0, 180)")]
    InvalidFieldOfView { fov_deg: f64 },

    /// Clipping needs a plane strictly in front of the camera.
    #[error("near depth {near_depth} must be finite and positive when clipping")]
    InvalidNearDepth { near_depth: f64 },

    /// Media size has no usable aspect ratio.
    #[error("degenerate media size {width}x{height}")]
    DegenerateMedia { width: f64, height: f64 },
}
