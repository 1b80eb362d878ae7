use crate::error::ProjectionResult;
use crate::project_boxes;
use crate::types::{OrientedBox3D, Projection, ProjectionConfig, ViewportSize};
use noisy_float::prelude::*;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
struct BoxKey {
    center: [R64; 3],
    size: [R64; 3],
    rpy: [R64; 3],
    label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    boxes: Vec<BoxKey>,
    viewport: [R64; 2],
    fov_deg: R64,
    clip_behind_camera: bool,
    near_depth: R64,
    normalize_orientation: bool,
    normalization_tolerance: R64,
}

fn finite3(v: &nalgebra::Vector3<f64>) -> Option<[R64; 3]> {
    Some([R64::try_new(v.x)?, R64::try_new(v.y)?, R64::try_new(v.z)?])
}

impl CacheKey {
    /// `None` when any input is not finite; such inputs are never cached.
    fn new(
        boxes: &[OrientedBox3D],
        viewport: ViewportSize,
        fov_deg: f64,
        config: &ProjectionConfig,
    ) -> Option<Self> {
        let boxes = boxes
            .iter()
            .map(|bbox| {
                Some(BoxKey {
                    center: finite3(&bbox.center)?,
                    size: finite3(&bbox.size)?,
                    rpy: finite3(&bbox.rpy)?,
                    label: bbox.label.clone(),
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            boxes,
            viewport: [
                R64::try_new(viewport.width)?,
                R64::try_new(viewport.height)?,
            ],
            fov_deg: R64::try_new(fov_deg)?,
            clip_behind_camera: config.clip_behind_camera,
            near_depth: R64::try_new(config.near_depth)?,
            normalize_orientation: config.normalize_orientation,
            normalization_tolerance: R64::try_new(config.normalization_tolerance)?,
        })
    }
}

#[derive(Debug)]
struct CacheEntry {
    key: CacheKey,
    projection: Arc<Projection>,
}

/// Remembers the last projection and its inputs.
///
/// A call with inputs equal to the previous call returns the stored result;
/// anything else recomputes every box. Inputs containing NaN or infinities
/// bypass the cache.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    entry: Option<CacheEntry>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_project(
        &mut self,
        boxes: &[OrientedBox3D],
        viewport: ViewportSize,
        fov_deg: f64,
        config: &ProjectionConfig,
    ) -> ProjectionResult<Arc<Projection>> {
        let Some(key) = CacheKey::new(boxes, viewport, fov_deg, config) else {
            trace!("non-finite projection inputs, bypassing cache");
            self.entry = None;
            return project_boxes(boxes, viewport, fov_deg, config).map(Arc::new);
        };

        if let Some(entry) = &self.entry {
            if entry.key == key {
                trace!("projection cache hit");
                return Ok(Arc::clone(&entry.projection));
            }
        }

        trace!(boxes = boxes.len(), "projection cache miss");
        self.entry = None;
        let projection = Arc::new(project_boxes(boxes, viewport, fov_deg, config)?);
        self.entry = Some(CacheEntry {
            key,
            projection: Arc::clone(&projection),
        });
        Ok(projection)
    }

    /// Drop the stored projection.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}
