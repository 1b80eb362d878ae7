use crate::error::{ProjectionError, ProjectionResult};
use crate::types::ViewportSize;
use geo::{coord, Rect};

impl ViewportSize {
    /// Largest rectangle with the media's aspect ratio that fits in
    /// `container`.
    ///
    /// Media narrower than the container is bound by height (pillarbox),
    /// otherwise by width (letterbox).
    pub fn fit(media: ViewportSize, container: ViewportSize) -> ProjectionResult<ViewportSize> {
        if media.height == 0.0 || !media.aspect().is_finite() {
            return Err(ProjectionError::DegenerateMedia {
                width: media.width,
                height: media.height,
            });
        }
        if container.height == 0.0 {
            return Err(ProjectionError::DegenerateViewport {
                width: container.width,
                height: container.height,
            });
        }

        let media_aspect = media.aspect();
        let fitted = if media_aspect < container.aspect() {
            ViewportSize::new(container.height * media_aspect, container.height)
        } else {
            ViewportSize::new(container.width, container.width / media_aspect)
        };
        Ok(fitted)
    }
}

/// Fitted media rectangle, centered in the container, in container pixels.
pub fn fit_rect(media: ViewportSize, container: ViewportSize) -> ProjectionResult<Rect<f64>> {
    let fitted = ViewportSize::fit(media, container)?;
    let x = (container.width - fitted.width) / 2.0;
    let y = (container.height - fitted.height) / 2.0;
    Ok(Rect::new(
        coord! { x: x, y: y },
        coord! { x: x + fitted.width, y: y + fitted.height },
    ))
}
