//! Seam between the canvas and an external renderer.

use crate::shapes::Shape;
use kurbo::Affine;

/// Receives the shapes of a frame, back to front.
///
/// Implementations turn [`Shape::to_path`] or [`Shape::render_params`] into
/// pixels. `transform` maps world space to device space.
pub trait ShapeRenderer {
    /// Called once before any shape of a frame.
    fn begin_frame(&mut self, _transform: Affine) {}

    /// Render one shape. `preview` marks transient shapes such as the eraser trail.
    fn render_shape(&mut self, shape: &Shape, transform: Affine, preview: bool);
}
