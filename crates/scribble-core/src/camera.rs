//! Camera module for pan/zoom transforms.
//!
//! Shapes are stored and hit-tested in world space. The camera is the only
//! place where pan and zoom are applied: pointer samples go through
//! [`Camera::to_world`] and the renderer draws with [`Camera::transform`],
//! which is its exact inverse.

use crate::config::EngineConfig;
use crate::error::CoreResult;
use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the canvas.
///
/// Zoom is centered on the viewport: whenever the scale or the viewport
/// changes, `scale_offset` is recomputed as `(viewport * scale - viewport) / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current pan offset.
    pan: Vec2,
    /// Current zoom scale (1.0 = 100%).
    scale: f64,
    /// Offset that keeps the zoom centered on the viewport.
    scale_offset: Vec2,
    /// Size of the drawing surface in device pixels.
    viewport: Size,
    /// Minimum allowed scale.
    min_scale: f64,
    /// Maximum allowed scale.
    max_scale: f64,
    /// Scale change per zoom step.
    zoom_step: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl Camera {
    /// Create a camera for a viewport of the given size.
    pub fn new(viewport: Size) -> Self {
        Self::with_limits(&EngineConfig::default(), viewport)
    }

    /// Create a camera using the zoom limits from `config`.
    ///
    /// Fails with [`CoreError::InvalidConfig`](crate::CoreError::InvalidConfig)
    /// if the limits could produce a zero, negative or inverted scale range.
    pub fn from_config(config: &EngineConfig, viewport: Size) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self::with_limits(config, viewport))
    }

    fn with_limits(config: &EngineConfig, viewport: Size) -> Self {
        Self {
            pan: Vec2::ZERO,
            scale: 1.0,
            scale_offset: Vec2::ZERO,
            viewport,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            zoom_step: config.zoom_step,
        }
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn scale_offset(&self) -> Vec2 {
        self.scale_offset
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn zoom_step(&self) -> f64 {
        self.zoom_step
    }

    /// Zoom level for display, e.g. `100` at scale 1.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// Convert a device point to world coordinates.
    pub fn to_world(&self, device: Point) -> Point {
        let s = self.scale;
        Point::new(
            (device.x - self.pan.x * s + self.scale_offset.x) / s - self.pan.x,
            (device.y - self.pan.y * s + self.scale_offset.y) / s - self.pan.y,
        )
    }

    /// Convert a world point to device coordinates.
    pub fn to_device(&self, world: Point) -> Point {
        self.transform() * world
    }

    /// Get the affine transform for rendering (world to device).
    pub fn transform(&self) -> Affine {
        let translation = self.pan * (2.0 * self.scale) - self.scale_offset;
        Affine::translate(translation) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling (device to world).
    pub fn inverse_transform(&self) -> Affine {
        self.transform().inverse()
    }

    /// Set the zoom scale, clamped to the allowed range. Non-finite scales are ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        self.scale = scale.max(self.min_scale).min(self.max_scale);
        self.update_scale_offset();
    }

    /// Resize the viewport.
    pub fn set_viewport_size(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.update_scale_offset();
    }

    /// Step the zoom in (positive `delta`) or out (negative `delta`).
    pub fn zoom_by(&mut self, delta: f64) {
        if delta == 0.0 {
            return;
        }
        let step = if delta > 0.0 { self.zoom_step } else { -self.zoom_step };
        self.set_scale(self.scale + step);
        log::debug!("zoom to {}%", self.zoom_percent());
    }

    /// Reset to 100% zoom, keeping the pan.
    pub fn reset_zoom(&mut self) {
        self.set_scale(1.0);
    }

    /// Pan the camera by `delta` pan units.
    pub fn pan(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Pan so that content follows a pointer that moved `delta` device pixels.
    pub fn pan_by_device(&mut self, delta: Vec2) {
        self.pan += delta / (2.0 * self.scale);
    }

    fn update_scale_offset(&mut self) {
        let s = self.scale;
        self.scale_offset = Vec2::new(
            (self.viewport.width * s - self.viewport.width) / 2.0,
            (self.viewport.height * s - self.viewport.height) / 2.0,
        );
    }
}
