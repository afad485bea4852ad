//! Engine configuration.
//!
//! All tolerances are in world units, i.e. they are applied after the
//! device-to-world transform and do not change with zoom.

use crate::error::{CoreError, CoreResult};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Snapping radius for corners and endpoints.
pub const HANDLE_TOLERANCE: f64 = 5.0;
/// Slack allowed by the segment test for straight lines.
pub const LINE_SLACK: f64 = 1.0;
/// Slack allowed by the segment test for freehand strokes.
pub const STROKE_SLACK: f64 = 5.0;
/// Width of the band outside an ellipse that still counts as its border.
pub const BORDER_BAND: f64 = 1.0;

/// Hit-testing tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Corner/endpoint snapping radius (per axis).
    pub handle: f64,
    /// `on_segment` slack for lines.
    pub line_slack: f64,
    /// `on_segment` slack for each freehand segment.
    pub stroke_slack: f64,
    /// Extra normalized band outside an ellipse reported as `border`.
    pub border_band: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            handle: HANDLE_TOLERANCE,
            line_slack: LINE_SLACK,
            stroke_slack: STROKE_SLACK,
            border_band: BORDER_BAND,
        }
    }
}

/// Configuration for a canvas session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hit-testing tolerances.
    pub tolerances: Tolerances,
    /// Smallest allowed zoom scale.
    pub min_scale: f64,
    /// Largest allowed zoom scale.
    pub max_scale: f64,
    /// Scale increment applied per zoom step.
    pub zoom_step: f64,
    /// Tool selected when a session starts.
    pub default_tool: ToolKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            min_scale: 0.1,
            max_scale: 10.0,
            zoom_step: 0.1,
            default_tool: ToolKind::Rectangle,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the zoom limits and tolerances are usable.
    ///
    /// Scales must be finite with `0 < min_scale <= max_scale`, the zoom step
    /// must be positive and tolerances must be finite and non-negative.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(invalid(format!("min_scale must be positive, got {}", self.min_scale)));
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return Err(invalid(format!(
                "max_scale {} is below min_scale {}",
                self.max_scale, self.min_scale
            )));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            return Err(invalid(format!("zoom_step must be positive, got {}", self.zoom_step)));
        }
        let t = &self.tolerances;
        for (name, value) in [
            ("handle", t.handle),
            ("line_slack", t.line_slack),
            ("stroke_slack", t.stroke_slack),
            ("border_band", t.border_band),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("tolerance {name} must be non-negative, got {value}")));
            }
        }
        Ok(())
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn invalid(message: String) -> CoreError {
    CoreError::InvalidConfig(message)
}
