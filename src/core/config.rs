//! Controller configuration
//!
//! All inputs the original ambient map context supplied (viewport size,
//! projection) are explicit constructor parameters here; the projection is
//! passed separately to [`crate::controller::ZoomController::new`].

use crate::data::geojson::Geometry;
use crate::{Result, ZoomError};
use serde::{Deserialize, Serialize};

/// Default zoom bounds, matching the d3 demo this crate descends from
pub const DEFAULT_SCALE_EXTENT: (f64, f64) = (1.0, 8.0);

/// Default transition duration in milliseconds
pub const DEFAULT_DURATION_MS: f64 = 250.0;

/// Full construction-time configuration for a zoom controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    /// Viewport width in pixels
    pub width: f64,
    /// Viewport height in pixels
    pub height: f64,
    /// Geometry to fit once at mount, applied without animation
    pub bounds_from: Option<Geometry>,
    /// Geometry to animate towards; changes retarget the animator
    pub bounds_to: Option<Geometry>,
    /// Fractional shrink applied to the fit scale, 0..1
    pub bounds_margin: f64,
    /// Transition duration for animated moves, in milliseconds
    pub duration_ms: f64,
    /// Zoom bounds as `(min_zoom, max_zoom)`
    pub scale_extent: (f64, f64),
}

impl ZoomConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            bounds_from: None,
            bounds_to: None,
            bounds_margin: 0.0,
            duration_ms: DEFAULT_DURATION_MS,
            scale_extent: DEFAULT_SCALE_EXTENT,
        }
    }

    pub fn with_bounds_from(mut self, geometry: Geometry) -> Self {
        self.bounds_from = Some(geometry);
        self
    }

    pub fn with_bounds_to(mut self, geometry: Geometry) -> Self {
        self.bounds_to = Some(geometry);
        self
    }

    pub fn with_bounds_margin(mut self, margin: f64) -> Self {
        self.bounds_margin = margin;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_scale_extent(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.scale_extent = (min_zoom, max_zoom);
        self
    }

    /// Checks the invariants the controller relies on
    pub fn validate(&self) -> Result<()> {
        validate_viewport(self.width, self.height)?;
        validate_scale_extent(self.scale_extent)?;
        Ok(())
    }
}

/// The reconfigurable subset of [`ZoomConfig`]
///
/// Applying these through `configure` is the explicit replacement for the
/// original's dependency-array-triggered re-binding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomParams {
    pub width: f64,
    pub height: f64,
    pub bounds_margin: f64,
    pub duration_ms: f64,
    pub scale_extent: (f64, f64),
}

impl ZoomParams {
    pub fn validate(&self) -> Result<()> {
        validate_viewport(self.width, self.height)?;
        validate_scale_extent(self.scale_extent)?;
        Ok(())
    }
}

impl From<&ZoomConfig> for ZoomParams {
    fn from(config: &ZoomConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            bounds_margin: config.bounds_margin,
            duration_ms: config.duration_ms,
            scale_extent: config.scale_extent,
        }
    }
}

fn validate_viewport(width: f64, height: f64) -> Result<()> {
    if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
        return Err(ZoomError::InvalidViewport { width, height });
    }
    Ok(())
}

fn validate_scale_extent(extent: (f64, f64)) -> Result<()> {
    let (min, max) = extent;
    if !(min > 0.0) || !(max >= min) {
        return Err(ZoomError::InvalidScaleExtent { min, max });
    }
    Ok(())
}
