//! # Zoomlet
//!
//! A viewport zoom-and-pan controller for geographic views, inspired by
//! d3-zoom's zoom-to-bounding-box pattern.
//!
//! The crate binds recognized pointer/touch gesture events to a geographic
//! projection and exposes an imperative "zoom to a bounding box" animation:
//! a pure bounds-fitting transform calculation, a gesture-driven zoom
//! behavior with configurable scale bounds and trigger filters, and an
//! eased animator that drives transitions through the same event stream
//! user gestures produce.

pub mod animation;
pub mod controller;
pub mod core;
pub mod data;
pub mod input;
pub mod projection;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::{ZoomConfig, ZoomParams, DEFAULT_DURATION_MS, DEFAULT_SCALE_EXTENT},
    geo::{LonLat, Point},
    transform::ViewTransform,
};

pub use controller::{MoveEvent, MoveListener, ViewPosition, ViewStyle, ZoomController};

pub use data::geojson::{Feature, GeoJson, Geometry};

pub use input::{InputEvent, Trigger, Triggers, ZoomBehavior, ZoomEvent, ZoomPhase};

pub use animation::{EasingFunction, Transition, TransitionState};

pub use projection::{path_bounds, Equirectangular, Mercator, Projection};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, ZoomError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum ZoomError {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scale extent: min {min}, max {max}")]
    InvalidScaleExtent { min: f64, max: f64 },

    #[error("invalid viewport dimensions: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
}

/// Error type alias for convenience
pub type Error = ZoomError;
