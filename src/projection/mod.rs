//! Forward and inverse lon-lat to pixel mappings
//!
//! The controller never looks a projection up from ambient context; one is
//! injected at construction. Two concrete projections ship with the crate,
//! both invertible so gesture callbacks can derive geographic coordinates.

use crate::core::bounds::Bounds;
use crate::core::geo::{LonLat, Point};
use crate::data::geojson::Geometry;
use std::f64::consts::PI;

const EARTH_RADIUS: f64 = 6378137.0;
const MAX_LATITUDE: f64 = 85.0511287798;

/// A forward/inverse mapping between geographic and pixel coordinates
pub trait Projection {
    /// Projects a geographic coordinate to pixel space
    fn project(&self, coord: &LonLat) -> Point;

    /// Maps a pixel-space point back to geographic coordinates
    fn invert(&self, point: &Point) -> LonLat;
}

/// Web Mercator (EPSG:3857) scaled so the world spans `world_size` pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    world_size: f64,
}

impl Mercator {
    pub fn new(world_size: f64) -> Self {
        Self { world_size }
    }

    /// Sizes the world square to fully cover a viewport
    pub fn fitted(width: f64, height: f64) -> Self {
        Self::new(width.max(height))
    }
}

impl Projection for Mercator {
    fn project(&self, coord: &LonLat) -> Point {
        let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let x = coord.lon.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;

        let half_world = PI * EARTH_RADIUS;
        Point::new(
            (x + half_world) / (2.0 * half_world) * self.world_size,
            (-y + half_world) / (2.0 * half_world) * self.world_size,
        )
    }

    fn invert(&self, point: &Point) -> LonLat {
        let half_world = PI * EARTH_RADIUS;
        let x = point.x / self.world_size * (2.0 * half_world) - half_world;
        let y = half_world - point.y / self.world_size * (2.0 * half_world);

        let lon = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        LonLat::new(lon, lat)
    }
}

/// Plate carrée: longitude and latitude mapped linearly onto the viewport
///
/// Useful as a predictable projection for tests and simple world maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equirectangular {
    width: f64,
    height: f64,
}

impl Equirectangular {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Projection for Equirectangular {
    fn project(&self, coord: &LonLat) -> Point {
        Point::new(
            (coord.lon + 180.0) / 360.0 * self.width,
            (90.0 - coord.lat) / 180.0 * self.height,
        )
    }

    fn invert(&self, point: &Point) -> LonLat {
        LonLat::new(
            point.x / self.width * 360.0 - 180.0,
            90.0 - point.y / self.height * 180.0,
        )
    }
}

/// Computes the pixel-space bounding box of a geometry under a projection
///
/// The analogue of `path.bounds(...)` in the d3 rendering stack: every
/// position is projected and folded into the box. A single-position
/// geometry yields a degenerate (zero-size) box.
pub fn path_bounds<P: Projection>(geometry: &Geometry, projection: &P) -> Bounds {
    let mut bounds = Bounds::empty();
    geometry.for_each_position(&mut |coord| {
        bounds.extend(&projection.project(&coord));
    });
    bounds
}
