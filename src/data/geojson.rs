use crate::core::geo::LonLat;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GeoJSON geometry types
///
/// Positions are `[lon, lat]` pairs as in the GeoJSON spec. This is the
/// "arbitrary GeoJSON-like shape" the zoom targets are expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
}

impl Geometry {
    /// Parses a geometry from raw GeoJSON text
    pub fn from_str(geojson_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(geojson_str)?)
    }

    /// Visits every position in the geometry in document order
    pub fn for_each_position<F: FnMut(LonLat)>(&self, f: &mut F) {
        match self {
            Geometry::Point { coordinates } => f(LonLat::new(coordinates[0], coordinates[1])),
            Geometry::LineString { coordinates } | Geometry::MultiPoint { coordinates } => {
                for c in coordinates {
                    f(LonLat::new(c[0], c[1]));
                }
            }
            Geometry::Polygon { coordinates } | Geometry::MultiLineString { coordinates } => {
                for ring in coordinates {
                    for c in ring {
                        f(LonLat::new(c[0], c[1]));
                    }
                }
            }
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    for ring in polygon {
                        for c in ring {
                            f(LonLat::new(c[0], c[1]));
                        }
                    }
                }
            }
            Geometry::GeometryCollection { geometries } => {
                for geometry in geometries {
                    geometry.for_each_position(f);
                }
            }
        }
    }
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: Option<serde_json::Value>,
    pub geometry: Option<Geometry>,
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection { features: Vec<Feature> },
    Geometry(Geometry),
}

impl GeoJson {
    /// Parses any GeoJSON root object from raw text
    pub fn from_str(geojson_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(geojson_str)?)
    }

    /// Visits every position across all contained geometries
    pub fn for_each_position<F: FnMut(LonLat)>(&self, f: &mut F) {
        match self {
            GeoJson::Geometry(geometry) => geometry.for_each_position(f),
            GeoJson::Feature(feature) => {
                if let Some(geometry) = &feature.geometry {
                    geometry.for_each_position(f);
                }
            }
            GeoJson::FeatureCollection { features } => {
                for feature in features {
                    if let Some(geometry) = &feature.geometry {
                        geometry.for_each_position(f);
                    }
                }
            }
        }
    }
}
