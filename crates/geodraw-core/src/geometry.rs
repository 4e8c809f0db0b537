//! Geometric primitives for map features and screen coordinates.
//!
//! This module provides the fundamental geometric types used throughout
//! geodraw for describing features and for converting between geographic
//! and screen space.
//!
//! # Overview
//!
//! - [`Position`] - A geographic coordinate (longitude, latitude)
//! - [`ScreenPoint`] - A pixel coordinate within the map container
//! - [`Geometry`] - A GeoJSON-shaped geometry tagged union
//!
//! # Coordinate System
//!
//! Geographic positions follow the GeoJSON convention of `[longitude,
//! latitude]` pairs. Screen points have their origin at the top-left corner
//! of the map container with Y increasing downward, matching DOM and SVG
//! conventions.

use serde::{Deserialize, Serialize};

/// A geographic coordinate as a `[longitude, latitude]` pair.
///
/// Positions serialize as two-element JSON arrays, matching the GeoJSON
/// coordinate shape.
///
/// # Examples
///
/// ```
/// # use geodraw_core::geometry::Position;
/// let position = Position::new(55.31878, 25.23584);
/// assert_eq!(position.lng(), 55.31878);
/// assert_eq!(position.lat(), 25.23584);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    lng: f64,
    lat: f64,
}

impl Position {
    /// Creates a new position with the specified longitude and latitude
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Returns the longitude of the position
    pub fn lng(self) -> f64 {
        self.lng
    }

    /// Returns the latitude of the position
    pub fn lat(self) -> f64 {
        self.lat
    }
}

impl From<[f64; 2]> for Position {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Position> for [f64; 2] {
    fn from(position: Position) -> Self {
        [position.lng, position.lat]
    }
}

/// A pixel coordinate within the map container.
///
/// # Examples
///
/// ```
/// # use geodraw_core::geometry::ScreenPoint;
/// let point = ScreenPoint::new(120.0, 48.5);
/// assert_eq!(point.x(), 120.0);
/// assert_eq!(point.y(), 48.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    x: f64,
    y: f64,
}

impl ScreenPoint {
    /// Creates a new screen point with the specified pixel coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }
}

/// A GeoJSON-shaped feature geometry.
///
/// Only the three geometry types the drawing engine produces are modeled
/// with coordinates. Anything else deserializes to
/// [`Geometry::Unsupported`], which the rendering pipeline skips without
/// treating it as an error.
///
/// # Examples
///
/// ```
/// # use geodraw_core::geometry::Geometry;
/// let geometry: Geometry =
///     serde_json::from_str(r#"{"type":"Point","coordinates":[0.0,0.0]}"#).unwrap();
/// assert_eq!(geometry.type_name(), "Point");
///
/// let unknown: Geometry =
///     serde_json::from_str(r#"{"type":"MultiPolygon","coordinates":[]}"#).unwrap();
/// assert_eq!(unknown, Geometry::Unsupported);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single geographic position
    Point {
        /// The position of the point
        coordinates: Position,
    },
    /// An open path of two or more positions
    LineString {
        /// The path positions in drawing order
        coordinates: Vec<Position>,
    },
    /// One or more closed rings; the first ring is the outer boundary
    Polygon {
        /// The polygon rings, each a closed sequence of positions
        coordinates: Vec<Vec<Position>>,
    },
    /// Any geometry type geodraw does not render
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// Returns the GeoJSON type name of this geometry.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Point { .. } => "Point",
            Self::LineString { .. } => "LineString",
            Self::Polygon { .. } => "Polygon",
            Self::Unsupported => "Unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_serde_shape() {
        let position = Position::new(55.3, 25.2);
        let json = serde_json::to_string(&position).unwrap();
        assert_eq!(json, "[55.3,25.2]");

        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, position);
    }

    #[test]
    fn test_geometry_point_round_trip() {
        let json = r#"{"type":"Point","coordinates":[1.0,2.0]}"#;
        let geometry: Geometry = serde_json::from_str(json).unwrap();
        assert_eq!(
            geometry,
            Geometry::Point {
                coordinates: Position::new(1.0, 2.0)
            }
        );
        assert_eq!(serde_json::to_string(&geometry).unwrap(), json);
    }

    #[test]
    fn test_geometry_polygon_rings() {
        let json = r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]}"#;
        let geometry: Geometry = serde_json::from_str(json).unwrap();
        let Geometry::Polygon { coordinates } = &geometry else {
            panic!("expected a polygon, got {geometry:?}");
        };
        assert_eq!(coordinates.len(), 1);
        assert_eq!(coordinates[0].len(), 4);
    }

    #[test]
    fn test_unknown_geometry_is_unsupported() {
        let json = r#"{"type":"GeometryCollection","geometries":[]}"#;
        let geometry: Geometry = serde_json::from_str(json).unwrap();
        assert_eq!(geometry, Geometry::Unsupported);
    }
}
