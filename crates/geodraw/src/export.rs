//! Snapshot export: GeoJSON serialization and the SVG renderer backend.
//!
//! The download command serializes the engine's current feature snapshot to
//! a pretty-printed GeoJSON `FeatureCollection`; [`svg`] provides a complete
//! headless [`Renderer`](crate::renderer::Renderer) that tracks the live
//! scene and can emit it as an SVG document.

pub mod svg;

use geodraw_core::feature::FeatureCollection;

use crate::error::GeodrawError;

/// File name the download command writes snapshots under.
pub const SNAPSHOT_FILE_NAME: &str = "features.json";

/// Serializes a feature snapshot as pretty-printed GeoJSON.
///
/// # Errors
///
/// Returns [`GeodrawError::Export`] if serialization fails.
///
/// # Examples
///
/// ```
/// use geodraw::export::snapshot_json;
/// use geodraw_core::feature::FeatureCollection;
///
/// let json = snapshot_json(&FeatureCollection::default()).unwrap();
/// assert!(json.contains("\"FeatureCollection\""));
/// ```
pub fn snapshot_json(snapshot: &FeatureCollection) -> Result<String, GeodrawError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

#[cfg(test)]
mod tests {
    use geodraw_core::{
        feature::Feature,
        geometry::{Geometry, Position},
    };

    use super::*;

    #[test]
    fn test_snapshot_is_pretty_printed_geojson() {
        let snapshot = FeatureCollection::new(vec![Feature::new(
            "p1",
            Geometry::Point {
                coordinates: Position::new(1.0, 2.0),
            },
        )]);

        let json = snapshot_json(&snapshot).unwrap();
        assert!(json.contains("\"type\": \"FeatureCollection\""));
        assert!(json.contains("\"type\": \"Feature\""));
        assert!(json.contains("\"type\": \"Point\""));

        let back: FeatureCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
