//! Feature records, roles, and change batches.
//!
//! This module contains the externally-owned feature model the drawing
//! engine hands to the rendering pipeline. These types represent the wire
//! shape of one render invocation before it is classified, styled, and
//! turned into drawables.
//!
//! # Pipeline Position
//!
//! ```text
//! Drawing engine
//!     ↓ change batch
//! ChangeBatch { created, updated, deletedIds } (these types)
//!     ↓ classification
//! FeatureRole (plain / selection point / midpoint)
//!     ↓ style resolution
//! Effective Style
//!     ↓ lifecycle
//! Drawables
//! ```
//!
//! # Organization
//!
//! - [`Feature`] - One geometric record with identity, geometry, and property bag
//! - [`FeatureRole`] - Explicit styling-role discriminant with parent redirection
//! - [`ChangeBatch`] - One render invocation's payload
//! - [`FeatureCollection`] - Snapshot shape used for GeoJSON export

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    color::Color,
    geometry::Geometry,
    identifier::FeatureId,
    style::StylePatch,
};

/// GeoJSON object tag for features, always `"Feature"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum FeatureTag {
    #[default]
    Feature,
}

/// GeoJSON object tag for collections, always `"FeatureCollection"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum CollectionTag {
    #[default]
    FeatureCollection,
}

/// The styling role of a feature.
///
/// The drawing engine marks selection handles and midpoint markers with
/// property flags pointing back at the feature they decorate. Classifying
/// those flags into an explicit discriminant keeps the redirection rule in
/// one place: a sub-feature's styling identity is its parent's id, never its
/// own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureRole {
    /// An ordinary feature styled under its own id
    Plain,
    /// A draggable vertex handle belonging to a selected parent feature
    SelectionPoint {
        /// The id of the feature this handle decorates
        parent: FeatureId,
    },
    /// A midpoint marker between two vertices of a selected parent feature
    Midpoint {
        /// The id of the feature this marker decorates
        parent: FeatureId,
    },
}

impl FeatureRole {
    /// Returns true for the selection-point and midpoint sub-feature roles.
    pub fn is_sub_feature(&self) -> bool {
        !matches!(self, Self::Plain)
    }
}

/// An externally-owned geometric record.
///
/// The drawing engine owns feature lifecycle; geodraw only reads features.
/// The property bag is carried verbatim so engine-stamped properties such as
/// `mode` survive snapshot round trips.
///
/// # Examples
///
/// ```
/// use geodraw_core::feature::Feature;
/// use geodraw_core::geometry::{Geometry, Position};
///
/// let feature = Feature::new(
///     "p1",
///     Geometry::Point {
///         coordinates: Position::new(0.0, 0.0),
///     },
/// );
/// assert!(feature.id().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    tag: FeatureTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<FeatureId>,
    geometry: Geometry,
    #[serde(default)]
    properties: Map<String, Value>,
}

impl Feature {
    /// Creates a feature with the given id and geometry and an empty
    /// property bag
    pub fn new(id: impl Into<FeatureId>, geometry: Geometry) -> Self {
        Self {
            tag: FeatureTag::Feature,
            id: Some(id.into()),
            geometry,
            properties: Map::new(),
        }
    }

    /// Creates a feature without an id.
    ///
    /// Such features are unprocessable by the rendering pipeline and are
    /// logged and skipped; this constructor exists for testing that path.
    pub fn new_unidentified(geometry: Geometry) -> Self {
        Self {
            tag: FeatureTag::Feature,
            id: None,
            geometry,
            properties: Map::new(),
        }
    }

    /// Returns a copy of this feature with a property set
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Returns the feature id, if the engine assigned one
    pub fn id(&self) -> Option<FeatureId> {
        self.id
    }

    /// Returns the feature geometry
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns the raw property bag
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Returns the drawing mode the engine stamped on this feature, if any
    pub fn mode(&self) -> Option<&str> {
        self.properties.get("mode").and_then(Value::as_str)
    }

    /// Classifies this feature's styling role from its property flags.
    ///
    /// A feature flagged as a selection point or midpoint redirects its
    /// styling identity to the parent feature named by the matching
    /// `*FeatureId` property. A flag without a usable parent id degrades to
    /// [`FeatureRole::Plain`], styling the feature under its own id.
    pub fn role(&self) -> FeatureRole {
        if self.flag("selectionPoint") {
            if let Some(parent) = self.parent_id("selectionPointFeatureId") {
                return FeatureRole::SelectionPoint { parent };
            }
        }
        if self.flag("midPoint") {
            if let Some(parent) = self.parent_id("midPointFeatureId") {
                return FeatureRole::Midpoint { parent };
            }
        }
        FeatureRole::Plain
    }

    /// Returns the id this feature's style is stored and looked up under.
    ///
    /// Equals the feature's own id unless the feature is a selection point
    /// or midpoint, in which case it is the parent feature's id.
    pub fn styling_id(&self) -> Option<FeatureId> {
        match self.role() {
            FeatureRole::SelectionPoint { parent } | FeatureRole::Midpoint { parent } => {
                Some(parent)
            }
            FeatureRole::Plain => self.id,
        }
    }

    /// Returns true if this feature carries an explicit `color` property.
    ///
    /// An explicit color makes the feature's style sticky: it keeps the
    /// style active at the moment it was committed instead of following
    /// later global style changes.
    pub fn has_explicit_color(&self) -> bool {
        self.properties.contains_key("color")
    }

    /// Reads the per-feature style overrides from the property bag.
    ///
    /// Unparseable override values are dropped rather than failing the
    /// feature; one malformed property never blocks rendering.
    pub fn style_overrides(&self) -> StylePatch {
        let mut patch = StylePatch::default();
        if let Some(color) = self.property_color("color") {
            patch.fill_color = Some(color);
        }
        if let Some(color) = self.property_color("outlineColor") {
            patch.outline_color = Some(color);
        }
        if self.has_explicit_color() && patch.fill_color.is_none() {
            debug!(id:? = self.id; "Dropping unparseable color override");
        }
        patch.outline_width = self
            .property_f32("outlineWidth")
            .or_else(|| self.property_f32("width"));
        patch
    }

    fn flag(&self, key: &str) -> bool {
        self.properties.get(key).and_then(Value::as_bool) == Some(true)
    }

    fn parent_id(&self, key: &str) -> Option<FeatureId> {
        match self.properties.get(key)? {
            Value::String(text) => Some(FeatureId::new(text)),
            Value::Number(number) => number.as_i64().map(FeatureId::from_number),
            _ => None,
        }
    }

    fn property_color(&self, key: &str) -> Option<Color> {
        let text = self.properties.get(key)?.as_str()?;
        Color::new(text).ok()
    }

    fn property_f32(&self, key: &str) -> Option<f32> {
        self.properties.get(key)?.as_f64().map(|value| value as f32)
    }
}

/// One render invocation's payload: created and updated features plus the
/// ids whose drawables must be torn down.
///
/// Within one batch, `created` and `updated` go through the identical upsert
/// path and are fully applied before any of `deleted_ids`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeBatch {
    /// Features seen for the first time
    pub created: Vec<Feature>,
    /// Features whose geometry or properties changed
    pub updated: Vec<Feature>,
    /// Ids of features removed from the store
    pub deleted_ids: Vec<FeatureId>,
}

impl ChangeBatch {
    /// Returns true if the batch carries no work
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted_ids.is_empty()
    }
}

/// A GeoJSON feature collection, the shape of a feature-store snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    tag: CollectionTag,
    /// The snapshot features
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates a collection from a feature snapshot
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            tag: CollectionTag::FeatureCollection,
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Position;

    use super::*;

    fn point_feature(id: &str) -> Feature {
        Feature::new(
            id,
            Geometry::Point {
                coordinates: Position::new(0.0, 0.0),
            },
        )
    }

    #[test]
    fn test_plain_feature_role() {
        let feature = point_feature("a");
        assert_eq!(feature.role(), FeatureRole::Plain);
        assert_eq!(feature.styling_id(), Some(FeatureId::new("a")));
    }

    #[test]
    fn test_midpoint_redirects_styling_identity() {
        let feature = point_feature("m1")
            .with_property("midPoint", true)
            .with_property("midPointFeatureId", "A");

        assert_eq!(
            feature.role(),
            FeatureRole::Midpoint {
                parent: FeatureId::new("A")
            }
        );
        assert_eq!(feature.styling_id(), Some(FeatureId::new("A")));
    }

    #[test]
    fn test_selection_point_with_numeric_parent() {
        let feature = point_feature("s1")
            .with_property("selectionPoint", true)
            .with_property("selectionPointFeatureId", 7);

        assert_eq!(
            feature.role(),
            FeatureRole::SelectionPoint {
                parent: FeatureId::from_number(7)
            }
        );
    }

    #[test]
    fn test_flag_without_parent_degrades_to_plain() {
        let feature = point_feature("m1").with_property("midPoint", true);
        assert_eq!(feature.role(), FeatureRole::Plain);
        assert_eq!(feature.styling_id(), Some(FeatureId::new("m1")));
    }

    #[test]
    fn test_style_overrides() {
        let feature = point_feature("a")
            .with_property("color", "#ff0000")
            .with_property("outlineWidth", 5.0);

        let patch = feature.style_overrides();
        assert_eq!(patch.fill_color.unwrap().to_hex_string(), "#ff0000");
        assert_eq!(patch.outline_width, Some(5.0));
        assert!(patch.outline_color.is_none());
        assert!(feature.has_explicit_color());
    }

    #[test]
    fn test_malformed_override_is_dropped() {
        let feature = point_feature("a").with_property("color", "definitely-not-a-color");
        assert!(feature.style_overrides().fill_color.is_none());
        // The key is still present, so the sticky rule applies
        assert!(feature.has_explicit_color());
    }

    #[test]
    fn test_change_batch_wire_shape() {
        let json = r#"{
            "created": [{
                "type": "Feature",
                "id": "p1",
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                "properties": { "mode": "point" }
            }],
            "updated": [],
            "deletedIds": ["p0"]
        }"#;

        let batch: ChangeBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.created.len(), 1);
        assert_eq!(batch.created[0].mode(), Some("point"));
        assert_eq!(batch.deleted_ids, vec![FeatureId::new("p0")]);
    }

    #[test]
    fn test_feature_collection_round_trip() {
        let collection = FeatureCollection::new(vec![point_feature("a")]);
        let json = serde_json::to_string(&collection).unwrap();
        assert!(json.contains("\"type\":\"FeatureCollection\""));
        assert!(json.contains("\"type\":\"Feature\""));

        let back: FeatureCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, collection);
    }
}
