//! Change batch routing: classification, styling, and dispatch.
//!
//! One [`apply`] call turns a [`ChangeBatch`] into drawable lifecycle
//! operations. Created and updated features go through the identical upsert
//! path (the engine makes no behavioral distinction between them), and all
//! upserts are applied before any deletions, so a batch always lands as one
//! coherent final state.

use log::{debug, warn};

use geodraw_core::{
    feature::{Feature, FeatureRole},
    geometry::Geometry,
    icon::{self, marker_icon},
    style::Style,
};

use crate::{
    renderer::{Primitive, Renderer, RendererError},
    styles::StyleBook,
    tracker::DrawableTracker,
};

/// Marker fill used for midpoint markers instead of the feature fill, so
/// midpoints stay visually distinct from vertex and selection points.
const MIDPOINT_FILL: &str = "#ffffff";

/// Applies one change batch to the drawable tracker.
///
/// Features in `created` then `updated` are upserted; ids in `deleted_ids`
/// are then removed, and their styling-group entries dropped so a reused id
/// cannot resurrect a stale style. A feature without an id or with an
/// unsupported geometry is skipped without aborting the rest of the batch.
///
/// # Errors
///
/// Propagates renderer factory failures; those have no retry policy.
pub(crate) fn apply<R: Renderer>(
    renderer: &mut R,
    tracker: &mut DrawableTracker,
    styles: &mut StyleBook,
    batch: &geodraw_core::feature::ChangeBatch,
) -> Result<(), RendererError> {
    for feature in batch.created.iter().chain(batch.updated.iter()) {
        upsert_feature(renderer, tracker, styles, feature)?;
    }

    for &id in &batch.deleted_ids {
        tracker.remove(id);
        styles.forget(id);
    }

    debug!(
        upserted = batch.created.len() + batch.updated.len(),
        deleted = batch.deleted_ids.len(),
        live = tracker.len();
        "Applied change batch"
    );
    Ok(())
}

fn upsert_feature<R: Renderer>(
    renderer: &mut R,
    tracker: &mut DrawableTracker,
    styles: &mut StyleBook,
    feature: &Feature,
) -> Result<(), RendererError> {
    let Some(id) = feature.id() else {
        warn!("Refusing attempt to process a feature without id");
        return Ok(());
    };

    // styling_id is Some whenever id is: sub-features carry a parent id and
    // plain features fall back to their own.
    let styling_id = feature.styling_id().unwrap_or(id);
    let group_style = styles.resolve(styling_id);

    // Explicit per-feature properties win over the group style. A committed
    // feature carrying its own `color` keeps it across renders; one without
    // is stamped from the current group style every time.
    let effective = feature.style_overrides().merge(&group_style);

    let Some(primitive) = build_primitive(feature, &effective) else {
        debug!(
            id = id.to_string(),
            geometry = feature.geometry().type_name();
            "Skipping feature with unsupported geometry"
        );
        return Ok(());
    };

    tracker.upsert(renderer, id, primitive)
}

/// Builds the drawable description for a feature, or `None` for geometry
/// types geodraw does not render.
fn build_primitive(feature: &Feature, style: &Style) -> Option<Primitive> {
    match feature.geometry() {
        Geometry::Polygon { coordinates } => Some(Primitive::Polygon {
            rings: coordinates.clone(),
            fill_color: style.fill_color(),
            outline_color: style.outline_color(),
            outline_width: style.outline_width(),
        }),
        Geometry::LineString { coordinates } => Some(Primitive::Polyline {
            path: coordinates.clone(),
            color: style.outline_color(),
            width: style.outline_width(),
        }),
        Geometry::Point { coordinates } => {
            let fill = match feature.role() {
                FeatureRole::Midpoint { .. } => geodraw_core::color::Color::new(MIDPOINT_FILL)
                    .expect("midpoint fill is a valid CSS color"),
                _ => style.fill_color(),
            };
            Some(Primitive::Marker {
                at: *coordinates,
                icon: marker_icon(style.point_cap(), style.outline_color(), fill),
                size: [icon::ICON_SIZE, icon::ICON_SIZE],
                anchor: [icon::ICON_ANCHOR, icon::ICON_ANCHOR],
            })
        }
        Geometry::Unsupported => None,
    }
}
