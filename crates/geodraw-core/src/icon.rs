//! Point marker icon synthesis.
//!
//! Point features are rendered as icon markers whose icon is a small vector
//! graphic generated on the fly from the effective style: an outlined circle
//! for round caps, an outlined square for square caps, or a bare dot when no
//! cap is requested. The icon is emitted as a base64 `data:image/svg+xml`
//! URL, which is what map renderers accept as a marker image source.
//!
//! # Examples
//!
//! ```
//! use geodraw_core::color::Color;
//! use geodraw_core::icon::marker_icon;
//! use geodraw_core::style::PointCap;
//!
//! let outline = Color::new("#3388ff").unwrap();
//! let fill = Color::new("#3388ff33").unwrap();
//! let url = marker_icon(PointCap::Round, outline, fill);
//! assert!(url.starts_with("data:image/svg+xml;base64,"));
//! ```

use base64::{Engine as _, engine::general_purpose::STANDARD};
use svg::{
    Document,
    node::element::{Circle, Rectangle},
};

use crate::{color::Color, style::PointCap};

/// Rendered box of a marker icon, in pixels.
pub const ICON_SIZE: f64 = 16.0;

/// Marker anchor offset from the icon's top-left corner, in pixels.
///
/// Centered, so the icon sits exactly on the feature's position.
pub const ICON_ANCHOR: f64 = ICON_SIZE / 2.0;

// Icon vector space. The icon is drawn on a 7x7 viewBox and scaled up to
// ICON_SIZE by the renderer, matching the crisp small-dot look of the
// drawing surface.
const VIEW_BOX: f64 = 7.0;
const CENTER: f64 = VIEW_BOX / 2.0;
const CAP_RADIUS: f64 = 2.5;
const DOT_RADIUS: f64 = 1.5;
const CAP_STROKE_WIDTH: f64 = 1.2;

/// Synthesizes the marker icon for a point feature as a base64 SVG data URL.
///
/// The `cap` selects the icon shape; `outline` and `fill` come from the
/// feature's effective style. Midpoint markers pass a neutral fill instead
/// of the feature fill so they remain visually distinct from vertex and
/// selection points.
pub fn marker_icon(cap: PointCap, outline: Color, fill: Color) -> String {
    let document = Document::new()
        .set("width", VIEW_BOX)
        .set("height", VIEW_BOX)
        .set("viewBox", format!("0 0 {VIEW_BOX} {VIEW_BOX}"))
        .set("fill", "none");

    let document = match cap {
        PointCap::Round => document.add(
            Circle::new()
                .set("cx", CENTER)
                .set("cy", CENTER)
                .set("r", CAP_RADIUS)
                .set("fill", &fill)
                .set("stroke", &outline)
                .set("stroke-width", CAP_STROKE_WIDTH),
        ),
        PointCap::Square => document.add(
            Rectangle::new()
                .set("x", CENTER - CAP_RADIUS)
                .set("y", CENTER - CAP_RADIUS)
                .set("width", CAP_RADIUS * 2.0)
                .set("height", CAP_RADIUS * 2.0)
                .set("fill", &fill)
                .set("stroke", &outline)
                .set("stroke-width", CAP_STROKE_WIDTH),
        ),
        PointCap::None => document.add(
            Circle::new()
                .set("cx", CENTER)
                .set("cy", CENTER)
                .set("r", DOT_RADIUS)
                .set("fill", &outline),
        ),
    };

    format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(document.to_string())
    )
}
