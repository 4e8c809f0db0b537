//! The renderer boundary: drawable construction and map surface control.
//!
//! This module defines the contract any map renderer binding must implement
//! for geodraw to drive it. The engine never talks to a concrete renderer
//! type; it goes through [`Renderer`], a factory and ownership service for
//! [`Drawable`] handles, plus the handful of surface controls the drawing
//! engine needs (pixel/geographic conversion, cursor, drag locking).
//!
//! # Overview
//!
//! - [`Primitive`]: A description of one drawable to construct
//! - [`Drawable`]: A live renderer-owned handle with an explicit `destroy`
//! - [`Renderer`]: The factory/surface contract
//! - [`Cursor`]: CSS cursor keyword or the unset sentinel
//! - [`RendererError`]: Drawable construction failure
//!
//! # Ownership
//!
//! A [`Drawable`] represents a native renderer resource. Dropping the box
//! does not release the resource; the lifecycle tracker always calls
//! [`Drawable::destroy`] before letting a handle go, and `destroy` must be
//! idempotent.

use std::fmt;

use thiserror::Error;

use geodraw_core::{
    color::Color,
    geometry::{Position, ScreenPoint},
};

/// A description of one drawable to construct.
///
/// The three primitive kinds mirror the geometry types the drawing engine
/// produces: filled polygons, stroked polylines, and icon markers.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// A filled, outlined polygon
    Polygon {
        /// Polygon rings; the first ring is the outer boundary
        rings: Vec<Vec<Position>>,
        /// Interior fill color
        fill_color: Color,
        /// Outline stroke color
        outline_color: Color,
        /// Outline stroke width in pixels
        outline_width: f32,
    },
    /// A stroked open path
    Polyline {
        /// Path positions in drawing order
        path: Vec<Position>,
        /// Stroke color
        color: Color,
        /// Stroke width in pixels
        width: f32,
    },
    /// An icon marker anchored at one position
    Marker {
        /// The marker position
        at: Position,
        /// Icon image source, a `data:image/svg+xml` URL
        icon: String,
        /// Rendered icon box in pixels, `[width, height]`
        size: [f64; 2],
        /// Anchor offset from the icon's top-left corner in pixels
        anchor: [f64; 2],
    },
}

impl Primitive {
    /// Returns a short name for the primitive kind, used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Polygon { .. } => "polygon",
            Self::Polyline { .. } => "polyline",
            Self::Marker { .. } => "marker",
        }
    }
}

/// A live renderer-owned drawable handle.
pub trait Drawable: fmt::Debug {
    /// Releases the native renderer resource behind this handle.
    ///
    /// Must be safe to call more than once; calls after the first are
    /// no-ops.
    fn destroy(&mut self);
}

/// A cursor instruction for the map container.
///
/// The unset sentinel removes a previously applied inline cursor override
/// rather than setting a value, restoring whatever the map's stylesheet
/// provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Remove the inline cursor override
    Unset,
    /// Any CSS cursor keyword, e.g. `"crosshair"` or `"move"`
    Keyword(String),
}

impl Cursor {
    /// Creates a cursor from a CSS keyword, mapping `"unset"` to the
    /// sentinel.
    pub fn from_css(keyword: &str) -> Self {
        if keyword == "unset" {
            Self::Unset
        } else {
            Self::Keyword(keyword.to_string())
        }
    }
}

/// Drawable construction failure.
///
/// Construction errors are not expected during normal operation and no
/// retry policy applies; they propagate to the render caller.
#[derive(Debug, Error)]
#[error("failed to construct {kind} drawable: {reason}")]
pub struct RendererError {
    kind: &'static str,
    reason: String,
}

impl RendererError {
    /// Creates a construction error for the given primitive kind.
    pub fn new(kind: &'static str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// The contract a map renderer binding implements.
///
/// All calls are synchronous and non-reentrant: a renderer must not invoke
/// back into the engine from inside `create` or a drawable's `destroy`.
pub trait Renderer {
    /// Constructs a native drawable for the given primitive.
    ///
    /// # Errors
    ///
    /// Returns [`RendererError`] if the underlying renderer cannot
    /// construct the primitive.
    fn create(&mut self, primitive: Primitive) -> Result<Box<dyn Drawable>, RendererError>;

    /// Converts a geographic position to pixel coordinates in the map
    /// container.
    fn project(&self, position: Position) -> ScreenPoint;

    /// Converts pixel coordinates in the map container to a geographic
    /// position.
    fn unproject(&self, point: ScreenPoint) -> Position;

    /// Applies a cursor instruction to the map container.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Enables or disables the map's own drag gestures.
    ///
    /// The drawing engine suspends map panning while a shape is being
    /// dragged.
    fn set_draggability(&mut self, enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_from_css() {
        assert_eq!(Cursor::from_css("unset"), Cursor::Unset);
        assert_eq!(
            Cursor::from_css("crosshair"),
            Cursor::Keyword("crosshair".to_string())
        );
    }

    #[test]
    fn test_primitive_kind_names() {
        let marker = Primitive::Marker {
            at: Position::new(0.0, 0.0),
            icon: String::new(),
            size: [16.0, 16.0],
            anchor: [8.0, 8.0],
        };
        assert_eq!(marker.kind(), "marker");
    }

    #[test]
    fn test_renderer_error_message() {
        let err = RendererError::new("polygon", "out of texture memory");
        assert_eq!(
            err.to_string(),
            "failed to construct polygon drawable: out of texture memory"
        );
    }
}
