//! A headless SVG renderer backend.
//!
//! [`SvgRenderer`] implements the [`Renderer`] contract without a map: it
//! keeps the live primitives in an in-memory scene and can emit them as an
//! SVG document at any point. It backs the replay CLI and the test suite,
//! where it doubles as an observable fake for the drawable lifecycle.
//!
//! Geographic positions are mapped to pixels with a plain linear fit of the
//! configured bounds onto the canvas. That is deliberately not a map
//! projection; real projection math belongs to the map renderer this
//! backend stands in for.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use svg::{
    Document,
    node::element::{Image, Path, Polyline as SvgPolyline, path::Data},
};

use geodraw_core::geometry::{Position, ScreenPoint};

use crate::renderer::{Cursor, Drawable, Primitive, Renderer, RendererError};

/// The live scene: primitives keyed by construction order.
#[derive(Debug, Default)]
struct Scene {
    next_serial: u64,
    items: BTreeMap<u64, Primitive>,
    created: usize,
    destroyed: usize,
}

/// A handle into the scene; destruction removes the primitive.
#[derive(Debug)]
struct SvgDrawable {
    serial: u64,
    scene: Rc<RefCell<Scene>>,
    destroyed: bool,
}

impl Drawable for SvgDrawable {
    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        let mut scene = self.scene.borrow_mut();
        scene.items.remove(&self.serial);
        scene.destroyed += 1;
    }
}

/// A headless renderer that accumulates the live scene and emits SVG.
///
/// # Examples
///
/// ```
/// use geodraw::export::svg::SvgRenderer;
/// use geodraw::renderer::Renderer;
/// use geodraw_core::geometry::Position;
///
/// let renderer = SvgRenderer::new(800.0, 600.0);
/// let center = renderer.project(Position::new(0.0, 0.0));
/// assert_eq!((center.x(), center.y()), (400.0, 300.0));
/// ```
#[derive(Debug)]
pub struct SvgRenderer {
    scene: Rc<RefCell<Scene>>,
    width: f64,
    height: f64,
    min: Position,
    max: Position,
    cursor: Option<String>,
    draggable: bool,
}

impl SvgRenderer {
    /// Creates a renderer with the given canvas size in pixels, covering
    /// the whole world (longitude -180..180, latitude -90..90).
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_bounds(
            width,
            height,
            Position::new(-180.0, -90.0),
            Position::new(180.0, 90.0),
        )
    }

    /// Creates a renderer whose canvas linearly covers the given
    /// geographic bounds.
    pub fn with_bounds(width: f64, height: f64, min: Position, max: Position) -> Self {
        Self {
            scene: Rc::new(RefCell::new(Scene::default())),
            width,
            height,
            min,
            max,
            cursor: None,
            draggable: true,
        }
    }

    /// Returns the number of live primitives in the scene.
    pub fn live_count(&self) -> usize {
        self.scene.borrow().items.len()
    }

    /// Returns the total number of primitives constructed so far.
    pub fn created_total(&self) -> usize {
        self.scene.borrow().created
    }

    /// Returns the total number of primitives destroyed so far.
    pub fn destroyed_total(&self) -> usize {
        self.scene.borrow().destroyed
    }

    /// Returns the current inline cursor override, if one is applied.
    pub fn cursor(&self) -> Option<String> {
        self.cursor.clone()
    }

    /// Returns true while the map's own drag gestures are enabled.
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Emits the live scene as an SVG document, primitives in construction
    /// order (oldest at the bottom).
    pub fn to_document(&self) -> Document {
        let mut document = Document::new()
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", format!("0 0 {} {}", self.width, self.height));

        for primitive in self.scene.borrow().items.values() {
            match primitive {
                Primitive::Polygon {
                    rings,
                    fill_color,
                    outline_color,
                    outline_width,
                } => {
                    let mut data = Data::new();
                    for ring in rings {
                        let mut positions = ring.iter();
                        if let Some(first) = positions.next() {
                            let start = self.project(*first);
                            data = data.move_to((start.x(), start.y()));
                            for position in positions {
                                let px = self.project(*position);
                                data = data.line_to((px.x(), px.y()));
                            }
                            data = data.close();
                        }
                    }
                    document = document.add(
                        Path::new()
                            .set("d", data)
                            .set("fill", fill_color)
                            .set("fill-rule", "evenodd")
                            .set("stroke", outline_color)
                            .set("stroke-width", *outline_width),
                    );
                }
                Primitive::Polyline { path, color, width } => {
                    let points: Vec<String> = path
                        .iter()
                        .map(|position| {
                            let px = self.project(*position);
                            format!("{},{}", px.x(), px.y())
                        })
                        .collect();
                    document = document.add(
                        SvgPolyline::new()
                            .set("points", points.join(" "))
                            .set("fill", "none")
                            .set("stroke", color)
                            .set("stroke-width", *width)
                            .set("stroke-linejoin", "round"),
                    );
                }
                Primitive::Marker {
                    at,
                    icon,
                    size,
                    anchor,
                } => {
                    let px = self.project(*at);
                    document = document.add(
                        Image::new()
                            .set("x", px.x() - anchor[0])
                            .set("y", px.y() - anchor[1])
                            .set("width", size[0])
                            .set("height", size[1])
                            .set("href", icon.as_str()),
                    );
                }
            }
        }

        document
    }

    /// Emits the live scene as an SVG string.
    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }
}

impl Renderer for SvgRenderer {
    fn create(&mut self, primitive: Primitive) -> Result<Box<dyn Drawable>, RendererError> {
        match &primitive {
            Primitive::Polygon { rings, .. } if rings.is_empty() => {
                return Err(RendererError::new("polygon", "polygon has no rings"));
            }
            Primitive::Polyline { path, .. } if path.len() < 2 => {
                return Err(RendererError::new(
                    "polyline",
                    "polyline needs at least two positions",
                ));
            }
            _ => {}
        }

        let mut scene = self.scene.borrow_mut();
        let serial = scene.next_serial;
        scene.next_serial += 1;
        scene.items.insert(serial, primitive);
        scene.created += 1;

        Ok(Box::new(SvgDrawable {
            serial,
            scene: Rc::clone(&self.scene),
            destroyed: false,
        }))
    }

    fn project(&self, position: Position) -> ScreenPoint {
        let x = (position.lng() - self.min.lng()) / (self.max.lng() - self.min.lng()) * self.width;
        let y = (self.max.lat() - position.lat()) / (self.max.lat() - self.min.lat()) * self.height;
        ScreenPoint::new(x, y)
    }

    fn unproject(&self, point: ScreenPoint) -> Position {
        let lng = self.min.lng() + point.x() / self.width * (self.max.lng() - self.min.lng());
        let lat = self.max.lat() - point.y() / self.height * (self.max.lat() - self.min.lat());
        Position::new(lng, lat)
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        match cursor {
            Cursor::Unset => self.cursor = None,
            Cursor::Keyword(keyword) => self.cursor = Some(keyword),
        }
    }

    fn set_draggability(&mut self, enabled: bool) {
        self.draggable = enabled;
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use geodraw_core::color::Color;

    use super::*;

    fn blue() -> Color {
        Color::new("#3388ff").unwrap()
    }

    #[test]
    fn test_project_unproject_round_trip() {
        let renderer = SvgRenderer::new(800.0, 600.0);
        let position = Position::new(55.31878, 25.23584);

        let px = renderer.project(position);
        let back = renderer.unproject(px);

        assert_approx_eq!(f64, back.lng(), position.lng(), epsilon = 1e-9);
        assert_approx_eq!(f64, back.lat(), position.lat(), epsilon = 1e-9);
    }

    #[test]
    fn test_destroy_removes_from_scene() {
        let mut renderer = SvgRenderer::new(100.0, 100.0);
        let mut handle = renderer
            .create(Primitive::Marker {
                at: Position::new(0.0, 0.0),
                icon: String::new(),
                size: [16.0, 16.0],
                anchor: [8.0, 8.0],
            })
            .unwrap();

        assert_eq!(renderer.live_count(), 1);
        handle.destroy();
        assert_eq!(renderer.live_count(), 0);

        // A second destroy must not double-count
        handle.destroy();
        assert_eq!(renderer.destroyed_total(), 1);
    }

    #[test]
    fn test_degenerate_primitives_are_rejected() {
        let mut renderer = SvgRenderer::new(100.0, 100.0);

        let empty_polygon = Primitive::Polygon {
            rings: vec![],
            fill_color: blue(),
            outline_color: blue(),
            outline_width: 1.0,
        };
        assert!(renderer.create(empty_polygon).is_err());

        let short_line = Primitive::Polyline {
            path: vec![Position::new(0.0, 0.0)],
            color: blue(),
            width: 1.0,
        };
        assert!(renderer.create(short_line).is_err());
    }

    #[test]
    fn test_document_contains_live_primitives() {
        let mut renderer = SvgRenderer::new(100.0, 100.0);
        let _polygon = renderer
            .create(Primitive::Polygon {
                rings: vec![vec![
                    Position::new(0.0, 0.0),
                    Position::new(10.0, 0.0),
                    Position::new(10.0, 10.0),
                    Position::new(0.0, 0.0),
                ]],
                fill_color: Color::new("#3388ff33").unwrap(),
                outline_color: blue(),
                outline_width: 3.0,
            })
            .unwrap();
        let _line = renderer
            .create(Primitive::Polyline {
                path: vec![Position::new(0.0, 0.0), Position::new(5.0, 5.0)],
                color: blue(),
                width: 3.0,
            })
            .unwrap();

        let svg = renderer.to_svg_string();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<path"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_cursor_unset_removes_override() {
        let mut renderer = SvgRenderer::new(100.0, 100.0);
        renderer.set_cursor(Cursor::Keyword("crosshair".to_string()));
        assert_eq!(renderer.cursor().as_deref(), Some("crosshair"));

        renderer.set_cursor(Cursor::Unset);
        assert_eq!(renderer.cursor(), None);
    }
}
