//! The adapter surface exposed to the external drawing engine.
//!
//! A [`DrawSurface`] is the boundary object the drawing-mode engine talks
//! to: coordinate conversion, cursor control, map drag locking, and the
//! render/clear entry points that drive the feature-to-drawable pipeline.
//! It owns the renderer binding, the drawable tracker, and the style book;
//! no external caller can reach those maps except through the entry points
//! here.

use log::{debug, warn};

use geodraw_core::{
    feature::ChangeBatch,
    geometry::{Position, ScreenPoint},
    identifier::FeatureId,
    style::StylePatch,
};

use crate::{
    config::SurfaceConfig,
    error::GeodrawError,
    renderer::{Cursor, Renderer},
    router,
    styles::StyleBook,
    tracker::DrawableTracker,
};

/// The callback set a drawing engine binds on registration.
///
/// Built with the `on_*` setters; every hook is optional.
///
/// # Examples
///
/// ```
/// use geodraw::EngineCallbacks;
///
/// let callbacks = EngineCallbacks::new().on_ready(|| println!("surface bound"));
/// ```
#[derive(Default)]
pub struct EngineCallbacks {
    on_ready: Option<Box<dyn FnMut()>>,
    on_clear: Option<Box<dyn FnMut()>>,
}

impl EngineCallbacks {
    /// Creates an empty callback set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hook invoked synchronously once the surface is bound.
    pub fn on_ready(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_ready = Some(Box::new(hook));
        self
    }

    /// Sets the hook invoked when the surface is cleared, before drawables
    /// are torn down.
    pub fn on_clear(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_clear = Some(Box::new(hook));
        self
    }
}

impl std::fmt::Debug for EngineCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCallbacks")
            .field("on_ready", &self.on_ready.is_some())
            .field("on_clear", &self.on_clear.is_some())
            .finish()
    }
}

/// The boundary object exposed to the external drawing engine.
///
/// State machine: unregistered → registered (on [`register`](Self::register))
/// → unregistered (on [`unregister`](Self::unregister)). Rendering while
/// unregistered is a caller error but not a failure mode; the batch is still
/// applied.
///
/// # Examples
///
/// ```
/// use geodraw::{DrawSurface, EngineCallbacks, config::SurfaceConfig};
/// use geodraw::export::svg::SvgRenderer;
///
/// let renderer = SvgRenderer::new(800.0, 600.0);
/// let mut surface = DrawSurface::new(renderer, SurfaceConfig::default());
/// surface.register(EngineCallbacks::new());
/// assert!(surface.is_registered());
/// ```
pub struct DrawSurface<R: Renderer> {
    renderer: R,
    tracker: DrawableTracker,
    styles: StyleBook,
    config: SurfaceConfig,
    callbacks: Option<EngineCallbacks>,
}

impl<R: Renderer> DrawSurface<R> {
    /// Creates a surface over a renderer binding.
    ///
    /// The global style starts from the configured initial style.
    pub fn new(renderer: R, config: SurfaceConfig) -> Self {
        Self {
            renderer,
            tracker: DrawableTracker::new(),
            styles: StyleBook::new(*config.style()),
            config,
            callbacks: None,
        }
    }

    /// Binds the engine's callback set.
    ///
    /// Invoked exactly once by the engine. If the engine supplied a ready
    /// hook it is invoked synchronously after binding. Registering an
    /// already-registered surface replaces the previous callback set with a
    /// warning.
    pub fn register(&mut self, callbacks: EngineCallbacks) {
        if self.callbacks.is_some() {
            warn!("Surface registered twice; replacing previous callbacks");
        }
        self.callbacks = Some(callbacks);
        debug!("Surface registered");

        if let Some(on_ready) = self
            .callbacks
            .as_mut()
            .and_then(|callbacks| callbacks.on_ready.as_mut())
        {
            on_ready();
        }
    }

    /// Unbinds the engine's callback set.
    pub fn unregister(&mut self) {
        if self.callbacks.take().is_none() {
            warn!("Surface unregistered while not registered");
        } else {
            debug!("Surface unregistered");
        }
    }

    /// Returns true while an engine callback set is bound.
    pub fn is_registered(&self) -> bool {
        self.callbacks.is_some()
    }

    /// Applies one change batch: upserts for `created` and `updated`, then
    /// deletions.
    ///
    /// # Errors
    ///
    /// Propagates renderer factory failures. Malformed features inside the
    /// batch are logged and skipped instead.
    pub fn render(&mut self, batch: &ChangeBatch) -> Result<(), GeodrawError> {
        router::apply(&mut self.renderer, &mut self.tracker, &mut self.styles, batch)?;
        Ok(())
    }

    /// Destroys every live drawable and resets the styling groups.
    ///
    /// The engine's clear hook runs first so it can tear down its own state
    /// before the drawables disappear. Safe to call when empty.
    pub fn clear(&mut self) {
        if let Some(on_clear) = self
            .callbacks
            .as_mut()
            .and_then(|callbacks| callbacks.on_clear.as_mut())
        {
            on_clear();
        }
        self.tracker.clear();
        self.styles.clear_groups();
    }

    /// Converts a geographic position to pixel coordinates in the map
    /// container.
    pub fn project(&self, position: Position) -> ScreenPoint {
        self.renderer.project(position)
    }

    /// Converts pixel coordinates in the map container to a geographic
    /// position.
    pub fn unproject(&self, point: ScreenPoint) -> Position {
        self.renderer.unproject(point)
    }

    /// Applies a cursor instruction to the map container.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.renderer.set_cursor(cursor);
    }

    /// Enables or disables the map's own drag gestures.
    pub fn set_draggability(&mut self, enabled: bool) {
        self.renderer.set_draggability(enabled);
    }

    /// Returns the decimal precision the engine uses when snapping and
    /// rounding coordinates.
    pub fn coordinate_precision(&self) -> u32 {
        self.config.coordinate_precision()
    }

    /// Returns the surface configuration.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Merges a partial style into the global style and propagates it to
    /// the initialized styling groups.
    pub fn update_style(&mut self, patch: &StylePatch) {
        self.styles.propagate(patch);
    }

    /// Returns the styling state.
    pub fn styles(&self) -> &StyleBook {
        &self.styles
    }

    /// Returns the renderer binding.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns true if the id has a live drawable.
    pub fn has_drawable(&self, id: FeatureId) -> bool {
        self.tracker.contains(id)
    }

    /// Returns the number of live drawables.
    pub fn drawable_count(&self) -> usize {
        self.tracker.len()
    }
}

impl<R: Renderer + std::fmt::Debug> std::fmt::Debug for DrawSurface<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawSurface")
            .field("renderer", &self.renderer)
            .field("live_drawables", &self.tracker.len())
            .field("registered", &self.is_registered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use geodraw_core::{feature::Feature, geometry::Geometry};

    use crate::export::svg::SvgRenderer;

    use super::*;

    fn surface() -> DrawSurface<SvgRenderer> {
        DrawSurface::new(SvgRenderer::new(800.0, 600.0), SurfaceConfig::default())
    }

    fn point(id: &str) -> Feature {
        Feature::new(
            id,
            Geometry::Point {
                coordinates: Position::new(0.0, 0.0),
            },
        )
    }

    #[test]
    fn test_register_invokes_ready_hook_synchronously() {
        let ready = Rc::new(Cell::new(false));
        let seen = Rc::clone(&ready);

        let mut surface = surface();
        surface.register(EngineCallbacks::new().on_ready(move || seen.set(true)));

        assert!(ready.get());
        assert!(surface.is_registered());
    }

    #[test]
    fn test_unregister_transitions_back() {
        let mut surface = surface();
        surface.register(EngineCallbacks::new());
        surface.unregister();
        assert!(!surface.is_registered());
    }

    #[test]
    fn test_clear_notifies_engine_before_teardown() {
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let hook_order = Rc::clone(&order);

        let mut surface = surface();
        surface.register(
            EngineCallbacks::new().on_clear(move || hook_order.borrow_mut().push("engine")),
        );

        let batch = ChangeBatch {
            created: vec![point("p1")],
            ..ChangeBatch::default()
        };
        surface.render(&batch).unwrap();

        surface.clear();
        order.borrow_mut().push("drawables-gone");

        assert_eq!(*order.borrow(), vec!["engine", "drawables-gone"]);
        assert_eq!(surface.drawable_count(), 0);
    }

    #[test]
    fn test_clear_then_empty_render_leaves_nothing() {
        let mut surface = surface();
        let batch = ChangeBatch {
            created: vec![point("p1"), point("p2")],
            ..ChangeBatch::default()
        };
        surface.render(&batch).unwrap();
        assert_eq!(surface.drawable_count(), 2);

        surface.clear();
        surface.render(&ChangeBatch::default()).unwrap();
        assert_eq!(surface.drawable_count(), 0);
    }
}
