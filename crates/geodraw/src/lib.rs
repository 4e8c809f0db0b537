//! Geodraw - feature synchronization and styling for map drawing surfaces.
//!
//! Mirrors a stream of GeoJSON feature changes onto renderer-owned drawables,
//! resolving each feature's visual style from a global style, per-feature
//! style groups, and per-feature property overrides. A closed command set
//! carries UI intents, and a headless SVG renderer serves rendering without
//! a map display.

pub mod command;
pub mod config;
pub mod export;
pub mod renderer;

mod error;
mod router;
mod styles;
mod surface;
mod tracker;

pub use geodraw_core::{color, feature, geometry, icon, identifier, style};

pub use error::GeodrawError;
pub use styles::StyleBook;
pub use surface::{DrawSurface, EngineCallbacks};
pub use tracker::DrawableTracker;
