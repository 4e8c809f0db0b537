//! The UI command layer.
//!
//! User intents reach the core as a closed set of [`Command`] variants
//! rather than ad hoc DOM callbacks. Commands are applied in arrival order,
//! synchronously, before the next render batch is processed: a command
//! either mutates the style context on the surface or calls through to the
//! external drawing engine via the [`Engine`] boundary trait.
//!
//! # Double-click debounce
//!
//! Finishing a shape with a double click would immediately start a new one
//! on the second click. The [`CommandProcessor`] reproduces the drawing
//! surface's workaround: on finish it switches the engine to the inert mode
//! at once and restores the prior mode after a fixed delay. There are no
//! timers in the core; the restore is an explicit deadline the caller polls
//! with its own clock via [`CommandProcessor::poll_restore`].

use std::{
    str::FromStr,
    time::{Duration, Instant},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use geodraw_core::{
    color::Color,
    feature::FeatureCollection,
    identifier::FeatureId,
    style::{PointCap, StylePatch},
};

use crate::{
    error::GeodrawError,
    export::{self, SNAPSHOT_FILE_NAME},
    renderer::Renderer,
    surface::DrawSurface,
};

/// A drawing mode of the external engine.
///
/// The first ten variants map to the drawing controls; [`Mode::Static`] is
/// the idle mode and [`Mode::Inert`] is the display-only mode used as the
/// double-click debounce detour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Select and edit existing features
    Select,
    /// Place point features
    Point,
    /// Draw open paths
    Linestring,
    /// Draw polygons vertex by vertex
    Polygon,
    /// Sketch polygons freehand
    Freehand,
    /// Draw circles
    Circle,
    /// Draw axis-aligned rectangles
    Rectangle,
    /// Draw rotated rectangles
    AngledRectangle,
    /// Draw circle sectors
    Sector,
    /// Draw sensor arcs
    Sensor,
    /// Idle; pointer events do nothing
    #[default]
    Static,
    /// Display-only; features render but cannot be started
    Inert,
}

impl Mode {
    /// Returns the canonical string value for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Point => "point",
            Self::Linestring => "linestring",
            Self::Polygon => "polygon",
            Self::Freehand => "freehand",
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
            Self::AngledRectangle => "angled-rectangle",
            Self::Sector => "sector",
            Self::Sensor => "sensor",
            Self::Static => "static",
            Self::Inert => "inert",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Self::Select),
            "point" => Ok(Self::Point),
            "linestring" => Ok(Self::Linestring),
            "polygon" => Ok(Self::Polygon),
            "freehand" => Ok(Self::Freehand),
            "circle" => Ok(Self::Circle),
            "rectangle" => Ok(Self::Rectangle),
            "angled-rectangle" => Ok(Self::AngledRectangle),
            "sector" => Ok(Self::Sector),
            "sensor" => Ok(Self::Sensor),
            "static" => Ok(Self::Static),
            "inert" => Ok(Self::Inert),
            _ => Err(format!("invalid mode `{s}`")),
        }
    }
}

/// The boundary to the external drawing-mode engine.
///
/// The engine owns geometry creation and editing rules; the command layer
/// only switches its mode, asks it to drop features, and reads its feature
/// snapshot.
pub trait Engine {
    /// Switches the engine's active drawing mode.
    fn set_mode(&mut self, mode: Mode);

    /// Clears the engine's feature store.
    fn clear(&mut self);

    /// Removes the given features from the engine's store.
    fn remove_features(&mut self, ids: &[FeatureId]);

    /// Returns a snapshot of the engine's current features.
    fn snapshot(&self) -> FeatureCollection;
}

/// A discrete user intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Command {
    /// Switch the active drawing mode
    SetMode {
        /// The mode to activate
        mode: Mode,
    },
    /// Pick a new drawing color; the fill is derived as the translucent
    /// variant of the picked outline color
    SetColor {
        /// The picked outline color
        color: Color,
    },
    /// Change the stroke width
    SetStrokeWidth {
        /// The new outline width in pixels
        width: f32,
    },
    /// Change the point cap shape
    SetPointCap {
        /// The new point cap
        cap: PointCap,
    },
    /// Delete the selected feature, or everything when nothing is selected
    Clear,
    /// Serialize the current feature snapshot for download
    Download,
}

/// A file produced by the download command.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    /// Suggested file name
    pub file_name: String,
    /// Pretty-printed GeoJSON contents
    pub contents: String,
}

/// A scheduled return to the mode that was active before a finish.
#[derive(Debug, Clone, Copy)]
struct PendingRestore {
    prior: Mode,
    deadline: Instant,
}

/// Applies commands against the engine and the drawing surface.
///
/// Also tracks the two bits of UI state the commands depend on: the active
/// mode and the currently selected feature.
#[derive(Debug)]
pub struct CommandProcessor {
    mode: Mode,
    selected: Option<FeatureId>,
    pending_restore: Option<PendingRestore>,
    restore_delay: Duration,
}

impl CommandProcessor {
    /// Creates a processor in the idle mode with the given finish-restore
    /// delay.
    pub fn new(restore_delay: Duration) -> Self {
        Self {
            mode: Mode::Static,
            selected: None,
            pending_restore: None,
            restore_delay,
        }
    }

    /// Returns the active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the selected feature, if any.
    pub fn selected(&self) -> Option<FeatureId> {
        self.selected
    }

    /// Applies one command, in arrival order and synchronously.
    ///
    /// Returns the file to write when the command was [`Command::Download`].
    ///
    /// # Errors
    ///
    /// Returns [`GeodrawError::Export`] if the download snapshot cannot be
    /// serialized.
    pub fn apply<E: Engine, R: Renderer>(
        &mut self,
        command: Command,
        engine: &mut E,
        surface: &mut DrawSurface<R>,
    ) -> Result<Option<Download>, GeodrawError> {
        debug!(command:? = command; "Applying command");
        match command {
            Command::SetMode { mode } => {
                // An explicit mode choice overrides a scheduled restore
                self.pending_restore = None;
                self.mode = mode;
                engine.set_mode(mode);
            }
            Command::SetColor { color } => {
                surface.update_style(
                    &StylePatch::default()
                        .with_outline_color(color)
                        .with_fill_color(color.to_fill()),
                );
            }
            Command::SetStrokeWidth { width } => {
                surface.update_style(&StylePatch::default().with_outline_width(width));
            }
            Command::SetPointCap { cap } => {
                surface.update_style(&StylePatch::default().with_point_cap(cap));
            }
            Command::Clear => {
                if let Some(id) = self.selected.take() {
                    engine.remove_features(&[id]);
                } else {
                    engine.clear();
                    surface.clear();
                }
            }
            Command::Download => {
                let snapshot = engine.snapshot();
                let contents = export::snapshot_json(&snapshot)?;
                info!(features = snapshot.features.len(); "Snapshot serialized for download");
                return Ok(Some(Download {
                    file_name: SNAPSHOT_FILE_NAME.to_string(),
                    contents,
                }));
            }
        }
        Ok(None)
    }

    /// Records that the engine selected a feature.
    pub fn notify_select(&mut self, id: FeatureId) {
        self.selected = Some(id);
    }

    /// Records that the engine dropped its selection.
    pub fn notify_deselect(&mut self) {
        self.selected = None;
    }

    /// Records that a shape was finished at `now`.
    ///
    /// Switches the engine to the inert mode immediately and schedules the
    /// restoration of the prior mode, so the second click of a double click
    /// cannot start a new shape.
    pub fn notify_finish<E: Engine>(&mut self, engine: &mut E, now: Instant) {
        if self.mode == Mode::Inert {
            return;
        }
        let prior = self.mode;
        self.mode = Mode::Inert;
        engine.set_mode(Mode::Inert);
        self.pending_restore = Some(PendingRestore {
            prior,
            deadline: now + self.restore_delay,
        });
        debug!(prior = prior.as_str(); "Finish debounce engaged");
    }

    /// Restores the prior mode if its deadline has passed.
    ///
    /// Returns true when a restoration happened.
    pub fn poll_restore<E: Engine>(&mut self, engine: &mut E, now: Instant) -> bool {
        let Some(pending) = self.pending_restore else {
            return false;
        };
        if now < pending.deadline {
            return false;
        }
        self.pending_restore = None;
        self.mode = pending.prior;
        engine.set_mode(pending.prior);
        debug!(mode = pending.prior.as_str(); "Prior mode restored");
        true
    }
}

impl Default for CommandProcessor {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}
