//! Configuration types for drawing surfaces.
//!
//! This module provides the configuration structure that controls how a
//! [`DrawSurface`](crate::DrawSurface) behaves. All fields have defaults
//! and implement [`serde::Deserialize`] for flexible loading from external
//! sources.
//!
//! # Example
//!
//! ```
//! # use geodraw::config::SurfaceConfig;
//! let config = SurfaceConfig::default();
//! assert_eq!(config.coordinate_precision(), 9);
//! assert_eq!(config.finish_restore_delay().as_millis(), 500);
//! ```

use std::time::Duration;

use serde::Deserialize;

use geodraw_core::style::Style;

const DEFAULT_COORDINATE_PRECISION: u32 = 9;
const DEFAULT_FINISH_RESTORE_MS: u64 = 500;

/// Configuration for one drawing surface.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Decimal precision the engine uses when snapping and rounding
    /// coordinates.
    coordinate_precision: u32,

    /// The initial global [`Style`].
    style: Style,

    /// Delay before the prior drawing mode is restored after a finish, in
    /// milliseconds. The inert-mode detour over this window is what keeps
    /// the second click of a double click from starting a new shape.
    finish_restore_ms: u64,
}

impl SurfaceConfig {
    /// Creates a configuration with the given precision, initial style, and
    /// finish-restore delay.
    pub fn new(coordinate_precision: u32, style: Style, finish_restore: Duration) -> Self {
        Self {
            coordinate_precision,
            style,
            finish_restore_ms: finish_restore.as_millis() as u64,
        }
    }

    /// Returns the configured coordinate precision.
    pub fn coordinate_precision(&self) -> u32 {
        self.coordinate_precision
    }

    /// Returns the initial global style.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Returns the delay before the prior mode is restored after a finish.
    pub fn finish_restore_delay(&self) -> Duration {
        Duration::from_millis(self.finish_restore_ms)
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            coordinate_precision: DEFAULT_COORDINATE_PRECISION,
            style: Style::default(),
            finish_restore_ms: DEFAULT_FINISH_RESTORE_MS,
        }
    }
}
