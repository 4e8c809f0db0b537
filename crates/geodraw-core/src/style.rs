//! Visual style definitions for rendered features.
//!
//! This module provides the style value types shared by the styling engine:
//!
//! - [`Style`]: The complete style applied to a drawable (fill, outline, point cap)
//! - [`PointCap`]: Enum defining the marker icon shape for point features
//! - [`StylePatch`]: A partial style whose set fields override a base style
//!
//! # Style Precedence
//!
//! A drawable's effective style is layered: the global default style, then
//! the per-styling-group copy taken from it on first sight, then any explicit
//! per-feature property overrides. [`StylePatch::merge`] implements the
//! field-wise override step used for the global style updates.
//!
//! # Examples
//!
//! ```
//! use geodraw_core::color::Color;
//! use geodraw_core::style::{PointCap, Style, StylePatch};
//!
//! let base = Style::default();
//! assert_eq!(base.outline_color().to_hex_string(), "#3388ff");
//!
//! // Only set fields overwrite
//! let patch = StylePatch::default().with_outline_width(5.0);
//! let merged = patch.merge(&base);
//! assert_eq!(merged.outline_width(), 5.0);
//! assert_eq!(merged.point_cap(), PointCap::Round);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Defines the icon shape used for point feature markers.
///
/// Maps onto the marker icon synthesized by [`crate::icon`]: an outlined
/// circle, an outlined square, or a bare dot with no cap outline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointCap {
    /// Bare dot without a cap outline
    None,
    /// Outlined circular cap (default)
    #[default]
    Round,
    /// Outlined square cap
    Square,
}

impl PointCap {
    /// Returns the canonical string value for this cap
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl FromStr for PointCap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            _ => Err(format!(
                "invalid point cap `{s}`, valid values: none, round, square"
            )),
        }
    }
}

/// The complete visual style applied to a drawable.
///
/// Two instances matter to the engine: the mutable global style, and the
/// per-styling-group copies lazily taken from it. Copies are independent, so
/// a later global change does not retroactively restyle groups that were
/// already initialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    fill_color: Color,
    outline_color: Color,
    outline_width: f32,
    point_cap: PointCap,
}

impl Style {
    /// Creates a style with every field given explicitly
    pub fn new(
        fill_color: Color,
        outline_color: Color,
        outline_width: f32,
        point_cap: PointCap,
    ) -> Self {
        Self {
            fill_color,
            outline_color,
            outline_width,
            point_cap,
        }
    }

    /// Returns the fill color
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Returns the outline color
    pub fn outline_color(&self) -> Color {
        self.outline_color
    }

    /// Returns the outline width in pixels
    pub fn outline_width(&self) -> f32 {
        self.outline_width
    }

    /// Returns the point cap
    pub fn point_cap(&self) -> PointCap {
        self.point_cap
    }

    /// Sets the fill color
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    /// Sets the outline color
    pub fn set_outline_color(&mut self, color: Color) {
        self.outline_color = color;
    }

    /// Sets the outline width in pixels
    pub fn set_outline_width(&mut self, width: f32) {
        self.outline_width = width;
    }

    /// Sets the point cap
    pub fn set_point_cap(&mut self, cap: PointCap) {
        self.point_cap = cap;
    }
}

impl Default for Style {
    /// The drawing-surface default: translucent blue fill over a `#3388ff`
    /// outline, 3px wide, round point caps.
    fn default() -> Self {
        Self {
            fill_color: Color::new("#3388ff33").expect("'#3388ff33' is a valid CSS color"),
            outline_color: Color::new("#3388ff").expect("'#3388ff' is a valid CSS color"),
            outline_width: 3.0,
            point_cap: PointCap::Round,
        }
    }
}

/// A partial style whose set fields override a base [`Style`].
///
/// Used for the merge-update commands against the global style and for
/// per-feature property overrides.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePatch {
    /// Fill color override, if set
    pub fill_color: Option<Color>,
    /// Outline color override, if set
    pub outline_color: Option<Color>,
    /// Outline width override, if set
    pub outline_width: Option<f32>,
    /// Point cap override, if set
    pub point_cap: Option<PointCap>,
}

impl StylePatch {
    /// Returns a copy of this patch with the fill color set
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// Returns a copy of this patch with the outline color set
    pub fn with_outline_color(mut self, color: Color) -> Self {
        self.outline_color = Some(color);
        self
    }

    /// Returns a copy of this patch with the outline width set
    pub fn with_outline_width(mut self, width: f32) -> Self {
        self.outline_width = Some(width);
        self
    }

    /// Returns a copy of this patch with the point cap set
    pub fn with_point_cap(mut self, cap: PointCap) -> Self {
        self.point_cap = Some(cap);
        self
    }

    /// Returns true if no field of this patch is set
    pub fn is_empty(&self) -> bool {
        self.fill_color.is_none()
            && self.outline_color.is_none()
            && self.outline_width.is_none()
            && self.point_cap.is_none()
    }

    /// Performs a field-wise override of `base`: only set fields overwrite.
    ///
    /// # Examples
    ///
    /// ```
    /// use geodraw_core::color::Color;
    /// use geodraw_core::style::{Style, StylePatch};
    ///
    /// let base = Style::default();
    /// let red = Color::new("#ff0000").unwrap();
    /// let merged = StylePatch::default().with_outline_color(red).merge(&base);
    ///
    /// assert_eq!(merged.outline_color(), red);
    /// assert_eq!(merged.fill_color(), base.fill_color());
    /// ```
    pub fn merge(&self, base: &Style) -> Style {
        Style {
            fill_color: self.fill_color.unwrap_or(base.fill_color),
            outline_color: self.outline_color.unwrap_or(base.outline_color),
            outline_width: self.outline_width.unwrap_or(base.outline_width),
            point_cap: self.point_cap.unwrap_or(base.point_cap),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_style() {
        let style = Style::default();
        assert_eq!(style.fill_color().to_hex_string(), "#3388ff33");
        assert_eq!(style.outline_color().to_hex_string(), "#3388ff");
        assert_approx_eq!(f32, style.outline_width(), 3.0);
        assert_eq!(style.point_cap(), PointCap::Round);
    }

    #[test]
    fn test_point_cap_from_str() {
        assert_eq!("round".parse::<PointCap>().unwrap(), PointCap::Round);
        assert_eq!("square".parse::<PointCap>().unwrap(), PointCap::Square);
        assert_eq!("none".parse::<PointCap>().unwrap(), PointCap::None);
        assert!("circle".parse::<PointCap>().is_err());
    }

    #[test]
    fn test_empty_patch_preserves_base() {
        let base = Style::default();
        let merged = StylePatch::default().merge(&base);
        assert_eq!(merged, base);
    }

    #[test]
    fn test_patch_overrides_only_set_fields() {
        let base = Style::default();
        let red = Color::new("#ff0000").unwrap();

        let merged = StylePatch::default()
            .with_outline_color(red)
            .with_fill_color(red.to_fill())
            .merge(&base);

        assert_eq!(merged.outline_color(), red);
        assert_eq!(merged.fill_color().to_hex_string(), "#ff000033");
        assert_approx_eq!(f32, merged.outline_width(), base.outline_width());
        assert_eq!(merged.point_cap(), base.point_cap());
    }

    #[test]
    fn test_style_serde_defaults() {
        // Partial style documents fall back to the defaults
        let style: Style = serde_json::from_str(r#"{"outline_width": 5.0}"#).unwrap();
        assert_approx_eq!(f32, style.outline_width(), 5.0);
        assert_eq!(style.outline_color().to_hex_string(), "#3388ff");
    }
}
