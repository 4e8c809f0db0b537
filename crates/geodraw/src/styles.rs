//! Style resolution: the global style and per-styling-group copies.
//!
//! A [`StyleBook`] holds the mutable global [`Style`] and a lazily
//! populated map of per-styling-group styles. The first time a styling
//! identity is resolved, the current global style is copied into the map;
//! the stored copy is returned thereafter, so later global changes do not
//! retroactively restyle groups that were already initialized.

use std::collections::HashMap;

use log::debug;

use geodraw_core::{
    identifier::FeatureId,
    style::{Style, StylePatch},
};

/// The styling state of one drawing surface.
///
/// Owned exclusively by the surface and mutated only through the documented
/// entry points: [`resolve`](Self::resolve), [`update_global`](Self::update_global),
/// [`forget`](Self::forget), and [`clear_groups`](Self::clear_groups).
///
/// # Examples
///
/// ```
/// use geodraw::StyleBook;
/// use geodraw_core::identifier::FeatureId;
/// use geodraw_core::style::{Style, StylePatch};
/// use geodraw_core::color::Color;
///
/// let mut styles = StyleBook::new(Style::default());
/// let id = FeatureId::new("A");
///
/// // First resolution copies the global style
/// let initial = styles.resolve(id);
///
/// // A later global change does not touch the stored copy
/// let red = Color::new("#ff0000").unwrap();
/// styles.update_global(&StylePatch::default().with_outline_color(red));
/// assert_eq!(styles.resolve(id), initial);
/// ```
#[derive(Debug, Clone)]
pub struct StyleBook {
    global: Style,
    groups: HashMap<FeatureId, Style>,
}

impl StyleBook {
    /// Creates a style book with the given global style and no group
    /// entries.
    pub fn new(global: Style) -> Self {
        Self {
            global,
            groups: HashMap::new(),
        }
    }

    /// Returns the current global style.
    pub fn global(&self) -> &Style {
        &self.global
    }

    /// Resolves the effective style for a styling identity.
    ///
    /// Absent entries are initialized as a copy of the current global style
    /// and stored; the stored copy is returned thereafter. The copy does
    /// not alias the global style.
    pub fn resolve(&mut self, styling_id: FeatureId) -> Style {
        *self.groups.entry(styling_id).or_insert(self.global)
    }

    /// Merges a partial style into the global style.
    ///
    /// Only set fields of the patch overwrite. Already-initialized group
    /// entries are left alone.
    pub fn update_global(&mut self, patch: &StylePatch) {
        if patch.is_empty() {
            return;
        }
        self.global = patch.merge(&self.global);
        debug!(style:? = self.global; "Global style updated");
    }

    /// Merges a partial style into the global style and every initialized
    /// group entry.
    ///
    /// This is the style-change command path: group entries deliberately do
    /// not follow the global style on their own, so a color or width picked
    /// in the UI is propagated explicitly. Features carrying sticky explicit
    /// overrides still win over the propagated values at resolution time.
    pub fn propagate(&mut self, patch: &StylePatch) {
        if patch.is_empty() {
            return;
        }
        self.update_global(patch);
        for style in self.groups.values_mut() {
            *style = patch.merge(style);
        }
    }

    /// Drops the stored style entry for a styling identity.
    ///
    /// Called when the identity's feature is deleted, so a later reuse of
    /// the id starts from the then-current global style instead of a stale
    /// entry.
    pub fn forget(&mut self, styling_id: FeatureId) {
        self.groups.remove(&styling_id);
    }

    /// Drops every stored group entry, keeping the global style.
    pub fn clear_groups(&mut self) {
        self.groups.clear();
    }

    /// Returns the number of initialized group entries.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Default for StyleBook {
    fn default() -> Self {
        Self::new(Style::default())
    }
}
