//! Drawable lifecycle management.
//!
//! The [`DrawableTracker`] owns the live mapping from feature id to native
//! drawable handle. All construction goes through the renderer factory; all
//! teardown goes through [`Drawable::destroy`] followed by eviction from the
//! mapping. Eviction without destroy leaks the native resource; destroy
//! without eviction causes a double-destroy on the next batch, so the two
//! always travel together here.

use std::collections::HashMap;

use log::{debug, trace};

use geodraw_core::identifier::FeatureId;

use crate::renderer::{Drawable, Primitive, Renderer, RendererError};

/// The live feature-id to drawable mapping of one drawing surface.
///
/// Invariant: at most one live drawable per feature id at any time.
/// Replacing a feature always destroys the previous drawable before
/// installing the new one.
#[derive(Debug, Default)]
pub struct DrawableTracker {
    live: HashMap<FeatureId, Box<dyn Drawable>>,
}

impl DrawableTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            live: HashMap::new(),
        }
    }

    /// Installs the drawable for a feature id, replacing any previous one.
    ///
    /// The previous drawable, if any, is destroyed before the replacement
    /// is constructed; there is no partial patch path. If construction
    /// fails the id holds no drawable afterwards.
    ///
    /// # Errors
    ///
    /// Propagates [`RendererError`] from the renderer factory.
    pub fn upsert<R: Renderer>(
        &mut self,
        renderer: &mut R,
        id: FeatureId,
        primitive: Primitive,
    ) -> Result<(), RendererError> {
        if let Some(mut previous) = self.live.remove(&id) {
            previous.destroy();
            trace!(id = id.to_string(); "Replaced previous drawable");
        }

        let handle = renderer.create(primitive)?;
        self.live.insert(id, handle);
        Ok(())
    }

    /// Destroys and evicts the drawable for a feature id.
    ///
    /// A no-op when the id has no live drawable, which makes repeated
    /// removal idempotent.
    pub fn remove(&mut self, id: FeatureId) {
        if let Some(mut handle) = self.live.remove(&id) {
            handle.destroy();
            trace!(id = id.to_string(); "Removed drawable");
        }
    }

    /// Destroys every tracked drawable and empties the mapping.
    ///
    /// Safe to call when already empty.
    pub fn clear(&mut self) {
        let count = self.live.len();
        for (_, mut handle) in self.live.drain() {
            handle.destroy();
        }
        if count > 0 {
            debug!(count; "Cleared all drawables");
        }
    }

    /// Returns true if the id has a live drawable.
    pub fn contains(&self, id: FeatureId) -> bool {
        self.live.contains_key(&id)
    }

    /// Returns the number of live drawables.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns true if no drawables are live.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
