//! Error types for geodraw operations.
//!
//! This module provides the main error type [`GeodrawError`] which wraps
//! the error conditions that can occur while synchronizing a drawing
//! surface.

use std::io;

use thiserror::Error;

use crate::renderer::RendererError;

/// The main error type for geodraw operations.
///
/// Failures inside one render batch are local by design: malformed features
/// are logged and skipped rather than surfaced here. What does surface is
/// the renderer factory failing to construct a drawable, which has no retry
/// policy and propagates to the caller.
#[derive(Debug, Error)]
pub enum GeodrawError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}
