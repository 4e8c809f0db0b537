//! CLI logic for the geodraw replay tool.
//!
//! Replays a recorded drawing session against a [`DrawSurface`] backed by
//! the headless SVG renderer and writes the resulting SVG document, and
//! optionally the final GeoJSON feature snapshot.

mod args;
mod config;
mod script;

pub use args::Args;

use std::{fs, path::Path, time::Instant};

use log::{debug, info};

use geodraw::{
    DrawSurface, GeodrawError,
    command::{CommandProcessor, Engine, Mode},
    export::{self, svg::SvgRenderer},
};
use geodraw_core::{
    feature::{ChangeBatch, Feature, FeatureCollection},
    identifier::FeatureId,
};

use script::{ReplayScript, Step};

/// In-memory feature store standing in for the external drawing engine
/// during a replay.
#[derive(Debug, Default)]
struct ReplayStore {
    mode: Mode,
    features: Vec<Feature>,
}

impl ReplayStore {
    /// Folds a change batch into the store, mirroring what the external
    /// engine's own store would hold at this point of the session.
    fn absorb(&mut self, batch: &ChangeBatch) {
        for feature in batch.created.iter().chain(&batch.updated) {
            let Some(id) = feature.id() else { continue };
            self.features
                .retain(|existing| existing.id() != Some(id));
            self.features.push(feature.clone());
        }
        self.features.retain(|feature| {
            feature
                .id()
                .is_none_or(|id| !batch.deleted_ids.contains(&id))
        });
    }
}

impl Engine for ReplayStore {
    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn clear(&mut self) {
        self.features.clear();
    }

    fn remove_features(&mut self, ids: &[FeatureId]) {
        self.features
            .retain(|feature| feature.id().is_none_or(|id| !ids.contains(&id)));
    }

    fn snapshot(&self) -> FeatureCollection {
        FeatureCollection::new(self.features.clone())
    }
}

/// Run the geodraw CLI application
///
/// This function replays the input script against a drawing surface and
/// writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `GeodrawError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Script parsing errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), GeodrawError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Replaying drawing session"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read and parse the replay script
    let source = fs::read_to_string(&args.input)?;
    let replay: ReplayScript = serde_json::from_str(&source)?;
    info!(steps = replay.steps.len(); "Replay script loaded");

    // Set up the surface and the command processor
    let renderer = SvgRenderer::new(app_config.canvas().width(), app_config.canvas().height());
    let mut surface = DrawSurface::new(renderer, app_config.surface().clone());
    let mut store = ReplayStore::default();
    let mut processor = CommandProcessor::new(app_config.surface().finish_restore_delay());

    for step in &replay.steps {
        // A replay has no real clock; pending mode restorations come due
        // before the next step
        processor.poll_restore(&mut store, Instant::now() + surface.config().finish_restore_delay());

        match step {
            Step::Render { batch } => {
                store.absorb(batch);
                surface.render(batch)?;
            }
            Step::Command { command } => {
                if let Some(download) = processor.apply(command.clone(), &mut store, &mut surface)?
                {
                    let target = Path::new(&args.output).with_file_name(&download.file_name);
                    fs::write(&target, &download.contents)?;
                    info!(path = target.display().to_string(); "Snapshot file written");
                }
            }
            Step::Finish => {
                processor.notify_finish(&mut store, Instant::now());
            }
        }
    }
    debug!(mode = processor.mode().as_str(), drawables = surface.drawable_count(); "Replay finished");

    // Write the SVG document
    fs::write(&args.output, surface.renderer().to_svg_string())?;
    info!(output_file = args.output; "SVG exported successfully");

    // Write the final feature snapshot when asked
    if let Some(snapshot_path) = &args.snapshot {
        fs::write(snapshot_path, export::snapshot_json(&store.snapshot())?)?;
        info!(snapshot_file = snapshot_path; "Snapshot exported successfully");
    }

    Ok(())
}
