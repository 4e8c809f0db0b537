//! Replay script parsing.
//!
//! A replay script is a JSON document describing a recorded drawing session
//! as an ordered list of steps. Each step is either a feature change batch,
//! a UI command, or a shape finish, replayed against a [`DrawSurface`]
//! backed by the headless SVG renderer.
//!
//! ```json
//! {
//!   "steps": [
//!     { "step": "command", "command": { "command": "set-mode", "mode": "polygon" } },
//!     { "step": "render", "batch": { "created": [], "updated": [], "deletedIds": [] } },
//!     { "step": "finish" }
//!   ]
//! }
//! ```
//!
//! [`DrawSurface`]: geodraw::DrawSurface

use serde::Deserialize;

use geodraw::command::Command;
use geodraw_core::feature::ChangeBatch;

/// One step of a recorded session
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum Step {
    /// Apply a feature change batch to the surface
    Render {
        /// The batch to apply
        batch: ChangeBatch,
    },
    /// Apply a UI command
    Command {
        /// The command to apply
        command: Command,
    },
    /// A shape was finished; engages the double-click debounce
    Finish,
}

/// A full recorded session
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReplayScript {
    /// The steps in replay order
    pub steps: Vec<Step>,
}

#[cfg(test)]
mod tests {
    use geodraw::command::Mode;

    use super::*;

    #[test]
    fn test_parse_script() {
        let script: ReplayScript = serde_json::from_str(
            r#"{
                "steps": [
                    { "step": "command", "command": { "command": "set-mode", "mode": "point" } },
                    { "step": "render", "batch": { "created": [], "updated": [], "deletedIds": ["p1"] } },
                    { "step": "finish" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 3);
        assert!(matches!(
            script.steps[0],
            Step::Command {
                command: Command::SetMode { mode: Mode::Point }
            }
        ));
        assert!(matches!(&script.steps[1], Step::Render { batch } if batch.deleted_ids.len() == 1));
        assert!(matches!(script.steps[2], Step::Finish));
    }

    #[test]
    fn test_empty_script() {
        let script: ReplayScript = serde_json::from_str(r#"{}"#).unwrap();
        assert!(script.steps.is_empty());
    }
}
