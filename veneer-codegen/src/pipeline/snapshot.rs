//! Pipeline snapshot plugin for debugging.
//!
//! Captures the pipeline state after each phase so the intermediate
//! generation config and view model can be inspected.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use eyre::Result;
use serde::Serialize;
use veneer_viewmodel::ApiView;

use super::{CompilationContext, Diagnostic, Plugin};
use crate::resolve::GenerationConfig;

/// A snapshot of the pipeline state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// The generation config (available after the "resolve" phase).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<GenerationConfig>,

    /// The view model (available after the "assemble" phase).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ApiView>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures pipeline state after each phase.
///
/// Used by `veneer generate --snapshot <dir>`.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(".veneer/debug"));
/// let ctx = pipeline.run(model, config, options)?;
/// ```
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Written to after every phase when set.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a snapshot plugin that writes `<phase>.json` files to a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots.read().unwrap().clone()
    }

    /// Write all snapshots to a directory.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for snapshot in self.snapshots.read().unwrap().iter() {
            write_snapshot(dir, snapshot)?;
        }

        Ok(())
    }

    fn capture_snapshot(&self, phase: &str, ctx: &CompilationContext) {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            resolved: ctx.resolved.clone(),
            view: ctx.view.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };
        self.snapshots.write().unwrap().push(snapshot);
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json)?;
    Ok(())
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        self.capture_snapshot(phase, ctx);

        if let Some(ref dir) = self.output_dir
            && let Some(snapshot) = self.snapshots.read().unwrap().last()
        {
            fs::create_dir_all(dir)?;
            write_snapshot(dir, snapshot)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use veneer_config::Language;

    use super::*;
    use crate::{
        pipeline::Pipeline,
        resolve::ResolveOptions,
        testing::{library_config, library_model},
    };

    #[test]
    fn test_snapshot_plugin_creation() {
        let plugin = SnapshotPlugin::new();
        assert!(plugin.snapshots().is_empty());
    }

    #[test]
    fn test_snapshots_written_per_phase() {
        let dir = tempfile::tempdir().unwrap();
        let model = library_model();
        let options = ResolveOptions::new(Language::Python, &model);

        let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(dir.path()));
        pipeline.run(model, library_config(), options).unwrap();

        for phase in ["validate", "resolve", "assemble"] {
            assert!(dir.path().join(format!("{}.json", phase)).exists());
        }

        let resolve: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("resolve.json")).unwrap())
                .unwrap();
        assert!(resolve.get("resolved").is_some());
        assert!(resolve.get("view").is_none());
    }
}
