//! Shared state injected into every handler.

use crate::adapters::storage::LocalArtifacts;
use crate::config::AppConfig;
use crate::core::pipeline::InferencePipeline;
use std::path::PathBuf;
use std::sync::Arc;

pub struct AppState {
    pub pipeline: InferencePipeline<LocalArtifacts>,
    /// CSV shown on the visualization page, read on every request.
    pub dataset_path: PathBuf,
}

impl AppState {
    pub fn new(artifacts_dir: impl Into<PathBuf>, dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            pipeline: InferencePipeline::new(LocalArtifacts::new(artifacts_dir)),
            dataset_path: dataset_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.artifacts.dir, &config.dataset.path)
    }
}

pub type SharedState = Arc<AppState>;
