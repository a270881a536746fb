pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::storage::LocalArtifacts;
pub use crate::config::AppConfig;
pub use crate::core::pipeline::InferencePipeline;
pub use crate::domain::model::{ClinicalRecord, ModelSelector, PredictionResult};
pub use crate::utils::error::{AppError, Result};
