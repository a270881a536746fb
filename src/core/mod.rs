pub mod artifacts;
pub mod dataset;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod preprocess;
pub mod stats;

pub use artifacts::{Artifact, ArtifactStore};
pub use dataset::Dataset;
pub use pipeline::InferencePipeline;
pub use preprocess::ColumnTransformer;
