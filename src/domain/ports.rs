use crate::domain::model::{FeatureFrame, PreprocessedFeatures};
use crate::utils::error::Result;

/// Read-only access to serialized artifacts, keyed by name.
pub trait ArtifactSource: Send + Sync {
    fn read_artifact(&self, name: &str) -> Result<Vec<u8>>;

    /// Human-readable location of an artifact, used in logs.
    fn describe(&self, name: &str) -> String {
        name.to_string()
    }
}

/// A fitted transform from the raw feature table to model input.
pub trait Preprocessor {
    /// Column names the transform was fitted on.
    fn input_columns(&self) -> &[String];

    fn transform(&self, frame: &FeatureFrame) -> Result<PreprocessedFeatures>;
}

/// A fitted binary classifier.
pub trait Classifier {
    /// Width of the feature row the model was trained on.
    fn n_features(&self) -> usize;

    fn predict_label(&self, features: &[f64]) -> Result<u8>;

    /// Probability of the positive class.
    fn predict_probability(&self, features: &[f64]) -> Result<f64>;
}
