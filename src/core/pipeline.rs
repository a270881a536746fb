use crate::core::artifacts::ArtifactStore;
use crate::domain::model::{ClinicalRecord, ModelSelector, PredictionResult};
use crate::domain::ports::{ArtifactSource, Classifier, Preprocessor};
use crate::utils::error::{AppError, Result};
use std::time::Instant;

/// Record → preprocessor → model → prediction.
///
/// Artifacts are read from the store on every call; nothing is cached
/// between predictions.
pub struct InferencePipeline<S: ArtifactSource> {
    store: ArtifactStore<S>,
}

impl<S: ArtifactSource> InferencePipeline<S> {
    pub fn new(source: S) -> Self {
        Self {
            store: ArtifactStore::new(source),
        }
    }

    pub fn store(&self) -> &ArtifactStore<S> {
        &self.store
    }

    /// Predict with a model given by name. Unknown names are rejected before
    /// any artifact is read.
    pub fn predict_named(&self, model: &str, record: &ClinicalRecord) -> Result<PredictionResult> {
        let selector: ModelSelector = model.parse()?;
        self.predict(selector, record)
    }

    pub fn predict(
        &self,
        selector: ModelSelector,
        record: &ClinicalRecord,
    ) -> Result<PredictionResult> {
        let start_time = Instant::now();

        // The preprocessor goes first so a missing one never reaches a model.
        let preprocessor = self.store.load_preprocessor()?;
        let model = self.store.load_classifier(selector)?;

        let result = score(&preprocessor, model.as_ref(), record)?;

        tracing::info!(
            model = %selector,
            label = result.label,
            probability = result.probability,
            elapsed_us = start_time.elapsed().as_micros() as u64,
            "Prediction complete"
        );
        Ok(result)
    }
}

/// Run one record through an already-loaded preprocessor and model.
pub fn score(
    preprocessor: &dyn Preprocessor,
    model: &dyn Classifier,
    record: &ClinicalRecord,
) -> Result<PredictionResult> {
    let frame = record.to_frame();
    let features = preprocessor.transform(&frame)?;

    if features.len() != model.n_features() {
        return Err(AppError::transform(format!(
            "preprocessor produced {} features but the model expects {}",
            features.len(),
            model.n_features()
        )));
    }
    tracing::debug!(width = features.len(), "Features transformed");

    let label = model.predict_label(&features)?;
    let probability = model.predict_probability(&features)?;

    Ok(PredictionResult { label, probability })
}
