//! Artifact store: named, read-only, serialized models and arrays.

use crate::core::models::{GradientBoostingModel, LogisticModel, RandomForestModel};
use crate::core::preprocess::ColumnTransformer;
use crate::domain::model::ModelSelector;
use crate::domain::ports::{ArtifactSource, Classifier};
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Name of the shared preprocessor artifact.
pub const PREPROCESSOR_ARTIFACT: &str = "preprocessor";

/// Name of the held-out labels used for model comparison.
pub const TEST_LABELS_ARTIFACT: &str = "y_test";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayArtifact {
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    LogisticRegression(LogisticModel),
    RandomForest(RandomForestModel),
    GradientBoosting(GradientBoostingModel),
    Preprocessor(ColumnTransformer),
    Array(ArrayArtifact),
}

impl Artifact {
    pub fn kind(&self) -> &'static str {
        match self {
            Artifact::LogisticRegression(_) => "logistic_regression",
            Artifact::RandomForest(_) => "random_forest",
            Artifact::GradientBoosting(_) => "gradient_boosting",
            Artifact::Preprocessor(_) => "preprocessor",
            Artifact::Array(_) => "array",
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        match self {
            Artifact::LogisticRegression(model) => model.validate(),
            Artifact::RandomForest(model) => model.validate(),
            Artifact::GradientBoosting(model) => model.validate(),
            Artifact::Preprocessor(pre) => pre.validate(),
            Artifact::Array(_) => Ok(()),
        }
    }

    /// The model family each selector is trained as.
    fn expected_kind(selector: ModelSelector) -> &'static str {
        match selector {
            ModelSelector::XGBoost => "gradient_boosting",
            ModelSelector::RandomForest => "random_forest",
            ModelSelector::LogisticRegression => "logistic_regression",
        }
    }

    pub fn into_classifier(self, selector: ModelSelector) -> Result<Box<dyn Classifier>> {
        let expected = Self::expected_kind(selector);
        match self {
            Artifact::GradientBoosting(model) if expected == "gradient_boosting" => {
                Ok(Box::new(model))
            }
            Artifact::RandomForest(model) if expected == "random_forest" => Ok(Box::new(model)),
            Artifact::LogisticRegression(model) if expected == "logistic_regression" => {
                Ok(Box::new(model))
            }
            other => Err(AppError::artifact_load(
                selector.artifact_name(),
                format!("expected a {} artifact, found {}", expected, other.kind()),
            )),
        }
    }

    pub fn into_preprocessor(self, name: &str) -> Result<ColumnTransformer> {
        match self {
            Artifact::Preprocessor(pre) => Ok(pre),
            other => Err(AppError::artifact_load(
                name,
                format!("expected a preprocessor artifact, found {}", other.kind()),
            )),
        }
    }

    pub fn into_array(self, name: &str) -> Result<Vec<f64>> {
        match self {
            Artifact::Array(array) => Ok(array.values),
            other => Err(AppError::artifact_load(
                name,
                format!("expected an array artifact, found {}", other.kind()),
            )),
        }
    }
}

pub struct ArtifactStore<S: ArtifactSource> {
    source: S,
}

impl<S: ArtifactSource> ArtifactStore<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Read and deserialize an artifact. Structural problems (mismatched
    /// array lengths, dangling tree nodes) are reported as load errors.
    pub fn load(&self, name: &str) -> Result<Artifact> {
        tracing::debug!("Loading artifact from {}", self.source.describe(name));
        let bytes = self.source.read_artifact(name)?;

        let artifact: Artifact =
            serde_json::from_slice(&bytes).map_err(|e| AppError::artifact_load(name, e))?;
        artifact
            .validate()
            .map_err(|reason| AppError::artifact_load(name, reason))?;

        tracing::debug!(artifact = name, kind = artifact.kind(), "Artifact loaded");
        Ok(artifact)
    }

    pub fn load_preprocessor(&self) -> Result<ColumnTransformer> {
        self.load(PREPROCESSOR_ARTIFACT)?.into_preprocessor(PREPROCESSOR_ARTIFACT)
    }

    pub fn load_classifier(&self, selector: ModelSelector) -> Result<Box<dyn Classifier>> {
        self.load(selector.artifact_name())?.into_classifier(selector)
    }

    pub fn load_array(&self, name: &str) -> Result<Vec<f64>> {
        self.load(name)?.into_array(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MemorySource(HashMap<String, String>);

    impl ArtifactSource for MemorySource {
        fn read_artifact(&self, name: &str) -> Result<Vec<u8>> {
            self.0
                .get(name)
                .map(|s| s.as_bytes().to_vec())
                .ok_or_else(|| AppError::artifact_load(name, "not found"))
        }
    }

    fn store(entries: &[(&str, &str)]) -> ArtifactStore<MemorySource> {
        ArtifactStore::new(MemorySource(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn test_load_array() {
        let store = store(&[("y_test", r#"{"kind": "array", "values": [0, 1, 1]}"#)]);
        assert_eq!(store.load_array("y_test").unwrap(), vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_corrupt_artifact_is_load_error() {
        let store = store(&[("logistic_model", "not json")]);
        let err = store
            .load_classifier(ModelSelector::LogisticRegression)
            .err()
            .unwrap();
        assert!(matches!(err, AppError::ArtifactLoadError { ref name, .. } if name == "logistic_model"));
    }

    #[test]
    fn test_structurally_invalid_artifact_is_load_error() {
        let store = store(&[(
            "logistic_model",
            r#"{"kind": "logistic_regression", "coefficients": [], "intercept": 0.0}"#,
        )]);
        let err = store.load("logistic_model").unwrap_err();
        assert!(err.to_string().contains("no coefficients"));
    }

    #[test]
    fn test_wrong_kind_for_selector() {
        let store = store(&[(
            "xgboost_model",
            r#"{"kind": "logistic_regression", "coefficients": [1.0], "intercept": 0.0}"#,
        )]);
        let err = store.load_classifier(ModelSelector::XGBoost).err().unwrap();
        assert!(err.to_string().contains("expected a gradient_boosting artifact"));
    }

    #[test]
    fn test_preprocessor_kind_is_checked() {
        let store = store(&[("preprocessor", r#"{"kind": "array", "values": []}"#)]);
        assert!(matches!(
            store.load_preprocessor(),
            Err(AppError::ArtifactLoadError { .. })
        ));
    }
}
