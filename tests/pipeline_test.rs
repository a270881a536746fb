mod common;

use common::{Fixture, FEATURE_WIDTH};
use heart_risk::domain::ports::ArtifactSource;
use heart_risk::utils::error::{AppError, Result};
use heart_risk::{ClinicalRecord, InferencePipeline, LocalArtifacts, ModelSelector};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

fn pipeline(fixture: &Fixture) -> InferencePipeline<LocalArtifacts> {
    InferencePipeline::new(LocalArtifacts::new(fixture.artifacts_dir()))
}

fn high_risk_record() -> ClinicalRecord {
    ClinicalRecord {
        age: 70,
        sex: 1,
        chest_pain_type: 3,
        st_depression: 3.0,
        thallium: 3,
        ..ClinicalRecord::default()
    }
}

/// Local source that counts every read.
struct CountingSource {
    inner: LocalArtifacts,
    reads: AtomicUsize,
}

impl ArtifactSource for CountingSource {
    fn read_artifact(&self, name: &str) -> Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_artifact(name)
    }
}

#[test]
fn test_every_model_predicts_default_record() {
    let fixture = Fixture::new();
    let pipeline = pipeline(&fixture);

    for selector in ModelSelector::ALL {
        let result = pipeline
            .predict(selector, &ClinicalRecord::default())
            .unwrap();
        assert!(result.label <= 1, "{}", selector);
        assert!(
            (0.0..=1.0).contains(&result.probability),
            "{}: {}",
            selector,
            result.probability
        );
        assert_eq!(result.label, 0, "{} should see low risk", selector);
    }
}

#[test]
fn test_logistic_end_to_end() {
    let fixture = Fixture::new();
    let record = ClinicalRecord {
        age: 50,
        sex: 1,
        chest_pain_type: 0,
        blood_pressure: 120,
        cholesterol: 200,
        fasting_blood_sugar: 0,
        ekg_result: 0,
        max_heart_rate: 150,
        exercise_angina: 0,
        st_depression: 1.0,
        st_slope: 0,
        vessel_count: 0,
        thallium: 0,
    };
    let result = pipeline(&fixture)
        .predict_named("Logistic Regression", &record)
        .unwrap();

    // decision = -0.5 (chest pain one-hot) + 0.8 (sex) - 0.2 (intercept)
    let expected = 1.0 / (1.0 + (-0.1f64).exp());
    assert!((result.probability - expected).abs() < 1e-12);
    assert!(result.probability > 0.0 && result.probability < 1.0);
    assert_eq!(result.label, 1);
}

#[test]
fn test_high_risk_record() {
    let fixture = Fixture::new();
    let pipeline = pipeline(&fixture);
    let record = high_risk_record();

    let forest = pipeline.predict(ModelSelector::RandomForest, &record).unwrap();
    assert_eq!(forest.label, 1);
    assert!((forest.probability - 0.9).abs() < 1e-12);
    assert_eq!(forest.risk_score_percent(), "90.00%");

    let boosted = pipeline.predict(ModelSelector::XGBoost, &record).unwrap();
    assert_eq!(boosted.label, 1);
    assert_eq!(boosted.risk_score_percent(), "76.85%");

    let logistic = pipeline
        .predict(ModelSelector::LogisticRegression, &record)
        .unwrap();
    assert_eq!(logistic.label, 1);
    assert!(logistic.probability > 0.5);
}

#[test]
fn test_predictions_are_deterministic() {
    let fixture = Fixture::new();
    let pipeline = pipeline(&fixture);
    let record = high_risk_record();

    for selector in ModelSelector::ALL {
        let first = pipeline.predict(selector, &record).unwrap();
        let second = pipeline.predict(selector, &record).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_unknown_model_reads_no_artifacts() {
    let fixture = Fixture::new();
    let source = CountingSource {
        inner: LocalArtifacts::new(fixture.artifacts_dir()),
        reads: AtomicUsize::new(0),
    };
    let pipeline = InferencePipeline::new(source);

    let err = pipeline
        .predict_named("Support Vector Machine", &ClinicalRecord::default())
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownModelError { .. }));
    assert_eq!(pipeline.store().source().reads.load(Ordering::SeqCst), 0);

    pipeline
        .predict_named("rf", &ClinicalRecord::default())
        .unwrap();
    assert_eq!(pipeline.store().source().reads.load(Ordering::SeqCst), 2);
}

#[test]
fn test_missing_preprocessor() {
    let fixture = Fixture::new();
    fixture.remove_artifact("preprocessor");
    let source = CountingSource {
        inner: LocalArtifacts::new(fixture.artifacts_dir()),
        reads: AtomicUsize::new(0),
    };
    let pipeline = InferencePipeline::new(source);

    let err = pipeline
        .predict(ModelSelector::XGBoost, &ClinicalRecord::default())
        .unwrap_err();
    assert!(
        matches!(err, AppError::ArtifactLoadError { ref name, .. } if name == "preprocessor"),
        "{:?}",
        err
    );
    // no model file was touched after the preprocessor failed
    assert_eq!(pipeline.store().source().reads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_missing_model_file() {
    let fixture = Fixture::new();
    fixture.remove_artifact("random_forest_model");

    let err = pipeline(&fixture)
        .predict(ModelSelector::RandomForest, &ClinicalRecord::default())
        .unwrap_err();
    assert!(matches!(err, AppError::ArtifactLoadError { ref name, .. } if name == "random_forest_model"));
}

#[test]
fn test_corrupt_artifact() {
    let fixture = Fixture::new();
    fixture.write_raw_artifact("logistic_model", "{ not json");

    let err = pipeline(&fixture)
        .predict(ModelSelector::LogisticRegression, &ClinicalRecord::default())
        .unwrap_err();
    assert!(matches!(err, AppError::ArtifactLoadError { .. }));
}

#[test]
fn test_model_of_wrong_family() {
    let fixture = Fixture::new();
    fixture.write_artifact("xgboost_model", &common::logistic_model());

    let err = pipeline(&fixture)
        .predict(ModelSelector::XGBoost, &ClinicalRecord::default())
        .unwrap_err();
    assert!(matches!(err, AppError::ArtifactLoadError { .. }));
}

#[test]
fn test_feature_width_mismatch() {
    let fixture = Fixture::new();
    fixture.write_artifact(
        "logistic_model",
        &json!({
            "kind": "logistic_regression",
            "coefficients": vec![0.1; FEATURE_WIDTH - 1],
            "intercept": 0.0
        }),
    );

    let err = pipeline(&fixture)
        .predict(ModelSelector::LogisticRegression, &ClinicalRecord::default())
        .unwrap_err();
    assert!(matches!(err, AppError::TransformError { .. }));
}

#[test]
fn test_preprocessor_requires_every_column() {
    let fixture = Fixture::new();
    let mut pre = common::preprocessor();
    pre["input_columns"]
        .as_array_mut()
        .unwrap()
        .push(json!("Resting ECG"));
    fixture.write_artifact("preprocessor", &pre);

    let err = pipeline(&fixture)
        .predict(ModelSelector::XGBoost, &ClinicalRecord::default())
        .unwrap_err();
    assert!(matches!(err, AppError::TransformError { .. }), "{:?}", err);
}
