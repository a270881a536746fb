use crate::utils::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names the fitted preprocessor was trained on, in table order.
///
/// These come from the training dataset header and must match the artifact
/// byte for byte, casing included.
pub const FEATURE_COLUMNS: [&str; 13] = [
    "Age",
    "Sex",
    "Chest pain type",
    "BP",
    "Cholesterol",
    "FBS over 120",
    "EKG results",
    "Max HR",
    "Exercise angina",
    "ST depression",
    "Slope of ST",
    "Number of vessels fluro",
    "Thallium",
];

/// One patient's clinical measurements.
///
/// Ranges are checked where the record is built from user input
/// (see `app::form`); the inference pipeline accepts any value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    pub age: i64,
    pub sex: i64,
    pub chest_pain_type: i64,
    pub blood_pressure: i64,
    pub cholesterol: i64,
    pub fasting_blood_sugar: i64,
    pub ekg_result: i64,
    pub max_heart_rate: i64,
    pub exercise_angina: i64,
    pub st_depression: f64,
    pub st_slope: i64,
    pub vessel_count: i64,
    pub thallium: i64,
}

impl ClinicalRecord {
    /// Build the single-row feature table in [`FEATURE_COLUMNS`] order.
    pub fn to_frame(&self) -> FeatureFrame {
        let values = [
            self.age as f64,
            self.sex as f64,
            self.chest_pain_type as f64,
            self.blood_pressure as f64,
            self.cholesterol as f64,
            self.fasting_blood_sugar as f64,
            self.ekg_result as f64,
            self.max_heart_rate as f64,
            self.exercise_angina as f64,
            self.st_depression,
            self.st_slope as f64,
            self.vessel_count as f64,
            self.thallium as f64,
        ];

        FeatureFrame {
            columns: FEATURE_COLUMNS
                .iter()
                .zip(values)
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }
}

impl Default for ClinicalRecord {
    /// The values the predict form starts with.
    fn default() -> Self {
        Self {
            age: 50,
            sex: 0,
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
        }
    }
}

/// A single-row table of named numeric features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: Vec<(String, f64)>,
}

impl FeatureFrame {
    pub fn new(columns: Vec<(String, f64)>) -> Self {
        Self { columns }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Numeric row produced by the preprocessor, in the layout the models expect.
pub type PreprocessedFeatures = Vec<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelSelector {
    XGBoost,
    RandomForest,
    LogisticRegression,
}

impl ModelSelector {
    pub const ALL: [ModelSelector; 3] = [
        ModelSelector::XGBoost,
        ModelSelector::RandomForest,
        ModelSelector::LogisticRegression,
    ];

    /// Name of the artifact holding this model.
    pub fn artifact_name(&self) -> &'static str {
        match self {
            ModelSelector::XGBoost => "xgboost_model",
            ModelSelector::RandomForest => "random_forest_model",
            ModelSelector::LogisticRegression => "logistic_model",
        }
    }

    /// Name of the precomputed held-out probability array for this model.
    pub fn probability_artifact(&self) -> &'static str {
        match self {
            ModelSelector::XGBoost => "y_prob_xgb",
            ModelSelector::RandomForest => "y_prob_rf",
            ModelSelector::LogisticRegression => "y_prob_log",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelSelector::XGBoost => "XGBoost",
            ModelSelector::RandomForest => "Random Forest",
            ModelSelector::LogisticRegression => "Logistic Regression",
        }
    }
}

impl fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelSelector {
    type Err = AppError;

    /// Accepts the display label, the artifact name, or a compact spelling
    /// ("xgboost", "random_forest", "logistic").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "xgboost" | "xgb" | "xgboostmodel" => Ok(ModelSelector::XGBoost),
            "randomforest" | "rf" | "randomforestmodel" => Ok(ModelSelector::RandomForest),
            "logisticregression" | "logistic" | "log" | "logisticmodel" => {
                Ok(ModelSelector::LogisticRegression)
            }
            _ => Err(AppError::UnknownModelError {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted class, 0 or 1.
    pub label: u8,
    /// Positive-class probability as returned by the model.
    pub probability: f64,
}

impl PredictionResult {
    pub fn risk_level(&self) -> RiskLevel {
        if self.label == 1 {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    /// Probability as a percentage with two decimals, e.g. "73.41%".
    pub fn risk_score_percent(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    High,
}

impl RiskLevel {
    pub fn headline(&self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk Detected!",
            RiskLevel::Low => "Low Risk Detected",
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            RiskLevel::High => "#ffcccc",
            RiskLevel::Low => "#ccffcc",
        }
    }
}
