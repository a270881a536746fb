//! Binary logistic regression.

use crate::core::models::{check_width, sigmoid};
use crate::domain::ports::Classifier;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    /// One weight per preprocessed feature.
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("logistic regression has no coefficients".to_string());
        }
        if self.coefficients.iter().any(|w| !w.is_finite()) || !self.intercept.is_finite() {
            return Err("logistic regression weights must be finite".to_string());
        }
        Ok(())
    }

    pub fn decision_function(&self, features: &[f64]) -> Result<f64> {
        check_width(self.coefficients.len(), features)?;

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        Ok(dot + self.intercept)
    }
}

impl Classifier for LogisticModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_label(&self, features: &[f64]) -> Result<u8> {
        Ok(u8::from(self.decision_function(features)? > 0.0))
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64> {
        Ok(sigmoid(self.decision_function(features)?))
    }
}
