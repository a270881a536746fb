//! Classifier adapters, one per model family.

pub mod boosting;
pub mod forest;
pub mod logistic;

pub use boosting::GradientBoostingModel;
pub use forest::RandomForestModel;
pub use logistic::LogisticModel;

use crate::utils::error::{AppError, Result};

/// Child index marking a leaf node.
pub(crate) const LEAF: i64 = -1;

pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

pub(crate) fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

pub(crate) fn check_width(expected: usize, features: &[f64]) -> Result<()> {
    if features.len() != expected {
        return Err(AppError::transform(format!(
            "model expects {} features, got {}",
            expected,
            features.len()
        )));
    }
    Ok(())
}
