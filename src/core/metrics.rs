//! Binary classification metrics for the model comparison page.

use crate::utils::error::{AppError, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    /// Decreasing score thresholds; the first is `+inf`.
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    pub fn auc(&self) -> f64 {
        auc(&self.fpr, &self.tpr)
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.fpr.iter().copied().zip(self.tpr.iter().copied()).collect()
    }
}

fn check_inputs(y_true: &[f64], y_score: &[f64]) -> Result<()> {
    if y_true.len() != y_score.len() {
        return Err(AppError::MetricError {
            message: format!(
                "{} labels but {} scores",
                y_true.len(),
                y_score.len()
            ),
        });
    }
    if y_true.is_empty() {
        return Err(AppError::MetricError {
            message: "no samples".to_string(),
        });
    }
    if let Some(bad) = y_true.iter().find(|y| **y != 0.0 && **y != 1.0) {
        return Err(AppError::MetricError {
            message: format!("labels must be 0 or 1, found {}", bad),
        });
    }
    if y_score.iter().any(|s| s.is_nan()) {
        return Err(AppError::MetricError {
            message: "scores contain NaN".to_string(),
        });
    }
    Ok(())
}

/// Receiver operating characteristic with collinear points dropped.
///
/// One point per distinct score (highest first), preceded by `(0, 0)` at an
/// infinite threshold. When a class is absent its rate axis stays at 0.
pub fn roc_curve(y_true: &[f64], y_score: &[f64]) -> Result<RocCurve> {
    check_inputs(y_true, y_score)?;

    let mut order: Vec<usize> = (0..y_score.len()).collect();
    order.sort_by(|&a, &b| y_score[b].total_cmp(&y_score[a]));

    // Cumulative counts at the last index of each distinct score.
    let mut tps: Vec<f64> = Vec::new();
    let mut fps: Vec<f64> = Vec::new();
    let mut thresholds: Vec<f64> = Vec::new();
    let (mut tp, mut fp) = (0.0, 0.0);
    for (pos, &idx) in order.iter().enumerate() {
        if y_true[idx] == 1.0 {
            tp += 1.0;
        } else {
            fp += 1.0;
        }
        let last_of_run = order
            .get(pos + 1)
            .map_or(true, |&next| y_score[next] != y_score[idx]);
        if last_of_run {
            tps.push(tp);
            fps.push(fp);
            thresholds.push(y_score[idx]);
        }
    }

    // Keep only the corners of the curve.
    if tps.len() > 2 {
        let n = tps.len();
        let keep: Vec<usize> = (0..n)
            .filter(|&i| {
                i == 0
                    || i == n - 1
                    || fps[i - 1] - 2.0 * fps[i] + fps[i + 1] != 0.0
                    || tps[i - 1] - 2.0 * tps[i] + tps[i + 1] != 0.0
            })
            .collect();
        tps = keep.iter().map(|&i| tps[i]).collect();
        fps = keep.iter().map(|&i| fps[i]).collect();
        thresholds = keep.iter().map(|&i| thresholds[i]).collect();
    }

    tps.insert(0, 0.0);
    fps.insert(0, 0.0);
    thresholds.insert(0, f64::INFINITY);

    let total_pos = tp;
    let total_neg = fp;
    let rate = |counts: &[f64], total: f64| -> Vec<f64> {
        if total > 0.0 {
            counts.iter().map(|c| c / total).collect()
        } else {
            vec![0.0; counts.len()]
        }
    };

    Ok(RocCurve {
        fpr: rate(&fps, total_neg),
        tpr: rate(&tps, total_pos),
        thresholds,
    })
}

/// Area under a curve by the trapezoidal rule. `x` must be monotonic.
pub fn auc(x: &[f64], y: &[f64]) -> f64 {
    let area: f64 = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum();
    // decreasing x gives a negative area
    area.abs()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub auc: f64,
}

impl ClassificationReport {
    /// Metrics for hard predictions `score > threshold`, plus ROC AUC of the
    /// raw scores. Undefined ratios are reported as 0.
    pub fn from_scores(y_true: &[f64], y_score: &[f64], threshold: f64) -> Result<Self> {
        let roc = roc_curve(y_true, y_score)?;

        let (mut tp, mut fp, mut tn, mut fn_) = (0usize, 0usize, 0usize, 0usize);
        for (&y, &s) in y_true.iter().zip(y_score) {
            match (y == 1.0, s > threshold) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (false, false) => tn += 1,
                (true, false) => fn_ += 1,
            }
        }

        let ratio = |num: usize, den: usize| if den > 0 { num as f64 / den as f64 } else { 0.0 };
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Ok(Self {
            accuracy: ratio(tp + tn, y_true.len()),
            precision,
            recall,
            f1,
            auc: roc.auc(),
        })
    }
}
