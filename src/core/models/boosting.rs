//! Gradient-boosted trees with a logistic objective (XGBoost `binary:logistic`).
//!
//! Node `i` is a leaf when `left[i] == -1`. Internal nodes send the sample left
//! when `x[split_feature[i]] < split_condition[i]`; missing values (NaN) follow
//! `default_left[i]`.

use crate::core::models::{check_width, logit, sigmoid, LEAF};
use crate::domain::ports::Classifier;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostedTree {
    pub left: Vec<i64>,
    pub right: Vec<i64>,
    pub split_feature: Vec<i64>,
    pub split_condition: Vec<f64>,
    pub default_left: Vec<bool>,
    pub leaf_value: Vec<f64>,
}

impl BoostedTree {
    fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        let n = self.left.len();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.right.len() != n
            || self.split_feature.len() != n
            || self.split_condition.len() != n
            || self.default_left.len() != n
            || self.leaf_value.len() != n
        {
            return Err("tree node arrays differ in length".to_string());
        }

        for node in 0..n {
            if self.left[node] == LEAF {
                if !self.leaf_value[node].is_finite() {
                    return Err(format!("leaf {} has a non-finite value", node));
                }
                continue;
            }
            for child in [self.left[node], self.right[node]] {
                if child <= node as i64 || child as usize >= n {
                    return Err(format!("node {} has invalid child {}", node, child));
                }
            }
            let feature = self.split_feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {} splits on unknown feature {}", node, feature));
            }
            if self.split_condition[node].is_nan() {
                return Err(format!("node {} has a NaN split condition", node));
            }
        }
        Ok(())
    }

    fn leaf_score(&self, features: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.left[node] != LEAF {
            let x = features[self.split_feature[node] as usize];
            let go_left = if x.is_nan() {
                self.default_left[node]
            } else {
                x < self.split_condition[node]
            };
            node = if go_left {
                self.left[node] as usize
            } else {
                self.right[node] as usize
            };
        }
        self.leaf_value[node]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostingModel {
    pub n_features: usize,
    /// Prior probability the boosting started from.
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    pub trees: Vec<BoostedTree>,
}

fn default_base_score() -> f64 {
    0.5
}

impl GradientBoostingModel {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.base_score > 0.0 && self.base_score < 1.0) {
            return Err(format!(
                "base_score must lie strictly between 0 and 1, got {}",
                self.base_score
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }

    /// Raw log-odds before the sigmoid.
    pub fn margin(&self, features: &[f64]) -> Result<f64> {
        check_width(self.n_features, features)?;
        let boosted: f64 = self.trees.iter().map(|t| t.leaf_score(features)).sum();
        Ok(logit(self.base_score) + boosted)
    }
}

impl Classifier for GradientBoostingModel {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_label(&self, features: &[f64]) -> Result<u8> {
        Ok(u8::from(self.predict_probability(features)? > 0.5))
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64> {
        Ok(sigmoid(self.margin(features)?))
    }
}
