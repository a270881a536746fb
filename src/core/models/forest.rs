//! Random forest of CART decision trees.
//!
//! Trees use the flat array layout of a fitted scikit-learn `tree_`: node `i`
//! is a leaf when `children_left[i] == -1`, otherwise the sample goes left
//! when `x[feature[i]] <= threshold[i]`. `value[i]` holds the class weights
//! seen at node `i`.

use crate::core::models::{check_width, LEAF};
use crate::domain::ports::Classifier;
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> std::result::Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("tree node arrays differ in length".to_string());
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                if self.value[node].len() != n_classes {
                    return Err(format!(
                        "leaf {} has {} class weights, expected {}",
                        node,
                        self.value[node].len(),
                        n_classes
                    ));
                }
                if self.value[node].iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(format!(
                        "leaf {} class weights must be finite and non-negative",
                        node
                    ));
                }
                continue;
            }
            for child in [left, right] {
                if child <= node as i64 || child as usize >= n {
                    return Err(format!("node {} has invalid child {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {} splits on unknown feature {}", node, feature));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {} has a NaN threshold", node));
            }
        }
        Ok(())
    }

    /// Normalized class distribution at the leaf reached by `features`.
    fn leaf_distribution(&self, features: &[f64]) -> Vec<f64> {
        let mut node = 0usize;
        // Children always have larger indices, so this terminates.
        while self.children_left[node] != LEAF {
            let x = features[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        let weights = &self.value[node];
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![1.0 / weights.len() as f64; weights.len()]
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestModel {
    pub n_features: usize,
    #[serde(default = "default_n_classes")]
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

fn default_n_classes() -> usize {
    2
}

impl RandomForestModel {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.n_classes != 2 {
            return Err(format!(
                "expected a binary classifier, found {} classes",
                self.n_classes
            ));
        }
        if self.trees.is_empty() {
            return Err("random forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.n_classes)
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }

    /// Mean of the per-tree leaf distributions.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        check_width(self.n_features, features)?;
        if self.trees.is_empty() {
            return Err(AppError::transform("random forest has no trees"));
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.leaf_distribution(features)) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }
}

impl Classifier for RandomForestModel {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_label(&self, features: &[f64]) -> Result<u8> {
        let proba = self.predict_proba(features)?;
        // First maximum wins, so a tie resolves to class 0.
        let best = proba
            .iter()
            .enumerate()
            .fold((0usize, f64::MIN), |best, (i, &p)| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            });
        Ok(u8::from(best.0 == 1))
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64> {
        Ok(self.predict_proba(features)?[1])
    }
}
