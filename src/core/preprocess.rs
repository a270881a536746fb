//! Fitted column transformer.
//!
//! Mirrors the layout of a scikit-learn `ColumnTransformer`: each transformer
//! owns a list of input columns, outputs are concatenated in transformer
//! order, and columns no transformer claims are dropped or appended according
//! to `remainder`.

use crate::domain::model::{FeatureFrame, PreprocessedFeatures};
use crate::domain::ports::Preprocessor;
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Remainder {
    #[default]
    Drop,
    Passthrough,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    #[default]
    Error,
    Ignore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnTransform {
    StandardScaler {
        columns: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    OneHot {
        columns: Vec<String>,
        categories: Vec<Vec<f64>>,
        #[serde(default)]
        handle_unknown: HandleUnknown,
    },
    Passthrough {
        columns: Vec<String>,
    },
}

impl ColumnTransform {
    pub fn columns(&self) -> &[String] {
        match self {
            ColumnTransform::StandardScaler { columns, .. }
            | ColumnTransform::OneHot { columns, .. }
            | ColumnTransform::Passthrough { columns } => columns,
        }
    }

    fn output_width(&self) -> usize {
        match self {
            ColumnTransform::OneHot { categories, .. } => categories.iter().map(Vec::len).sum(),
            other => other.columns().len(),
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        match self {
            ColumnTransform::StandardScaler {
                columns,
                mean,
                scale,
            } => {
                if mean.len() != columns.len() || scale.len() != columns.len() {
                    return Err(format!(
                        "standard scaler has {} columns but {} means and {} scales",
                        columns.len(),
                        mean.len(),
                        scale.len()
                    ));
                }
            }
            ColumnTransform::OneHot {
                columns,
                categories,
                ..
            } => {
                if categories.len() != columns.len() {
                    return Err(format!(
                        "one-hot encoder has {} columns but {} category lists",
                        columns.len(),
                        categories.len()
                    ));
                }
            }
            ColumnTransform::Passthrough { .. } => {}
        }
        Ok(())
    }

    fn apply(&self, values: &[f64], out: &mut Vec<f64>) -> Result<()> {
        match self {
            ColumnTransform::StandardScaler { mean, scale, .. } => {
                for ((x, m), s) in values.iter().zip(mean).zip(scale) {
                    // A constant training column is fitted with scale 1.
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    out.push((x - m) / s);
                }
            }
            ColumnTransform::OneHot {
                columns,
                categories,
                handle_unknown,
            } => {
                for ((x, cats), column) in values.iter().zip(categories).zip(columns) {
                    let hit = cats.iter().position(|c| c == x);
                    if hit.is_none() && *handle_unknown == HandleUnknown::Error {
                        return Err(AppError::transform(format!(
                            "unknown category {} in column '{}'",
                            x, column
                        )));
                    }
                    out.extend((0..cats.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
                }
            }
            ColumnTransform::Passthrough { .. } => out.extend_from_slice(values),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTransformer {
    /// Column names seen at fit time, in fit order.
    pub input_columns: Vec<String>,
    pub transformers: Vec<ColumnTransform>,
    #[serde(default)]
    pub remainder: Remainder,
}

impl ColumnTransformer {
    pub fn validate(&self) -> std::result::Result<(), String> {
        let known: HashSet<&str> = self.input_columns.iter().map(String::as_str).collect();
        if known.len() != self.input_columns.len() {
            return Err("input_columns contains duplicates".to_string());
        }

        for transform in &self.transformers {
            transform.validate()?;
            if let Some(column) = transform.columns().iter().find(|c| !known.contains(c.as_str())) {
                return Err(format!(
                    "transformer refers to column '{}' which is not an input column",
                    column
                ));
            }
        }
        Ok(())
    }

    fn remainder_columns(&self) -> Vec<&str> {
        let claimed: HashSet<&str> = self
            .transformers
            .iter()
            .flat_map(|t| t.columns().iter().map(String::as_str))
            .collect();
        self.input_columns
            .iter()
            .map(String::as_str)
            .filter(|c| !claimed.contains(c))
            .collect()
    }

    /// Width of the transformed row.
    pub fn output_width(&self) -> usize {
        let transformed: usize = self.transformers.iter().map(ColumnTransform::output_width).sum();
        match self.remainder {
            Remainder::Drop => transformed,
            Remainder::Passthrough => transformed + self.remainder_columns().len(),
        }
    }

    fn lookup(frame: &FeatureFrame, column: &str) -> Result<f64> {
        frame.get(column).ok_or_else(|| {
            AppError::transform(format!("input is missing column '{}'", column))
        })
    }
}

impl Preprocessor for ColumnTransformer {
    fn input_columns(&self) -> &[String] {
        &self.input_columns
    }

    fn transform(&self, frame: &FeatureFrame) -> Result<PreprocessedFeatures> {
        // Every fitted column must be present, even those the remainder drops.
        for column in &self.input_columns {
            Self::lookup(frame, column)?;
        }

        let mut out = Vec::with_capacity(self.output_width());
        for transform in &self.transformers {
            let values = transform
                .columns()
                .iter()
                .map(|c| Self::lookup(frame, c))
                .collect::<Result<Vec<f64>>>()?;
            transform.apply(&values, &mut out)?;
        }

        if self.remainder == Remainder::Passthrough {
            for column in self.remainder_columns() {
                out.push(Self::lookup(frame, column)?);
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(values: &[(&str, f64)]) -> FeatureFrame {
        FeatureFrame::new(values.iter().map(|(n, v)| (n.to_string(), *v)).collect())
    }

    fn transformer(remainder: Remainder) -> ColumnTransformer {
        ColumnTransformer {
            input_columns: vec!["Age".into(), "Sex".into(), "Thallium".into()],
            transformers: vec![
                ColumnTransform::StandardScaler {
                    columns: vec!["Age".into()],
                    mean: vec![50.0],
                    scale: vec![10.0],
                },
                ColumnTransform::OneHot {
                    columns: vec!["Thallium".into()],
                    categories: vec![vec![0.0, 1.0, 2.0, 3.0]],
                    handle_unknown: HandleUnknown::Ignore,
                },
            ],
            remainder,
        }
    }

    #[test]
    fn test_transform_concatenates_in_transformer_order() {
        let pre = transformer(Remainder::Passthrough);
        pre.validate().unwrap();
        assert_eq!(pre.output_width(), 6);

        let out = pre
            .transform(&frame(&[("Age", 65.0), ("Sex", 1.0), ("Thallium", 2.0)]))
            .unwrap();
        assert_eq!(out, vec![1.5, 0.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_remainder_drop() {
        let pre = transformer(Remainder::Drop);
        let out = pre
            .transform(&frame(&[("Age", 40.0), ("Sex", 1.0), ("Thallium", 0.0)]))
            .unwrap();
        assert_eq!(out, vec![-1.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_column_is_transform_error() {
        let pre = transformer(Remainder::Drop);
        // Sex is dropped by the remainder but still required
        let err = pre
            .transform(&frame(&[("Age", 40.0), ("Thallium", 0.0)]))
            .unwrap_err();
        assert!(matches!(err, AppError::TransformError { ref message } if message.contains("'Sex'")));
    }

    #[test]
    fn test_unknown_category() {
        let ignore = transformer(Remainder::Drop);
        let out = ignore
            .transform(&frame(&[("Age", 50.0), ("Sex", 0.0), ("Thallium", 7.0)]))
            .unwrap();
        assert_eq!(out, vec![0.0, 0.0, 0.0, 0.0, 0.0]);

        let mut strict = transformer(Remainder::Drop);
        if let ColumnTransform::OneHot { handle_unknown, .. } = &mut strict.transformers[1] {
            *handle_unknown = HandleUnknown::Error;
        }
        assert!(strict
            .transform(&frame(&[("Age", 50.0), ("Sex", 0.0), ("Thallium", 7.0)]))
            .is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_column() {
        let mut pre = transformer(Remainder::Drop);
        pre.transformers.push(ColumnTransform::Passthrough {
            columns: vec!["chest pain type".into()],
        });
        assert!(pre.validate().is_err());
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "input_columns": ["BP", "Max HR"],
            "transformers": [
                {"type": "standard_scaler", "columns": ["BP"], "mean": [130.0], "scale": [0.0]}
            ],
            "remainder": "passthrough"
        }"#;
        let pre: ColumnTransformer = serde_json::from_str(json).unwrap();
        let out = pre
            .transform(&frame(&[("BP", 140.0), ("Max HR", 150.0)]))
            .unwrap();
        assert_eq!(out, vec![10.0, 150.0]);
    }
}
