//! Training dataset used by the visualization page.

use crate::utils::error::{AppError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column that holds the class label after loading.
pub const TARGET_COLUMN: &str = "target";

/// Header the label column carries in the raw CSV.
const RAW_TARGET_COLUMN: &str = "Heart Disease";

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassShare {
    pub class: String,
    pub count: usize,
    /// Share of rows, rounded to two decimals.
    pub percent: f64,
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let file = File::open(path).map_err(|e| AppError::data_load(label.clone(), e))?;

        let dataset = Self::from_reader(file, &label)?;
        tracing::debug!(
            path = %label,
            rows = dataset.len(),
            columns = dataset.columns.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Parse CSV with a header row. `source` names the input in errors.
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| AppError::data_load(source, e))?
            .clone();
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(AppError::data_load(source, "missing header row"));
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| AppError::data_load(source, e))?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }

        Ok(Self {
            columns: normalize_columns(headers.iter()),
            rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// First `n` rows (fewer if the dataset is shorter).
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Column parsed as numbers, skipping empty cells. `None` if the column
    /// does not exist or holds any non-numeric value.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)?
            .into_iter()
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.parse::<f64>().ok())
            .collect()
    }

    /// Occurrences of each distinct non-empty value, most frequent first.
    /// Equal counts keep first-appearance order.
    pub fn value_counts(&self, name: &str) -> Option<Vec<(String, usize)>> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();

        for cell in self.column(name)? {
            if cell.is_empty() {
                continue;
            }
            let count = counts.entry(cell).or_insert(0);
            if *count == 0 {
                order.push(cell.to_string());
            }
            *count += 1;
        }

        let mut result: Vec<(String, usize)> = order
            .into_iter()
            .map(|value| {
                let count = counts[value.as_str()];
                (value, count)
            })
            .collect();
        // stable sort keeps first appearance among ties
        result.sort_by(|a, b| b.1.cmp(&a.1));
        Some(result)
    }

    /// Percentage breakdown of the target column.
    pub fn class_distribution(&self) -> Option<Vec<ClassShare>> {
        let counts = self.value_counts(TARGET_COLUMN)?;
        let total: usize = counts.iter().map(|(_, c)| c).sum();

        Some(
            counts
                .into_iter()
                .map(|(class, count)| ClassShare {
                    percent: round2(count as f64 / total as f64 * 100.0),
                    class,
                    count,
                })
                .collect(),
        )
    }
}

/// Trim header whitespace and give the label column its canonical name.
pub fn normalize_columns<'a>(headers: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    headers
        .into_iter()
        .map(|h| {
            let trimmed = h.trim();
            if trimmed == RAW_TARGET_COLUMN {
                TARGET_COLUMN.to_string()
            } else {
                trimmed.to_string()
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
