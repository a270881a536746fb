//! Shared fixtures: a complete artifact directory and dataset CSVs.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Preprocessor output width: 5 scaled + 4 one-hot + 7 passthrough.
pub const FEATURE_WIDTH: usize = 16;

pub const DATASET_CSV: &str = "\
 Age ,Sex,Chest pain type,BP,Cholesterol,FBS over 120,EKG results,Max HR,Exercise angina,ST depression,Slope of ST,Number of vessels fluro,Thallium,Heart Disease
70,1,4,130,322,0,2,109,0,2.4,2,3,3,Presence
67,0,3,115,564,0,2,160,0,1.6,2,0,7,Absence
57,1,2,124,261,0,0,141,0,0.3,1,0,7,Presence
64,1,4,128,263,0,0,105,1,0.2,2,1,7,Absence
74,0,2,120,269,0,2,121,1,0.2,1,1,3,Absence
65,1,4,120,177,0,0,140,0,0.4,1,0,7,Absence
56,1,3,130,256,1,2,142,1,0.6,2,1,6,Presence
59,1,4,110,239,0,2,142,1,1.2,2,1,7,Presence
60,1,4,140,293,0,2,170,0,1.2,2,2,7,Presence
63,0,4,150,407,0,2,154,0,4.0,2,3,7,Presence
59,1,4,135,234,0,0,161,0,0.5,2,0,7,Absence
53,1,4,142,226,0,2,111,1,0.0,1,0,7,Absence
";

pub const NO_TARGET_CSV: &str = "\
Age,BP
50,120
61,135
44,118
";

pub fn preprocessor() -> Value {
    json!({
        "kind": "preprocessor",
        "input_columns": [
            "Age", "Sex", "Chest pain type", "BP", "Cholesterol", "FBS over 120",
            "EKG results", "Max HR", "Exercise angina", "ST depression",
            "Slope of ST", "Number of vessels fluro", "Thallium"
        ],
        "transformers": [
            {
                "type": "standard_scaler",
                "columns": ["Age", "BP", "Cholesterol", "Max HR", "ST depression"],
                "mean": [50.0, 120.0, 200.0, 150.0, 1.0],
                "scale": [10.0, 20.0, 50.0, 25.0, 1.0]
            },
            {
                "type": "one_hot",
                "columns": ["Chest pain type"],
                "categories": [[0.0, 1.0, 2.0, 3.0]],
                "handle_unknown": "ignore"
            }
        ],
        "remainder": "passthrough"
    })
}

pub fn logistic_model() -> Value {
    json!({
        "kind": "logistic_regression",
        "coefficients": [0.5, 0.3, 0.2, -0.4, 0.6, -0.5, 0.2, 0.4, 0.6, 0.8, 0.3, 0.4, 0.7, 0.3, 0.5, 0.4],
        "intercept": -0.2
    })
}

/// Splits on scaled age: at or below 55 years mostly healthy.
pub fn random_forest_model() -> Value {
    json!({
        "kind": "random_forest",
        "n_features": FEATURE_WIDTH,
        "n_classes": 2,
        "trees": [{
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [0, -2, -2],
            "threshold": [0.5, -2.0, -2.0],
            "value": [[9.0, 11.0], [8.0, 2.0], [1.0, 9.0]]
        }]
    })
}

/// Splits on scaled ST depression: below 2.0 lowers the margin.
pub fn xgboost_model() -> Value {
    json!({
        "kind": "gradient_boosting",
        "n_features": FEATURE_WIDTH,
        "base_score": 0.5,
        "trees": [{
            "left": [1, -1, -1],
            "right": [2, -1, -1],
            "split_feature": [4, 0, 0],
            "split_condition": [1.0, 0.0, 0.0],
            "default_left": [true, false, false],
            "leaf_value": [0.0, -0.8, 1.2]
        }]
    })
}

pub fn array(values: &[f64]) -> Value {
    json!({ "kind": "array", "values": values })
}

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    /// Every artifact plus the labelled dataset.
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        fs::create_dir_all(fixture.artifacts_dir()).unwrap();

        fixture.write_artifact("preprocessor", &preprocessor());
        fixture.write_artifact("logistic_model", &logistic_model());
        fixture.write_artifact("random_forest_model", &random_forest_model());
        fixture.write_artifact("xgboost_model", &xgboost_model());
        fixture.write_artifact("y_test", &array(&[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0]));
        fixture.write_artifact(
            "y_prob_xgb",
            &array(&[0.1, 0.3, 0.8, 0.9, 0.2, 0.7, 0.6, 0.4]),
        );
        fixture.write_artifact(
            "y_prob_rf",
            &array(&[0.2, 0.6, 0.7, 0.8, 0.3, 0.4, 0.9, 0.1]),
        );
        fixture.write_artifact(
            "y_prob_log",
            &array(&[0.4, 0.5, 0.6, 0.3, 0.2, 0.7, 0.8, 0.6]),
        );
        fixture.write_dataset(DATASET_CSV);
        fixture
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.dir.path().join("artifacts")
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.dir.path().join("dataset.csv")
    }

    pub fn write_artifact(&self, name: &str, value: &Value) {
        write_json(&self.artifacts_dir(), name, value);
    }

    pub fn write_raw_artifact(&self, name: &str, content: &str) {
        fs::write(self.artifacts_dir().join(format!("{}.json", name)), content).unwrap();
    }

    pub fn remove_artifact(&self, name: &str) {
        fs::remove_file(self.artifacts_dir().join(format!("{}.json", name))).unwrap();
    }

    pub fn write_dataset(&self, csv: &str) {
        fs::write(self.dataset_path(), csv).unwrap();
    }
}

fn write_json(dir: &Path, name: &str, value: &Value) {
    let content = serde_json::to_string_pretty(value).unwrap();
    fs::write(dir.join(format!("{}.json", name)), content).unwrap();
}
