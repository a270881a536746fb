//! Predict form: widget definitions and conversion of submitted values into a
//! [`ClinicalRecord`]. This is the only place input ranges are enforced.

use crate::domain::model::{ClinicalRecord, ModelSelector};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_choice, validate_input_range};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget {
    Integer { min: i64, max: i64 },
    Float { min: f64, max: f64, step: f64 },
    Choice { options: &'static [i64] },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormField {
    /// Form parameter name.
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
}

pub const AGE: FormField = FormField {
    name: "age",
    label: "Age",
    widget: Widget::Integer { min: 1, max: 120 },
};
pub const SEX: FormField = FormField {
    name: "sex",
    label: "Sex (0: Female, 1: Male)",
    widget: Widget::Choice { options: &[0, 1] },
};
pub const CHEST_PAIN_TYPE: FormField = FormField {
    name: "chest_pain_type",
    label: "Chest Pain Type",
    widget: Widget::Choice {
        options: &[0, 1, 2, 3],
    },
};
pub const BLOOD_PRESSURE: FormField = FormField {
    name: "blood_pressure",
    label: "Blood Pressure (BP)",
    widget: Widget::Integer { min: 50, max: 250 },
};
pub const CHOLESTEROL: FormField = FormField {
    name: "cholesterol",
    label: "Cholesterol",
    widget: Widget::Integer { min: 100, max: 600 },
};
pub const FASTING_BLOOD_SUGAR: FormField = FormField {
    name: "fasting_blood_sugar",
    label: "FBS Over 120 (0: No, 1: Yes)",
    widget: Widget::Choice { options: &[0, 1] },
};
pub const EKG_RESULT: FormField = FormField {
    name: "ekg_result",
    label: "EKG Results",
    widget: Widget::Choice { options: &[0, 1, 2] },
};
pub const MAX_HEART_RATE: FormField = FormField {
    name: "max_heart_rate",
    label: "Max Heart Rate Achieved",
    widget: Widget::Integer { min: 60, max: 250 },
};
pub const EXERCISE_ANGINA: FormField = FormField {
    name: "exercise_angina",
    label: "Exercise Angina (0: No, 1: Yes)",
    widget: Widget::Choice { options: &[0, 1] },
};
pub const ST_DEPRESSION: FormField = FormField {
    name: "st_depression",
    label: "ST Depression",
    widget: Widget::Float {
        min: 0.0,
        max: 10.0,
        step: 0.1,
    },
};
pub const ST_SLOPE: FormField = FormField {
    name: "st_slope",
    label: "Slope of ST",
    widget: Widget::Choice { options: &[0, 1, 2] },
};
pub const VESSEL_COUNT: FormField = FormField {
    name: "vessel_count",
    label: "Number of Vessels Fluro",
    widget: Widget::Choice {
        options: &[0, 1, 2, 3],
    },
};
pub const THALLIUM: FormField = FormField {
    name: "thallium",
    label: "Thallium",
    widget: Widget::Choice {
        options: &[0, 1, 2, 3],
    },
};

/// All inputs in the order the page shows them.
pub const FIELDS: [FormField; 13] = [
    AGE,
    SEX,
    CHEST_PAIN_TYPE,
    BLOOD_PRESSURE,
    CHOLESTEROL,
    FASTING_BLOOD_SUGAR,
    EKG_RESULT,
    MAX_HEART_RATE,
    EXERCISE_ANGINA,
    ST_DEPRESSION,
    ST_SLOPE,
    VESSEL_COUNT,
    THALLIUM,
];

impl FormField {
    fn check_integer(&self, value: i64) -> Result<i64> {
        match self.widget {
            Widget::Integer { min, max } => validate_input_range(self.label, value, min, max)?,
            Widget::Choice { options } => validate_choice(self.label, value, options)?,
            Widget::Float { min, max, .. } => {
                validate_input_range(self.label, value as f64, min, max)?
            }
        }
        Ok(value)
    }

    fn check_float(&self, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(self.invalid(value.to_string(), "must be a number"));
        }
        match self.widget {
            Widget::Float { min, max, .. } => validate_input_range(self.label, value, min, max)?,
            Widget::Integer { min, max } => {
                validate_input_range(self.label, value, min as f64, max as f64)?
            }
            Widget::Choice { .. } => {
                return Err(self.invalid(value.to_string(), "must be a whole number"))
            }
        }
        Ok(value)
    }

    fn parse_integer(&self, raw: &str) -> Result<i64> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| self.invalid(raw, "must be a whole number"))?;
        self.check_integer(value)
    }

    fn parse_float(&self, raw: &str) -> Result<f64> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| self.invalid(raw, "must be a number"))?;
        self.check_float(value)
    }

    fn invalid(&self, value: impl Into<String>, reason: &str) -> AppError {
        AppError::InvalidInputError {
            field: self.label.to_string(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Check every field of an already-typed record against the widget ranges.
pub fn validate_record(record: &ClinicalRecord) -> Result<()> {
    AGE.check_integer(record.age)?;
    SEX.check_integer(record.sex)?;
    CHEST_PAIN_TYPE.check_integer(record.chest_pain_type)?;
    BLOOD_PRESSURE.check_integer(record.blood_pressure)?;
    CHOLESTEROL.check_integer(record.cholesterol)?;
    FASTING_BLOOD_SUGAR.check_integer(record.fasting_blood_sugar)?;
    EKG_RESULT.check_integer(record.ekg_result)?;
    MAX_HEART_RATE.check_integer(record.max_heart_rate)?;
    EXERCISE_ANGINA.check_integer(record.exercise_angina)?;
    ST_DEPRESSION.check_float(record.st_depression)?;
    ST_SLOPE.check_integer(record.st_slope)?;
    VESSEL_COUNT.check_integer(record.vessel_count)?;
    THALLIUM.check_integer(record.thallium)?;
    Ok(())
}

/// Raw submission of the predict form.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictForm {
    pub model: String,
    pub age: String,
    pub sex: String,
    pub chest_pain_type: String,
    pub blood_pressure: String,
    pub cholesterol: String,
    pub fasting_blood_sugar: String,
    pub ekg_result: String,
    pub max_heart_rate: String,
    pub exercise_angina: String,
    pub st_depression: String,
    pub st_slope: String,
    pub vessel_count: String,
    pub thallium: String,
}

impl PredictForm {
    /// Parse and range-check the submission.
    pub fn parse(&self) -> Result<(ModelSelector, ClinicalRecord)> {
        let selector: ModelSelector = self.model.parse()?;
        let record = ClinicalRecord {
            age: AGE.parse_integer(&self.age)?,
            sex: SEX.parse_integer(&self.sex)?,
            chest_pain_type: CHEST_PAIN_TYPE.parse_integer(&self.chest_pain_type)?,
            blood_pressure: BLOOD_PRESSURE.parse_integer(&self.blood_pressure)?,
            cholesterol: CHOLESTEROL.parse_integer(&self.cholesterol)?,
            fasting_blood_sugar: FASTING_BLOOD_SUGAR.parse_integer(&self.fasting_blood_sugar)?,
            ekg_result: EKG_RESULT.parse_integer(&self.ekg_result)?,
            max_heart_rate: MAX_HEART_RATE.parse_integer(&self.max_heart_rate)?,
            exercise_angina: EXERCISE_ANGINA.parse_integer(&self.exercise_angina)?,
            st_depression: ST_DEPRESSION.parse_float(&self.st_depression)?,
            st_slope: ST_SLOPE.parse_integer(&self.st_slope)?,
            vessel_count: VESSEL_COUNT.parse_integer(&self.vessel_count)?,
            thallium: THALLIUM.parse_integer(&self.thallium)?,
        };
        Ok((selector, record))
    }

    /// Submitted value for a field, used to refill the form.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        let value = match name {
            "model" => &self.model,
            "age" => &self.age,
            "sex" => &self.sex,
            "chest_pain_type" => &self.chest_pain_type,
            "blood_pressure" => &self.blood_pressure,
            "cholesterol" => &self.cholesterol,
            "fasting_blood_sugar" => &self.fasting_blood_sugar,
            "ekg_result" => &self.ekg_result,
            "max_heart_rate" => &self.max_heart_rate,
            "exercise_angina" => &self.exercise_angina,
            "st_depression" => &self.st_depression,
            "st_slope" => &self.st_slope,
            "vessel_count" => &self.vessel_count,
            "thallium" => &self.thallium,
            _ => return None,
        };
        Some(value.as_str())
    }
}

impl From<(ModelSelector, &ClinicalRecord)> for PredictForm {
    fn from((selector, record): (ModelSelector, &ClinicalRecord)) -> Self {
        Self {
            model: selector.label().to_string(),
            age: record.age.to_string(),
            sex: record.sex.to_string(),
            chest_pain_type: record.chest_pain_type.to_string(),
            blood_pressure: record.blood_pressure.to_string(),
            cholesterol: record.cholesterol.to_string(),
            fasting_blood_sugar: record.fasting_blood_sugar.to_string(),
            ekg_result: record.ekg_result.to_string(),
            max_heart_rate: record.max_heart_rate.to_string(),
            exercise_angina: record.exercise_angina.to_string(),
            st_depression: format!("{:.1}", record.st_depression),
            st_slope: record.st_slope.to_string(),
            vessel_count: record.vessel_count.to_string(),
            thallium: record.thallium.to_string(),
        }
    }
}

impl Default for PredictForm {
    /// Form as first shown: XGBoost selected, default record values.
    fn default() -> Self {
        Self::from((ModelSelector::XGBoost, &ClinicalRecord::default()))
    }
}
