use crate::app::form::validate_record;
use crate::config::toml_config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::domain::model::{ClinicalRecord, ModelSelector};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "heart-risk")]
#[command(about = "Heart disease risk prediction service")]
pub struct CliConfig {
    /// TOML configuration file; defaults apply when it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Override `[artifacts] dir`.
    #[arg(long)]
    pub artifacts_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the web application.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Override `[dataset] path`.
        #[arg(long)]
        dataset: Option<String>,
    },
    /// Score a single record and print the risk banner.
    Predict(PredictArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    /// XGBoost, Random Forest or Logistic Regression
    #[arg(long, default_value = "XGBoost")]
    pub model: String,
    #[arg(long, default_value_t = 50)]
    pub age: i64,
    #[arg(long, default_value_t = 0)]
    pub sex: i64,
    #[arg(long, default_value_t = 0)]
    pub chest_pain_type: i64,
    #[arg(long, default_value_t = 120)]
    pub blood_pressure: i64,
    #[arg(long, default_value_t = 200)]
    pub cholesterol: i64,
    #[arg(long, default_value_t = 0)]
    pub fasting_blood_sugar: i64,
    #[arg(long, default_value_t = 0)]
    pub ekg_result: i64,
    #[arg(long, default_value_t = 150)]
    pub max_heart_rate: i64,
    #[arg(long, default_value_t = 0)]
    pub exercise_angina: i64,
    #[arg(long, default_value_t = 1.0)]
    pub st_depression: f64,
    #[arg(long, default_value_t = 0)]
    pub st_slope: i64,
    #[arg(long, default_value_t = 0)]
    pub vessel_count: i64,
    #[arg(long, default_value_t = 0)]
    pub thallium: i64,
}

impl PredictArgs {
    /// Selector and record, range-checked like the web form.
    pub fn to_request(&self) -> Result<(ModelSelector, ClinicalRecord)> {
        let selector: ModelSelector = self.model.parse()?;
        let record = ClinicalRecord {
            age: self.age,
            sex: self.sex,
            chest_pain_type: self.chest_pain_type,
            blood_pressure: self.blood_pressure,
            cholesterol: self.cholesterol,
            fasting_blood_sugar: self.fasting_blood_sugar,
            ekg_result: self.ekg_result,
            max_heart_rate: self.max_heart_rate,
            exercise_angina: self.exercise_angina,
            st_depression: self.st_depression,
            st_slope: self.st_slope,
            vessel_count: self.vessel_count,
            thallium: self.thallium,
        };
        validate_record(&record)?;
        Ok((selector, record))
    }
}

impl CliConfig {
    /// Command line flags take precedence over file values.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.artifacts_dir {
            config.artifacts.dir = dir.clone();
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if let Command::Serve {
            host,
            port,
            dataset,
        } = &self.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(dataset) = dataset {
                config.dataset.path = dataset.clone();
            }
        }
    }
}
