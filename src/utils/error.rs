use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load artifact '{name}': {reason}")]
    ArtifactLoadError { name: String, reason: String },

    #[error("Unknown model '{name}'")]
    UnknownModelError { name: String },

    #[error("Feature transform failed: {message}")]
    TransformError { message: String },

    #[error("Failed to load dataset '{path}': {reason}")]
    DataLoadError { path: String, reason: String },

    #[error("Metric computation failed: {message}")]
    MetricError { message: String },

    #[error("Invalid input for {field}: {value} ({reason})")]
    InvalidInputError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Artifact,
    Model,
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn artifact_load(name: impl Into<String>, reason: impl ToString) -> Self {
        AppError::ArtifactLoadError {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn transform(message: impl Into<String>) -> Self {
        AppError::TransformError {
            message: message.into(),
        }
    }

    pub fn data_load(path: impl Into<String>, reason: impl ToString) -> Self {
        AppError::DataLoadError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ArtifactLoadError { .. } => ErrorCategory::Artifact,
            AppError::UnknownModelError { .. } | AppError::TransformError { .. } => {
                ErrorCategory::Model
            }
            AppError::InvalidInputError { .. } => ErrorCategory::Input,
            AppError::DataLoadError { .. } | AppError::MetricError { .. } => ErrorCategory::Data,
            AppError::ConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            AppError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::InvalidInputError { .. } | AppError::UnknownModelError { .. } => {
                ErrorSeverity::Low
            }
            AppError::DataLoadError { .. } | AppError::MetricError { .. } => ErrorSeverity::Medium,
            AppError::ArtifactLoadError { .. }
            | AppError::TransformError { .. }
            | AppError::ConfigError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            AppError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Whether the error was caused by what the user submitted rather than
    /// by the deployment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidInputError { .. } | AppError::UnknownModelError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::ArtifactLoadError { name, .. } => {
                format!("The model file '{}' could not be loaded.", name)
            }
            AppError::UnknownModelError { name } => format!(
                "'{}' is not an available model. Choose XGBoost, Random Forest or Logistic Regression.",
                name
            ),
            AppError::TransformError { .. } => {
                "The inputs could not be prepared for the selected model.".to_string()
            }
            AppError::DataLoadError { path, .. } => {
                format!("The dataset '{}' could not be read.", path)
            }
            AppError::MetricError { .. } => {
                "The saved evaluation arrays do not line up with each other.".to_string()
            }
            AppError::InvalidInputError { field, reason, .. } => {
                format!("Please check '{}': {}.", field, reason)
            }
            AppError::ConfigError { message } => format!("Configuration problem: {}", message),
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("The configuration value '{}' is invalid: {}", field, reason)
            }
            AppError::IoError(_) => "A file system operation failed.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Artifact => {
                "Check that the artifact directory contains the exported model and preprocessor files"
            }
            ErrorCategory::Model => {
                "Make sure the preprocessor and models were exported from the same training run"
            }
            ErrorCategory::Input => "Correct the highlighted value and submit again",
            ErrorCategory::Data => "Check that the dataset path points to a CSV file with a header row",
            ErrorCategory::Configuration => "Review heart-risk.toml and the command line flags",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
