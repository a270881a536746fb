use crate::utils::error::{AppError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Supported values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Range check for user-submitted form values. Same rule as
/// [`validate_range`] but reported as an input error.
pub fn validate_input_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AppError::InvalidInputError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_choice(field_name: &str, value: i64, choices: &[i64]) -> Result<()> {
    if !choices.contains(&value) {
        let listed: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
        return Err(AppError::InvalidInputError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("must be one of {}", listed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("artifacts.dir", "./artifacts").is_ok());
        assert!(validate_path("artifacts.dir", "").is_err());
        assert!(validate_path("artifacts.dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("server.port", 8501u16, 1, u16::MAX).is_ok());
        assert!(validate_range("server.port", 0u16, 1, u16::MAX).is_err());
    }

    #[test]
    fn test_validate_input_range_reports_input_error() {
        let err = validate_input_range("Age", 130, 1, 120).unwrap_err();
        assert!(matches!(err, AppError::InvalidInputError { .. }));
        assert!(validate_input_range("ST depression", 10.0, 0.0, 10.0).is_ok());
    }

    #[test]
    fn test_validate_choice() {
        assert!(validate_choice("Sex", 1, &[0, 1]).is_ok());
        let err = validate_choice("Sex", 2, &[0, 1]).unwrap_err();
        assert!(err.to_string().contains("must be one of 0, 1"));
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("logging.format", "json", &["pretty", "json"]).is_ok());
        assert!(validate_one_of("logging.format", "xml", &["pretty", "json"]).is_err());
    }
}
