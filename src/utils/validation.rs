use crate::utils::error::{Result, SchedulerError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SchedulerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SchedulerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SchedulerError::invalid_argument(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| SchedulerError::invalid_argument(field_name, value, "Value cannot be negative"))
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SchedulerError::invalid_argument(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("config", "./hospital.toml").is_ok());
        assert!(validate_path("config", "").is_err());
        assert!(validate_path("config", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "Ada").is_ok());
        assert!(validate_non_empty_string("name", "").is_err());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert_eq!(validate_non_negative("release_count", 3).unwrap(), 3);
        assert_eq!(validate_non_negative("release_count", 0).unwrap(), 0);
        assert!(matches!(
            validate_non_negative("release_count", -1),
            Err(SchedulerError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("severity", 5, 1, 10).is_ok());
        assert!(validate_range("severity", 1, 1, 10).is_ok());
        assert!(validate_range("severity", 10, 1, 10).is_ok());
        assert!(validate_range("severity", 0, 1, 10).is_err());
        assert!(validate_range("severity", 11, 1, 10).is_err());
    }
}
