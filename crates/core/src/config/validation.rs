use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

/// Trait for validating configuration values
pub trait ConfigValidator<T: ?Sized> {
    /// Validate a configuration value
    fn validate(&self, value: &T) -> Result<(), ConfigError>;
}

/// Accepts `major.minor[.patch][-pre]` version strings
pub struct VersionValidator {
    pub field: &'static str,
}

impl ConfigValidator<str> for VersionValidator {
    fn validate(&self, value: &str) -> Result<(), ConfigError> {
        super::parse_version(value)
            .map(|_| ())
            .map_err(|_| ConfigError::invalid_value(self.field, value, "a version like 8.0.0"))
    }
}

/// Log levels understood by the tracing filter
pub struct LogLevelValidator;

impl ConfigValidator<str> for LogLevelValidator {
    fn validate(&self, value: &str) -> Result<(), ConfigError> {
        match value.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::invalid_value(
                "logging.level",
                value,
                "trace, debug, info, warn, or error",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_validator() {
        let validator = VersionValidator { field: "runtime.minimum_version" };
        assert!(validator.validate("8.0.0").is_ok());
        assert!(validator.validate("8.1").is_ok());
        assert!(validator.validate("eight").is_err());
    }

    #[test]
    fn test_log_level_validator() {
        assert!(LogLevelValidator.validate("DEBUG").is_ok());
        assert!(LogLevelValidator.validate("verbose").is_err());
    }
}
