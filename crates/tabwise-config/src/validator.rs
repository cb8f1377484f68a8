//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_retry(config, &mut result);
        Self::validate_local(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_retry(config: &Config, result: &mut ValidationResult) {
        let schedules = [
            (
                "retry.provider",
                config.retry.provider.max_attempts,
                config.retry.provider.base_delay_ms,
            ),
            (
                "retry.group",
                config.retry.group.max_attempts,
                config.retry.group.base_delay_ms,
            ),
        ];

        for (path, max_attempts, base_delay_ms) in schedules {
            if max_attempts == 0 {
                result.add_error(ValidationError::new(
                    format!("{path}.max_attempts"),
                    "max_attempts must be at least 1",
                ));
            }
            if max_attempts > 10 {
                result.add_warning(ValidationWarning::new(
                    format!("{path}.max_attempts"),
                    "max_attempts is very high (>10), failures will take long to surface",
                ));
            }
            if base_delay_ms == 0 {
                result.add_warning(ValidationWarning::new(
                    format!("{path}.base_delay_ms"),
                    "base_delay_ms is 0, retries will not back off",
                ));
            }
        }
    }

    fn validate_local(config: &Config, result: &mut ValidationResult) {
        if config.local.reachability_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "local.reachability_timeout_ms",
                "reachability_timeout_ms must be greater than 0",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, LOG_LEVELS
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
