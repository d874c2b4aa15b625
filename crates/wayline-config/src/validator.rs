//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Header the root workflow name travels in; other header keys must differ.
const ROOT_WORKFLOW_NAME_HEADER: &str = "root_workflow_name";

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

    /// First error as a [`ConfigError`], if any.
    pub fn into_error(self) -> Option<ConfigError> {
        self.errors
            .into_iter()
            .next()
            .map(|e| ConfigError::InvalidValue {
                field: e.path,
                message: e.message,
            })
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

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_logging(config, &mut result);
        Self::validate_interceptors(config, &mut result);
        result
    }

    /// Accepts `level` or comma separated `target=level` directives.
    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.trim();
        if level.is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "Log level cannot be empty",
            ));
            return;
        }

        for directive in level.split(',').map(str::trim) {
            let lvl = directive.rsplit('=').next().unwrap_or(directive);
            let known = LEVELS.iter().any(|l| l.eq_ignore_ascii_case(lvl));
            // A bare word that is not a level is a target filter.
            if !known && directive.contains('=') {
                result.add_error(ValidationError::new(
                    "logging.level",
                    format!("Unknown log level '{}', valid values: {:?}", lvl, LEVELS),
                ));
            }
        }
    }

    fn validate_interceptors(config: &Config, result: &mut ValidationResult) {
        let interceptors = &config.interceptors;

        if interceptors.node_id_header_key.trim().is_empty() {
            result.add_error(ValidationError::new(
                "interceptors.node_id_header_key",
                "Header key cannot be empty",
            ));
        }

        if interceptors.node_id
            && interceptors.root_workflow_name
            && interceptors.node_id_header_key == ROOT_WORKFLOW_NAME_HEADER
        {
            result.add_error(ValidationError::new(
                "interceptors.node_id_header_key",
                format!(
                    "Header key '{}' collides with the root workflow name header",
                    ROOT_WORKFLOW_NAME_HEADER
                ),
            ));
        }

        if !interceptors.metadata_context && !interceptors.root_workflow_name && !interceptors.node_id
        {
            result.add_warning(ValidationWarning::new(
                "interceptors",
                "All interceptors are disabled, nothing will be propagated",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
