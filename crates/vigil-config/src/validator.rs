//! Configuration validation.

use std::collections::HashSet;

use crate::error::ConfigError;
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

    /// Collapse into the first error, if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
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

        Self::validate_node(config, &mut result);
        Self::validate_monitor(config, &mut result);
        Self::validate_monitors(config, &mut result);
        Self::validate_notifications(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_node(config: &Config, result: &mut ValidationResult) {
        let node = &config.node;
        for (field, value) in [
            ("node.node_id", &node.node_id),
            ("node.node_group_id", &node.node_group_id),
            ("node.external_id", &node.external_id),
        ] {
            if value.trim().is_empty() {
                result.add_error(ValidationError::new(field, "must not be empty"));
            }
        }
    }

    fn validate_monitor(config: &Config, result: &mut ValidationResult) {
        if config.monitor.interval_secs == 0 {
            result.add_error(ValidationError::new(
                "monitor.interval_secs",
                "interval_secs must be greater than 0",
            ));
        }

        if config.monitor.lock_name.trim().is_empty() {
            result.add_error(ValidationError::new(
                "monitor.lock_name",
                "lock_name must not be empty",
            ));
        }
    }

    fn validate_monitors(config: &Config, result: &mut ValidationResult) {
        let node = &config.node;
        let mut seen = HashSet::new();

        for (i, monitor) in config.monitors.iter().enumerate() {
            let path = format!("monitors[{}]", i);

            if monitor.monitor_id.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.monitor_id", path),
                    "monitor_id must not be empty",
                ));
            } else if !seen.insert(monitor.monitor_id.as_str()) {
                result.add_error(ValidationError::new(
                    format!("{}.monitor_id", path),
                    format!("Duplicate monitor id '{}'", monitor.monitor_id),
                ));
            }

            if monitor.monitor_type.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.type", path),
                    "type must not be empty",
                ));
            }

            if !monitor.applies_to(&node.node_group_id, &node.external_id) {
                result.add_warning(ValidationWarning::new(
                    &path,
                    format!(
                        "Monitor '{}' is scoped to {}/{} and will not run on this node",
                        monitor.monitor_id, monitor.node_group_id, monitor.external_id
                    ),
                ));
            }
        }
    }

    fn validate_notifications(config: &Config, result: &mut ValidationResult) {
        let mut seen = HashSet::new();

        for (i, notification) in config.notifications.iter().enumerate() {
            let path = format!("notifications[{}]", i);

            if notification.notification_id.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.notification_id", path),
                    "notification_id must not be empty",
                ));
            } else if !seen.insert(notification.notification_id.as_str()) {
                result.add_error(ValidationError::new(
                    format!("{}.notification_id", path),
                    format!(
                        "Duplicate notification id '{}'",
                        notification.notification_id
                    ),
                ));
            }

            if notification.notification_type == "webhook" {
                match notification.expression.as_deref() {
                    Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                    _ => result.add_error(ValidationError::new(
                        format!("{}.expression", path),
                        "webhook expression must be an http:// or https:// URL",
                    )),
                }
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) && !level.contains('=') {
            result.add_warning(ValidationWarning::new(
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
