//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.anonymous_name must not be empty")]
    EmptyAnonymousName,
    #[error("limits.max_line_length must be at least 1")]
    ZeroLineLength,
    #[error("limits.max_name_length must be at least 1")]
    ZeroNameLength,
    #[error("limits.max_name_length ({name}) exceeds limits.max_line_length ({line})")]
    NameLongerThanLine { name: usize, line: usize },
    #[error("limits.outbound_queue must be at least 1")]
    ZeroOutboundQueue,
    #[error("timeouts.identify must be at least 1 second")]
    ZeroIdentifyTimeout,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.anonymous_name.trim().is_empty() {
        errors.push(ValidationError::EmptyAnonymousName);
    }

    let limits = &config.limits;
    if limits.max_line_length == 0 {
        errors.push(ValidationError::ZeroLineLength);
    }
    if limits.max_name_length == 0 {
        errors.push(ValidationError::ZeroNameLength);
    } else if limits.max_line_length > 0 && limits.max_name_length > limits.max_line_length {
        errors.push(ValidationError::NameLongerThanLine {
            name: limits.max_name_length,
            line: limits.max_line_length,
        });
    }
    // tokio's bounded channel panics on a zero capacity.
    if limits.outbound_queue == 0 {
        errors.push(ValidationError::ZeroOutboundQueue);
    }

    if config.timeouts.identify == 0 {
        errors.push(ValidationError::ZeroIdentifyTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
