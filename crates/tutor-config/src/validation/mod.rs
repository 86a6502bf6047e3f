//! Full configuration validation.
//!
//! Checks numeric ranges and required strings, collecting every problem
//! into a single `ConfigError`.

mod helpers;


use crate::schema::TutorConfig;
use tutor_common::ConfigError;

use helpers::{validate_non_empty, validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TutorConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_server(&mut errors, config);
    validate_model(&mut errors, config);
    validate_tutor(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_server(errors: &mut Vec<String>, config: &TutorConfig) {
    validate_non_empty(errors, "server.host", &config.server.host);
    if config.server.port == 0 {
        errors.push("server.port must not be 0".into());
    }
    validate_range(
        errors,
        "server.session_ttl_secs",
        config.server.session_ttl_secs,
        60,
        86_400,
    );
}

fn validate_model(errors: &mut Vec<String>, config: &TutorConfig) {
    validate_non_empty(errors, "model.name", &config.model.name);
    validate_range_f64(errors, "model.temperature", config.model.temperature, 0.0, 2.0);
    validate_range(
        errors,
        "model.max_tokens",
        u64::from(config.model.max_tokens),
        1,
        8192,
    );
    validate_range(
        errors,
        "model.request_timeout_secs",
        config.model.request_timeout_secs,
        5,
        600,
    );
}

fn validate_tutor(errors: &mut Vec<String>, config: &TutorConfig) {
    validate_non_empty(errors, "tutor.subject", &config.tutor.subject);
    validate_non_empty(errors, "tutor.title", &config.tutor.title);
}
