//! Error formatting utilities
//!
//! Human-readable and structured renderings of [`Error`] for the CLI
//! report and for log lines.

use crate::Error;
use std::error::Error as StdError;

/// Format error for display, appending nested causes.
pub fn format_error(error: &Error) -> String {
    let formatted = match error {
        Error::Assertion {
            case,
            expected,
            actual,
        } => format!(
            "{}: expected {} but received {}",
            case, expected, actual
        ),

        Error::Config { field, message } => {
            format!("Configuration error in {}: {}", field, message)
        }

        // For standard errors, use their Display implementation
        _ => error.to_string(),
    };

    append_causes(formatted, error.source())
}

/// Display text of `error` followed by every nested cause not already
/// contained in it
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    append_causes(error.to_string(), error.source())
}

fn append_causes(mut result: String, mut source: Option<&(dyn StdError + 'static)>) -> String {
    while let Some(cause) = source {
        let text = cause.to_string();
        if !result.contains(&text) {
            result = format!("{} (caused by {})", result, text);
        }
        source = cause.source();
    }
    result
}

/// Format error for logging with structured data
pub fn format_error_for_logging(error: &Error) -> serde_json::Value {
    let mut log_data = serde_json::json!({
        "message": format_error(error),
        "category": error.category(),
        "transient": error.is_transient(),
    });

    match error {
        Error::Contract {
            contract_id,
            method,
            ..
        } => {
            log_data["contract_id"] = serde_json::Value::String(contract_id.clone());
            log_data["method"] = serde_json::Value::String(method.clone());
        }
        Error::Assertion { case, .. } => {
            log_data["case"] = serde_json::Value::String(case.clone());
        }
        _ => {}
    }

    log_data
}
