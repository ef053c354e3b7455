use serde::Serialize;
use serde_json::Value;

use crate::{GleanerError, Result};

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Convert any report (analysis, search, metadata, list items) to a JSON value
pub fn to_json_value<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Convert any report to a JSON string
pub fn to_json_string<T: Serialize>(value: &T, config: &JsonConfig) -> Result<String> {
    if config.pretty { Ok(serde_json::to_string_pretty(value)?) } else { Ok(serde_json::to_string(value)?) }
}

/// `{"error": "<message>"}` for an error
pub fn error_to_json(err: &GleanerError) -> Value {
    serde_json::json!({ "error": err.to_string() })
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        to_json_string(value, &self.config)
    }

    /// Formats an operation outcome, rendering errors as an `error` object.
    pub fn format_result<T: Serialize>(&self, result: &Result<T>) -> Result<String> {
        match result {
            Ok(value) => self.format(value),
            Err(err) => self.format(&error_to_json(err)),
        }
    }
}
