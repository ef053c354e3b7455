pub mod json;
pub mod text;

pub use json::{JsonConfig, JsonFormatter, error_to_json, to_json_string, to_json_value};
pub use text::{TextConfig, TextFormatter, analysis_to_text, search_to_text};
