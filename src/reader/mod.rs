//! Reads raw definition documents into fault-tolerant [`WorkflowDef`]s.
//!
//! Parsing turns YAML/JSON/TOML text into a [`serde_json::Value`]; every
//! field read afterwards is a supplier handed to the entity builders, so a
//! bad field costs only that field.
//!
//! [`WorkflowDef`]: crate::def::WorkflowDef

pub mod config;
pub mod fields;
mod workflow;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ReadError, ReadResult};

pub use config::ReaderConfig;
pub use fields::Fields;
pub use workflow::{read_workflow, read_workflow_file, read_workflow_value};

/// Supported definition input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefFormat {
    /// YAML format (`.yaml` / `.yml`).
    Yaml,
    /// JSON format (`.json`).
    Json,
    /// TOML format (`.toml`).
    Toml,
}

impl DefFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }
}

/// Parse definition text into a JSON value tree.
pub fn parse_source(content: &str, format: DefFormat) -> ReadResult<Value> {
    let parse_error = |message: String| ReadError::Parse {
        format: format.name(),
        message,
    };
    match format {
        DefFormat::Yaml => {
            serde_saphyr::from_str(content).map_err(|e| parse_error(e.to_string()))
        }
        DefFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        DefFormat::Toml => {
            // TOML has no null and its own datetime type; going through
            // toml::Value keeps the resulting tree plain JSON.
            let toml_val: toml::Value =
                toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            Ok(toml_value_to_json(toml_val))
        }
    }
}

/// Convert a [`toml::Value`] into a [`serde_json::Value`].
///
/// `Datetime` values are stringified.
fn toml_value_to_json(val: toml::Value) -> Value {
    match val {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_value_to_json).collect()),
        toml::Value::Table(tbl) => {
            let map: serde_json::Map<String, Value> = tbl
                .into_iter()
                .map(|(k, v)| (k, toml_value_to_json(v)))
                .collect();
            Value::Object(map)
        }
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
    }
}
