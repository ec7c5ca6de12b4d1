//! JSON Schema for the configuration file.

use crate::config::DynwallConfig;

/// Identifier embedded as `$id` in the generated schema.
const SCHEMA_ID: &str = "https://raw.githubusercontent.com/dynwall/dynwall/main/dynwall.schema.json";

/// Generates the JSON Schema for [`DynwallConfig`].
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(DynwallConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(SCHEMA_ID));
    }

    schema
}

/// Pretty-printed JSON Schema, ready to be written to a file.
#[must_use]
pub fn print_schema() -> String { serde_json::to_string_pretty(&generate_schema()).unwrap_or_default() }
