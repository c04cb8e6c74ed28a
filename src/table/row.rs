use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

/// Anything the data table can display: a mapping from field name to a
/// displayable value.
pub trait TableRow {
    /// Display text of `field`, `None` when the field is missing or null.
    fn field(&self, field: &str) -> Option<String>;

    /// Stable identity used as the rendered row key. Defaults to the `id`
    /// field; the table falls back to the row's position when this is `None`.
    fn row_id(&self) -> Option<String> {
        self.field("id")
    }
}

/// String form of a JSON value the way the table prints it.
pub fn display_json(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|v| display_json(v).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

impl TableRow for serde_json::Map<String, Value> {
    fn field(&self, field: &str) -> Option<String> {
        self.get(field).and_then(display_json)
    }
}

impl TableRow for Value {
    fn field(&self, field: &str) -> Option<String> {
        self.get(field).and_then(display_json)
    }
}

impl TableRow for HashMap<String, String> {
    fn field(&self, field: &str) -> Option<String> {
        self.get(field).cloned()
    }
}

impl TableRow for BTreeMap<String, String> {
    fn field(&self, field: &str) -> Option<String> {
        self.get(field).cloned()
    }
}
