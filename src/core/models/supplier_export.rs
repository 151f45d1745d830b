use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of the data API's per-framework supplier user export.
///
/// The API keys these records by their CSV column name (`"email address"`,
/// `"user_name"`, ...), so the record is kept as a JSON object and cells
/// are looked up by column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierExportRecord(pub Map<String, Value>);

impl SupplierExportRecord {
    /// Render the value under `column` as a CSV cell.
    pub fn cell(&self, column: &str) -> String {
        match self.0.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(true)) => "True".to_string(),
            Some(Value::Bool(false)) => "False".to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => other.to_string(),
        }
    }

    pub fn application_passed(&self) -> bool {
        self.0.get("application_result").and_then(Value::as_str) == Some("pass")
    }

    pub fn user_research_opted_in(&self) -> bool {
        self.0
            .get("user_research_opted_in")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}
