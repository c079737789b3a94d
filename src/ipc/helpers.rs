use crate::csv_import::{self, ImportError, ImportSchema, ImportedRecord};
use crate::directory::{Directory, DirectoryEntry};
use crate::ipc::error::err;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<ImportError> for HandlerErr {
    fn from(e: ImportError) -> Self {
        let details = match &e {
            ImportError::EmptyInput => None,
            ImportError::MissingColumns { required, missing } => Some(json!({
                "requiredColumns": required,
                "missingColumns": missing
            })),
        };
        Self {
            code: e.code(),
            message: e.to_string(),
            details,
        }
    }
}

pub fn get_required_str(params: &Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HandlerErr::new("bad_params", format!("missing {}", key)))
}

pub fn get_optional_str(params: &Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
}

pub fn parse_params<T: DeserializeOwned>(params: &Value) -> Result<T, HandlerErr> {
    let params = if params.is_null() {
        json!({})
    } else {
        params.clone()
    };
    serde_json::from_value(params).map_err(|e| HandlerErr::new("bad_params", e.to_string()))
}

pub fn require_filled(value: &str, key: &str) -> Result<(), HandlerErr> {
    if value.trim().is_empty() {
        Err(HandlerErr::new("bad_params", format!("missing {}", key)))
    } else {
        Ok(())
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// CSV text comes inline as `text`, or from disk via `inPath`.
fn read_import_text(params: &Value) -> Result<(String, Option<String>), HandlerErr> {
    if let Some(text) = params.get("text").and_then(|v| v.as_str()) {
        return Ok((text.to_string(), None));
    }
    let in_path = get_required_str(params, "inPath")
        .map_err(|_| HandlerErr::new("bad_params", "missing text or inPath"))?;
    let bytes = std::fs::read(&in_path).map_err(|e| HandlerErr {
        code: "read_failed",
        message: e.to_string(),
        details: Some(json!({ "path": in_path })),
    })?;
    Ok((String::from_utf8_lossy(&bytes).into_owned(), Some(in_path)))
}

/// Runs a CSV import and prepends the accepted entries; nothing changes on error.
pub fn import_into<T>(
    directory: &mut Directory<T>,
    schema: &ImportSchema,
    params: &Value,
    notice_dismiss_ms: u64,
    result_key: &str,
    convert: fn(&ImportedRecord) -> T,
) -> Result<Value, HandlerErr>
where
    T: DirectoryEntry + Serialize,
{
    let (text, in_path) = read_import_text(params)?;
    let result = csv_import::import(&text, schema).map_err(|e| {
        tracing::warn!(schema = schema.entity_label, error = %e, "csv import rejected");
        HandlerErr::from(e)
    })?;

    let entries: Vec<T> = result.accepted.iter().map(convert).collect();
    let imported = to_json(&entries);
    directory.prepend_batch(entries);
    tracing::info!(
        schema = schema.entity_label,
        accepted = result.accepted_count,
        path = in_path.as_deref().unwrap_or("<inline>"),
        total = directory.len(),
        "csv import applied"
    );

    let mut out = json!({
        "imported": result.accepted_count,
        "message": format!("{} data {} berhasil diimpor.", result.accepted_count, schema.entity_label),
        "noticeDismissMs": notice_dismiss_ms,
        "path": in_path
    });
    out[result_key] = imported;
    Ok(out)
}
