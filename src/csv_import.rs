//! Bulk CSV import for the student and teacher directories.
//!
//! The dialect is deliberately simple: rows are separated by `\n`, fields by
//! `,`, and there is no quoting or escaping. A comma inside a value is a field
//! boundary, so values containing commas shift every later column of that row.
//! The header row is mandatory and columns are located by exact,
//! case-sensitive name; unknown columns are ignored.

use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

const FIELD_SEPARATOR: char = ',';
const BATCH_TOKEN_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityColumns {
    pub primary: &'static str,
    pub secondary: &'static str,
}

/// Describes which columns an import expects and how rows are accepted.
#[derive(Debug, Clone, Copy)]
pub struct ImportSchema {
    /// Human label used in the import notice ("siswa", "guru").
    pub entity_label: &'static str,
    /// Prefix of generated record ids.
    pub id_namespace: &'static str,
    pub required_columns: &'static [&'static str],
    pub optional_columns: &'static [&'static str],
    /// Must also be listed in `required_columns` or `optional_columns`.
    pub multi_value_column: Option<&'static str>,
    pub multi_value_separator: char,
    pub identity_columns: IdentityColumns,
}

impl ImportSchema {
    fn is_multi_value(&self, column: &str) -> bool {
        self.multi_value_column == Some(column)
    }
}

pub const STUDENT_SCHEMA: ImportSchema = ImportSchema {
    entity_label: "siswa",
    id_namespace: "s-import",
    required_columns: &[
        "nama", "nis", "nisn", "kelas", "foto", "alamat", "telepon", "namaWali",
    ],
    optional_columns: &["tanggalLulus"],
    multi_value_column: None,
    multi_value_separator: ';',
    identity_columns: IdentityColumns {
        primary: "nama",
        secondary: "nisn",
    },
};

pub const TEACHER_SCHEMA: ImportSchema = ImportSchema {
    entity_label: "guru",
    id_namespace: "g-import",
    required_columns: &["nama", "nip", "mataPelajaran", "foto", "email", "telepon"],
    optional_columns: &[],
    multi_value_column: Some("mataPelajaran"),
    multi_value_separator: ';',
    identity_columns: IdentityColumns {
        primary: "nama",
        secondary: "nip",
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("CSV file is empty or only contains a header")]
    EmptyInput,
    #[error("invalid CSV header; required columns: {}", .required.join(", "))]
    MissingColumns {
        required: Vec<String>,
        missing: Vec<String>,
    },
}

impl ImportError {
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::EmptyInput => "empty_input",
            ImportError::MissingColumns { .. } => "missing_columns",
        }
    }
}

/// Header plus raw, untrimmed cells of every non-blank data line.
#[derive(Debug, Clone)]
pub struct RawTable<'a> {
    pub header: Vec<String>,
    pub rows: Vec<Vec<&'a str>>,
}

impl<'a> RawTable<'a> {
    pub fn parse(text: &'a str) -> Result<Self, ImportError> {
        let lines: Vec<&str> = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .collect();
        if lines.len() < 2 {
            return Err(ImportError::EmptyInput);
        }

        let header = lines[0]
            .split(FIELD_SEPARATOR)
            .map(|h| h.trim().to_string())
            .collect();
        let rows = lines[1..]
            .iter()
            .map(|line| line.split(FIELD_SEPARATOR).collect())
            .collect();
        Ok(Self { header, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::List(items) => !items.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedRecord {
    pub id: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl ImportedRecord {
    /// Scalar value of `column`, or "" when absent or multi-valued.
    pub fn text(&self, column: &str) -> &str {
        match self.fields.get(column) {
            Some(FieldValue::Text(s)) => s.as_str(),
            _ => "",
        }
    }

    pub fn list(&self, column: &str) -> &[String] {
        match self.fields.get(column) {
            Some(FieldValue::List(items)) => items.as_slice(),
            _ => &[],
        }
    }

    fn has_value(&self, column: &str) -> bool {
        self.fields
            .get(column)
            .map(FieldValue::is_present)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct ImportResult {
    pub accepted: Vec<ImportedRecord>,
    pub accepted_count: usize,
}

/// Per-call id material: captured once, shared by every row of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStamp {
    pub timestamp_ms: i64,
    pub batch: String,
}

impl ImportStamp {
    pub fn now() -> Self {
        let mut batch = Uuid::new_v4().simple().to_string();
        batch.truncate(BATCH_TOKEN_LEN);
        Self {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            batch,
        }
    }

    pub fn record_id(&self, namespace: &str, row: usize) -> String {
        format!("{}-{}-{}-{}", namespace, self.timestamp_ms, self.batch, row)
    }
}

pub fn split_multi_value(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn import(raw_text: &str, schema: &ImportSchema) -> Result<ImportResult, ImportError> {
    import_with_stamp(raw_text, schema, &ImportStamp::now())
}

pub fn import_with_stamp(
    raw_text: &str,
    schema: &ImportSchema,
    stamp: &ImportStamp,
) -> Result<ImportResult, ImportError> {
    let table = RawTable::parse(raw_text)?;
    let columns = resolve_columns(&table, schema)?;

    let mut accepted = Vec::new();
    for (offset, cells) in table.rows.iter().enumerate() {
        let row = offset + 1;
        let mut fields = BTreeMap::new();
        for (name, index) in &columns {
            let raw = index.and_then(|i| cells.get(i)).copied();
            let value = if schema.is_multi_value(name) {
                FieldValue::List(
                    raw.map(|r| split_multi_value(r, schema.multi_value_separator))
                        .unwrap_or_default(),
                )
            } else {
                FieldValue::Text(raw.map(str::trim).unwrap_or("").to_string())
            };
            fields.insert(name.to_string(), value);
        }

        let record = ImportedRecord {
            id: stamp.record_id(schema.id_namespace, row),
            fields,
        };
        let identity = &schema.identity_columns;
        if record.has_value(identity.primary) && record.has_value(identity.secondary) {
            accepted.push(record);
        }
    }

    let accepted_count = accepted.len();
    Ok(ImportResult {
        accepted,
        accepted_count,
    })
}

fn resolve_columns(
    table: &RawTable<'_>,
    schema: &ImportSchema,
) -> Result<Vec<(&'static str, Option<usize>)>, ImportError> {
    let mut columns = Vec::with_capacity(
        schema.required_columns.len() + schema.optional_columns.len(),
    );
    let mut missing = Vec::new();
    for name in schema.required_columns {
        let index = table.column_index(name);
        if index.is_none() {
            missing.push(name.to_string());
        }
        columns.push((*name, index));
    }
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns {
            required: schema
                .required_columns
                .iter()
                .map(|s| s.to_string())
                .collect(),
            missing,
        });
    }

    for name in schema.optional_columns {
        columns.push((*name, table.column_index(name)));
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_table_skips_blank_lines_and_trims_header() {
        let table = RawTable::parse("\n a , b \n\n  \n1,2\n").expect("parse");
        assert_eq!(table.header, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("B"), None);
    }

    #[test]
    fn header_only_is_empty_input() {
        assert_eq!(
            RawTable::parse("nama,nip\n   \n").unwrap_err(),
            ImportError::EmptyInput
        );
    }

    #[test]
    fn record_id_combines_namespace_stamp_and_row() {
        let stamp = ImportStamp {
            timestamp_ms: 1_700_000_000_000,
            batch: "abcd1234".to_string(),
        };
        assert_eq!(
            stamp.record_id("g-import", 3),
            "g-import-1700000000000-abcd1234-3"
        );
    }

    #[test]
    fn fresh_stamps_use_distinct_batch_tokens() {
        let a = ImportStamp::now();
        let b = ImportStamp::now();
        assert_eq!(a.batch.len(), BATCH_TOKEN_LEN);
        assert_ne!(a.batch, b.batch);
    }

    #[test]
    fn missing_columns_message_lists_required_set() {
        let e = ImportError::MissingColumns {
            required: vec!["nama".into(), "nip".into()],
            missing: vec!["nip".into()],
        };
        assert_eq!(e.to_string(), "invalid CSV header; required columns: nama, nip");
        assert_eq!(e.code(), "missing_columns");
    }
}
