//! Spreadsheet record normalisation
//!
//! Upload sources hand over loosely typed JSON objects, one per sheet row.
//! Column keys are `name`, `phone` (or the template's `number`) and
//! `location`. Numbers are stringified and strings trimmed; a record missing
//! any column never reaches the engine.

use serde_json::Value;
use shared::models::LeadImportRow;

/// Rows ready for [`crate::LeadEngine::bulk_ingest`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRows {
    pub rows: Vec<LeadImportRow>,
    pub dropped: usize,
}

pub fn rows_from_records(records: &[Value]) -> ParsedRows {
    let mut parsed = ParsedRows::default();
    for record in records {
        match row_from_record(record) {
            Some(row) => parsed.rows.push(row),
            None => parsed.dropped += 1,
        }
    }
    if parsed.dropped > 0 {
        tracing::debug!(
            kept = parsed.rows.len(),
            dropped = parsed.dropped,
            "Incomplete upload records skipped"
        );
    }
    parsed
}

fn row_from_record(record: &Value) -> Option<LeadImportRow> {
    let object = record.as_object()?;
    let name = cell(object.get("name"))?;
    let phone = cell(object.get("phone")).or_else(|| cell(object.get("number")))?;
    let location = cell(object.get("location"))?;
    Some(LeadImportRow::new(name, phone, location))
}

/// Non-empty text of a cell
fn cell(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
