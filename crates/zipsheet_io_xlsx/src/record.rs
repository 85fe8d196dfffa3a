//! JSON record parsing.

use serde_json::Value;

use crate::conf::V_UTF8_BOM;
use crate::spec::{Record, RecordParseError};
use crate::util::derive_json_type_name;

/// Parse raw entry bytes as a JSON array of objects.
///
/// A leading UTF-8 BOM is ignored. An empty array is valid and yields no records.
pub fn parse_records_from_json_bytes(v_bytes: &[u8]) -> Result<Vec<Record>, RecordParseError> {
    let v_bytes = v_bytes.strip_prefix(V_UTF8_BOM.as_slice()).unwrap_or(v_bytes);

    let value: Value = serde_json::from_slice(v_bytes)
        .map_err(|err| RecordParseError::InvalidJson(err.to_string()))?;

    let l_values = match value {
        Value::Array(l_values) => l_values,
        other => {
            return Err(RecordParseError::NotAnArray {
                found: derive_json_type_name(&other),
            });
        }
    };

    l_values
        .into_iter()
        .enumerate()
        .map(|(idx_record, value)| match value {
            Value::Object(record) => Ok(record),
            other => Err(RecordParseError::NotARecord {
                idx_record,
                found: derive_json_type_name(&other),
            }),
        })
        .collect()
}
