//! Stateless helper utilities used by the conversion and writer kernels.

use serde_json::Value;

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::EnumCellValue;

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Measure the display length of one JSON cell value.
///
/// `null` is 0, objects/arrays use their compact JSON text, every other
/// value uses its literal text. Floats are measured the way the written cell
/// shows them (`1.0` is `1`). Lengths count Unicode scalar values.
pub fn measure_cell_len(value: &Value) -> Result<usize, String> {
    match value {
        Value::Null => Ok(0),
        Value::Bool(val) => Ok(if *val { 4 } else { 5 }),
        Value::Number(val) => match val.as_f64() {
            Some(n) if val.is_f64() => Ok(format!("{n}").chars().count()),
            _ => Ok(val.to_string().chars().count()),
        },
        Value::String(val) => Ok(val.chars().count()),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value)
            .map(|txt| txt.chars().count())
            .map_err(|err| format!("Failed to serialize nested value: {err}")),
    }
}

/// Map one JSON value onto a sheet cell.
pub fn convert_json_value_to_cell(value: &Value) -> EnumCellValue {
    match value {
        Value::Null => EnumCellValue::None,
        Value::Bool(val) => EnumCellValue::Boolean(*val),
        Value::Number(val) => match val.as_f64() {
            Some(n) if n.is_finite() => EnumCellValue::Number(n),
            _ => EnumCellValue::String(val.to_string()),
        },
        Value::String(val) => EnumCellValue::String(val.clone()),
        Value::Array(_) | Value::Object(_) => EnumCellValue::String(value.to_string()),
    }
}

/// JSON type name used in error messages.
pub fn derive_json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().trim_matches('\'').to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Checked cast to a worksheet row index.
pub fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

/// Checked cast to a worksheet column index.
pub fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
