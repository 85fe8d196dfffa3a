//! Records-to-sheet conversion with column width inference.
//!
//! Columns come from the key set of the first record only, in its key order.
//! Keys that appear only in later records are not emitted, and a later record
//! missing a column key yields a blank cell. Widths are inferred from the
//! header plus at most `height_body_inferred_max` leading rows; every record is
//! still emitted as a row.

use serde_json::Value;

use crate::spec::{EnumCellValue, Record, SheetModel, SpecAutofitCellsPolicy, SpecSheetColumn};
use crate::util::{convert_json_value_to_cell, measure_cell_len};

/// Convert records into a sheet model using the default cell measurer.
pub fn convert_records_to_sheet_model(
    records: &[Record],
    policy: &SpecAutofitCellsPolicy,
) -> SheetModel {
    convert_records_to_sheet_model_with(records, policy, measure_cell_len)
}

/// Convert records into a sheet model with a caller-supplied cell measurer.
///
/// A measurer error affects only the column it occurred in: that column gets
/// `policy.width_cell_fallback` and a warning is recorded on the model.
pub fn convert_records_to_sheet_model_with<F>(
    records: &[Record],
    policy: &SpecAutofitCellsPolicy,
    measure: F,
) -> SheetModel
where
    F: Fn(&Value) -> Result<usize, String>,
{
    let Some(record_first) = records.first() else {
        return SheetModel::default();
    };

    let l_keys: Vec<&String> = record_first.keys().collect();
    let mut l_warnings = Vec::new();

    let mut l_columns = Vec::with_capacity(l_keys.len());
    for key in &l_keys {
        let n_width = match derive_column_width(key, records, policy, &measure) {
            Ok(n_width) => n_width,
            Err(msg) => {
                log::warn!(
                    "Column width inference failed for {key:?}: {msg}; using width {}",
                    policy.width_cell_fallback
                );
                l_warnings.push(format!(
                    "Column {key:?}: width inference failed ({msg}); fell back to {}.",
                    policy.width_cell_fallback
                ));
                policy.width_cell_fallback
            }
        };
        l_columns.push(SpecSheetColumn {
            key: (*key).clone(),
            width: n_width,
        });
    }

    let l_rows: Vec<Vec<EnumCellValue>> = records
        .iter()
        .map(|record| {
            l_keys
                .iter()
                .map(|key| {
                    record
                        .get(key.as_str())
                        .map_or(EnumCellValue::None, convert_json_value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    SheetModel {
        columns: l_columns,
        rows: l_rows,
        warnings: l_warnings,
    }
}

/// Infer the display width of one column.
///
/// Width is `max(header length, longest sampled cell) + padding`, sampling the
/// first `policy.height_body_inferred_max` records. Absent keys measure 0.
pub fn derive_column_width<F>(
    key: &str,
    records: &[Record],
    policy: &SpecAutofitCellsPolicy,
    measure: &F,
) -> Result<usize, String>
where
    F: Fn(&Value) -> Result<usize, String>,
{
    let mut n_width_max = key.chars().count();
    for (idx_record, record) in records
        .iter()
        .take(policy.height_body_inferred_max)
        .enumerate()
    {
        let n_len = match record.get(key) {
            Some(value) => {
                measure(value).map_err(|msg| format!("record {idx_record}: {msg}"))?
            }
            None => 0,
        };
        n_width_max = usize::max(n_width_max, n_len);
    }

    n_width_max
        .checked_add(policy.width_cell_padding)
        .ok_or_else(|| format!("width overflow: {n_width_max} + {}", policy.width_cell_padding))
}
