//! Upload-to-workbook conversion pipeline.
//!
//! One linear pass per request: extract the entry, parse records, build the
//! sheet model, encode the workbook. Any stage failure aborts the pass; no
//! partial workbook is produced.

use zipsheet_io_xlsx::{
    C_SHEET_NAME_DEFAULT, SpecAutofitCellsPolicy, SpecXlsxWriteOptions,
    convert_records_to_sheet_model, derive_default_xlsx_write_options,
    encode_sheet_model_to_xlsx, parse_records_from_json_bytes,
};
use zipsheet_io_zip::{SpecExtractOptions, extract_entry_from_bytes};

use crate::error::ConvertError;

/// Options for one conversion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecConvertOptions {
    /// Which entry to read and how much of it to accept.
    pub extract_options: SpecExtractOptions,
    /// Column width inference policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
    /// Workbook formatting options.
    pub write_options: SpecXlsxWriteOptions,
    /// Output sheet name.
    pub sheet_name: String,
}

impl Default for SpecConvertOptions {
    fn default() -> Self {
        Self {
            extract_options: SpecExtractOptions::default(),
            policy_autofit: SpecAutofitCellsPolicy::default(),
            write_options: derive_default_xlsx_write_options(),
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
        }
    }
}

/// Convert an uploaded ZIP archive into XLSX bytes.
///
/// Blocking and CPU-bound; async callers should run it on a blocking thread.
pub fn convert_archive_to_xlsx(
    v_archive: &[u8],
    options: &SpecConvertOptions,
) -> Result<Vec<u8>, ConvertError> {
    let v_entry = extract_entry_from_bytes(v_archive, &options.extract_options)?;
    log::debug!(
        "[PIPELINE] extracted {:?}: {} bytes",
        options.extract_options.name_entry,
        v_entry.len()
    );

    let records = parse_records_from_json_bytes(&v_entry)?;
    let model = convert_records_to_sheet_model(&records, &options.policy_autofit);
    let v_xlsx = encode_sheet_model_to_xlsx(&model, &options.sheet_name, &options.write_options)?;

    Ok(v_xlsx)
}
