//! XLSX constants and default preset factories.

use crate::spec::{SpecCellFormat, SpecXlsxWriteOptions};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel column maximum display width (character units).
pub const N_WIDTH_EXCEL_COLUMN_MAX: usize = 255;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Rows inspected per column during width inference.
pub const N_HEIGHT_BODY_INFERRED_MAX: usize = 1_000;
/// Padding added to the widest sampled cell.
pub const N_WIDTH_CELL_PADDING: usize = 2;
/// Width used for a column whose inference failed.
pub const N_WIDTH_CELL_FALLBACK: usize = 10;

/// Sheet name used for the single output sheet.
pub const C_SHEET_NAME_DEFAULT: &str = "Students";
/// MIME type of an XLSX document.
pub const C_CONTENT_TYPE_XLSX: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// UTF-8 byte order mark.
pub const V_UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// Build the default header-row format.
pub fn derive_default_header_format() -> SpecCellFormat {
    SpecCellFormat {
        bold: Some(true),
        ..Default::default()
    }
}

/// Build default write options.
pub fn derive_default_xlsx_write_options() -> SpecXlsxWriteOptions {
    SpecXlsxWriteOptions::default()
}
