//! `zipsheet_io_xlsx` v1:
//! Rust-side records-to-XLSX kernel.
//!
//! Module layout:
//! - `conf`   : constants and default presets
//! - `spec`   : models/options/errors
//! - `util`   : pure helper functions
//! - `record` : JSON record parsing
//! - `table`  : records-to-sheet conversion with width inference
//! - `writer` : pure-Rust workbook encoder
pub mod conf;
pub mod record;
pub mod spec;
pub mod table;
pub mod util;
pub mod writer;

pub use conf::{
    C_CONTENT_TYPE_XLSX, C_SHEET_NAME_DEFAULT, N_HEIGHT_BODY_INFERRED_MAX, N_WIDTH_CELL_FALLBACK,
    N_WIDTH_CELL_PADDING, derive_default_xlsx_write_options,
};
pub use record::parse_records_from_json_bytes;
pub use spec::{
    EnumCellValue, Record, RecordParseError, SheetModel, SpecAutofitCellsPolicy, SpecCellFormat,
    SpecSheetColumn, SpecXlsxReport, SpecXlsxWriteOptions, XlsxEncodeError,
};
pub use table::{
    convert_records_to_sheet_model, convert_records_to_sheet_model_with, derive_column_width,
};
pub use util::{measure_cell_len, sanitize_sheet_name};
pub use writer::{XlsxWriter, encode_sheet_model_to_xlsx};
