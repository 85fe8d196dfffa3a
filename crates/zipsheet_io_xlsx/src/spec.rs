//! Shared XLSX models, options and errors.

use std::fmt;

use serde_json::{Map, Value};

use crate::conf::{
    N_HEIGHT_BODY_INFERRED_MAX, N_WIDTH_CELL_FALLBACK, N_WIDTH_CELL_PADDING,
    derive_default_header_format,
};

////////////////////////////////////////////////////////////////////////////////
// #region SheetModel

/// One input record: field name to JSON value, in document key order.
pub type Record = Map<String, Value>;

/// Normalized cell value written to the sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
}

/// Output column with its inferred display width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetColumn {
    /// Record key, also written as the header text.
    pub key: String,
    /// Display width in character units.
    pub width: usize,
}

/// In-memory sheet prior to binary encoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetModel {
    /// Columns in first-record key order.
    pub columns: Vec<SpecSheetColumn>,
    /// Rows aligned positionally to `columns`.
    pub rows: Vec<Vec<EnumCellValue>>,
    /// Non-fatal warnings raised during conversion.
    pub warnings: Vec<String>,
}

impl SheetModel {
    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Column keys in output order.
    pub fn keys(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.key.as_str()).collect()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AutofitPolicy

/// Width inference policy for the tabular conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Max body rows inspected per column.
    pub height_body_inferred_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
    /// Width used when inference fails for a column.
    pub width_cell_fallback: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            height_body_inferred_max: N_HEIGHT_BODY_INFERRED_MAX,
            width_cell_padding: N_WIDTH_CELL_PADDING,
            width_cell_fallback: N_WIDTH_CELL_FALLBACK,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Cell format options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Bold style.
    pub bold: Option<bool>,
}

/// Writer-wide options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxWriteOptions {
    /// Header row format.
    pub fmt_header: SpecCellFormat,
}

impl Default for SpecXlsxWriteOptions {
    fn default() -> Self {
        Self {
            fmt_header: derive_default_header_format(),
        }
    }
}

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Actual sheet name in workbook.
    pub sheet_name: String,
    /// Data rows written (header excluded).
    pub n_rows: usize,
    /// Columns written.
    pub n_cols: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failure to turn extracted bytes into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    /// Bytes are not syntactically valid JSON.
    InvalidJson(String),
    /// Top-level value is not an array.
    NotAnArray {
        /// JSON type actually found.
        found: &'static str,
    },
    /// An array element is not an object.
    NotARecord {
        /// Zero-based element position.
        idx_record: usize,
        /// JSON type actually found.
        found: &'static str,
    },
}

impl RecordParseError {
    /// Stable machine-readable label of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidJson(_) => "invalid_json",
            Self::NotAnArray { .. } => "not_an_array",
            Self::NotARecord { .. } => "not_a_record",
        }
    }
}

impl fmt::Display for RecordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson(msg) => write!(f, "Invalid JSON: {msg}"),
            Self::NotAnArray { found } => {
                write!(f, "Expected a JSON array of records, found {found}")
            }
            Self::NotARecord { idx_record, found } => {
                write!(f, "Expected an object at index {idx_record}, found {found}")
            }
        }
    }
}

impl std::error::Error for RecordParseError {}

/// Failure to encode a sheet model into a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XlsxEncodeError {
    /// Model exceeds a hard Excel worksheet limit.
    LimitExceeded(String),
    /// The workbook library rejected a write or the final save.
    Write(String),
}

impl fmt::Display for XlsxEncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitExceeded(msg) => write!(f, "Excel limit exceeded: {msg}"),
            Self::Write(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for XlsxEncodeError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
