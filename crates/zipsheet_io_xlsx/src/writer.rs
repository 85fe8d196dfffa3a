//! XLSX writer kernel that encodes sheet models into workbook bytes.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_WIDTH_EXCEL_COLUMN_MAX};
use crate::spec::{
    EnumCellValue, SheetModel, SpecCellFormat, SpecXlsxReport, SpecXlsxWriteOptions,
    XlsxEncodeError,
};
use crate::util::{cast_col_num, cast_row_num, sanitize_sheet_name};

/// In-memory single-sheet workbook writer.
pub struct XlsxWriter {
    workbook: Workbook,
    write_options: SpecXlsxWriteOptions,
    report: Option<SpecXlsxReport>,
}

impl XlsxWriter {
    /// Create a writer with an empty workbook.
    pub fn new(write_options: SpecXlsxWriteOptions) -> Self {
        Self {
            workbook: Workbook::new(),
            write_options,
            report: None,
        }
    }

    /// Report of the written sheet; `None` before [`XlsxWriter::write_sheet`] succeeds.
    pub fn report(&self) -> Option<&SpecXlsxReport> {
        self.report.as_ref()
    }

    /// Serialize the workbook into XLSX bytes.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>, XlsxEncodeError> {
        self.workbook.save_to_buffer().map_err(derive_xlsx_error)
    }

    /// Write the sheet: a header row of column keys followed by the model rows.
    ///
    /// A model without columns produces an empty sheet. A workbook holds one
    /// sheet; a second call fails.
    pub fn write_sheet(
        &mut self,
        model: &SheetModel,
        sheet_name: &str,
    ) -> Result<(), XlsxEncodeError> {
        if self.report.is_some() {
            return Err(XlsxEncodeError::Write(
                "workbook already holds its sheet".to_string(),
            ));
        }
        validate_sheet_model_limits(model)?;

        let mut report = SpecXlsxReport {
            sheet_name: String::new(),
            n_rows: model.height(),
            n_cols: model.width(),
            warnings: model.warnings.clone(),
        };

        let sheet_name_valid = sanitize_sheet_name(sheet_name, "_");
        if sheet_name_valid != sheet_name {
            report.warn(format!(
                "Sheet name {sheet_name:?} written as {sheet_name_valid:?}."
            ));
        }

        let fmt_header = derive_rust_xlsx_format(&self.write_options.fmt_header);

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_valid)
            .map_err(derive_xlsx_error)?;

        if model.width() == 0 {
            report.sheet_name = sheet_name_valid;
            self.report = Some(report);
            return Ok(());
        }

        for (n_idx_col, column) in model.columns.iter().enumerate() {
            worksheet
                .write_string_with_format(0, cast_col_num_checked(n_idx_col)?, &column.key, &fmt_header)
                .map_err(derive_xlsx_error)?;

            let n_width = usize::min(column.width, N_WIDTH_EXCEL_COLUMN_MAX);
            if n_width < column.width {
                report.warn(format!(
                    "Column {:?}: width {} clamped to {N_WIDTH_EXCEL_COLUMN_MAX}.",
                    column.key, column.width
                ));
            }
            worksheet
                .set_column_width(cast_col_num_checked(n_idx_col)?, n_width as f64)
                .map_err(derive_xlsx_error)?;
        }

        for (n_idx_row, row) in model.rows.iter().enumerate() {
            for (n_idx_col, value) in row.iter().enumerate() {
                write_cell(worksheet, n_idx_row + 1, n_idx_col, value)?;
            }
        }

        for c_warning in &report.warnings {
            log::warn!("[XLSX] {sheet_name_valid}: {c_warning}");
        }
        report.sheet_name = sheet_name_valid;
        self.report = Some(report);
        Ok(())
    }
}

/// Encode a single-sheet workbook from `model`.
pub fn encode_sheet_model_to_xlsx(
    model: &SheetModel,
    sheet_name: &str,
    write_options: &SpecXlsxWriteOptions,
) -> Result<Vec<u8>, XlsxEncodeError> {
    let mut writer = XlsxWriter::new(write_options.clone());
    writer.write_sheet(model, sheet_name)?;
    let v_bytes = writer.save_to_buffer()?;

    log::info!(
        "[XLSX] encoded sheet {sheet_name:?}: rows={} cols={} bytes={}",
        model.height(),
        model.width(),
        v_bytes.len()
    );
    Ok(v_bytes)
}

fn validate_sheet_model_limits(model: &SheetModel) -> Result<(), XlsxEncodeError> {
    if model.width() > N_NCOLS_EXCEL_MAX {
        return Err(XlsxEncodeError::LimitExceeded(format!(
            "{} columns > {N_NCOLS_EXCEL_MAX}",
            model.width()
        )));
    }
    // Row 0 holds the header.
    if model.height() >= N_NROWS_EXCEL_MAX {
        return Err(XlsxEncodeError::LimitExceeded(format!(
            "{} data rows > {}",
            model.height(),
            N_NROWS_EXCEL_MAX - 1
        )));
    }
    if let Some((n_idx_row, row)) = model
        .rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != model.width())
    {
        return Err(XlsxEncodeError::Write(format!(
            "row {n_idx_row} has {} cells, expected {}",
            row.len(),
            model.width()
        )));
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
) -> Result<(), XlsxEncodeError> {
    let n_row = cast_row_num_checked(row_idx)?;
    let n_col = cast_col_num_checked(col_idx)?;
    match value {
        EnumCellValue::None => {}
        EnumCellValue::String(val) => {
            worksheet
                .write_string(n_row, n_col, val)
                .map_err(derive_xlsx_error)?;
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number(n_row, n_col, *val)
                .map_err(derive_xlsx_error)?;
        }
        EnumCellValue::Boolean(val) => {
            worksheet
                .write_boolean(n_row, n_col, *val)
                .map_err(derive_xlsx_error)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    format
}

fn cast_row_num_checked(value: usize) -> Result<u32, XlsxEncodeError> {
    cast_row_num(value).map_err(XlsxEncodeError::LimitExceeded)
}

fn cast_col_num_checked(value: usize) -> Result<u16, XlsxEncodeError> {
    cast_col_num(value).map_err(XlsxEncodeError::LimitExceeded)
}

fn derive_xlsx_error(err: XlsxError) -> XlsxEncodeError {
    XlsxEncodeError::Write(format!("xlsx write error: {err}"))
}
