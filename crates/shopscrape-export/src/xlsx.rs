//! `.xlsx` sink backed by `rust_xlsxwriter`.

use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Url, Workbook};
use shopscrape_core::ProductRecord;

use crate::error::ExportError;
use crate::sheet::{CellRef, Sheet, SheetLink, SheetSink};
use crate::spreadsheet::SpreadsheetWriter;

/// A new workbook with the `Basic`, `TaleOfSize` and `Review` sheets.
pub struct XlsxWorkbook {
    workbook: Workbook,
    wrapped: Format,
    centered: Format,
}

impl XlsxWorkbook {
    /// # Errors
    ///
    /// Returns [`ExportError::Xlsx`] if a sheet name is rejected.
    pub fn new() -> Result<Self, ExportError> {
        let mut workbook = Workbook::new();
        for sheet in Sheet::ALL {
            workbook.add_worksheet().set_name(sheet.name())?;
        }

        Ok(Self {
            workbook,
            wrapped: Format::new().set_text_wrap().set_align(FormatAlign::Top),
            centered: Format::new()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
        })
    }

    /// Writes the workbook to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Xlsx`] if the file cannot be written.
    pub fn save(mut self, path: &Path) -> Result<(), ExportError> {
        self.workbook.save(path)?;
        Ok(())
    }
}

/// Rows are 1-based in [`CellRef`] and 0-based in the writer.
fn position(cell: CellRef) -> (u32, u16) {
    (cell.row.saturating_sub(1), cell.col)
}

impl SheetSink for XlsxWorkbook {
    fn write_text(&mut self, sheet: Sheet, cell: CellRef, text: &str) -> Result<(), ExportError> {
        let (row, col) = position(cell);
        self.workbook
            .worksheet_from_name(sheet.name())?
            .write_string(row, col, text)?;
        Ok(())
    }

    fn write_number(
        &mut self,
        sheet: Sheet,
        cell: CellRef,
        value: f64,
    ) -> Result<(), ExportError> {
        let (row, col) = position(cell);
        self.workbook
            .worksheet_from_name(sheet.name())?
            .write_number(row, col, value)?;
        Ok(())
    }

    fn write_wrapped(
        &mut self,
        sheet: Sheet,
        cell: CellRef,
        text: &str,
    ) -> Result<(), ExportError> {
        let (row, col) = position(cell);
        self.workbook
            .worksheet_from_name(sheet.name())?
            .write_string_with_format(row, col, text, &self.wrapped)?;
        Ok(())
    }

    fn write_link(
        &mut self,
        sheet: Sheet,
        cell: CellRef,
        link: &SheetLink,
    ) -> Result<(), ExportError> {
        let (row, col) = position(cell);
        let url = Url::new(format!("internal:{}", link.location()))
            .set_text(&link.text)
            .set_tip(&link.tip);
        self.workbook
            .worksheet_from_name(sheet.name())?
            .write_url(row, col, url)?;
        Ok(())
    }

    fn merge_number(
        &mut self,
        sheet: Sheet,
        first: CellRef,
        last: CellRef,
        value: f64,
    ) -> Result<(), ExportError> {
        let (first_row, first_col) = position(first);
        let (last_row, last_col) = position(last);
        let worksheet = self.workbook.worksheet_from_name(sheet.name())?;
        worksheet.merge_range(first_row, first_col, last_row, last_col, "", &self.centered)?;
        worksheet.write_number_with_format(first_row, first_col, value, &self.centered)?;
        Ok(())
    }
}

/// Lays out `records` in a new workbook and saves it to `path`.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if any cell is rejected or the file cannot
/// be written.
pub fn write_workbook(path: &Path, records: &[ProductRecord]) -> Result<(), ExportError> {
    let mut writer = SpreadsheetWriter::new(XlsxWorkbook::new()?)?;
    writer.append_all(records)?;
    writer.into_sink().save(path)?;

    tracing::info!(path = %path.display(), records = records.len(), "wrote spreadsheet");
    Ok(())
}
