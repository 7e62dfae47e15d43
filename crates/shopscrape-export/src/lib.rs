//! Output sinks for assembled product records: a pretty JSON dump, a
//! console printer and a three-sheet spreadsheet.

pub mod console;
pub mod error;
pub mod json_dump;
pub mod sheet;
pub mod spreadsheet;
pub mod xlsx;

pub use console::print_record;
pub use error::ExportError;
pub use json_dump::{write_json, write_json_file};
pub use sheet::{Cell, CellRef, MemorySheets, Sheet, SheetLink, SheetSink};
pub use spreadsheet::SpreadsheetWriter;
pub use xlsx::{write_workbook, XlsxWorkbook};
