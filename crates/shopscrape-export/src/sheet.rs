//! Cell addressing and the sink abstraction the spreadsheet layout writes to.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ExportError;

/// The three worksheets of the export workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sheet {
    Basic,
    TaleOfSize,
    Review,
}

impl Sheet {
    /// Every sheet, in workbook tab order.
    pub const ALL: [Self; 3] = [Self::Basic, Self::TaleOfSize, Self::Review];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::TaleOfSize => "TaleOfSize",
            Self::Review => "Review",
        }
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A cell address with a 1-based row and a 0-based column.
///
/// Displays in A1 notation; columns run `A..Z`, then `AA`, `AB`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    #[must_use]
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub fn column_letters(&self) -> String {
        column_letters(self.col)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letters(), self.row)
    }
}

/// Bijective base-26 column name: `0 → A`, `25 → Z`, `26 → AA`.
#[must_use]
pub fn column_letters(col: u16) -> String {
    let mut n = u32::from(col) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A hyperlink to a cell range on another sheet of the same workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLink {
    pub target: Sheet,
    pub first: CellRef,
    pub last: CellRef,
    pub text: String,
    pub tip: String,
}

impl SheetLink {
    /// In-workbook location, e.g. `TaleOfSize!A2:D5`.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}!{}:{}", self.target, self.first, self.last)
    }
}

/// Destination for the spreadsheet layout.
///
/// Implementations receive every cell exactly once, in the order the layout
/// produces them. Rows are never rewritten.
pub trait SheetSink {
    /// Writes a plain string cell.
    ///
    /// # Errors
    ///
    /// Returns the sink's write error.
    fn write_text(&mut self, sheet: Sheet, cell: CellRef, text: &str) -> Result<(), ExportError>;

    /// Writes a numeric cell.
    ///
    /// # Errors
    ///
    /// Returns the sink's write error.
    fn write_number(&mut self, sheet: Sheet, cell: CellRef, value: f64)
        -> Result<(), ExportError>;

    /// Writes a multi-line string cell, wrapped and aligned to the top.
    ///
    /// # Errors
    ///
    /// Returns the sink's write error.
    fn write_wrapped(&mut self, sheet: Sheet, cell: CellRef, text: &str)
        -> Result<(), ExportError>;

    /// Writes an internal hyperlink cell.
    ///
    /// # Errors
    ///
    /// Returns the sink's write error.
    fn write_link(&mut self, sheet: Sheet, cell: CellRef, link: &SheetLink)
        -> Result<(), ExportError>;

    /// Merges `first..=last` into one centered cell holding `value`.
    ///
    /// # Errors
    ///
    /// Returns the sink's write error.
    fn merge_number(
        &mut self,
        sheet: Sheet,
        first: CellRef,
        last: CellRef,
        value: f64,
    ) -> Result<(), ExportError>;
}

/// A cell as recorded by [`MemorySheets`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Wrapped(String),
    Link(SheetLink),
}

/// In-memory sink that records every cell and merge, for inspecting a
/// layout without producing a file.
#[derive(Debug, Default)]
pub struct MemorySheets {
    cells: BTreeMap<(Sheet, CellRef), Cell>,
    merges: Vec<(Sheet, CellRef, CellRef)>,
}

impl MemorySheets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cell(&self, sheet: Sheet, cell: CellRef) -> Option<&Cell> {
        self.cells.get(&(sheet, cell))
    }

    /// Merged ranges in the order they were written.
    #[must_use]
    pub fn merges(&self) -> &[(Sheet, CellRef, CellRef)] {
        &self.merges
    }

    /// Highest row written on `sheet`, or 0 when the sheet is untouched.
    #[must_use]
    pub fn last_row(&self, sheet: Sheet) -> u32 {
        self.cells
            .keys()
            .filter(|(s, _)| *s == sheet)
            .map(|(_, cell)| cell.row)
            .max()
            .unwrap_or(0)
    }

    fn put(&mut self, sheet: Sheet, cell: CellRef, value: Cell) {
        self.cells.insert((sheet, cell), value);
    }
}

impl SheetSink for MemorySheets {
    fn write_text(&mut self, sheet: Sheet, cell: CellRef, text: &str) -> Result<(), ExportError> {
        self.put(sheet, cell, Cell::Text(text.to_owned()));
        Ok(())
    }

    fn write_number(
        &mut self,
        sheet: Sheet,
        cell: CellRef,
        value: f64,
    ) -> Result<(), ExportError> {
        self.put(sheet, cell, Cell::Number(value));
        Ok(())
    }

    fn write_wrapped(
        &mut self,
        sheet: Sheet,
        cell: CellRef,
        text: &str,
    ) -> Result<(), ExportError> {
        self.put(sheet, cell, Cell::Wrapped(text.to_owned()));
        Ok(())
    }

    fn write_link(
        &mut self,
        sheet: Sheet,
        cell: CellRef,
        link: &SheetLink,
    ) -> Result<(), ExportError> {
        self.put(sheet, cell, Cell::Link(link.clone()));
        Ok(())
    }

    fn merge_number(
        &mut self,
        sheet: Sheet,
        first: CellRef,
        last: CellRef,
        value: f64,
    ) -> Result<(), ExportError> {
        self.merges.push((sheet, first, last));
        self.put(sheet, first, Cell::Number(value));
        Ok(())
    }
}
