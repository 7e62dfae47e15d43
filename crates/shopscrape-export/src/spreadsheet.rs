//! Row layout of the three-sheet workbook.
//!
//! `Basic` gets one row per record. `TaleOfSize` and `Review` get one block
//! of rows per record, with the record's serial number merged down column A
//! of the block. Two link cells on the `Basic` row point at those blocks.
//! Every sheet starts with a header row and is only ever appended to.

use shopscrape_core::{ProductRecord, ReviewSummary, SizeChart};

use crate::error::ExportError;
use crate::sheet::{CellRef, Sheet, SheetLink, SheetSink};

const BASIC_HEADERS: [&str; 23] = [
    "No.",
    "URL",
    "Breadcrumb",
    "Category",
    "Name",
    "Price",
    "Images",
    "Available Sizes",
    "Sense Of Size",
    "Description Title",
    "Description",
    "Itemization",
    "Tale Of Size",
    "Special Function",
    "Rating",
    "Number Of Reviews",
    "Recommended Rate",
    "Sense Of Fitting",
    "Appropriation Of Length",
    "Quality Of Material",
    "Comfort",
    "Review Details",
    "Keywords",
];
const TALE_OF_SIZE_HEADERS: [&str; 3] = ["No.", "Header", "Body"];
const REVIEW_HEADERS: [&str; 6] = ["No.", "Date", "Rating", "Title", "Description", "Reviewer ID"];

/// First data row on every sheet, below the header row.
const FIRST_DATA_ROW: u32 = 2;

const COL_SERIAL: u16 = 0;
const COL_SIZE_HEADER: u16 = 1;
const COL_SIZE_BODY: u16 = 2;
const COL_REVIEW_LAST: u16 = 5;

/// Appends records to a [`SheetSink`] in the workbook layout.
pub struct SpreadsheetWriter<S> {
    sink: S,
    basic_row: u32,
    tale_of_size_row: u32,
    review_row: u32,
}

/// Rows and last column occupied by one record's block on a detail sheet.
struct Block {
    first_row: u32,
    height: u32,
    last_col: u16,
}

impl Block {
    fn last_row(&self) -> u32 {
        self.first_row + self.height - 1
    }

    fn link(&self, target: Sheet, text: &str, tip: &str) -> SheetLink {
        SheetLink {
            target,
            first: CellRef::new(self.first_row, COL_SERIAL),
            last: CellRef::new(self.last_row(), self.last_col),
            text: text.to_owned(),
            tip: tip.to_owned(),
        }
    }
}

impl<S: SheetSink> SpreadsheetWriter<S> {
    /// Writes the header row of every sheet.
    ///
    /// # Errors
    ///
    /// Propagates the sink's write error.
    pub fn new(mut sink: S) -> Result<Self, ExportError> {
        write_header_row(&mut sink, Sheet::Basic, &BASIC_HEADERS)?;
        write_header_row(&mut sink, Sheet::TaleOfSize, &TALE_OF_SIZE_HEADERS)?;
        write_header_row(&mut sink, Sheet::Review, &REVIEW_HEADERS)?;

        Ok(Self {
            sink,
            basic_row: FIRST_DATA_ROW,
            tale_of_size_row: FIRST_DATA_ROW,
            review_row: FIRST_DATA_ROW,
        })
    }

    /// Appends one record under the 1-based `serial` number.
    ///
    /// # Errors
    ///
    /// Propagates the sink's write error. Rows written before the failure
    /// stay in the sink.
    pub fn append_record(&mut self, serial: u32, record: &ProductRecord) -> Result<(), ExportError> {
        let tale_of_size = self.write_tale_of_size(serial, &record.tale_of_size)?;
        let review = self.write_review(serial, &record.review)?;
        self.write_basic(serial, record, &tale_of_size, &review)
    }

    /// Appends `records` numbered from 1.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first write error.
    pub fn append_all(&mut self, records: &[ProductRecord]) -> Result<(), ExportError> {
        for (serial, record) in (1u32..).zip(records) {
            self.append_record(serial, record)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn write_tale_of_size(&mut self, serial: u32, chart: &SizeChart) -> Result<Block, ExportError> {
        let sheet = Sheet::TaleOfSize;
        let first_row = self.tale_of_size_row;
        let header = chart.header_values();
        let body = chart.body_rows();

        for (row, value) in (first_row..).zip(&header) {
            self.sink
                .write_text(sheet, CellRef::new(row, COL_SIZE_HEADER), value)?;
        }
        for (col, column) in (COL_SIZE_BODY..).zip(&body) {
            for (row, value) in (first_row..).zip(column) {
                self.sink.write_text(sheet, CellRef::new(row, col), value)?;
            }
        }

        let tallest_body = body.iter().map(Vec::len).max().unwrap_or(0);
        let block = Block {
            first_row,
            height: block_height(header.len().max(tallest_body)),
            last_col: match u16::try_from(body.len()) {
                Ok(0) => COL_SIZE_HEADER,
                Ok(n) => COL_SIZE_BODY.saturating_add(n - 1),
                Err(_) => u16::MAX,
            },
        };
        self.write_serial(sheet, serial, &block)?;
        self.tale_of_size_row += block.height;
        Ok(block)
    }

    fn write_review(&mut self, serial: u32, review: &ReviewSummary) -> Result<Block, ExportError> {
        let sheet = Sheet::Review;
        let first_row = self.review_row;

        for (row, entry) in (first_row..).zip(&review.details) {
            let values = [
                &entry.date,
                &entry.rating,
                &entry.title,
                &entry.description,
                &entry.reviewer_id,
            ];
            for (col, value) in (1u16..).zip(values) {
                self.sink.write_text(sheet, CellRef::new(row, col), value)?;
            }
        }

        let block = Block {
            first_row,
            height: block_height(review.details.len()),
            last_col: COL_REVIEW_LAST,
        };
        self.write_serial(sheet, serial, &block)?;
        self.review_row += block.height;
        Ok(block)
    }

    /// Writes the serial into column A, merged over the block when it spans
    /// more than one row.
    fn write_serial(&mut self, sheet: Sheet, serial: u32, block: &Block) -> Result<(), ExportError> {
        let first = CellRef::new(block.first_row, COL_SERIAL);
        if block.height > 1 {
            let last = CellRef::new(block.last_row(), COL_SERIAL);
            self.sink.merge_number(sheet, first, last, f64::from(serial))
        } else {
            self.sink.write_number(sheet, first, f64::from(serial))
        }
    }

    fn write_basic(
        &mut self,
        serial: u32,
        record: &ProductRecord,
        tale_of_size: &Block,
        review: &Block,
    ) -> Result<(), ExportError> {
        let sheet = Sheet::Basic;
        let row = self.basic_row;
        let at = |col: u16| CellRef::new(row, col);
        let summary = &record.review;

        self.sink.write_number(sheet, at(0), f64::from(serial))?;

        let texts: [(u16, String); 5] = [
            (1, record.url.clone()),
            (2, record.breadcrumb.clone()),
            (3, record.category.clone()),
            (4, record.name.clone()),
            (5, record.display_price()),
        ];
        for (col, text) in &texts {
            self.sink.write_text(sheet, at(*col), text)?;
        }

        self.sink
            .write_wrapped(sheet, at(6), &numbered_list(&record.image_urls))?;

        let texts: [(u16, String); 5] = [
            (7, record.available_sizes.join(", ")),
            (8, record.sense_of_size.clone()),
            (9, record.description.title.clone()),
            (10, record.description.general.clone()),
            (11, record.description.itemization.clone()),
        ];
        for (col, text) in &texts {
            self.sink.write_text(sheet, at(*col), text)?;
        }

        let link = tale_of_size.link(
            Sheet::TaleOfSize,
            "View Tale of Size",
            "Click to see Tale Of Size",
        );
        self.sink.write_link(sheet, at(12), &link)?;

        let texts: [(u16, &str); 8] = [
            (13, &record.special_function),
            (14, &summary.rating),
            (15, &summary.number_of_reviews),
            (16, &summary.recommended_rate),
            (17, &summary.sense_of_fitting),
            (18, &summary.appropriation_of_length),
            (19, &summary.quality_of_material),
            (20, &summary.comfort),
        ];
        for (col, text) in texts {
            self.sink.write_text(sheet, at(col), text)?;
        }

        let link = review.link(
            Sheet::Review,
            "View Review Details",
            "Click to see Review Details",
        );
        self.sink.write_link(sheet, at(21), &link)?;

        self.sink
            .write_text(sheet, at(22), &record.keywords.join(", "))?;

        self.basic_row += 1;
        Ok(())
    }
}

fn write_header_row<S: SheetSink>(
    sink: &mut S,
    sheet: Sheet,
    headers: &[&str],
) -> Result<(), ExportError> {
    for (col, header) in (0u16..).zip(headers) {
        sink.write_text(sheet, CellRef::new(1, col), header)?;
    }
    Ok(())
}

/// Rows a block occupies: its tallest column, and never less than one.
fn block_height(tallest: usize) -> u32 {
    u32::try_from(tallest).unwrap_or(u32::MAX).max(1)
}

/// `"1. <url>\n2. <url>\n"`; empty for no URLs.
fn numbered_list(urls: &[String]) -> String {
    urls.iter()
        .enumerate()
        .map(|(i, url)| format!("{}. {url}\n", i + 1))
        .collect()
}

#[cfg(test)]
#[path = "spreadsheet_test.rs"]
mod tests;
