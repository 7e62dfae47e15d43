use std::io::Write;

use shopscrape_core::ProductRecord;

use crate::error::ExportError;

/// Writes one record as pretty JSON followed by a blank line.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails and
/// [`ExportError::Io`] if the trailing newlines cannot be written.
pub fn print_record<W: Write>(out: &mut W, record: &ProductRecord) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut *out, record)?;
    writeln!(out)?;
    writeln!(out)?;
    Ok(())
}
