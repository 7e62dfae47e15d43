//! Pretty JSON dump of every record, indented with four spaces.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use shopscrape_core::ProductRecord;

use crate::error::ExportError;

const INDENT: &[u8] = b"    ";

/// Serializes `records` as one JSON array into `writer`.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization or the underlying write
/// fails.
pub fn write_json<W: Write>(writer: W, records: &[ProductRecord]) -> Result<(), ExportError> {
    let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    records.serialize(&mut serializer)?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the JSON dump to it.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created or flushed and
/// [`ExportError::Json`] if serialization fails.
pub fn write_json_file(path: &Path, records: &[ProductRecord]) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, records)?;
    writer.flush()?;

    tracing::info!(path = %path.display(), records = records.len(), "wrote JSON dump");
    Ok(())
}
