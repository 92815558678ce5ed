// src/services/export.rs
// DOCUMENTATION: Spreadsheet export of search results
// PURPOSE: Write and read the semicolon-separated, BOM-prefixed CSV file

use crate::errors::SearchError;
use crate::models::BusinessRecord;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// UTF-8 byte order mark, so spreadsheet tools detect the encoding
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
/// Field separator
pub const DELIMITER: u8 = b';';
/// Column headers, in export order
pub const HEADERS: [&str; 4] = ["Name", "Address", "Phone", "Website"];

/// Write records as CSV
/// DOCUMENTATION: BOM, header row, then one row per record. The header
/// is written even when there are no records.
pub fn write_csv<W: Write>(records: &[BusinessRecord], mut writer: W) -> Result<(), SearchError> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write records to a file, replacing it if it exists
pub fn export_to_path(records: &[BusinessRecord], path: &Path) -> Result<(), SearchError> {
    let file = File::create(path).map_err(|e| {
        log::error!("Cannot create {}: {}", path.display(), e);
        SearchError::Export(format!("{}: {}", path.display(), e))
    })?;

    write_csv(records, BufWriter::new(file))?;
    log::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

/// Read records back from the export format
/// DOCUMENTATION: The BOM is optional so hand-edited files still load
pub fn read_csv<R: Read>(mut reader: R) -> Result<Vec<BusinessRecord>, SearchError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes.as_slice());

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_reader(content);

    csv_reader
        .deserialize::<BusinessRecord>()
        .map(|row| row.map_err(SearchError::from))
        .collect()
}
