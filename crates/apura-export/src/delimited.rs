//! Delimited-text serialization of a result set

use crate::error::ExportError;
use apura_model::ResultSet;

/// UTF-8 byte-order mark, so spreadsheet tools decode accented text
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Serialize the current result rows as CSV
///
/// The result's own column set becomes the header. Fields containing a
/// comma or a quote are quoted with internal quotes doubled. The buffer
/// starts with the UTF-8 byte-order mark.
///
/// # Errors
/// `ExportError::EmptyData` when the result has no rows.
pub fn write_csv(result: &ResultSet) -> Result<Vec<u8>, ExportError> {
    if result.is_empty() {
        return Err(ExportError::EmptyData);
    }

    let mut buffer = Vec::new();
    buffer.extend_from_slice(UTF8_BOM);

    let mut writer = csv::Writer::from_writer(buffer);
    writer.write_record(&result.columns)?;
    for row in &result.rows {
        writer.write_record(row.iter().map(|cell| cell.render()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Serialize(e.to_string()))
}
