use datagen_core::Record;

use crate::errors::GenerationError;
use crate::session::columns;

/// CSV with a header row; cells missing from a record are left empty.
pub fn records_to_csv(records: &[Record]) -> Result<Vec<u8>, GenerationError> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    let header = columns(records);
    writer.write_record(&header)?;

    for record in records {
        let row: Vec<String> = header
            .iter()
            .map(|label| {
                record
                    .get(label)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(bytes)
}
