use datagen_core::Record;

use crate::errors::GenerationError;

/// Pretty JSON array of objects, keys in record order.
pub fn records_to_json(records: &[Record]) -> Result<Vec<u8>, GenerationError> {
    let mut bytes = serde_json::to_vec_pretty(records)?;
    bytes.push(b'\n');
    Ok(bytes)
}
