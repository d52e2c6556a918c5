use std::fs;
use std::path::Path;

use crate::{Error, Value, from_slice, to_vec};

/// Reads and decodes a property-list file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Value, Error> {
    let data = fs::read(path)?;
    Ok(from_slice(&data)?)
}

/// Encodes a value and writes it to `path`, replacing any existing file.
///
/// Nothing is written if encoding fails.
pub fn write_file(path: impl AsRef<Path>, value: &Value) -> Result<(), Error> {
    let data = to_vec(value)?;
    fs::write(path, data)?;
    Ok(())
}
