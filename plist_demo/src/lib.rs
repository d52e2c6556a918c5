//! plist_demo builds the sample "John Doe" record, writes it as an XML
//! property list and reads it back.
//!
//! The binary (`plistdemo`) also pretty-prints arbitrary property-list files.

mod format;

use bytes::Bytes;
use plist_xml::Value;

pub use crate::format::to_ascii;

/// Stand-in bytes for a picture of John Doe.
pub const PICTURE: [u8; 10] = [0x3c, 0x42, 0x81, 0xa5, 0x81, 0xa5, 0x99, 0x81, 0x42, 0x3c];

/// Builds the sample record.
pub fn sample_record() -> Value {
    let mut record = plist_xml::Mapping::new();
    record.insert("Name", "John Doe");
    record.insert("City of Birth", "Springfield");
    record.insert("Year Of Birth", 1965);
    record.insert(
        "Kids Names",
        vec![Value::string("John"), Value::string("Kyra")],
    );
    record.insert("Pets Names", Value::sequence(Vec::new()));
    record.insert("Picture", Value::binary(Bytes::from_static(&PICTURE)));
    Value::Mapping(record)
}

/// Parses XML property-list data and formats it as text.
pub fn plist2ascii(data: &[u8]) -> Result<String, plist_xml::ParseError> {
    let value = plist_xml::from_slice(data)?;
    Ok(format::to_ascii(&value))
}
