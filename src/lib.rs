//! plist_xml is a property-list value model with an XML property-list codec.
//!
//! Values are plain owned trees of strings, integers, reals, booleans, dates,
//! binary blobs, sequences and ordered mappings. They are written in the
//! XML property-list format (`<plist version="1.0">`) and parsed back with
//! round-trip fidelity.
//!
//! # Examples
//!
//! ```
//! use plist_xml::{Value, from_slice, to_vec};
//!
//! let mut record = Value::mapping();
//! record.set("Name", "John Doe").unwrap();
//! record.set("Year Of Birth", 1965).unwrap();
//! record.set("Kids Names", vec![Value::from("John"), Value::from("Kyra")]).unwrap();
//!
//! let bytes = to_vec(&record).unwrap();
//! let parsed = from_slice(&bytes).unwrap();
//! assert_eq!(parsed, record);
//! ```

mod error;
mod file;
mod mapping;
mod options;
mod parse;
mod types;
mod value;
mod write;

pub use crate::error::{
    EncodeError, EncodeErrorKind, EncodeResult, Error, ParseError, ParseErrorKind, ParseResult,
    TypeError,
};
pub use crate::file::{read_file, write_file};
pub use crate::mapping::Mapping;
pub use crate::options::{DEFAULT_MAX_DEPTH, Options};
pub use crate::parse::{from_slice, from_slice_with, from_str};
pub use crate::types::Kind;
pub use crate::value::Value;
pub use crate::write::{to_string, to_vec, to_vec_with};
