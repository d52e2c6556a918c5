use thiserror::Error;

use crate::Kind;

/// Error returned when a [`Value`](crate::Value) accessor or mutator is used
/// on the wrong variant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("type error: expected {expected}, got {actual}")]
pub struct TypeError {
    /// The variant the operation required.
    pub expected: Kind,
    /// The variant the value actually holds.
    pub actual: Kind,
}

impl TypeError {
    pub const fn new(expected: Kind, actual: Kind) -> Self {
        Self { expected, actual }
    }
}

/// Specific kinds of parsing errors that can occur when decoding an XML
/// property list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("malformed XML: {0}")]
    Xml(String),

    #[error("invalid UTF-8 in document")]
    InvalidUtf8,

    #[error("unexpected end of document")]
    UnexpectedEof,

    #[error("expected root element <plist>, got <{0}>")]
    InvalidRoot(String),

    #[error("no <plist> root element found")]
    MissingRoot,

    #[error("<plist> element holds no value")]
    EmptyRoot,

    #[error("<plist> element holds more than one value")]
    MultipleRootValues,

    #[error("content after the <plist> root element")]
    TrailingContent,

    #[error("unknown element <{0}>")]
    UnknownElement(String),

    #[error("element <{0}> is not allowed here")]
    UnexpectedElement(String),

    #[error("unexpected closing tag </{0}>")]
    UnexpectedEnd(String),

    #[error("unexpected text content in <{0}>")]
    UnexpectedText(String),

    #[error("expected <key> in <dict>, got <{0}>")]
    ExpectedKey(String),

    #[error("key {0:?} has no value")]
    DanglingKey(String),

    #[error("duplicate dict key {0:?}")]
    DuplicateKey(String),

    #[error("invalid integer {0:?}")]
    InvalidInteger(String),

    #[error("invalid real {0:?}")]
    InvalidReal(String),

    #[error("invalid date {0:?}")]
    InvalidDate(String),

    #[error("invalid base64 data: {0}")]
    InvalidBase64(String),

    #[error("nesting depth exceeds the limit of {0}")]
    DepthLimitExceeded(usize),
}

/// Error type returned when decoding an XML property list fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error at byte {offset}: {kind}")]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: u64,
}

impl ParseError {
    /// Creates a new ParseError with the given kind at a byte offset.
    pub const fn new(kind: ParseErrorKind, offset: u64) -> Self {
        Self { kind, offset }
    }

    /// Returns the specific kind of parse error that occurred.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Byte offset into the input near which the error was detected.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// Result type for decoding operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Specific kinds of errors that can occur when encoding a value tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeErrorKind {
    #[error("nesting depth exceeds the limit of {0}")]
    DepthLimitExceeded(usize),

    #[error("character {0:?} cannot be represented in XML")]
    InvalidCharacter(char),

    #[error("date {0} is outside the four-digit year range or has sub-second precision")]
    InvalidDate(String),

    #[error("XML writer error: {0}")]
    Xml(String),
}

/// Error type returned when encoding to an XML property list fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("encode error: {kind}")]
pub struct EncodeError {
    kind: EncodeErrorKind,
}

impl EncodeError {
    pub fn new(kind: EncodeErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the specific kind of encode error that occurred.
    pub fn kind(&self) -> &EncodeErrorKind {
        &self.kind
    }
}

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors surfaced by the file helpers.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
