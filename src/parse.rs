use std::mem;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::{Kind, Mapping, Options, ParseError, ParseErrorKind, ParseResult, Value};

/// Parse an XML property list with the default options.
pub fn from_slice(data: &[u8]) -> ParseResult<Value> {
    from_slice_with(data, &Options::default())
}

/// Parse an XML property list held in a string.
pub fn from_str(text: &str) -> ParseResult<Value> {
    Decoder::new(text, &Options::default()).document()
}

/// Parse an XML property list.
///
/// The input must be UTF-8 and consist of a single `<plist>` root element
/// holding exactly one value.
pub fn from_slice_with(data: &[u8], options: &Options) -> ParseResult<Value> {
    let text = std::str::from_utf8(data)
        .map_err(|e| ParseError::new(ParseErrorKind::InvalidUtf8, e.valid_up_to() as u64))?;
    Decoder::new(text, options).document()
}

/// A structural event with text, comments and processing instructions
/// filtered out.
enum Token {
    Open { name: String, empty: bool },
    Close(String),
    Eof,
}

struct Decoder<'a> {
    reader: Reader<&'a [u8]>,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    fn new(text: &'a str, options: &Options) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(false);
        Decoder {
            reader,
            max_depth: options.max_depth,
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.reader.buffer_position() as u64)
    }

    fn xml_error(&self, err: impl std::fmt::Display) -> ParseError {
        ParseError::new(
            ParseErrorKind::Xml(err.to_string()),
            self.reader.error_position() as u64,
        )
    }

    /// Reads the next element boundary. Whitespace is skipped; any other text
    /// is an error attributed to the enclosing `context` element.
    fn next_token(&mut self, context: &str) -> ParseResult<Token> {
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Ok(Token::Open { name, empty: false });
                }
                Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Ok(Token::Open { name, empty: true });
                }
                Ok(Event::End(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Ok(Token::Close(name));
                }
                Ok(Event::Text(e)) => {
                    if !e.iter().all(|b| b.is_ascii_whitespace()) {
                        return Err(
                            self.error(ParseErrorKind::UnexpectedText(context.to_string()))
                        );
                    }
                }
                Ok(Event::CData(e)) => {
                    if !e.iter().all(|b| b.is_ascii_whitespace()) {
                        return Err(
                            self.error(ParseErrorKind::UnexpectedText(context.to_string()))
                        );
                    }
                }
                Ok(Event::Eof) => return Ok(Token::Eof),
                // Declarations, doctypes, comments and processing instructions.
                Ok(_) => {}
                Err(e) => return Err(self.xml_error(e)),
            }
        }
    }

    /// Reads the text content of a leaf element up to its closing tag.
    fn text(&mut self, empty: bool) -> ParseResult<String> {
        let mut text = String::new();
        if empty {
            return Ok(text);
        }
        loop {
            match self.reader.read_event() {
                Ok(Event::Text(e)) => {
                    let unescaped = e.unescape().map_err(|err| self.xml_error(err))?;
                    text.push_str(&unescaped);
                }
                Ok(Event::CData(e)) => text.push_str(&String::from_utf8_lossy(&e)),
                Ok(Event::End(_)) => return Ok(text),
                Ok(Event::Start(e) | Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Err(self.error(ParseErrorKind::UnexpectedElement(name)));
                }
                Ok(Event::Eof) => return Err(self.error(ParseErrorKind::UnexpectedEof)),
                Ok(_) => {}
                Err(e) => return Err(self.xml_error(e)),
            }
        }
    }

    fn document(&mut self) -> ParseResult<Value> {
        match self.next_token("document")? {
            Token::Open { name, empty } if name == "plist" => {
                if empty {
                    return Err(self.error(ParseErrorKind::EmptyRoot));
                }
            }
            Token::Open { name, .. } => return Err(self.error(ParseErrorKind::InvalidRoot(name))),
            Token::Close(name) => return Err(self.error(ParseErrorKind::UnexpectedEnd(name))),
            Token::Eof => return Err(self.error(ParseErrorKind::MissingRoot)),
        }

        let value = match self.next_token("plist")? {
            Token::Open { name, empty } => self.value(&name, empty)?,
            Token::Close(_) => return Err(self.error(ParseErrorKind::EmptyRoot)),
            Token::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
        };

        match self.next_token("plist")? {
            Token::Close(_) => {}
            Token::Open { .. } => return Err(self.error(ParseErrorKind::MultipleRootValues)),
            Token::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
        }

        match self.next_token("document") {
            Ok(Token::Eof) => Ok(value),
            Ok(_) | Err(_) => Err(self.error(ParseErrorKind::TrailingContent)),
        }
    }

    /// Reads the value whose opening tag was just consumed.
    ///
    /// Open containers are kept on an explicit stack, so nesting costs heap
    /// rather than call frames and is bounded only by `max_depth`.
    fn value(&mut self, name: &str, empty: bool) -> ParseResult<Value> {
        let mut current = match self.open(name, empty, 0)? {
            Opened::Value(value) => return Ok(value),
            Opened::Container(frame) => frame,
        };
        let mut parents: Vec<Frame> = Vec::new();

        loop {
            let (name, empty) = match self.next_token(current.element())? {
                Token::Open { name, empty } => (name, empty),
                Token::Close(_) => {
                    let closed = match parents.pop() {
                        Some(parent) => mem::replace(&mut current, parent),
                        None => return self.close(current),
                    };
                    let value = self.close(closed)?;
                    current.push(value);
                    continue;
                }
                Token::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
            };

            if let Frame::Mapping { mapping, key } = &mut current {
                match key {
                    None => {
                        if name != "key" {
                            return Err(self.error(ParseErrorKind::ExpectedKey(name)));
                        }
                        let text = self.text(empty)?;
                        if mapping.contains_key(&text) {
                            return Err(self.error(ParseErrorKind::DuplicateKey(text)));
                        }
                        *key = Some(text);
                        continue;
                    }
                    Some(pending) if name == "key" => {
                        return Err(self.error(ParseErrorKind::DanglingKey(pending.clone())));
                    }
                    Some(_) => {}
                }
            }

            match self.open(&name, empty, parents.len() + 1)? {
                Opened::Value(value) => current.push(value),
                Opened::Container(frame) => parents.push(mem::replace(&mut current, frame)),
            }
        }
    }

    /// Starts the element `name` nested inside `depth` open containers.
    ///
    /// Leaves are read to their closing tag; non-empty containers are
    /// returned as a frame for [`Decoder::value`] to fill.
    fn open(&mut self, name: &str, empty: bool, depth: usize) -> ParseResult<Opened> {
        let Some(kind) = Kind::from_element(name.as_bytes()) else {
            let kind = if name == "key" {
                ParseErrorKind::UnexpectedElement(name.to_string())
            } else {
                ParseErrorKind::UnknownElement(name.to_string())
            };
            return Err(self.error(kind));
        };

        if kind.is_container() && depth >= self.max_depth {
            return Err(self.error(ParseErrorKind::DepthLimitExceeded(self.max_depth)));
        }

        let value = match kind {
            Kind::Sequence if empty => Value::Sequence(Vec::new()),
            Kind::Sequence => return Ok(Opened::Container(Frame::Sequence(Vec::new()))),
            Kind::Mapping if empty => Value::Mapping(Mapping::new()),
            Kind::Mapping => {
                return Ok(Opened::Container(Frame::Mapping {
                    mapping: Mapping::new(),
                    key: None,
                }));
            }
            Kind::String => Value::String(self.text(empty)?),
            Kind::Integer => {
                let text = self.text(empty)?;
                // `i64::from_str` only accepts an optional sign followed by
                // decimal digits.
                match text.trim().parse::<i64>() {
                    Ok(n) => Value::Integer(n),
                    Err(_) => return Err(self.error(ParseErrorKind::InvalidInteger(text))),
                }
            }
            Kind::Real => {
                let text = self.text(empty)?;
                match text.trim().parse::<f64>() {
                    Ok(n) => Value::Real(n),
                    Err(_) => return Err(self.error(ParseErrorKind::InvalidReal(text))),
                }
            }
            Kind::Boolean => {
                if !empty {
                    match self.next_token(name)? {
                        Token::Close(_) => {}
                        Token::Open { name, .. } => {
                            return Err(self.error(ParseErrorKind::UnexpectedElement(name)));
                        }
                        Token::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
                    }
                }
                Value::Boolean(name == "true")
            }
            #[cfg(feature = "chrono")]
            Kind::Date => {
                let text = self.text(empty)?;
                match chrono::DateTime::parse_from_rfc3339(text.trim()) {
                    Ok(d) => Value::date(d.with_timezone(&chrono::Utc)),
                    Err(_) => return Err(self.error(ParseErrorKind::InvalidDate(text))),
                }
            }
            Kind::Binary => {
                let text = self.text(empty)?;
                let encoded: Vec<u8> = text
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();
                match STANDARD.decode(&encoded) {
                    Ok(data) => Value::Binary(Bytes::from(data)),
                    Err(e) => return Err(self.error(ParseErrorKind::InvalidBase64(e.to_string()))),
                }
            }
        };
        Ok(Opened::Value(value))
    }

    /// Finishes a container at its closing tag.
    fn close(&self, frame: Frame) -> ParseResult<Value> {
        match frame {
            Frame::Sequence(items) => Ok(Value::Sequence(items)),
            Frame::Mapping { key: Some(key), .. } => {
                Err(self.error(ParseErrorKind::DanglingKey(key)))
            }
            Frame::Mapping { mapping, key: None } => Ok(Value::Mapping(mapping)),
        }
    }
}

enum Opened {
    Value(Value),
    Container(Frame),
}

/// A container whose closing tag has not been read yet.
enum Frame {
    Sequence(Vec<Value>),
    /// `key` holds a key that is still waiting for its value.
    Mapping {
        mapping: Mapping,
        key: Option<String>,
    },
}

impl Frame {
    fn element(&self) -> &'static str {
        match self {
            Frame::Sequence(_) => Kind::Sequence.element(),
            Frame::Mapping { .. } => Kind::Mapping.element(),
        }
    }

    fn push(&mut self, value: Value) {
        match self {
            Frame::Sequence(items) => items.push(value),
            Frame::Mapping { mapping, key } => {
                if let Some(key) = key.take() {
                    mapping.insert(key, value);
                }
            }
        }
    }
}
