use std::borrow::Cow;
use std::fmt::Write as _;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::{EncodeError, EncodeErrorKind, EncodeResult, Options, Value};

const DOCTYPE: &str = r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

/// Serialize a value to an XML property list with the default options.
pub fn to_vec(value: &Value) -> EncodeResult<Vec<u8>> {
    to_vec_with(value, &Options::default())
}

/// Serialize a value to an XML property list as a `String`.
pub fn to_string(value: &Value) -> EncodeResult<String> {
    let buffer = to_vec(value)?;
    String::from_utf8(buffer).map_err(|e| EncodeError::new(EncodeErrorKind::Xml(e.to_string())))
}

/// Serialize a value to an XML property list.
pub fn to_vec_with(value: &Value, options: &Options) -> EncodeResult<Vec<u8>> {
    let writer = if options.pretty {
        Writer::new_with_indent(Vec::new(), b'\t', 1)
    } else {
        Writer::new(Vec::new())
    };
    let mut encoder = Encoder {
        writer,
        max_depth: options.max_depth,
    };

    encoder.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    encoder.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;
    let mut root = BytesStart::new("plist");
    root.push_attribute(("version", "1.0"));
    encoder.write_event(Event::Start(root))?;
    encoder.write_value(value, 0)?;
    encoder.write_event(Event::End(BytesEnd::new("plist")))?;

    let mut buffer = encoder.writer.into_inner();
    buffer.push(b'\n');
    Ok(buffer)
}

struct Encoder {
    writer: Writer<Vec<u8>>,
    max_depth: usize,
}

impl Encoder {
    fn write_event(&mut self, event: Event<'_>) -> EncodeResult<()> {
        self.writer
            .write_event(event)
            .map_err(|e| EncodeError::new(EncodeErrorKind::Xml(e.to_string())))
    }

    /// Returns the depth for the children of a container opened at `depth`.
    fn enter(&self, depth: usize) -> EncodeResult<usize> {
        if depth >= self.max_depth {
            return Err(EncodeError::new(EncodeErrorKind::DepthLimitExceeded(
                self.max_depth,
            )));
        }
        Ok(depth + 1)
    }

    /// Writes a leaf element whose content is already escaped.
    ///
    /// Empty content is written as a self-closing tag so indentation never
    /// ends up inside the element.
    fn write_leaf(&mut self, name: &str, escaped: &str) -> EncodeResult<()> {
        if escaped.is_empty() {
            return self.write_event(Event::Empty(BytesStart::new(name)));
        }
        self.write_event(Event::Start(BytesStart::new(name)))?;
        self.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
        self.write_event(Event::End(BytesEnd::new(name)))
    }

    fn write_value(&mut self, value: &Value, depth: usize) -> EncodeResult<()> {
        let name = value.kind().element();
        match value {
            Value::String(s) => self.write_leaf(name, &escape_text(s)?),
            Value::Integer(n) => self.write_leaf(name, &n.to_string()),
            Value::Real(n) => self.write_leaf(name, &format_real(*n)),
            Value::Boolean(b) => {
                let name = if *b { "true" } else { "false" };
                self.write_event(Event::Empty(BytesStart::new(name)))
            }
            #[cfg(feature = "chrono")]
            Value::Date(d) => {
                use chrono::{Datelike, SecondsFormat, Timelike};

                // `<date>` holds exactly four year digits and whole seconds.
                if !(0..=9999).contains(&d.year()) || d.nanosecond() != 0 {
                    let text = d.to_rfc3339_opts(SecondsFormat::AutoSi, true);
                    return Err(EncodeError::new(EncodeErrorKind::InvalidDate(text)));
                }
                self.write_leaf(name, &d.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Value::Binary(data) => self.write_leaf(name, &STANDARD.encode(data)),
            Value::Sequence(items) => {
                let depth = self.enter(depth)?;
                if items.is_empty() {
                    return self.write_event(Event::Empty(BytesStart::new(name)));
                }
                self.write_event(Event::Start(BytesStart::new(name)))?;
                for item in items {
                    self.write_value(item, depth)?;
                }
                self.write_event(Event::End(BytesEnd::new(name)))
            }
            Value::Mapping(mapping) => {
                let depth = self.enter(depth)?;
                if mapping.is_empty() {
                    return self.write_event(Event::Empty(BytesStart::new(name)));
                }
                self.write_event(Event::Start(BytesStart::new(name)))?;
                for (key, item) in mapping {
                    self.write_leaf("key", &escape_text(key)?)?;
                    self.write_value(item, depth)?;
                }
                self.write_event(Event::End(BytesEnd::new(name)))
            }
        }
    }
}

/// Escapes text content for XML.
///
/// The five reserved characters become named references. Carriage return,
/// DEL and the C1 controls become numeric references. The remaining C0
/// controls and the noncharacters U+FFFE and U+FFFF are not legal XML 1.0
/// characters in any form.
pub(crate) fn escape_text(text: &str) -> EncodeResult<Cow<'_, str>> {
    let needs_escape = |c: char| {
        matches!(c, '&' | '<' | '>' | '"' | '\'' | '\u{FFFE}' | '\u{FFFF}')
            || (c.is_control() && c != '\t' && c != '\n')
    };
    if !text.contains(needs_escape) {
        return Ok(Cow::Borrowed(text));
    }

    let mut output = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&apos;"),
            '\t' | '\n' => output.push(c),
            '\0'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => {
                return Err(EncodeError::new(EncodeErrorKind::InvalidCharacter(c)));
            }
            c if c.is_control() => write!(output, "&#x{:X};", c as u32).unwrap(),
            c => output.push(c),
        }
    }
    Ok(Cow::Owned(output))
}

fn format_real(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "+infinity" } else { "-infinity" };
        text.to_string()
    } else {
        format!("{n:?}")
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::{escape_text, format_real};
    use crate::{EncodeErrorKind, Mapping, Options, Value, to_string, to_vec_with};

    #[test]
    fn test_escape_reserved() {
        assert_eq!(
            escape_text("5 < 3 & 3 > 1 \"quoted\" 'ok'").unwrap(),
            "5 &lt; 3 &amp; 3 &gt; 1 &quot;quoted&quot; &apos;ok&apos;"
        );
        assert_eq!(escape_text("plain text").unwrap(), "plain text");
    }

    #[test]
    fn test_escape_control() {
        assert_eq!(escape_text("a\tb\nc\rd").unwrap(), "a\tb\nc&#xD;d");
        assert_eq!(escape_text("\u{7f}\u{85}").unwrap(), "&#x7F;&#x85;");
        for c in ['\0', '\u{1}', '\u{8}', '\u{B}', '\u{C}', '\u{E}', '\u{1F}', '\u{FFFE}', '\u{FFFF}'] {
            assert_eq!(
                escape_text(&format!("a{c}b")).unwrap_err().kind(),
                &EncodeErrorKind::InvalidCharacter(c)
            );
        }
    }

    #[test]
    fn test_illegal_character_in_key() {
        let mut mapping = Mapping::new();
        mapping.insert("bell\u{7}", 1);
        assert_eq!(
            to_string(&Value::Mapping(mapping)).unwrap_err().kind(),
            &EncodeErrorKind::InvalidCharacter('\u{7}')
        );
        assert_eq!(
            to_string(&Value::string("\u{1}")).unwrap_err().kind(),
            &EncodeErrorKind::InvalidCharacter('\u{1}')
        );
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_unrepresentable_dates() {
        use chrono::DateTime;

        let far_future = Value::date(DateTime::from_timestamp(400_000_000_000, 0).unwrap());
        assert_eq!(
            to_string(&far_future).unwrap_err().kind(),
            &EncodeErrorKind::InvalidDate("+14645-06-30T15:06:40Z".to_string())
        );

        let before_year_zero = Value::date(DateTime::from_timestamp(-62_167_219_201, 0).unwrap());
        assert!(matches!(
            to_string(&before_year_zero).unwrap_err().kind(),
            EncodeErrorKind::InvalidDate(_)
        ));

        let fractional = Value::Date(DateTime::from_timestamp(1, 5).unwrap());
        assert_eq!(
            to_string(&fractional).unwrap_err().kind(),
            &EncodeErrorKind::InvalidDate("1970-01-01T00:00:01.000000005Z".to_string())
        );

        let last = Value::date(DateTime::from_timestamp(253_402_300_799, 0).unwrap());
        assert!(to_string(&last).unwrap().contains("<date>9999-12-31T23:59:59Z</date>"));
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(1.5), "1.5");
        assert_eq!(format_real(-2.0), "-2.0");
        assert_eq!(format_real(f64::NAN), "nan");
        assert_eq!(format_real(f64::INFINITY), "+infinity");
        assert_eq!(format_real(f64::NEG_INFINITY), "-infinity");
    }

    #[test]
    fn test_document_layout() {
        let mut mapping = Mapping::new();
        mapping.insert("Name", "John Doe");
        mapping.insert("Year Of Birth", 1965);
        mapping.insert("Pets Names", Value::sequence(vec![]));
        mapping.insert("Picture", Value::binary(Bytes::from_static(b"\x3c\x42")));
        let xml = to_string(&Value::Mapping(mapping)).unwrap();
        assert_eq!(
            xml,
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
                "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
                "<plist version=\"1.0\">\n",
                "\t<dict>\n",
                "\t\t<key>Name</key>\n",
                "\t\t<string>John Doe</string>\n",
                "\t\t<key>Year Of Birth</key>\n",
                "\t\t<integer>1965</integer>\n",
                "\t\t<key>Pets Names</key>\n",
                "\t\t<array/>\n",
                "\t\t<key>Picture</key>\n",
                "\t\t<data>PEI=</data>\n",
                "\t</dict>\n",
                "</plist>\n",
            )
        );
    }

    #[test]
    fn test_compact_layout() {
        let value = Value::sequence(vec![Value::boolean(true), Value::integer(-3)]);
        let xml = String::from_utf8(to_vec_with(&value, &Options::compact()).unwrap()).unwrap();
        assert!(xml.ends_with(
            "<plist version=\"1.0\"><array><true/><integer>-3</integer></array></plist>\n"
        ));
    }

    #[test]
    fn test_empty_leaves() {
        let value = Value::sequence(vec![Value::string(""), Value::binary(Bytes::new())]);
        let xml = String::from_utf8(to_vec_with(&value, &Options::compact()).unwrap()).unwrap();
        assert!(xml.contains("<array><string/><data/></array>"));
    }

    #[test]
    fn test_depth_limit() {
        let mut value = Value::sequence(vec![]);
        for _ in 0..3 {
            value = Value::sequence(vec![value]);
        }
        // four nested arrays
        let options = Options::default().with_max_depth(4);
        assert!(to_vec_with(&value, &options).is_ok());
        let options = Options::default().with_max_depth(3);
        assert_eq!(
            to_vec_with(&value, &options).unwrap_err().kind(),
            &EncodeErrorKind::DepthLimitExceeded(3)
        );
    }
}
