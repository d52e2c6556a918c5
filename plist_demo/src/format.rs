use std::fmt::Write;

use plist_xml::Value;

/// Formats a Value as human-readable text.
pub fn to_ascii(value: &Value) -> String {
    let mut output = String::new();
    format_value(&mut output, value, 0);
    output
}

/// Formats a value with the given indentation level.
fn format_value(output: &mut String, value: &Value, indent: usize) {
    let indent_str = "  ".repeat(indent);

    match value {
        Value::String(s) => format_string_literal(output, s),
        Value::Integer(n) => write!(output, "{}", n).unwrap(),
        Value::Real(n) => write!(output, "{:?}", n).unwrap(),
        Value::Boolean(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Date(d) => write!(output, "date({})", d.format("%Y-%m-%dT%H:%M:%SZ")).unwrap(),
        Value::Binary(data) => {
            output.push_str("data<");
            for (i, byte) in data.iter().enumerate() {
                if i > 0 {
                    output.push(' ');
                }
                write!(output, "{:02x}", byte).unwrap();
            }
            output.push('>');
        }

        Value::Sequence(items) => {
            output.push('[');
            if items.is_empty() {
                output.push(']');
            } else {
                output.push('\n');
                for item in items {
                    output.push_str(&indent_str);
                    output.push_str("  ");
                    format_value(output, item, indent + 1);
                    output.push_str(",\n");
                }
                output.push_str(&indent_str);
                output.push(']');
            }
        }

        Value::Mapping(mapping) => {
            output.push('{');
            if mapping.is_empty() {
                output.push('}');
            } else {
                output.push('\n');
                for (k, v) in mapping {
                    output.push_str(&indent_str);
                    output.push_str("  ");
                    format_string_literal(output, k);
                    output.push_str(": ");
                    format_value(output, v, indent + 1);
                    output.push_str(",\n");
                }
                output.push_str(&indent_str);
                output.push('}');
            }
        }
    }
}

/// Formats a string as a quoted literal with escapes.
fn format_string_literal(output: &mut String, s: &str) {
    output.push('"');
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_ascii_control() => write!(output, "\\x{:02x}", c as u32).unwrap(),
            c => output.push(c),
        }
    }
    output.push('"');
}
