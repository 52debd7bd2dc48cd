//! Streaming pretty printer for JSON values with configurable indentation

use std::{
    io::{self, Write},
    str::FromStr,
};

use itertools::Itertools;
use serde_json::Value;

/// Unit of indentation for one nesting level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Tab,
    Spaces(u16),
}

impl Indent {
    fn write_level<W: Write>(&self, writer: &mut W, depth: usize) -> io::Result<()> {
        for _ in 0..depth {
            match self {
                Indent::Tab => writer.write_all(b"\t")?,
                Indent::Spaces(n) => {
                    for _ in 0..*n {
                        writer.write_all(b" ")?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl FromStr for Indent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("tab") {
            return Ok(Indent::Tab);
        }

        s.parse::<u16>()
            .map(Indent::Spaces)
            .map_err(|_| format!("expected \"tab\" or a number of spaces, got {:?}", s))
    }
}

#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub indent: Indent,
    /// Escape everything outside printable ASCII
    pub ascii_only: bool,
    pub sort_keys: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            indent: Indent::Tab,
            ascii_only: true,
            sort_keys: false,
        }
    }
}

/// Write a JSON string literal, escaping as required by `ascii_only`
fn write_string<W: Write>(writer: &mut W, s: &str, ascii_only: bool) -> io::Result<()> {
    writer.write_all(b"\"")?;

    // Copy runs of characters that need no escaping in one go
    let mut start = 0;
    for (i, c) in s.char_indices() {
        let short = match c {
            '"' => Some("\\\""),
            '\\' => Some("\\\\"),
            '\u{8}' => Some("\\b"),
            '\u{c}' => Some("\\f"),
            '\n' => Some("\\n"),
            '\r' => Some("\\r"),
            '\t' => Some("\\t"),
            _ => None,
        };
        let code = c as u32;
        if short.is_none() && code >= 0x20 && !(ascii_only && code >= 0x7f) {
            continue;
        }

        writer.write_all(s[start..i].as_bytes())?;
        match short {
            Some(escaped) => writer.write_all(escaped.as_bytes())?,
            None => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        start = i + c.len_utf8();
    }
    writer.write_all(s[start..].as_bytes())?;

    writer.write_all(b"\"")
}

fn write_value<W: Write>(
    writer: &mut W,
    value: &Value,
    options: &EmitOptions,
    depth: usize,
) -> io::Result<()> {
    match value {
        Value::Object(obj) => {
            if obj.is_empty() {
                return writer.write_all(b"{}");
            }

            let entries: Box<dyn Iterator<Item = (&String, &Value)>> = if options.sort_keys {
                Box::new(obj.iter().sorted_by(|a, b| a.0.cmp(b.0)))
            } else {
                Box::new(obj.iter())
            };

            writer.write_all(b"{\n")?;
            for (i, (key, member)) in entries.enumerate() {
                if i > 0 {
                    writer.write_all(b",\n")?;
                }
                options.indent.write_level(writer, depth + 1)?;
                write_string(writer, key, options.ascii_only)?;
                writer.write_all(b": ")?;
                write_value(writer, member, options, depth + 1)?;
            }
            writer.write_all(b"\n")?;
            options.indent.write_level(writer, depth)?;
            writer.write_all(b"}")
        }
        Value::Array(arr) => {
            if arr.is_empty() {
                return writer.write_all(b"[]");
            }

            writer.write_all(b"[\n")?;
            for (i, member) in arr.iter().enumerate() {
                if i > 0 {
                    writer.write_all(b",\n")?;
                }
                options.indent.write_level(writer, depth + 1)?;
                write_value(writer, member, options, depth + 1)?;
            }
            writer.write_all(b"\n")?;
            options.indent.write_level(writer, depth)?;
            writer.write_all(b"]")
        }
        Value::String(s) => write_string(writer, s, options.ascii_only),
        // Numbers keep the text they were parsed from
        Value::Number(n) => write!(writer, "{}", n),
        Value::Bool(true) => writer.write_all(b"true"),
        Value::Bool(false) => writer.write_all(b"false"),
        Value::Null => writer.write_all(b"null"),
    }
}

/// Write `value` followed by a single newline
pub fn write_document<W: Write>(
    writer: &mut W,
    value: &Value,
    options: &EmitOptions,
) -> io::Result<()> {
    write_value(writer, value, options, 0)?;
    writer.write_all(b"\n")
}
