//! Reader for Doxygen `searchData` files
//!
//! The file is a JavaScript array literal:
//!
//! ```text
//! var searchData=
//! [
//!   ['halfedge_5fhandle',['halfedge_handle',['../a00311.html#a1d4c',1,'OpenMesh::Concepts::MeshItems::VertexT::halfedge_handle()'], ...]],
//!   ...
//! ];
//! ```
//!
//! Each record is `[id, [display, [url, external, scope], ...]]`.

use super::PayloadError;
use crate::index::{Destination, Entry};
use crate::utils::{decode_html_entities, decode_search_id};
use tracing::debug;

/// Nesting deeper than this is rejected instead of recursing further
const MAX_DEPTH: usize = 32;

/// Literal value as it appears in the file
#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Str(String),
    /// Integer (Doxygen's "external" flag); the value is not needed
    Num,
    Array(Vec<Literal>),
}

impl Literal {
    fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Num => "number",
            Literal::Array(_) => "array",
        }
    }
}

/// Parse a `searchData` file into entries, in file order
pub fn parse_search_data(text: &str) -> Result<Vec<Entry>, PayloadError> {
    let mut parser = LiteralParser::new(text);
    let records = parser.parse_document()?;

    let entries = records
        .into_iter()
        .enumerate()
        .map(|(record, value)| record_to_entry(record, value))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(records = entries.len(), "parsed searchData");
    Ok(entries)
}

/// Convert one `[id, [display, dest...]]` record
fn record_to_entry(record: usize, value: Literal) -> Result<Entry, PayloadError> {
    let shape = |message: String| PayloadError::Shape { record, message };

    let mut items = match value {
        Literal::Array(items) => items.into_iter(),
        other => return Err(shape(format!("expected array, found {}", other.kind()))),
    };

    let label = match items.next() {
        Some(Literal::Str(id)) => decode_search_id(&id),
        Some(other) => return Err(shape(format!("expected id string, found {}", other.kind()))),
        None => String::new(),
    };

    let mut destinations = Vec::new();

    if let Some(group) = items.next() {
        let mut group = match group {
            Literal::Array(group) => group.into_iter(),
            other => {
                return Err(shape(format!(
                    "expected destination group, found {}",
                    other.kind()
                )));
            }
        };

        let display_name = match group.next() {
            Some(Literal::Str(name)) => decode_html_entities(&name),
            Some(other) => {
                return Err(shape(format!(
                    "expected display name, found {}",
                    other.kind()
                )));
            }
            None => String::new(),
        };

        for dest in group {
            destinations.push(parse_destination(&display_name, dest).map_err(shape)?);
        }
    }

    Ok(Entry::new(label, destinations))
}

/// Convert one `[url, external, scope]` triple
fn parse_destination(display_name: &str, value: Literal) -> Result<Destination, String> {
    let fields = match value {
        Literal::Array(fields) => fields,
        other => return Err(format!("expected destination array, found {}", other.kind())),
    };

    let url = match fields.first() {
        Some(Literal::Str(url)) => url.as_str(),
        Some(other) => return Err(format!("expected url string, found {}", other.kind())),
        None => return Err("empty destination".to_string()),
    };

    let (anchor_path, anchor_fragment) = url.split_once('#').unwrap_or((url, ""));

    // fields[1] is Doxygen's "external" flag, not part of the destination
    let container_name = match fields.get(2) {
        Some(Literal::Str(scope)) if !scope.is_empty() => Some(decode_html_entities(scope)),
        Some(Literal::Str(_)) | None => None,
        Some(other) => return Err(format!("expected scope string, found {}", other.kind())),
    };

    Ok(Destination::new(
        anchor_path,
        anchor_fragment,
        display_name,
        container_name,
    ))
}

/// Recursive-descent parser for the subset of JavaScript Doxygen emits
struct LiteralParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self, message: impl Into<String>) -> PayloadError {
        PayloadError::Syntax {
            offset: self.pos,
            message: message.into(),
        }
    }

    /// Parse `[var name =] [ ... ] [;]`
    fn parse_document(&mut self) -> Result<Vec<Literal>, PayloadError> {
        let start = memchr::memchr(b'[', self.input.as_bytes())
            .ok_or_else(|| self.error("no array literal found"))?;

        let preamble = self.input[..start].trim();
        if !preamble.is_empty() && !preamble.ends_with('=') {
            return Err(self.error(format!("unexpected text before array: {:?}", preamble)));
        }

        self.pos = start;
        let records = match self.parse_value(0)? {
            Literal::Array(items) => items,
            other => return Err(self.error(format!("expected array, found {}", other.kind()))),
        };

        self.skip_whitespace();
        if self.peek() == Some(';') {
            self.pos += 1;
        }
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(self.error("trailing characters after array"));
        }

        Ok(records)
    }

    fn parse_value(&mut self, depth: usize) -> Result<Literal, PayloadError> {
        self.skip_whitespace();
        match self.peek() {
            Some('[') => self.parse_array(depth),
            Some(quote @ ('\'' | '"')) => self.parse_string(quote).map(Literal::Str),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) => Err(self.error(format!("unexpected character {:?}", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Literal, PayloadError> {
        if depth >= MAX_DEPTH {
            return Err(self.error("arrays nested too deeply"));
        }
        self.pos += 1; // '['

        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.pos += 1;
                return Ok(Literal::Array(items));
            }

            items.push(self.parse_value(depth + 1)?);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(']') => {
                    self.pos += 1;
                    return Ok(Literal::Array(items));
                }
                Some(c) => return Err(self.error(format!("expected ',' or ']', found {:?}", c))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String, PayloadError> {
        self.pos += 1; // opening quote
        let mut out = String::new();

        loop {
            let c = self.next_char().ok_or_else(|| self.error("unterminated string"))?;
            match c {
                c if c == quote => return Ok(out),
                '\\' => {
                    let escaped = self
                        .next_char()
                        .ok_or_else(|| self.error("unterminated escape"))?;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'u' => out.push(self.parse_unicode_escape()?),
                        other => out.push(other),
                    }
                }
                c => out.push(c),
            }
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char, PayloadError> {
        let digits = self
            .input
            .get(self.pos..self.pos + 4)
            .ok_or_else(|| self.error("truncated \\u escape"))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(self.error(format!("invalid \\u escape {:?}", digits)));
        }
        let code = u32::from_str_radix(digits, 16)
            .map_err(|_| self.error(format!("invalid \\u escape {:?}", digits)))?;
        self.pos += 4;
        Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn parse_number(&mut self) -> Result<Literal, PayloadError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.input[start..self.pos]
            .parse::<i64>()
            .map(|_| Literal::Num)
            .map_err(|_| PayloadError::Syntax {
                offset: start,
                message: format!("invalid number {:?}", &self.input[start..self.pos]),
            })
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.next_char();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}
