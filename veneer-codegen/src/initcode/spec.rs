//! Parser for init field specs such as `shelf.books[0].name="Moby Dick"`.
//!
//! ```text
//! path      := segment ('.' segment)*
//! segment   := IDENT (index | map-key)*
//! index     := '[' (INT | IDENT) ']'
//! map-key   := '{' (STRING | IDENT | INT) '}'
//! assign    := path '=' literal
//! ```
//!
//! A spec becomes a chain of nodes. The line type of each node comes from the
//! token that follows its key, and the last node carries the raw literal.
//! Keys and values are not checked here; that happens once the chain is
//! merged into a tree and typed.

use super::node::{InitCodeLineType, InitCodeNode};
use super::value::InitValueConfig;
use crate::{Error, Result};

/// Parse a single init field spec into a chain of nodes.
pub fn parse_field_spec(spec: &str) -> Result<InitCodeNode> {
    let (path, value) = split_assignment(spec)?;
    let keys = Cursor::new(spec, path).parse_path()?;

    let mut chain = keys.into_iter().rev();
    let Some((last_key, last_type)) = chain.next() else {
        return Err(fail(spec, "empty field path"));
    };
    let mut node = match value {
        Some(value) => InitCodeNode::with_value(last_key, InitValueConfig::with_value(value)),
        None => InitCodeNode::new(last_key, last_type),
    };
    for (key, line_type) in chain {
        node = InitCodeNode::with_children(key, line_type, vec![node]);
    }
    Ok(node)
}

fn fail(spec: &str, message: impl Into<String>) -> Error {
    Error::FieldPath {
        spec: spec.to_string(),
        message: message.into(),
    }
}

/// Split on the first `=` outside brackets and quotes.
fn split_assignment(spec: &str) -> Result<(&str, Option<&str>)> {
    let mut depth = 0usize;
    let mut quoted = false;
    for (i, c) in spec.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '[' | '{' if !quoted => depth += 1,
            ']' | '}' if !quoted => depth = depth.saturating_sub(1),
            '=' if !quoted && depth == 0 => {
                let value = spec[i + 1..].trim();
                if value.is_empty() {
                    return Err(fail(spec, "missing value after '='"));
                }
                return Ok((spec[..i].trim(), Some(value)));
            }
            _ => {}
        }
    }
    if quoted {
        return Err(fail(spec, "unterminated string"));
    }
    Ok((spec.trim(), None))
}

struct Cursor<'a> {
    spec: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(spec: &'a str, path: &str) -> Self {
        Self {
            spec,
            chars: path.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Keys in order, each paired with the line type implied by what follows it.
    fn parse_path(&mut self) -> Result<Vec<(String, InitCodeLineType)>> {
        let mut keys = Vec::new();
        let mut current = self.ident()?;
        while let Some(c) = self.peek() {
            self.pos += 1;
            let (line_type, next) = match c {
                '.' => (InitCodeLineType::Structure, self.ident()?),
                '[' => (InitCodeLineType::List, self.bracketed(']')?),
                '{' => (InitCodeLineType::Map, self.bracketed('}')?),
                other => {
                    return Err(fail(
                        self.spec,
                        format!("unexpected '{}' at position {}", other, self.pos - 1),
                    ));
                }
            };
            keys.push((current, line_type));
            current = next;
        }
        keys.push((current, InitCodeLineType::Unknown));
        Ok(keys)
    }

    fn ident(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            let valid = c == '_' || c.is_ascii_alphabetic() || (self.pos > start && c.is_ascii_digit());
            if !valid {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(fail(
                self.spec,
                format!("expected a field name at position {}", start),
            ));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    /// Read an index or map key up to `close`, keeping quotes intact.
    fn bracketed(&mut self, close: char) -> Result<String> {
        let start = self.pos;
        let mut quoted = false;
        while let Some(c) = self.peek() {
            if c == '"' {
                quoted = !quoted;
            } else if c == close && !quoted {
                let key: String = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Self::check_key(self.spec, key, close);
            }
            self.pos += 1;
        }
        Err(fail(self.spec, format!("missing '{}'", close)))
    }

    fn check_key(spec: &str, key: String, close: char) -> Result<String> {
        let trimmed = key.trim();
        let is_string = trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"');
        let is_word = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c == '_' || c == '-' || c == '+' || c.is_ascii_alphanumeric());
        match close {
            ']' if is_word => Ok(trimmed.to_string()),
            '}' if is_word || is_string => Ok(trimmed.to_string()),
            _ => Err(fail(spec, format!("invalid key '{}'", key))),
        }
    }
}
