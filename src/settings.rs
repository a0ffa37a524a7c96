//! Per-filter settings and the decoder for their stored form.
//!
//! The source CMS keeps each filter's settings as a PHP `serialize()` blob.
//! Only the value kinds the CMS writes are understood: null, booleans,
//! integers, floats, strings and (nested) arrays. Objects are rejected.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("unexpected end of settings data at byte {0}")]
    UnexpectedEnd(usize),

    #[error("unexpected '{found}' at byte {pos}, expected {expected}")]
    Unexpected {
        pos: usize,
        found: char,
        expected: &'static str,
    },

    #[error("unsupported value type '{kind}' at byte {pos}")]
    Unsupported { pos: usize, kind: char },

    #[error("invalid number at byte {0}")]
    InvalidNumber(usize),

    #[error("string at byte {0} is not valid UTF-8")]
    InvalidUtf8(usize),

    #[error("invalid array key at byte {0}")]
    InvalidKey(usize),

    #[error("settings must be a serialized array, found {0}")]
    NotAnArray(&'static str),

    #[error("trailing data after settings at byte {0}")]
    TrailingData(usize),

    #[error("arrays nested deeper than {max} levels at byte {0}", max = MAX_DEPTH)]
    TooDeep(usize),
}

/// Deepest array nesting accepted in a settings blob.
const MAX_DEPTH: usize = 64;

/// Settings handed to a filter transform: option name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterSettings(BTreeMap<String, Value>);

impl FilterSettings {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a serialized settings blob.
    ///
    /// The blob must hold a single top-level array and nothing after it.
    pub fn decode(blob: &[u8]) -> Result<Self, SettingsError> {
        let mut parser = Parser::new(blob);
        let entries = match parser.peek() {
            Some(b'a') => parser.array()?,
            Some(_) => {
                let value = parser.value()?;
                return Err(SettingsError::NotAnArray(kind_name(&value)));
            }
            None => return Err(SettingsError::UnexpectedEnd(0)),
        };
        if parser.pos != blob.len() {
            return Err(SettingsError::TrailingData(parser.pos));
        }

        Ok(Self(
            entries
                .into_iter()
                .map(|(key, value)| (key.into_string(), value))
                .collect(),
        ))
    }

    #[cfg(test)]
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    #[cfg(test)]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Read a non-negative integer, accepting the numeric strings the CMS
    /// stores for form-submitted values.
    pub fn get_usize(&self, name: &str) -> Option<usize> {
        match self.0.get(name)? {
            Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Read a flag. Integers and numeric strings count as true when non-zero.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.0.get(name)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            Value::String(s) => s.trim().parse::<i64>().ok().map(|n| n != 0),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) | Value::Object(_) => "array",
    }
}

enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    fn into_string(self) -> String {
        match self {
            Key::Int(i) => i.to_string(),
            Key::Str(s) => s,
        }
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn next(&mut self) -> Result<u8, SettingsError> {
        let byte = self.peek().ok_or(SettingsError::UnexpectedEnd(self.pos))?;
        self.pos += 1;
        Ok(byte)
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), SettingsError> {
        let pos = self.pos;
        let found = self.next()?;
        if found != byte {
            return Err(SettingsError::Unexpected {
                pos,
                found: found as char,
                expected,
            });
        }
        Ok(())
    }

    /// Consume bytes up to `delim`, returning them without the delimiter.
    fn until(&mut self, delim: u8) -> Result<&'a [u8], SettingsError> {
        let start = self.pos;
        let len = self.input[start..]
            .iter()
            .position(|&b| b == delim)
            .ok_or(SettingsError::UnexpectedEnd(self.input.len()))?;
        self.pos = start + len + 1;
        Ok(&self.input[start..start + len])
    }

    fn number<T: std::str::FromStr>(&mut self, delim: u8) -> Result<T, SettingsError> {
        let pos = self.pos;
        let raw = self.until(delim)?;
        std::str::from_utf8(raw)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(SettingsError::InvalidNumber(pos))
    }

    fn value(&mut self) -> Result<Value, SettingsError> {
        let pos = self.pos;
        match self.next()? {
            b'N' => {
                self.expect(b';', "';'")?;
                Ok(Value::Null)
            }
            b'b' => {
                self.expect(b':', "':'")?;
                let flag: u8 = self.number(b';')?;
                Ok(Value::Bool(flag != 0))
            }
            b'i' => {
                self.expect(b':', "':'")?;
                let int: i64 = self.number(b';')?;
                Ok(Value::Number(int.into()))
            }
            b'd' => {
                self.expect(b':', "':'")?;
                let float: f64 = self.number(b';')?;
                Number::from_f64(float)
                    .map(Value::Number)
                    .ok_or(SettingsError::InvalidNumber(pos))
            }
            b's' => Ok(Value::String(self.string_body()?)),
            b'a' => {
                self.pos = pos;
                let entries = self.array()?;
                Ok(entries_to_value(entries))
            }
            other => Err(SettingsError::Unsupported {
                pos,
                kind: other as char,
            }),
        }
    }

    /// Parse `:<len>:"<bytes>";` after the `s` marker.
    fn string_body(&mut self) -> Result<String, SettingsError> {
        self.expect(b':', "':'")?;
        let len: usize = self.number(b':')?;
        self.expect(b'"', "'\"'")?;
        let start = self.pos;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or(SettingsError::UnexpectedEnd(self.input.len()))?;
        let text = std::str::from_utf8(&self.input[start..end])
            .map_err(|_| SettingsError::InvalidUtf8(start))?
            .to_string();
        self.pos = end;
        self.expect(b'"', "closing '\"'")?;
        self.expect(b';', "';'")?;
        Ok(text)
    }

    fn array(&mut self) -> Result<Vec<(Key, Value)>, SettingsError> {
        if self.depth == MAX_DEPTH {
            return Err(SettingsError::TooDeep(self.pos));
        }
        self.depth += 1;
        let entries = self.array_body();
        self.depth -= 1;
        entries
    }

    fn array_body(&mut self) -> Result<Vec<(Key, Value)>, SettingsError> {
        self.expect(b'a', "'a'")?;
        self.expect(b':', "':'")?;
        let count: usize = self.number(b':')?;
        self.expect(b'{', "'{'")?;

        let mut entries = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            let key = self.key()?;
            let value = self.value()?;
            entries.push((key, value));
        }

        self.expect(b'}', "'}'")?;
        Ok(entries)
    }

    fn key(&mut self) -> Result<Key, SettingsError> {
        let pos = self.pos;
        match self.next()? {
            b'i' => {
                self.expect(b':', "':'")?;
                Ok(Key::Int(self.number(b';')?))
            }
            b's' => Ok(Key::Str(self.string_body()?)),
            _ => Err(SettingsError::InvalidKey(pos)),
        }
    }
}

/// Arrays keyed exactly `0..n` become lists, anything else an object.
fn entries_to_value(entries: Vec<(Key, Value)>) -> Value {
    let is_list = entries
        .iter()
        .enumerate()
        .all(|(i, (key, _))| matches!(key, Key::Int(k) if usize::try_from(*k) == Ok(i)));

    if is_list {
        Value::Array(entries.into_iter().map(|(_, value)| value).collect())
    } else {
        let map: Map<String, Value> = entries
            .into_iter()
            .map(|(key, value)| (key.into_string(), value))
            .collect();
        Value::Object(map)
    }
}
