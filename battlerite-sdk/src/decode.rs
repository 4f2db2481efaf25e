//! Path-aware field access over untyped JSON.
//!
//! Every decoder in the crate reads the service's objects through [`Fields`],
//! so a missing or wrong-shaped field surfaces as a [`DecodeError`] carrying
//! the full path to the offending value (`included[3].attributes.stats.kills`).
use serde_json::{Map, Value};
use std::fmt::Display;

pub type Result<T> = core::result::Result<T, DecodeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The field is absent (or `null` where a value is required).
    Missing,
    /// The field is present but has the wrong shape.
    Mismatch { expected: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub path: String,
    /// Position of the telemetry event being decoded, if any.
    pub index: Option<usize>,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            index: None,
            kind: DecodeErrorKind::Missing,
        }
    }
    pub fn mismatch(path: impl Into<String>, expected: &'static str) -> Self {
        Self {
            path: path.into(),
            index: None,
            kind: DecodeErrorKind::Mismatch { expected },
        }
    }
    pub(crate) fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl std::error::Error for DecodeError {}

impl Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DecodeErrorKind::Missing => write!(f, "missing field `{}`", self.path)?,
            DecodeErrorKind::Mismatch { expected } => {
                write!(f, "field `{}` is not a valid {}", self.path, expected)?
            }
        }
        if let Some(index) = self.index {
            write!(f, " (event {})", index)?;
        }
        Ok(())
    }
}

/// A record that can be read out of one JSON object.
pub trait Decode: Sized {
    fn decode(fields: &Fields<'_>) -> Result<Self>;
}

/// Borrowed view of a JSON object that remembers where it lives in the document.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Fields<'a> {
    /// Wraps `value`, which must be an object, as the root of `path`.
    pub fn new(value: &'a Value, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            _ => Err(DecodeError::mismatch(path, "object")),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Raw value of `key`, treating `null` the same as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match self.map.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    fn require(&self, key: &str) -> Result<&'a Value> {
        self.get(key)
            .ok_or_else(|| DecodeError::missing(self.child_path(key)))
    }

    pub fn object(&self, key: &str) -> Result<Fields<'a>> {
        Fields::new(self.require(key)?, self.child_path(key))
    }

    pub fn opt_object(&self, key: &str) -> Result<Option<Fields<'a>>> {
        self.get(key)
            .map(|value| Fields::new(value, self.child_path(key)))
            .transpose()
    }

    pub fn array(&self, key: &str) -> Result<&'a [Value]> {
        match self.require(key)? {
            Value::Array(items) => Ok(items),
            _ => Err(DecodeError::mismatch(self.child_path(key), "array")),
        }
    }

    pub fn str(&self, key: &str) -> Result<&'a str> {
        match self.require(key)? {
            Value::String(s) => Ok(s),
            _ => Err(DecodeError::mismatch(self.child_path(key), "string")),
        }
    }

    pub fn string(&self, key: &str) -> Result<String> {
        self.str(key).map(str::to_string)
    }

    pub fn opt_string(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(DecodeError::mismatch(self.child_path(key), "string")),
        }
    }

    pub fn bool(&self, key: &str) -> Result<bool> {
        match self.require(key)? {
            Value::Bool(b) => Ok(*b),
            _ => Err(DecodeError::mismatch(self.child_path(key), "boolean")),
        }
    }

    /// Boolean that the service sometimes sends as a string (`"true"`, `"0"`, ...).
    pub fn loose_bool(&self, key: &str) -> Result<bool> {
        let path = || self.child_path(key);
        match self.require(key)? {
            Value::Bool(b) => Ok(*b),
            Value::String(s) => match s.as_str() {
                "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
                "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
                _ => Err(DecodeError::mismatch(path(), "boolean string")),
            },
            _ => Err(DecodeError::mismatch(path(), "boolean")),
        }
    }

    /// Integer field. Wire numbers are floating point, so fractions are truncated.
    pub fn int(&self, key: &str) -> Result<i64> {
        as_int(self.require(key)?).ok_or_else(|| DecodeError::mismatch(self.child_path(key), "number"))
    }

    /// Integer stat that is `null` or absent when the player has never recorded it.
    pub fn int_or_zero(&self, key: &str) -> Result<i64> {
        match self.get(key) {
            None => Ok(0),
            Some(value) => {
                as_int(value).ok_or_else(|| DecodeError::mismatch(self.child_path(key), "number"))
            }
        }
    }

    pub fn float(&self, key: &str) -> Result<f64> {
        self.require(key)?
            .as_f64()
            .ok_or_else(|| DecodeError::mismatch(self.child_path(key), "number"))
    }

    /// Integer that the service encodes as a decimal string (ids, actor numbers).
    pub fn numeric_str(&self, key: &str) -> Result<i64> {
        let path = || self.child_path(key);
        match self.require(key)? {
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| DecodeError::mismatch(path(), "numeric string")),
            value => as_int(value).ok_or_else(|| DecodeError::mismatch(path(), "numeric string")),
        }
    }

    pub fn int_array(&self, key: &str) -> Result<Vec<i64>> {
        self.array(key)?
            .iter()
            .enumerate()
            .map(|(i, value)| {
                as_int(value).ok_or_else(|| {
                    DecodeError::mismatch(format!("{}[{}]", self.child_path(key), i), "number")
                })
            })
            .collect()
    }

    /// Decodes every element of the array at `key` as a `T`.
    pub fn list<T: Decode>(&self, key: &str) -> Result<Vec<T>> {
        let base = self.child_path(key);
        self.array(key)?
            .iter()
            .enumerate()
            .map(|(i, value)| T::decode(&Fields::new(value, format!("{}[{}]", base, i))?))
            .collect()
    }

    /// Untyped value of `key`, `Value::Null` when absent.
    pub fn value(&self, key: &str) -> Result<Value> {
        Ok(self.get(key).cloned().unwrap_or(Value::Null))
    }

    pub fn values(&self, key: &str) -> Result<Vec<Value>> {
        self.array(key).map(<[Value]>::to_vec)
    }

    pub fn map(&self) -> &'a Map<String, Value> {
        self.map
    }
}

/// Integers past the `i64` range are rejected rather than wrapped or saturated.
fn as_int(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if let Some(n) = value.as_u64() {
        return i64::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|n| n.is_finite() && *n >= i64::MIN as f64 && *n < i64::MAX as f64)
        .map(|n| n as i64)
}
