//! Reply values and command arguments.

use bytes::Bytes;
use std::fmt;

use crate::error::{Error, Result};

/// A decoded reply from the server.
///
/// This maps one-to-one onto the RESP2 frame types, with both null
/// encodings (`$-1` and `*-1`) collapsing to [`Value::Null`]. Bulk payloads
/// are kept as raw bytes; converting to text is the caller's choice.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A null bulk string or null array.
    Null,

    /// A simple string (`+OK`).
    Simple(String),

    /// An error reply (`-ERR ...`), message verbatim.
    ///
    /// At the top level of a reply the engine surfaces this as
    /// [`Error::Server`]; inside an array it stays a value.
    Error(String),

    /// A 64-bit signed integer (`:42`).
    Integer(i64),

    /// A length-prefixed bulk string, possibly binary, possibly empty.
    Bulk(Bytes),

    /// An array of zero or more values, recursively.
    Array(Vec<Value>),
}

impl Value {
    /// Returns the value as a string slice, if it is textual.
    ///
    /// # Examples
    /// ```
    /// # use respite::Value;
    /// let val = Value::Bulk(bytes::Bytes::from("hello"));
    /// assert_eq!(val.as_str(), Some("hello"));
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Simple(s) => Some(s.as_str()),
            Value::Bulk(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns the value as raw bytes, if it is a bulk string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bulk(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as an array, if it is one.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Converts the value into a `String`.
    pub fn into_string(self) -> Result<String> {
        match self {
            Value::Simple(s) => Ok(s),
            Value::Bulk(b) => String::from_utf8(b.to_vec())
                .map_err(|e| Error::Protocol(format!("invalid UTF-8 in bulk string: {}", e))),
            other => Err(Error::UnexpectedResponse {
                expected: "string",
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// Converts the value into raw bytes.
    pub fn into_bytes(self) -> Result<Bytes> {
        match self {
            Value::Bulk(b) => Ok(b),
            Value::Simple(s) => Ok(Bytes::from(s)),
            other => Err(Error::UnexpectedResponse {
                expected: "bytes",
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// Converts the value into an `i64`.
    pub fn into_integer(self) -> Result<i64> {
        match self {
            Value::Integer(n) => Ok(n),
            other => Err(Error::UnexpectedResponse {
                expected: "integer",
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// Converts the value into a `Vec<Value>`.
    ///
    /// Null converts to the empty vector, mirroring how servers report
    /// missing aggregates.
    pub fn into_array(self) -> Result<Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(vec![]),
            other => Err(Error::UnexpectedResponse {
                expected: "array",
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// Returns a human-readable type name for this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Simple(_) => "simple string",
            Value::Error(_) => "error",
            Value::Integer(_) => "integer",
            Value::Bulk(_) => "bulk string",
            Value::Array(_) => "array",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "(nil)"),
            Value::Simple(s) => write!(f, "{}", s),
            Value::Error(s) => write!(f, "(error) {}", s),
            Value::Integer(n) => write!(f, "(integer) {}", n),
            Value::Bulk(b) => match std::str::from_utf8(b) {
                Ok(s) => write!(f, "\"{}\"", s),
                Err(_) => write!(f, "<binary {} bytes>", b.len()),
            },
            Value::Array(items) => {
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {}", i + 1, val)?;
                }
                Ok(())
            }
        }
    }
}

/// A single command argument.
///
/// Text arguments may qualify for the inline command form; binary payloads
/// always go out as bulk strings. Numeric arguments are rendered to text
/// before submission (the [`ToArg`] conversions do this).
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A UTF-8 text argument.
    Text(String),

    /// An opaque binary argument.
    Blob(Bytes),
}

impl Arg {
    /// The raw bytes this argument puts on the wire.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Arg::Text(s) => s.as_bytes(),
            Arg::Blob(b) => b,
        }
    }

    /// The argument's length in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns `true` if the argument is empty.
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Whether this argument may appear in an inline command line:
    /// non-empty text with no spaces and no CR/LF.
    pub(crate) fn inline_safe(&self) -> bool {
        match self {
            Arg::Text(s) => {
                !s.is_empty() && !s.bytes().any(|b| b == b' ' || b == b'\r' || b == b'\n')
            }
            Arg::Blob(_) => false,
        }
    }
}

/// Trait for types that can be converted into a command argument.
pub trait ToArg {
    /// Convert this value into an [`Arg`].
    fn to_arg(&self) -> Arg;
}

impl ToArg for &str {
    fn to_arg(&self) -> Arg {
        Arg::Text((*self).to_string())
    }
}

impl ToArg for String {
    fn to_arg(&self) -> Arg {
        Arg::Text(self.clone())
    }
}

impl ToArg for &String {
    fn to_arg(&self) -> Arg {
        Arg::Text((*self).clone())
    }
}

impl ToArg for Bytes {
    fn to_arg(&self) -> Arg {
        Arg::Blob(self.clone())
    }
}

impl ToArg for &[u8] {
    fn to_arg(&self) -> Arg {
        Arg::Blob(Bytes::copy_from_slice(self))
    }
}

impl ToArg for Vec<u8> {
    fn to_arg(&self) -> Arg {
        Arg::Blob(Bytes::copy_from_slice(self))
    }
}

impl ToArg for i64 {
    fn to_arg(&self) -> Arg {
        Arg::Text(self.to_string())
    }
}

impl ToArg for u64 {
    fn to_arg(&self) -> Arg {
        Arg::Text(self.to_string())
    }
}

impl ToArg for i32 {
    fn to_arg(&self) -> Arg {
        Arg::Text(self.to_string())
    }
}

impl ToArg for u32 {
    fn to_arg(&self) -> Arg {
        Arg::Text(self.to_string())
    }
}

impl ToArg for usize {
    fn to_arg(&self) -> Arg {
        Arg::Text(self.to_string())
    }
}

impl ToArg for f64 {
    fn to_arg(&self) -> Arg {
        Arg::Text(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_covers_simple_and_bulk() {
        assert_eq!(Value::Simple("OK".into()).as_str(), Some("OK"));
        assert_eq!(Value::Bulk(Bytes::from("v")).as_str(), Some("v"));
        assert_eq!(Value::Integer(1).as_str(), None);
    }

    #[test]
    fn into_array_treats_null_as_empty() {
        assert_eq!(Value::Null.into_array().unwrap(), vec![]);
    }

    #[test]
    fn into_integer_rejects_other_types() {
        let err = Value::Simple("OK".into()).into_integer().unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { expected: "integer", .. }));
    }

    #[test]
    fn inline_safety() {
        assert!("GET".to_arg().inline_safe());
        assert!(!"two words".to_arg().inline_safe());
        assert!(!"line\r\nbreak".to_arg().inline_safe());
        assert!(!"".to_arg().inline_safe());
        assert!(!Bytes::from_static(b"raw").to_arg().inline_safe());
    }

    #[test]
    fn numeric_args_render_to_text() {
        assert_eq!(42i64.to_arg(), Arg::Text("42".into()));
        assert_eq!(0.5f64.to_arg(), Arg::Text("0.5".into()));
    }
}
