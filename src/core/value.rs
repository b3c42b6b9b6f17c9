// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec value type system.
//!
//! Provides the dynamic value representation that both wire codecs consume
//! and produce. All variants are serde-serializable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Type alias for decoded message as field name -> value mapping.
///
/// Field order is not stored here; it always comes from the schema.
pub type DecodedMessage = HashMap<String, CodecValue>;

/// Dynamic value of a message field.
///
/// Sequences and arrays of byte-sized integers (`uint8`, `octet`, `char`)
/// decode to [`CodecValue::Bytes`]. Every other collection decodes to
/// [`CodecValue::Array`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CodecValue {
    // Boolean
    Bool(bool),

    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // String (UTF-8)
    String(String),

    // Byte blobs (uint8/octet collections)
    Bytes(Vec<u8>),

    // Array or sequence of values
    Array(Vec<CodecValue>),

    // Nested message
    Struct(DecodedMessage),
}

impl CodecValue {
    /// Check if this value is a numeric type (integers or floats).
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Check if this value is an integer type (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            CodecValue::Int8(_)
                | CodecValue::Int16(_)
                | CodecValue::Int32(_)
                | CodecValue::Int64(_)
                | CodecValue::UInt8(_)
                | CodecValue::UInt16(_)
                | CodecValue::UInt32(_)
                | CodecValue::UInt64(_)
        )
    }

    /// Check if this value is a floating-point type.
    pub fn is_float(&self) -> bool {
        matches!(self, CodecValue::Float32(_) | CodecValue::Float64(_))
    }

    /// Check if this value is a container type (array, bytes or struct).
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            CodecValue::Array(_) | CodecValue::Bytes(_) | CodecValue::Struct(_)
        )
    }

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CodecValue::Int8(v) => Some(*v as f64),
            CodecValue::Int16(v) => Some(*v as f64),
            CodecValue::Int32(v) => Some(*v as f64),
            CodecValue::Int64(v) => Some(*v as f64),
            CodecValue::UInt8(v) => Some(*v as f64),
            CodecValue::UInt16(v) => Some(*v as f64),
            CodecValue::UInt32(v) => Some(*v as f64),
            CodecValue::UInt64(v) => Some(*v as f64),
            CodecValue::Float32(v) => Some(*v as f64),
            CodecValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to convert this value to i64 without loss.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CodecValue::UInt64(v) => i64::try_from(*v).ok(),
            other => other.as_i128().map(|v| v as i64),
        }
    }

    /// Try to convert this value to u64 without loss.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_i128().and_then(|v| u64::try_from(v).ok())
    }

    /// Widen any integer (or bool) to i128.
    ///
    /// Encoders truncate the result to the declared width, which gives
    /// two's complement wrapping for out-of-range values.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            CodecValue::Bool(v) => Some(*v as i128),
            CodecValue::Int8(v) => Some(*v as i128),
            CodecValue::Int16(v) => Some(*v as i128),
            CodecValue::Int32(v) => Some(*v as i128),
            CodecValue::Int64(v) => Some(*v as i128),
            CodecValue::UInt8(v) => Some(*v as i128),
            CodecValue::UInt16(v) => Some(*v as i128),
            CodecValue::UInt32(v) => Some(*v as i128),
            CodecValue::UInt64(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// Try to interpret this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CodecValue::Bool(v) => Some(*v),
            other => other.as_i128().map(|v| v != 0),
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CodecValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CodecValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get the inner struct.
    pub fn as_struct(&self) -> Option<&DecodedMessage> {
        match self {
            CodecValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&[CodecValue]> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Number of elements of a collection value.
    pub fn collection_len(&self) -> Option<usize> {
        match self {
            CodecValue::Array(arr) => Some(arr.len()),
            CodecValue::Bytes(b) => Some(b.len()),
            _ => None,
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            CodecValue::Bool(_) => "bool",
            CodecValue::Int8(_) => "int8",
            CodecValue::Int16(_) => "int16",
            CodecValue::Int32(_) => "int32",
            CodecValue::Int64(_) => "int64",
            CodecValue::UInt8(_) => "uint8",
            CodecValue::UInt16(_) => "uint16",
            CodecValue::UInt32(_) => "uint32",
            CodecValue::UInt64(_) => "uint64",
            CodecValue::Float32(_) => "float32",
            CodecValue::Float64(_) => "float64",
            CodecValue::String(_) => "string",
            CodecValue::Bytes(_) => "bytes",
            CodecValue::Array(_) => "array",
            CodecValue::Struct(_) => "struct",
        }
    }
}

impl fmt::Display for CodecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecValue::Bool(v) => write!(f, "{v}"),
            CodecValue::Int8(v) => write!(f, "{v}"),
            CodecValue::Int16(v) => write!(f, "{v}"),
            CodecValue::Int32(v) => write!(f, "{v}"),
            CodecValue::Int64(v) => write!(f, "{v}"),
            CodecValue::UInt8(v) => write!(f, "{v}"),
            CodecValue::UInt16(v) => write!(f, "{v}"),
            CodecValue::UInt32(v) => write!(f, "{v}"),
            CodecValue::UInt64(v) => write!(f, "{v}"),
            CodecValue::Float32(v) => write!(f, "{v}"),
            CodecValue::Float64(v) => write!(f, "{v}"),
            CodecValue::String(v) => write!(f, "\"{v}\""),
            CodecValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            CodecValue::Array(v) => write!(f, "[{} elements]", v.len()),
            CodecValue::Struct(v) => write!(f, "{{{} fields}}", v.len()),
        }
    }
}

impl From<bool> for CodecValue {
    fn from(v: bool) -> Self {
        CodecValue::Bool(v)
    }
}

impl From<&str> for CodecValue {
    fn from(v: &str) -> Self {
        CodecValue::String(v.to_string())
    }
}

impl From<String> for CodecValue {
    fn from(v: String) -> Self {
        CodecValue::String(v)
    }
}

impl From<DecodedMessage> for CodecValue {
    fn from(v: DecodedMessage) -> Self {
        CodecValue::Struct(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_checking() {
        assert!(CodecValue::Int32(42).is_numeric());
        assert!(CodecValue::Int32(42).is_integer());
        assert!(CodecValue::Float64(2.5).is_numeric());
        assert!(CodecValue::Float64(2.5).is_float());
        assert!(!CodecValue::Float64(2.5).is_integer());
        assert!(!CodecValue::String("hello".to_string()).is_numeric());
        assert!(CodecValue::Bytes(vec![]).is_container());
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(CodecValue::Int32(42).as_f64(), Some(42.0));
        assert_eq!(CodecValue::Float32(2.5).as_f64(), Some(2.5f32 as f64));
        assert_eq!(CodecValue::String("hello".to_string()).as_f64(), None);
    }

    #[test]
    fn test_as_i64_and_u64() {
        assert_eq!(CodecValue::Int32(42).as_i64(), Some(42));
        assert_eq!(CodecValue::UInt32(42).as_i64(), Some(42));
        assert_eq!(CodecValue::Float64(2.5).as_i64(), None);
        assert_eq!(CodecValue::Int8(-1).as_u64(), None);
        let large = CodecValue::UInt64(i64::MAX as u64 + 1);
        assert_eq!(large.as_i64(), None);
        assert_eq!(large.as_u64(), Some(i64::MAX as u64 + 1));
    }

    #[test]
    fn test_as_i128_truncates_to_wrapped_width() {
        let v = CodecValue::Int32(300).as_i128().unwrap();
        assert_eq!(v as u8, 44);
        let v = CodecValue::Int8(-1).as_i128().unwrap();
        assert_eq!(v as u16, u16::MAX);
    }

    #[test]
    fn test_as_bool() {
        assert_eq!(CodecValue::Bool(true).as_bool(), Some(true));
        assert_eq!(CodecValue::UInt8(0).as_bool(), Some(false));
        assert_eq!(CodecValue::String("x".into()).as_bool(), None);
    }

    #[test]
    fn test_collection_len() {
        assert_eq!(CodecValue::Bytes(vec![1, 2, 3]).collection_len(), Some(3));
        assert_eq!(
            CodecValue::Array(vec![CodecValue::Int8(1)]).collection_len(),
            Some(1)
        );
        assert_eq!(CodecValue::Int8(1).collection_len(), None);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(CodecValue::Bool(true).type_name(), "bool");
        assert_eq!(CodecValue::UInt64(0).type_name(), "uint64");
        assert_eq!(CodecValue::Bytes(vec![]).type_name(), "bytes");
        assert_eq!(CodecValue::Struct(HashMap::new()).type_name(), "struct");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CodecValue::Bool(true)), "true");
        assert_eq!(format!("{}", CodecValue::Float32(1.5)), "1.5");
        assert_eq!(
            format!("{}", CodecValue::String("test".to_string())),
            "\"test\""
        );
        assert_eq!(format!("{}", CodecValue::Bytes(vec![1, 2, 3])), "<3 bytes>");
        assert_eq!(format!("{}", CodecValue::Array(vec![])), "[0 elements]");
    }

    #[test]
    fn test_serialization() {
        let mut msg = DecodedMessage::new();
        msg.insert("data".to_string(), CodecValue::Bytes(vec![1, 2]));
        msg.insert("name".to_string(), "x".into());
        let value = CodecValue::Struct(msg);
        let json = serde_json::to_string(&value).unwrap();
        let decoded: CodecValue = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, value);
    }
}
