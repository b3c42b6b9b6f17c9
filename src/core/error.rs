// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for robotypes.
//!
//! Every failure in the crate is a [`CodecError`]. Errors fall into two
//! families, reported by [`CodecError::kind`]:
//! - [`ErrorKind::Schema`]: grammar, registry and type resolution problems
//! - [`ErrorKind::Codec`]: wire-level size, serialize and deserialize problems

use std::fmt;

/// Family an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed grammar input, conflicting definition or unknown type.
    Schema,
    /// Value or byte stream does not match the schema.
    Codec,
}

/// Errors produced by parsing, registration, hashing and the wire codecs.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Parse error in a message definition
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Definition is syntactically valid but not acceptable
    InvalidSchema {
        /// Schema name or identifier
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// Type not found in registry
    TypeNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// A type name was registered again with a different definition
    ConflictingDefinition {
        /// Type name with two different definitions
        type_name: String,
    },

    /// Buffer too short for requested read
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        cursor_pos: u64,
    },

    /// Array or sequence length exceeded data bounds
    LengthExceeded {
        /// Length that was read
        length: usize,
        /// Position in buffer
        position: usize,
        /// Buffer length
        buffer_len: usize,
    },

    /// Field decode error with context
    FieldDecodeError {
        /// Field path
        field_name: String,
        /// Field type
        field_type: String,
        /// Cursor position when error occurred
        cursor_pos: u64,
        /// Underlying error
        cause: String,
    },

    /// Message value does not fit the schema
    FieldEncodeError {
        /// Field path
        field_name: String,
        /// Underlying error
        cause: String,
    },

    /// Unsupported type or feature
    Unsupported {
        /// What is not supported
        feature: String,
    },

    /// Encoding/decoding error
    EncodeError {
        /// Codec context (e.g., "CDR", "ROS1")
        codec: String,
        /// Error message
        message: String,
    },
}

impl CodecError {
    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        CodecError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create a conflicting definition error.
    pub fn conflicting_definition(type_name: impl Into<String>) -> Self {
        CodecError::ConflictingDefinition {
            type_name: type_name.into(),
        }
    }

    /// Create an encode/decode error.
    pub fn encode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::EncodeError {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, cursor_pos: u64) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create a length exceeded error.
    pub fn length_exceeded(length: usize, position: usize, buffer_len: usize) -> Self {
        CodecError::LengthExceeded {
            length,
            position,
            buffer_len,
        }
    }

    /// Create an error for a field whose value does not match its schema.
    pub fn field_encode(field_name: impl Into<String>, cause: impl Into<String>) -> Self {
        CodecError::FieldEncodeError {
            field_name: field_name.into(),
            cause: cause.into(),
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        CodecError::Unsupported {
            feature: feature.into(),
        }
    }

    /// Which family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::ParseError { .. }
            | CodecError::InvalidSchema { .. }
            | CodecError::TypeNotFound { .. }
            | CodecError::ConflictingDefinition { .. } => ErrorKind::Schema,
            CodecError::BufferTooShort { .. }
            | CodecError::LengthExceeded { .. }
            | CodecError::FieldDecodeError { .. }
            | CodecError::FieldEncodeError { .. }
            | CodecError::Unsupported { .. }
            | CodecError::EncodeError { .. } => ErrorKind::Codec,
        }
    }

    /// Wrap a decode failure with the field it happened in.
    ///
    /// Nested failures keep the innermost cause and grow the field path
    /// outward, so the final error reads `outer.inner.leaf`. Schema problems
    /// and unsupported features are returned unchanged.
    pub(crate) fn in_decoded_field(self, field: &str, field_type: &str, cursor_pos: u64) -> Self {
        match self {
            CodecError::FieldDecodeError {
                field_name,
                field_type: inner_type,
                cursor_pos: inner_pos,
                cause,
            } => CodecError::FieldDecodeError {
                field_name: format!("{field}.{field_name}"),
                field_type: inner_type,
                cursor_pos: inner_pos,
                cause,
            },
            CodecError::TypeNotFound { .. }
            | CodecError::InvalidSchema { .. }
            | CodecError::Unsupported { .. } => self,
            other => CodecError::FieldDecodeError {
                field_name: field.to_string(),
                field_type: field_type.to_string(),
                cursor_pos,
                cause: other.to_string(),
            },
        }
    }

    /// Wrap an encode failure with the field it happened in.
    pub(crate) fn in_encoded_field(self, field: &str) -> Self {
        match self {
            CodecError::FieldEncodeError { field_name, cause } => CodecError::FieldEncodeError {
                field_name: format!("{field}.{field_name}"),
                cause,
            },
            CodecError::TypeNotFound { .. }
            | CodecError::InvalidSchema { .. }
            | CodecError::Unsupported { .. } => self,
            other => CodecError::FieldEncodeError {
                field_name: field.to_string(),
                cause: other.to_string(),
            },
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            CodecError::TypeNotFound { type_name } => vec![("type", type_name.clone())],
            CodecError::ConflictingDefinition { type_name } => {
                vec![("type", type_name.clone())]
            }
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::LengthExceeded {
                length,
                position,
                buffer_len,
            } => vec![
                ("length", length.to_string()),
                ("position", position.to_string()),
                ("buffer_len", buffer_len.to_string()),
            ],
            CodecError::FieldDecodeError {
                field_name,
                field_type,
                cursor_pos,
                cause,
            } => vec![
                ("field", field_name.clone()),
                ("type", field_type.clone()),
                ("cursor", cursor_pos.to_string()),
                ("cause", cause.clone()),
            ],
            CodecError::FieldEncodeError { field_name, cause } => {
                vec![("field", field_name.clone()), ("cause", cause.clone())]
            }
            CodecError::Unsupported { feature } => vec![("feature", feature.clone())],
            CodecError::EncodeError { codec, message } => {
                vec![("codec", codec.clone()), ("message", message.clone())]
            }
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::ParseError { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => {
                write!(f, "Invalid schema '{schema_name}': {reason}")
            }
            CodecError::TypeNotFound { type_name } => {
                write!(f, "Type not found: '{type_name}'")
            }
            CodecError::ConflictingDefinition { type_name } => {
                write!(f, "Conflicting definition for type '{type_name}'")
            }
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
            ),
            CodecError::LengthExceeded {
                length,
                position,
                buffer_len,
            } => write!(
                f,
                "Length {length} exceeds buffer at position {position} (buffer length: {buffer_len})"
            ),
            CodecError::FieldDecodeError {
                field_name,
                field_type,
                cursor_pos,
                cause,
            } => write!(
                f,
                "Failed to decode field '{field_name}' (type: '{field_type}', cursor_pos: {cursor_pos}): {cause}"
            ),
            CodecError::FieldEncodeError { field_name, cause } => {
                write!(f, "Failed to encode field '{field_name}': {cause}")
            }
            CodecError::Unsupported { feature } => {
                write!(f, "Unsupported feature: '{feature}'")
            }
            CodecError::EncodeError { codec, message } => {
                write!(f, "{codec} encode error: {message}")
            }
        }
    }
}

impl std::error::Error for CodecError {}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::EncodeError {
            codec: "IO".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for robotypes operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let err = CodecError::parse("TestContext", "test error message");
        assert!(matches!(err, CodecError::ParseError { .. }));
        assert_eq!(
            err.to_string(),
            "Parse error in TestContext: test error message"
        );
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_invalid_schema_error() {
        let err = CodecError::invalid_schema("MySchema", "invalid field");
        assert_eq!(err.to_string(), "Invalid schema 'MySchema': invalid field");
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_type_not_found_error() {
        let err = CodecError::type_not_found("UnknownType");
        assert_eq!(err.to_string(), "Type not found: 'UnknownType'");
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_conflicting_definition_error() {
        let err = CodecError::conflicting_definition("pkg/msg/A");
        assert_eq!(
            err.to_string(),
            "Conflicting definition for type 'pkg/msg/A'"
        );
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.log_fields(), vec![("type", "pkg/msg/A".to_string())]);
    }

    #[test]
    fn test_buffer_too_short_error() {
        let err = CodecError::buffer_too_short(100, 50, 10);
        assert_eq!(
            err.to_string(),
            "Buffer too short: requested 100 bytes at position 10, but only 50 bytes available"
        );
        assert_eq!(err.kind(), ErrorKind::Codec);
    }

    #[test]
    fn test_length_exceeded_error() {
        let err = CodecError::length_exceeded(1000, 500, 800);
        assert_eq!(
            err.to_string(),
            "Length 1000 exceeds buffer at position 500 (buffer length: 800)"
        );
        let fields = err.log_fields();
        assert_eq!(fields[0], ("length", "1000".to_string()));
        assert_eq!(fields[2], ("buffer_len", "800".to_string()));
    }

    #[test]
    fn test_unsupported_error() {
        let err = CodecError::unsupported("float128");
        assert_eq!(err.to_string(), "Unsupported feature: 'float128'");
        assert_eq!(err.kind(), ErrorKind::Codec);
    }

    #[test]
    fn test_field_decode_path_grows_outward() {
        let leaf = CodecError::buffer_too_short(4, 1, 12);
        let err = leaf
            .in_decoded_field("sec", "int32", 12)
            .in_decoded_field("stamp", "builtin_interfaces/msg/Time", 4)
            .in_decoded_field("header", "std_msgs/msg/Header", 4);
        match &err {
            CodecError::FieldDecodeError {
                field_name,
                field_type,
                cursor_pos,
                ..
            } => {
                assert_eq!(field_name, "header.stamp.sec");
                assert_eq!(field_type, "int32");
                assert_eq!(*cursor_pos, 12);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.kind(), ErrorKind::Codec);
    }

    #[test]
    fn test_field_encode_path_grows_outward() {
        let err = CodecError::field_encode("data", "expected 3 elements, got 2")
            .in_encoded_field("inner");
        assert_eq!(
            err.to_string(),
            "Failed to encode field 'inner.data': expected 3 elements, got 2"
        );
    }

    #[test]
    fn test_type_not_found_passes_through_field_wrapping() {
        let err = CodecError::type_not_found("pkg/msg/Missing").in_encoded_field("x");
        assert!(matches!(err, CodecError::TypeNotFound { .. }));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let codec_err: CodecError = io_err.into();
        assert_eq!(codec_err.to_string(), "IO encode error: file not found");
    }

    #[test]
    fn test_error_clone() {
        let err1 = CodecError::parse("Context", "message");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
