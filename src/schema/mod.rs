// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema model and grammar front ends.
//!
//! This module provides:
//! - the canonical schema model in [`ast`]
//! - the legacy `.msg` and OMG IDL parsers in [`parser`]
//! - the standard definitions every store can be seeded with in [`builtin_types`]

pub mod ast;
pub mod builtin_types;
pub mod parser;

pub use ast::{
    BaseType, ConstValue, ConstantDescriptor, Field, FieldDescriptor, MessageDefinition, TypeMap,
};
pub use parser::{idl_parser, msg_parser, parse_schema, parse_schema_with_encoding_str};

/// Schema grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Line-oriented `.msg` format
    Msg,
    /// OMG IDL format
    Idl,
}

impl SchemaFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "msg" => Some(SchemaFormat::Msg),
            "idl" => Some(SchemaFormat::Idl),
            _ => None,
        }
    }

    /// Map a container schema encoding to its grammar.
    pub fn from_encoding(encoding: &str) -> Option<Self> {
        match encoding.to_lowercase().as_str() {
            "msg" | "ros1msg" | "ros2msg" => Some(SchemaFormat::Msg),
            "idl" | "ros2idl" | "omgidl" => Some(SchemaFormat::Idl),
            _ => None,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaFormat::Msg => "msg",
            SchemaFormat::Idl => "idl",
        }
    }
}
