// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parser implementations.

pub mod idl_parser;
pub mod literal;
pub mod msg_parser;

use crate::core::{CodecError, Result};
use crate::hash::legacy::SECTION_SEPARATOR;
use crate::schema::ast::TypeMap;
use crate::schema::SchemaFormat;

/// True for a section rule line: exactly 80 `=` characters.
pub(crate) fn is_section_rule(line: &str) -> bool {
    line.trim() == SECTION_SEPARATOR
}

/// Parse a schema with explicit format specification.
///
/// # Arguments
///
/// * `name` - Type the definition describes (e.g. `std_msgs/msg/Header`)
/// * `definition` - Schema definition string
/// * `format` - Grammar of the definition
///
/// # Returns
///
/// Every type defined by the document, keyed by full name.
pub fn parse_schema(name: &str, definition: &str, format: SchemaFormat) -> Result<TypeMap> {
    match format {
        SchemaFormat::Msg => msg_parser::parse(name, definition),
        SchemaFormat::Idl => idl_parser::parse(name, definition),
    }
}

/// Parse a schema given a container encoding string such as `ros1msg`,
/// `ros2msg` or `ros2idl`.
pub fn parse_schema_with_encoding_str(
    name: &str,
    definition: &str,
    encoding: &str,
) -> Result<TypeMap> {
    let format = SchemaFormat::from_encoding(encoding)
        .ok_or_else(|| CodecError::unsupported(format!("schema encoding '{encoding}'")))?;
    parse_schema(name, definition, format)
}
