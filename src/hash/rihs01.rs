// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! RIHS01 type description hash.
//!
//! The digest is SHA-256 over a JSON type description of the root type and
//! every transitively referenced type (sorted by name). The JSON uses `", "`
//! and `": "` as separators.

use crate::core::{Result, TypeAccessor};
use crate::schema::ast::{BaseType, FieldDescriptor, MessageDefinition, EMPTY_STRUCT_PLACEHOLDER};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io;

/// Prefix of every digest.
pub const RIHS01_PREFIX: &str = "RIHS01_";

const NESTED_TYPE: u8 = 1;
const ARRAY_OFFSET: u8 = 48;
const BOUNDED_SEQUENCE_OFFSET: u8 = 96;
const UNBOUNDED_SEQUENCE_OFFSET: u8 = 144;
const BOUNDED_STRING: u8 = 21;

fn base_type_id(base: BaseType, bound: usize) -> u8 {
    match base {
        BaseType::Int8 => 2,
        BaseType::UInt8 => 3,
        BaseType::Int16 => 4,
        BaseType::UInt16 => 5,
        BaseType::Int32 => 6,
        BaseType::UInt32 => 7,
        BaseType::Int64 => 8,
        BaseType::UInt64 => 9,
        BaseType::Float32 => 10,
        BaseType::Float64 => 11,
        BaseType::Float128 => 12,
        BaseType::Char => 13,
        BaseType::Bool => 15,
        BaseType::Octet => 16,
        BaseType::String if bound > 0 => BOUNDED_STRING,
        BaseType::String => 17,
    }
}

#[derive(Debug, Serialize)]
struct FieldType<'a> {
    type_id: u8,
    capacity: usize,
    string_capacity: usize,
    nested_type_name: &'a str,
}

#[derive(Debug, Serialize)]
struct FieldDescription<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    field_type: FieldType<'a>,
}

#[derive(Debug, Serialize)]
struct TypeDescription<'a> {
    type_name: &'a str,
    fields: Vec<FieldDescription<'a>>,
}

#[derive(Debug, Serialize)]
struct HashInput<'a> {
    type_description: TypeDescription<'a>,
    referenced_type_descriptions: Vec<TypeDescription<'a>>,
}

/// Element type id and string capacity of a non-collection descriptor.
fn scalar_type<'a>(descriptor: &'a FieldDescriptor) -> (u8, usize, &'a str) {
    match descriptor {
        FieldDescriptor::Base { base, bound } => (base_type_id(*base, *bound), *bound, ""),
        FieldDescriptor::Named(name) => (NESTED_TYPE, 0, name.as_str()),
        // Nested collections have no id; the inner collection is described
        // by its element.
        FieldDescriptor::Array { element, .. } | FieldDescriptor::Sequence { element, .. } => {
            scalar_type(element)
        }
    }
}

fn field_type(descriptor: &FieldDescriptor) -> FieldType<'_> {
    let (offset, capacity, element) = match descriptor {
        FieldDescriptor::Array { element, length } => (ARRAY_OFFSET, *length, element.as_ref()),
        FieldDescriptor::Sequence { element, bound } if *bound > 0 => {
            (BOUNDED_SEQUENCE_OFFSET, *bound, element.as_ref())
        }
        FieldDescriptor::Sequence { element, .. } => (UNBOUNDED_SEQUENCE_OFFSET, 0, element.as_ref()),
        scalar => (0, 0, scalar),
    };
    let (type_id, string_capacity, nested_type_name) = scalar_type(element);
    FieldType {
        type_id: type_id + offset,
        capacity,
        string_capacity,
        nested_type_name,
    }
}

fn describe<'a>(type_name: &'a str, def: &'a MessageDefinition) -> TypeDescription<'a> {
    let fields = if def.fields.is_empty() {
        vec![FieldDescription {
            name: EMPTY_STRUCT_PLACEHOLDER,
            field_type: FieldType {
                type_id: base_type_id(BaseType::UInt8, 0),
                capacity: 0,
                string_capacity: 0,
                nested_type_name: "",
            },
        }]
    } else {
        def.fields
            .iter()
            .map(|field| FieldDescription {
                name: &field.name,
                field_type: field_type(&field.descriptor),
            })
            .collect()
    };
    TypeDescription { type_name, fields }
}

/// JSON formatter with a space after every `,` and `:`.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Canonical JSON document hashed for `type_name`.
pub fn type_description_json<A: TypeAccessor + ?Sized>(store: &A, type_name: &str) -> Result<String> {
    let root = store.resolve(type_name)?;

    let mut names = store.dependencies(type_name)?;
    names.sort();
    let mut referenced = Vec::with_capacity(names.len());
    for name in &names {
        referenced.push(describe(name, store.resolve(name)?));
    }

    let input = HashInput {
        type_description: describe(type_name, root),
        referenced_type_descriptions: referenced,
    };

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    input
        .serialize(&mut ser)
        .map_err(|e| crate::core::CodecError::encode("RIHS01", e.to_string()))?;
    String::from_utf8(buf).map_err(|e| crate::core::CodecError::encode("RIHS01", e.to_string()))
}

/// RIHS01 digest of a type: `RIHS01_` followed by 64 lowercase hex digits.
pub fn rihs01<A: TypeAccessor + ?Sized>(store: &A, type_name: &str) -> Result<String> {
    let json = type_description_json(store, type_name)?;
    let digest = Sha256::digest(json.as_bytes());
    Ok(format!("{RIHS01_PREFIX}{}", hex::encode(digest)))
}
