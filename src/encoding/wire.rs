// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema walk shared by both wire formats.
//!
//! The wire formats only differ in how a primitive, a string or a length
//! prefix is laid out. [`WireWriter`] and [`WireReader`] capture those
//! differences; everything that follows the schema (field order, nested
//! messages, arrays, sequences, depth limits, error paths) lives here once.
//!
//! Three walks are provided:
//! - [`write_message`]: value tree into a writer (encoders and calculators)
//! - [`read_message`]: reader into a value tree (decoders)
//! - [`transcode_message`]: reader straight into a writer (converter)

use crate::core::{CodecError, CodecValue, DecodedMessage, Result, TypeAccessor};
use crate::schema::ast::{BaseType, FieldDescriptor};
use crate::schema::builtin_types::HEADER;

/// Maximum nesting depth of messages.
pub const MAX_DEPTH: usize = 32;

/// Upper bound on a sequence count, independent of the remaining input.
pub const MAX_SEQUENCE_LENGTH: usize = 10_000_000;

/// Sink for wire primitives.
pub trait WireWriter {
    /// Codec name used in error messages.
    const CODEC: &'static str;
    /// Whether `std_msgs/msg/Header` carries the legacy `uint32 seq` member.
    const LEGACY_HEADER: bool;

    fn write_bool(&mut self, value: bool) -> Result<()>;
    fn write_i8(&mut self, value: i8) -> Result<()>;
    fn write_u8(&mut self, value: u8) -> Result<()>;
    fn write_i16(&mut self, value: i16) -> Result<()>;
    fn write_u16(&mut self, value: u16) -> Result<()>;
    fn write_i32(&mut self, value: i32) -> Result<()>;
    fn write_u32(&mut self, value: u32) -> Result<()>;
    fn write_i64(&mut self, value: i64) -> Result<()>;
    fn write_u64(&mut self, value: u64) -> Result<()>;
    fn write_f32(&mut self, value: f32) -> Result<()>;
    fn write_f64(&mut self, value: f64) -> Result<()>;

    /// Write a string given its UTF-8 bytes.
    fn write_string(&mut self, bytes: &[u8]) -> Result<()>;

    /// Write a sequence count prefix.
    fn write_length(&mut self, len: usize) -> Result<()>;

    /// Write consecutive single-byte elements.
    fn write_byte_run(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Source of wire primitives.
pub trait WireReader<'a> {
    /// Codec name used in error messages.
    const CODEC: &'static str;
    /// Whether `std_msgs/msg/Header` carries the legacy `uint32 seq` member.
    const LEGACY_HEADER: bool;

    fn read_bool(&mut self) -> Result<bool>;
    fn read_i8(&mut self) -> Result<i8>;
    fn read_u8(&mut self) -> Result<u8>;
    fn read_i16(&mut self) -> Result<i16>;
    fn read_u16(&mut self) -> Result<u16>;
    fn read_i32(&mut self) -> Result<i32>;
    fn read_u32(&mut self) -> Result<u32>;
    fn read_i64(&mut self) -> Result<i64>;
    fn read_u64(&mut self) -> Result<u64>;
    fn read_f32(&mut self) -> Result<f32>;
    fn read_f64(&mut self) -> Result<f64>;

    /// Read a string, returning its bytes without any terminator.
    fn read_string(&mut self) -> Result<&'a [u8]>;

    /// Read a sequence count prefix.
    fn read_length(&mut self) -> Result<usize>;

    /// Read `count` consecutive single-byte elements.
    fn read_byte_run(&mut self, count: usize) -> Result<&'a [u8]>;

    /// Current offset into the underlying buffer.
    fn position(&self) -> usize;

    /// Total length of the underlying buffer.
    fn buffer_len(&self) -> usize;

    /// Bytes left to read.
    fn remaining(&self) -> usize {
        self.buffer_len().saturating_sub(self.position())
    }
}

fn check_depth(type_name: &str, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(CodecError::invalid_schema(
            type_name,
            format!("maximum nesting depth exceeded ({MAX_DEPTH}), possible circular reference"),
        ));
    }
    Ok(())
}

fn float128() -> CodecError {
    CodecError::unsupported("float128")
}

/// Whether a collection of `descriptor` travels as a contiguous byte run.
fn is_byte_run(descriptor: &FieldDescriptor) -> bool {
    matches!(descriptor, FieldDescriptor::Base { base, .. } if base.is_byte_like())
}

/// Smallest number of bytes one element of `descriptor` can occupy.
fn min_wire_size(descriptor: &FieldDescriptor) -> usize {
    match descriptor {
        FieldDescriptor::Base { base, .. } => base.size().unwrap_or(4),
        FieldDescriptor::Array { element, length } => min_wire_size(element).saturating_mul(*length),
        FieldDescriptor::Sequence { .. } => 4,
        // Messages may be empty.
        FieldDescriptor::Named(_) => 0,
    }
}

/// Read a sequence count and reject counts the remaining input cannot hold.
fn read_count<'a, R: WireReader<'a>>(reader: &mut R, element: &FieldDescriptor) -> Result<usize> {
    let count = reader.read_length()?;
    let needed = count.saturating_mul(min_wire_size(element));
    if count > MAX_SEQUENCE_LENGTH || needed > reader.remaining() {
        return Err(CodecError::length_exceeded(
            count,
            reader.position(),
            reader.buffer_len(),
        ));
    }
    Ok(count)
}

// ---------------------------------------------------------------------------
// Value tree -> writer
// ---------------------------------------------------------------------------

/// Write a message value of type `type_name`.
pub fn write_message<W, A>(
    writer: &mut W,
    store: &A,
    type_name: &str,
    message: &DecodedMessage,
    depth: usize,
) -> Result<()>
where
    W: WireWriter,
    A: TypeAccessor + ?Sized,
{
    check_depth(type_name, depth)?;
    let def = store.resolve(type_name)?;

    if W::LEGACY_HEADER && type_name == HEADER {
        writer.write_u32(0)?;
    }

    for field in &def.fields {
        let value = message
            .get(&field.name)
            .ok_or_else(|| CodecError::field_encode(&field.name, "missing field"))?;
        write_value(writer, store, &field.descriptor, value, depth)
            .map_err(|e| e.in_encoded_field(&field.name))?;
    }
    Ok(())
}

fn write_value<W, A>(
    writer: &mut W,
    store: &A,
    descriptor: &FieldDescriptor,
    value: &CodecValue,
    depth: usize,
) -> Result<()>
where
    W: WireWriter,
    A: TypeAccessor + ?Sized,
{
    match descriptor {
        FieldDescriptor::Base { base, .. } => write_base(writer, *base, value),
        FieldDescriptor::Named(type_name) => {
            let message = value.as_struct().ok_or_else(|| mismatch::<W>(type_name, value))?;
            write_message(writer, store, type_name, message, depth + 1)
        }
        FieldDescriptor::Array { element, length } => {
            let len = value
                .collection_len()
                .ok_or_else(|| mismatch::<W>(&descriptor.to_string(), value))?;
            if len != *length {
                return Err(CodecError::encode(
                    W::CODEC,
                    format!("expected {length} elements, got {len}"),
                ));
            }
            write_elements(writer, store, element, value, depth)
        }
        FieldDescriptor::Sequence { element, .. } => {
            let len = value
                .collection_len()
                .ok_or_else(|| mismatch::<W>(&descriptor.to_string(), value))?;
            writer.write_length(len)?;
            write_elements(writer, store, element, value, depth)
        }
    }
}

fn write_elements<W, A>(
    writer: &mut W,
    store: &A,
    element: &FieldDescriptor,
    value: &CodecValue,
    depth: usize,
) -> Result<()>
where
    W: WireWriter,
    A: TypeAccessor + ?Sized,
{
    match value {
        CodecValue::Bytes(bytes) => match element {
            FieldDescriptor::Base { base, .. } if base.is_byte_like() => writer.write_byte_run(bytes),
            FieldDescriptor::Base { base, .. } if base.is_integer() => {
                for &b in bytes {
                    write_base(writer, *base, &CodecValue::UInt8(b))?;
                }
                Ok(())
            }
            _ => Err(mismatch::<W>(&element.to_string(), value)),
        },
        CodecValue::Array(items) => {
            for item in items {
                write_value(writer, store, element, item, depth)?;
            }
            Ok(())
        }
        _ => Err(mismatch::<W>(&element.to_string(), value)),
    }
}

fn mismatch<W: WireWriter>(expected: &str, value: &CodecValue) -> CodecError {
    CodecError::encode(
        W::CODEC,
        format!("expected {expected}, got {}", value.type_name()),
    )
}

/// Write one primitive. Integers are truncated to the declared width.
fn write_base<W: WireWriter>(writer: &mut W, base: BaseType, value: &CodecValue) -> Result<()> {
    let int = || value.as_i128().ok_or_else(|| mismatch::<W>(base.name(), value));
    let float = || value.as_f64().ok_or_else(|| mismatch::<W>(base.name(), value));

    match base {
        BaseType::Bool => {
            let b = value.as_bool().ok_or_else(|| mismatch::<W>("bool", value))?;
            writer.write_bool(b)
        }
        BaseType::Int8 => writer.write_i8(int()? as i8),
        BaseType::Char | BaseType::Octet | BaseType::UInt8 => writer.write_u8(int()? as u8),
        BaseType::Int16 => writer.write_i16(int()? as i16),
        BaseType::UInt16 => writer.write_u16(int()? as u16),
        BaseType::Int32 => writer.write_i32(int()? as i32),
        BaseType::UInt32 => writer.write_u32(int()? as u32),
        BaseType::Int64 => writer.write_i64(int()? as i64),
        BaseType::UInt64 => writer.write_u64(int()? as u64),
        BaseType::Float32 => writer.write_f32(float()? as f32),
        BaseType::Float64 => writer.write_f64(float()?),
        BaseType::Float128 => Err(float128()),
        BaseType::String => {
            let s = value.as_str().ok_or_else(|| mismatch::<W>("string", value))?;
            writer.write_string(s.as_bytes())
        }
    }
}

// ---------------------------------------------------------------------------
// Reader -> value tree
// ---------------------------------------------------------------------------

/// Read a message value of type `type_name`.
pub fn read_message<'a, R, A>(
    reader: &mut R,
    store: &A,
    type_name: &str,
    depth: usize,
) -> Result<DecodedMessage>
where
    R: WireReader<'a>,
    A: TypeAccessor + ?Sized,
{
    check_depth(type_name, depth)?;
    let def = store.resolve(type_name)?;

    if R::LEGACY_HEADER && type_name == HEADER {
        reader.read_u32()?;
    }

    let mut message = DecodedMessage::with_capacity(def.fields.len());
    for field in &def.fields {
        let pos = reader.position();
        let value = read_value(reader, store, &field.descriptor, depth).map_err(|e| {
            e.in_decoded_field(&field.name, &field.descriptor.to_string(), pos as u64)
        })?;
        message.insert(field.name.clone(), value);
    }
    Ok(message)
}

fn read_value<'a, R, A>(
    reader: &mut R,
    store: &A,
    descriptor: &FieldDescriptor,
    depth: usize,
) -> Result<CodecValue>
where
    R: WireReader<'a>,
    A: TypeAccessor + ?Sized,
{
    match descriptor {
        FieldDescriptor::Base { base, .. } => read_base(reader, *base),
        FieldDescriptor::Named(type_name) => Ok(CodecValue::Struct(read_message(
            reader,
            store,
            type_name,
            depth + 1,
        )?)),
        FieldDescriptor::Array { element, length } => {
            read_elements(reader, store, element, *length, depth)
        }
        FieldDescriptor::Sequence { element, .. } => {
            let count = read_count(reader, element)?;
            read_elements(reader, store, element, count, depth)
        }
    }
}

fn read_elements<'a, R, A>(
    reader: &mut R,
    store: &A,
    element: &FieldDescriptor,
    count: usize,
    depth: usize,
) -> Result<CodecValue>
where
    R: WireReader<'a>,
    A: TypeAccessor + ?Sized,
{
    if is_byte_run(element) {
        return Ok(CodecValue::Bytes(reader.read_byte_run(count)?.to_vec()));
    }
    let mut items = Vec::with_capacity(count.min(reader.remaining()));
    for _ in 0..count {
        items.push(read_value(reader, store, element, depth)?);
    }
    Ok(CodecValue::Array(items))
}

fn read_base<'a, R: WireReader<'a>>(reader: &mut R, base: BaseType) -> Result<CodecValue> {
    Ok(match base {
        BaseType::Bool => CodecValue::Bool(reader.read_bool()?),
        BaseType::Int8 => CodecValue::Int8(reader.read_i8()?),
        BaseType::Char | BaseType::Octet | BaseType::UInt8 => CodecValue::UInt8(reader.read_u8()?),
        BaseType::Int16 => CodecValue::Int16(reader.read_i16()?),
        BaseType::UInt16 => CodecValue::UInt16(reader.read_u16()?),
        BaseType::Int32 => CodecValue::Int32(reader.read_i32()?),
        BaseType::UInt32 => CodecValue::UInt32(reader.read_u32()?),
        BaseType::Int64 => CodecValue::Int64(reader.read_i64()?),
        BaseType::UInt64 => CodecValue::UInt64(reader.read_u64()?),
        BaseType::Float32 => CodecValue::Float32(reader.read_f32()?),
        BaseType::Float64 => CodecValue::Float64(reader.read_f64()?),
        BaseType::Float128 => return Err(float128()),
        BaseType::String => {
            let bytes = reader.read_string()?;
            let s = std::str::from_utf8(bytes)
                .map_err(|e| CodecError::encode(R::CODEC, format!("invalid UTF-8 string: {e}")))?;
            CodecValue::String(s.to_string())
        }
    })
}

// ---------------------------------------------------------------------------
// Reader -> writer
// ---------------------------------------------------------------------------

/// Copy a message of type `type_name` from one wire format to another
/// without building values.
pub fn transcode_message<'a, R, W, A>(
    reader: &mut R,
    writer: &mut W,
    store: &A,
    type_name: &str,
    depth: usize,
) -> Result<()>
where
    R: WireReader<'a>,
    W: WireWriter,
    A: TypeAccessor + ?Sized,
{
    check_depth(type_name, depth)?;
    let def = store.resolve(type_name)?;

    if type_name == HEADER {
        if R::LEGACY_HEADER {
            reader.read_u32()?;
        }
        if W::LEGACY_HEADER {
            writer.write_u32(0)?;
        }
    }

    for field in &def.fields {
        let pos = reader.position();
        transcode_value(reader, writer, store, &field.descriptor, depth).map_err(|e| {
            e.in_decoded_field(&field.name, &field.descriptor.to_string(), pos as u64)
        })?;
    }
    Ok(())
}

fn transcode_value<'a, R, W, A>(
    reader: &mut R,
    writer: &mut W,
    store: &A,
    descriptor: &FieldDescriptor,
    depth: usize,
) -> Result<()>
where
    R: WireReader<'a>,
    W: WireWriter,
    A: TypeAccessor + ?Sized,
{
    match descriptor {
        FieldDescriptor::Base { base, .. } => transcode_base(reader, writer, *base),
        FieldDescriptor::Named(type_name) => {
            transcode_message(reader, writer, store, type_name, depth + 1)
        }
        FieldDescriptor::Array { element, length } => {
            transcode_elements(reader, writer, store, element, *length, depth)
        }
        FieldDescriptor::Sequence { element, .. } => {
            let count = read_count(reader, element)?;
            writer.write_length(count)?;
            transcode_elements(reader, writer, store, element, count, depth)
        }
    }
}

fn transcode_elements<'a, R, W, A>(
    reader: &mut R,
    writer: &mut W,
    store: &A,
    element: &FieldDescriptor,
    count: usize,
    depth: usize,
) -> Result<()>
where
    R: WireReader<'a>,
    W: WireWriter,
    A: TypeAccessor + ?Sized,
{
    if is_byte_run(element) {
        return writer.write_byte_run(reader.read_byte_run(count)?);
    }
    for _ in 0..count {
        transcode_value(reader, writer, store, element, depth)?;
    }
    Ok(())
}

fn transcode_base<'a, R, W>(reader: &mut R, writer: &mut W, base: BaseType) -> Result<()>
where
    R: WireReader<'a>,
    W: WireWriter,
{
    match base {
        BaseType::Bool => writer.write_bool(reader.read_bool()?),
        BaseType::Int8 => writer.write_i8(reader.read_i8()?),
        BaseType::Char | BaseType::Octet | BaseType::UInt8 => writer.write_u8(reader.read_u8()?),
        BaseType::Int16 => writer.write_i16(reader.read_i16()?),
        BaseType::UInt16 => writer.write_u16(reader.read_u16()?),
        BaseType::Int32 => writer.write_i32(reader.read_i32()?),
        BaseType::UInt32 => writer.write_u32(reader.read_u32()?),
        BaseType::Int64 => writer.write_i64(reader.read_i64()?),
        BaseType::UInt64 => writer.write_u64(reader.read_u64()?),
        BaseType::Float32 => writer.write_f32(reader.read_f32()?),
        BaseType::Float64 => writer.write_f64(reader.read_f64()?),
        BaseType::Float128 => Err(float128()),
        BaseType::String => {
            let bytes = reader.read_string()?;
            writer.write_string(bytes)
        }
    }
}
