// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR encoder for writing CDR-encoded data.

use super::CDR_HEADER_SIZE;
use crate::core::{CodecError, DecodedMessage, Result as CoreResult, TypeAccessor};
use crate::encoding::wire::{self, WireWriter};
use crate::encoding::ByteOrder;

/// Default initial capacity for the encoder buffer.
const DEFAULT_CAPACITY: usize = 64;

/// CDR encapsulation kind.
///
/// Stored in byte 1 of the 4-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum EncapsulationKind {
    /// CDR, Big Endian
    CdrBe = 0x00,
    /// CDR, Little Endian
    #[default]
    CdrLe = 0x01,
}

impl EncapsulationKind {
    /// Check if this encapsulation uses little endian byte order.
    #[must_use]
    pub const fn is_little_endian(self) -> bool {
        matches!(self, Self::CdrLe)
    }

    /// Parse the kind byte of a header.
    pub fn from_header_byte(byte: u8) -> CoreResult<Self> {
        match byte {
            0x00 => Ok(Self::CdrBe),
            0x01 => Ok(Self::CdrLe),
            other => Err(CodecError::unsupported(format!(
                "CDR encapsulation kind 0x{other:02x}"
            ))),
        }
    }

    /// The 4-byte header for this kind.
    #[must_use]
    pub const fn header(self) -> [u8; CDR_HEADER_SIZE] {
        [0, self as u8, 0, 0]
    }
}

impl From<ByteOrder> for EncapsulationKind {
    fn from(order: ByteOrder) -> Self {
        match order {
            ByteOrder::Little => Self::CdrLe,
            ByteOrder::Big => Self::CdrBe,
        }
    }
}

/// CDR encoder for writing CDR-encoded data.
///
/// Handles alignment relative to the origin (the end of the header) and
/// byte order.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use robotypes::encoding::cdr::CdrEncoder;
/// use robotypes::encoding::wire::WireWriter;
///
/// let mut encoder = CdrEncoder::new();
/// encoder.write_i32(42)?;
/// encoder.write_string(b"hello")?;
/// let data = encoder.finish();
/// assert_eq!(data.len(), 4 + 4 + 4 + 6);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CdrEncoder {
    /// Output buffer
    buffer: Vec<u8>,
    /// Current write position
    offset: usize,
    /// Origin offset for alignment calculation
    origin: usize,
    /// Whether to use little endian encoding
    little_endian: bool,
}

impl Default for CdrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CdrEncoder {
    /// Create a new encoder with default settings (CDR, little-endian).
    #[must_use]
    pub fn new() -> Self {
        Self::with_kind(EncapsulationKind::default())
    }

    /// Create a new encoder for the given byte order.
    #[must_use]
    pub fn with_order(order: ByteOrder) -> Self {
        Self::with_kind(order.into())
    }

    /// Create a new encoder with the specified encapsulation kind.
    #[must_use]
    pub fn with_kind(kind: EncapsulationKind) -> Self {
        let mut buffer = Vec::with_capacity(DEFAULT_CAPACITY);
        buffer.extend_from_slice(&kind.header());

        Self {
            buffer,
            offset: CDR_HEADER_SIZE,
            origin: CDR_HEADER_SIZE,
            little_endian: kind.is_little_endian(),
        }
    }

    /// Continue writing headerless payload into `buffer` at `offset`.
    ///
    /// Alignment is measured from `offset`. Bytes of `buffer` past the
    /// written region are left untouched.
    #[must_use]
    pub fn at(buffer: Vec<u8>, offset: usize, order: ByteOrder) -> Self {
        Self {
            buffer,
            offset,
            origin: offset,
            little_endian: order == ByteOrder::Little,
        }
    }

    /// Get the current write position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.offset
    }

    /// Get a reference to the encoded data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer[..self.offset]
    }

    /// Consume the encoder and return the buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Encode a message of type `type_name` resolved through `store`.
    pub fn encode_message<A: TypeAccessor + ?Sized>(
        &mut self,
        message: &DecodedMessage,
        type_name: &str,
        store: &A,
    ) -> CoreResult<()> {
        wire::write_message(self, store, type_name, message, 0)
    }

    /// Ensure there's room for `additional` bytes at the write position.
    fn reserve(&mut self, additional: usize) {
        let needed = self.offset + additional;
        if needed > self.buffer.len() {
            self.buffer.resize(needed, 0);
        }
    }

    /// Align to the specified boundary, writing zero padding.
    fn align(&mut self, size: usize) {
        let alignment = (self.offset - self.origin) % size;
        if alignment > 0 {
            let padding = size - alignment;
            self.reserve(padding);
            self.buffer[self.offset..self.offset + padding].fill(0);
            self.offset += padding;
        }
    }

    fn put(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        self.buffer[self.offset..self.offset + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
    }
}

macro_rules! write_number {
    ($name:ident, $ty:ty) => {
        fn $name(&mut self, value: $ty) -> CoreResult<()> {
            self.align(std::mem::size_of::<$ty>());
            let bytes = if self.little_endian {
                value.to_le_bytes()
            } else {
                value.to_be_bytes()
            };
            self.put(&bytes);
            Ok(())
        }
    };
}

impl WireWriter for CdrEncoder {
    const CODEC: &'static str = "CDR";
    const LEGACY_HEADER: bool = false;

    fn write_bool(&mut self, value: bool) -> CoreResult<()> {
        self.put(&[u8::from(value)]);
        Ok(())
    }

    fn write_i8(&mut self, value: i8) -> CoreResult<()> {
        self.put(&[value as u8]);
        Ok(())
    }

    fn write_u8(&mut self, value: u8) -> CoreResult<()> {
        self.put(&[value]);
        Ok(())
    }

    write_number!(write_i16, i16);
    write_number!(write_u16, u16);
    write_number!(write_i32, i32);
    write_number!(write_u32, u32);
    write_number!(write_i64, i64);
    write_number!(write_u64, u64);
    write_number!(write_f32, f32);
    write_number!(write_f64, f64);

    fn write_string(&mut self, bytes: &[u8]) -> CoreResult<()> {
        // Add one for the NUL terminator
        self.write_length(bytes.len() + 1)?;
        self.put(bytes);
        self.put(&[0]);
        Ok(())
    }

    fn write_length(&mut self, len: usize) -> CoreResult<()> {
        let len = u32::try_from(len)
            .map_err(|_| CodecError::encode("CDR", format!("length {len} does not fit in u32")))?;
        self.write_u32(len)
    }

    fn write_byte_run(&mut self, bytes: &[u8]) -> CoreResult<()> {
        self.put(bytes);
        Ok(())
    }
}
