// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR cursor for reading CDR-encoded data with proper alignment.

use super::encoder::EncapsulationKind;
use crate::core::{CodecError, Result as CoreResult};
use crate::encoding::wire::WireReader;
use crate::encoding::ByteOrder;

/// Size of the CDR encapsulation header (4 bytes).
pub const CDR_HEADER_SIZE: usize = 4;

/// CDR cursor that tracks position and origin for proper alignment.
///
/// The cursor tracks:
/// - `offset`: Current read position in the buffer
/// - `origin`: Alignment reference point (end of the header for a full message)
///
/// Alignment is calculated as `(offset - origin) % size`. The origin is fixed
/// for the whole message; nested messages do not reset it.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use robotypes::encoding::cdr::CdrCursor;
/// use robotypes::encoding::wire::WireReader;
///
/// let data = vec![0x00, 0x01, 0x00, 0x00, 0x2A, 0x00, 0x00, 0x00]; // CDR header + value
/// let mut cursor = CdrCursor::new(&data)?;
/// assert_eq!(cursor.read_u32()?, 42);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CdrCursor<'a> {
    /// The data buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
    /// Origin offset for alignment calculation
    origin: usize,
    /// Whether the data uses little endian encoding
    little_endian: bool,
}

impl<'a> CdrCursor<'a> {
    /// Create a new CDR cursor from CDR-encoded data.
    ///
    /// # CDR Header Format
    ///
    /// The CDR header is 4 bytes:
    /// - Byte 0: Unused (always 0)
    /// - Byte 1: Encapsulation kind (0 = big endian, 1 = little endian)
    /// - Bytes 2-3: Options (ignored)
    pub fn new(data: &'a [u8]) -> CoreResult<Self> {
        if data.len() < CDR_HEADER_SIZE {
            return Err(CodecError::buffer_too_short(CDR_HEADER_SIZE, data.len(), 0));
        }

        let kind = EncapsulationKind::from_header_byte(data[1])?;

        Ok(Self {
            data,
            offset: CDR_HEADER_SIZE,
            origin: CDR_HEADER_SIZE,
            little_endian: kind.is_little_endian(),
        })
    }

    /// Create a cursor over headerless payload starting at `offset`.
    ///
    /// Alignment is measured from `offset`.
    pub fn at(data: &'a [u8], offset: usize, order: ByteOrder) -> CoreResult<Self> {
        if offset > data.len() {
            return Err(CodecError::buffer_too_short(offset, data.len(), 0));
        }
        Ok(Self {
            data,
            offset,
            origin: offset,
            little_endian: order == ByteOrder::Little,
        })
    }

    /// Byte order of the data.
    pub fn byte_order(&self) -> ByteOrder {
        if self.little_endian {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Align to the specified boundary, relative to the origin.
    pub fn align(&mut self, size: usize) -> CoreResult<()> {
        let alignment = (self.offset - self.origin) % size;
        if alignment > 0 {
            let padding = size - alignment;
            if self.offset + padding > self.data.len() {
                return Err(CodecError::buffer_too_short(
                    padding,
                    self.remaining(),
                    self.offset as u64,
                ));
            }
            self.offset += padding;
        }
        Ok(())
    }

    /// Read a byte slice.
    pub fn read_bytes(&mut self, count: usize) -> CoreResult<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::buffer_too_short(
                count,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Skip bytes.
    pub fn skip(&mut self, count: usize) -> CoreResult<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Read `N` aligned bytes.
    fn read_array<const N: usize>(&mut self) -> CoreResult<[u8; N]> {
        self.align(N)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.read_bytes(N)?);
        Ok(bytes)
    }
}

macro_rules! read_number {
    ($name:ident, $ty:ty) => {
        fn $name(&mut self) -> CoreResult<$ty> {
            let bytes = self.read_array::<{ std::mem::size_of::<$ty>() }>()?;
            Ok(if self.little_endian {
                <$ty>::from_le_bytes(bytes)
            } else {
                <$ty>::from_be_bytes(bytes)
            })
        }
    };
}

impl<'a> WireReader<'a> for CdrCursor<'a> {
    const CODEC: &'static str = "CDR";
    const LEGACY_HEADER: bool = false;

    fn read_bool(&mut self) -> CoreResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    fn read_i8(&mut self) -> CoreResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    fn read_u8(&mut self) -> CoreResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    read_number!(read_i16, i16);
    read_number!(read_u16, u16);
    read_number!(read_i32, i32);
    read_number!(read_u32, u32);
    read_number!(read_i64, i64);
    read_number!(read_u64, u64);
    read_number!(read_f32, f32);
    read_number!(read_f64, f64);

    /// Length includes the NUL terminator, which is stripped.
    fn read_string(&mut self) -> CoreResult<&'a [u8]> {
        let len = self.read_u32()? as usize;
        if len > self.remaining() {
            return Err(CodecError::length_exceeded(len, self.offset, self.data.len()));
        }
        let bytes = self.read_bytes(len)?;
        Ok(match bytes.split_last() {
            Some((0, text)) => text,
            _ => bytes,
        })
    }

    fn read_length(&mut self) -> CoreResult<usize> {
        Ok(self.read_u32()? as usize)
    }

    fn read_byte_run(&mut self, count: usize) -> CoreResult<&'a [u8]> {
        self.read_bytes(count)
    }

    #[inline]
    fn position(&self) -> usize {
        self.offset
    }

    #[inline]
    fn buffer_len(&self) -> usize {
        self.data.len()
    }
}
