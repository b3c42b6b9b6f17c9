// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 cursor for reading packed little-endian data.

use crate::core::{CodecError, Result as CoreResult};
use crate::encoding::wire::WireReader;
use byteorder::{ByteOrder as _, LittleEndian};

/// Cursor over ROS1 serialized data.
#[derive(Debug, Clone)]
pub struct Ros1Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Ros1Cursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Create a cursor starting at `offset`.
    pub fn at(data: &'a [u8], offset: usize) -> CoreResult<Self> {
        if offset > data.len() {
            return Err(CodecError::buffer_too_short(offset, data.len(), 0));
        }
        Ok(Self { data, offset })
    }

    /// Check if at end of buffer.
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
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
}

impl<'a> WireReader<'a> for Ros1Cursor<'a> {
    const CODEC: &'static str = "ROS1";
    const LEGACY_HEADER: bool = true;

    fn read_bool(&mut self) -> CoreResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    fn read_i8(&mut self) -> CoreResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    fn read_u8(&mut self) -> CoreResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_i16(&mut self) -> CoreResult<i16> {
        Ok(LittleEndian::read_i16(self.read_bytes(2)?))
    }

    fn read_u16(&mut self) -> CoreResult<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    fn read_i32(&mut self) -> CoreResult<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    fn read_u32(&mut self) -> CoreResult<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    fn read_i64(&mut self) -> CoreResult<i64> {
        Ok(LittleEndian::read_i64(self.read_bytes(8)?))
    }

    fn read_u64(&mut self) -> CoreResult<u64> {
        Ok(LittleEndian::read_u64(self.read_bytes(8)?))
    }

    fn read_f32(&mut self) -> CoreResult<f32> {
        Ok(LittleEndian::read_f32(self.read_bytes(4)?))
    }

    fn read_f64(&mut self) -> CoreResult<f64> {
        Ok(LittleEndian::read_f64(self.read_bytes(8)?))
    }

    fn read_string(&mut self) -> CoreResult<&'a [u8]> {
        let len = self.read_u32()? as usize;
        if len > self.remaining() {
            return Err(CodecError::length_exceeded(len, self.offset, self.data.len()));
        }
        self.read_bytes(len)
    }

    fn read_length(&mut self) -> CoreResult<usize> {
        Ok(self.read_u32()? as usize)
    }

    fn read_byte_run(&mut self, count: usize) -> CoreResult<&'a [u8]> {
        self.read_bytes(count)
    }

    fn position(&self) -> usize {
        self.offset
    }

    fn buffer_len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_packed() {
        let data = [0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let mut cursor = Ros1Cursor::new(&data);
        assert_eq!(cursor.read_u16().unwrap(), 1);
        assert_eq!(cursor.read_u64().unwrap(), 2);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_read_string() {
        let data = [2, 0, 0, 0, b'o', b'k', 9];
        let mut cursor = Ros1Cursor::new(&data);
        assert_eq!(cursor.read_string().unwrap(), b"ok");
        assert_eq!(cursor.read_u8().unwrap(), 9);
    }

    #[test]
    fn test_string_length_exceeded() {
        let data = [50, 0, 0, 0, b'o'];
        let mut cursor = Ros1Cursor::new(&data);
        assert!(matches!(
            cursor.read_string(),
            Err(CodecError::LengthExceeded { length: 50, position: 4, buffer_len: 5 })
        ));
    }

    #[test]
    fn test_truncated() {
        let data = [1, 2, 3];
        let mut cursor = Ros1Cursor::new(&data);
        assert!(matches!(
            cursor.read_f32(),
            Err(CodecError::BufferTooShort { requested: 4, available: 3, cursor_pos: 0 })
        ));
    }

    #[test]
    fn test_cursor_at_offset() {
        let data = [0xFF, 0x05, 0x00];
        let mut cursor = Ros1Cursor::at(&data, 1).unwrap();
        assert_eq!(cursor.read_i16().unwrap(), 5);
        assert!(Ros1Cursor::at(&data, 4).is_err());
    }
}
