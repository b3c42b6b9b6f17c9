// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 encoder: packed little-endian layout, no padding, no header.

use crate::core::{CodecError, DecodedMessage, Result as CoreResult, TypeAccessor};
use crate::encoding::wire::{self, WireWriter};
use byteorder::{LittleEndian, WriteBytesExt};

/// ROS1 encoder writing into an owned buffer.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use robotypes::encoding::ros1::Ros1Encoder;
/// use robotypes::encoding::wire::WireWriter;
///
/// let mut encoder = Ros1Encoder::new();
/// encoder.write_u8(1)?;
/// encoder.write_u32(2)?;
/// encoder.write_string(b"ab")?;
/// assert_eq!(encoder.finish(), vec![1, 2, 0, 0, 0, 2, 0, 0, 0, b'a', b'b']);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Ros1Encoder {
    buffer: Vec<u8>,
}

impl Ros1Encoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to an existing buffer.
    pub fn with_buffer(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }

    /// Current write position.
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Get a reference to the encoded data.
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the encoder and return the buffer.
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
}

impl WireWriter for Ros1Encoder {
    const CODEC: &'static str = "ROS1";
    const LEGACY_HEADER: bool = true;

    fn write_bool(&mut self, value: bool) -> CoreResult<()> {
        Ok(self.buffer.write_u8(u8::from(value))?)
    }

    fn write_i8(&mut self, value: i8) -> CoreResult<()> {
        Ok(self.buffer.write_i8(value)?)
    }

    fn write_u8(&mut self, value: u8) -> CoreResult<()> {
        Ok(self.buffer.write_u8(value)?)
    }

    fn write_i16(&mut self, value: i16) -> CoreResult<()> {
        Ok(self.buffer.write_i16::<LittleEndian>(value)?)
    }

    fn write_u16(&mut self, value: u16) -> CoreResult<()> {
        Ok(self.buffer.write_u16::<LittleEndian>(value)?)
    }

    fn write_i32(&mut self, value: i32) -> CoreResult<()> {
        Ok(self.buffer.write_i32::<LittleEndian>(value)?)
    }

    fn write_u32(&mut self, value: u32) -> CoreResult<()> {
        Ok(self.buffer.write_u32::<LittleEndian>(value)?)
    }

    fn write_i64(&mut self, value: i64) -> CoreResult<()> {
        Ok(self.buffer.write_i64::<LittleEndian>(value)?)
    }

    fn write_u64(&mut self, value: u64) -> CoreResult<()> {
        Ok(self.buffer.write_u64::<LittleEndian>(value)?)
    }

    fn write_f32(&mut self, value: f32) -> CoreResult<()> {
        Ok(self.buffer.write_f32::<LittleEndian>(value)?)
    }

    fn write_f64(&mut self, value: f64) -> CoreResult<()> {
        Ok(self.buffer.write_f64::<LittleEndian>(value)?)
    }

    fn write_string(&mut self, bytes: &[u8]) -> CoreResult<()> {
        self.write_length(bytes.len())?;
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn write_length(&mut self, len: usize) -> CoreResult<()> {
        let len = u32::try_from(len)
            .map_err(|_| CodecError::encode("ROS1", format!("length {len} does not fit in u32")))?;
        self.write_u32(len)
    }

    fn write_byte_run(&mut self, bytes: &[u8]) -> CoreResult<()> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_padding() {
        let mut encoder = Ros1Encoder::new();
        encoder.write_u16(1).unwrap();
        encoder.write_u64(2).unwrap();
        assert_eq!(
            encoder.finish(),
            vec![0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_empty_string_has_no_terminator() {
        let mut encoder = Ros1Encoder::new();
        encoder.write_string(b"").unwrap();
        assert_eq!(encoder.finish(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_append_to_buffer() {
        let mut encoder = Ros1Encoder::with_buffer(vec![0xAA]);
        encoder.write_i16(-1).unwrap();
        assert_eq!(encoder.position(), 3);
        assert_eq!(encoder.data(), &[0xAA, 0xFF, 0xFF]);
    }
}
