// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR size calculator for computing the size of CDR-encoded data.

use super::CDR_HEADER_SIZE;
use crate::core::{DecodedMessage, Result as CoreResult, TypeAccessor};
use crate::encoding::wire::{self, WireWriter};

/// CDR size calculator.
///
/// Computes the size of CDR-encoded data without writing it, following
/// exactly the alignment rules of [`CdrEncoder`](super::CdrEncoder).
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use robotypes::encoding::cdr::CdrCalculator;
/// use robotypes::encoding::wire::WireWriter;
///
/// let mut calc = CdrCalculator::new();
/// calc.write_i32(0)?;          // 4 bytes
/// calc.write_i32(0)?;          // 4 bytes
/// calc.write_string(b"hello")?; // 4 (length) + 5 + 1 (null) = 10 bytes
/// assert_eq!(calc.size(), 4 + 18);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CdrCalculator {
    /// Current size offset (starts at 4 after CDR header)
    offset: usize,
    /// Origin offset for alignment calculation
    origin: usize,
}

impl Default for CdrCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl CdrCalculator {
    /// Create a new calculator.
    ///
    /// The offset starts at 4, representing the size of the CDR header.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: CDR_HEADER_SIZE,
            origin: CDR_HEADER_SIZE,
        }
    }

    /// Get the current calculated size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.offset
    }

    /// Add the size of a message of type `type_name`.
    pub fn message<A: TypeAccessor + ?Sized>(
        &mut self,
        message: &DecodedMessage,
        type_name: &str,
        store: &A,
    ) -> CoreResult<usize> {
        wire::write_message(self, store, type_name, message, 0)?;
        Ok(self.offset)
    }

    /// Align to the specified boundary.
    pub fn align(&mut self, byte_count: usize) {
        let alignment = (self.offset - self.origin) % byte_count;
        if alignment > 0 {
            self.offset += byte_count - alignment;
        }
    }

    fn add(&mut self, size: usize) -> CoreResult<()> {
        self.align(size);
        self.offset += size;
        Ok(())
    }
}

impl WireWriter for CdrCalculator {
    const CODEC: &'static str = "CDR";
    const LEGACY_HEADER: bool = false;

    fn write_bool(&mut self, _: bool) -> CoreResult<()> {
        self.add(1)
    }

    fn write_i8(&mut self, _: i8) -> CoreResult<()> {
        self.add(1)
    }

    fn write_u8(&mut self, _: u8) -> CoreResult<()> {
        self.add(1)
    }

    fn write_i16(&mut self, _: i16) -> CoreResult<()> {
        self.add(2)
    }

    fn write_u16(&mut self, _: u16) -> CoreResult<()> {
        self.add(2)
    }

    fn write_i32(&mut self, _: i32) -> CoreResult<()> {
        self.add(4)
    }

    fn write_u32(&mut self, _: u32) -> CoreResult<()> {
        self.add(4)
    }

    fn write_i64(&mut self, _: i64) -> CoreResult<()> {
        self.add(8)
    }

    fn write_u64(&mut self, _: u64) -> CoreResult<()> {
        self.add(8)
    }

    fn write_f32(&mut self, _: f32) -> CoreResult<()> {
        self.add(4)
    }

    fn write_f64(&mut self, _: f64) -> CoreResult<()> {
        self.add(8)
    }

    fn write_string(&mut self, bytes: &[u8]) -> CoreResult<()> {
        self.add(4)?;
        self.offset += bytes.len() + 1;
        Ok(())
    }

    fn write_length(&mut self, _: usize) -> CoreResult<()> {
        self.add(4)
    }

    fn write_byte_run(&mut self, bytes: &[u8]) -> CoreResult<()> {
        self.offset += bytes.len();
        Ok(())
    }
}
