// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 size calculator.

use crate::core::{DecodedMessage, Result as CoreResult, TypeAccessor};
use crate::encoding::wire::{self, WireWriter};

/// Counts the bytes a [`Ros1Encoder`](super::Ros1Encoder) would produce.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ros1Calculator {
    size: usize,
}

impl Ros1Calculator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current calculated size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Add the size of a message of type `type_name`.
    pub fn message<A: TypeAccessor + ?Sized>(
        &mut self,
        message: &DecodedMessage,
        type_name: &str,
        store: &A,
    ) -> CoreResult<usize> {
        wire::write_message(self, store, type_name, message, 0)?;
        Ok(self.size)
    }

    fn add(&mut self, count: usize) -> CoreResult<()> {
        self.size += count;
        Ok(())
    }
}

impl WireWriter for Ros1Calculator {
    const CODEC: &'static str = "ROS1";
    const LEGACY_HEADER: bool = true;

    fn write_bool(&mut self, _value: bool) -> CoreResult<()> {
        self.add(1)
    }

    fn write_i8(&mut self, _value: i8) -> CoreResult<()> {
        self.add(1)
    }

    fn write_u8(&mut self, _value: u8) -> CoreResult<()> {
        self.add(1)
    }

    fn write_i16(&mut self, _value: i16) -> CoreResult<()> {
        self.add(2)
    }

    fn write_u16(&mut self, _value: u16) -> CoreResult<()> {
        self.add(2)
    }

    fn write_i32(&mut self, _value: i32) -> CoreResult<()> {
        self.add(4)
    }

    fn write_u32(&mut self, _value: u32) -> CoreResult<()> {
        self.add(4)
    }

    fn write_i64(&mut self, _value: i64) -> CoreResult<()> {
        self.add(8)
    }

    fn write_u64(&mut self, _value: u64) -> CoreResult<()> {
        self.add(8)
    }

    fn write_f32(&mut self, _value: f32) -> CoreResult<()> {
        self.add(4)
    }

    fn write_f64(&mut self, _value: f64) -> CoreResult<()> {
        self.add(8)
    }

    fn write_string(&mut self, bytes: &[u8]) -> CoreResult<()> {
        self.add(4 + bytes.len())
    }

    fn write_length(&mut self, _len: usize) -> CoreResult<()> {
        self.add(4)
    }

    fn write_byte_run(&mut self, bytes: &[u8]) -> CoreResult<()> {
        self.add(bytes.len())
    }
}
