// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout robotypes.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error handling shared by every component
//! - [`CodecValue`] - Dynamic value tree produced and consumed by the codecs
//! - [`Typestore`] - Registry of message definitions

pub mod error;
pub mod registry;
pub mod value;

pub use error::{CodecError, ErrorKind, Result};
pub use registry::{TypeAccessor, Typestore};
pub use value::{CodecValue, DecodedMessage};
