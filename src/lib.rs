// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robotypes
//!
//! Message type system and wire codecs for ROS-style robotics messages.
//!
//! - **Schemas** from `.msg` text and OMG IDL in the [`schema`] module
//! - **Typestore** registry with conflict detection in [`core::registry`]
//! - **Digests** (legacy MD5 and RIHS01) in the [`hash`] module
//! - **Codecs** for aligned CDR and packed ROS1 plus a direct converter in
//!   the [`encoding`] module
//!
//! ## Example: Round trip through both formats
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robotypes::encoding::{cdr, convert, ros1, ByteOrder, Direction};
//! use robotypes::schema::SchemaFormat;
//! use robotypes::{CodecValue, DecodedMessage, Typestore};
//!
//! let mut store = Typestore::with_builtins();
//! store.register_text("test_msgs/msg/Pair", "uint16 a\nuint64 b", SchemaFormat::Msg)?;
//!
//! let mut msg = DecodedMessage::new();
//! msg.insert("a".into(), CodecValue::UInt16(1));
//! msg.insert("b".into(), CodecValue::UInt64(2));
//!
//! let packed = ros1::serialize(&msg, "test_msgs/msg/Pair", &store)?;
//! let aligned = cdr::serialize(&msg, "test_msgs/msg/Pair", &store, ByteOrder::Little)?;
//! assert_eq!(convert(&packed, "test_msgs/msg/Pair", Direction::Ros1ToCdr, &store)?, aligned);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Digests
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robotypes::Typestore;
//!
//! let store = Typestore::with_builtins();
//! assert_eq!(store.md5sum("std_msgs/msg/Empty")?, "d41d8cd98f00b204e9800998ecf8427e");
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{CodecError, CodecValue, DecodedMessage, ErrorKind, Result, TypeAccessor, Typestore};

// Encoding/decoding
pub mod encoding;

pub use encoding::{ByteOrder, Direction, MessageCodec, WireFormat};

// Message digests
pub mod hash;

// Schema parsing
pub mod schema;

pub use schema::{MessageDefinition, SchemaFormat};
