// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Structural type digests.
//!
//! - [`legacy`]: MD5 over the flattened legacy definition text
//! - [`rihs01`]: SHA-256 over a canonical JSON type description
//!
//! Both resolve named references through a [`TypeAccessor`](crate::core::TypeAccessor)
//! and fail with `TypeNotFound` when a reference is missing.

pub mod legacy;
pub mod rihs01;

pub use legacy::{generate_definition_text, md5sum};
pub use rihs01::rihs01;
