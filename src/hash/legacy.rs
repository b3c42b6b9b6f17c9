// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Legacy MD5 type digest and multi-section definition text.
//!
//! The digest is computed over a flattened text per type:
//!
//! ```text
//! <type> <CONST>=<value>     one line per constant
//! <type> <field>             built-in fields, with array suffix
//! <md5 of dependency> <field> message fields, without array suffix
//! ```
//!
//! Lines are joined by `\n` without a trailing newline. `time` and
//! `duration` count as built-ins, and `std_msgs/msg/Header` carries the
//! legacy `uint32 seq` member.

use crate::core::{CodecError, Result, TypeAccessor};
use crate::schema::ast::{legacy_name, BaseType, FieldDescriptor, EMPTY_STRUCT_PLACEHOLDER};
use crate::schema::builtin_types::{DURATION, HEADER, TIME};
use md5::{Digest, Md5};
use std::collections::{HashMap, HashSet};

/// Line separating sections of a definition document.
pub const SECTION_SEPARATOR: &str =
    "================================================================================";

const HEADER_SEQ: &str = "uint32 seq";

/// Legacy spelling of a built-in named type, if it is one.
fn builtin_alias(type_name: &str) -> Option<&'static str> {
    match type_name {
        TIME => Some("time"),
        DURATION => Some("duration"),
        _ => None,
    }
}

fn base_name(base: BaseType) -> &'static str {
    match base {
        BaseType::Octet => "byte",
        other => other.name(),
    }
}

/// Legacy spelling of a field type, e.g. `byte[16]`, `std_msgs/Header`.
fn legacy_type(descriptor: &FieldDescriptor) -> String {
    match descriptor {
        // Bounds have no legacy spelling.
        FieldDescriptor::Base { base, .. } => base_name(*base).to_string(),
        FieldDescriptor::Named(name) => builtin_alias(name)
            .map(str::to_string)
            .unwrap_or_else(|| legacy_name(name)),
        FieldDescriptor::Array { element, length } => {
            format!("{}[{length}]", legacy_type(element))
        }
        FieldDescriptor::Sequence { element, .. } => format!("{}[]", legacy_type(element)),
    }
}

struct Md5Hasher<'a, A: ?Sized> {
    store: &'a A,
    digests: HashMap<String, String>,
    in_progress: HashSet<String>,
}

impl<'a, A: TypeAccessor + ?Sized> Md5Hasher<'a, A> {
    fn new(store: &'a A) -> Self {
        Self {
            store,
            digests: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    fn digest(&mut self, type_name: &str) -> Result<String> {
        if let Some(digest) = self.digests.get(type_name) {
            return Ok(digest.clone());
        }
        if !self.in_progress.insert(type_name.to_string()) {
            return Err(CodecError::invalid_schema(
                type_name,
                "recursive type has no legacy digest",
            ));
        }

        let text = self.hash_text(type_name)?;
        let digest = hex::encode(Md5::digest(text.as_bytes()));

        self.in_progress.remove(type_name);
        self.digests.insert(type_name.to_string(), digest.clone());
        Ok(digest)
    }

    fn hash_text(&mut self, type_name: &str) -> Result<String> {
        let def = self.store.resolve(type_name)?;
        let mut lines = Vec::with_capacity(def.constants.len() + def.fields.len() + 1);

        for constant in &def.constants {
            lines.push(format!(
                "{} {}={}",
                base_name(constant.base),
                constant.name,
                constant.value
            ));
        }
        if type_name == HEADER {
            lines.push(HEADER_SEQ.to_string());
        }
        for field in &def.fields {
            if field.name == EMPTY_STRUCT_PLACEHOLDER {
                continue;
            }
            match field.descriptor.referenced_type() {
                Some(dep) if builtin_alias(dep).is_none() => {
                    let digest = self.digest(dep)?;
                    lines.push(format!("{digest} {}", field.name));
                }
                _ => lines.push(format!("{} {}", legacy_type(&field.descriptor), field.name)),
            }
        }
        Ok(lines.join("\n"))
    }
}

/// Legacy MD5 digest of a type, lowercase hex.
pub fn md5sum<A: TypeAccessor + ?Sized>(store: &A, type_name: &str) -> Result<String> {
    Md5Hasher::new(store).digest(type_name)
}

fn section_text<A: TypeAccessor + ?Sized>(store: &A, type_name: &str, out: &mut String) -> Result<()> {
    let def = store.resolve(type_name)?;
    for constant in &def.constants {
        out.push_str(&format!(
            "{} {}={}\n",
            base_name(constant.base),
            constant.name,
            constant.value
        ));
    }
    if type_name == HEADER {
        out.push_str(HEADER_SEQ);
        out.push('\n');
    }
    for field in &def.fields {
        if field.name == EMPTY_STRUCT_PLACEHOLDER {
            continue;
        }
        out.push_str(&format!("{} {}\n", legacy_type(&field.descriptor), field.name));
    }
    Ok(())
}

/// Build the legacy multi-section definition document of a type together
/// with its legacy digest.
///
/// The root section comes first, followed by one section per transitive
/// dependency in first-discovered order:
///
/// ```text
/// ================================================================================
/// MSG: std_msgs/Header
/// uint32 seq
/// time stamp
/// string frame_id
/// ```
///
/// `time` and `duration` are written inline and get no section.
pub fn generate_definition_text<A: TypeAccessor + ?Sized>(
    store: &A,
    type_name: &str,
) -> Result<(String, String)> {
    let mut text = String::new();
    section_text(store, type_name, &mut text)?;

    for dep in store.dependencies(type_name)? {
        if builtin_alias(&dep).is_some() {
            continue;
        }
        text.push_str(SECTION_SEPARATOR);
        text.push('\n');
        text.push_str("MSG: ");
        text.push_str(&legacy_name(&dep));
        text.push('\n');
        section_text(store, &dep, &mut text)?;
    }

    let digest = md5sum(store, type_name)?;
    Ok((text, digest))
}
