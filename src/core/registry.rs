// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type registry.
//!
//! [`Typestore`] maps full type names to [`MessageDefinition`]s. The codecs
//! and hashers only need read access, expressed by [`TypeAccessor`], so
//! they work with a store or with a freshly parsed [`TypeMap`].
//!
//! Keys are stored exactly as given. `std_msgs/Header` and
//! `std_msgs/msg/Header` are two different entries.

use super::error::{CodecError, Result};
use crate::schema::ast::{MessageDefinition, TypeMap};
use crate::schema::{builtin_types, parse_schema, SchemaFormat};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

/// Read access to type definitions.
pub trait TypeAccessor {
    /// Look up a type by name.
    fn get_type(&self, type_name: &str) -> Option<&MessageDefinition>;

    /// Look up a type by name, failing with [`CodecError::TypeNotFound`].
    fn resolve(&self, type_name: &str) -> Result<&MessageDefinition> {
        self.get_type(type_name)
            .ok_or_else(|| CodecError::type_not_found(type_name))
    }

    /// Transitive dependencies of `type_name` in first-discovered
    /// (depth-first, field order) order, excluding the type itself.
    ///
    /// Fails if any type in the closure is not defined.
    fn dependencies(&self, type_name: &str) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        seen.insert(type_name.to_string());
        collect_dependencies(self, type_name, &mut seen, &mut order)?;
        Ok(order)
    }
}

fn collect_dependencies<A: TypeAccessor + ?Sized>(
    store: &A,
    type_name: &str,
    seen: &mut HashSet<String>,
    order: &mut Vec<String>,
) -> Result<()> {
    let def = store.resolve(type_name)?;
    for dep in def.dependencies() {
        if seen.insert(dep.to_string()) {
            order.push(dep.to_string());
            collect_dependencies(store, dep, seen, order)?;
        }
    }
    Ok(())
}

impl TypeAccessor for TypeMap {
    fn get_type(&self, type_name: &str) -> Option<&MessageDefinition> {
        self.get(type_name)
    }
}

/// Registry of message definitions.
///
/// Registration takes `&mut self` and lookups take `&self`, so a store is
/// shared read-only across threads once populated. Independent stores
/// share nothing.
#[derive(Debug, Clone, Default)]
pub struct Typestore {
    types: BTreeMap<String, MessageDefinition>,
}

impl Typestore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the standard definitions.
    pub fn with_builtins() -> Self {
        Self {
            types: builtin_types::get_all(),
        }
    }

    /// Register a batch of definitions.
    ///
    /// Names not yet present are inserted. A name that is already present
    /// with a structurally equal definition is skipped. A name present with
    /// a different definition fails with
    /// [`CodecError::ConflictingDefinition`]; the whole batch is checked
    /// before anything is inserted, so a failed call changes nothing.
    pub fn register(&mut self, defs: TypeMap) -> Result<()> {
        for (name, def) in &defs {
            if let Some(existing) = self.types.get(name) {
                if existing != def {
                    let err = CodecError::conflicting_definition(name);
                    debug!(fields = ?err.log_fields(), "rejected registration");
                    return Err(err);
                }
            }
        }

        let mut added = 0usize;
        for (name, def) in defs {
            if self.types.contains_key(&name) {
                trace!(type_name = %name, "definition already registered");
                continue;
            }
            self.types.insert(name, def);
            added += 1;
        }
        debug!(added, total = self.types.len(), "registered type definitions");
        Ok(())
    }

    /// Register a single definition.
    pub fn register_definition(
        &mut self,
        name: impl Into<String>,
        def: MessageDefinition,
    ) -> Result<()> {
        let mut defs = TypeMap::new();
        defs.insert(name.into(), def);
        self.register(defs)
    }

    /// Parse a definition document and register everything it defines.
    pub fn register_text(&mut self, name: &str, text: &str, format: SchemaFormat) -> Result<()> {
        let defs = parse_schema(name, text, format)?;
        self.register(defs)
    }

    /// Check if a type is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered type names in sorted order.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    /// Legacy multi-section definition document and legacy digest for a type.
    pub fn generate_definition_text(&self, type_name: &str) -> Result<(String, String)> {
        crate::hash::legacy::generate_definition_text(self, type_name)
    }

    /// Legacy MD5 digest of a type.
    pub fn md5sum(&self, type_name: &str) -> Result<String> {
        crate::hash::legacy::md5sum(self, type_name)
    }

    /// RIHS01 digest of a type.
    pub fn rihs01(&self, type_name: &str) -> Result<String> {
        crate::hash::rihs01::rihs01(self, type_name)
    }
}

impl TypeAccessor for Typestore {
    fn get_type(&self, type_name: &str) -> Option<&MessageDefinition> {
        self.types.get(type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ast::{BaseType, FieldDescriptor};

    fn single(name: &str, base: BaseType) -> TypeMap {
        let mut defs = TypeMap::new();
        defs.insert(
            name.to_string(),
            MessageDefinition::new().field("x", FieldDescriptor::base(base)),
        );
        defs
    }

    #[test]
    fn test_register_and_resolve() {
        let mut store = Typestore::new();
        assert!(store.is_empty());
        store.register(single("pkg/msg/A", BaseType::Int8)).unwrap();
        assert!(store.contains("pkg/msg/A"));
        assert_eq!(store.resolve("pkg/msg/A").unwrap().fields.len(), 1);
        assert!(matches!(
            store.resolve("pkg/msg/B"),
            Err(CodecError::TypeNotFound { .. })
        ));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut store = Typestore::new();
        store.register(single("pkg/msg/A", BaseType::Int8)).unwrap();
        store.register(single("pkg/msg/A", BaseType::Int8)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_conflicting_registration_changes_nothing() {
        let mut store = Typestore::new();
        store.register(single("pkg/msg/A", BaseType::Int8)).unwrap();

        let mut batch = single("pkg/msg/A", BaseType::Int16);
        batch.extend(single("pkg/msg/B", BaseType::Int8));
        let err = store.register(batch).unwrap_err();
        assert_eq!(err, CodecError::conflicting_definition("pkg/msg/A"));
        assert!(!store.contains("pkg/msg/B"));
        assert_eq!(
            store.resolve("pkg/msg/A").unwrap().fields[0].descriptor,
            FieldDescriptor::base(BaseType::Int8)
        );
    }

    #[test]
    fn test_two_and_three_segment_names_coexist() {
        let mut store = Typestore::new();
        store.register(single("pkg/A", BaseType::Int8)).unwrap();
        store.register(single("pkg/msg/A", BaseType::Int16)).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_dependencies_first_discovered_order() {
        let store = Typestore::with_builtins();
        let deps = store.dependencies("geometry_msgs/msg/PoseStamped").unwrap();
        assert_eq!(
            deps,
            vec![
                "std_msgs/msg/Header",
                "builtin_interfaces/msg/Time",
                "geometry_msgs/msg/Pose",
                "geometry_msgs/msg/Point",
                "geometry_msgs/msg/Quaternion",
            ]
        );
    }

    #[test]
    fn test_dependencies_fail_on_missing_type() {
        let mut store = Typestore::new();
        store
            .register_definition(
                "pkg/msg/A",
                MessageDefinition::new().field("b", FieldDescriptor::named("pkg/msg/B")),
            )
            .unwrap();
        assert!(matches!(
            store.dependencies("pkg/msg/A"),
            Err(CodecError::TypeNotFound { .. })
        ));
    }

    #[test]
    fn test_register_text() {
        let mut store = Typestore::new();
        store
            .register_text("pkg/msg/P", "float64 x\nfloat64 y", SchemaFormat::Msg)
            .unwrap();
        assert_eq!(store.type_names(), vec!["pkg/msg/P"]);
    }

    #[test]
    fn test_concurrent_readers() {
        let store = Typestore::with_builtins();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    assert!(store.resolve("std_msgs/msg/Header").is_ok());
                });
            }
        });
    }
}
