// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Canonical schema model shared by both grammars, the registry, the
//! hashers and the wire codecs.

use std::collections::BTreeMap;
use std::fmt;

/// Parsed definitions keyed by fully qualified type name.
pub type TypeMap = BTreeMap<String, MessageDefinition>;

/// Placeholder member name used for structs without fields.
pub const EMPTY_STRUCT_PLACEHOLDER: &str = "structure_needs_at_least_one_member";

/// Primitive wire types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseType {
    /// Boolean, one byte
    Bool,
    /// Single byte character
    Char,
    /// Opaque byte
    Octet,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// 128-bit float (IDL `long double`)
    Float128,
    /// UTF-8 string
    String,
}

impl BaseType {
    /// All base types in catalogue order.
    pub const ALL: [BaseType; 15] = [
        BaseType::Bool,
        BaseType::Char,
        BaseType::Octet,
        BaseType::Int8,
        BaseType::Int16,
        BaseType::Int32,
        BaseType::Int64,
        BaseType::UInt8,
        BaseType::UInt16,
        BaseType::UInt32,
        BaseType::UInt64,
        BaseType::Float32,
        BaseType::Float64,
        BaseType::Float128,
        BaseType::String,
    ];

    /// Look up a base type by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }

    /// Canonical name of the base type.
    pub const fn name(self) -> &'static str {
        match self {
            BaseType::Bool => "bool",
            BaseType::Char => "char",
            BaseType::Octet => "octet",
            BaseType::Int8 => "int8",
            BaseType::Int16 => "int16",
            BaseType::Int32 => "int32",
            BaseType::Int64 => "int64",
            BaseType::UInt8 => "uint8",
            BaseType::UInt16 => "uint16",
            BaseType::UInt32 => "uint32",
            BaseType::UInt64 => "uint64",
            BaseType::Float32 => "float32",
            BaseType::Float64 => "float64",
            BaseType::Float128 => "float128",
            BaseType::String => "string",
        }
    }

    /// Fixed encoded width in bytes, `None` for strings.
    pub const fn size(self) -> Option<usize> {
        match self {
            BaseType::Bool
            | BaseType::Char
            | BaseType::Octet
            | BaseType::Int8
            | BaseType::UInt8 => Some(1),
            BaseType::Int16 | BaseType::UInt16 => Some(2),
            BaseType::Int32 | BaseType::UInt32 | BaseType::Float32 => Some(4),
            BaseType::Int64 | BaseType::UInt64 | BaseType::Float64 => Some(8),
            BaseType::Float128 => Some(16),
            BaseType::String => None,
        }
    }

    /// CDR alignment in bytes.
    pub const fn alignment(self) -> usize {
        match self.size() {
            Some(size) => size,
            // Length prefix is 4-byte aligned
            None => 4,
        }
    }

    /// Whether collections of this type decode as a byte blob.
    pub const fn is_byte_like(self) -> bool {
        matches!(self, BaseType::Char | BaseType::Octet | BaseType::UInt8)
    }

    /// Whether this is an integer type (including `char` and `octet`).
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            BaseType::Char
                | BaseType::Octet
                | BaseType::Int8
                | BaseType::Int16
                | BaseType::Int32
                | BaseType::Int64
                | BaseType::UInt8
                | BaseType::UInt16
                | BaseType::UInt32
                | BaseType::UInt64
        )
    }

    /// Whether this is a floating point type.
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            BaseType::Float32 | BaseType::Float64 | BaseType::Float128
        )
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldDescriptor {
    /// Primitive value. `bound` is the maximum length of a bounded string
    /// and 0 everywhere else.
    Base { base: BaseType, bound: usize },
    /// Reference to another registered type.
    Named(String),
    /// Fixed-length array.
    Array {
        element: Box<FieldDescriptor>,
        length: usize,
    },
    /// Variable-length sequence. `bound` of 0 means unbounded.
    Sequence {
        element: Box<FieldDescriptor>,
        bound: usize,
    },
}

impl FieldDescriptor {
    /// Unbounded primitive.
    pub fn base(base: BaseType) -> Self {
        FieldDescriptor::Base { base, bound: 0 }
    }

    /// Bounded string `string<=N`.
    pub fn bounded_string(bound: usize) -> Self {
        FieldDescriptor::Base {
            base: BaseType::String,
            bound,
        }
    }

    /// Reference to a named type.
    pub fn named(name: impl Into<String>) -> Self {
        FieldDescriptor::Named(name.into())
    }

    /// Fixed-length array of `element`.
    pub fn array(element: FieldDescriptor, length: usize) -> Self {
        FieldDescriptor::Array {
            element: Box::new(element),
            length,
        }
    }

    /// Sequence of `element`; `bound` of 0 is unbounded.
    pub fn sequence(element: FieldDescriptor, bound: usize) -> Self {
        FieldDescriptor::Sequence {
            element: Box::new(element),
            bound,
        }
    }

    /// Element descriptor of a collection, `self` otherwise.
    pub fn element(&self) -> &FieldDescriptor {
        match self {
            FieldDescriptor::Array { element, .. } | FieldDescriptor::Sequence { element, .. } => {
                element
            }
            other => other,
        }
    }

    /// Referenced type name at any collection depth.
    pub fn referenced_type(&self) -> Option<&str> {
        match self {
            FieldDescriptor::Named(name) => Some(name),
            FieldDescriptor::Array { element, .. } | FieldDescriptor::Sequence { element, .. } => {
                element.referenced_type()
            }
            FieldDescriptor::Base { .. } => None,
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDescriptor::Base { base, bound } if *bound > 0 => write!(f, "{base}<={bound}"),
            FieldDescriptor::Base { base, .. } => write!(f, "{base}"),
            FieldDescriptor::Named(name) => f.write_str(name),
            FieldDescriptor::Array { element, length } => write!(f, "{element}[{length}]"),
            FieldDescriptor::Sequence { element, bound } if *bound > 0 => {
                write!(f, "{element}[<={bound}]")
            }
            FieldDescriptor::Sequence { element, .. } => write!(f, "{element}[]"),
        }
    }
}

/// Value of a constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    Int(i128),
    Float(f64),
    String(String),
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Bool(v) => write!(f, "{v}"),
            ConstValue::Int(v) => write!(f, "{v}"),
            // Whole floats keep a fractional digit so they read back as floats.
            ConstValue::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                write!(f, "{v:.1}")
            }
            ConstValue::Float(v) => write!(f, "{v}"),
            ConstValue::String(v) => f.write_str(v),
        }
    }
}

/// A named constant attached to a message type.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDescriptor {
    pub name: String,
    pub base: BaseType,
    pub value: ConstValue,
}

impl ConstantDescriptor {
    pub fn new(name: impl Into<String>, base: BaseType, value: ConstValue) -> Self {
        Self {
            name: name.into(),
            base,
            value,
        }
    }
}

/// A field of a message type.
///
/// The default literal is informational only and does not take part in
/// equality: two definitions that differ only in defaults are one type.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub descriptor: FieldDescriptor,
    pub default: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            default: None,
        }
    }

    /// Attach a default literal.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.descriptor == other.descriptor
    }
}

/// Ordered constants and fields of one message type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageDefinition {
    pub constants: Vec<ConstantDescriptor>,
    pub fields: Vec<Field>,
}

impl MessageDefinition {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field append.
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.push(Field::new(name, descriptor));
        self
    }

    /// Builder-style constant append.
    pub fn constant(mut self, name: impl Into<String>, base: BaseType, value: ConstValue) -> Self {
        self.constants
            .push(ConstantDescriptor::new(name, base, value));
        self
    }

    /// Look up a field by name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether the definition has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Directly referenced type names in field order, without repeats.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut deps: Vec<&str> = Vec::new();
        for field in &self.fields {
            if let Some(name) = field.descriptor.referenced_type() {
                if !deps.contains(&name) {
                    deps.push(name);
                }
            }
        }
        deps
    }
}

/// Package segment of a type name (`std_msgs` for `std_msgs/msg/Header`).
pub fn package_of(type_name: &str) -> Option<&str> {
    type_name
        .split_once('/')
        .map(|(package, _)| package)
        .filter(|package| !package.is_empty())
}

/// Last segment of a type name (`Header` for `std_msgs/msg/Header`).
pub fn short_name(type_name: &str) -> &str {
    type_name.rsplit('/').next().unwrap_or(type_name)
}

/// Legacy two-segment spelling of a type name (`std_msgs/Header`).
pub fn legacy_name(type_name: &str) -> String {
    match type_name.split('/').collect::<Vec<_>>().as_slice() {
        [package, "msg", name] => format!("{package}/{name}"),
        _ => type_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_type_catalogue() {
        for base in BaseType::ALL {
            assert_eq!(BaseType::from_name(base.name()), Some(base));
        }
        assert_eq!(BaseType::from_name("byte"), None);
        assert_eq!(BaseType::Float128.size(), Some(16));
        assert_eq!(BaseType::String.size(), None);
    }

    #[test]
    fn test_base_type_alignment() {
        assert_eq!(BaseType::Bool.alignment(), 1);
        assert_eq!(BaseType::Int16.alignment(), 2);
        assert_eq!(BaseType::Float32.alignment(), 4);
        assert_eq!(BaseType::UInt64.alignment(), 8);
        assert_eq!(BaseType::String.alignment(), 4);
    }

    #[test]
    fn test_descriptor_display() {
        let d = FieldDescriptor::sequence(FieldDescriptor::bounded_string(10), 3);
        assert_eq!(d.to_string(), "string<=10[<=3]");
        let d = FieldDescriptor::array(FieldDescriptor::named("pkg/msg/A"), 2);
        assert_eq!(d.to_string(), "pkg/msg/A[2]");
        assert_eq!(d.referenced_type(), Some("pkg/msg/A"));
    }

    #[test]
    fn test_defaults_do_not_affect_equality() {
        let a = MessageDefinition::new().field("x", FieldDescriptor::base(BaseType::Int32));
        let mut b = a.clone();
        b.fields[0].default = Some("42".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn test_dependencies_are_unique_and_ordered() {
        let def = MessageDefinition::new()
            .field("a", FieldDescriptor::named("pkg/msg/B"))
            .field("b", FieldDescriptor::sequence(FieldDescriptor::named("pkg/msg/A"), 0))
            .field("c", FieldDescriptor::named("pkg/msg/B"));
        assert_eq!(def.dependencies(), vec!["pkg/msg/B", "pkg/msg/A"]);
    }

    #[test]
    fn test_const_value_display() {
        assert_eq!(ConstValue::Float(1.0).to_string(), "1.0");
        assert_eq!(ConstValue::Float(0.25).to_string(), "0.25");
        assert_eq!(ConstValue::Int(-3).to_string(), "-3");
        assert_eq!(ConstValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_name_helpers() {
        assert_eq!(package_of("std_msgs/msg/Header"), Some("std_msgs"));
        assert_eq!(package_of("Header"), None);
        assert_eq!(short_name("std_msgs/msg/Header"), "Header");
        assert_eq!(legacy_name("std_msgs/msg/Header"), "std_msgs/Header");
        assert_eq!(legacy_name("std_msgs/Header"), "std_msgs/Header");
    }
}
