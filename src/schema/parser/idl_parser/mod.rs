// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! OMG IDL format parser using Pest.
//!
//! Handles the IDL subset emitted for robotics message types: nested
//! modules, structs, typedefs (including array typedefs), constants with
//! simple expressions, sequences, bounded strings and annotations.
//!
//! Constants declared inside a module named `<Struct>_Constants` are
//! attached to `<Struct>` of the enclosing module. Member and constant
//! names that collide with reserved words get a trailing underscore.

use crate::core::{CodecError, Result};
use crate::schema::ast::{
    BaseType, ConstValue, ConstantDescriptor, Field, FieldDescriptor, MessageDefinition,
    TypeMap, EMPTY_STRUCT_PLACEHOLDER,
};
use crate::schema::parser::{is_section_rule, literal};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Pest parser for OMG IDL schema files.
#[derive(Parser)]
#[grammar = "schema/parser/idl_parser/omg_idl.pest"] // Path relative to src/ directory
pub struct IdlParser;

/// Identifiers renamed with a trailing `_` when used as member or
/// constant names. `type` is deliberately absent: it is a common field name.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Rename an identifier that collides with a reserved word.
pub fn rename_reserved(name: &str) -> String {
    if RESERVED_WORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Parse an IDL document.
///
/// Type names come from the module path (`std_msgs::msg::Header` becomes
/// `std_msgs/msg/Header`); `name` only labels errors.
pub fn parse(name: &str, definition: &str) -> Result<TypeMap> {
    let cleaned = normalize_idl_document(definition);
    let mut pairs = IdlParser::parse(Rule::specification, &cleaned)
        .map_err(|e| CodecError::parse(format!("IDL {name}"), format!("{e}")))?;
    let specification = pairs
        .next()
        .ok_or_else(|| CodecError::parse(format!("IDL {name}"), "empty document"))?;

    let mut builder = IdlBuilder::default();
    builder.definitions(specification.into_inner(), &mut Vec::new())?;
    let types = builder.finish();
    debug!(type_name = name, types = types.len(), "parsed IDL definition");
    Ok(types)
}

/// Strip the `=`-line plus `IDL: <type>` section headers of a
/// concatenated multi-file document.
pub fn normalize_idl_document(definition: &str) -> String {
    let mut kept = Vec::new();
    let mut lines = definition.lines().peekable();
    while let Some(line) = lines.next() {
        if is_section_rule(line)
            && lines
                .peek()
                .is_some_and(|next| next.trim_start().starts_with("IDL:"))
        {
            lines.next();
            continue;
        }
        kept.push(line);
    }
    kept.join("\n")
}

/// Intermediate value of a constant expression.
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Int(i128),
    Float(f64),
    Str(String),
    Bool(bool),
}

#[derive(Default)]
struct IdlBuilder {
    types: TypeMap,
    typedefs: HashMap<String, FieldDescriptor>,
    constants: HashMap<String, Operand>,
    pending_constants: Vec<(String, ConstantDescriptor)>,
}

fn scoped(scope: &[String], name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{}/{name}", scope.join("/"))
    }
}

fn child<'i>(pair: Pair<'i, Rule>, rule: Rule) -> Option<Pair<'i, Rule>> {
    pair.into_inner().find(|p| p.as_rule() == rule)
}

fn missing(what: &str, context: &str) -> CodecError {
    CodecError::parse(format!("IDL {context}"), format!("missing {what}"))
}

/// Map a base type keyword sequence to a base type.
fn base_type(text: &str) -> Result<BaseType> {
    let spelling = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let base = match spelling.as_str() {
        "boolean" => BaseType::Bool,
        "char" => BaseType::Char,
        "octet" => BaseType::Octet,
        "int8" => BaseType::Int8,
        "uint8" => BaseType::UInt8,
        "short" | "int16" => BaseType::Int16,
        "unsigned short" | "uint16" => BaseType::UInt16,
        "long" | "int32" => BaseType::Int32,
        "unsigned long" | "uint32" => BaseType::UInt32,
        "long long" | "int64" => BaseType::Int64,
        "unsigned long long" | "uint64" => BaseType::UInt64,
        "float" => BaseType::Float32,
        "double" => BaseType::Float64,
        "long double" => BaseType::Float128,
        other => {
            return Err(CodecError::parse(
                "IDL type",
                format!("unknown base type '{other}'"),
            ))
        }
    };
    Ok(base)
}

fn wrap_arrays(element: FieldDescriptor, sizes: &[usize]) -> FieldDescriptor {
    sizes
        .iter()
        .rev()
        .fold(element, |inner, &length| FieldDescriptor::array(inner, length))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

impl IdlBuilder {
    fn definitions<'i>(
        &mut self,
        pairs: impl Iterator<Item = Pair<'i, Rule>>,
        scope: &mut Vec<String>,
    ) -> Result<()> {
        for pair in pairs {
            if pair.as_rule() != Rule::definition {
                continue;
            }
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::module_dcl => self.module(inner, scope)?,
                    Rule::struct_dcl => {
                        for s in inner.into_inner() {
                            if s.as_rule() == Rule::struct_def {
                                self.structure(s, scope)?;
                            }
                        }
                    }
                    Rule::typedef_dcl => self.typedef(inner, scope)?,
                    Rule::const_dcl => self.constant(inner, scope)?,
                    // annotations
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn module(&mut self, pair: Pair<'_, Rule>, scope: &mut Vec<String>) -> Result<()> {
        let mut inner = pair.into_inner().filter(|p| p.as_rule() != Rule::kw_module);
        let name = inner
            .next()
            .filter(|p| p.as_rule() == Rule::identifier)
            .ok_or_else(|| missing("module name", &scope.join("/")))?;
        scope.push(name.as_str().to_string());
        let result = self.definitions(inner, scope);
        scope.pop();
        result
    }

    fn structure(&mut self, pair: Pair<'_, Rule>, scope: &[String]) -> Result<()> {
        let mut name = None;
        let mut members = Vec::new();
        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::identifier => name = Some(item.as_str().to_string()),
                Rule::member => members.push(item),
                _ => {}
            }
        }
        let name = name.ok_or_else(|| missing("struct name", &scope.join("/")))?;
        let full_name = scoped(scope, &name);

        let mut def = MessageDefinition::new();
        for member in members {
            let mut type_spec = None;
            let mut declarators = None;
            for item in member.into_inner() {
                match item.as_rule() {
                    Rule::type_spec => type_spec = Some(item),
                    Rule::declarators => declarators = Some(item),
                    _ => {}
                }
            }
            let element = self.type_spec(
                type_spec.ok_or_else(|| missing("member type", &full_name))?,
                scope,
            )?;
            let declarators = declarators.ok_or_else(|| missing("member name", &full_name))?;
            for (field_name, sizes) in self.declarators(declarators, scope)? {
                let field_name = rename_reserved(&field_name);
                if def.get_field(&field_name).is_some() {
                    return Err(CodecError::invalid_schema(
                        &full_name,
                        format!("duplicate member '{field_name}'"),
                    ));
                }
                def.fields
                    .push(Field::new(field_name, wrap_arrays(element.clone(), &sizes)));
            }
        }

        if def.fields.is_empty() {
            return Err(CodecError::invalid_schema(
                &full_name,
                "struct must have at least one member",
            ));
        }
        if def.fields.len() == 1 && def.fields[0].name == EMPTY_STRUCT_PLACEHOLDER {
            def.fields.clear();
        }

        match self.types.get(&full_name) {
            Some(existing) if *existing != def => {
                Err(CodecError::conflicting_definition(&full_name))
            }
            Some(_) => Ok(()),
            None => {
                self.types.insert(full_name, def);
                Ok(())
            }
        }
    }

    fn typedef(&mut self, pair: Pair<'_, Rule>, scope: &[String]) -> Result<()> {
        let context = scope.join("/");
        let mut type_spec = None;
        let mut declarators = None;
        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::type_spec => type_spec = Some(item),
                Rule::declarators => declarators = Some(item),
                _ => {}
            }
        }
        let element = self.type_spec(
            type_spec.ok_or_else(|| missing("typedef type", &context))?,
            scope,
        )?;
        let declarators = declarators.ok_or_else(|| missing("typedef name", &context))?;
        for (alias, sizes) in self.declarators(declarators, scope)? {
            self.typedefs
                .insert(scoped(scope, &alias), wrap_arrays(element.clone(), &sizes));
        }
        Ok(())
    }

    fn constant(&mut self, pair: Pair<'_, Rule>, scope: &[String]) -> Result<()> {
        let context = scope.join("/");
        let mut items = pair.into_inner().filter(|p| p.as_rule() != Rule::kw_const);
        let (Some(const_type), Some(ident), Some(expr)) = (items.next(), items.next(), items.next())
        else {
            return Err(missing("constant declaration part", &context));
        };

        let base = self.const_base(const_type, scope)?;
        let name = rename_reserved(ident.as_str());
        let full_name = scoped(scope, &name);
        let operand = self.eval(expr, base, scope, &full_name)?;
        let value = to_const(operand.clone(), base, &full_name)?;
        self.constants.insert(full_name, operand);

        if let Some(target) = scope.last().and_then(|m| m.strip_suffix("_Constants")) {
            let owner = scoped(&scope[..scope.len() - 1], target);
            self.pending_constants
                .push((owner, ConstantDescriptor::new(name, base, value)));
        }
        Ok(())
    }

    fn const_base(&self, pair: Pair<'_, Rule>, scope: &[String]) -> Result<BaseType> {
        let inner = pair
            .into_inner()
            .next()
            .ok_or_else(|| missing("constant type", &scope.join("/")))?;
        match inner.as_rule() {
            Rule::base_type_spec => base_type(inner.as_str()),
            Rule::string_type | Rule::wide_string_type => Ok(BaseType::String),
            _ => match self.resolve_type(inner.as_str(), scope) {
                FieldDescriptor::Base { base, .. } => Ok(base),
                other => Err(CodecError::invalid_schema(
                    scope.join("/"),
                    format!("constant type '{other}' is not primitive"),
                )),
            },
        }
    }

    fn declarators(
        &self,
        pair: Pair<'_, Rule>,
        scope: &[String],
    ) -> Result<Vec<(String, Vec<usize>)>> {
        let mut out = Vec::new();
        for declarator in pair.into_inner() {
            let mut name = String::new();
            let mut sizes = Vec::new();
            for item in declarator.into_inner() {
                match item.as_rule() {
                    Rule::identifier => name = item.as_str().to_string(),
                    Rule::fixed_array_size => {
                        let expr = child(item, Rule::const_expr)
                            .ok_or_else(|| missing("array size", &name))?;
                        sizes.push(self.eval_size(expr, scope)?);
                    }
                    _ => {}
                }
            }
            out.push((name, sizes));
        }
        Ok(out)
    }

    fn type_spec(&self, pair: Pair<'_, Rule>, scope: &[String]) -> Result<FieldDescriptor> {
        let context = scope.join("/");
        let inner = pair
            .into_inner()
            .next()
            .ok_or_else(|| missing("type", &context))?;
        match inner.as_rule() {
            Rule::base_type_spec => base_type(inner.as_str()).map(FieldDescriptor::base),
            Rule::scoped_name => Ok(self.resolve_type(inner.as_str(), scope)),
            Rule::template_type_spec => {
                let template = inner
                    .into_inner()
                    .next()
                    .ok_or_else(|| missing("template type", &context))?;
                match template.as_rule() {
                    Rule::sequence_type => {
                        let mut element = None;
                        let mut bound = 0;
                        for item in template.into_inner() {
                            match item.as_rule() {
                                Rule::type_spec => element = Some(self.type_spec(item, scope)?),
                                Rule::const_expr => bound = self.eval_size(item, scope)?,
                                _ => {}
                            }
                        }
                        let element = element.ok_or_else(|| missing("sequence element", &context))?;
                        Ok(FieldDescriptor::sequence(element, bound))
                    }
                    _ => {
                        let bound = match child(template, Rule::const_expr) {
                            Some(expr) => self.eval_size(expr, scope)?,
                            None => 0,
                        };
                        Ok(FieldDescriptor::Base {
                            base: BaseType::String,
                            bound,
                        })
                    }
                }
            }
            other => Err(CodecError::parse(
                format!("IDL {context}"),
                format!("unexpected type rule {other:?}"),
            )),
        }
    }

    /// Resolve a type reference against typedefs and structs in scope,
    /// innermost scope first. Unknown unqualified names resolve to the
    /// enclosing module.
    fn resolve_type(&self, raw: &str, scope: &[String]) -> FieldDescriptor {
        let name = raw.trim().trim_start_matches("::").replace("::", "/");
        for depth in (0..=scope.len()).rev() {
            let candidate = scoped(&scope[..depth], &name);
            if let Some(alias) = self.typedefs.get(&candidate) {
                return alias.clone();
            }
            if self.types.contains_key(&candidate) {
                return FieldDescriptor::named(candidate);
            }
        }
        if name.contains('/') {
            FieldDescriptor::named(name)
        } else {
            FieldDescriptor::named(scoped(scope, &name))
        }
    }

    fn lookup_constant(&self, raw: &str, scope: &[String], context: &str) -> Result<Operand> {
        let path = raw.trim().trim_start_matches("::").replace("::", "/");
        let name = match path.rsplit_once('/') {
            Some((prefix, last)) => format!("{prefix}/{}", rename_reserved(last)),
            None => rename_reserved(&path),
        };
        (0..=scope.len())
            .rev()
            .find_map(|depth| self.constants.get(&scoped(&scope[..depth], &name)))
            .cloned()
            .ok_or_else(|| {
                CodecError::parse(
                    format!("IDL {context}"),
                    format!("unknown constant '{raw}'"),
                )
            })
    }

    fn eval_size(&self, pair: Pair<'_, Rule>, scope: &[String]) -> Result<usize> {
        let context = scope.join("/");
        match self.eval(pair, BaseType::UInt64, scope, &context)? {
            Operand::Int(v) if v >= 0 => usize::try_from(v).map_err(|_| {
                CodecError::parse(format!("IDL {context}"), format!("size {v} too large"))
            }),
            other => Err(CodecError::parse(
                format!("IDL {context}"),
                format!("invalid size {other:?}"),
            )),
        }
    }

    fn eval(
        &self,
        pair: Pair<'_, Rule>,
        target: BaseType,
        scope: &[String],
        context: &str,
    ) -> Result<Operand> {
        match pair.as_rule() {
            Rule::const_expr | Rule::primary_expr => {
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| missing("expression", context))?;
                self.eval(inner, target, scope, context)
            }
            Rule::mult_expr => {
                let mut factors = pair.into_inner();
                let first = factors
                    .next()
                    .ok_or_else(|| missing("expression", context))?;
                let mut acc = self.eval(first, target, scope, context)?;
                for factor in factors {
                    let rhs = self.eval(factor, target, scope, context)?;
                    acc = multiply(acc, rhs, context)?;
                }
                Ok(acc)
            }
            Rule::unary_expr => {
                let mut items: Vec<_> = pair.into_inner().collect();
                let primary = items
                    .pop()
                    .ok_or_else(|| missing("expression", context))?;
                let mut value = self.eval(primary, target, scope, context)?;
                for op in items.iter().rev() {
                    value = apply_unary(op.as_str(), value, target, context)?;
                }
                Ok(value)
            }
            Rule::literal => {
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| missing("literal", context))?;
                literal_operand(inner, context)
            }
            Rule::scoped_name => self.lookup_constant(pair.as_str(), scope, context),
            other => Err(CodecError::parse(
                format!("IDL {context}"),
                format!("unexpected expression rule {other:?}"),
            )),
        }
    }

    fn finish(mut self) -> TypeMap {
        for (owner, constant) in self.pending_constants {
            match self.types.get_mut(&owner) {
                Some(def) => {
                    if !def.constants.iter().any(|c| c.name == constant.name) {
                        def.constants.push(constant);
                    }
                }
                None => {
                    warn!(owner = %owner, constant = %constant.name, "constants module without matching struct");
                }
            }
        }
        self.types
    }
}

fn literal_operand(pair: Pair<'_, Rule>, context: &str) -> Result<Operand> {
    let text = pair.as_str();
    let invalid = || CodecError::parse(format!("IDL {context}"), format!("invalid literal '{text}'"));
    match pair.as_rule() {
        Rule::integer_literal => literal::parse_int(text).map(Operand::Int).ok_or_else(invalid),
        Rule::float_literal => text.parse().map(Operand::Float).map_err(|_| invalid()),
        Rule::boolean_literal => literal::parse_bool(text).map(Operand::Bool).ok_or_else(invalid),
        Rule::string_literal => {
            // Atomic rule: the quotes are part of the matched text.
            let inner = text
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .ok_or_else(invalid)?;
            Ok(Operand::Str(unescape(inner)))
        }
        _ => Err(invalid()),
    }
}

fn multiply(lhs: Operand, rhs: Operand, context: &str) -> Result<Operand> {
    match (lhs, rhs) {
        (Operand::Int(a), Operand::Int(b)) => a.checked_mul(b).map(Operand::Int).ok_or_else(|| {
            CodecError::parse(format!("IDL {context}"), "integer overflow in constant")
        }),
        (Operand::Float(a), Operand::Float(b)) => Ok(Operand::Float(a * b)),
        (Operand::Int(a), Operand::Float(b)) => Ok(Operand::Float(a as f64 * b)),
        (Operand::Float(a), Operand::Int(b)) => Ok(Operand::Float(a * b as f64)),
        (a, b) => Err(CodecError::parse(
            format!("IDL {context}"),
            format!("cannot multiply {a:?} by {b:?}"),
        )),
    }
}

fn apply_unary(op: &str, value: Operand, target: BaseType, context: &str) -> Result<Operand> {
    match (op, value) {
        ("+", v @ (Operand::Int(_) | Operand::Float(_))) => Ok(v),
        ("-", Operand::Int(v)) => Ok(Operand::Int(-v)),
        ("-", Operand::Float(v)) => Ok(Operand::Float(-v)),
        ("~", Operand::Int(v)) => match literal::int_range(target) {
            // Unsigned complement stays within the declared width.
            Some((0, max)) => Ok(Operand::Int(v ^ max)),
            _ => Ok(Operand::Int(!v)),
        },
        (op, v) => Err(CodecError::parse(
            format!("IDL {context}"),
            format!("cannot apply '{op}' to {v:?}"),
        )),
    }
}

fn to_const(value: Operand, base: BaseType, context: &str) -> Result<ConstValue> {
    match (base, value) {
        (BaseType::String, Operand::Str(s)) => Ok(ConstValue::String(s)),
        (BaseType::Bool, Operand::Bool(b)) => Ok(ConstValue::Bool(b)),
        (BaseType::Bool, Operand::Int(v)) => Ok(ConstValue::Bool(v != 0)),
        (b, Operand::Float(v)) if b.is_float() => Ok(ConstValue::Float(v)),
        (b, Operand::Int(v)) if b.is_float() => Ok(ConstValue::Float(v as f64)),
        (b, Operand::Int(v)) if b.is_integer() => {
            literal::check_int_range(b, v, &format!("IDL {context}")).map(ConstValue::Int)
        }
        (b, v) => Err(CodecError::parse(
            format!("IDL {context}"),
            format!("cannot assign {v:?} to {b}"),
        )),
    }
}
