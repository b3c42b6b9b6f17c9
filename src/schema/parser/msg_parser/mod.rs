// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Legacy `.msg` format parser using Pest.
//!
//! The format supports:
//! - One declaration per line: `TYPE name`, `TYPE name DEFAULT`, `TYPE NAME=VALUE`
//! - Array suffixes: `T[]` (sequence), `T[N]` (fixed), `T[<=N]` (bounded)
//! - Bounded strings: `string<=N`
//! - Dependency sections introduced by a line of `=` and a `MSG: pkg/Type` header
//! - Comments (`#` style, kept verbatim inside string constants)

use crate::core::{CodecError, Result};
use crate::schema::ast::{
    BaseType, ConstantDescriptor, Field, FieldDescriptor, MessageDefinition, TypeMap,
};
use crate::schema::parser::{is_section_rule, literal};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use tracing::debug;

/// Pest parser for a single `.msg` declaration line.
#[derive(Parser)]
#[grammar = "schema/parser/msg_parser/msg.pest"] // Path relative to src/ directory
pub struct MsgParser;

/// Type that legacy `time` fields refer to.
pub const TIME_TYPE: &str = "builtin_interfaces/msg/Time";
/// Type that legacy `duration` fields refer to.
pub const DURATION_TYPE: &str = "builtin_interfaces/msg/Duration";
/// Type that bare `Header` fields refer to.
pub const HEADER_TYPE: &str = "std_msgs/msg/Header";

/// A section of a multi-message document.
struct Section<'a> {
    type_name: String,
    lines: Vec<(usize, &'a str)>,
}

enum Declaration {
    Constant(ConstantDescriptor),
    Field(Field),
}

/// Parse a `.msg` document.
///
/// `name` is the type the first section defines. It is used as the
/// registry key exactly as given. Names read from `MSG:` headers and field
/// references are rewritten to the `pkg/msg/Type` form.
pub fn parse(name: &str, definition: &str) -> Result<TypeMap> {
    let mut types = TypeMap::new();

    for section in split_sections(name, definition)? {
        let def = parse_section(&section)?;
        match types.get(&section.type_name) {
            Some(existing) if *existing != def => {
                return Err(CodecError::conflicting_definition(&section.type_name));
            }
            Some(_) => {
                debug!(type_name = %section.type_name, "skipping repeated msg section");
            }
            None => {
                types.insert(section.type_name, def);
            }
        }
    }

    debug!(type_name = name, types = types.len(), "parsed msg definition");
    Ok(types)
}

/// Rewrite a two-segment `pkg/Type` name to `pkg/msg/Type`.
pub fn normalize_type_name(name: &str) -> String {
    match name.split('/').collect::<Vec<_>>().as_slice() {
        [package, type_name] => format!("{package}/msg/{type_name}"),
        _ => name.to_string(),
    }
}

fn split_sections<'a>(name: &str, definition: &'a str) -> Result<Vec<Section<'a>>> {
    let mut sections = Vec::new();
    let mut current = Section {
        type_name: name.to_string(),
        lines: Vec::new(),
    };
    let mut awaiting_header = false;

    for (index, line) in definition.lines().enumerate() {
        let line_no = index + 1;
        if awaiting_header {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let header = trimmed.strip_prefix("MSG:").ok_or_else(|| {
                CodecError::parse(
                    format!("{name} line {line_no}"),
                    format!("expected 'MSG: <type>' after separator, found '{trimmed}'"),
                )
            })?;
            current = Section {
                type_name: normalize_type_name(header.trim()),
                lines: Vec::new(),
            };
            awaiting_header = false;
        } else if is_section_rule(line) {
            sections.push(std::mem::replace(
                &mut current,
                Section {
                    type_name: String::new(),
                    lines: Vec::new(),
                },
            ));
            awaiting_header = true;
        } else {
            current.lines.push((line_no, line));
        }
    }

    if awaiting_header {
        return Err(CodecError::parse(
            name,
            "document ends after a separator without a 'MSG:' header",
        ));
    }
    sections.push(current);
    Ok(sections)
}

/// Remove a trailing `#` comment unless the line is a string constant.
fn strip_comment(line: &str) -> &str {
    let line = line.trim();
    if is_string_constant(line) {
        return line;
    }
    match line.find('#') {
        Some(pos) => line[..pos].trim_end(),
        None => line,
    }
}

fn is_string_constant(line: &str) -> bool {
    let Some((type_part, rest)) = line.split_once(char::is_whitespace) else {
        return false;
    };
    if !type_part.starts_with("string") || type_part.contains('[') {
        return false;
    }
    match (rest.find('='), rest.find('#')) {
        (Some(eq), Some(hash)) => eq < hash,
        (Some(_), None) => true,
        _ => false,
    }
}

fn parse_section(section: &Section<'_>) -> Result<MessageDefinition> {
    let package = crate::schema::ast::package_of(&section.type_name);
    let mut def = MessageDefinition::new();

    for &(line_no, raw) in &section.lines {
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }
        let context = format!("{} line {line_no}", section.type_name);
        match parse_line(line, package, &context)? {
            Declaration::Constant(constant) => def.constants.push(constant),
            Declaration::Field(field) => {
                if def.get_field(&field.name).is_some() {
                    return Err(CodecError::invalid_schema(
                        &section.type_name,
                        format!("duplicate field '{}'", field.name),
                    ));
                }
                def.fields.push(field);
            }
        }
    }

    // The legacy `seq` member lives on the wire only.
    if section.type_name == HEADER_TYPE
        && def.fields.first().is_some_and(|field| {
            field.name == "seq" && field.descriptor == FieldDescriptor::base(BaseType::UInt32)
        })
    {
        def.fields.remove(0);
    }

    Ok(def)
}

fn parse_line(line: &str, package: Option<&str>, context: &str) -> Result<Declaration> {
    let mut pairs = MsgParser::parse(Rule::line, line)
        .map_err(|e| CodecError::parse(context, format!("cannot parse '{line}': {e}")))?;
    let decl = pairs
        .next()
        .and_then(|line_pair| line_pair.into_inner().next())
        .ok_or_else(|| CodecError::parse(context, format!("empty declaration '{line}'")))?;

    match decl.as_rule() {
        Rule::constant => {
            let mut inner = decl.into_inner();
            let (type_spec, name, value) = (inner.next(), inner.next(), inner.next());
            let (Some(type_spec), Some(name)) = (type_spec, name) else {
                return Err(CodecError::parse(context, "malformed constant"));
            };
            let descriptor = parse_type_spec(type_spec, package, context)?;
            let FieldDescriptor::Base { base, .. } = descriptor else {
                return Err(CodecError::parse(
                    context,
                    format!("constant '{}' must have a primitive type", name.as_str()),
                ));
            };
            let raw_value = value.map(|v| v.as_str().trim()).unwrap_or_default();
            let value = literal::parse_constant(base, raw_value, context)?;
            Ok(Declaration::Constant(ConstantDescriptor::new(
                name.as_str(),
                base,
                value,
            )))
        }
        Rule::field => {
            let mut inner = decl.into_inner();
            let (type_spec, name, default) = (inner.next(), inner.next(), inner.next());
            let (Some(type_spec), Some(name)) = (type_spec, name) else {
                return Err(CodecError::parse(context, "malformed field"));
            };
            let mut field = Field::new(
                name.as_str(),
                parse_type_spec(type_spec, package, context)?,
            );
            if let Some(default) = default {
                field = field.with_default(default.as_str().trim());
            }
            Ok(Declaration::Field(field))
        }
        other => Err(CodecError::parse(
            context,
            format!("unexpected rule {other:?}"),
        )),
    }
}

fn parse_type_spec(
    pair: Pair<'_, Rule>,
    package: Option<&str>,
    context: &str,
) -> Result<FieldDescriptor> {
    let mut base_name = "";
    let mut string_bound = None;
    let mut collection: Option<(bool, usize)> = None;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::type_name => base_name = part.as_str(),
            Rule::string_bound => string_bound = Some(parse_number(part, context)?),
            Rule::array_suffix => {
                collection = Some(match part.into_inner().next() {
                    Some(len) if len.as_rule() == Rule::bounded_len => {
                        (false, parse_number(len, context)?)
                    }
                    Some(len) => (true, parse_number(len, context)?),
                    None => (false, 0),
                });
            }
            _ => {}
        }
    }

    let mut descriptor = resolve_type(base_name, package);
    if let Some(bound) = string_bound {
        if !matches!(
            descriptor,
            FieldDescriptor::Base {
                base: BaseType::String,
                ..
            }
        ) {
            return Err(CodecError::parse(
                context,
                format!("length bound on non-string type '{base_name}'"),
            ));
        }
        descriptor = FieldDescriptor::bounded_string(bound);
    }

    Ok(match collection {
        Some((true, length)) => FieldDescriptor::array(descriptor, length),
        Some((false, bound)) => FieldDescriptor::sequence(descriptor, bound),
        None => descriptor,
    })
}

/// Parse the single `number` child of a length rule.
fn parse_number(pair: Pair<'_, Rule>, context: &str) -> Result<usize> {
    let text = pair
        .into_inner()
        .next()
        .map(|n| n.as_str())
        .unwrap_or_default();
    text.parse()
        .map_err(|_| CodecError::parse(context, format!("invalid length '{text}'")))
}

/// Map a type token of the legacy grammar to a descriptor.
fn resolve_type(name: &str, package: Option<&str>) -> FieldDescriptor {
    match name {
        "byte" => FieldDescriptor::base(BaseType::Octet),
        "char" => FieldDescriptor::base(BaseType::UInt8),
        "time" => FieldDescriptor::named(TIME_TYPE),
        "duration" => FieldDescriptor::named(DURATION_TYPE),
        "Header" => FieldDescriptor::named(HEADER_TYPE),
        n if n.contains('/') => FieldDescriptor::named(normalize_type_name(n)),
        n => match BaseType::from_name(n) {
            Some(BaseType::Char | BaseType::Octet | BaseType::Float128) | None => match package {
                Some(package) => FieldDescriptor::named(format!("{package}/msg/{n}")),
                None => FieldDescriptor::named(n),
            },
            Some(base) => FieldDescriptor::base(base),
        },
    }
}
