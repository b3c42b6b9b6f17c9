// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Literal parsing shared by the grammar front ends.

use crate::core::{CodecError, Result};
use crate::schema::ast::{BaseType, ConstValue};

/// Parse an integer literal in decimal, `0x` hexadecimal or leading-zero
/// octal notation with an optional sign.
pub fn parse_int(text: &str) -> Option<i128> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    // from_str_radix would accept a second sign after the prefix
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        i128::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        let octal = &digits[1..];
        if !octal.bytes().all(|b| matches!(b, b'0'..=b'7')) {
            return None;
        }
        i128::from_str_radix(octal, 8).ok()?
    } else {
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<i128>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse a boolean literal.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "true" | "True" | "TRUE" | "1" => Some(true),
        "false" | "False" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a floating point literal. Integer literals are accepted too.
pub fn parse_float(text: &str) -> Option<f64> {
    let text = text.trim();
    text.parse::<f64>()
        .ok()
        .or_else(|| parse_int(text).map(|v| v as f64))
}

/// Inclusive value range of an integer base type.
pub fn int_range(base: BaseType) -> Option<(i128, i128)> {
    let range = match base {
        BaseType::Int8 => (i8::MIN as i128, i8::MAX as i128),
        BaseType::Int16 => (i16::MIN as i128, i16::MAX as i128),
        BaseType::Int32 => (i32::MIN as i128, i32::MAX as i128),
        BaseType::Int64 => (i64::MIN as i128, i64::MAX as i128),
        BaseType::UInt8 | BaseType::Octet | BaseType::Char => (0, u8::MAX as i128),
        BaseType::UInt16 => (0, u16::MAX as i128),
        BaseType::UInt32 => (0, u32::MAX as i128),
        BaseType::UInt64 => (0, u64::MAX as i128),
        _ => return None,
    };
    Some(range)
}

/// Check that an integer constant fits its declared type.
pub fn check_int_range(base: BaseType, value: i128, context: &str) -> Result<i128> {
    match int_range(base) {
        Some((min, max)) if value < min || value > max => Err(CodecError::parse(
            context,
            format!("value {value} out of range for {base}"),
        )),
        _ => Ok(value),
    }
}

/// Convert the literal text of a constant to a typed value.
pub fn parse_constant(base: BaseType, text: &str, context: &str) -> Result<ConstValue> {
    let invalid = || CodecError::parse(context, format!("invalid {base} literal '{text}'"));
    match base {
        BaseType::String => Ok(ConstValue::String(text.to_string())),
        BaseType::Bool => parse_bool(text).map(ConstValue::Bool).ok_or_else(invalid),
        b if b.is_float() => parse_float(text).map(ConstValue::Float).ok_or_else(invalid),
        b => {
            let value = parse_int(text).ok_or_else(invalid)?;
            check_int_range(b, value, context).map(ConstValue::Int)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_notations() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-42"), Some(-42));
        assert_eq!(parse_int("0x1F"), Some(31));
        assert_eq!(parse_int("-0x10"), Some(-16));
        assert_eq!(parse_int("017"), Some(15));
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("09"), None);
        assert_eq!(parse_int("+-1"), None);
        assert_eq!(parse_int("abc"), None);
    }

    #[test]
    fn test_parse_int_rejects_sign_after_prefix() {
        assert_eq!(parse_int("0x-5"), None);
        assert_eq!(parse_int("0x+5"), None);
        assert_eq!(parse_int("0-7"), None);
        assert_eq!(parse_int("0+7"), None);
        assert_eq!(parse_int("-0x5"), Some(-5));
        assert_eq!(parse_int("-017"), Some(-15));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn test_parse_constant_checks_range() {
        assert_eq!(
            parse_constant(BaseType::UInt8, "255", "x").unwrap(),
            ConstValue::Int(255)
        );
        assert!(parse_constant(BaseType::UInt8, "256", "x").is_err());
        assert!(parse_constant(BaseType::Int8, "-129", "x").is_err());
    }

    #[test]
    fn test_parse_constant_keeps_string_verbatim() {
        assert_eq!(
            parse_constant(BaseType::String, "a # not a comment", "x").unwrap(),
            ConstValue::String("a # not a comment".to_string())
        );
    }

    #[test]
    fn test_parse_constant_float_accepts_integer_text() {
        assert_eq!(
            parse_constant(BaseType::Float64, "2", "x").unwrap(),
            ConstValue::Float(2.0)
        );
    }
}
