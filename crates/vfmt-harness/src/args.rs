//! Owned argument values parsed from `kind:value` strings.
//!
//! Kinds: `int`, `uint`, `char`, `str`, `null`, `ptr`. Integers accept
//! decimal or `0x` hex with `_` separators. `str:` keeps everything after the
//! first colon, so the value may itself contain colons.

use vfmt_core::FormatArg;

use crate::error::HarnessError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Int(i32),
    UInt(u32),
    Char(u8),
    Str(String),
    Null,
    Ptr(usize),
}

impl ArgValue {
    pub fn parse(raw: &str) -> Result<Self, HarnessError> {
        let invalid = |reason| HarnessError::InvalidArg {
            raw: raw.to_string(),
            reason,
        };
        let (kind, value) = raw.split_once(':').unwrap_or((raw, ""));
        match kind {
            "int" => parse_signed(value)
                .and_then(|v| i32::try_from(v).ok())
                .map(Self::Int)
                .ok_or_else(|| invalid("expected a 32-bit signed integer")),
            "uint" => parse_unsigned(value)
                .and_then(|v| u32::try_from(v).ok())
                .map(Self::UInt)
                .ok_or_else(|| invalid("expected a 32-bit unsigned integer")),
            "char" => match value.as_bytes() {
                [b] => Ok(Self::Char(*b)),
                _ => Err(invalid("expected exactly one byte")),
            },
            "str" => Ok(Self::Str(value.to_string())),
            "null" if value.is_empty() => Ok(Self::Null),
            "null" => Err(invalid("null takes no value")),
            "ptr" => parse_unsigned(value)
                .and_then(|v| usize::try_from(v).ok())
                .map(Self::Ptr)
                .ok_or_else(|| invalid("expected an address")),
            _ => Err(invalid("unknown kind (int|uint|char|str|null|ptr)")),
        }
    }

    /// Borrow as an engine argument.
    #[must_use]
    pub fn as_format_arg(&self) -> FormatArg<'_> {
        match self {
            Self::Int(v) => FormatArg::Int(*v),
            Self::UInt(v) => FormatArg::UInt(*v),
            Self::Char(c) => FormatArg::Char(*c),
            Self::Str(s) => FormatArg::str(s),
            Self::Null => FormatArg::null_str(),
            Self::Ptr(addr) => FormatArg::Pointer(*addr),
        }
    }
}

/// Parse every argument string, failing on the first invalid one.
pub fn parse_all<S: AsRef<str>>(raws: &[S]) -> Result<Vec<ArgValue>, HarnessError> {
    raws.iter().map(|s| ArgValue::parse(s.as_ref())).collect()
}

fn parse_unsigned(raw: &str) -> Option<u64> {
    let s = raw.trim().replace('_', "");
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}

fn parse_signed(raw: &str) -> Option<i64> {
    let s = raw.trim();
    match s.strip_prefix('-') {
        Some(rest) => parse_unsigned(rest)
            .and_then(|v| i64::try_from(v).ok())
            .map(|v| -v),
        None => parse_unsigned(s).and_then(|v| i64::try_from(v).ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_kind() {
        assert_eq!(ArgValue::parse("int:-42").unwrap(), ArgValue::Int(-42));
        assert_eq!(ArgValue::parse("uint:0xff").unwrap(), ArgValue::UInt(255));
        assert_eq!(ArgValue::parse("char:A").unwrap(), ArgValue::Char(b'A'));
        assert_eq!(
            ArgValue::parse("str:a:b").unwrap(),
            ArgValue::Str(String::from("a:b"))
        );
        assert_eq!(ArgValue::parse("str:").unwrap(), ArgValue::Str(String::new()));
        assert_eq!(ArgValue::parse("null").unwrap(), ArgValue::Null);
        assert_eq!(ArgValue::parse("ptr:0x1000").unwrap(), ArgValue::Ptr(0x1000));
    }

    #[test]
    fn integer_bounds_are_enforced() {
        assert_eq!(
            ArgValue::parse("int:-2147483648").unwrap(),
            ArgValue::Int(i32::MIN)
        );
        assert!(ArgValue::parse("int:2147483648").is_err());
        assert!(ArgValue::parse("uint:-1").is_err());
        assert!(ArgValue::parse("uint:4_294_967_296").is_err());
    }

    #[test]
    fn rejects_malformed_specs() {
        for raw in ["", "float:1.5", "char:", "char:AB", "null:x", "int:abc"] {
            let err = ArgValue::parse(raw).unwrap_err();
            assert!(matches!(err, HarnessError::InvalidArg { .. }), "{raw}");
        }
    }

    #[test]
    fn converts_to_engine_arguments() {
        let values = parse_all(&["str:hi", "null", "ptr:0"]).unwrap();
        let args: Vec<FormatArg<'_>> = values.iter().map(ArgValue::as_format_arg).collect();
        assert_eq!(args[0], FormatArg::str("hi"));
        assert_eq!(args[1], FormatArg::null_str());
        assert_eq!(args[2], FormatArg::Pointer(0));
    }
}
