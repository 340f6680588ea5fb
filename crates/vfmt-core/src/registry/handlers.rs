//! Built-in conversion handlers.
//!
//! | Directive | Argument | Rendering |
//! |---|---|---|
//! | `s` | string | bytes verbatim; null renders `(null)` |
//! | `c` | char | one byte |
//! | `i`, `d` | int | signed decimal |
//! | `p` | pointer | `0x` + lowercase hex; null renders `(nil)` |
//! | `b` | unsigned int | binary |
//! | `x` / `X` | unsigned int | lowercase / uppercase hex |
//! | `o` | unsigned int | octal |
//! | `R` | string | ROT13, case preserved |
//!
//! `R` is registered through [`SpecifierRegistry::register`] like any caller
//! extension.

use std::sync::Arc;

use super::{Conversion, Handler, SpecifierRegistry};
use crate::error::FormatError;
use crate::stdio::args::ArgCursor;
use crate::stdio::buffer::OutputBuffer;
use crate::stdlib::itoa::{SCRATCH_LEN, WIDE_SCRATCH_LEN, itoa, ultoa, utoa};

/// Rendering of a null `%s` argument.
pub const NULL_STRING: &[u8] = b"(null)";
/// Rendering of a null `%p` argument.
pub const NULL_POINTER: &[u8] = b"(nil)";

/// Directive character and a short description of every built-in.
pub const BUILTIN_DIRECTIVES: [(u8, &str); 10] = [
    (b's', "string; null renders (null)"),
    (b'c', "single character"),
    (b'i', "signed decimal integer"),
    (b'd', "signed decimal integer"),
    (b'p', "pointer as 0x-prefixed lowercase hex; null renders (nil)"),
    (b'b', "unsigned binary"),
    (b'x', "unsigned lowercase hex"),
    (b'X', "unsigned uppercase hex"),
    (b'o', "unsigned octal"),
    (b'R', "string rotated by 13 letters, case preserved"),
];

/// The built-in conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Str,
    Char,
    Signed,
    Pointer,
    Binary,
    HexLower,
    HexUpper,
    Octal,
}

impl Conversion for Builtin {
    fn convert(
        &self,
        directive: u8,
        args: &mut ArgCursor<'_, '_>,
        out: &mut OutputBuffer,
    ) -> Result<(), FormatError> {
        match self {
            Self::Str => format_str(args.next_str(directive)?, out),
            Self::Char => out.push(args.next_char(directive)?),
            Self::Signed => format_signed(args.next_signed(directive)?, out),
            Self::Pointer => format_pointer(args.next_pointer(directive)?, out),
            Self::Binary => format_unsigned(args.next_unsigned(directive)?, 2, false, out),
            Self::HexLower => format_unsigned(args.next_unsigned(directive)?, 16, false, out),
            Self::HexUpper => format_unsigned(args.next_unsigned(directive)?, 16, true, out),
            Self::Octal => format_unsigned(args.next_unsigned(directive)?, 8, false, out),
        }
    }
}

/// ROT13 string transform, the sample caller extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rot13;

impl Conversion for Rot13 {
    fn convert(
        &self,
        directive: u8,
        args: &mut ArgCursor<'_, '_>,
        out: &mut OutputBuffer,
    ) -> Result<(), FormatError> {
        match args.next_str(directive)? {
            Some(s) => {
                let rotated: Vec<u8> = s.iter().map(|&b| rot13(b)).collect();
                out.append(&rotated)
            }
            None => out.append(NULL_STRING),
        }
    }
}

/// Install the built-in directive table into `registry`.
pub(crate) fn register_builtins(registry: &mut SpecifierRegistry) {
    let handler = |builtin: Builtin| -> Handler { Arc::new(builtin) };
    let signed = handler(Builtin::Signed);
    let bindings = [
        (b's', handler(Builtin::Str)),
        (b'c', handler(Builtin::Char)),
        (b'i', signed.clone()),
        (b'd', signed),
        (b'p', handler(Builtin::Pointer)),
        (b'b', handler(Builtin::Binary)),
        (b'x', handler(Builtin::HexLower)),
        (b'X', handler(Builtin::HexUpper)),
        (b'o', handler(Builtin::Octal)),
    ];
    for (directive, handler) in bindings {
        // Only called right after the table is allocated.
        let _ = registry.register(directive, handler);
    }
    let _ = registry.register(b'R', Arc::new(Rot13));
}

/// Render a possibly-null string. An empty string appends nothing.
pub fn format_str(s: Option<&[u8]>, out: &mut OutputBuffer) -> Result<(), FormatError> {
    out.append(s.unwrap_or(NULL_STRING))
}

/// Render a signed decimal integer.
pub fn format_signed(value: i32, out: &mut OutputBuffer) -> Result<(), FormatError> {
    let mut scratch = [0u8; SCRATCH_LEN];
    match itoa(value, 10, &mut scratch) {
        Some(digits) => out.append(digits),
        None => Ok(()),
    }
}

/// Render an unsigned integer in `radix`, folding letters to uppercase when
/// asked.
pub fn format_unsigned(
    value: u32,
    radix: u32,
    uppercase: bool,
    out: &mut OutputBuffer,
) -> Result<(), FormatError> {
    let mut scratch = [0u8; SCRATCH_LEN];
    let Some(digits) = utoa(value, radix, &mut scratch) else {
        return Ok(());
    };
    if uppercase {
        let mut folded = [0u8; SCRATCH_LEN];
        let folded = &mut folded[..digits.len()];
        folded.copy_from_slice(digits);
        folded.make_ascii_uppercase();
        return out.append(folded);
    }
    out.append(digits)
}

/// Render a pointer address as `0x` + lowercase hex, or `(nil)` for null.
pub fn format_pointer(addr: usize, out: &mut OutputBuffer) -> Result<(), FormatError> {
    if addr == 0 {
        return out.append(NULL_POINTER);
    }
    let mut scratch = [0u8; WIDE_SCRATCH_LEN + 2];
    scratch[..2].copy_from_slice(b"0x");
    let mut digits = [0u8; WIDE_SCRATCH_LEN];
    let Some(hex) = ultoa(addr as u64, 16, &mut digits) else {
        return Ok(());
    };
    let end = 2 + hex.len();
    scratch[2..end].copy_from_slice(hex);
    out.append(&scratch[..end])
}

/// Rotate an ASCII letter by 13 within its case; other bytes pass through.
pub fn rot13(b: u8) -> u8 {
    match b {
        b'a'..=b'z' => (b - b'a' + 13) % 26 + b'a',
        b'A'..=b'Z' => (b - b'A' + 13) % 26 + b'A',
        _ => b,
    }
}
