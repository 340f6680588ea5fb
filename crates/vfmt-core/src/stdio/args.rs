//! Typed argument list and the cursor handlers consume it through.
//!
//! This replaces an untyped `va_list`: every argument carries its variant,
//! and a handler that receives the wrong one reports
//! [`FormatError::ArgumentMismatch`] instead of reading garbage.

use crate::error::FormatError;

/// One formatting argument.
///
/// Integer widths follow C `int` / `unsigned int`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg<'a> {
    Int(i32),
    UInt(u32),
    Char(u8),
    /// A string argument; `None` is a null string.
    Str(Option<&'a [u8]>),
    /// A pointer address; `0` is the null pointer.
    Pointer(usize),
}

impl<'a> FormatArg<'a> {
    /// A string argument from UTF-8 text.
    #[must_use]
    pub fn str(s: &'a str) -> Self {
        Self::Str(Some(s.as_bytes()))
    }

    /// A string argument from raw bytes.
    #[must_use]
    pub fn bytes(b: &'a [u8]) -> Self {
        Self::Str(Some(b))
    }

    /// The null string.
    #[must_use]
    pub const fn null_str() -> Self {
        Self::Str(None)
    }

    /// A pointer argument from a raw pointer's address.
    #[must_use]
    pub fn ptr<T>(p: *const T) -> Self {
        Self::Pointer(p as usize)
    }

    /// Variant name used in mismatch diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::UInt(_) => "unsigned int",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::Pointer(_) => "pointer",
        }
    }
}

impl From<i32> for FormatArg<'_> {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for FormatArg<'_> {
    fn from(v: u32) -> Self {
        Self::UInt(v)
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(s: &'a str) -> Self {
        Self::str(s)
    }
}

impl<'a> From<Option<&'a str>> for FormatArg<'a> {
    fn from(s: Option<&'a str>) -> Self {
        Self::Str(s.map(str::as_bytes))
    }
}

/// Forward-only cursor over a call's arguments.
///
/// Extra arguments left over at the end of a call are ignored, as with
/// `printf`.
#[derive(Debug, Clone)]
pub struct ArgCursor<'a, 'b> {
    args: &'b [FormatArg<'a>],
    pos: usize,
}

impl<'a, 'b> ArgCursor<'a, 'b> {
    pub fn new(args: &'b [FormatArg<'a>]) -> Self {
        Self { args, pos: 0 }
    }

    /// Take the next argument on behalf of `directive`, whatever its variant.
    pub fn next(&mut self, directive: u8) -> Result<FormatArg<'a>, FormatError> {
        self.take(directive, "any", Some)
    }

    /// Convert the next argument with `accept` and advance past it.
    ///
    /// The cursor only moves when `accept` succeeds; after a mismatch the
    /// offending argument is still the next one.
    fn take<T>(
        &mut self,
        directive: u8,
        expected: &'static str,
        accept: impl FnOnce(FormatArg<'a>) -> Option<T>,
    ) -> Result<T, FormatError> {
        let arg = self
            .args
            .get(self.pos)
            .copied()
            .ok_or(FormatError::MissingArgument {
                directive: directive as char,
            })?;
        let value = accept(arg).ok_or(FormatError::ArgumentMismatch {
            directive: directive as char,
            expected,
            found: arg.kind(),
        })?;
        self.pos += 1;
        Ok(value)
    }

    /// Arguments consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Arguments not yet consumed.
    pub fn remaining(&self) -> usize {
        self.args.len() - self.pos
    }

    /// Next argument as a signed integer. Accepts `Int` and `Char`.
    pub fn next_signed(&mut self, directive: u8) -> Result<i32, FormatError> {
        self.take(directive, "int", |arg| match arg {
            FormatArg::Int(v) => Some(v),
            FormatArg::Char(c) => Some(i32::from(c)),
            _ => None,
        })
    }

    /// Next argument as an unsigned integer.
    ///
    /// Accepts `UInt`, and `Int` reinterpreted as its 32-bit pattern.
    pub fn next_unsigned(&mut self, directive: u8) -> Result<u32, FormatError> {
        self.take(directive, "unsigned int", |arg| match arg {
            FormatArg::UInt(v) => Some(v),
            FormatArg::Int(v) => Some(v as u32),
            _ => None,
        })
    }

    /// Next argument as a single byte. Accepts `Char`, and `Int` truncated to
    /// its low byte.
    pub fn next_char(&mut self, directive: u8) -> Result<u8, FormatError> {
        self.take(directive, "char", |arg| match arg {
            FormatArg::Char(c) => Some(c),
            FormatArg::Int(v) => Some(v as u8),
            _ => None,
        })
    }

    /// Next argument as a possibly-null string.
    pub fn next_str(&mut self, directive: u8) -> Result<Option<&'a [u8]>, FormatError> {
        self.take(directive, "string", |arg| match arg {
            FormatArg::Str(s) => Some(s),
            _ => None,
        })
    }

    /// Next argument as a pointer address. A null string counts as a null
    /// pointer.
    pub fn next_pointer(&mut self, directive: u8) -> Result<usize, FormatError> {
        self.take(directive, "pointer", |arg| match arg {
            FormatArg::Pointer(addr) => Some(addr),
            FormatArg::Str(None) => Some(0),
            FormatArg::Str(Some(s)) => Some(s.as_ptr() as usize),
            _ => None,
        })
    }
}
