//! # vfmt-core
//!
//! Safe Rust implementation of the `printf` formatting engine.
//!
//! A call walks the template once. Literal bytes and `%%` escapes go straight
//! into an [`OutputBuffer`]; every other `%` is resolved against a
//! [`SpecifierRegistry`] and the bound handler renders one argument from an
//! [`ArgCursor`]. The finished buffer is written to the destination in a
//! single bulk write.
//!
//! Arguments are a typed [`FormatArg`] list rather than a C `va_list`, so a
//! directive/argument disagreement is reported as an error instead of being
//! undefined behavior.

#![deny(unsafe_code)]

pub mod error;
pub mod hook;
pub mod registry;
pub mod stdio;
pub mod stdlib;

pub use error::{ErrorClass, FormatError};
pub use hook::{
    ErrorHook, FatalAction, ReportAndTerminate, clear_error_handler, global_error_hook,
    register_error_handler,
};
pub use registry::{Conversion, Handler, SpecifierRegistry};
pub use stdio::args::{ArgCursor, FormatArg};
pub use stdio::buffer::OutputBuffer;
pub use stdio::engine::Engine;
pub use stdio::printf::{
    cleanup_printf, fprintf, initialize_printf, printf, register_specifier, sprintf, vfprintf,
};
pub use stdio::scanner::{Directive, scan};
pub use vfmt_runtime::{DirectivePolicy, FormatConfig};
