//! Formatted output: buffer, arguments, directive scanning, the engine and
//! the `printf` family built on top of it.

pub mod args;
pub mod buffer;
pub mod engine;
pub mod printf;
pub mod scanner;

pub use printf::{
    cleanup_printf, fprintf, initialize_printf, printf, register_specifier, sprintf, vfprintf,
};
