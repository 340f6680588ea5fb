//! Shared inputs for the vfmt benchmarks.

use vfmt_core::FormatArg;

/// The classic mixed-directive template used across benches.
pub const MIXED_TEMPLATE: &[u8] =
    b"int=%d neg=%i chr=%c str=%s bin=%b oct=%o hex=%x HEX=%X ptr=%p rot=%R %%\n";

/// Arguments matching [`MIXED_TEMPLATE`].
#[must_use]
pub fn mixed_args() -> [FormatArg<'static>; 10] {
    [
        FormatArg::Int(123_456),
        FormatArg::Int(-42),
        FormatArg::Char(b'Z'),
        FormatArg::str("Hello, World!"),
        FormatArg::UInt(0b1011_0110),
        FormatArg::UInt(0o755),
        FormatArg::UInt(0xdead_beef),
        FormatArg::UInt(0xdead_beef),
        FormatArg::Pointer(0x7fff_1234_5678),
        FormatArg::str("Attack at dawn"),
    ]
}
