//! Integer to text conversion (`itoa`).
//!
//! Digits are produced least-significant first into a fixed scratch area and
//! then reversed in place, so no allocation happens per conversion. Letters
//! above 9 are always lowercase; callers that want uppercase fold the result.

/// Scratch size: 32 binary digits of a 32-bit magnitude, a sign, and one
/// spare byte.
pub const SCRATCH_LEN: usize = 35;

/// Scratch size for 64-bit values (pointer addresses) in any radix.
pub const WIDE_SCRATCH_LEN: usize = 64;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Convert a signed value in `radix` (2..=16).
///
/// Only radix 10 renders a leading `-`; in other radices a negative value is
/// rendered as the bit pattern of its unsigned 32-bit representation.
/// Returns `None` for an unsupported radix.
pub fn itoa(value: i32, radix: u32, scratch: &mut [u8; SCRATCH_LEN]) -> Option<&[u8]> {
    if !(2..=16).contains(&radix) {
        return None;
    }
    if value < 0 && radix == 10 {
        let len = render_digits(u64::from(value.unsigned_abs()), radix, &mut scratch[1..]);
        scratch[0] = b'-';
        return Some(&scratch[..len + 1]);
    }
    let len = render_digits(u64::from(value as u32), radix, scratch);
    Some(&scratch[..len])
}

/// Convert an unsigned value in `radix` (2..=16).
pub fn utoa(value: u32, radix: u32, scratch: &mut [u8; SCRATCH_LEN]) -> Option<&[u8]> {
    if !(2..=16).contains(&radix) {
        return None;
    }
    let len = render_digits(u64::from(value), radix, scratch);
    Some(&scratch[..len])
}

/// Convert a 64-bit unsigned value in `radix` (2..=16). Used for pointer
/// addresses, which do not fit the 32-bit conversions.
pub fn ultoa(value: u64, radix: u32, scratch: &mut [u8; WIDE_SCRATCH_LEN]) -> Option<&[u8]> {
    if !(2..=16).contains(&radix) {
        return None;
    }
    let len = render_digits(value, radix, scratch);
    Some(&scratch[..len])
}

/// Render `value` at the start of `out`, returning the digit count.
///
/// `out` must hold every digit of `value` in `radix`; callers size their
/// scratch for the widest value they pass.
fn render_digits(mut value: u64, radix: u32, out: &mut [u8]) -> usize {
    if value == 0 {
        out[0] = b'0';
        return 1;
    }
    let mut len = 0;
    let radix = u64::from(radix);
    while value != 0 {
        out[len] = DIGITS[(value % radix) as usize];
        value /= radix;
        len += 1;
    }
    out[..len].reverse();
    len
}
