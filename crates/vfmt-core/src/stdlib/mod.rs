//! Standard library helpers used by the formatting engine.

pub mod itoa;

pub use itoa::{SCRATCH_LEN, WIDE_SCRATCH_LEN, itoa, ultoa, utoa};
