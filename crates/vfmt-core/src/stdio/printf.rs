//! The `printf` family over a process-wide registry.
//!
//! [`initialize_printf`] must run before the first call; until then (and
//! after [`cleanup_printf`]) no directive is recognized. Every call holds a
//! recursive read lock on the registry for its whole duration, so a handler
//! may itself format through this layer. Lifecycle and registration calls
//! wait at most [`REGISTRY_WRITE_TIMEOUT`] for in-flight calls to finish and
//! otherwise fail with [`FormatError::RegistryBusy`]; in particular a handler
//! that registers a directive gets that error instead of blocking on its own
//! call.
//!
//! Configuration comes from [`format_config`] and fatal errors go to
//! [`global_error_hook`].

use std::io::Write;
use std::time::Duration;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use vfmt_runtime::format_config;

use crate::error::FormatError;
use crate::hook::global_error_hook;
use crate::registry::{Handler, SpecifierRegistry};
use crate::stdio::args::{ArgCursor, FormatArg};
use crate::stdio::engine::Engine;

/// Longest a registry mutation waits for in-flight formatting calls.
pub const REGISTRY_WRITE_TIMEOUT: Duration = Duration::from_millis(250);

static GLOBAL_REGISTRY: RwLock<SpecifierRegistry> = RwLock::new(SpecifierRegistry::new());

fn write_registry() -> Result<RwLockWriteGuard<'static, SpecifierRegistry>, FormatError> {
    GLOBAL_REGISTRY
        .try_write_for(REGISTRY_WRITE_TIMEOUT)
        .ok_or(FormatError::RegistryBusy)
}

/// Populate the global registry with the built-in directives. Idempotent.
pub fn initialize_printf() -> Result<(), FormatError> {
    write_registry()?.initialize();
    Ok(())
}

/// Drop every registration, built-ins included.
pub fn cleanup_printf() -> Result<(), FormatError> {
    write_registry()?.teardown();
    Ok(())
}

/// Bind `directive` to `handler` in the global registry, replacing any
/// previous binding, which is returned.
pub fn register_specifier(directive: u8, handler: Handler) -> Result<Option<Handler>, FormatError> {
    write_registry()?.register(directive, handler)
}

/// Read access to the global registry.
pub fn global_registry() -> RwLockReadGuard<'static, SpecifierRegistry> {
    GLOBAL_REGISTRY.read_recursive()
}

pub fn vfprintf<W: Write + ?Sized>(
    dest: &mut W,
    template: &[u8],
    args: &mut ArgCursor<'_, '_>,
) -> Result<usize, FormatError> {
    let registry = GLOBAL_REGISTRY.read_recursive();
    let hook = global_error_hook();
    Engine::new(&registry)
        .with_config(format_config())
        .with_error_hook(hook.as_ref())
        .vformat(template, args, dest)
}

/// Format to `dest`. Returns the byte count, or `-1` on error.
pub fn fprintf<W: Write + ?Sized>(dest: &mut W, template: &[u8], args: &[FormatArg<'_>]) -> i32 {
    status(vfprintf(dest, template, &mut ArgCursor::new(args)))
}

/// Format to standard output. Returns the byte count, or `-1` on error.
pub fn printf(template: &[u8], args: &[FormatArg<'_>]) -> i32 {
    let mut stdout = std::io::stdout().lock();
    fprintf(&mut stdout, template, args)
}

/// Format into memory.
pub fn sprintf(template: &[u8], args: &[FormatArg<'_>]) -> Result<Vec<u8>, FormatError> {
    let mut out = Vec::new();
    vfprintf(&mut out, template, &mut ArgCursor::new(args))?;
    Ok(out)
}

/// A count that does not fit the `i32` return is an overflow, reported as
/// `-1` like any other failure.
fn status(result: Result<usize, FormatError>) -> i32 {
    match result {
        Ok(written) => i32::try_from(written).unwrap_or(-1),
        Err(_) => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_errors_to_sentinel() {
        assert_eq!(status(Ok(12)), 12);
        assert_eq!(status(Err(FormatError::MissingArgument { directive: 'd' })), -1);
    }

    #[test]
    fn status_reports_overflowing_counts_as_failure() {
        assert_eq!(status(Ok(i32::MAX as usize)), i32::MAX);
        assert_eq!(status(Ok(i32::MAX as usize + 1)), -1);
        assert_eq!(status(Ok(usize::MAX)), -1);
    }
}
