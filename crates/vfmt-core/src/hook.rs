//! Fatal error reporting.
//!
//! Allocation failures and invalid directives are fatal-classified. An
//! [`Engine`](crate::Engine) carrying a hook hands each such error to it
//! before returning; the hook decides whether the process terminates with
//! the error's code or the error is returned to the caller.
//!
//! The `printf` family uses the process-wide hook, which defaults to
//! [`ReportAndTerminate`] until [`register_error_handler`] replaces it.

use std::io::Write;
use std::sync::Arc;

use parking_lot::RwLock;
use vfmt_runtime::{LogEmitter, LogEntry, LogLevel, Outcome};

use crate::error::FormatError;

/// What to do after a fatal error has been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalAction {
    /// Exit the process with [`FormatError::code`].
    Terminate,
    /// Return the error from the formatting call.
    Return,
}

/// Receives fatal-classified formatting errors.
pub trait ErrorHook: Send + Sync {
    fn on_fatal(&self, error: &FormatError) -> FatalAction;
}

impl<F> ErrorHook for F
where
    F: Fn(&FormatError) -> FatalAction + Send + Sync,
{
    fn on_fatal(&self, error: &FormatError) -> FatalAction {
        self(error)
    }
}

/// Default hook: one JSONL `fatal` record on stderr, then terminate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportAndTerminate;

impl ErrorHook for ReportAndTerminate {
    fn on_fatal(&self, error: &FormatError) -> FatalAction {
        // Nothing useful can be done if stderr itself is gone.
        let _ = report(error, &mut LogEmitter::to_stderr("hook"));
        FatalAction::Terminate
    }
}

/// Build the structured record describing `error`.
#[must_use]
pub fn fatal_entry(error: &FormatError) -> LogEntry {
    LogEntry::new(String::new(), LogLevel::Fatal, "format_error")
        .with_component("hook")
        .with_outcome(Outcome::Error)
        .with_error(error.code(), error.to_string())
        .with_details(serde_json::json!({ "class": error.class().as_str() }))
}

/// Write the record for `error` to `emitter`.
pub fn report<W: Write>(error: &FormatError, emitter: &mut LogEmitter<W>) -> std::io::Result<()> {
    emitter.emit_entry(fatal_entry(error))?;
    emitter.flush()
}

static GLOBAL_HOOK: RwLock<Option<Arc<dyn ErrorHook>>> = RwLock::new(None);

/// Install `hook` as the process-wide fatal error hook.
///
/// Returns the previously installed hook, if any.
pub fn register_error_handler(hook: Arc<dyn ErrorHook>) -> Option<Arc<dyn ErrorHook>> {
    GLOBAL_HOOK.write().replace(hook)
}

/// Restore the default [`ReportAndTerminate`] hook.
pub fn clear_error_handler() -> Option<Arc<dyn ErrorHook>> {
    GLOBAL_HOOK.write().take()
}

/// The hook the `printf` family currently routes fatal errors to.
#[must_use]
pub fn global_error_hook() -> Arc<dyn ErrorHook> {
    match GLOBAL_HOOK.read().as_ref() {
        Some(hook) => Arc::clone(hook),
        None => Arc::new(ReportAndTerminate),
    }
}

pub(crate) fn dispatch_fatal(hook: &dyn ErrorHook, error: &FormatError) {
    if hook.on_fatal(error) == FatalAction::Terminate {
        std::process::exit(error.code());
    }
}
