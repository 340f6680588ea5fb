//! Formatting engine (`vfprintf`).
//!
//! Single pass over the template, no backtracking:
//! - a byte other than `%` starts a literal run, appended verbatim
//! - `%%` appends one `%` (checked before any directive lookup)
//! - `%c` with `c` registered runs the bound handler
//! - any other `%` is unrecognized: under [`DirectivePolicy::Recover`] the
//!   marker is appended and scanning resumes at the next byte; under
//!   [`DirectivePolicy::Strict`] the call fails with
//!   [`FormatError::InvalidFormat`]
//!
//! At the end of the template the buffer is flushed to the destination
//! exactly once. The buffer never outlives the call, and no output at all
//! reaches the destination when rendering fails.

use std::io::Write;

use vfmt_runtime::metrics::{FormatMetrics, global_metrics};
use vfmt_runtime::{DirectivePolicy, FormatConfig};

use crate::error::{ErrorClass, FormatError};
use crate::hook::{self, ErrorHook};
use crate::registry::SpecifierRegistry;
use crate::stdio::args::{ArgCursor, FormatArg};
use crate::stdio::buffer::OutputBuffer;
use crate::stdio::scanner::{DIRECTIVE_MARKER, scan};

/// A configured formatter over a borrowed registry.
#[derive(Clone, Copy)]
pub struct Engine<'r> {
    registry: &'r SpecifierRegistry,
    config: FormatConfig,
    hook: Option<&'r dyn ErrorHook>,
}

impl<'r> Engine<'r> {
    /// Engine with default configuration and no error hook.
    pub fn new(registry: &'r SpecifierRegistry) -> Self {
        Self {
            registry,
            config: FormatConfig::default(),
            hook: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: FormatConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: DirectivePolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Route fatal-classified errors through `hook` before returning them.
    #[must_use]
    pub fn with_error_hook(mut self, hook: &'r dyn ErrorHook) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn config(&self) -> FormatConfig {
        self.config
    }

    pub fn registry(&self) -> &'r SpecifierRegistry {
        self.registry
    }

    /// Format `template` with `args` and write the result to `dest`.
    ///
    /// Returns the number of bytes written.
    pub fn format<W: Write + ?Sized>(
        &self,
        template: &[u8],
        args: &[FormatArg<'_>],
        dest: &mut W,
    ) -> Result<usize, FormatError> {
        self.vformat(template, &mut ArgCursor::new(args), dest)
    }

    /// Format into a fresh byte vector.
    pub fn format_to_vec(
        &self,
        template: &[u8],
        args: &[FormatArg<'_>],
    ) -> Result<Vec<u8>, FormatError> {
        let mut out = Vec::new();
        self.format(template, args, &mut out)?;
        Ok(out)
    }

    /// Format with an existing argument cursor, leaving it positioned after
    /// the last consumed argument.
    pub fn vformat<W: Write + ?Sized>(
        &self,
        template: &[u8],
        args: &mut ArgCursor<'_, '_>,
        dest: &mut W,
    ) -> Result<usize, FormatError> {
        let metrics = global_metrics();
        FormatMetrics::inc(&metrics.calls);

        let result = self.run(template, args, dest);
        match &result {
            Ok(written) => FormatMetrics::add(&metrics.bytes_flushed, *written as u64),
            Err(err) => {
                record_failure(metrics, err);
                if err.is_fatal()
                    && let Some(hook) = self.hook
                {
                    hook::dispatch_fatal(hook, err);
                }
            }
        }
        result
    }

    fn run<W: Write + ?Sized>(
        &self,
        template: &[u8],
        args: &mut ArgCursor<'_, '_>,
        dest: &mut W,
    ) -> Result<usize, FormatError> {
        let mut buffer =
            OutputBuffer::with_limit(self.config.initial_capacity, self.config.capacity_limit)?;
        self.render(template, args, &mut buffer)?;
        let written = buffer.flush(dest)?;
        buffer.release();
        Ok(written)
    }

    /// Render `template` into `buffer` without flushing it.
    pub fn render(
        &self,
        template: &[u8],
        args: &mut ArgCursor<'_, '_>,
        buffer: &mut OutputBuffer,
    ) -> Result<(), FormatError> {
        let metrics = global_metrics();
        let mut pos = 0;

        while pos < template.len() {
            if template[pos] != DIRECTIVE_MARKER {
                let end = template[pos..]
                    .iter()
                    .position(|&b| b == DIRECTIVE_MARKER)
                    .map_or(template.len(), |offset| pos + offset);
                buffer.append(&template[pos..end])?;
                pos = end;
                continue;
            }

            if template.get(pos + 1) == Some(&DIRECTIVE_MARKER) {
                buffer.push(DIRECTIVE_MARKER)?;
                FormatMetrics::inc(&metrics.escapes);
                pos += 2;
                continue;
            }

            let directive = scan(self.registry, template, pos);
            match (directive.handler, directive.character) {
                (Some(handler), Some(character)) => {
                    handler.convert(character, args, buffer)?;
                    FormatMetrics::inc(&metrics.directives);
                }
                _ => {
                    FormatMetrics::inc(&metrics.unknown_directives);
                    if self.config.policy.aborts_on_unknown() {
                        return Err(FormatError::InvalidFormat {
                            offset: pos,
                            found: directive.character,
                        });
                    }
                    buffer.push(DIRECTIVE_MARKER)?;
                }
            }
            pos += directive.consumed_len;
        }
        Ok(())
    }
}

fn record_failure(metrics: &FormatMetrics, err: &FormatError) {
    let counter = match err.class() {
        ErrorClass::Allocation => &metrics.allocation_failures,
        ErrorClass::Argument => &metrics.argument_errors,
        ErrorClass::Io => &metrics.write_failures,
        ErrorClass::InvalidFormat | ErrorClass::Registry => return,
    };
    FormatMetrics::inc(counter);
}
