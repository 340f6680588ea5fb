//! Directive registry: maps a directive byte to its conversion handler.
//!
//! The table is a flat 256-entry array indexed by the directive byte, so a
//! lookup is one bounds-free index. A registry starts uninitialized; in that
//! state (and after [`SpecifierRegistry::teardown`]) every lookup reports
//! absent and registration is refused.

pub mod handlers;

use std::fmt;
use std::sync::Arc;

use crate::error::FormatError;
use crate::stdio::args::ArgCursor;
use crate::stdio::buffer::OutputBuffer;

/// A conversion routine bound to a directive.
///
/// A handler consumes zero or one argument from the cursor and appends its
/// rendering to the buffer. `directive` is the byte that selected it.
pub trait Conversion: Send + Sync {
    fn convert(
        &self,
        directive: u8,
        args: &mut ArgCursor<'_, '_>,
        out: &mut OutputBuffer,
    ) -> Result<(), FormatError>;
}

impl<F> Conversion for F
where
    F: Fn(u8, &mut ArgCursor<'_, '_>, &mut OutputBuffer) -> Result<(), FormatError> + Send + Sync,
{
    fn convert(
        &self,
        directive: u8,
        args: &mut ArgCursor<'_, '_>,
        out: &mut OutputBuffer,
    ) -> Result<(), FormatError> {
        self(directive, args, out)
    }
}

/// Shared handle to a registered conversion.
pub type Handler = Arc<dyn Conversion>;

/// Wrap a closure as a [`Handler`].
pub fn handler_fn<F>(f: F) -> Handler
where
    F: Fn(u8, &mut ArgCursor<'_, '_>, &mut OutputBuffer) -> Result<(), FormatError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

type Table = [Option<Handler>; 256];

/// Directive byte to handler mapping.
pub struct SpecifierRegistry {
    table: Option<Box<Table>>,
}

impl SpecifierRegistry {
    /// An uninitialized registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { table: None }
    }

    /// A registry initialized with the built-in directive set.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.initialize();
        registry
    }

    /// Populate the built-in directive set. A second call is a no-op, so
    /// caller registrations made in between survive.
    pub fn initialize(&mut self) {
        if self.table.is_some() {
            return;
        }
        self.table = Some(Box::new([const { None }; 256]));
        handlers::register_builtins(self);
    }

    pub fn is_initialized(&self) -> bool {
        self.table.is_some()
    }

    /// Bind `directive` to `handler`, replacing any earlier binding.
    ///
    /// Returns the replaced handler, or
    /// [`FormatError::RegistryNotInitialized`] if the registry has not been
    /// initialized.
    pub fn register(
        &mut self,
        directive: u8,
        handler: Handler,
    ) -> Result<Option<Handler>, FormatError> {
        let table = self
            .table
            .as_mut()
            .ok_or(FormatError::RegistryNotInitialized)?;
        Ok(table[usize::from(directive)].replace(handler))
    }

    /// Handler bound to `directive`, if any.
    pub fn lookup(&self, directive: u8) -> Option<&Handler> {
        self.table.as_ref()?[usize::from(directive)].as_ref()
    }

    /// Drop every binding and return to the uninitialized state.
    pub fn teardown(&mut self) {
        self.table = None;
    }

    /// Number of bound directives.
    pub fn len(&self) -> usize {
        self.table
            .as_ref()
            .map_or(0, |t| t.iter().filter(|slot| slot.is_some()).count())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bound directive bytes in ascending order.
    pub fn directives(&self) -> Vec<u8> {
        let Some(table) = self.table.as_ref() else {
            return Vec::new();
        };
        (0..=u8::MAX)
            .filter(|&b| table[usize::from(b)].is_some())
            .collect()
    }
}

impl Default for SpecifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SpecifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let directives: String = self.directives().into_iter().map(char::from).collect();
        f.debug_struct("SpecifierRegistry")
            .field("initialized", &self.is_initialized())
            .field("directives", &directives)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote_handler() -> Handler {
        handler_fn(|directive, args, out| {
            let s = args.next_str(directive)?.unwrap_or(b"");
            out.push(b'"')?;
            out.append(s)?;
            out.push(b'"')
        })
    }

    #[test]
    fn new_registry_is_uninitialized_and_empty() {
        let registry = SpecifierRegistry::new();
        assert!(!registry.is_initialized());
        assert!(registry.is_empty());
        assert!(registry.lookup(b'd').is_none());
        assert!(registry.directives().is_empty());
    }

    #[test]
    fn initialize_installs_builtins() {
        let registry = SpecifierRegistry::with_builtins();
        assert!(registry.is_initialized());
        for d in *b"scidpbxXoR" {
            assert!(registry.lookup(d).is_some(), "missing %{}", d as char);
        }
        assert_eq!(registry.directives(), b"RXbcdiopsx".to_vec());
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut registry = SpecifierRegistry::with_builtins();
        let custom = quote_handler();
        registry.register(b'Q', custom.clone()).unwrap();
        registry.initialize();
        assert_eq!(registry.len(), 11);
        assert!(Arc::ptr_eq(registry.lookup(b'Q').unwrap(), &custom));
    }

    #[test]
    fn register_before_initialize_is_refused() {
        let mut registry = SpecifierRegistry::new();
        let err = registry.register(b'Q', quote_handler()).err().unwrap();
        assert!(matches!(err, FormatError::RegistryNotInitialized));
        assert!(registry.lookup(b'Q').is_none());
    }

    #[test]
    fn register_then_lookup_returns_same_handler() {
        let mut registry = SpecifierRegistry::with_builtins();
        assert!(registry.lookup(b'Q').is_none());
        let custom = quote_handler();
        assert!(registry.register(b'Q', custom.clone()).unwrap().is_none());
        assert!(Arc::ptr_eq(registry.lookup(b'Q').unwrap(), &custom));
    }

    #[test]
    fn reregistering_overwrites_and_returns_previous() {
        let mut registry = SpecifierRegistry::with_builtins();
        let builtin_d = registry.lookup(b'd').unwrap().clone();
        let custom = quote_handler();
        let previous = registry.register(b'd', custom.clone()).unwrap().unwrap();
        assert!(Arc::ptr_eq(&previous, &builtin_d));
        assert!(Arc::ptr_eq(registry.lookup(b'd').unwrap(), &custom));
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn teardown_makes_lookups_absent() {
        let mut registry = SpecifierRegistry::with_builtins();
        registry.teardown();
        assert!(!registry.is_initialized());
        assert!(registry.lookup(b'd').is_none());
        assert!(registry.register(b'd', quote_handler()).is_err());

        registry.initialize();
        assert!(registry.lookup(b'd').is_some());
    }

    #[test]
    fn debug_lists_directives() {
        let text = format!("{:?}", SpecifierRegistry::with_builtins());
        assert!(text.contains("initialized: true"));
        assert!(text.contains("RXbcdiopsx"));
    }
}
