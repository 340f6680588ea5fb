//! Directive scanner.
//!
//! Classifies the `%`-led token at a given template position. Only bare
//! single-byte directives exist: a recognized token is always two bytes long
//! and an unrecognized one consumes just the marker, so the caller always
//! makes forward progress.

use std::fmt;

use crate::registry::{Handler, SpecifierRegistry};

/// Byte that starts a directive.
pub const DIRECTIVE_MARKER: u8 = b'%';
/// Template bytes consumed by a recognized directive (`%` + character).
pub const RECOGNIZED_LEN: usize = 2;
/// Template bytes consumed by an unrecognized directive (the `%` alone).
pub const UNRECOGNIZED_LEN: usize = 1;

/// Outcome of scanning one `%`-led token.
#[derive(Clone, Copy)]
pub struct Directive<'r> {
    /// Byte following the marker, if the template has one.
    pub character: Option<u8>,
    /// Template bytes this token occupies, including the marker.
    pub consumed_len: usize,
    /// Bound handler; present exactly when the directive is recognized.
    pub handler: Option<&'r Handler>,
}

impl Directive<'_> {
    pub fn is_recognized(&self) -> bool {
        self.handler.is_some()
    }
}

impl fmt::Debug for Directive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directive")
            .field("recognized", &self.is_recognized())
            .field("character", &self.character.map(char::from))
            .field("consumed_len", &self.consumed_len)
            .finish()
    }
}

/// Scan the directive whose marker sits at `template[position]`.
///
/// The byte after the marker is looked up in `registry`. A marker at the
/// very end of the template is unrecognized; nothing past the end is read.
pub fn scan<'r>(
    registry: &'r SpecifierRegistry,
    template: &[u8],
    position: usize,
) -> Directive<'r> {
    debug_assert_eq!(template.get(position), Some(&DIRECTIVE_MARKER));

    let character = template.get(position + 1).copied();
    match character.and_then(|c| registry.lookup(c)) {
        Some(handler) => Directive {
            character,
            consumed_len: RECOGNIZED_LEN,
            handler: Some(handler),
        },
        None => Directive {
            character,
            consumed_len: UNRECOGNIZED_LEN,
            handler: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_integer_directive() {
        let registry = SpecifierRegistry::with_builtins();
        let info = scan(&registry, b"%d", 0);
        assert!(info.is_recognized());
        assert_eq!(info.character, Some(b'd'));
        assert_eq!(info.consumed_len, 2);
    }

    #[test]
    fn valid_string_directive_mid_template() {
        let registry = SpecifierRegistry::with_builtins();
        let info = scan(&registry, b"name: %s!", 6);
        assert!(info.is_recognized());
        assert_eq!(info.character, Some(b's'));
        assert_eq!(info.consumed_len, 2);
    }

    #[test]
    fn unregistered_directive_consumes_only_marker() {
        let registry = SpecifierRegistry::with_builtins();
        let info = scan(&registry, b"%z", 0);
        assert!(!info.is_recognized());
        assert_eq!(info.character, Some(b'z'));
        assert_eq!(info.consumed_len, 1);
    }

    #[test]
    fn trailing_marker_is_unrecognized() {
        let registry = SpecifierRegistry::with_builtins();
        let info = scan(&registry, b"100%", 3);
        assert!(!info.is_recognized());
        assert_eq!(info.character, None);
        assert_eq!(info.consumed_len, 1);
    }

    #[test]
    fn uninitialized_registry_recognizes_nothing() {
        let registry = SpecifierRegistry::new();
        let info = scan(&registry, b"%d", 0);
        assert!(!info.is_recognized());
        assert_eq!(info.consumed_len, 1);
    }

    #[test]
    fn scanner_follows_registry_extensions() {
        let mut registry = SpecifierRegistry::with_builtins();
        assert!(!scan(&registry, b"%Q", 0).is_recognized());
        registry
            .register(b'Q', std::sync::Arc::new(crate::registry::handlers::Rot13))
            .unwrap();
        let info = scan(&registry, b"%Q", 0);
        assert!(info.is_recognized());
        assert!(format!("{info:?}").contains("recognized: true"));
    }
}
