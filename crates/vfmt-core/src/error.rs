//! Error taxonomy for formatting calls.

use thiserror::Error;

/// Historical code for memory allocation failures.
pub const MEMORY_ALLOCATION_ERROR: i32 = 1;
/// Historical code for invalid format directives.
pub const INVALID_FORMAT: i32 = 2;
pub const ARGUMENT_ERROR: i32 = 3;
pub const REGISTRY_ERROR: i32 = 4;
pub const IO_ERROR: i32 = 5;

/// Coarse classification of a [`FormatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Allocation,
    InvalidFormat,
    Argument,
    Registry,
    Io,
}

impl ErrorClass {
    /// Fatal classes are routed through the error hook before the call
    /// returns.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Allocation | Self::InvalidFormat)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allocation => "allocation",
            Self::InvalidFormat => "invalid_format",
            Self::Argument => "argument",
            Self::Registry => "registry",
            Self::Io => "io",
        }
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to allocate output buffer of {requested} bytes")]
    Allocation { requested: usize },
    #[error("invalid format directive at byte {offset}{}", describe_found(.found))]
    InvalidFormat { offset: usize, found: Option<u8> },
    #[error("directive %{directive} expects {expected} argument, found {found}")]
    ArgumentMismatch {
        directive: char,
        expected: &'static str,
        found: &'static str,
    },
    #[error("directive %{directive} has no matching argument")]
    MissingArgument { directive: char },
    #[error("specifier registry is not initialized")]
    RegistryNotInitialized,
    #[error("specifier registry is in use by an in-flight formatting call")]
    RegistryBusy,
    #[error("write to destination failed: {0}")]
    Write(#[from] std::io::Error),
}

fn describe_found(found: &Option<u8>) -> String {
    match *found {
        Some(b) if b.is_ascii_graphic() => format!(" ('%{}')", b as char),
        Some(b) => format!(" ('%' followed by byte 0x{b:02x})"),
        None => String::from(" (template ends after '%')"),
    }
}

impl FormatError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Allocation { .. } => ErrorClass::Allocation,
            Self::InvalidFormat { .. } => ErrorClass::InvalidFormat,
            Self::ArgumentMismatch { .. } | Self::MissingArgument { .. } => ErrorClass::Argument,
            Self::RegistryNotInitialized | Self::RegistryBusy => ErrorClass::Registry,
            Self::Write(_) => ErrorClass::Io,
        }
    }

    /// Numeric error code, also used as the process exit status when a
    /// fatal error terminates the process.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self.class() {
            ErrorClass::Allocation => MEMORY_ALLOCATION_ERROR,
            ErrorClass::InvalidFormat => INVALID_FORMAT,
            ErrorClass::Argument => ARGUMENT_ERROR,
            ErrorClass::Registry => REGISTRY_ERROR,
            ErrorClass::Io => IO_ERROR,
        }
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.class().is_fatal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_classes_are_allocation_and_invalid_format() {
        assert!(FormatError::Allocation { requested: 8 }.is_fatal());
        assert!(
            FormatError::InvalidFormat {
                offset: 0,
                found: None
            }
            .is_fatal()
        );
        assert!(!FormatError::MissingArgument { directive: 'd' }.is_fatal());
        assert!(!FormatError::RegistryNotInitialized.is_fatal());
        assert!(!FormatError::RegistryBusy.is_fatal());
        assert!(!FormatError::Write(std::io::Error::other("closed")).is_fatal());
    }

    #[test]
    fn codes_match_historical_values() {
        assert_eq!(FormatError::Allocation { requested: 1 }.code(), 1);
        assert_eq!(
            FormatError::InvalidFormat {
                offset: 3,
                found: Some(b'z')
            }
            .code(),
            2
        );
        assert_eq!(
            FormatError::ArgumentMismatch {
                directive: 's',
                expected: "string",
                found: "int"
            }
            .code(),
            ARGUMENT_ERROR
        );
        assert_eq!(FormatError::RegistryBusy.code(), REGISTRY_ERROR);
    }

    #[test]
    fn invalid_format_message_names_the_byte() {
        let err = FormatError::InvalidFormat {
            offset: 4,
            found: Some(b'z'),
        };
        assert_eq!(err.to_string(), "invalid format directive at byte 4 ('%z')");

        let err = FormatError::InvalidFormat {
            offset: 9,
            found: None,
        };
        assert_eq!(
            err.to_string(),
            "invalid format directive at byte 9 (template ends after '%')"
        );

        let err = FormatError::InvalidFormat {
            offset: 0,
            found: Some(b'\n'),
        };
        assert!(err.to_string().ends_with("byte 0x0a)"));
    }

    #[test]
    fn mismatch_message_names_both_sides() {
        let err = FormatError::ArgumentMismatch {
            directive: 'x',
            expected: "unsigned int",
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "directive %x expects unsigned int argument, found string"
        );
    }
}
