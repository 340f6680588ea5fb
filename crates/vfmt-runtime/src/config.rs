//! Runtime configuration.
//!
//! Configuration is read from the environment on first use and cached:
//! - `VFMT_DIRECTIVE_POLICY`: what to do with an unrecognized `%` directive.
//!   `recover` (default) emits the `%` marker and keeps going; `strict`
//!   aborts the whole call with an invalid-format error.
//! - `VFMT_BUFFER_CAPACITY`: initial output buffer capacity in bytes.
//! - `VFMT_BUFFER_LIMIT`: hard cap on output buffer capacity. Growth past
//!   the cap is reported as an allocation failure.

use std::sync::OnceLock;

/// Initial output buffer size used when nothing is configured.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Handling of a `%` that is not followed by a registered directive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectivePolicy {
    /// Emit the literal `%` and continue with the next template byte.
    #[default]
    Recover,
    /// Abort the whole call with an invalid-format error.
    Strict,
}

impl DirectivePolicy {
    /// Parse from string (case-insensitive). Unknown values fall back to
    /// [`DirectivePolicy::Recover`].
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" | "abort" | "fatal" => Self::Strict,
            _ => Self::Recover,
        }
    }

    /// Stable lowercase name, as accepted by [`Self::from_str_loose`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recover => "recover",
            Self::Strict => "strict",
        }
    }

    /// Returns true if an unrecognized directive aborts the call.
    #[must_use]
    pub const fn aborts_on_unknown(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Engine configuration for one or more formatting calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    pub policy: DirectivePolicy,
    /// Initial output buffer capacity.
    pub initial_capacity: usize,
    /// Maximum output buffer capacity; `None` means unbounded.
    pub capacity_limit: Option<usize>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            policy: DirectivePolicy::Recover,
            initial_capacity: DEFAULT_BUFFER_CAPACITY,
            capacity_limit: None,
        }
    }
}

impl FormatConfig {
    /// Build a configuration from a key lookup function.
    ///
    /// Malformed numeric values are ignored and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = lookup("VFMT_DIRECTIVE_POLICY") {
            config.policy = DirectivePolicy::from_str_loose(&v);
        }
        if let Some(cap) = lookup("VFMT_BUFFER_CAPACITY").and_then(|v| parse_size(&v)) {
            config.initial_capacity = cap;
        }
        if let Some(limit) = lookup("VFMT_BUFFER_LIMIT").and_then(|v| parse_size(&v)) {
            config.capacity_limit = Some(limit);
        }
        config
    }

    /// Build a configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn with_policy(mut self, policy: DirectivePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_capacity_limit(mut self, limit: usize) -> Self {
        self.capacity_limit = Some(limit);
        self
    }
}

/// Accepts plain decimal or `0x`-prefixed hex, with `_` separators.
fn parse_size(raw: &str) -> Option<usize> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '_').collect();
    if let Some(hex) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        usize::from_str_radix(hex, 16).ok()
    } else {
        cleaned.parse().ok()
    }
}

static GLOBAL_CONFIG: OnceLock<FormatConfig> = OnceLock::new();

/// Process configuration (reads the environment on first call, caches thereafter).
#[must_use]
pub fn format_config() -> FormatConfig {
    *GLOBAL_CONFIG.get_or_init(FormatConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parse_directive_policies() {
        assert_eq!(DirectivePolicy::from_str_loose("strict"), DirectivePolicy::Strict);
        assert_eq!(DirectivePolicy::from_str_loose("ABORT"), DirectivePolicy::Strict);
        assert_eq!(DirectivePolicy::from_str_loose(" fatal "), DirectivePolicy::Strict);
        assert_eq!(DirectivePolicy::from_str_loose("recover"), DirectivePolicy::Recover);
        assert_eq!(DirectivePolicy::from_str_loose("emit"), DirectivePolicy::Recover);
        assert_eq!(DirectivePolicy::from_str_loose("bogus"), DirectivePolicy::Recover);
    }

    #[test]
    fn default_is_recover() {
        assert_eq!(DirectivePolicy::default(), DirectivePolicy::Recover);
        assert!(!DirectivePolicy::Recover.aborts_on_unknown());
        assert!(DirectivePolicy::Strict.aborts_on_unknown());
    }

    #[test]
    fn policy_names_round_trip_through_loose_parse() {
        for policy in [DirectivePolicy::Recover, DirectivePolicy::Strict] {
            assert_eq!(DirectivePolicy::from_str_loose(policy.as_str()), policy);
        }
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = FormatConfig::from_lookup(|_| None);
        assert_eq!(config, FormatConfig::default());
        assert_eq!(config.initial_capacity, DEFAULT_BUFFER_CAPACITY);
        assert_eq!(config.capacity_limit, None);
    }

    #[test]
    fn lookup_overrides_every_field() {
        let config = FormatConfig::from_lookup(lookup_from(&[
            ("VFMT_DIRECTIVE_POLICY", "strict"),
            ("VFMT_BUFFER_CAPACITY", "64"),
            ("VFMT_BUFFER_LIMIT", "0x1_000"),
        ]));
        assert_eq!(config.policy, DirectivePolicy::Strict);
        assert_eq!(config.initial_capacity, 64);
        assert_eq!(config.capacity_limit, Some(4096));
    }

    #[test]
    fn malformed_sizes_keep_defaults() {
        let config = FormatConfig::from_lookup(lookup_from(&[
            ("VFMT_BUFFER_CAPACITY", "lots"),
            ("VFMT_BUFFER_LIMIT", "-1"),
        ]));
        assert_eq!(config.initial_capacity, DEFAULT_BUFFER_CAPACITY);
        assert_eq!(config.capacity_limit, None);
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = FormatConfig::default()
            .with_policy(DirectivePolicy::Strict)
            .with_initial_capacity(8)
            .with_capacity_limit(16);
        assert_eq!(config.policy, DirectivePolicy::Strict);
        assert_eq!(config.initial_capacity, 8);
        assert_eq!(config.capacity_limit, Some(16));
    }
}
