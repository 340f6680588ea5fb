//! Test execution engine.

use vfmt_core::{DirectivePolicy, Engine, SpecifierRegistry};
use vfmt_runtime::FormatConfig;

use crate::args::parse_all;
use crate::diff;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::VerificationResult;

/// Runs fixture sets against a private registry holding the built-ins.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Configuration applied to every case; a case's own policy overrides
    /// the configured one.
    pub config: FormatConfig,
    registry: SpecifierRegistry,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
            config: FormatConfig::default(),
            registry: SpecifierRegistry::with_builtins(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: FormatConfig) -> Self {
        self.config = config;
        self
    }

    /// Registry used for every case, for registering extension directives.
    pub fn registry_mut(&mut self) -> &mut SpecifierRegistry {
        &mut self.registry
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| {
                let policy = case
                    .policy
                    .as_deref()
                    .map_or(self.config.policy, DirectivePolicy::from_str_loose);
                let expected = expected_text(case);
                let actual = self.execute_case(case, policy);
                let passed = actual == expected;
                VerificationResult {
                    case_name: case.name.clone(),
                    family: fixture_set.family.clone(),
                    policy: policy.as_str().to_string(),
                    passed,
                    diff: (!passed).then(|| diff::render_diff(&expected, &actual)),
                    expected,
                    actual,
                }
            })
            .collect()
    }

    fn execute_case(&self, case: &FixtureCase, policy: DirectivePolicy) -> String {
        let values = match parse_all(&case.args) {
            Ok(values) => values,
            Err(err) => return format!("unsupported:{err}"),
        };
        let args: Vec<_> = values.iter().map(|v| v.as_format_arg()).collect();
        let engine = Engine::new(&self.registry)
            .with_config(self.config)
            .with_policy(policy);
        match engine.format_to_vec(case.template.as_bytes(), &args) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => error_text(err.code()),
        }
    }
}

fn expected_text(case: &FixtureCase) -> String {
    match case.expected_error {
        Some(code) => error_text(code),
        None => case.expected_output.clone(),
    }
}

fn error_text(code: i32) -> String {
    format!("error:{code}")
}
