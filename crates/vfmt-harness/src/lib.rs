//! Conformance harness for vfmt.
//!
//! This crate provides:
//! - Fixtures: JSON case sets of template, arguments and expected output
//! - Runner: executes cases through the formatting engine
//! - Verify/report: pass/fail summary rendered as markdown and JSON, with the
//!   SHA-256 of every fixture file that contributed cases

#![forbid(unsafe_code)]

pub mod args;
pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod verify;

pub use args::ArgValue;
pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureSet, LoadedFixture};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
