//! CLI entrypoint for the vfmt conformance harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vfmt_core::registry::handlers::BUILTIN_DIRECTIVES;
use vfmt_core::{ArgCursor, initialize_printf, vfprintf};
use vfmt_harness::args::parse_all;
use vfmt_harness::fixtures::{LoadedFixture, fixture_paths};
use vfmt_harness::report::FixtureDigest;
use vfmt_harness::{ConformanceReport, HarnessError, TestRunner, VerificationSummary};
use vfmt_runtime::{LogEmitter, LogEntry, LogLevel, Outcome, format_config, now_utc};

/// Conformance tooling for vfmt.
#[derive(Debug, Parser)]
#[command(name = "vfmt-harness")]
#[command(about = "Conformance testing harness for vfmt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Format a template to stdout through the global printf layer.
    Render {
        /// Format template.
        #[arg(long)]
        template: String,
        /// Argument as `kind:value` (int, uint, char, str, null, ptr). Repeatable.
        #[arg(long = "arg")]
        args: Vec<String>,
    },
    /// Verify the engine against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown; JSON is written alongside).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Print the built-in directive table.
    ListDirectives,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render { template, args } => {
            let values = parse_all(&args)?;
            let args: Vec<_> = values.iter().map(|v| v.as_format_arg()).collect();
            initialize_printf()?;
            let mut stdout = std::io::stdout().lock();
            vfprintf(&mut stdout, template.as_bytes(), &mut ArgCursor::new(&args))?;
        }
        Command::Verify {
            fixture,
            report,
            log,
        } => {
            eprintln!("Verifying against fixtures in {}", fixture.display());
            let mut fixtures = Vec::new();
            for path in fixture_paths(&fixture)? {
                match LoadedFixture::load(&path) {
                    Ok(loaded) => fixtures.push(loaded),
                    Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
                }
            }
            if fixtures.is_empty() {
                return Err(HarnessError::NoFixtures(fixture).into());
            }

            let config = format_config();
            let runner = TestRunner::new("fixture-verify").with_config(config);
            let results = fixtures
                .iter()
                .flat_map(|loaded| runner.run(&loaded.set))
                .collect();
            let summary = VerificationSummary::from_results(results);

            if let Some(log_path) = log {
                let mut emitter = LogEmitter::to_file(&log_path, "verify")?;
                for r in &summary.results {
                    let (level, outcome) = if r.passed {
                        (LogLevel::Info, Outcome::Pass)
                    } else {
                        (LogLevel::Error, Outcome::Fail)
                    };
                    let mut entry = LogEntry::new(String::new(), level, "fixture_case")
                        .with_component("harness")
                        .with_policy(r.policy.clone())
                        .with_outcome(outcome)
                        .with_details(serde_json::json!({
                            "case": r.case_name,
                            "family": r.family,
                        }));
                    if r.passed {
                        entry = entry.with_bytes(r.actual.len() as u64);
                    } else {
                        entry.message = r.diff.clone();
                    }
                    emitter.emit_entry(entry)?;
                }
                let outcome = if summary.all_passed() {
                    Outcome::Pass
                } else {
                    Outcome::Fail
                };
                emitter.emit_entry(
                    LogEntry::new(String::new(), LogLevel::Info, "verify_complete")
                        .with_component("harness")
                        .with_outcome(outcome)
                        .with_details(serde_json::json!({
                            "total": summary.total,
                            "passed": summary.passed,
                            "failed": summary.failed,
                        })),
                )?;
                emitter.flush()?;
                eprintln!("Wrote structured log to {}", log_path.display());
            }

            let report_doc = ConformanceReport {
                title: String::from("vfmt Conformance Report"),
                policy: config.policy.as_str().to_string(),
                timestamp: now_utc(),
                fixtures: fixtures.iter().map(FixtureDigest::from).collect(),
                summary,
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );

            if let Some(report_path) = report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(&report_path, report_doc.to_markdown())?;
                std::fs::write(report_path.with_extension("json"), report_doc.to_json())?;
            }

            if !report_doc.summary.all_passed() {
                return Err("Conformance verification failed".into());
            }
        }
        Command::ListDirectives => {
            for (directive, description) in BUILTIN_DIRECTIVES {
                println!("%{}  {description}", directive as char);
            }
        }
    }

    Ok(())
}
